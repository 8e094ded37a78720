//! Network access control session records.
//!
//! Vendors report authentication results with their own enumerations. Drivers
//! translate them into the platform's canonical status names defined here;
//! anything a driver does not recognise is carried through untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use nms_types::DeviceId;

/// Sentinel used for optional session attributes the agent did not report.
pub const UNKNOWN: &str = "unknown";

/// Canonical authentication (authc) state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthcStatus {
    Success,
    Failed,
    Other(String),
}

impl AuthcStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AuthcStatus::Success => "authcSuccess",
            AuthcStatus::Failed => "authcFailed",
            AuthcStatus::Other(s) => s,
        }
    }
}

impl From<String> for AuthcStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "authcSuccess" => AuthcStatus::Success,
            "authcFailed" => AuthcStatus::Failed,
            _ => AuthcStatus::Other(s),
        }
    }
}

impl From<AuthcStatus> for String {
    fn from(status: AuthcStatus) -> String {
        status.as_str().to_string()
    }
}

impl fmt::Display for AuthcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical authorization (authz) state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthzStatus {
    Success,
    Failed,
    Other(String),
}

impl AuthzStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AuthzStatus::Success => "authorizationSuccess",
            AuthzStatus::Failed => "authorizationFailed",
            AuthzStatus::Other(s) => s,
        }
    }
}

impl From<String> for AuthzStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "authorizationSuccess" => AuthzStatus::Success,
            "authorizationFailed" => AuthzStatus::Failed,
            _ => AuthzStatus::Other(s),
        }
    }
}

impl From<AuthzStatus> for String {
    fn from(status: AuthzStatus) -> String {
        status.as_str().to_string()
    }
}

impl fmt::Display for AuthzStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One authenticated or authenticating client on a device port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortNac {
    pub device_id: DeviceId,
    /// Platform port id; 0 when the interface could not be resolved.
    pub port_id: u64,
    pub mac_address: String,
    /// Session index from the agent's table, stable per device.
    pub auth_id: String,
    pub domain: String,
    pub username: String,
    pub ip_address: String,
    pub host_mode: String,
    pub authz_status: AuthzStatus,
    pub authz_by: String,
    pub timeout: u64,
    pub vlan: String,
    pub authc_status: AuthcStatus,
    pub method: String,
    pub time_elapsed: u64,
}

impl PortNac {
    /// False when the port cache could not map the session's interface.
    pub fn is_port_resolved(&self) -> bool {
        self.port_id != 0
    }
}

/// Sessions of one poll keyed by client MAC address, in table order.
///
/// Inserting a MAC that is already present replaces the earlier session in
/// place, so the collection holds exactly one session per address and the
/// last row processed wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NacSessions {
    sessions: Vec<PortNac>,
    by_mac: HashMap<String, usize>,
}

impl NacSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a session, returning the one it replaced, if any.
    pub fn insert(&mut self, session: PortNac) -> Option<PortNac> {
        match self.by_mac.get(&session.mac_address) {
            Some(&pos) => Some(std::mem::replace(&mut self.sessions[pos], session)),
            None => {
                self.by_mac
                    .insert(session.mac_address.clone(), self.sessions.len());
                self.sessions.push(session);
                None
            }
        }
    }

    pub fn get(&self, mac_address: &str) -> Option<&PortNac> {
        self.by_mac.get(mac_address).map(|&pos| &self.sessions[pos])
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortNac> {
        self.sessions.iter()
    }

    pub fn mac_addresses(&self) -> impl Iterator<Item = &str> {
        self.sessions.iter().map(|s| s.mac_address.as_str())
    }
}

impl IntoIterator for NacSessions {
    type Item = PortNac;
    type IntoIter = std::vec::IntoIter<PortNac>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.into_iter()
    }
}

impl Serialize for NacSessions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sessions.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(mac: &str, auth_id: &str) -> PortNac {
        PortNac {
            device_id: DeviceId::new(1),
            port_id: 10,
            mac_address: mac.to_string(),
            auth_id: auth_id.to_string(),
            domain: String::new(),
            username: String::new(),
            ip_address: String::new(),
            host_mode: String::new(),
            authz_status: AuthzStatus::Success,
            authz_by: UNKNOWN.to_string(),
            timeout: 0,
            vlan: UNKNOWN.to_string(),
            authc_status: AuthcStatus::Success,
            method: String::new(),
            time_elapsed: 0,
        }
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(AuthcStatus::Success.as_str(), "authcSuccess");
        assert_eq!(AuthcStatus::Failed.as_str(), "authcFailed");
        assert_eq!(AuthzStatus::Success.as_str(), "authorizationSuccess");
        assert_eq!(AuthzStatus::Failed.as_str(), "authorizationFailed");
        assert_eq!(AuthcStatus::Other("pending".into()).as_str(), "pending");
    }

    #[test]
    fn test_status_string_round_trip() {
        assert_eq!(AuthcStatus::from("authcFailed".to_string()), AuthcStatus::Failed);
        assert_eq!(
            AuthzStatus::from("held".to_string()),
            AuthzStatus::Other("held".to_string())
        );
    }

    #[test]
    fn test_sessions_last_write_wins_in_place() {
        let mut sessions = NacSessions::new();
        assert!(sessions.insert(session("00:11:22:33:44:55", "1")).is_none());
        assert!(sessions.insert(session("00:11:22:33:44:66", "2")).is_none());
        let replaced = sessions.insert(session("00:11:22:33:44:55", "3"));

        assert_eq!(replaced.map(|s| s.auth_id), Some("1".to_string()));
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.get("00:11:22:33:44:55").unwrap().auth_id, "3");
        assert_eq!(
            sessions.mac_addresses().collect::<Vec<_>>(),
            vec!["00:11:22:33:44:55", "00:11:22:33:44:66"]
        );
    }

    #[test]
    fn test_port_resolved() {
        let mut s = session("00:11:22:33:44:55", "1");
        assert!(s.is_port_resolved());
        s.port_id = 0;
        assert!(!s.is_port_resolved());
    }

    #[test]
    fn test_serialize_flat_record() {
        let json = serde_json::to_value(session("00:11:22:33:44:55", "7")).unwrap();
        assert_eq!(json["authc_status"], "authcSuccess");
        assert_eq!(json["authz_status"], "authorizationSuccess");
        assert_eq!(json["vlan"], "unknown");
        assert_eq!(json["device_id"], 1);
    }
}
