//! Typed views of the DNOS authentication manager tables

use std::collections::HashMap;

use nms_driver_common::{AuthcStatus, AuthzStatus, SnmpTable, TableRow};
use nms_types::MacAddress;

use crate::tables::fields;

/// Global authentication manager admin mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminMode {
    Enable,
    Disable,
    Other(String),
}

impl AdminMode {
    /// Parses the agent's answer; a missing value counts as disabled
    pub fn from_value(value: Option<&str>) -> Self {
        value.map_or(AdminMode::Disable, AdminMode::from)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, AdminMode::Enable)
    }
}

impl From<&str> for AdminMode {
    fn from(s: &str) -> Self {
        match s {
            "enable" => AdminMode::Enable,
            "disable" => AdminMode::Disable,
            other => AdminMode::Other(other.to_string()),
        }
    }
}

/// Maps the agent's authentication state to the canonical status.
///
/// `success` and `failed` are translated, anything else passes through.
pub fn authc_status(state: &str) -> AuthcStatus {
    match state {
        "success" => AuthcStatus::Success,
        "failed" => AuthcStatus::Failed,
        other => AuthcStatus::Other(other.to_string()),
    }
}

/// Maps the agent's authorization status to the canonical status.
///
/// `authorized` and `unauthorized` are translated, anything else passes
/// through.
pub fn authz_status(status: &str) -> AuthzStatus {
    match status {
        "authorized" => AuthzStatus::Success,
        "unauthorized" => AuthzStatus::Failed,
        other => AuthzStatus::Other(other.to_string()),
    }
}

/// Canonical key for a client MAC.
///
/// Values that parse as a MAC are rendered lowercase colon separated so the
/// same client reported in different notations collapses to one session.
/// Anything else is kept as reported, trimmed.
pub fn normalize_mac(raw: &str) -> String {
    match raw.parse::<MacAddress>() {
        Ok(mac) => mac.to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// One row of `agentAuthMgrClientStatusTable`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthMgrClientRow {
    /// Session index, the row's instance suffix
    pub auth_index: String,
    pub mac_address: Option<String>,
    pub interface: Option<String>,
    pub user_name: Option<String>,
    pub auth_state: Option<String>,
    pub auth_status: Option<String>,
    pub vlan_assigned: Option<String>,
    pub vlan_assigned_reason: Option<String>,
    pub session_timeout: Option<String>,
    pub session_time: Option<String>,
    pub auth_method: Option<String>,
}

impl AuthMgrClientRow {
    pub fn from_row(row: &TableRow) -> Self {
        let field = |name: &str| row.get(name).map(str::to_string);

        Self {
            auth_index: row.index.clone(),
            mac_address: field(fields::CLIENT_MAC_ADDRESS),
            interface: field(fields::INTERFACE),
            user_name: field(fields::CLIENT_USER_NAME),
            auth_state: field(fields::CLIENT_AUTH_STATE),
            auth_status: field(fields::CLIENT_AUTH_STATUS),
            vlan_assigned: field(fields::CLIENT_VLAN_ASSIGNED),
            vlan_assigned_reason: field(fields::CLIENT_VLAN_ASSIGNED_REASON),
            session_timeout: field(fields::CLIENT_SESSION_TIMEOUT),
            session_time: field(fields::CLIENT_SESSION_TIME),
            auth_method: field(fields::CLIENT_AUTH_METHOD),
        }
    }

    /// Interface index the client is attached to, if numeric
    pub fn if_index(&self) -> Option<u32> {
        self.interface.as_deref()?.trim().parse().ok()
    }
}

/// Per-interface host modes from `agentAuthMgrPortHostMode`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostModes {
    by_interface: HashMap<String, String>,
}

impl HostModes {
    pub fn from_table(table: &SnmpTable) -> Self {
        Self {
            by_interface: table.values_by_index(fields::PORT_HOST_MODE),
        }
    }

    /// Host mode of an interface, empty when the agent did not report one
    pub fn for_interface(&self, interface: Option<&str>) -> &str {
        interface
            .and_then(|i| self.by_interface.get(i.trim()))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.by_interface.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_interface.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_admin_mode() {
        assert!(AdminMode::from_value(Some("enable")).is_enabled());
        assert_eq!(AdminMode::from_value(Some("disable")), AdminMode::Disable);
        assert_eq!(
            AdminMode::from_value(Some("1")),
            AdminMode::Other("1".to_string())
        );
        assert!(!AdminMode::from_value(Some("1")).is_enabled());
        assert!(!AdminMode::from_value(Some(" enable ")).is_enabled());
        assert_eq!(AdminMode::from_value(None), AdminMode::Disable);
    }

    #[test]
    fn test_authc_remap() {
        assert_eq!(authc_status("success"), AuthcStatus::Success);
        assert_eq!(authc_status("failed"), AuthcStatus::Failed);
        assert_eq!(
            authc_status("authenticating"),
            AuthcStatus::Other("authenticating".to_string())
        );
        assert_eq!(authc_status("authenticating").as_str(), "authenticating");
    }

    #[test]
    fn test_authz_remap() {
        assert_eq!(authz_status("authorized"), AuthzStatus::Success);
        assert_eq!(authz_status("unauthorized"), AuthzStatus::Failed);
        assert_eq!(authz_status("").as_str(), "");
        assert_eq!(
            authz_status("pending"),
            AuthzStatus::Other("pending".to_string())
        );
        assert_eq!(authz_status("pending").as_str(), "pending");
    }

    #[test]
    fn test_normalize_mac() {
        assert_eq!(normalize_mac("0:1A:2b:3:4:5"), "00:1a:2b:03:04:05");
        assert_eq!(normalize_mac("00-1A-2B-03-04-05"), "00:1a:2b:03:04:05");
        assert_eq!(normalize_mac(" not-a-mac "), "not-a-mac");
    }

    #[test]
    fn test_client_row_from_table_row() {
        let row = TableRow::new("12")
            .with_field(fields::CLIENT_MAC_ADDRESS, "0:11:22:33:44:55")
            .with_field(fields::INTERFACE, "7")
            .with_field(fields::CLIENT_AUTH_STATE, "success");

        let client = AuthMgrClientRow::from_row(&row);
        assert_eq!(client.auth_index, "12");
        assert_eq!(client.if_index(), Some(7));
        assert_eq!(client.auth_state.as_deref(), Some("success"));
        assert_eq!(client.vlan_assigned, None);
    }

    #[test]
    fn test_non_numeric_interface() {
        let row = TableRow::new("1").with_field(fields::INTERFACE, "Gi1/0/7");
        assert_eq!(AuthMgrClientRow::from_row(&row).if_index(), None);
    }

    #[test]
    fn test_host_modes() {
        let table: SnmpTable = vec![
            TableRow::new("7").with_field(fields::PORT_HOST_MODE, "multiHost"),
            TableRow::new("8").with_field(fields::PORT_HOST_MODE, "singleHost"),
        ]
        .into_iter()
        .collect();

        let modes = HostModes::from_table(&table);
        assert_eq!(modes.len(), 2);
        assert_eq!(modes.for_interface(Some("7")), "multiHost");
        assert_eq!(modes.for_interface(Some("9")), "");
        assert_eq!(modes.for_interface(None), "");
    }
}
