//! NAC session polling from the DNOS authentication manager

use async_trait::async_trait;
use tracing::{debug, instrument, trace, warn};

use nms_driver_common::{DriverResult, NacPolling, NacSessions, PortNac, UNKNOWN};
use nms_types::Device;

use crate::decode::decode_hex_string;
use crate::powerconnect::PowerConnect;
use crate::tables::{AUTH_MGR_ADMIN_MODE, AUTH_MGR_CLIENT_STATUS_TABLE, AUTH_MGR_PORT_HOST_MODE};
use crate::types::{
    authc_status, authz_status, normalize_mac, AdminMode, AuthMgrClientRow, HostModes,
};

/// Parses a counter column, 0 when absent or not numeric
fn parse_seconds(value: Option<&str>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

impl PowerConnect {
    /// Resolves the platform port id of a client's interface, 0 if unknown
    async fn resolve_port(&self, device: &Device, client: &AuthMgrClientRow) -> DriverResult<u64> {
        let Some(if_index) = client.if_index() else {
            debug!(
                auth_id = %client.auth_index,
                interface = ?client.interface,
                "Client interface is not an ifIndex"
            );
            return Ok(0);
        };

        match self.ports.port_id_from_if_index(if_index, device).await? {
            Some(port_id) => Ok(port_id),
            None => {
                debug!(if_index, "No port known for ifIndex");
                Ok(0)
            }
        }
    }

    /// Builds the session record for one client row
    async fn build_session(
        &self,
        device: &Device,
        client: AuthMgrClientRow,
        mac_address: String,
        host_modes: &HostModes,
    ) -> DriverResult<PortNac> {
        let port_id = self.resolve_port(device, &client).await?;

        Ok(PortNac {
            device_id: device.device_id,
            port_id,
            mac_address,
            auth_id: client.auth_index.clone(),
            domain: String::new(),
            username: client
                .user_name
                .as_deref()
                .map(decode_hex_string)
                .unwrap_or_default(),
            ip_address: String::new(),
            host_mode: host_modes
                .for_interface(client.interface.as_deref())
                .to_string(),
            authz_status: authz_status(client.auth_status.as_deref().unwrap_or_default()),
            authz_by: client
                .vlan_assigned_reason
                .unwrap_or_else(|| UNKNOWN.to_string()),
            timeout: parse_seconds(client.session_timeout.as_deref()),
            vlan: client
                .vlan_assigned
                .unwrap_or_else(|| UNKNOWN.to_string()),
            authc_status: authc_status(client.auth_state.as_deref().unwrap_or_default()),
            method: client.auth_method.unwrap_or_default(),
            time_elapsed: parse_seconds(client.session_time.as_deref()),
        })
    }
}

#[async_trait]
impl NacPolling for PowerConnect {
    #[instrument(skip(self, device), fields(device = %device.device_id))]
    async fn poll_nac(&self, device: &Device) -> DriverResult<NacSessions> {
        let options = self.auth_mgr_options();
        let mut sessions = NacSessions::new();

        let admin_mode = self.snmp.get(device, AUTH_MGR_ADMIN_MODE, &options).await?;
        if !AdminMode::from_value(admin_mode.as_deref()).is_enabled() {
            trace!(admin_mode = ?admin_mode, "AuthMgr not enabled");
            return Ok(sessions);
        }

        let table = self
            .snmp
            .walk(device, AUTH_MGR_CLIENT_STATUS_TABLE, &options)
            .await?;
        if table.is_empty() {
            trace!("Client status table is empty, not processing NAC entries");
            return Ok(sessions);
        }

        let host_modes = HostModes::from_table(
            &self
                .snmp
                .walk(device, AUTH_MGR_PORT_HOST_MODE, &options)
                .await?,
        );

        for row in table.iter() {
            let client = AuthMgrClientRow::from_row(row);
            let Some(mac_address) = client.mac_address.as_deref().map(normalize_mac) else {
                warn!(auth_id = %client.auth_index, "Skipping client row without a MAC address");
                continue;
            };

            let session = self
                .build_session(device, client, mac_address, &host_modes)
                .await?;
            if let Some(replaced) = sessions.insert(session) {
                debug!(
                    mac = %replaced.mac_address,
                    auth_id = %replaced.auth_id,
                    "Duplicate client MAC, keeping the later row"
                );
            }
        }

        debug!("Polled {} NAC session(s)", sessions.len());
        Ok(sessions)
    }
}
