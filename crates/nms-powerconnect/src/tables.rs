//! OID, MIB and column name constants for PowerConnect agents

/// Vendor MIB directory holding the DNOS modules
pub const DELL_MIB_DIR: &str = "dell";

/// Authentication manager MIB module
pub const AUTH_MGR_MIB: &str = "DNOS-AUTHENTICATION-MANAGER-MIB";

/// Global authentication manager admin mode scalar
pub const AUTH_MGR_ADMIN_MODE: &str = "agentAuthMgrAdminMode.0";

/// Per-client session status table
pub const AUTH_MGR_CLIENT_STATUS_TABLE: &str = "agentAuthMgrClientStatusTable";

/// Per-port host mode column
pub const AUTH_MGR_PORT_HOST_MODE: &str = "agentAuthMgrPortHostMode";

/// Radlan CPU utilization scalar used by the 55xx family
pub const RADLAN_CPU_UTIL_OID: &str = ".1.3.6.1.4.1.89.1.7.0";

/// CPU load string on DNOS based switches
pub const DNOS_CPU_LOAD_OID: &str = ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9.0";

/// CPU load string on older FASTPATH based switches
pub const FASTPATH_CPU_LOAD_OID: &str = ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.4.0";

/// Column names of the client status table
pub mod fields {
    pub const CLIENT_MAC_ADDRESS: &str = "agentAuthMgrClientMacAddress";

    /// ifIndex of the port the client is attached to
    pub const INTERFACE: &str = "agentAuthMgrInterface";

    /// Hex encoded, NUL terminated
    pub const CLIENT_USER_NAME: &str = "agentAuthMgrClientUserName";

    pub const CLIENT_AUTH_STATE: &str = "agentAuthMgrClientAuthState";

    /// Note the lowercase "s"; that is how the MIB spells it
    pub const CLIENT_AUTH_STATUS: &str = "agentAuthMgrClientAuthstatus";

    pub const CLIENT_VLAN_ASSIGNED: &str = "agentAuthMgrClientVlanAssigned";

    pub const CLIENT_VLAN_ASSIGNED_REASON: &str = "agentAuthMgrClientAuthVlanAssignedReason";

    pub const CLIENT_SESSION_TIMEOUT: &str = "agentAuthMgrClientSessionTimeout";

    pub const CLIENT_SESSION_TIME: &str = "agentAuthMgrClientSessionTime";

    pub const CLIENT_AUTH_METHOD: &str = "agentAuthMgrClientAuthMethod";

    pub const PORT_HOST_MODE: &str = "agentAuthMgrPortHostMode";
}
