//! PowerConnect - Dell PowerConnect / DNOS device driver

use std::sync::Arc;

use nms_driver_common::{
    CpuLoadTable, DeviceDriver, DriverResult, NacPolling, PortCache, ProcessorDiscovery,
    ProcessorPolling, QueryOptions, SnmpQuery,
};
use nms_types::Device;

use crate::tables::{AUTH_MGR_MIB, DELL_MIB_DIR, FASTPATH_CPU_LOAD_OID};
use crate::variant::PowerConnectVariant;

/// OS name the platform files these devices under
pub const OS_NAME: &str = "powerconnect";

/// Driver for Dell PowerConnect switches
///
/// Capabilities:
/// 1. Processor discovery: 55xx scalar, or the CPU load table for DNOS and
///    FASTPATH families
/// 2. Processor polling: dispatched per stored record type
/// 3. NAC polling: authentication manager client sessions
#[derive(Clone)]
pub struct PowerConnect {
    pub(crate) snmp: Arc<dyn SnmpQuery>,
    pub(crate) ports: Arc<dyn PortCache>,
    mib_dir: String,
}

impl PowerConnect {
    /// Creates a driver using the stock Dell MIB directory
    pub fn new(snmp: Arc<dyn SnmpQuery>, ports: Arc<dyn PortCache>) -> Self {
        Self {
            snmp,
            ports,
            mib_dir: DELL_MIB_DIR.to_string(),
        }
    }

    /// Overrides the MIB directory passed with authentication manager queries
    pub fn with_mib_dir(mut self, mib_dir: impl Into<String>) -> Self {
        self.mib_dir = mib_dir.into();
        self
    }

    pub fn mib_dir(&self) -> &str {
        &self.mib_dir
    }

    /// Options for every authentication manager query
    pub fn auth_mgr_options(&self) -> QueryOptions {
        QueryOptions::new()
            .mibs([AUTH_MGR_MIB])
            .mib_dir(self.mib_dir.as_str())
            .hide_mib()
            .enum_strings()
    }

    /// Base CPU load driver for a device's family.
    ///
    /// The 55xx family has no load table; its non-scalar records are polled
    /// by stored OID, so any root serves.
    pub(crate) fn cpu_load_table(&self, device: &Device) -> DriverResult<CpuLoadTable> {
        let root = PowerConnectVariant::classify(&device.sys_object_id)
            .cpu_load_root()
            .unwrap_or(FASTPATH_CPU_LOAD_OID);
        Ok(CpuLoadTable::new(self.snmp.clone(), root.parse()?))
    }
}

impl std::fmt::Debug for PowerConnect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerConnect")
            .field("mib_dir", &self.mib_dir)
            .finish_non_exhaustive()
    }
}

impl DeviceDriver for PowerConnect {
    fn os_name(&self) -> &str {
        OS_NAME
    }

    fn processor_discovery(&self) -> Option<&dyn ProcessorDiscovery> {
        Some(self)
    }

    fn processor_polling(&self) -> Option<&dyn ProcessorPolling> {
        Some(self)
    }

    fn nac_polling(&self) -> Option<&dyn NacPolling> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nms_driver_common::Capability;
    use nms_driver_test::powerconnect_fixtures::*;
    use pretty_assertions::assert_eq;

    fn driver() -> PowerConnect {
        let query = dnos_switch(1).query();
        PowerConnect::new(query.clone(), query)
    }

    #[test]
    fn test_all_capabilities() {
        let driver = driver();
        assert_eq!(driver.os_name(), "powerconnect");
        assert!(driver.supports(Capability::ProcessorDiscovery));
        assert!(driver.supports(Capability::ProcessorPolling));
        assert!(driver.supports(Capability::NacPolling));
    }

    #[test]
    fn test_auth_mgr_options() {
        let opts = driver().auth_mgr_options();
        assert_eq!(opts.mibs, vec!["DNOS-AUTHENTICATION-MANAGER-MIB".to_string()]);
        assert_eq!(opts.mib_dir.as_deref(), Some("dell"));
        assert!(opts.hide_mib);
        assert!(opts.enum_strings);
    }

    #[test]
    fn test_mib_dir_override() {
        let driver = driver().with_mib_dir("/opt/mibs/dell");
        assert_eq!(driver.mib_dir(), "/opt/mibs/dell");
        assert_eq!(
            driver.auth_mgr_options().mib_dir.as_deref(),
            Some("/opt/mibs/dell")
        );
    }

    #[test]
    fn test_cpu_load_root_follows_family() {
        let driver = driver();
        let dnos = nms_types::Device::new(1, N2048_SYS_OBJECT_ID);
        let other = nms_types::Device::new(1, PC6248_SYS_OBJECT_ID);
        let nv = nms_types::Device::new(1, PC5524_SYS_OBJECT_ID);

        assert_eq!(driver.cpu_load_table(&dnos).unwrap().root().as_str(), DNOS_CPU_LOAD);
        assert_eq!(driver.cpu_load_table(&other).unwrap().root().as_str(), FASTPATH_CPU_LOAD);
        assert_eq!(driver.cpu_load_table(&nv).unwrap().root().as_str(), FASTPATH_CPU_LOAD);
    }
}
