//! Device driver trait and its capability traits.
//!
//! A driver advertises what it can do by handing out capability objects.
//! The scheduler asks for the capability it needs and skips devices whose
//! driver does not provide it.

use async_trait::async_trait;

use nms_types::Device;

use crate::error::DriverResult;
use crate::nac::NacSessions;
use crate::processor::{Processor, ProcessorReadings, StoredProcessor};

/// Discovers the processors present on a device.
#[async_trait]
pub trait ProcessorDiscovery: Send + Sync {
    async fn discover_processors(&self, device: &Device) -> DriverResult<Vec<Processor>>;
}

/// Polls the current utilization of previously discovered processors.
///
/// Every input record must receive an entry in the returned readings, even
/// if that entry is `None`.
#[async_trait]
pub trait ProcessorPolling: Send + Sync {
    async fn poll_processors(
        &self,
        device: &Device,
        processors: &[StoredProcessor],
    ) -> DriverResult<ProcessorReadings>;
}

/// Polls the network access control session table.
#[async_trait]
pub trait NacPolling: Send + Sync {
    async fn poll_nac(&self, device: &Device) -> DriverResult<NacSessions>;
}

/// Modules a driver can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ProcessorDiscovery,
    ProcessorPolling,
    NacPolling,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ProcessorDiscovery => "processor-discovery",
            Capability::ProcessorPolling => "processor-polling",
            Capability::NacPolling => "nac-polling",
        }
    }
}

/// Base trait for per-vendor device drivers.
///
/// All capability accessors default to `None`; a driver overrides the ones
/// it implements.
///
/// # Example
///
/// ```ignore
/// struct MyDriver { /* ... */ }
///
/// impl DeviceDriver for MyDriver {
///     fn os_name(&self) -> &str { "myos" }
///
///     fn processor_discovery(&self) -> Option<&dyn ProcessorDiscovery> {
///         Some(self)
///     }
/// }
/// ```
pub trait DeviceDriver: Send + Sync {
    /// Short OS name used for logging (e.g. "powerconnect").
    fn os_name(&self) -> &str;

    fn processor_discovery(&self) -> Option<&dyn ProcessorDiscovery> {
        None
    }

    fn processor_polling(&self) -> Option<&dyn ProcessorPolling> {
        None
    }

    fn nac_polling(&self) -> Option<&dyn NacPolling> {
        None
    }

    /// Returns true if the driver provides `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::ProcessorDiscovery => self.processor_discovery().is_some(),
            Capability::ProcessorPolling => self.processor_polling().is_some(),
            Capability::NacPolling => self.nac_polling().is_some(),
        }
    }
}
