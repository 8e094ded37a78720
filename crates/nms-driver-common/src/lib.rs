//! Common infrastructure for per-vendor SNMP device drivers.
//!
//! This crate provides the pieces every vendor driver builds on:
//!
//! - [`snmp`]: the protocol query facade ([`SnmpQuery`]) and port cache
//!   collaborator ([`PortCache`]) drivers talk to
//! - [`driver`]: [`DeviceDriver`] and the capability traits
//!   ([`ProcessorDiscovery`], [`ProcessorPolling`], [`NacPolling`])
//! - [`cpu_load`]: the shared CPU-load table driver vendor drivers delegate to
//! - [`processor`] and [`nac`]: the records drivers hand to the store
//! - [`config`], [`logging`]: poller process configuration and tracing setup
//! - [`snapshot`]: a replay facade serving recorded agent answers
//! - [`error`]: error types for driver operations
//!
//! # Architecture
//!
//! A poll cycle for one device looks like this:
//!
//! 1. The scheduler picks the driver for the device's OS
//! 2. It asks the driver for the capability it wants to run
//! 3. The driver issues scalar gets and walks through the facade
//! 4. Decoded values are normalized into records and returned
//! 5. The store persists the records; errors abort that device's cycle
//!
//! # Example
//!
//! ```ignore
//! use nms_driver_common::{DeviceDriver, DriverResult};
//!
//! async fn poll(driver: &dyn DeviceDriver, device: &Device) -> DriverResult<()> {
//!     if let Some(nac) = driver.nac_polling() {
//!         let sessions = nac.poll_nac(device).await?;
//!         store.replace_nac(device, sessions).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod cpu_load;
pub mod driver;
pub mod error;
pub mod logging;
pub mod nac;
pub mod processor;
pub mod snapshot;
pub mod snmp;

// Re-export commonly used items at crate root
pub use config::{
    LogFormat, LoggingConfig, ModulesConfig, PollerConfig, SnmpConfig, DEFAULT_CONFIG_PATH,
};
pub use cpu_load::CpuLoadTable;
pub use driver::{Capability, DeviceDriver, NacPolling, ProcessorDiscovery, ProcessorPolling};
pub use error::{DriverError, DriverResult};
pub use logging::init_logging;
pub use nac::{AuthcStatus, AuthzStatus, NacSessions, PortNac, UNKNOWN};
pub use processor::{
    parse_usage, Processor, ProcessorId, ProcessorReadings, ProcessorType, StoredProcessor,
};
pub use snapshot::{Snapshot, SnapshotQuery, SnapshotRow};
pub use snmp::{
    FieldValue, FieldValues, PortCache, QueryOptions, SnmpQuery, SnmpTable,
    TableRow,
};
