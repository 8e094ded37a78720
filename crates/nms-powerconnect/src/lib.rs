//! nms-powerconnect - Dell PowerConnect device driver
//!
//! Discovers and polls processors on PowerConnect and DNOS switches and
//! collects network access control sessions from the DNOS authentication
//! manager. The model family, classified from the sysObjectID, decides how
//! processors are found:
//!
//! - 55xx (Radlan firmware): one CPU utilization scalar
//! - DNOS and FASTPATH: a CPU load string table under a family specific root

mod decode;
mod nac;
mod powerconnect;
mod processors;
mod tables;
mod types;
mod variant;

pub use decode::decode_hex_string;
pub use powerconnect::{PowerConnect, OS_NAME};
pub use tables::*;
pub use types::*;
pub use variant::PowerConnectVariant;
