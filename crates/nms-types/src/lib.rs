//! Common network monitoring types shared by the device drivers.
//!
//! This crate provides type-safe representations of the primitives that
//! flow between the SNMP facade, the vendor drivers and the record store:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`Oid`]: numeric SNMP object identifiers
//! - [`Device`]: the slice of device inventory a driver needs

mod device;
mod mac;
mod oid;

pub use device::{Device, DeviceId};
pub use mac::MacAddress;
pub use oid::Oid;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid object identifier: {0}")]
    InvalidOid(String),

    #[error("invalid device id: {0}")]
    InvalidDeviceId(String),
}
