//! Device identity as seen by a driver.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inventory identifier of a monitored device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u64);

impl DeviceId {
    pub const fn new(id: u64) -> Self {
        DeviceId(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(DeviceId)
            .map_err(|_| ParseError::InvalidDeviceId(s.to_string()))
    }
}

impl From<u64> for DeviceId {
    fn from(id: u64) -> Self {
        DeviceId(id)
    }
}

/// The part of a device's inventory record that drivers consume.
///
/// Owned by the inventory; drivers only ever borrow it for the length of a
/// discovery or poll cycle. `sys_object_id` is kept as the raw string the
/// agent reported, since variant selection is a plain prefix match and an
/// unexpected value must still reach the default strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: DeviceId,
    #[serde(default)]
    pub hostname: String,
    pub sys_object_id: String,
}

impl Device {
    pub fn new(device_id: impl Into<DeviceId>, sys_object_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            hostname: String::new(),
            sys_object_id: sys_object_id.into(),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }
}
