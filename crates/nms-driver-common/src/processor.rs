//! Processor records exchanged between drivers and the record store.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use nms_types::{DeviceId, Oid};

/// Store-assigned processor identifier.
pub type ProcessorId = u64;

/// Result of a processor poll: one entry per polled record.
///
/// `None` means the agent returned nothing usable for that record this cycle.
pub type ProcessorReadings = BTreeMap<ProcessorId, Option<u8>>;

/// Default description of a discovered processor.
pub const DEFAULT_DESCRIPTION: &str = "Processor";

/// Tag naming the strategy that discovered a processor and must re-poll it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessorType {
    /// A single vendor scalar holding the CPU utilization.
    ScalarCpu,
    /// A row of a CPU-load table.
    TableCpu,
    /// Any tag this crate does not know; polled through the table path.
    Other(String),
}

impl ProcessorType {
    pub fn as_str(&self) -> &str {
        match self {
            ProcessorType::ScalarCpu => "scalar-cpu",
            ProcessorType::TableCpu => "table-cpu",
            ProcessorType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ProcessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessorType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "scalar-cpu" => ProcessorType::ScalarCpu,
            "table-cpu" => ProcessorType::TableCpu,
            other => ProcessorType::Other(other.to_string()),
        })
    }
}

impl From<String> for ProcessorType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<ProcessorType> for String {
    fn from(t: ProcessorType) -> String {
        t.as_str().to_string()
    }
}

/// A processor found during discovery, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processor {
    pub device_id: DeviceId,
    pub processor_type: ProcessorType,
    pub oid: Oid,
    pub index: u32,
    pub description: String,
    pub precision: u32,
    /// Always 0 at discovery; the first poll fills it in.
    pub usage: u8,
}

impl Processor {
    /// Creates a discovery record with the default description and precision.
    pub fn discover(processor_type: ProcessorType, device_id: DeviceId, oid: Oid, index: u32) -> Self {
        Self {
            device_id,
            processor_type,
            oid,
            index,
            description: DEFAULT_DESCRIPTION.to_string(),
            precision: 1,
            usage: 0,
        }
    }

    /// Pairs this record with the id the store assigned to it.
    pub fn stored(&self, processor_id: ProcessorId) -> StoredProcessor {
        StoredProcessor {
            processor_id,
            processor_type: self.processor_type.clone(),
            oid: self.oid.clone(),
        }
    }
}

/// A persisted processor handed back to a driver for polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProcessor {
    pub processor_id: ProcessorId,
    pub processor_type: ProcessorType,
    pub oid: Oid,
}

/// First `NN` or `NN.NN` followed by a percent sign.
static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*%").expect("Invalid regex pattern"));

/// Parses a CPU utilization value as returned by an agent.
///
/// Accepts a bare number (`"37"`, `"12.5"`) or a VxWorks style load string
/// such as `"5 Secs ( 12.3456%)   60 Secs ( 9.1%)  300 Secs ( 8.0%)"`, in
/// which case the first (shortest interval) percentage wins. The result is
/// rounded and clamped to 0-100.
pub fn parse_usage(raw: &str) -> Option<u8> {
    let trimmed = raw.trim().trim_matches('"').trim();

    let value = match trimmed.parse::<f64>() {
        Ok(v) => v,
        Err(_) => PERCENT_RE
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())?,
    };

    if !value.is_finite() {
        return None;
    }

    Some(value.round().clamp(0.0, 100.0) as u8)
}
