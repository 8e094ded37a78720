//! Error types for driver operations.
//!
//! Only genuine failures are errors. A disabled feature, an empty table or a
//! missing optional column are normal outcomes and never surface here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur while discovering or polling a device.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The SNMP facade failed (timeout, transport error, malformed response).
    #[error("SNMP query failed for '{target}' on device {device}: {message}")]
    Snmp {
        /// Device hostname or id.
        device: String,
        /// OID or table that was queried.
        target: String,
        /// Error message.
        message: String,
    },

    /// The port cache collaborator failed.
    #[error("Port cache lookup failed for ifIndex {if_index}: {message}")]
    PortCache {
        /// Interface index that was looked up.
        if_index: u32,
        /// Error message.
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// Reading a configuration or snapshot file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration or snapshot file could not be decoded.
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// A value could not be parsed into a network type.
    #[error(transparent)]
    Parse(#[from] nms_types::ParseError),

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl DriverError {
    /// Creates an SNMP query error.
    pub fn snmp(
        device: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Snmp {
            device: device.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    /// Creates a port cache error.
    pub fn port_cache(if_index: u32, message: impl Into<String>) -> Self {
        Self::PortCache {
            if_index,
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the failure is transient and the device should simply
    /// be tried again on its next scheduled cycle.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DriverError::Snmp { .. } | DriverError::PortCache { .. }
        )
    }
}
