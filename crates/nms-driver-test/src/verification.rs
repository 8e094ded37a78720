//! Verification helpers for testing device drivers
//!
//! Provides assertion helpers to verify NAC sessions and processor readings

use serde_json::Value;
use thiserror::Error;

use nms_driver_common::{NacSessions, ProcessorId, ProcessorReadings};

/// Verification error types
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Expected session for MAC '{mac}' not found")]
    SessionNotFound { mac: String },

    #[error("Expected field '{field}' not found in session '{mac}'")]
    FieldNotFound { mac: String, field: String },

    #[error("Value mismatch for {mac}:{field}: expected '{expected}', got '{actual}'")]
    ValueMismatch {
        mac: String,
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Expected {expected} {what}, found {actual}")]
    CountMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Reading mismatch for processor {processor_id}: expected {expected:?}, got {actual:?}")]
    ReadingMismatch {
        processor_id: ProcessorId,
        expected: Option<u8>,
        actual: Option<Option<u8>>,
    },

    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// NAC session verification helper
///
/// Fields are compared on the serialized record, so expectations use the
/// same names and spellings the store receives.
pub struct SessionVerifier<'a> {
    sessions: &'a NacSessions,
}

impl<'a> SessionVerifier<'a> {
    pub fn new(sessions: &'a NacSessions) -> Self {
        Self { sessions }
    }

    /// Verify the number of sessions
    pub fn assert_count(&self, expected: usize) -> VerifyResult<()> {
        let actual = self.sessions.len();
        if actual != expected {
            return Err(VerificationError::CountMismatch {
                what: "sessions".to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Verify that a session exists for a MAC
    pub fn assert_session_exists(&self, mac: &str) -> VerifyResult<()> {
        self.record(mac).map(|_| ())
    }

    /// Verify that a session field has a specific value
    pub fn assert_field_value(&self, mac: &str, field: &str, expected: &str) -> VerifyResult<()> {
        let record = self.record(mac)?;
        let actual = match record.get(field) {
            None => {
                return Err(VerificationError::FieldNotFound {
                    mac: mac.to_string(),
                    field: field.to_string(),
                })
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        if actual != expected {
            return Err(VerificationError::ValueMismatch {
                mac: mac.to_string(),
                field: field.to_string(),
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(())
    }

    /// Verify that all fields match expected values
    pub fn assert_all_fields(&self, mac: &str, expected: &[(&str, &str)]) -> VerifyResult<()> {
        for (field, value) in expected {
            self.assert_field_value(mac, field, value)?;
        }
        Ok(())
    }

    fn record(&self, mac: &str) -> VerifyResult<Value> {
        let session = self
            .sessions
            .get(mac)
            .ok_or_else(|| VerificationError::SessionNotFound {
                mac: mac.to_string(),
            })?;
        Ok(serde_json::to_value(session)?)
    }
}

/// Verify processor readings, one expectation per processor
pub fn assert_readings(
    readings: &ProcessorReadings,
    expected: &[(ProcessorId, Option<u8>)],
) -> VerifyResult<()> {
    if readings.len() != expected.len() {
        return Err(VerificationError::CountMismatch {
            what: "readings".to_string(),
            expected: expected.len(),
            actual: readings.len(),
        });
    }

    for &(processor_id, value) in expected {
        let actual = readings.get(&processor_id).copied();
        if actual != Some(value) {
            return Err(VerificationError::ReadingMismatch {
                processor_id,
                expected: value,
                actual,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nms_driver_common::{AuthcStatus, AuthzStatus, PortNac, UNKNOWN};
    use nms_types::DeviceId;

    fn sessions() -> NacSessions {
        let mut sessions = NacSessions::new();
        sessions.insert(PortNac {
            device_id: DeviceId::new(1),
            port_id: 1005,
            mac_address: "00:11:22:33:44:55".to_string(),
            auth_id: "1".to_string(),
            domain: String::new(),
            username: "alice".to_string(),
            ip_address: String::new(),
            host_mode: "multiAuth".to_string(),
            authz_status: AuthzStatus::Success,
            authz_by: UNKNOWN.to_string(),
            timeout: 3600,
            vlan: "10".to_string(),
            authc_status: AuthcStatus::Success,
            method: "dot1x".to_string(),
            time_elapsed: 120,
        });
        sessions
    }

    #[test]
    fn test_session_verifier() {
        let sessions = sessions();
        let verifier = SessionVerifier::new(&sessions);

        assert!(verifier.assert_count(1).is_ok());
        assert!(verifier.assert_session_exists("00:11:22:33:44:55").is_ok());
        assert!(verifier
            .assert_all_fields(
                "00:11:22:33:44:55",
                &[
                    ("authc_status", "authcSuccess"),
                    ("port_id", "1005"),
                    ("authz_by", "unknown"),
                ],
            )
            .is_ok());

        assert!(verifier.assert_count(2).is_err());
        assert!(verifier.assert_session_exists("00:11:22:33:44:66").is_err());
        assert!(verifier
            .assert_field_value("00:11:22:33:44:55", "vlan", "20")
            .is_err());
        assert!(verifier
            .assert_field_value("00:11:22:33:44:55", "no_such_field", "")
            .is_err());
    }

    #[test]
    fn test_assert_readings() {
        let readings = ProcessorReadings::from([(1, Some(17)), (2, None)]);

        assert!(assert_readings(&readings, &[(1, Some(17)), (2, None)]).is_ok());
        assert!(assert_readings(&readings, &[(1, Some(17))]).is_err());
        assert!(assert_readings(&readings, &[(1, Some(18)), (2, None)]).is_err());
        assert!(assert_readings(&readings, &[(1, Some(17)), (3, None)]).is_err());
    }
}
