//! Numeric SNMP object identifier.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric object identifier in dotted form, always stored with a leading dot.
///
/// # Examples
///
/// ```
/// use nms_types::Oid;
///
/// let oid: Oid = "1.3.6.1.4.1.89.1.7.0".parse().unwrap();
/// assert_eq!(oid.as_str(), ".1.3.6.1.4.1.89.1.7.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Returns the dotted representation with its leading dot.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a row index (itself possibly dotted) to this identifier.
    ///
    /// An empty index returns the identifier unchanged.
    pub fn join_index(&self, index: &str) -> Result<Oid, ParseError> {
        let index = index.trim_matches('.');
        if index.is_empty() {
            return Ok(self.clone());
        }
        format!("{}.{}", self.0, index).parse()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Oid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim().strip_prefix('.').unwrap_or(s.trim());
        if body.is_empty() {
            return Err(ParseError::InvalidOid(s.to_string()));
        }

        for arc in body.split('.') {
            if arc.is_empty() || arc.parse::<u32>().is_err() {
                return Err(ParseError::InvalidOid(s.to_string()));
            }
        }

        Ok(Oid(format!(".{}", body)))
    }
}

impl TryFrom<String> for Oid {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> String {
        oid.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leading_dot_normalized() {
        let a: Oid = "1.3.6.1.2.1".parse().unwrap();
        let b: Oid = ".1.3.6.1.2.1".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), ".1.3.6.1.2.1");
    }

    #[test]
    fn test_join_index() {
        let root: Oid = ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9".parse().unwrap();
        assert_eq!(
            root.join_index("0").unwrap().as_str(),
            ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9.0"
        );
        assert_eq!(root.join_index("").unwrap(), root);
        assert_eq!(root.join_index(".2.1").unwrap().as_str(), format!("{}.2.1", root));
    }

    #[test]
    fn test_invalid() {
        assert!("".parse::<Oid>().is_err());
        assert!(".".parse::<Oid>().is_err());
        assert!("1..3".parse::<Oid>().is_err());
        assert!("sysObjectID.0".parse::<Oid>().is_err());
        assert!("1.3.x".parse::<Oid>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let oid: Oid = ".1.3.6.1.4.1.89.1.7.0".parse().unwrap();
        let s: String = oid.clone().into();
        assert_eq!(Oid::try_from(s).unwrap(), oid);
    }
}
