//! MAC address type with lenient parsing of agent output.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 48-bit Ethernet MAC address.
///
/// SNMP agents render `PhysAddress`/`MacAddress` columns in several shapes
/// depending on the agent and the output options of the query. All of the
/// following parse to the same address:
///
/// ```
/// use nms_types::MacAddress;
///
/// let mac: MacAddress = "00:11:22:aa:bb:cc".parse().unwrap();
/// assert_eq!(mac, "0:11:22:AA:BB:CC".parse().unwrap());
/// assert_eq!(mac, "00-11-22-aa-bb-cc".parse().unwrap());
/// assert_eq!(mac, "00 11 22 AA BB CC".parse().unwrap());
/// assert_eq!(mac, "001122aabbcc".parse().unwrap());
/// assert_eq!(mac.to_string(), "00:11:22:aa:bb:cc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Creates a new MAC address from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    /// Returns the raw bytes of the MAC address.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    fn from_octets<'a>(s: &str, parts: impl Iterator<Item = &'a str>) -> Result<Self, ParseError> {
        let mut bytes = [0u8; 6];
        let mut count = 0;
        for part in parts {
            if count == 6 || part.is_empty() || part.len() > 2 {
                return Err(ParseError::InvalidMacAddress(s.to_string()));
            }
            bytes[count] = u8::from_str_radix(part, 16)
                .map_err(|_| ParseError::InvalidMacAddress(s.to_string()))?;
            count += 1;
        }
        if count != 6 {
            return Err(ParseError::InvalidMacAddress(s.to_string()));
        }
        Ok(MacAddress(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('"');

        if trimmed.contains(':') {
            return Self::from_octets(s, trimmed.split(':'));
        }
        if trimmed.contains('-') {
            return Self::from_octets(s, trimmed.split('-'));
        }
        if trimmed.contains(char::is_whitespace) {
            return Self::from_octets(s, trimmed.split_whitespace());
        }

        // Bare 12 hex digit form
        if trimmed.len() == 12 && trimmed.is_ascii() {
            return Self::from_octets(s, (0..6).map(|i| &trimmed[i * 2..i * 2 + 2]));
        }

        Err(ParseError::InvalidMacAddress(s.to_string()))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> String {
        mac.to_string()
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_colon_format() {
        let mac: MacAddress = "00:11:22:33:44:55".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    }

    #[test]
    fn test_parse_net_snmp_short_octets() {
        let mac: MacAddress = "0:1b:2:c:44:5".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0x00, 0x1b, 0x02, 0x0c, 0x44, 0x05]);
    }

    #[test]
    fn test_parse_hex_string_format() {
        let mac: MacAddress = "\"F8 B1 56 01 02 03 \"".parse().unwrap();
        assert_eq!(mac.to_string(), "f8:b1:56:01:02:03");
    }

    #[test]
    fn test_parse_bare_format() {
        let mac: MacAddress = "f8b156010203".parse().unwrap();
        assert_eq!(mac.to_string(), "f8:b1:56:01:02:03");
    }

    #[test]
    fn test_display_is_lowercase() {
        let mac = MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_invalid_format() {
        assert!("invalid".parse::<MacAddress>().is_err());
        assert!("".parse::<MacAddress>().is_err());
        assert!("00:11:22:33:44".parse::<MacAddress>().is_err());
        assert!("00:11:22:33:44:55:66".parse::<MacAddress>().is_err());
        assert!("gg:11:22:33:44:55".parse::<MacAddress>().is_err());
        assert!("001:11:22:33:44:55".parse::<MacAddress>().is_err());
    }
}
