//! Decoding of hex encoded DNOS display strings.

/// Decodes a string the agent renders as hex byte pairs.
///
/// DNOS returns some `DisplayString` columns (the NAC user name, notably) as
/// `"61 64 6D 69 6E 00 00 00"`, wrapped over several lines for long values.
/// Tokens are separated by spaces or newlines, `00` terminates the string and
/// everything after it is padding. Tokens that are not one or two hex digits
/// are skipped. The collected bytes are interpreted as UTF-8, replacing
/// invalid sequences.
///
/// ```
/// use nms_powerconnect::decode_hex_string;
///
/// assert_eq!(decode_hex_string("61 64 6D 69 6E 00 00"), "admin");
/// assert_eq!(decode_hex_string("41 00 42"), "A");
/// assert_eq!(decode_hex_string("00"), "");
/// ```
pub fn decode_hex_string(s: &str) -> String {
    let mut bytes = Vec::new();

    for token in s.split_whitespace() {
        if token == "00" {
            break;
        }
        if token.len() > 2 {
            continue;
        }
        if let Ok(byte) = u8::from_str_radix(token, 16) {
            bytes.push(byte);
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
