//! Script number encoding.
//!
//! Numbers pushed onto the script stack (gas limits and gas prices in
//! contract scripts) are encoded as minimal little-endian byte arrays
//! with a sign bit in the most significant bit of the last byte. Zero
//! encodes as an empty push.

use crate::ScriptError;

/// Maximum encoded length accepted when decoding (fits in i64 with sign bit).
const MAX_NUM_LEN: usize = 8;

/// Encode an i64 as a minimal script number.
///
/// # Arguments
/// * `value` - The number to encode.
///
/// # Returns
/// Little-endian bytes with a sign bit, empty for zero.
pub fn encode(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }

    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut result = Vec::new();
    while abs > 0 {
        result.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // If the high bit of the top byte is set, an extra byte carries the
    // sign; otherwise the sign bit goes into the top byte itself.
    let last = result.len() - 1;
    if result[last] & 0x80 != 0 {
        result.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        result[last] |= 0x80;
    }

    result
}

/// Decode a minimally-encoded script number.
///
/// # Arguments
/// * `bytes` - Little-endian sign-bit encoded number, at most 8 bytes.
///
/// # Returns
/// The decoded value, or `InvalidNumber` if the encoding is too long or
/// not minimal.
pub fn decode(bytes: &[u8]) -> Result<i64, ScriptError> {
    if bytes.is_empty() {
        return Ok(0);
    }
    if bytes.len() > MAX_NUM_LEN {
        return Err(ScriptError::InvalidNumber(format!(
            "{} bytes exceeds the max of {}",
            bytes.len(),
            MAX_NUM_LEN
        )));
    }

    // Minimal encoding: the top byte may not be a bare sign byte unless
    // the byte below it needs its high bit.
    let last = bytes[bytes.len() - 1];
    if last & 0x7f == 0 && (bytes.len() == 1 || bytes[bytes.len() - 2] & 0x80 == 0) {
        return Err(ScriptError::InvalidNumber(format!(
            "non-minimal encoding: {}",
            hex::encode(bytes)
        )));
    }

    let mut value: i64 = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if i == bytes.len() - 1 {
            value |= ((b & 0x7f) as i64) << (8 * i);
        } else {
            value |= (b as i64) << (8 * i);
        }
    }

    if last & 0x80 != 0 {
        value = -value;
    }
    Ok(value)
}
