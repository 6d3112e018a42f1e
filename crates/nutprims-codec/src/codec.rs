use bytes::{BufMut, BytesMut};

use crate::error::{CodecError, Result};

/// Longest canonical encoding of a `u64` (ten 7-bit groups).
pub const MAX_VAR_U64_LEN: usize = 10;

/// Most groups accepted for one value on read, zero padding included.
pub const MAX_VAR_U64_GROUPS: usize = MAX_VAR_U64_LEN + 6;

/// Default limit for length-delimited fields: 16 MiB.
pub const DEFAULT_MAX_FIELD_LEN: usize = 16 * 1024 * 1024;

const CONTINUATION: u8 = 0x80;
const GROUP_MASK: u8 = 0x7F;
const STRING_TERMINATOR: u8 = 0x00;

/// Number of bytes the canonical encoding of `value` occupies.
pub fn var_u64_len(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(7).max(1)
}

/// Encode an unsigned value as big-endian 7-bit groups.
///
/// Wire format for 356 (`0b1_0110_0100`):
/// ```text
/// ┌───────────────┬───────────────┐
/// │ 1 0000010     │ 0 1100100     │
/// │ cont | 0x02   │ last | 0x64   │
/// └───────────────┴───────────────┘
/// ```
pub fn encode_var_u64(value: u64, dst: &mut BytesMut) {
    let len = var_u64_len(value);
    dst.reserve(len);
    for group in (1..len).rev() {
        dst.put_u8(((value >> (7 * group)) as u8 & GROUP_MASK) | CONTINUATION);
    }
    dst.put_u8(value as u8 & GROUP_MASK);
}

/// Decode a variable-length unsigned value from the front of `src`.
///
/// Returns `Ok(None)` if `src` ends before the final group. On success returns
/// the value and the number of bytes it occupied. More than
/// [`MAX_VAR_U64_GROUPS`] groups is [`CodecError::VarIntOverflow`].
pub fn decode_var_u64(src: &[u8]) -> Result<Option<(u64, usize)>> {
    let mut value = 0u64;
    for (idx, &byte) in src.iter().take(MAX_VAR_U64_GROUPS).enumerate() {
        value = push_group(value, byte)?;
        if !has_continuation(byte) {
            return Ok(Some((value, idx + 1)));
        }
    }
    if src.len() >= MAX_VAR_U64_GROUPS {
        return Err(CodecError::VarIntOverflow);
    }
    Ok(None)
}

/// Shift one 7-bit group into an accumulated value.
pub(crate) fn push_group(value: u64, byte: u8) -> Result<u64> {
    if value > (u64::MAX >> 7) {
        return Err(CodecError::VarIntOverflow);
    }
    Ok((value << 7) | u64::from(byte & GROUP_MASK))
}

pub(crate) fn has_continuation(byte: u8) -> bool {
    byte & CONTINUATION != 0
}

/// Map a signed value onto the unsigned domain: `v >= 0 -> 2v`, `v < 0 -> -2v - 1`.
pub fn zigzag_encode(value: i64) -> u64 {
    if value >= 0 {
        (value as u64) << 1
    } else {
        (!(value as u64) << 1) | 1
    }
}

/// Inverse of [`zigzag_encode`]: even values are non-negative, odd are negative.
pub fn zigzag_decode(value: u64) -> i64 {
    let half = value >> 1;
    if value & 1 == 0 {
        half as i64
    } else {
        !half as i64
    }
}

/// Encode a signed value as a zigzag-mapped variable-length integer.
pub fn encode_var_i64(value: i64, dst: &mut BytesMut) {
    encode_var_u64(zigzag_encode(value), dst);
}

/// Encode a byte-count prefix followed by the bytes themselves.
pub fn encode_var_bytes(bytes: &[u8], dst: &mut BytesMut) {
    dst.reserve(var_u64_len(bytes.len() as u64) + bytes.len());
    encode_var_u64(bytes.len() as u64, dst);
    dst.put_slice(bytes);
}

/// Encode a string followed by a single `0x00` terminator.
pub fn encode_cstring(value: &str, dst: &mut BytesMut) -> Result<()> {
    if value.as_bytes().contains(&STRING_TERMINATOR) {
        return Err(CodecError::InteriorNul);
    }
    dst.reserve(value.len() + 1);
    dst.put_slice(value.as_bytes());
    dst.put_u8(STRING_TERMINATOR);
    Ok(())
}

pub(crate) fn is_terminator(byte: u8) -> bool {
    byte == STRING_TERMINATOR
}

/// Configuration shared by [`NutReader`](crate::NutReader) and
/// [`NutWriter`](crate::NutWriter).
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Maximum size of a length-delimited or terminated field. Default: 16 MiB.
    pub max_field_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

impl CodecConfig {
    pub(crate) fn check_field_len(&self, size: u64) -> Result<usize> {
        match usize::try_from(size) {
            Ok(len) if len <= self.max_field_len => Ok(len),
            _ => Err(CodecError::FieldTooLarge {
                size,
                max: self.max_field_len,
            }),
        }
    }
}
