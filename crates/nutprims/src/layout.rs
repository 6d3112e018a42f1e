//! Field layouts: the sequence of primitive kinds a byte stream is made of.
//!
//! A layout is written as comma-separated kinds, e.g. `v,s,cstr,ts:2,crc`.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use nutprims_codec::{CodecError, NutReader, NutWriter, Timestamp};
use serde_json::{json, Value};

use crate::exit::{CliError, CliResult, DATA_INVALID, USAGE};

const ZERO_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    VarU64,
    VarI64,
    I64,
    I32,
    U8,
    Raw(usize),
    VarBytes,
    CString,
    VarString,
    Timestamp(u64),
    Skip(u64),
    Checksum,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::VarU64 => write!(f, "v"),
            FieldKind::VarI64 => write!(f, "s"),
            FieldKind::I64 => write!(f, "i64"),
            FieldKind::I32 => write!(f, "i32"),
            FieldKind::U8 => write!(f, "u8"),
            FieldKind::Raw(len) => write!(f, "raw:{len}"),
            FieldKind::VarBytes => write!(f, "vbytes"),
            FieldKind::CString => write!(f, "cstr"),
            FieldKind::VarString => write!(f, "vstr"),
            FieldKind::Timestamp(count) => write!(f, "ts:{count}"),
            FieldKind::Skip(len) => write!(f, "skip:{len}"),
            FieldKind::Checksum => write!(f, "crc"),
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (name, arg) = match input.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (input, None),
        };

        let kind = match (name, arg) {
            ("v", None) => FieldKind::VarU64,
            ("s", None) => FieldKind::VarI64,
            ("i64", None) => FieldKind::I64,
            ("i32", None) => FieldKind::I32,
            ("u8", None) => FieldKind::U8,
            ("vbytes", None) => FieldKind::VarBytes,
            ("cstr", None) => FieldKind::CString,
            ("vstr", None) => FieldKind::VarString,
            ("crc", None) => FieldKind::Checksum,
            ("raw", Some(arg)) => FieldKind::Raw(parse_count(input, arg)?),
            ("skip", Some(arg)) => FieldKind::Skip(parse_count(input, arg)?),
            ("ts", Some(arg)) => {
                let count = parse_count(input, arg)?;
                if count == 0 {
                    return Err(format!("{input}: stream count must be greater than zero"));
                }
                FieldKind::Timestamp(count)
            }
            ("raw" | "skip" | "ts", None) => {
                return Err(format!("{input}: missing ':<count>' argument"));
            }
            _ => return Err(format!("unknown field kind: {input}")),
        };
        Ok(kind)
    }
}

fn parse_count<T: FromStr>(field: &str, arg: &str) -> Result<T, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("{field}: invalid count '{arg}'"))
}

/// Parse a comma-separated layout. Empty layouts are rejected.
pub fn parse_layout(input: &str) -> CliResult<Vec<FieldKind>> {
    let fields = input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(FieldKind::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CliError::new(USAGE, format!("invalid layout: {err}")))?;

    if fields.is_empty() {
        return Err(CliError::new(USAGE, "layout must name at least one field"));
    }
    Ok(fields)
}

/// Decode one field and render its value as JSON.
pub fn decode_field<R: Read>(
    reader: &mut NutReader<R>,
    kind: FieldKind,
) -> Result<Value, CodecError> {
    let value = match kind {
        FieldKind::VarU64 => json!(reader.read_var_u64()?),
        FieldKind::VarI64 => json!(reader.read_var_i64()?),
        FieldKind::I64 => json!(reader.read_i64()?),
        FieldKind::I32 => json!(reader.read_i32()?),
        FieldKind::U8 => json!(reader.read_u8()?),
        FieldKind::Raw(len) => json!(reader.read_bytes(len)?.to_vec()),
        FieldKind::VarBytes => json!(reader.read_var_bytes()?.to_vec()),
        FieldKind::CString => json!(reader.read_cstring()?),
        FieldKind::VarString => json!(reader.read_var_string()?),
        FieldKind::Timestamp(count) => {
            let ts = reader.read_timestamp(count)?;
            json!([ts.stream_index, ts.value])
        }
        FieldKind::Skip(len) => {
            reader.skip_bytes(len)?;
            Value::Null
        }
        FieldKind::Checksum => json!(format!("{:#010x}", reader.read_checksum()?)),
    };
    Ok(value)
}

/// Encode one field from its JSON value.
///
/// `crc` ignores its value and closes the current checksum span; `skip:N`
/// writes N zero bytes.
pub fn encode_field<W: Write>(
    writer: &mut NutWriter<W>,
    kind: FieldKind,
    value: &Value,
) -> CliResult<()> {
    let result = match kind {
        FieldKind::VarU64 => writer.write_var_u64(as_u64(kind, value)?),
        FieldKind::VarI64 => writer.write_var_i64(as_i64(kind, value)?),
        FieldKind::I64 => writer.write_i64(as_i64(kind, value)?),
        FieldKind::I32 => {
            let raw = as_i64(kind, value)?;
            let narrowed = i32::try_from(raw).map_err(|_| value_error(kind, value))?;
            writer.write_i32(narrowed)
        }
        FieldKind::U8 => {
            let raw = as_u64(kind, value)?;
            let narrowed = u8::try_from(raw).map_err(|_| value_error(kind, value))?;
            writer.write_u8(narrowed)
        }
        FieldKind::Raw(len) => {
            let bytes = as_bytes(kind, value)?;
            if bytes.len() != len {
                return Err(CliError::new(
                    DATA_INVALID,
                    format!("{kind}: expected {len} bytes, got {}", bytes.len()),
                ));
            }
            writer.write_bytes(&bytes)
        }
        FieldKind::VarBytes => writer.write_var_bytes(&as_bytes(kind, value)?),
        FieldKind::CString => writer.write_cstring(as_str(kind, value)?),
        FieldKind::VarString => writer.write_var_string(as_str(kind, value)?),
        FieldKind::Timestamp(count) => {
            let pair = value
                .as_array()
                .filter(|pair| pair.len() == 2)
                .ok_or_else(|| value_error(kind, value))?;
            let ts = Timestamp::new(as_u64(kind, &pair[0])?, as_u64(kind, &pair[1])?);
            writer.write_timestamp(count, ts)
        }
        FieldKind::Skip(len) => write_zeros(writer, len),
        FieldKind::Checksum => writer.write_checksum().map(|_| ()),
    };
    result.map_err(|err| crate::exit::codec_error(&format!("encoding {kind}"), err))
}

fn write_zeros<W: Write>(writer: &mut NutWriter<W>, len: u64) -> nutprims_codec::Result<()> {
    let zeros = [0u8; ZERO_CHUNK_SIZE];
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(ZERO_CHUNK_SIZE as u64) as usize;
        writer.write_bytes(&zeros[..n])?;
        remaining -= n as u64;
    }
    Ok(())
}

fn as_u64(kind: FieldKind, value: &Value) -> CliResult<u64> {
    value.as_u64().ok_or_else(|| value_error(kind, value))
}

fn as_i64(kind: FieldKind, value: &Value) -> CliResult<i64> {
    value.as_i64().ok_or_else(|| value_error(kind, value))
}

fn as_str(kind: FieldKind, value: &Value) -> CliResult<&str> {
    value.as_str().ok_or_else(|| value_error(kind, value))
}

fn as_bytes(kind: FieldKind, value: &Value) -> CliResult<Vec<u8>> {
    if let Some(text) = value.as_str() {
        return Ok(text.as_bytes().to_vec());
    }
    value
        .as_array()
        .ok_or_else(|| value_error(kind, value))?
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|byte| u8::try_from(byte).ok())
                .ok_or_else(|| value_error(kind, value))
        })
        .collect()
}

fn value_error(kind: FieldKind, value: &Value) -> CliError {
    CliError::new(DATA_INVALID, format!("{kind}: unsupported value {value}"))
}
