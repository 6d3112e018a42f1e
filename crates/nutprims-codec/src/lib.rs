//! Primitive encoding rules of the NUT multimedia container format.
//!
//! This is the binary layer used to exchange frame data and timestamps with an
//! external media tool over a byte pipe. It covers:
//! - Variable-length unsigned integers (big-endian 7-bit groups)
//! - Zigzag-mapped signed integers on top of them
//! - Fixed 32/64-bit big-endian integers and raw bytes
//! - NUL-terminated and length-prefixed strings
//! - Multiplexed timestamps (`value * stream_count + stream_index`)
//! - CRC-32 checkpoints over the bytes written since the previous one
//!
//! [`NutReader`] and [`NutWriter`] wrap any `Read`/`Write` channel and track
//! the byte position, so a caller can decode one element, check how many bytes
//! it took, and react.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod reader;
pub mod timestamp;
pub mod writer;

pub use checksum::{checksum, RunningChecksum, CHECKSUM_SIZE};
pub use codec::{
    decode_var_u64, encode_var_i64, encode_var_u64, var_u64_len, zigzag_decode, zigzag_encode,
    CodecConfig, DEFAULT_MAX_FIELD_LEN, MAX_VAR_U64_GROUPS, MAX_VAR_U64_LEN,
};
pub use error::{CodecError, Result};
pub use reader::NutReader;
pub use timestamp::Timestamp;
pub use writer::NutWriter;
