//! Multiplexed timestamps.
//!
//! A timestamp carries a stream index and a value folded into one integer:
//! `combined = value * stream_count + stream_index`. The stream count is not
//! on the wire; both ends must agree on it out of band, and a mismatch decodes
//! to a wrong pair without any error.

use crate::error::{CodecError, Result};

/// A time value tagged with the stream it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// Index of the stream (time base) this value is expressed in.
    pub stream_index: u64,
    /// The time value.
    pub value: u64,
}

impl Timestamp {
    /// Create a new timestamp.
    pub fn new(stream_index: u64, value: u64) -> Self {
        Self {
            stream_index,
            value,
        }
    }

    /// Fold this timestamp into a single integer for `stream_count` streams.
    pub fn mux(&self, stream_count: u64) -> Result<u64> {
        if stream_count == 0 {
            return Err(CodecError::ZeroStreamCount);
        }
        if self.stream_index >= stream_count {
            return Err(CodecError::StreamIndexOutOfRange {
                index: self.stream_index,
                count: stream_count,
            });
        }
        self.value
            .checked_mul(stream_count)
            .and_then(|scaled| scaled.checked_add(self.stream_index))
            .ok_or(CodecError::TimestampOverflow)
    }

    /// Split a folded integer back into stream index and value.
    pub fn demux(combined: u64, stream_count: u64) -> Result<Self> {
        if stream_count == 0 {
            return Err(CodecError::ZeroStreamCount);
        }
        Ok(Self {
            stream_index: combined % stream_count,
            value: combined / stream_count,
        })
    }
}
