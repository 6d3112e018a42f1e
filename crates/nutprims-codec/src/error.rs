/// Errors that can occur while encoding or decoding NUT primitives.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stream ended before the requested value was complete.
    #[error("stream truncated (unexpected end of data)")]
    Truncated,

    /// The underlying byte source or sink reported a fault.
    #[error("codec I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A string field did not contain valid UTF-8.
    #[error("string field is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A variable-length integer does not fit in 64 bits.
    #[error("variable-length integer overflows 64 bits")]
    VarIntOverflow,

    /// A length-delimited field exceeds the configured limit.
    #[error("field too large ({size} bytes, max {max})")]
    FieldTooLarge { size: u64, max: usize },

    /// Timestamps cannot be folded with zero streams.
    #[error("stream count must be greater than zero")]
    ZeroStreamCount,

    /// The stream index does not fit the agreed stream count.
    #[error("stream index {index} out of range for {count} streams")]
    StreamIndexOutOfRange { index: u64, count: u64 },

    /// `value * stream_count + stream_index` does not fit in 64 bits.
    #[error("muxed timestamp overflows 64 bits")]
    TimestampOverflow,

    /// A NUL-terminated string contains an interior NUL byte.
    #[error("string contains an interior NUL byte")]
    InteriorNul,
}

impl CodecError {
    /// True when the error means the stream ran out of data.
    pub fn is_truncated(&self) -> bool {
        matches!(self, CodecError::Truncated)
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
