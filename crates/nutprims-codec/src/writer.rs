use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::checksum::RunningChecksum;
use crate::codec::{encode_cstring, encode_var_bytes, encode_var_i64, encode_var_u64, CodecConfig};
use crate::error::{CodecError, Result};
use crate::timestamp::Timestamp;

const INITIAL_BUFFER_CAPACITY: usize = 64;

/// Encodes NUT primitives to any `Write` sink.
///
/// Each primitive is encoded in full before anything reaches the sink. The
/// position and the running checksum advance only by bytes the sink accepted,
/// so after a failed write [`position`](Self::position) is exactly what was
/// transmitted.
///
/// The writer does no buffering of its own; wrap the sink in
/// [`std::io::BufWriter`] to batch small writes, and call [`flush`](Self::flush).
pub struct NutWriter<W> {
    inner: W,
    buf: BytesMut,
    position: u64,
    checksum: RunningChecksum,
    config: CodecConfig,
}

impl<W: Write> NutWriter<W> {
    /// Create a new writer with default configuration.
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new writer with explicit configuration.
    pub fn with_config(inner: W, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            position: 0,
            checksum: RunningChecksum::new(),
            config,
        }
    }

    /// Bytes accepted by the sink so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes written since the last checksum point.
    pub fn checksum_span(&self) -> u64 {
        self.checksum.bytes_covered()
    }

    /// Write a variable-length unsigned integer.
    pub fn write_var_u64(&mut self, value: u64) -> Result<()> {
        self.buf.clear();
        encode_var_u64(value, &mut self.buf);
        self.send()
    }

    /// Write a zigzag-mapped variable-length signed integer.
    pub fn write_var_i64(&mut self, value: i64) -> Result<()> {
        self.buf.clear();
        encode_var_i64(value, &mut self.buf);
        self.send()
    }

    /// Write a big-endian 8-byte signed integer.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.buf.clear();
        self.buf.put_i64(value);
        self.send()
    }

    /// Write a big-endian 4-byte signed integer.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buf.clear();
        self.buf.put_i32(value);
        self.send()
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buf.clear();
        self.buf.put_u8(value);
        self.send()
    }

    /// Write bytes verbatim, with no length information.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        let (accepted, result) = transmit(&mut self.inner, data);
        self.checksum.update(&data[..accepted]);
        self.position += accepted as u64;
        result
    }

    /// Write a byte-count prefix followed by `data`.
    pub fn write_var_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.config.check_field_len(data.len() as u64)?;
        self.buf.clear();
        encode_var_bytes(data, &mut self.buf);
        self.send()
    }

    /// Write `value` followed by a NUL terminator.
    ///
    /// Fails with [`CodecError::InteriorNul`] if `value` itself contains a NUL,
    /// before anything is written.
    pub fn write_cstring(&mut self, value: &str) -> Result<()> {
        self.config.check_field_len(value.len() as u64)?;
        self.buf.clear();
        encode_cstring(value, &mut self.buf)?;
        self.send()
    }

    /// Write a byte-length prefix followed by the UTF-8 bytes of `value`.
    pub fn write_var_string(&mut self, value: &str) -> Result<()> {
        self.write_var_bytes(value.as_bytes())
    }

    /// Write `timestamp` folded for `stream_count` streams.
    pub fn write_timestamp(&mut self, stream_count: u64, timestamp: Timestamp) -> Result<()> {
        let combined = timestamp.mux(stream_count)?;
        self.write_var_u64(combined)
    }

    /// Close the current checksum span and write its NUT CRC-32 (4 bytes, big-endian).
    ///
    /// The span covers every byte written since construction or the previous
    /// checksum. The checksum bytes themselves belong to no span.
    pub fn write_checksum(&mut self) -> Result<u32> {
        let span = self.checksum.bytes_covered();
        let crc = self.checksum.take();
        trace!(crc, span, position = self.position, "checksum point");

        let (accepted, result) = transmit(&mut self.inner, &crc.to_be_bytes());
        self.position += accepted as u64;
        result.map(|()| crc)
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Update the field size limit for subsequent writes.
    pub fn set_max_field_len(&mut self, max_field_len: usize) {
        self.config.max_field_len = max_field_len;
    }

    /// Current writer configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn send(&mut self) -> Result<()> {
        let (accepted, result) = transmit(&mut self.inner, &self.buf);
        self.checksum.update(&self.buf[..accepted]);
        self.position += accepted as u64;
        result
    }
}

/// Hand `data` to the sink; returns how many bytes it accepted.
fn transmit<W: Write>(inner: &mut W, data: &[u8]) -> (usize, Result<()>) {
    let mut offset = 0usize;
    while offset < data.len() {
        match inner.write(&data[offset..]) {
            Ok(0) => {
                let err = std::io::Error::from(ErrorKind::WriteZero);
                return (offset, Err(CodecError::Io(err)));
            }
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return (offset, Err(CodecError::Io(err))),
        }
    }
    (offset, Ok(()))
}
