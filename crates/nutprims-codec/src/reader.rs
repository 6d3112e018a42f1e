use std::io::{ErrorKind, Read};

use bytes::Bytes;
use tracing::debug;

use crate::checksum::CHECKSUM_SIZE;
use crate::codec::{
    has_continuation, is_terminator, push_group, zigzag_decode, CodecConfig, MAX_VAR_U64_GROUPS,
};
use crate::error::{CodecError, Result};
use crate::timestamp::Timestamp;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Decodes NUT primitives from any `Read` source.
///
/// Every completed read advances [`position`](Self::position) by exactly the
/// bytes it consumed. A read that fails leaves the position where it was; the
/// bytes it pulled from the source are gone, so callers resynchronize at a
/// framing boundary of their own.
///
/// The reader pulls single bytes for variable-length values. Wrap unbuffered
/// sources (pipes, sockets) in [`std::io::BufReader`].
pub struct NutReader<R> {
    inner: R,
    peeked: Option<u8>,
    position: u64,
    config: CodecConfig,
}

impl<R: Read> NutReader<R> {
    /// Create a new reader with default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new reader with explicit configuration.
    pub fn with_config(inner: R, config: CodecConfig) -> Self {
        Self {
            inner,
            peeked: None,
            position: 0,
            config,
        }
    }

    /// Bytes consumed by completed reads so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read a variable-length unsigned integer.
    pub fn read_var_u64(&mut self) -> Result<u64> {
        self.complete("var_u64", |r, consumed| r.take_var_u64(consumed))
    }

    /// Read a zigzag-mapped variable-length signed integer.
    pub fn read_var_i64(&mut self) -> Result<i64> {
        self.complete("var_i64", |r, consumed| {
            r.take_var_u64(consumed).map(zigzag_decode)
        })
    }

    /// Read a big-endian 8-byte signed integer.
    pub fn read_i64(&mut self) -> Result<i64> {
        self.complete("i64", |r, consumed| {
            let mut raw = [0u8; 8];
            r.take_exact(&mut raw, consumed)?;
            Ok(i64::from_be_bytes(raw))
        })
    }

    /// Read a big-endian 4-byte signed integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.complete("i32", |r, consumed| {
            let mut raw = [0u8; 4];
            r.take_exact(&mut raw, consumed)?;
            Ok(i32::from_be_bytes(raw))
        })
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.complete("u8", |r, consumed| r.take_u8(consumed))
    }

    /// Read exactly `len` bytes. Nothing is returned on a short read.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        self.complete("bytes", |r, consumed| {
            r.take_vec(len, consumed).map(Bytes::from)
        })
    }

    /// Read a length-prefixed byte field.
    pub fn read_var_bytes(&mut self) -> Result<Bytes> {
        self.complete("var_bytes", |r, consumed| {
            r.take_var_field(consumed).map(Bytes::from)
        })
    }

    /// Read a NUL-terminated UTF-8 string (terminator not included).
    pub fn read_cstring(&mut self) -> Result<String> {
        self.complete("cstring", |r, consumed| {
            let mut out = Vec::new();
            loop {
                let byte = r.take_u8(consumed)?;
                if is_terminator(byte) {
                    break;
                }
                if out.len() == r.config.max_field_len {
                    return Err(CodecError::FieldTooLarge {
                        size: out.len() as u64 + 1,
                        max: r.config.max_field_len,
                    });
                }
                out.push(byte);
            }
            Ok(String::from_utf8(out)?)
        })
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_var_string(&mut self) -> Result<String> {
        self.complete("var_string", |r, consumed| {
            let raw = r.take_var_field(consumed)?;
            Ok(String::from_utf8(raw)?)
        })
    }

    /// Read a muxed timestamp written for `stream_count` streams.
    ///
    /// Fails with [`CodecError::ZeroStreamCount`] before touching the stream
    /// when `stream_count` is zero.
    pub fn read_timestamp(&mut self, stream_count: u64) -> Result<Timestamp> {
        if stream_count == 0 {
            return Err(CodecError::ZeroStreamCount);
        }
        self.complete("timestamp", |r, consumed| {
            let combined = r.take_var_u64(consumed)?;
            Timestamp::demux(combined, stream_count)
        })
    }

    /// Read a 4-byte big-endian checksum field.
    pub fn read_checksum(&mut self) -> Result<u32> {
        self.complete("checksum", |r, consumed| {
            let mut raw = [0u8; CHECKSUM_SIZE];
            r.take_exact(&mut raw, consumed)?;
            Ok(u32::from_be_bytes(raw))
        })
    }

    /// Discard exactly `len` bytes.
    pub fn skip_bytes(&mut self, len: u64) -> Result<()> {
        self.complete("skip", |r, consumed| {
            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let mut remaining = len;
            while remaining > 0 {
                let n = remaining.min(READ_CHUNK_SIZE as u64) as usize;
                r.take_exact(&mut chunk[..n], consumed)?;
                remaining -= n as u64;
            }
            Ok(())
        })
    }

    /// Look at the next byte without consuming it.
    ///
    /// Returns `Ok(None)` at end of stream. Repeated calls return the same
    /// byte and never move the position.
    pub fn peek_u8(&mut self) -> Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.fetch_byte()?;
        }
        Ok(self.peeked)
    }

    /// True if at least one more byte can be read.
    pub fn has_more_data(&mut self) -> Result<bool> {
        Ok(self.peek_u8()?.is_some())
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the reader and return the inner source.
    ///
    /// A byte held for [`peek_u8`](Self::peek_u8) is dropped.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Update the field size limit for subsequent reads.
    pub fn set_max_field_len(&mut self, max_field_len: usize) {
        self.config.max_field_len = max_field_len;
    }

    /// Current reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Run one decode step; commit its byte count only if it succeeded.
    fn complete<T>(
        &mut self,
        op: &'static str,
        step: impl FnOnce(&mut Self, &mut u64) -> Result<T>,
    ) -> Result<T> {
        let mut consumed = 0u64;
        let result = step(self, &mut consumed);
        match &result {
            Ok(_) => self.position += consumed,
            Err(CodecError::Truncated) => {
                debug!(op, position = self.position, consumed, "stream ended mid-value");
            }
            Err(_) => {}
        }
        result
    }

    fn take_var_u64(&mut self, consumed: &mut u64) -> Result<u64> {
        let mut value = 0u64;
        for _ in 0..MAX_VAR_U64_GROUPS {
            let byte = self.take_u8(consumed)?;
            value = push_group(value, byte)?;
            if !has_continuation(byte) {
                return Ok(value);
            }
        }
        Err(CodecError::VarIntOverflow)
    }

    fn take_var_field(&mut self, consumed: &mut u64) -> Result<Vec<u8>> {
        let len = self.take_var_u64(consumed)?;
        let len = self.config.check_field_len(len)?;
        self.take_vec(len, consumed)
    }

    fn take_u8(&mut self, consumed: &mut u64) -> Result<u8> {
        let byte = match self.peeked.take() {
            Some(byte) => byte,
            None => self.fetch_byte()?.ok_or(CodecError::Truncated)?,
        };
        *consumed += 1;
        Ok(byte)
    }

    // Capacity grows with the data that actually arrives, never with `len`.
    fn take_vec(&mut self, len: usize, consumed: &mut u64) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len.min(READ_CHUNK_SIZE));
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(READ_CHUNK_SIZE);
            self.take_exact(&mut chunk[..n], consumed)?;
            out.extend_from_slice(&chunk[..n]);
            remaining -= n;
        }
        Ok(out)
    }

    fn take_exact(&mut self, buf: &mut [u8], consumed: &mut u64) -> Result<()> {
        let mut filled = 0usize;
        if !buf.is_empty() {
            if let Some(byte) = self.peeked.take() {
                buf[0] = byte;
                filled = 1;
            }
        }

        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => return Err(CodecError::Truncated),
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }

        *consumed += buf.len() as u64;
        Ok(())
    }

    fn fetch_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::codec::{encode_var_bytes, encode_var_i64, encode_var_u64};

    fn closed() -> NutReader<Cursor<Vec<u8>>> {
        NutReader::new(Cursor::new(Vec::new()))
    }

    fn too_short_for_value() -> NutReader<Cursor<Vec<u8>>> {
        NutReader::new(Cursor::new(vec![0xFF]))
    }

    fn too_short_for_var_bytes() -> NutReader<Cursor<Vec<u8>>> {
        NutReader::new(Cursor::new(vec![0x04, 42]))
    }

    fn assert_truncated<T: std::fmt::Debug>(result: Result<T>) {
        let err = result.unwrap_err();
        assert!(err.is_truncated(), "expected truncation, got {err:?}");
    }

    #[test]
    fn position_starts_at_zero() {
        assert_eq!(closed().position(), 0);
    }

    #[test]
    fn read_primitives_in_order() {
        let mut wire = BytesMut::new();
        encode_var_u64(356, &mut wire);
        encode_var_i64(-142, &mut wire);
        wire.put_i64(-2);
        wire.put_i32(0x00AB_C123);
        wire.put_u8(12);
        wire.put_slice(&[1, 2, 3]);
        encode_var_bytes(&[5, 6, 7], &mut wire);
        wire.put_slice(b"Jaffree\0");
        encode_var_bytes("Test/\\Me".as_bytes(), &mut wire);
        wire.put_u32(0xDEAD_BEEF);

        let mut reader = NutReader::new(Cursor::new(wire.to_vec()));
        assert_eq!(reader.read_var_u64().unwrap(), 356);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read_var_i64().unwrap(), -142);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.read_i64().unwrap(), -2);
        assert_eq!(reader.position(), 12);
        assert_eq!(reader.read_i32().unwrap(), 0x00AB_C123);
        assert_eq!(reader.position(), 16);
        assert_eq!(reader.read_u8().unwrap(), 12);
        assert_eq!(reader.read_bytes(3).unwrap().as_ref(), &[1, 2, 3]);
        assert_eq!(reader.read_var_bytes().unwrap().as_ref(), &[5, 6, 7]);
        assert_eq!(reader.position(), 24);
        assert_eq!(reader.read_cstring().unwrap(), "Jaffree");
        assert_eq!(reader.position(), 32);
        assert_eq!(reader.read_var_string().unwrap(), "Test/\\Me");
        assert_eq!(reader.position(), 41);
        assert_eq!(reader.read_checksum().unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.position(), 45);
        assert!(!reader.has_more_data().unwrap());
    }

    #[test]
    fn every_read_on_closed_source_is_truncated() {
        assert_truncated(closed().read_var_u64());
        assert_truncated(closed().read_var_i64());
        assert_truncated(closed().read_i64());
        assert_truncated(closed().read_i32());
        assert_truncated(closed().read_u8());
        assert_truncated(closed().read_bytes(42));
        assert_truncated(closed().read_var_bytes());
        assert_truncated(closed().read_cstring());
        assert_truncated(closed().read_var_string());
        assert_truncated(closed().read_timestamp(4));
        assert_truncated(closed().read_checksum());
        assert_truncated(closed().skip_bytes(42));
    }

    #[test]
    fn reads_stopping_mid_value_are_truncated() {
        assert_truncated(too_short_for_value().read_var_u64());
        assert_truncated(too_short_for_value().read_var_i64());
        assert_truncated(too_short_for_value().read_i64());
        assert_truncated(too_short_for_value().read_i32());
        assert_truncated(too_short_for_value().read_var_string());
        assert_truncated(too_short_for_value().read_var_bytes());
        assert_truncated(too_short_for_value().read_timestamp(42));
        assert_truncated(too_short_for_value().read_bytes(42));
        assert_truncated(too_short_for_value().skip_bytes(42));

        assert_truncated(too_short_for_var_bytes().read_var_string());
        assert_truncated(too_short_for_var_bytes().read_var_bytes());
        assert_truncated(too_short_for_var_bytes().read_bytes(42));
        assert_truncated(too_short_for_var_bytes().skip_bytes(42));
    }

    #[test]
    fn failed_read_leaves_position_unchanged() {
        let mut reader = NutReader::new(Cursor::new(vec![0x01, 0x04, 42]));
        assert_eq!(reader.read_var_u64().unwrap(), 1);
        assert_eq!(reader.position(), 1);

        assert_truncated(reader.read_var_bytes());
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn skip_short_does_not_move_position() {
        let mut reader = NutReader::new(Cursor::new(vec![0u8; 10]));
        assert_truncated(reader.skip_bytes(11));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn skip_large_span() {
        let mut data = vec![0u8; 1_000_000];
        data.push(7);
        let mut reader = NutReader::new(Cursor::new(data));
        reader.skip_bytes(1_000_000).unwrap();
        assert_eq!(reader.position(), 1_000_000);
        assert_eq!(reader.read_u8().unwrap(), 7);
    }

    #[test]
    fn has_more_data_reports_remaining_input() {
        assert!(!closed().has_more_data().unwrap());
        assert!(too_short_for_value().has_more_data().unwrap());
        assert!(too_short_for_var_bytes().has_more_data().unwrap());
    }

    #[test]
    fn peek_on_closed_source_returns_none() {
        let mut reader = closed();
        assert_eq!(reader.peek_u8().unwrap(), None);
        assert_eq!(reader.peek_u8().unwrap(), None);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn peek_is_idempotent() {
        let mut reader = NutReader::new(Cursor::new(vec![42]));

        for _ in 0..1000 {
            assert_eq!(reader.peek_u8().unwrap(), Some(42));
            assert_eq!(reader.position(), 0);
        }

        assert_eq!(reader.read_u8().unwrap(), 42);
        assert_eq!(reader.position(), 1);

        for _ in 0..1000 {
            assert_eq!(reader.peek_u8().unwrap(), None);
        }
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn peeked_byte_is_consumed_by_next_read() {
        let mut wire = BytesMut::new();
        encode_var_u64(0x7ABC_DEF0_1234_56, &mut wire);
        wire.put_i32(9);
        let first = wire[0];

        let mut reader = NutReader::new(Cursor::new(wire.to_vec()));
        assert_eq!(reader.peek_u8().unwrap(), Some(first));
        assert_eq!(reader.read_var_u64().unwrap(), 0x7ABC_DEF0_1234_56);
        assert_eq!(reader.position(), 8);

        reader.peek_u8().unwrap();
        assert_eq!(reader.read_i32().unwrap(), 9);
        assert_eq!(reader.position(), 12);
    }

    #[test]
    fn timestamp_with_zero_streams_is_a_distinct_error() {
        let mut reader = NutReader::new(Cursor::new(vec![0x05]));
        let err = reader.read_timestamp(0).unwrap_err();
        assert!(matches!(err, CodecError::ZeroStreamCount));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_var_u64().unwrap(), 5);

        let err = closed().read_timestamp(0).unwrap_err();
        assert!(matches!(err, CodecError::ZeroStreamCount));
    }

    #[test]
    fn read_timestamp_demuxes() {
        let mut wire = BytesMut::new();
        encode_var_u64(1100 * 2 + 1, &mut wire);
        let mut reader = NutReader::new(Cursor::new(wire.to_vec()));

        let ts = reader.read_timestamp(2).unwrap();
        assert_eq!(ts, Timestamp::new(1, 1100));
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let mut reader = NutReader::new(Cursor::new(vec![0x02, 0xC3, 0x28]));
        let err = reader.read_var_string().unwrap_err();
        assert!(matches!(err, CodecError::InvalidUtf8(_)));

        let mut reader = NutReader::new(Cursor::new(vec![0xFF, 0xFE, 0x00]));
        let err = reader.read_cstring().unwrap_err();
        assert!(matches!(err, CodecError::InvalidUtf8(_)));
    }

    #[test]
    fn cstring_without_terminator_is_truncated() {
        let mut reader = NutReader::new(Cursor::new(b"abc".to_vec()));
        assert_truncated(reader.read_cstring());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn empty_strings() {
        let mut reader = NutReader::new(Cursor::new(vec![0x00, 0x00]));
        assert_eq!(reader.read_cstring().unwrap(), "");
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_var_string().unwrap(), "");
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn oversized_fields_rejected() {
        let cfg = CodecConfig { max_field_len: 2 };

        let mut reader = NutReader::with_config(Cursor::new(vec![0x03, 1, 2, 3]), cfg.clone());
        let err = reader.read_var_bytes().unwrap_err();
        assert!(matches!(err, CodecError::FieldTooLarge { size: 3, max: 2 }));
        assert_eq!(reader.position(), 0);

        let mut reader = NutReader::with_config(Cursor::new(b"abc\0".to_vec()), cfg);
        let err = reader.read_cstring().unwrap_err();
        assert!(matches!(err, CodecError::FieldTooLarge { .. }));
    }

    #[test]
    fn huge_length_prefix_fails_without_allocating() {
        let mut wire = BytesMut::new();
        encode_var_u64(u64::MAX >> 1, &mut wire);
        wire.put_slice(b"tiny");

        let mut reader = NutReader::with_config(
            Cursor::new(wire.to_vec()),
            CodecConfig {
                max_field_len: usize::MAX,
            },
        );
        assert_truncated(reader.read_var_bytes());
    }

    #[test]
    fn overflowing_varint_is_a_decode_error() {
        let mut wire = vec![0xFF; 10];
        wire.push(0x7F);
        let mut reader = NutReader::new(Cursor::new(wire));
        let err = reader.read_var_u64().unwrap_err();
        assert!(matches!(err, CodecError::VarIntOverflow));
    }

    #[test]
    fn endless_zero_padding_stops_at_group_limit() {
        let mut reader = NutReader::new(std::io::repeat(0x80));
        let err = reader.read_var_u64().unwrap_err();
        assert!(matches!(err, CodecError::VarIntOverflow));
        assert_eq!(reader.position(), 0);

        let mut padded = vec![0x80; 5];
        padded.push(0x01);
        let mut reader = NutReader::new(Cursor::new(padded));
        assert_eq!(reader.read_var_u64().unwrap(), 1);
        assert_eq!(reader.position(), 6);
    }

    #[test]
    fn partial_read_handling() {
        let mut wire = BytesMut::new();
        encode_var_u64(0x7ABC_DEF0_1234_56, &mut wire);
        wire.put_i64(0x0012_3ABC);
        encode_var_bytes(b"slow", &mut wire);

        let mut reader = NutReader::new(ByteByByteReader {
            bytes: wire.to_vec(),
            pos: 0,
        });

        assert_eq!(reader.read_var_u64().unwrap(), 0x7ABC_DEF0_1234_56);
        assert_eq!(reader.read_i64().unwrap(), 0x0012_3ABC);
        assert_eq!(reader.read_var_bytes().unwrap().as_ref(), b"slow");
        assert_eq!(reader.position(), 21);
    }

    #[test]
    fn interrupted_read_retries() {
        let mut reader = NutReader::new(FailOnceThenData {
            kind: ErrorKind::Interrupted,
            failed: false,
            bytes: vec![0x82, 0x64],
            pos: 0,
        });
        assert_eq!(reader.read_var_u64().unwrap(), 356);
    }

    #[test]
    fn source_fault_is_io_not_truncation() {
        let mut reader = NutReader::new(FailOnceThenData {
            kind: ErrorKind::BrokenPipe,
            failed: false,
            bytes: vec![0x01],
            pos: 0,
        });
        let err = reader.read_var_u64().unwrap_err();
        assert!(matches!(err, CodecError::Io(e) if e.kind() == ErrorKind::BrokenPipe));

        let mut reader = NutReader::new(FailOnceThenData {
            kind: ErrorKind::WouldBlock,
            failed: false,
            bytes: vec![0x01],
            pos: 0,
        });
        let err = reader.peek_u8().unwrap_err();
        assert!(matches!(err, CodecError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut reader = NutReader::new(Cursor::new(Vec::<u8>::new()));
        reader.set_max_field_len(8);
        assert_eq!(reader.config().max_field_len, 8);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    #[test]
    #[cfg(unix)]
    fn read_over_pipe_until_writer_closes() {
        let (mut left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut reader = NutReader::new(std::io::BufReader::new(right));

        let mut wire = BytesMut::new();
        encode_var_u64(356, &mut wire);
        wire.put_slice(b"ping\0");
        left.write_all(&wire).unwrap();
        drop(left);

        assert_eq!(reader.read_var_u64().unwrap(), 356);
        assert_eq!(reader.read_cstring().unwrap(), "ping");
        assert!(!reader.has_more_data().unwrap());
        assert_truncated(reader.read_u8());
    }

    #[test]
    #[cfg(unix)]
    fn closing_the_channel_unblocks_a_pending_read() {
        let (mut left, right) = std::os::unix::net::UnixStream::pair().unwrap();

        let reader_thread = std::thread::spawn(move || {
            let mut reader = NutReader::new(right);
            let result = reader.read_var_u64();
            (result.map_err(|err| err.is_truncated()), reader.position())
        });

        left.write_all(&[0x81]).unwrap();
        drop(left);

        let (result, position) = reader_thread.join().unwrap();
        assert_eq!(result, Err(true));
        assert_eq!(position, 0);
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }

            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct FailOnceThenData {
        kind: ErrorKind,
        failed: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for FailOnceThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(std::io::Error::from(self.kind));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
