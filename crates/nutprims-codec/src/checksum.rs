//! Running CRC-32 over a span of written bytes.
//!
//! NUT checksums use the 0x04C11DB7 polynomial fed most-significant bit
//! first, starting from zero with no final XOR (ffmpeg's `AV_CRC_32_IEEE`
//! with a zero seed). This is not the reflected zlib CRC-32.

use crc::{Algorithm, Crc, Digest};

/// Width of a checksum field on the wire.
pub const CHECKSUM_SIZE: usize = 4;

/// CRC parameters for NUT checksum fields.
pub const NUT_CRC_ALGORITHM: Algorithm<u32> = Algorithm {
    width: 32,
    poly: 0x04C1_1DB7,
    init: 0,
    refin: false,
    refout: false,
    xorout: 0,
    check: 0x89A1_897F,
    residue: 0,
};

static NUT_CRC: Crc<u32> = Crc::<u32>::new(&NUT_CRC_ALGORITHM);

/// NUT CRC-32 of a complete buffer.
pub fn checksum(data: &[u8]) -> u32 {
    NUT_CRC.checksum(data)
}

/// Incremental NUT CRC-32 of everything fed since the last checkpoint.
#[derive(Clone)]
pub struct RunningChecksum {
    digest: Digest<'static, u32>,
    covered: u64,
}

impl Default for RunningChecksum {
    fn default() -> Self {
        Self {
            digest: NUT_CRC.digest(),
            covered: 0,
        }
    }
}

impl std::fmt::Debug for RunningChecksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunningChecksum")
            .field("value", &self.value())
            .field("covered", &self.covered)
            .finish()
    }
}

impl RunningChecksum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the current span.
    pub fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
        self.covered += data.len() as u64;
    }

    /// CRC of the current span, without ending it.
    pub fn value(&self) -> u32 {
        self.digest.clone().finalize()
    }

    /// Number of bytes in the current span.
    pub fn bytes_covered(&self) -> u64 {
        self.covered
    }

    /// End the current span: return its CRC and start a new, empty one.
    pub fn take(&mut self) -> u32 {
        let done = std::mem::take(self);
        done.digest.finalize()
    }
}
