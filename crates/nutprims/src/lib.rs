//! NUT container primitives for exchanging data with external media tools.
//!
//! nutprims encodes and decodes the low-level NUT wire primitives (varints,
//! zigzag integers, strings, muxed timestamps, CRC-32 checkpoints) over any
//! byte pipe, tracking how many bytes each element occupied.
//!
//! # Crate Structure
//!
//! - [`codec`] — `NutReader`/`NutWriter` and the buffer-level primitives
//!
//! The `cli` feature builds the `nutprims` binary for encoding and inspecting
//! primitive streams by hand.

/// Re-export codec types.
pub mod codec {
    pub use nutprims_codec::*;
}
