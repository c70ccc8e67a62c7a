//! The tools module provides the per-block transforms and helpers of bwzip.
//!
//! The tools are:
//! - cli: Command line interface for bwzip.
//! - freq_count: Byte frequency counts.
//! - mtf: Move-To-Front transform.
//! - options: Archive settings (block size, BWT algorithm, transform chain).
//! - rle: Run-length tokens (runs and literals) and their serialized form.
//! - varint: Variable length integers used by the token and block framing.
//!
pub mod cli;
pub mod freq_count;
pub mod mtf;
pub mod options;
pub mod rle;
pub mod varint;
