//! bwzip, a block-sorting byte compressor.
//!
//! Version 0.1.0
//!
//! Every block of the input goes through a Burrows-Wheeler transform, a move-to-front
//! recoding and a run-length coder. The per-block results are concatenated and the whole
//! buffer is Huffman coded once, with the symbol frequencies stored in the archive header.
//!
//! Every stage is exactly invertible, so `decompress(&compress(data, n)?)?` returns `data`
//! for any block size `n`.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> bwzip -z test.txt`
//!
//! This will compress the file and create the file test.txt.bwt_mtf_rle_ha.
//! The original file will be deleted unless `-k` is given.
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use bwt_algorithms::Algorithm;
pub use compression::compress::{
    compress, compress_file, compress_stream, compress_with, compress_with_stats, CompressStats,
};
pub use compression::decompress::{
    decompress, decompress_file, decompress_stream, decompress_with, test_file,
};
pub use error::{Error, Result};
pub use tools::options::{CodecOpts, Method};
