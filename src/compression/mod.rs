//! The compression module manages both directions of bwzip.
//!
//! Compression happens in the following steps:
//! - Split the input into blocks of at most block_size bytes.
//! - Burrows Wheeler Transform: Sort the rotations of each block to group similar bytes together.
//! - Move To Front transform: Turn those groups into runs of small values, mostly zeros.
//! - Run Length Encoding: Code each block as runs and literal stretches.
//! - Huffman coding: Code the concatenation of every block segment with a single tree.
//!
//! Each block segment records its BWT key and its length, so blocks can be separated again
//! after Huffman decoding without knowing the block size.
//!
//! Decompression follows the inverse of the compression process.
//! - Huffman decoding of the flat buffer.
//! - For each segment: RLE expansion, MTF reversal, BWT reversal.
//!

pub mod compress;
pub mod compress_block;
pub mod decompress;
