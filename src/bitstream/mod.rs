//! The bitstream module forms the bit-level I/O subsystem of bwzip.
//!
//! The Huffman stage writes codes of arbitrary length, so the archive body is a stream of
//! bits rather than bytes. Both sides use the same convention: the first bit written lands
//! in the least significant bit of the first byte.
//!
//! This I/O subsystem is designed to interface with the huffman_coding module. It is not
//! intended for more general use.
//!
pub mod bitpacker;
pub mod bitreader;
