//! The huffman module is the entropy coding stage of bwzip.
//!
//! Unlike bzip2, which switches between up to six tables every 50 symbols, bwzip codes the
//! whole pre-entropy buffer with one Huffman tree. The tree itself is never stored. The
//! archive header carries the symbol frequencies and the decoder rebuilds the identical tree
//! from them, so the tie-break rule used while merging nodes is part of the format.
//!
//! Frequencies above 255 are rescaled before they are written. The tree is built from the
//! rescaled values on both sides, which costs a little compression and keeps the table
//! small.
//!

pub mod header;
pub mod huffman;
