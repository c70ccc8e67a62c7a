//! The bwt_algorithms module forms the sorting subsystem of bwzip.
//!
//! bwzip uses the Burrows-Wheeler Transform (BWT) to prepare each block for compression. This
//! transform reorders the block so that runs of similar bytes are more likely to occur, which
//! the move-to-front and run-length stages then turn into long runs of small values.
//!
//! The forward transform requires sorting every cyclic rotation of the block. Two sorts are
//! provided. They produce byte-identical output, so an archive does not record which one
//! was used.
//!
pub mod bwt_sort;

/// Define the rotation sorting algorithms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    /// Direct wraparound comparison sort. Fine for blocks of a few hundred bytes.
    Simple,
    /// Prefix doubling rank sort. Scales to large blocks.
    #[default]
    Doubling,
}
