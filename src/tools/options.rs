use crate::bwt_algorithms::Algorithm;
use std::{fmt::Display, fmt::Formatter};

/// Default block size in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Which chain of transforms to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    /// BWT, move-to-front, run-length tokens, then Huffman coding
    #[default]
    Full,
    /// BWT and run-length tokens only
    BwtRle,
    /// Run-length tokens only
    Rle,
    /// Huffman coding only
    Huffman,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Full, Method::BwtRle, Method::Rle, Method::Huffman];

    /// File extension for archives made with this method
    pub fn extension(&self) -> &'static str {
        match self {
            Method::Full => "bwt_mtf_rle_ha",
            Method::BwtRle => "bwt_rle",
            Method::Rle => "rle",
            Method::Huffman => "ha",
        }
    }

    /// Find the method whose extension is `ext`
    pub fn from_extension(ext: &str) -> Option<Method> {
        Method::ALL.into_iter().find(|m| m.extension() == ext)
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Settings that shape the archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOpts {
    /// Maximum input block size to process during each loop
    pub block_size: usize,
    /// Rotation sort used by the BWT
    pub algorithm: Algorithm,
    /// Transform chain
    pub method: Method,
}

impl CodecOpts {
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            algorithm: Algorithm::Doubling,
            method: Method::Full,
        }
    }
}

impl Default for CodecOpts {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn extension_test() {
    for method in Method::ALL {
        assert_eq!(Method::from_extension(method.extension()), Some(method));
    }
    assert_eq!(Method::from_extension("bz2"), None);
}
