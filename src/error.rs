use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Archive header errors
    #[error("Truncated header: needed {needed} bytes at offset {offset}, only {available} left")]
    TruncatedHeader {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Header declares {data_length} data bytes but an empty symbol table")]
    EmptySymbolTable { data_length: u32 },

    // Entropy coding errors
    #[error("Truncated bitstream: decoded {decoded} of {expected} symbols")]
    TruncatedBitstream { decoded: usize, expected: usize },

    #[error("Symbol 0x{0:02x} has no Huffman code")]
    UnknownSymbol(u8),

    #[error("Data of {0} bytes exceeds the 32 bit length field")]
    DataTooLarge(usize),

    #[error("Huffman code of {0} bits does not fit the code register")]
    CodeTooLong(usize),

    // Variable-length integer errors
    #[error("Truncated variable-length integer after {0} bytes")]
    TruncatedVarInt(usize),

    #[error("Variable-length integer overflows 64 bits")]
    VarIntOverflow,

    // Run-length token errors
    #[error("Truncated token at offset {offset}: needed {needed} bytes, only {available} left")]
    TruncatedToken {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid token flag 0x{flag:02x} at offset {offset}")]
    InvalidTokenFlag { flag: u8, offset: usize },

    #[error("Invalid token count {count} at offset {offset}")]
    InvalidTokenCount { count: u64, offset: usize },

    #[error("Token at offset {offset} expands the data beyond {limit} bytes")]
    ExpansionTooLarge { offset: usize, limit: u64 },

    // Block errors
    #[error("Truncated block segment at offset {offset}: needed {needed} bytes, only {available} left")]
    TruncatedBlock {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Rotation index {index} is out of range for a block of {len} bytes")]
    InvalidRotationIndex { index: usize, len: usize },

    #[error("Block of {0} bytes is too large for a 32 bit rotation index")]
    BlockTooLarge(usize),

    #[error("Invalid block size: {0} (must be at least 1)")]
    InvalidBlockSize(usize),

    // File handling errors
    #[error("Output file {0} already exists (use --force to overwrite)")]
    OutputExists(String),
}

pub type Result<T> = std::result::Result<T, Error>;
