use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{debug, info};

use super::compress_block::compress_block;
use crate::error::{Error, Result};
use crate::huffman_coding::huffman::huf_encode;
use crate::tools::cli::{BwzOpts, Output};
use crate::tools::options::{CodecOpts, Method};
use crate::tools::rle::{rle_encode, write_tokens};

/// Sizes recorded while compressing, for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompressStats {
    /// Number of blocks the input was split into
    pub blocks: usize,
    /// Raw input length
    pub input_len: usize,
    /// Length of the data handed to the final stage (the pre-entropy buffer for Full)
    pub flat_len: usize,
    /// Length of the finished archive
    pub archive_len: usize,
}

/// Compress with the full BWT, MTF, RLE and Huffman chain.
pub fn compress(input: &[u8], block_size: usize) -> Result<Vec<u8>> {
    let opts = CodecOpts {
        block_size,
        ..CodecOpts::new()
    };
    compress_with(input, &opts)
}

/// Compress with the chain and settings in opts.
pub fn compress_with(input: &[u8], opts: &CodecOpts) -> Result<Vec<u8>> {
    compress_with_stats(input, opts).map(|(archive, _)| archive)
}

/// Compress and report the sizes seen along the way.
pub fn compress_with_stats(input: &[u8], opts: &CodecOpts) -> Result<(Vec<u8>, CompressStats)> {
    let mut stats = CompressStats {
        input_len: input.len(),
        ..Default::default()
    };

    let archive = match opts.method {
        Method::Full => {
            let flat = compress_blocks(input, opts, true, &mut stats)?;
            stats.flat_len = flat.len();
            huf_encode(&flat)?
        }
        Method::BwtRle => {
            let flat = compress_blocks(input, opts, false, &mut stats)?;
            stats.flat_len = flat.len();
            flat
        }
        Method::Rle => {
            if u32::try_from(input.len()).is_err() {
                return Err(Error::DataTooLarge(input.len()));
            }
            let mut out = Vec::with_capacity(input.len());
            write_tokens(&rle_encode(input), &mut out);
            stats.blocks = (!input.is_empty()) as usize;
            stats.flat_len = input.len();
            out
        }
        Method::Huffman => {
            stats.blocks = (!input.is_empty()) as usize;
            stats.flat_len = input.len();
            huf_encode(input)?
        }
    };
    stats.archive_len = archive.len();

    debug!(
        "{}: {} bytes in {} blocks, {} before the last stage, {} out",
        opts.method, stats.input_len, stats.blocks, stats.flat_len, stats.archive_len
    );
    Ok((archive, stats))
}

/// Split the input into blocks and append every block segment to one flat buffer.
fn compress_blocks(
    input: &[u8],
    opts: &CodecOpts,
    use_mtf: bool,
    stats: &mut CompressStats,
) -> Result<Vec<u8>> {
    if opts.block_size == 0 {
        return Err(Error::InvalidBlockSize(opts.block_size));
    }
    let mut flat = Vec::with_capacity(input.len() + input.len() / 8 + 16);
    for (i, block) in input.chunks(opts.block_size).enumerate() {
        compress_block(block, i + 1, opts.algorithm, use_mtf, &mut flat)?;
        stats.blocks += 1;
    }
    Ok(flat)
}

/// Read the whole source, compress it and write the archive to the sink.
pub fn compress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    opts: &CodecOpts,
) -> Result<CompressStats> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let (archive, stats) = compress_with_stats(&input, opts)?;
    writer.write_all(&archive)?;
    writer.flush()?;
    Ok(stats)
}

/// Compress the file named `fname` using the settings in opts. The archive is written
/// next to it with the method's extension appended, or to stdout.
pub fn compress_file(fname: &str, opts: &BwzOpts) -> Result<()> {
    info!("Compressing {}", fname);
    let input = fs::read(fname)?;
    let (archive, stats) = compress_with_stats(&input, &opts.codec)?;

    match opts.output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&archive)?;
            stdout.flush()?;
        }
        Output::File => {
            let out_name = format!("{}.{}", fname, opts.codec.method.extension());
            write_output(&out_name, &archive, opts.force_overwrite)?;
            info!("Wrote {}", out_name);
            if !opts.keep_input_files {
                fs::remove_file(fname)?;
                debug!("Removed {}", fname);
            }
        }
    }

    info!(
        "{}: {} -> {} bytes ({:.1}%) in {} blocks",
        fname,
        stats.input_len,
        stats.archive_len,
        ratio(stats.archive_len, stats.input_len),
        stats.blocks
    );
    Ok(())
}

/// Write data to a new file, refusing to replace an existing one unless forced.
pub(crate) fn write_output(out_name: &str, data: &[u8], force: bool) -> Result<()> {
    if !force && Path::new(out_name).exists() {
        return Err(Error::OutputExists(out_name.to_string()));
    }
    fs::write(out_name, data)?;
    Ok(())
}

/// Output size as a percentage of the input size.
fn ratio(out: usize, input: usize) -> f64 {
    if input == 0 {
        return 0.0;
    }
    out as f64 * 100.0 / input as f64
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bwt_algorithms::Algorithm;

    #[test]
    fn empty_input_test() {
        let (archive, stats) = compress_with_stats(&[], &CodecOpts::new()).unwrap();
        assert_eq!(archive, vec![0; 6]);
        assert_eq!(stats.blocks, 0);
        assert_eq!(stats.flat_len, 0);
    }

    #[test]
    fn block_count_test() {
        let opts = CodecOpts {
            block_size: 64,
            ..CodecOpts::new()
        };
        let (_, stats) = compress_with_stats(&[0_u8; 300], &opts).unwrap();
        assert_eq!(stats.blocks, 5);
        assert_eq!(stats.input_len, 300);
    }

    #[test]
    fn zero_block_size_test() {
        assert!(matches!(
            compress(b"abc", 0),
            Err(Error::InvalidBlockSize(0))
        ));
    }

    #[test]
    fn algorithms_make_same_archive_test() {
        let data = b"she sells sea shells by the sea shore".repeat(4);
        let mut simple = CodecOpts::new();
        simple.block_size = 50;
        simple.algorithm = Algorithm::Simple;
        let mut doubling = simple.clone();
        doubling.algorithm = Algorithm::Doubling;
        assert_eq!(
            compress_with(&data, &simple).unwrap(),
            compress_with(&data, &doubling).unwrap()
        );
    }

    #[test]
    fn rle_method_test() {
        let opts = CodecOpts {
            method: Method::Rle,
            ..CodecOpts::new()
        };
        assert_eq!(
            compress_with(b"aaab", &opts).unwrap(),
            vec![1, 3, b'a', 0, 1, b'b']
        );
    }

    #[test]
    fn ratio_test() {
        assert_eq!(ratio(50, 200), 25.0);
        assert_eq!(ratio(5, 0), 0.0);
    }
}
