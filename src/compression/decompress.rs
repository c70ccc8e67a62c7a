use log::{debug, info, warn};

use super::compress::write_output;
use super::compress_block::decompress_block;
use crate::error::Result;
use crate::huffman_coding::huffman::huf_decode;
use crate::tools::cli::{BwzOpts, Output};
use crate::tools::options::Method;
use crate::tools::rle::{read_tokens, rle_decode};

use std::{
    fs,
    io::{self, Read, Write},
};

/// Decompress an archive made with the full chain.
pub fn decompress(archive: &[u8]) -> Result<Vec<u8>> {
    decompress_with(archive, Method::Full)
}

/// Decompress an archive made with `method`.
pub fn decompress_with(archive: &[u8], method: Method) -> Result<Vec<u8>> {
    let output = match method {
        Method::Full => {
            let flat = huf_decode(archive)?;
            decompress_blocks(&flat, true)?
        }
        Method::BwtRle => decompress_blocks(archive, false)?,
        Method::Rle => rle_decode(&read_tokens(archive)?),
        Method::Huffman => huf_decode(archive)?,
    };
    debug!(
        "{}: {} archive bytes restored to {}",
        method,
        archive.len(),
        output.len()
    );
    Ok(output)
}

/// Decode block segments until the flat buffer is used up.
fn decompress_blocks(flat: &[u8], use_mtf: bool) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(flat.len() * 2);
    let mut pos = 0;
    let mut block_counter = 0;

    while pos < flat.len() {
        block_counter += 1;
        let (block, next) = decompress_block(flat, pos, block_counter, use_mtf)?;
        output.extend_from_slice(&block);
        pos = next;
    }
    debug!("Restored {} blocks", block_counter);
    Ok(output)
}

/// Read a whole archive from the source and write the restored data to the sink.
pub fn decompress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    method: Method,
) -> Result<usize> {
    let mut archive = Vec::new();
    reader.read_to_end(&mut archive)?;
    let output = decompress_with(&archive, method)?;
    writer.write_all(&output)?;
    writer.flush()?;
    Ok(output.len())
}

/// Name of the restored file: the archive name without the method's extension, or with
/// ".out" added when the extension does not match.
pub fn output_name(fname: &str, method: Method) -> String {
    let suffix = format!(".{}", method.extension());
    match fname.strip_suffix(&suffix) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => {
            warn!("{} does not end in {}, writing {}.out", fname, suffix, fname);
            format!("{}.out", fname)
        }
    }
}

/// Decompress the file named `fname` using the settings in opts.
pub fn decompress_file(fname: &str, opts: &BwzOpts) -> Result<()> {
    info!("Decompressing {}", fname);
    let archive = fs::read(fname)?;
    let output = decompress_with(&archive, opts.codec.method)?;

    match opts.output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&output)?;
            stdout.flush()?;
        }
        Output::File => {
            let out_name = output_name(fname, opts.codec.method);
            write_output(&out_name, &output, opts.force_overwrite)?;
            info!("Wrote {} ({} bytes)", out_name, output.len());
            if !opts.keep_input_files {
                fs::remove_file(fname)?;
                debug!("Removed {}", fname);
            }
        }
    }
    Ok(())
}

/// Check that the file named `fname` decompresses, discarding the output.
pub fn test_file(fname: &str, opts: &BwzOpts) -> Result<()> {
    let archive = fs::read(fname)?;
    let output = decompress_with(&archive, opts.codec.method)?;
    info!("{}: ok ({} bytes)", fname, output.len());
    Ok(())
}
