use log::{debug, trace};

use crate::bwt_algorithms::bwt_sort::{bwt_decode, bwt_encode};
use crate::bwt_algorithms::Algorithm;
use crate::error::{Error, Result};
use crate::tools::mtf::{mtf_decode, mtf_encode};
use crate::tools::rle::{read_tokens, rle_decode, rle_encode, write_tokens};
use crate::tools::varint::{decode_varint, write_varint};

/// Bytes used by the rotation index at the start of every block segment.
const KEY_BYTES: usize = 4;

/*
    Every block becomes one segment of the flat buffer:
        4 bytes LE   BWT key (rank of the unrotated block)
        varint       length in bytes of the serialized tokens that follow
        tokens       flag byte, varint count, symbol or literal bytes
    The explicit length lets the decoder find the next segment without knowing
    the block size the data was compressed with.
*/

/// Called by compress, this runs one block through BWT, (optionally) MTF and RLE and
/// appends its segment to the flat buffer.
pub fn compress_block(
    block: &[u8],
    seq: usize,
    algorithm: Algorithm,
    use_mtf: bool,
    flat: &mut Vec<u8>,
) -> Result<()> {
    // The key is written as a u32, so the block length must fit one
    if u32::try_from(block.len()).is_err() {
        return Err(Error::BlockTooLarge(block.len()));
    }

    let (key, bwt) = bwt_encode(block, algorithm);
    let key = key as u32;

    let indices = if use_mtf { mtf_encode(&bwt) } else { bwt };
    let tokens = rle_encode(&indices);

    let mut segment = Vec::with_capacity(indices.len() + 8);
    write_tokens(&tokens, &mut segment);

    flat.extend_from_slice(&key.to_le_bytes());
    write_varint(flat, segment.len() as u64);
    flat.extend_from_slice(&segment);

    debug!(
        "Block {}: {} bytes, key {}, {} tokens in {} bytes",
        seq,
        block.len(),
        key,
        tokens.len(),
        segment.len()
    );
    Ok(())
}

/// Decode the block segment starting at `pos` of the flat buffer. Returns the block and
/// the position of the next segment.
pub fn decompress_block(
    flat: &[u8],
    pos: usize,
    seq: usize,
    use_mtf: bool,
) -> Result<(Vec<u8>, usize)> {
    let truncated = |offset: usize, needed: usize| Error::TruncatedBlock {
        offset,
        needed,
        available: flat.len().saturating_sub(offset),
    };

    // Get key (origin pointer)
    let key_bytes = flat
        .get(pos..pos + KEY_BYTES)
        .ok_or_else(|| truncated(pos, KEY_BYTES))?;
    let mut raw = [0_u8; KEY_BYTES];
    raw.copy_from_slice(key_bytes);
    let key = u32::from_le_bytes(raw) as usize;
    let mut pos = pos + KEY_BYTES;

    // Get the segment length
    let (seg_len, used) = match decode_varint(&flat[pos..]) {
        Ok(decoded) => decoded,
        Err(Error::TruncatedVarInt(have)) => return Err(truncated(pos, have + 1)),
        Err(e) => return Err(e),
    };
    pos += used;
    let seg_len = usize::try_from(seg_len).map_err(|_| truncated(pos, usize::MAX))?;
    let segment = flat
        .get(pos..pos.saturating_add(seg_len))
        .ok_or_else(|| truncated(pos, seg_len))?;
    pos += seg_len;

    trace!("Block {}: key {}, segment of {} bytes", seq, key, seg_len);

    // Undo the RLE, the MTF and finally the BWT
    let tokens = read_tokens(segment)?;
    let indices = rle_decode(&tokens);
    let bwt = if use_mtf { mtf_decode(&indices) } else { indices };
    let block = bwt_decode(key, &bwt)?;

    debug!("Block {}: restored {} bytes", seq, block.len());
    Ok((block, pos))
}
