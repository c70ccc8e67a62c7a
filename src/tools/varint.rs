use crate::error::{Error, Result};

const MORE: u8 = 0x80;
const GROUP_MASK: u64 = 0x7f;

/// Append `value` to `out` in 7 bit groups, least significant group first. Every byte but
/// the last has the high bit set.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    while value > GROUP_MASK {
        out.push((value & GROUP_MASK) as u8 | MORE);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Decode a varint from the front of `data`. Returns the value and how many bytes it used.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0_u64;
    let mut shift = 0_u32;
    for (i, &byte) in data.iter().enumerate() {
        let group = (byte as u64) & GROUP_MASK;
        // Reject groups whose bits would fall off the top of a u64
        if shift >= 64 || (shift > 0 && group >> (64 - shift) != 0) {
            return Err(Error::VarIntOverflow);
        }
        value |= group << shift;
        if byte & MORE == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }
    Err(Error::TruncatedVarInt(data.len()))
}
