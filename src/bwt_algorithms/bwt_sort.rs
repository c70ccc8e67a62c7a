use super::Algorithm;
use crate::error::{Error, Result};
use crate::tools::freq_count::freqs;
use log::trace;
use std::cmp::Ordering;

/// Burrows-Wheeler-Transform of one block. Sorts every cyclic rotation of the block and
/// returns the rank of the unrotated block (the key) and the last byte of each sorted rotation.
///
/// Rotations that are completely identical (periodic blocks such as "abab") keep their
/// original index order. Both algorithms give byte-identical results.
pub fn bwt_encode(block: &[u8], algorithm: Algorithm) -> (usize, Vec<u8>) {
    let end = block.len();
    if end == 0 {
        return (0, Vec::new());
    }

    let index = match algorithm {
        Algorithm::Simple => simple_sort(block),
        Algorithm::Doubling => doubling_sort(block),
    };

    // Get key and BWT output
    let mut key = 0;
    let mut bwt = Vec::with_capacity(end);
    for (i, &rotation) in index.iter().enumerate() {
        if rotation == 0 {
            key = i;
        }
        bwt.push(block[(rotation + end - 1) % end]);
    }
    trace!("BWT key is {} for {} bytes", key, end);
    (key, bwt)
}

/// Sort rotation start positions by direct comparison. Stable, so equal rotations stay in
/// index order.
fn simple_sort(block: &[u8]) -> Vec<usize> {
    let mut index = (0..block.len()).collect::<Vec<usize>>();
    index.sort_by(|a, b| block_compare(*a, *b, block));
    index
}

/// Compare the rotations starting at a and b, wrapping around the end of the block.
fn block_compare(a: usize, b: usize, block: &[u8]) -> Ordering {
    let min = std::cmp::min(block[a..].len(), block[b..].len());

    // Lexicographical comparison up to the first wrap
    let mut result = block[a..a + min].cmp(&block[b..b + min]);

    // Implement wraparound if needed
    if result == Ordering::Equal {
        if a < b {
            let to_end = block.len() - a - min;
            result = block[(a + min)..].cmp(&block[..to_end]);
            if result == Ordering::Equal {
                let rest_of_block = block.len() - to_end - min;
                return block[..rest_of_block].cmp(&block[to_end..(to_end + rest_of_block)]);
            }
        } else {
            let to_end = block.len() - b - min;
            result = block[..to_end].cmp(&block[(b + min)..]);
            if result == Ordering::Equal {
                let rest_of_block = block.len() - to_end - min;
                return block[to_end..(to_end + rest_of_block)].cmp(&block[..rest_of_block]);
            }
        }
    }
    result
}

/*
Prefix doubling: after the pass with step k, rank[i] orders the rotations at i by their
first 2k bytes. Once 2k reaches the block length the ranks order complete rotations.
Every pass is a stable sort keyed on (rank[i], rank[i + k]), and the index starts in
ascending order, so rotations that never separate keep their original index order just
like simple_sort.
*/
fn doubling_sort(block: &[u8]) -> Vec<usize> {
    let end = block.len();
    let mut index = (0..end).collect::<Vec<usize>>();
    let mut rank = block.iter().map(|&b| b as usize).collect::<Vec<usize>>();
    let mut next_rank = vec![0_usize; end];

    index.sort_by_key(|&i| rank[i]);

    let mut k = 1;
    while k < end {
        let pair = |i: usize| (rank[i], rank[(i + k) % end]);
        index.sort_by_key(|&i| pair(i));

        // Re-rank: equal pairs share a rank
        next_rank[index[0]] = 0;
        for w in 1..end {
            let bump = (pair(index[w - 1]) != pair(index[w])) as usize;
            next_rank[index[w]] = next_rank[index[w - 1]] + bump;
        }
        std::mem::swap(&mut rank, &mut next_rank);

        // Every rotation already distinct
        if rank[index[end - 1]] == end - 1 {
            break;
        }
        k *= 2;
    }
    index
}

/// Decode a Burrows-Wheeler-Transform in linear time using a counting sort.
pub fn bwt_decode(key: usize, bwt_in: &[u8]) -> Result<Vec<u8>> {
    // Calculate end once.
    let end = bwt_in.len();
    if key >= end && !(key == 0 && end == 0) {
        return Err(Error::InvalidRotationIndex { index: key, len: end });
    }

    // Convert frequency count to the first position of each byte value in the sorted column
    let freq_in = freqs(bwt_in);
    let mut freq = [0_usize; 256];
    for i in 0..255 {
        freq[i + 1] = freq[i] + freq_in[i] as usize;
    }

    // Build the transformation vector to find the next character in the original data
    let mut t_vec = vec![0_usize; end];
    for (i, &s) in bwt_in.iter().enumerate() {
        t_vec[freq[s as usize]] = i;
        freq[s as usize] += 1
    }

    // Walk the successor table from the key
    let mut data = Vec::with_capacity(end);
    let mut j = key;
    for _ in 0..end {
        j = t_vec[j];
        data.push(bwt_in[j]);
    }
    Ok(data)
}

#[cfg(test)]
mod test {
    use super::*;

    const ALGORITHMS: [Algorithm; 2] = [Algorithm::Simple, Algorithm::Doubling];

    #[test]
    fn banana_test() {
        for algorithm in ALGORITHMS {
            let (key, bwt) = bwt_encode(b"banana", algorithm);
            assert_eq!(bwt, b"nnbaaa".to_vec());
            assert_eq!(key, 3);
            assert_eq!(bwt_decode(key, &bwt).unwrap(), b"banana".to_vec());
        }
    }

    #[test]
    fn degenerate_test() {
        for algorithm in ALGORITHMS {
            assert_eq!(bwt_encode(&[], algorithm), (0, vec![]));
            assert_eq!(bwt_encode(&[42], algorithm), (0, vec![42]));
            assert_eq!(bwt_encode(&[7; 20], algorithm), (0, vec![7; 20]));
        }
        assert_eq!(bwt_decode(0, &[]).unwrap(), Vec::<u8>::new());
        assert_eq!(bwt_decode(0, &[42]).unwrap(), vec![42]);
        assert_eq!(bwt_decode(0, &[7; 20]).unwrap(), vec![7; 20]);
    }

    #[test]
    fn periodic_block_test() {
        // Rotation 0 equals rotation 3, stable ordering puts 0 first.
        for algorithm in ALGORITHMS {
            let (key, bwt) = bwt_encode(b"abcabc", algorithm);
            assert_eq!(key, 0);
            assert_eq!(bwt, b"ccaabb".to_vec());
            assert_eq!(bwt_decode(key, &bwt).unwrap(), b"abcabc".to_vec());
        }
    }

    #[test]
    fn algorithms_agree_test() {
        let mut state = 0x2545_f491_u32;
        for len in 0..200 {
            let block = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    (state % 4) as u8 + b'a'
                })
                .collect::<Vec<u8>>();
            let simple = bwt_encode(&block, Algorithm::Simple);
            let doubling = bwt_encode(&block, Algorithm::Doubling);
            assert_eq!(simple, doubling, "block {:?}", block);
            assert_eq!(bwt_decode(simple.0, &simple.1).unwrap(), block);
        }
    }

    #[test]
    fn every_byte_value_test() {
        let block = (0..=255_u8).rev().chain(0..=255).collect::<Vec<u8>>();
        for algorithm in ALGORITHMS {
            let (key, bwt) = bwt_encode(&block, algorithm);
            assert_eq!(bwt_decode(key, &bwt).unwrap(), block);
        }
    }

    #[test]
    fn invalid_key_test() {
        assert!(matches!(
            bwt_decode(3, b"abc"),
            Err(Error::InvalidRotationIndex { index: 3, len: 3 })
        ));
        assert!(matches!(
            bwt_decode(1, &[]),
            Err(Error::InvalidRotationIndex { index: 1, len: 0 })
        ));
    }
}
