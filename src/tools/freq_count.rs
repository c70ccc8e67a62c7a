/// Returns a frequency count of every byte value in the input data.
pub fn freqs(data: &[u8]) -> [u64; 256] {
    let mut freqs = [0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

/// Returns the byte values present in the data, in the order each was first seen.
pub fn first_seen_order(data: &[u8]) -> Vec<u8> {
    let mut seen = [false; 256];
    let mut order = Vec::with_capacity(256);
    for &byte in data {
        if !seen[byte as usize] {
            seen[byte as usize] = true;
            order.push(byte);
        }
    }
    order
}

#[test]
fn freqs_test() {
    let f = freqs(b"abracadabra");
    assert_eq!(f[b'a' as usize], 5);
    assert_eq!(f[b'b' as usize], 2);
    assert_eq!(f[b'z' as usize], 0);
    assert_eq!(f.iter().sum::<u64>(), 11);
}

#[test]
fn first_seen_order_test() {
    assert_eq!(first_seen_order(b"abracadabra"), b"abrcd".to_vec());
    assert!(first_seen_order(&[]).is_empty());
}
