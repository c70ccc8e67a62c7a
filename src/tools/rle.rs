use super::varint::{decode_varint, write_varint};
use crate::error::{Error, Result};

const FLAG_LITERAL: u8 = 0;
const FLAG_RUN: u8 = 1;
/// Most values a token stream may expand to. Blocks and whole inputs are limited to a
/// u32 length when they are written.
pub const MAX_EXPANSION: u64 = u32::MAX as u64;

/// One unit of run-length coded data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `count` (at least 2) copies of `symbol`.
    Run { symbol: u8, count: usize },
    /// Values copied through unchanged, no two neighbours equal.
    Literal(Vec<u8>),
}

impl Token {
    /// How many values this token expands to.
    fn len(&self) -> usize {
        match self {
            Token::Run { count, .. } => *count,
            Token::Literal(bytes) => bytes.len(),
        }
    }
}

/// Split data into maximal runs of repeated values and the literal stretches between them.
pub fn rle_encode(data: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let end = data.len();
    let mut i = 0;

    while i < end {
        if i + 1 < end && data[i] == data[i + 1] {
            // A run: extend it as far as the repetition goes
            let symbol = data[i];
            let count = data[i..].iter().take_while(|&&b| b == symbol).count();
            tokens.push(Token::Run { symbol, count });
            i += count;
        } else {
            // A literal: stop in front of the next value that starts a run
            let mut j = i + 1;
            while j < end && (j + 1 == end || data[j] != data[j + 1]) {
                j += 1;
            }
            tokens.push(Token::Literal(data[i..j].to_vec()));
            i = j;
        }
    }
    tokens
}

/// Expand tokens back into the values they represent.
pub fn rle_decode(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tokens.iter().map(Token::len).sum());
    for token in tokens {
        match token {
            Token::Run { symbol, count } => out.resize(out.len() + count, *symbol),
            Token::Literal(bytes) => out.extend_from_slice(bytes),
        }
    }
    out
}

/// Serialize tokens as flag byte, varint count, then the symbol (run) or raw values (literal).
pub fn write_tokens(tokens: &[Token], out: &mut Vec<u8>) {
    for token in tokens {
        match token {
            Token::Run { symbol, count } => {
                out.push(FLAG_RUN);
                write_varint(out, *count as u64);
                out.push(*symbol);
            }
            Token::Literal(bytes) => {
                out.push(FLAG_LITERAL);
                write_varint(out, bytes.len() as u64);
                out.extend_from_slice(bytes);
            }
        }
    }
}

/// Add a token's count to the running expansion, refusing totals above MAX_EXPANSION.
fn grow(expanded: u64, count: u64, offset: usize) -> Result<u64> {
    expanded
        .checked_add(count)
        .filter(|&total| total <= MAX_EXPANSION)
        .ok_or(Error::ExpansionTooLarge {
            offset,
            limit: MAX_EXPANSION,
        })
}

/// Parse a complete serialized token segment. Every byte of `data` must belong to a token,
/// and the tokens together may not expand to more than MAX_EXPANSION values.
pub fn read_tokens(data: &[u8]) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut expanded = 0_u64;

    while pos < data.len() {
        let start = pos;
        let flag = data[pos];
        pos += 1;

        let (count, used) = match decode_varint(&data[pos..]) {
            Ok(decoded) => decoded,
            Err(Error::TruncatedVarInt(have)) => {
                return Err(Error::TruncatedToken {
                    offset: start,
                    needed: have + 1,
                    available: have,
                })
            }
            Err(e) => return Err(e),
        };
        pos += used;
        let available = data.len() - pos;

        match flag {
            FLAG_RUN => {
                if count < 2 {
                    return Err(Error::InvalidTokenCount {
                        count,
                        offset: start,
                    });
                }
                expanded = grow(expanded, count, start)?;
                let symbol = *data.get(pos).ok_or(Error::TruncatedToken {
                    offset: start,
                    needed: 1,
                    available,
                })?;
                pos += 1;
                let count = usize::try_from(count).map_err(|_| Error::ExpansionTooLarge {
                    offset: start,
                    limit: MAX_EXPANSION,
                })?;
                tokens.push(Token::Run { symbol, count });
            }
            FLAG_LITERAL => {
                if count == 0 {
                    return Err(Error::InvalidTokenCount {
                        count,
                        offset: start,
                    });
                }
                if count > available as u64 {
                    return Err(Error::TruncatedToken {
                        offset: start,
                        needed: count as usize,
                        available,
                    });
                }
                expanded = grow(expanded, count, start)?;
                let len = count as usize;
                tokens.push(Token::Literal(data[pos..pos + len].to_vec()));
                pos += len;
            }
            flag => return Err(Error::InvalidTokenFlag { flag, offset: start }),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod test {
    use super::*;

    fn round_trip(data: &[u8]) {
        let tokens = rle_encode(data);
        assert_eq!(rle_decode(&tokens), data);
        let mut buf = Vec::new();
        write_tokens(&tokens, &mut buf);
        assert_eq!(read_tokens(&buf).unwrap(), tokens);
    }

    #[test]
    fn no_repeats_test() {
        let data = [1, 2, 3, 4, 5];
        assert_eq!(rle_encode(&data), vec![Token::Literal(data.to_vec())]);
        round_trip(&data);
    }

    #[test]
    fn run_of_two_test() {
        let data = [4, 4];
        assert_eq!(rle_encode(&data), vec![Token::Run { symbol: 4, count: 2 }]);
        round_trip(&data);
    }

    #[test]
    fn mixed_test() {
        let data = [1, 2, 2, 3, 4, 4, 4, 5];
        assert_eq!(
            rle_encode(&data),
            vec![
                Token::Literal(vec![1]),
                Token::Run { symbol: 2, count: 2 },
                Token::Literal(vec![3]),
                Token::Run { symbol: 4, count: 3 },
                Token::Literal(vec![5]),
            ]
        );
        round_trip(&data);
    }

    #[test]
    fn alternating_test() {
        let data = (0..100)
            .flat_map(|i| if i % 2 == 0 { vec![i as u8; 3] } else { vec![i as u8, 0] })
            .collect::<Vec<u8>>();
        round_trip(&data);
    }

    #[test]
    fn long_runs_test() {
        for len in [255, 256, 16384] {
            let data = vec![9_u8; len];
            let tokens = rle_encode(&data);
            assert_eq!(tokens, vec![Token::Run { symbol: 9, count: len }]);
            round_trip(&data);
        }
        let mut data = vec![1_u8; 255];
        data.extend(vec![2_u8; 256]);
        data.push(3);
        round_trip(&data);
    }

    #[test]
    fn serialized_layout_test() {
        let mut buf = Vec::new();
        write_tokens(&rle_encode(&[5, 5, 5, 6, 7]), &mut buf);
        assert_eq!(buf, vec![1, 3, 5, 0, 2, 6, 7]);
    }

    #[test]
    fn empty_test() {
        assert!(rle_encode(&[]).is_empty());
        assert!(read_tokens(&[]).unwrap().is_empty());
    }

    #[test]
    fn truncated_literal_test() {
        // Literal claims 4 values, only 2 follow
        let result = read_tokens(&[0, 4, 1, 2]);
        assert!(matches!(
            result,
            Err(Error::TruncatedToken {
                offset: 0,
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn truncated_run_test() {
        assert!(matches!(
            read_tokens(&[1, 7]),
            Err(Error::TruncatedToken { .. })
        ));
        assert!(matches!(read_tokens(&[1]), Err(Error::TruncatedToken { .. })));
        assert!(matches!(
            read_tokens(&[1, 0x80]),
            Err(Error::TruncatedToken { .. })
        ));
    }

    #[test]
    fn oversized_run_test() {
        // A run of 2^60 copies in a few bytes
        let mut data = vec![FLAG_RUN];
        write_varint(&mut data, 1 << 60);
        data.push(7);
        assert!(matches!(
            read_tokens(&data),
            Err(Error::ExpansionTooLarge { offset: 0, .. })
        ));

        // One run at the limit is fine, a second token pushes past it
        let mut data = vec![FLAG_RUN];
        write_varint(&mut data, MAX_EXPANSION);
        data.push(7);
        assert_eq!(read_tokens(&data).unwrap().len(), 1);
        let at_limit = data.len();
        data.extend_from_slice(&[FLAG_LITERAL, 1, 8]);
        assert!(matches!(
            read_tokens(&data),
            Err(Error::ExpansionTooLarge { offset, .. }) if offset == at_limit
        ));
    }

    #[test]
    fn invalid_token_test() {
        assert!(matches!(
            read_tokens(&[2, 1, 0]),
            Err(Error::InvalidTokenFlag { flag: 2, offset: 0 })
        ));
        assert!(matches!(
            read_tokens(&[1, 1, 0]),
            Err(Error::InvalidTokenCount { count: 1, .. })
        ));
        assert!(matches!(
            read_tokens(&[0, 0]),
            Err(Error::InvalidTokenCount { count: 0, .. })
        ));
    }
}
