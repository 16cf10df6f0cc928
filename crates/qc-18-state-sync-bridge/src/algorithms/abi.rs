//! # Contract ABI Parameter Codec
//!
//! Minimal head/tail encoder and strict reader for the layouts the bridge
//! exchanges: 32-byte big-endian words, left-padded addresses, and
//! length-prefixed dynamic `bytes`/`string` values referenced by offset.

use crate::domain::{Address, BridgeError, BridgeResult, Hash, U256};

/// ABI word size in bytes.
pub const WORD: usize = 32;

/// A single ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `uint256` (also used for narrower unsigned ints).
    Uint(U256),
    /// `address`.
    Address(Address),
    /// `bytes32`.
    FixedBytes(Hash),
    /// `bytes`.
    Bytes(Vec<u8>),
    /// `string`.
    String(String),
}

impl Token {
    /// Dynamic tokens live in the tail and are referenced by offset.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Token::Bytes(_) | Token::String(_))
    }
}

fn uint_word(value: &U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn push_dynamic(tail: &mut Vec<u8>, data: &[u8]) {
    tail.extend_from_slice(&uint_word(&U256::from(data.len() as u64)));
    tail.extend_from_slice(data);
    tail.resize(tail.len() + padded_len(data.len()) - data.len(), 0);
}

/// Encode tokens as a parameter list (`abi.encode(a, b, ...)`).
pub fn encode_params(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Uint(value) => head.extend_from_slice(&uint_word(value)),
            Token::Address(address) => {
                head.extend_from_slice(&[0u8; 12]);
                head.extend_from_slice(address.as_bytes());
            }
            Token::FixedBytes(word) => head.extend_from_slice(word.as_bytes()),
            Token::Bytes(data) => {
                head.extend_from_slice(&uint_word(&U256::from((head_len + tail.len()) as u64)));
                push_dynamic(&mut tail, data);
            }
            Token::String(text) => {
                head.extend_from_slice(&uint_word(&U256::from((head_len + tail.len()) as u64)));
                push_dynamic(&mut tail, text.as_bytes());
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Strict reader over an encoded parameter list.
///
/// Head words are addressed by parameter index. Every read is bounds-checked
/// and fails with `MalformedProof` instead of truncating.
#[derive(Clone, Copy, Debug)]
pub struct AbiReader<'a> {
    data: &'a [u8],
}

impl<'a> AbiReader<'a> {
    /// Wrap encoded bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total encoded length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for an empty buffer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn word_at(&self, offset: usize) -> BridgeResult<&'a [u8]> {
        offset
            .checked_add(WORD)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| {
                BridgeError::malformed(format!(
                    "word at offset {offset} exceeds {} bytes",
                    self.data.len()
                ))
            })
    }

    fn word(&self, index: usize) -> BridgeResult<&'a [u8]> {
        let offset = index
            .checked_mul(WORD)
            .ok_or_else(|| BridgeError::malformed("parameter index overflow"))?;
        self.word_at(offset)
    }

    fn word_as_usize(word: &[u8], what: &str) -> BridgeResult<usize> {
        let value = U256::from_big_endian(word);
        if value.bits() > 64 {
            return Err(BridgeError::malformed(format!("{what} {value} out of range")));
        }
        usize::try_from(value.low_u64())
            .map_err(|_| BridgeError::malformed(format!("{what} {value} out of range")))
    }

    /// `uint256` at `index`.
    pub fn uint(&self, index: usize) -> BridgeResult<U256> {
        Ok(U256::from_big_endian(self.word(index)?))
    }

    /// `uint64` at `index`; wider values are rejected.
    pub fn uint64(&self, index: usize) -> BridgeResult<u64> {
        let value = self.uint(index)?;
        if value.bits() > 64 {
            return Err(BridgeError::malformed(format!(
                "parameter {index} does not fit uint64"
            )));
        }
        Ok(value.low_u64())
    }

    /// `address` at `index`; the 12 padding bytes must be zero.
    pub fn address(&self, index: usize) -> BridgeResult<Address> {
        let word = self.word(index)?;
        if word[..12].iter().any(|b| *b != 0) {
            return Err(BridgeError::malformed(format!(
                "parameter {index} has dirty address padding"
            )));
        }
        Address::from_slice(&word[12..])
            .ok_or_else(|| BridgeError::malformed("address width"))
    }

    /// `bytes32` at `index`.
    pub fn fixed_bytes(&self, index: usize) -> BridgeResult<Hash> {
        let word = self.word(index)?;
        let mut out = [0u8; WORD];
        out.copy_from_slice(word);
        Ok(Hash(out))
    }

    /// `bytes` referenced by the offset at `index`.
    pub fn bytes(&self, index: usize) -> BridgeResult<Vec<u8>> {
        let offset = Self::word_as_usize(self.word(index)?, "offset")?;
        let len = Self::word_as_usize(self.word_at(offset)?, "length")?;
        let start = offset + WORD;
        let end = start
            .checked_add(len)
            .ok_or_else(|| BridgeError::malformed("length overflow"))?;
        let padded_end = start
            .checked_add(padded_len(len))
            .ok_or_else(|| BridgeError::malformed("length overflow"))?;
        if padded_end > self.data.len() {
            return Err(BridgeError::malformed(format!(
                "parameter {index} needs {padded_end} bytes, have {}",
                self.data.len()
            )));
        }
        if self.data[end..padded_end].iter().any(|b| *b != 0) {
            return Err(BridgeError::malformed(format!(
                "parameter {index} has dirty tail padding"
            )));
        }
        Ok(self.data[start..end].to_vec())
    }

    /// `string` referenced by the offset at `index`; must be UTF-8.
    pub fn string(&self, index: usize) -> BridgeResult<String> {
        String::from_utf8(self.bytes(index)?)
            .map_err(|e| BridgeError::malformed(format!("parameter {index}: {e}")))
    }

    /// Require exactly `words` head words and nothing after them.
    pub fn expect_static_len(&self, words: usize) -> BridgeResult<()> {
        if self.data.len() != words * WORD {
            return Err(BridgeError::malformed(format!(
                "expected {} bytes, got {}",
                words * WORD,
                self.data.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_params_layout() {
        let encoded = encode_params(&[
            Token::Uint(U256::from(5u64)),
            Token::Address(Address::new([0xAA; 20])),
            Token::FixedBytes(Hash([0x11; 32])),
        ]);
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 5);
        assert_eq!(&encoded[32..44], &[0u8; 12]);
        assert_eq!(&encoded[44..64], &[0xAA; 20]);
    }

    #[test]
    fn test_dynamic_params_layout() {
        let encoded = encode_params(&[
            Token::Uint(U256::one()),
            Token::String("abc".to_string()),
        ]);
        // head (2 words) + length word + one padded data word
        assert_eq!(encoded.len(), 4 * WORD);
        assert_eq!(encoded[63], 0x40);
        assert_eq!(encoded[95], 3);
        assert_eq!(&encoded[96..99], b"abc");

        let reader = AbiReader::new(&encoded);
        assert_eq!(reader.uint(0).unwrap(), U256::one());
        assert_eq!(reader.string(1).unwrap(), "abc");
    }

    #[test]
    fn test_empty_bytes_have_no_data_word() {
        let encoded = encode_params(&[Token::Bytes(vec![])]);
        assert_eq!(encoded.len(), 2 * WORD);
        assert_eq!(AbiReader::new(&encoded).bytes(0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_truncated_word_rejected() {
        let encoded = encode_params(&[Token::Uint(U256::one())]);
        let reader = AbiReader::new(&encoded[..31]);
        assert!(matches!(reader.uint(0), Err(BridgeError::MalformedProof(_))));
    }

    #[test]
    fn test_offset_out_of_range_rejected() {
        let mut encoded = encode_params(&[Token::Bytes(vec![1, 2, 3])]);
        encoded[31] = 0xFF;
        assert!(AbiReader::new(&encoded).bytes(0).is_err());
    }

    #[test]
    fn test_length_beyond_buffer_rejected() {
        let mut encoded = encode_params(&[Token::Bytes(vec![1, 2, 3])]);
        encoded[63] = 40;
        assert!(AbiReader::new(&encoded).bytes(0).is_err());
    }

    #[test]
    fn test_dirty_address_padding_rejected() {
        let mut encoded = encode_params(&[Token::Address(Address::new([1u8; 20]))]);
        encoded[0] = 1;
        assert!(AbiReader::new(&encoded).address(0).is_err());
    }

    #[test]
    fn test_uint64_overflow_rejected() {
        let encoded = encode_params(&[Token::Uint(U256::from(u64::MAX) + U256::one())]);
        assert!(AbiReader::new(&encoded).uint64(0).is_err());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let encoded = encode_params(&[Token::Bytes(vec![0xFF, 0xFE])]);
        assert!(AbiReader::new(&encoded).string(0).is_err());
    }

    #[test]
    fn test_expect_static_len() {
        let encoded = encode_params(&[Token::Uint(U256::one())]);
        assert!(AbiReader::new(&encoded).expect_static_len(1).is_ok());
        assert!(AbiReader::new(&encoded).expect_static_len(2).is_err());
    }
}
