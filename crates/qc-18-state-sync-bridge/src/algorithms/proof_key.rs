//! # Proof Key Derivation
//!
//! Maps a proof's chain coordinates to its cache key:
//! `keccak256(abi.encode(uint256 blockNumber, string txHash, string address, uint256 logIndex))`.

use super::abi::{encode_params, Token};
use crate::domain::{keccak256, ProofCoordinates, ProofKey};

/// Derive the cache key for `coordinates`.
///
/// Pure and deterministic. String coordinates are hashed verbatim, so the
/// caller must pass them exactly as the root chain emitted them.
pub fn derive_key(coordinates: &ProofCoordinates) -> ProofKey {
    let encoded = encode_params(&[
        Token::Uint(coordinates.block_number),
        Token::String(coordinates.transaction_hash.clone()),
        Token::String(coordinates.address.clone()),
        Token::Uint(coordinates.log_index),
    ]);
    ProofKey(keccak256(&encoded))
}
