//! # Deposit Proof Codec
//!
//! Layout: `abi.encode(uint64 askCount, uint64 minCount, uint64 ansCount,
//! uint256 blockNumber, string transactionHash, string address,
//! uint256 logIndex, address relayer, address rootToken, bytes amount)`.

use super::abi::{encode_params, AbiReader, Token};
use crate::domain::{BridgeError, BridgeResult, DepositProof, ProofCoordinates, QuorumReport, U256};

/// Encode a proof blob.
pub fn encode_proof(proof: &DepositProof) -> Vec<u8> {
    encode_params(&[
        Token::Uint(U256::from(proof.quorum.ask_count)),
        Token::Uint(U256::from(proof.quorum.min_count)),
        Token::Uint(U256::from(proof.quorum.ans_count)),
        Token::Uint(proof.coordinates.block_number),
        Token::String(proof.coordinates.transaction_hash.clone()),
        Token::String(proof.coordinates.address.clone()),
        Token::Uint(proof.coordinates.log_index),
        Token::Address(proof.relayer),
        Token::Address(proof.root_token),
        Token::Bytes(proof.amount.clone()),
    ])
}

/// Decode a proof blob.
///
/// Only canonical encodings are accepted: the decoded proof must re-encode to
/// the exact input, which rejects trailing bytes and overlapping offsets.
pub fn decode_proof(bytes: &[u8]) -> BridgeResult<DepositProof> {
    let reader = AbiReader::new(bytes);
    let proof = DepositProof {
        quorum: QuorumReport {
            ask_count: reader.uint64(0)?,
            min_count: reader.uint64(1)?,
            ans_count: reader.uint64(2)?,
        },
        coordinates: ProofCoordinates {
            block_number: reader.uint(3)?,
            transaction_hash: reader.string(4)?,
            address: reader.string(5)?,
            log_index: reader.uint(6)?,
        },
        relayer: reader.address(7)?,
        root_token: reader.address(8)?,
        amount: reader.bytes(9)?,
    };

    if encode_proof(&proof) != bytes {
        return Err(BridgeError::malformed("non-canonical proof encoding"));
    }
    Ok(proof)
}
