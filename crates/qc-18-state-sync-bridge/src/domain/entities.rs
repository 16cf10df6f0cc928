//! # Domain Entities
//!
//! Relay templates, cache entries, decoded proofs and sync messages.

use super::errors::{BridgeError, BridgeResult};
use super::invariants::invariant_template_counts;
use super::value_objects::{Address, Hash, U256};
use serde::{Deserialize, Serialize};

/// Protocol version stamped into every freshly configured template.
pub const DEFAULT_PROTOCOL_VERSION: u64 = 42;

/// How relay proofs are solicited from corroborating sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequestTemplate {
    /// Opaque source descriptor (empty by default).
    pub source_descriptor: String,
    /// Protocol version.
    pub protocol_version: u64,
    /// Placeholder payload (empty).
    pub payload_placeholder: Vec<u8>,
    /// Corroborating sources requested.
    pub ask_count: u64,
    /// Sources required to accept.
    pub min_count: u64,
}

/// Flat view returned by `templateRequestPacket`:
/// `(sourceDescriptor, protocolVersion, payloadPlaceholder, askCount, minCount)`.
pub type TemplatePacket = (String, u64, Vec<u8>, u64, u64);

impl RelayRequestTemplate {
    /// Build a template after checking `0 < min_count <= ask_count`.
    pub fn new(protocol_version: u64, ask_count: u64, min_count: u64) -> BridgeResult<Self> {
        invariant_template_counts(min_count, ask_count)?;
        Ok(Self {
            source_descriptor: String::new(),
            protocol_version,
            payload_placeholder: Vec::new(),
            ask_count,
            min_count,
        })
    }

    /// Flatten into the packet tuple.
    pub fn packet(&self) -> TemplatePacket {
        (
            self.source_descriptor.clone(),
            self.protocol_version,
            self.payload_placeholder.clone(),
            self.ask_count,
            self.min_count,
        )
    }
}

/// Cached outcome of a relayed proof.
///
/// The default value (zero addresses, empty amount) means "absent".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEntry {
    /// Account credited by the deposit.
    pub relayer: Address,
    /// Root-chain token that was locked.
    pub root_token: Address,
    /// Big-endian encoded amount.
    pub amount_encoded: Vec<u8>,
}

impl RelayEntry {
    /// True for the zero entry.
    pub fn is_absent(&self) -> bool {
        self.relayer.is_zero() && self.root_token.is_zero() && self.amount_encoded.is_empty()
    }

    /// Decode `amount_encoded` as an unsigned big-endian integer.
    pub fn amount(&self) -> BridgeResult<U256> {
        decode_amount(&self.amount_encoded)
    }
}

/// Decode an unsigned big-endian integer of at most 32 bytes.
pub fn decode_amount(bytes: &[u8]) -> BridgeResult<U256> {
    if bytes.len() > 32 {
        return Err(BridgeError::malformed(format!(
            "amount is {} bytes, at most 32 allowed",
            bytes.len()
        )));
    }
    Ok(U256::from_big_endian(bytes))
}

/// Chain coordinates of the root-chain event a proof attests to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofCoordinates {
    /// Block containing the event.
    pub block_number: U256,
    /// Transaction hash as emitted by the root chain (kept verbatim).
    pub transaction_hash: String,
    /// Emitting contract address as emitted by the root chain (kept verbatim).
    pub address: String,
    /// Log position within the block.
    pub log_index: U256,
}

impl ProofCoordinates {
    /// Create coordinates from plain integers.
    pub fn new(
        block_number: u64,
        transaction_hash: impl Into<String>,
        address: impl Into<String>,
        log_index: u64,
    ) -> Self {
        Self {
            block_number: U256::from(block_number),
            transaction_hash: transaction_hash.into(),
            address: address.into(),
            log_index: U256::from(log_index),
        }
    }
}

/// Quorum figures the off-core relayer observed when soliciting the proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumReport {
    /// Sources asked.
    pub ask_count: u64,
    /// Sources required.
    pub min_count: u64,
    /// Sources that answered.
    pub ans_count: u64,
}

/// A decoded deposit proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositProof {
    /// Quorum metadata.
    pub quorum: QuorumReport,
    /// Event coordinates (the cache key inputs).
    pub coordinates: ProofCoordinates,
    /// Account to credit.
    pub relayer: Address,
    /// Root token locked.
    pub root_token: Address,
    /// Big-endian amount bytes.
    pub amount: Vec<u8>,
}

impl DepositProof {
    /// Cache entry this proof finalizes into.
    pub fn entry(&self) -> RelayEntry {
        RelayEntry {
            relayer: self.relayer,
            root_token: self.root_token,
            amount_encoded: self.amount.clone(),
        }
    }
}

/// Decoded sync envelope payload, keyed by type tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncMessage {
    /// Register `root -> child`.
    MapToken {
        /// Root-chain token.
        root: Address,
        /// Child-chain token.
        child: Address,
        /// Reserved word, ignored.
        reserved: Hash,
    },
    /// Credit the deposit attested by the embedded proof blob.
    Deposit {
        /// Raw proof bytes.
        proof: Vec<u8>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_packet() {
        let template = RelayRequestTemplate::new(DEFAULT_PROTOCOL_VERSION, 4, 3).unwrap();
        assert_eq!(template.packet(), (String::new(), 42, vec![], 4, 3));
    }

    #[test]
    fn test_template_rejects_min_above_ask() {
        assert!(matches!(
            RelayRequestTemplate::new(42, 1, 2),
            Err(BridgeError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn test_default_entry_is_absent() {
        let entry = RelayEntry::default();
        assert!(entry.is_absent());
        assert_eq!(entry.amount().unwrap(), U256::zero());
    }

    #[test]
    fn test_entry_amount_decoding() {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&0x0de0_b6b3_a764_0000u64.to_be_bytes());
        let entry = RelayEntry {
            relayer: Address::new([1u8; 20]),
            root_token: Address::new([2u8; 20]),
            amount_encoded: word.to_vec(),
        };
        assert!(!entry.is_absent());
        assert_eq!(entry.amount().unwrap(), U256::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_amount_wider_than_word_rejected() {
        assert!(decode_amount(&[1u8; 33]).is_err());
        assert_eq!(decode_amount(&[0x01, 0x00]).unwrap(), U256::from(256u64));
    }
}
