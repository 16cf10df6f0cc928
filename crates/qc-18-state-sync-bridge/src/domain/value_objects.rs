//! # Domain Value Objects
//!
//! Immutable value types for the State-Sync Bridge: addresses, hashes, proof
//! keys, roles and sync type tags.

use super::errors::BridgeError;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

pub use primitive_types::U256;

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash(hasher.finalize().into())
}

fn parse_hex_fixed<const N: usize>(s: &str) -> Result<[u8; N], BridgeError> {
    let trimmed = s.trim().trim_matches('"');
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits)
        .map_err(|e| BridgeError::malformed(format!("invalid hex {s:?}: {e}")))?;
    bytes.try_into().map_err(|v: Vec<u8>| {
        BridgeError::malformed(format!("expected {N} bytes, got {}", v.len()))
    })
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = BridgeError;

    /// Parses `0x`-prefixed hex in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_fixed::<20>(s).map(Self)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte word: Keccak-256 digests, type tags and role ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero hash.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_fixed::<32>(s).map(Self)
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// PROOF KEY
// =============================================================================

/// Deterministic fingerprint of a proof's chain coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProofKey(pub Hash);

impl ProofKey {
    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ProofKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl FromStr for ProofKey {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

// =============================================================================
// ROLES
// =============================================================================

/// Access-control roles held by accounts on the child chain manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Grants and revokes roles, wires the bridge and ledgers.
    Admin,
    /// Registers token mappings.
    Mapper,
    /// Submits sync envelopes.
    StateSyncer,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Mapper, Role::StateSyncer];

    /// Canonical role name.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "DEFAULT_ADMIN_ROLE",
            Role::Mapper => "MAPPER_ROLE",
            Role::StateSyncer => "STATE_SYNCER_ROLE",
        }
    }

    /// 32-byte role id. The admin role is the zero word, the others hash their name.
    pub fn id(&self) -> Hash {
        match self {
            Role::Admin => Hash::ZERO,
            other => keccak256(other.name().as_bytes()),
        }
    }

    /// Resolve a 32-byte role id.
    pub fn from_id(id: &Hash) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.id() == *id)
    }
}

// =============================================================================
// SYNC TYPES
// =============================================================================

/// Recognized state-sync message types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncType {
    /// Register a root -> child token mapping.
    MapToken,
    /// Credit a relayed deposit.
    Deposit,
}

impl SyncType {
    /// Tag name hashed into the envelope's type word.
    pub fn name(&self) -> &'static str {
        match self {
            SyncType::MapToken => "MAP_TOKEN",
            SyncType::Deposit => "DEPOSIT",
        }
    }

    /// `keccak256(name)`.
    pub fn tag(&self) -> Hash {
        keccak256(self.name().as_bytes())
    }

    /// Resolve an envelope tag.
    pub fn from_tag(tag: &Hash) -> Option<SyncType> {
        [SyncType::MapToken, SyncType::Deposit]
            .into_iter()
            .find(|t| t.tag() == *tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty_input() {
        let expected: Hash = "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
            .parse()
            .unwrap();
        assert_eq!(keccak256(&[]), expected);
    }

    #[test]
    fn test_address_parse_mixed_case() {
        let lower: Address = "0xb011d306d36c396847ba42b1c7aeb8e96c540d9a".parse().unwrap();
        let mixed: Address = "0xB011D306D36c396847bA42b1c7AEb8E96C540d9a".parse().unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(
            lower.to_string(),
            "0xb011d306d36c396847ba42b1c7aeb8e96c540d9a"
        );
    }

    #[test]
    fn test_address_parse_wrong_length() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz".parse::<Address>().is_err());
    }

    #[test]
    fn test_address_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::new([1u8; 20]).is_zero());
        assert_eq!(Address::from_slice(&[0u8; 19]), None);
    }

    #[test]
    fn test_role_ids() {
        assert!(Role::Admin.id().is_zero());
        assert_eq!(Role::Mapper.id(), keccak256(b"MAPPER_ROLE"));
        assert_ne!(Role::Mapper.id(), Role::StateSyncer.id());
        for role in Role::ALL {
            assert_eq!(Role::from_id(&role.id()), Some(role));
        }
        assert_eq!(Role::from_id(&keccak256(b"PAUSER_ROLE")), None);
    }

    #[test]
    fn test_sync_type_tags() {
        assert_eq!(SyncType::Deposit.tag(), keccak256(b"DEPOSIT"));
        assert_eq!(
            SyncType::from_tag(&SyncType::MapToken.tag()),
            Some(SyncType::MapToken)
        );
        assert_eq!(SyncType::from_tag(&Hash::ZERO), None);
    }
}
