//! # Outbound Ports
//!
//! Traits for the collaborators the bridge and manager depend on: cache
//! storage, the relay bridge as seen from the child chain, and token ledgers.

use crate::domain::{Address, BridgeResult, ProofCoordinates, ProofKey, RelayEntry, U256};

/// Relay cache storage - outbound port.
///
/// Entries are write-once: `insert_if_absent` never replaces a stored entry.
pub trait RelayCacheStore: Send + Sync {
    /// Stored entry for `key`.
    fn get(&self, key: &ProofKey) -> Option<RelayEntry>;

    /// Store `entry` unless `key` is taken. Returns the entry now stored and
    /// whether this call inserted it.
    fn insert_if_absent(&self, key: ProofKey, entry: RelayEntry) -> (RelayEntry, bool);

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// True if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Relay bridge as consumed by the child chain manager - outbound port.
pub trait RelayCacheGateway: Send + Sync {
    /// Bridge address.
    fn bridge_address(&self) -> Address;

    /// Derive the cache key for chain coordinates.
    fn derive_key(&self, coordinates: &ProofCoordinates) -> ProofKey;

    /// Finalized relay outcome for `key`, zero-valued if absent.
    fn requests_cache(&self, key: &ProofKey) -> RelayEntry;

    /// Admit a proof (idempotent).
    fn relay_and_get_sync_result(&self, proof: &[u8], caller: Address) -> BridgeResult<RelayEntry>;
}

/// Child-chain token ledger - outbound port.
pub trait MintableLedger: Send + Sync {
    /// Token contract address on the child chain.
    fn address(&self) -> Address;

    /// Token name.
    fn name(&self) -> String;

    /// Token symbol.
    fn symbol(&self) -> String;

    /// Token decimals.
    fn decimals(&self) -> u8;

    /// The only account allowed to mint.
    fn child_chain_manager_proxy(&self) -> Address;

    /// Check that `mint(minter, to, amount)` would succeed, without minting.
    fn check_mint(&self, minter: Address, to: Address, amount: U256) -> BridgeResult<()>;

    /// Credit `amount` to `to`. Fails `Unauthorized` unless `minter` is the proxy.
    fn mint(&self, minter: Address, to: Address, amount: U256) -> BridgeResult<()>;

    /// Balance of `account`.
    fn balance_of(&self, account: &Address) -> U256;

    /// Total minted supply.
    fn total_supply(&self) -> U256;
}
