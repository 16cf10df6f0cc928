//! # Inbound Ports
//!
//! API traits defining what the relay bridge and the child chain manager can do.

use crate::domain::{
    Address, BridgeResult, ProofCoordinates, ProofKey, RelayEntry, Role, TemplatePacket,
};
use crate::ports::outbound::{MintableLedger, RelayCacheGateway};
use std::sync::Arc;

/// Relay bridge API - inbound port.
pub trait RelayBridgeApi: Send + Sync {
    /// Current `(sourceDescriptor, protocolVersion, payloadPlaceholder, askCount, minCount)`.
    fn template_request_packet(&self) -> TemplatePacket;

    /// Replace protocol version and quorum counts together (owner only).
    fn update_template(
        &self,
        protocol_version: u64,
        ask_count: u64,
        min_count: u64,
        caller: Address,
    ) -> BridgeResult<()>;

    /// Derive the cache key for chain coordinates.
    fn derive_key(&self, coordinates: &ProofCoordinates) -> ProofKey;

    /// Cached entry for `key`, zero-valued if absent.
    fn get_cache_entry(&self, key: &ProofKey) -> RelayEntry;

    /// Admit a proof and return the cached outcome. Replays are no-ops.
    fn relay_and_get_sync_result(&self, proof: &[u8], caller: Address) -> BridgeResult<RelayEntry>;

    /// Current owner.
    fn owner(&self) -> Address;

    /// Hand ownership to `new_owner` (owner only).
    fn transfer_ownership(&self, new_owner: Address, caller: Address) -> BridgeResult<()>;
}

/// Child chain manager API - inbound port.
pub trait ChildChainApi: Send + Sync {
    /// Apply a state-sync envelope (STATE_SYNCER only).
    fn on_state_receive(&self, id: u64, envelope: &[u8], caller: Address) -> BridgeResult<()>;

    /// Wire the relay bridge used by DEPOSIT syncs (ADMIN only).
    fn set_bridge(&self, bridge: Arc<dyn RelayCacheGateway>, caller: Address) -> BridgeResult<()>;

    /// Register the ledger backing a child token (ADMIN only).
    fn attach_ledger(&self, ledger: Arc<dyn MintableLedger>, caller: Address) -> BridgeResult<()>;

    /// Register `root <-> child` (MAPPER only).
    fn map_token(&self, root: Address, child: Address, caller: Address) -> BridgeResult<()>;

    /// Remove the mapping for `root` (MAPPER only).
    fn clean_map_token(&self, root: Address, caller: Address) -> BridgeResult<()>;

    /// Child token for `root`, zero if unmapped.
    fn root_to_child_token(&self, root: &Address) -> Address;

    /// Root token for `child`, zero if unmapped.
    fn child_to_root_token(&self, child: &Address) -> Address;

    /// Role membership predicate.
    fn has_role(&self, role: Role, account: &Address) -> bool;

    /// Grant `role` to `account` (ADMIN only).
    fn grant_role(&self, role: Role, account: Address, caller: Address) -> BridgeResult<()>;

    /// Revoke `role` from `account` (ADMIN only).
    fn revoke_role(&self, role: Role, account: Address, caller: Address) -> BridgeResult<()>;

    /// Give up `role` held by the caller.
    fn renounce_role(&self, role: Role, caller: Address) -> BridgeResult<()>;
}
