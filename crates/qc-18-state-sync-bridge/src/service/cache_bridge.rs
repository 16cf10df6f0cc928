//! Cache Bridge Service
//!
//! Admits deposit proofs and finalizes each proof key at most once.

use crate::adapters::InMemoryRelayCache;
use crate::algorithms::{decode_proof, derive_key};
use crate::config::BridgeConfig;
use crate::domain::{
    invariant_proof_structure, invariant_quorum_met, Address, BridgeError, BridgeEvent,
    BridgeResult, EventLog, ProofCoordinates, ProofKey, QuorumPolicy, RelayEntry,
    RelayRequestTemplate, TemplatePacket,
};
use crate::ports::inbound::RelayBridgeApi;
use crate::ports::outbound::{RelayCacheGateway, RelayCacheStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct BridgeState {
    owner: Address,
    template: RelayRequestTemplate,
}

/// Relay bridge owning the proof cache.
pub struct CacheBridge<S: RelayCacheStore = InMemoryRelayCache> {
    address: Address,
    quorum_policy: QuorumPolicy,
    state: RwLock<BridgeState>,
    cache: Arc<S>,
    events: EventLog,
}

impl CacheBridge<InMemoryRelayCache> {
    /// Bridge backed by an in-memory cache.
    pub fn in_memory(address: Address, owner: Address, config: BridgeConfig) -> BridgeResult<Self> {
        Self::new(address, owner, config, Arc::new(InMemoryRelayCache::new()))
    }
}

impl<S: RelayCacheStore> CacheBridge<S> {
    /// Configure a bridge. Fails `InvalidTemplate` unless `0 < min_count <= ask_count`.
    pub fn new(
        address: Address,
        owner: Address,
        config: BridgeConfig,
        cache: Arc<S>,
    ) -> BridgeResult<Self> {
        let template =
            RelayRequestTemplate::new(config.protocol_version, config.ask_count, config.min_count)?;
        info!(
            "[qc-18] Bridge {} configured: min_count={}, ask_count={}, policy={:?}",
            address, config.min_count, config.ask_count, config.quorum_policy
        );
        Ok(Self {
            address,
            quorum_policy: config.quorum_policy,
            state: RwLock::new(BridgeState { owner, template }),
            cache,
            events: EventLog::new(),
        })
    }

    /// Bridge address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Quorum policy in force.
    pub fn quorum_policy(&self) -> QuorumPolicy {
        self.quorum_policy
    }

    /// Alias of `get_cache_entry` for downstream consumers.
    pub fn requests_cache(&self, key: &ProofKey) -> RelayEntry {
        self.get_cache_entry(key)
    }

    /// Number of finalized entries.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Events emitted so far.
    pub fn events(&self) -> Vec<BridgeEvent> {
        self.events.snapshot()
    }
}

impl<S: RelayCacheStore> RelayBridgeApi for CacheBridge<S> {
    fn template_request_packet(&self) -> TemplatePacket {
        self.state.read().template.packet()
    }

    fn update_template(
        &self,
        protocol_version: u64,
        ask_count: u64,
        min_count: u64,
        caller: Address,
    ) -> BridgeResult<()> {
        let mut state = self.state.write();
        if caller != state.owner {
            warn!("[qc-18] Template update rejected: {} is not owner", caller);
            return Err(BridgeError::not_owner(caller));
        }

        let mut template = RelayRequestTemplate::new(protocol_version, ask_count, min_count)?;
        template.source_descriptor = std::mem::take(&mut state.template.source_descriptor);
        template.payload_placeholder = std::mem::take(&mut state.template.payload_placeholder);
        state.template = template;

        info!(
            "[qc-18] Template updated: version={}, ask_count={}, min_count={}",
            protocol_version, ask_count, min_count
        );
        self.events.emit(BridgeEvent::TemplateUpdated {
            protocol_version,
            ask_count,
            min_count,
        });
        Ok(())
    }

    fn derive_key(&self, coordinates: &ProofCoordinates) -> ProofKey {
        derive_key(coordinates)
    }

    fn get_cache_entry(&self, key: &ProofKey) -> RelayEntry {
        self.cache.get(key).unwrap_or_default()
    }

    fn relay_and_get_sync_result(&self, proof: &[u8], caller: Address) -> BridgeResult<RelayEntry> {
        // Held for the whole call so template updates cannot interleave.
        let state = self.state.write();

        let decoded = decode_proof(proof).inspect_err(|e| {
            warn!("[qc-18] Relay from {} rejected: {}", caller, e);
        })?;
        let key = derive_key(&decoded.coordinates);

        if let Some(existing) = self.cache.get(&key) {
            debug!("[qc-18] Proof {:?} already relayed, returning cached entry", key);
            return Ok(existing);
        }

        invariant_proof_structure(&decoded)
            .and_then(|()| {
                invariant_quorum_met(self.quorum_policy, &state.template, &decoded.quorum)
            })
            .inspect_err(|e| warn!("[qc-18] Relay of {:?} rejected: {}", key, e))?;

        let (entry, inserted) = self.cache.insert_if_absent(key, decoded.entry());
        if inserted {
            info!(
                "[qc-18] Relayed proof {:?}: relayer={}, root_token={}",
                key, entry.relayer, entry.root_token
            );
            self.events.emit(BridgeEvent::ProofRelayed {
                key,
                relayer: entry.relayer,
                root_token: entry.root_token,
                submitted_by: caller,
            });
        }
        Ok(entry)
    }

    fn owner(&self) -> Address {
        self.state.read().owner
    }

    fn transfer_ownership(&self, new_owner: Address, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        if caller != state.owner {
            return Err(BridgeError::not_owner(caller));
        }
        let previous_owner = std::mem::replace(&mut state.owner, new_owner);
        info!("[qc-18] Bridge ownership {} -> {}", previous_owner, new_owner);
        self.events.emit(BridgeEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }
}

impl<S: RelayCacheStore> RelayCacheGateway for CacheBridge<S> {
    fn bridge_address(&self) -> Address {
        self.address
    }

    fn derive_key(&self, coordinates: &ProofCoordinates) -> ProofKey {
        derive_key(coordinates)
    }

    fn requests_cache(&self, key: &ProofKey) -> RelayEntry {
        self.get_cache_entry(key)
    }

    fn relay_and_get_sync_result(&self, proof: &[u8], caller: Address) -> BridgeResult<RelayEntry> {
        RelayBridgeApi::relay_and_get_sync_result(self, proof, caller)
    }
}
