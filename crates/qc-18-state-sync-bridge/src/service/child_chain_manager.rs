//! Child Chain Manager Service
//!
//! Receives state-sync envelopes, dispatches them by type tag, and mutates the
//! token mapping or mints relayed deposits. Every entry point holds the state
//! write lock for its whole duration and commits only after all checks pass.

use super::access_control::AccessControl;
use super::token_mapping::TokenMappingRegistry;
use crate::algorithms::{decode_message, decode_proof};
use crate::config::{DepositMode, ManagerConfig};
use crate::domain::{
    Address, BridgeError, BridgeEvent, BridgeResult, EventLog, ProofKey, RelayEntry, Role,
    SyncMessage, U256,
};
use crate::ports::inbound::ChildChainApi;
use crate::ports::outbound::{MintableLedger, RelayCacheGateway};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct ManagerState {
    roles: AccessControl,
    mappings: TokenMappingRegistry,
    bridge: Option<Arc<dyn RelayCacheGateway>>,
    ledgers: HashMap<Address, Arc<dyn MintableLedger>>,
    credited: HashSet<ProofKey>,
}

struct CreditPlan {
    recipient: Address,
    child_token: Address,
    ledger: Arc<dyn MintableLedger>,
    amount: U256,
}

/// Child chain manager.
pub struct ChildChainManager {
    address: Address,
    config: ManagerConfig,
    state: RwLock<ManagerState>,
    events: EventLog,
}

impl ChildChainManager {
    /// Deploy a manager at `address`. `deployer` receives every role and the
    /// manager itself receives `Mapper` for MAP_TOKEN syncs.
    pub fn new(address: Address, deployer: Address, config: ManagerConfig) -> Self {
        let mut roles = AccessControl::bootstrap(deployer);
        // Deployer holds Admin at this point, so the grant cannot fail.
        roles.grant_role(Role::Mapper, address, &deployer).ok();

        info!(
            "[qc-18] Child chain manager {} deployed by {} ({:?})",
            address, deployer, config.deposit_mode
        );
        Self {
            address,
            config,
            state: RwLock::new(ManagerState {
                roles,
                mappings: TokenMappingRegistry::new(),
                bridge: None,
                ledgers: HashMap::new(),
                credited: HashSet::new(),
            }),
            events: EventLog::new(),
        }
    }

    /// Manager address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Manager configuration.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Configured bridge address, zero if unset.
    pub fn bridge_address(&self) -> Address {
        self.state
            .read()
            .bridge
            .as_ref()
            .map(|bridge| bridge.bridge_address())
            .unwrap_or_default()
    }

    /// Whether a proof key has been credited.
    pub fn is_credited(&self, key: &ProofKey) -> bool {
        self.state.read().credited.contains(key)
    }

    /// Events emitted so far.
    pub fn events(&self) -> Vec<BridgeEvent> {
        self.events.snapshot()
    }

    fn map_token_locked(
        &self,
        state: &mut ManagerState,
        root: Address,
        child: Address,
        caller: Address,
    ) -> BridgeResult<()> {
        state.roles.require_role(Role::Mapper, &caller)?;
        if state.mappings.map(root, child)? {
            info!("[qc-18] Mapped root token {} -> child token {}", root, child);
            self.events.emit(BridgeEvent::TokenMapped { root, child });
        } else {
            debug!("[qc-18] Mapping {} -> {} already registered", root, child);
        }
        Ok(())
    }

    /// Resolve where and how much `entry` credits, and check the ledger would
    /// accept the mint. Mutates nothing.
    fn plan_credit(&self, state: &ManagerState, entry: &RelayEntry) -> BridgeResult<CreditPlan> {
        let child_token = state.mappings.root_to_child_token(&entry.root_token);
        if child_token.is_zero() {
            return Err(BridgeError::UnmappedToken(entry.root_token));
        }
        let ledger = state
            .ledgers
            .get(&child_token)
            .cloned()
            .ok_or(BridgeError::LedgerNotFound(child_token))?;
        if ledger.child_chain_manager_proxy() != self.address {
            return Err(BridgeError::Unauthorized {
                caller: self.address,
                required: "childChainManagerProxy".to_string(),
            });
        }
        let amount = entry.amount()?;
        ledger.check_mint(self.address, entry.relayer, amount)?;

        Ok(CreditPlan {
            recipient: entry.relayer,
            child_token,
            ledger,
            amount,
        })
    }

    fn sync_deposit(&self, state: &mut ManagerState, id: u64, proof: &[u8]) -> BridgeResult<()> {
        let bridge = state
            .bridge
            .clone()
            .ok_or(BridgeError::BridgeNotConfigured)?;
        let decoded = decode_proof(proof)?;
        let key = bridge.derive_key(&decoded.coordinates);

        let cached = bridge.requests_cache(&key);
        let relay_first =
            cached.is_absent() && self.config.deposit_mode == DepositMode::RelayThrough;
        let entry = if relay_first { decoded.entry() } else { cached };
        if entry.is_absent() {
            return Err(BridgeError::UnrelayedDeposit(key));
        }
        if state.credited.contains(&key) {
            return Err(BridgeError::DepositAlreadyProcessed(key));
        }

        let mut plan = self.plan_credit(state, &entry)?;
        if relay_first {
            let relayed = bridge.relay_and_get_sync_result(proof, self.address)?;
            // Another relay won the key; credit what the cache holds.
            if relayed != entry {
                debug!("[qc-18] Proof {:?} relayed concurrently, using cached entry", key);
                plan = self.plan_credit(state, &relayed)?;
            }
        }

        plan.ledger.mint(self.address, plan.recipient, plan.amount)?;
        state.credited.insert(key);

        info!(
            "[qc-18] Deposit {} synced: {} {} to {}",
            id, plan.amount, plan.child_token, plan.recipient
        );
        self.events.emit(BridgeEvent::DepositSynced {
            id,
            key,
            user: plan.recipient,
            child_token: plan.child_token,
            amount: plan.amount,
        });
        Ok(())
    }

    fn dispatch(&self, state: &mut ManagerState, id: u64, envelope: &[u8]) -> BridgeResult<()> {
        match decode_message(envelope)? {
            SyncMessage::MapToken { root, child, .. } => {
                self.map_token_locked(state, root, child, self.address)
            }
            SyncMessage::Deposit { proof } => self.sync_deposit(state, id, &proof),
        }
    }
}

impl ChildChainApi for ChildChainManager {
    fn on_state_receive(&self, id: u64, envelope: &[u8], caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        state.roles.require_role(Role::StateSyncer, &caller)?;
        debug!("[qc-18] State sync {} from {} ({} bytes)", id, caller, envelope.len());

        self.dispatch(&mut state, id, envelope)
            .inspect_err(|e| warn!("[qc-18] State sync {} rejected: {}", id, e))
    }

    fn set_bridge(&self, bridge: Arc<dyn RelayCacheGateway>, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        state.roles.require_role(Role::Admin, &caller)?;
        let address = bridge.bridge_address();
        state.bridge = Some(bridge);
        info!("[qc-18] Bridge set to {}", address);
        self.events.emit(BridgeEvent::BridgeSet { bridge: address });
        Ok(())
    }

    fn attach_ledger(&self, ledger: Arc<dyn MintableLedger>, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        state.roles.require_role(Role::Admin, &caller)?;
        info!(
            "[qc-18] Attached ledger {} ({})",
            ledger.address(),
            ledger.symbol()
        );
        state.ledgers.insert(ledger.address(), ledger);
        Ok(())
    }

    fn map_token(&self, root: Address, child: Address, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        self.map_token_locked(&mut state, root, child, caller)
            .inspect_err(|e| warn!("[qc-18] mapToken by {} rejected: {}", caller, e))
    }

    fn clean_map_token(&self, root: Address, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        state.roles.require_role(Role::Mapper, &caller)?;
        let child = state.mappings.unmap(&root)?;
        info!("[qc-18] Unmapped root token {} (was {})", root, child);
        self.events.emit(BridgeEvent::TokenUnmapped { root, child });
        Ok(())
    }

    fn root_to_child_token(&self, root: &Address) -> Address {
        self.state.read().mappings.root_to_child_token(root)
    }

    fn child_to_root_token(&self, child: &Address) -> Address {
        self.state.read().mappings.child_to_root_token(child)
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.read().roles.has_role(role, account)
    }

    fn grant_role(&self, role: Role, account: Address, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        if state.roles.grant_role(role, account, &caller)? {
            info!("[qc-18] Granted {} to {}", role.name(), account);
            self.events.emit(BridgeEvent::RoleGranted {
                role,
                account,
                sender: caller,
            });
        }
        Ok(())
    }

    fn revoke_role(&self, role: Role, account: Address, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        if state.roles.revoke_role(role, &account, &caller)? {
            info!("[qc-18] Revoked {} from {}", role.name(), account);
            self.events.emit(BridgeEvent::RoleRevoked {
                role,
                account,
                sender: caller,
            });
        }
        Ok(())
    }

    fn renounce_role(&self, role: Role, caller: Address) -> BridgeResult<()> {
        let mut state = self.state.write();
        if state.roles.renounce_role(role, &caller) {
            info!("[qc-18] {} renounced {}", caller, role.name());
            self.events.emit(BridgeEvent::RoleRevoked {
                role,
                account: caller,
                sender: caller,
            });
        }
        Ok(())
    }
}
