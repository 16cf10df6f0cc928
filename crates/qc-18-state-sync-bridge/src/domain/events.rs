//! # Domain Events
//!
//! Typed records of every successful state change, kept in an in-process log.

use super::value_objects::{Address, ProofKey, Role, U256};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Bridge and manager events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeEvent {
    /// A proof was admitted and cached.
    ProofRelayed {
        /// Cache key.
        key: ProofKey,
        /// Credited account.
        relayer: Address,
        /// Root token locked.
        root_token: Address,
        /// Submitting account.
        submitted_by: Address,
    },
    /// Template fields were replaced.
    TemplateUpdated {
        /// New protocol version.
        protocol_version: u64,
        /// New ask count.
        ask_count: u64,
        /// New minimum count.
        min_count: u64,
    },
    /// Bridge ownership moved.
    OwnershipTransferred {
        /// Previous owner.
        previous_owner: Address,
        /// New owner.
        new_owner: Address,
    },
    /// Root token mapped to child token.
    TokenMapped {
        /// Root token.
        root: Address,
        /// Child token.
        child: Address,
    },
    /// Mapping removed.
    TokenUnmapped {
        /// Root token.
        root: Address,
        /// Child token.
        child: Address,
    },
    /// Manager wired to a bridge.
    BridgeSet {
        /// Bridge address.
        bridge: Address,
    },
    /// Deposit credited on the child chain.
    DepositSynced {
        /// Sync message id.
        id: u64,
        /// Proof key credited.
        key: ProofKey,
        /// Recipient.
        user: Address,
        /// Child token minted.
        child_token: Address,
        /// Amount minted.
        amount: U256,
    },
    /// Role granted.
    RoleGranted {
        /// Role.
        role: Role,
        /// Grantee.
        account: Address,
        /// Granting admin.
        sender: Address,
    },
    /// Role revoked or renounced.
    RoleRevoked {
        /// Role.
        role: Role,
        /// Former holder.
        account: Address,
        /// Revoking account.
        sender: Address,
    },
}

/// Append-only event log.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RwLock<Vec<BridgeEvent>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn emit(&self, event: BridgeEvent) {
        self.events.write().push(event);
    }

    /// Snapshot of all events so far.
    pub fn snapshot(&self) -> Vec<BridgeEvent> {
        self.events.read().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}
