//! # Domain Errors
//!
//! Error types for the State-Sync Bridge. Every rejection leaves bridge and
//! manager state exactly as it was before the call.

use super::value_objects::{Address, Hash, ProofKey, Role, U256};
use thiserror::Error;

/// State-sync bridge error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Caller lacks the role or ownership the operation requires.
    #[error("Unauthorized: {caller:?} is not {required}")]
    Unauthorized {
        /// Account that attempted the call.
        caller: Address,
        /// Human readable requirement (role name or "owner").
        required: String,
    },

    /// Proof or envelope bytes do not match the expected layout.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// Mapping contradicts an existing one.
    #[error("Mapping conflict: root {root:?} -> child {child:?} contradicts existing mapping")]
    MappingConflict {
        /// Root token of the rejected mapping.
        root: Address,
        /// Child token of the rejected mapping.
        child: Address,
    },

    /// Envelope carries an unrecognized sync type tag.
    #[error("Unknown sync type: {0:?}")]
    UnknownSyncType(Hash),

    /// DEPOSIT references a proof key that was never relayed.
    #[error("Unrelayed deposit: no cache entry for key {0:?}")]
    UnrelayedDeposit(ProofKey),

    /// Root token has no registered child token.
    #[error("Unmapped token: {0:?}")]
    UnmappedToken(Address),

    /// DEPOSIT processed before a bridge was configured.
    #[error("Bridge not configured")]
    BridgeNotConfigured,

    /// Template quorum parameters are inconsistent.
    #[error("Invalid template: min_count={min_count}, ask_count={ask_count}")]
    InvalidTemplate {
        /// Requested minimum count.
        min_count: u64,
        /// Requested ask count.
        ask_count: u64,
    },

    /// Proof does not satisfy an enforced quorum.
    #[error("Quorum not met: {answered}/{required} answers")]
    QuorumNotMet {
        /// Answers the proof reports.
        answered: u64,
        /// Answers the bridge requires.
        required: u64,
    },

    /// Proof key was already credited by a previous DEPOSIT.
    #[error("Deposit already processed for key {0:?}")]
    DepositAlreadyProcessed(ProofKey),

    /// No ledger attached for a mapped child token.
    #[error("Ledger not found for child token {0:?}")]
    LedgerNotFound(Address),

    /// Mint would overflow a balance or the total supply.
    #[error("Balance overflow: minting {amount} to {account:?}")]
    BalanceOverflow {
        /// Recipient account.
        account: Address,
        /// Amount that could not be credited.
        amount: U256,
    },
}

impl BridgeError {
    /// Unauthorized for a missing role.
    pub fn missing_role(caller: Address, role: Role) -> Self {
        Self::Unauthorized {
            caller,
            required: role.name().to_string(),
        }
    }

    /// Unauthorized for a non-owner caller.
    pub fn not_owner(caller: Address) -> Self {
        Self::Unauthorized {
            caller,
            required: "owner".to_string(),
        }
    }

    /// Malformed proof with a reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedProof(reason.into())
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
