//! # Domain Invariants
//!
//! Business rules shared by the relay bridge and the child chain manager.

use super::entities::{DepositProof, QuorumReport, RelayRequestTemplate};
use super::errors::{BridgeError, BridgeResult};
use super::value_objects::Address;
use serde::{Deserialize, Serialize};

/// Whether configured quorum counts gate relay admission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuorumPolicy {
    /// Counts are metadata for off-core relayers only.
    #[default]
    Advisory,
    /// Proofs must report at least the configured counts.
    Enforced,
}

/// Invariant: `0 < min_count <= ask_count`.
pub fn invariant_template_counts(min_count: u64, ask_count: u64) -> BridgeResult<()> {
    if min_count == 0 || ask_count == 0 || min_count > ask_count {
        return Err(BridgeError::InvalidTemplate {
            min_count,
            ask_count,
        });
    }
    Ok(())
}

/// Invariant: a proof is internally consistent.
///
/// Checks the reported quorum figures against each other and requires
/// non-zero parties and a 1..=32 byte amount.
pub fn invariant_proof_structure(proof: &DepositProof) -> BridgeResult<()> {
    let QuorumReport {
        ask_count,
        min_count,
        ans_count,
    } = proof.quorum;

    if min_count == 0 || min_count > ask_count {
        return Err(BridgeError::malformed(format!(
            "proof quorum min_count={min_count} ask_count={ask_count}"
        )));
    }
    if ans_count < min_count || ans_count > ask_count {
        return Err(BridgeError::malformed(format!(
            "proof answered {ans_count} outside {min_count}..={ask_count}"
        )));
    }
    if proof.relayer.is_zero() {
        return Err(BridgeError::malformed("relayer is the zero address"));
    }
    if proof.root_token.is_zero() {
        return Err(BridgeError::malformed("root token is the zero address"));
    }
    if proof.amount.is_empty() || proof.amount.len() > 32 {
        return Err(BridgeError::malformed(format!(
            "amount must be 1..=32 bytes, got {}",
            proof.amount.len()
        )));
    }
    Ok(())
}

/// Invariant: under `Enforced`, a proof meets the configured quorum.
pub fn invariant_quorum_met(
    policy: QuorumPolicy,
    template: &RelayRequestTemplate,
    report: &QuorumReport,
) -> BridgeResult<()> {
    if policy == QuorumPolicy::Advisory {
        return Ok(());
    }
    if report.ans_count < template.min_count {
        return Err(BridgeError::QuorumNotMet {
            answered: report.ans_count,
            required: template.min_count,
        });
    }
    if report.ask_count < template.ask_count {
        return Err(BridgeError::QuorumNotMet {
            answered: report.ask_count,
            required: template.ask_count,
        });
    }
    Ok(())
}

/// Invariant: a new mapping never contradicts an existing one.
///
/// `current_child` is what `root` maps to today, `current_root` what `child`
/// maps back to. Re-registering the identical pair is allowed.
pub fn invariant_mapping_free(
    root: Address,
    child: Address,
    current_child: Address,
    current_root: Address,
) -> BridgeResult<()> {
    let root_taken = !current_child.is_zero() && current_child != child;
    let child_taken = !current_root.is_zero() && current_root != root;
    if root_taken || child_taken {
        return Err(BridgeError::MappingConflict { root, child });
    }
    Ok(())
}
