//! Shared fixtures for the state-sync integration tests.
//!
//! The two testnet proofs attest to the same root-chain deposit, solicited
//! under different quorum parameters.

#![allow(dead_code)]

use qc_18_state_sync_bridge::{
    encode_proof, Address, BridgeConfig, CacheBridge, ChildChainApi, ChildChainManager,
    DepositProof, InMemoryChildToken, ManagerConfig, ProofCoordinates, QuorumReport, U256,
};
use std::sync::Arc;

pub const DEPLOYER: Address = Address::new([0xD0; 20]);
pub const STRANGER: Address = Address::new([0x55; 20]);
pub const BRIDGE: Address = Address::new([0xB1; 20]);
pub const MANAGER: Address = Address::new([0xCC; 20]);
pub const CHILD_TOKEN: Address = Address::new([0xC1; 20]);

pub const USER: &str = "0xB011D306D36c396847bA42b1c7AEb8E96C540d9a";
pub const ROOT_CHAIN_TOKEN: &str = "0x499d11E0b6eAC7c0593d8Fb292DCBbF815Fb29Ae";

pub const BLOCK_NUMBER: u64 = 4_929_795;
pub const LOG_INDEX: u64 = 2;
pub const TX_HASH: &str = "\"0xc88beab5124712122d3888f5d59e4ab77ad14eb77f1c1f93fb41b42822465804\"";
pub const EMITTER: &str = "\"0xeaa852323826c71cd7920c3b4c007184234c3945\"";
pub const EXPECTED_KEY: &str =
    "0xe67d7ce60d63d0184d27bec063f6a5f82a3db572a0bd7b9dd27a71d2dc15ddf7";

/// 1 token at 18 decimals.
pub const ONE_TOKEN: u64 = 1_000_000_000_000_000_000;

// =============================================================================
// PROOF FIXTURES
// =============================================================================

pub fn user() -> Address {
    USER.parse().unwrap()
}

pub fn root_chain_token() -> Address {
    ROOT_CHAIN_TOKEN.parse().unwrap()
}

/// Amount as the full 32-byte word the relayer attests to.
pub fn amount_word() -> Vec<u8> {
    let mut word = [0u8; 32];
    U256::from(ONE_TOKEN).to_big_endian(&mut word);
    word.to_vec()
}

pub fn coordinates() -> ProofCoordinates {
    ProofCoordinates::new(BLOCK_NUMBER, TX_HASH, EMITTER, LOG_INDEX)
}

fn deposit_proof(ask_count: u64, min_count: u64, ans_count: u64) -> DepositProof {
    DepositProof {
        quorum: QuorumReport {
            ask_count,
            min_count,
            ans_count,
        },
        coordinates: coordinates(),
        relayer: user(),
        root_token: root_chain_token(),
        amount: amount_word(),
    }
}

/// Proof solicited with `min_count = 1, ask_count = 1`.
pub fn testnet3_proof_1_1() -> Vec<u8> {
    encode_proof(&deposit_proof(1, 1, 1))
}

/// Proof solicited with `min_count = 3, ask_count = 4`.
pub fn testnet3_proof_3_4() -> Vec<u8> {
    encode_proof(&deposit_proof(4, 3, 4))
}

/// A proof with arbitrary coordinates and quorum figures.
pub fn custom_proof(log_index: u64, ask_count: u64, min_count: u64, ans_count: u64) -> Vec<u8> {
    let mut proof = deposit_proof(ask_count, min_count, ans_count);
    proof.coordinates.log_index = U256::from(log_index);
    encode_proof(&proof)
}

// =============================================================================
// DEPLOYMENT HELPERS
// =============================================================================

pub struct Deployment {
    pub bridge: Arc<CacheBridge>,
    pub manager: ChildChainManager,
    pub token: Arc<InMemoryChildToken>,
}

/// Bridge, manager and a TEST child token wired together by the deployer.
pub fn deploy(bridge_config: BridgeConfig, manager_config: ManagerConfig) -> Deployment {
    init_tracing();
    let bridge = Arc::new(CacheBridge::in_memory(BRIDGE, DEPLOYER, bridge_config).unwrap());
    let manager = ChildChainManager::new(MANAGER, DEPLOYER, manager_config);
    let token = Arc::new(InMemoryChildToken::new(CHILD_TOKEN, "TEST", "TEST", 18, MANAGER));

    manager.set_bridge(bridge.clone(), DEPLOYER).unwrap();
    manager.attach_ledger(token.clone(), DEPLOYER).unwrap();

    Deployment {
        bridge,
        manager,
        token,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
