//! # QC-18 State-Sync Bridge
//!
//! Relays root-chain deposit proofs into a child chain and credits them.
//!
//! **Subsystem ID:** 18  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - `CacheBridge` admits deposit proofs and caches each outcome under a
//!   Keccak-256 proof key, exactly once
//! - `ChildChainManager` receives state-sync envelopes, maintains the
//!   root/child token mapping and mints relayed deposits
//!
//! ## State Sync Flow
//!
//! ```text
//! relayer ──proof──→ CacheBridge::relay_and_get_sync_result ──→ cache[key]
//!                                                                  │
//! state syncer ──envelope──→ ChildChainManager::on_state_receive   │
//!                              ├── MAP_TOKEN → TokenMappingRegistry│
//!                              └── DEPOSIT ──→ requests_cache(key) ┘
//!                                               └──→ MintableLedger::mint
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-state-sync-bridge/
//! ├── domain/          # Addresses, proofs, roles, events, errors
//! ├── algorithms/      # ABI codec, proof/envelope codecs, key derivation
//! ├── ports/           # RelayBridgeApi, ChildChainApi, outbound collaborators
//! ├── adapters/        # In-memory relay cache and child token
//! ├── service/         # CacheBridge, ChildChainManager
//! └── config.rs        # BridgeConfig, ManagerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryChildToken, InMemoryRelayCache};
pub use algorithms::{
    decode_envelope, decode_message, decode_proof, derive_key, encode_envelope, encode_map_token,
    encode_message, encode_proof,
};
pub use config::{BridgeConfig, DepositMode, ManagerConfig};
pub use domain::{
    keccak256, Address, BridgeError, BridgeEvent, BridgeResult, DepositProof, Hash,
    ProofCoordinates, ProofKey, QuorumPolicy, QuorumReport, RelayEntry, RelayRequestTemplate,
    Role, SyncMessage, SyncType, TemplatePacket, DEFAULT_PROTOCOL_VERSION, U256,
};
pub use ports::{ChildChainApi, MintableLedger, RelayBridgeApi, RelayCacheGateway, RelayCacheStore};
pub use service::{AccessControl, CacheBridge, ChildChainManager, TokenMappingRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
