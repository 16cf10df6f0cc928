//! # Service Layer
//!
//! The relay bridge and the child chain manager, plus the registries the
//! manager is built from.

mod access_control;
mod cache_bridge;
mod child_chain_manager;
mod token_mapping;

pub use access_control::AccessControl;
pub use cache_bridge::CacheBridge;
pub use child_chain_manager::ChildChainManager;
pub use token_mapping::TokenMappingRegistry;
