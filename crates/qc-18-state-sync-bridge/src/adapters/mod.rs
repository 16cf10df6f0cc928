//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod child_token;
mod relay_cache;

pub use child_token::InMemoryChildToken;
pub use relay_cache::InMemoryRelayCache;
