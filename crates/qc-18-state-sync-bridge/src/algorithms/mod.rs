//! # Algorithms Module
//!
//! Wire codecs and key derivation for the State-Sync Bridge.

pub mod abi;
pub mod envelope;
pub mod proof;
pub mod proof_key;

pub use abi::{encode_params, AbiReader, Token};
pub use envelope::{
    decode_envelope, decode_message, encode_envelope, encode_map_token, encode_message,
};
pub use proof::{decode_proof, encode_proof};
pub use proof_key::derive_key;
