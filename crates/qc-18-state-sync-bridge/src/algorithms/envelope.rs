//! # Sync Envelope Codec
//!
//! Outer layout `abi.encode(bytes32 syncType, bytes payload)`; the MAP_TOKEN
//! payload is `abi.encode(address root, address child, bytes32 reserved)` and
//! the DEPOSIT payload is a raw proof blob.

use super::abi::{encode_params, AbiReader, Token};
use crate::domain::{Address, BridgeError, BridgeResult, Hash, SyncMessage, SyncType};

/// Encode an envelope from a raw tag and payload.
pub fn encode_envelope(sync_type: Hash, payload: &[u8]) -> Vec<u8> {
    encode_params(&[Token::FixedBytes(sync_type), Token::Bytes(payload.to_vec())])
}

/// Decode the outer envelope into `(tag, payload)`.
pub fn decode_envelope(bytes: &[u8]) -> BridgeResult<(Hash, Vec<u8>)> {
    let reader = AbiReader::new(bytes);
    let sync_type = reader.fixed_bytes(0)?;
    let payload = reader.bytes(1)?;
    if encode_envelope(sync_type, &payload) != bytes {
        return Err(BridgeError::malformed("non-canonical envelope encoding"));
    }
    Ok((sync_type, payload))
}

/// Encode a MAP_TOKEN payload.
pub fn encode_map_token(root: Address, child: Address, reserved: Hash) -> Vec<u8> {
    encode_params(&[
        Token::Address(root),
        Token::Address(child),
        Token::FixedBytes(reserved),
    ])
}

/// Encode a typed message into a full envelope.
pub fn encode_message(message: &SyncMessage) -> Vec<u8> {
    match message {
        SyncMessage::MapToken {
            root,
            child,
            reserved,
        } => encode_envelope(
            SyncType::MapToken.tag(),
            &encode_map_token(*root, *child, *reserved),
        ),
        SyncMessage::Deposit { proof } => encode_envelope(SyncType::Deposit.tag(), proof),
    }
}

/// Decode an envelope into a typed message.
///
/// Unknown tags fail with `UnknownSyncType`; layout errors with `MalformedProof`.
pub fn decode_message(bytes: &[u8]) -> BridgeResult<SyncMessage> {
    let (tag, payload) = decode_envelope(bytes)?;
    match SyncType::from_tag(&tag) {
        Some(SyncType::MapToken) => {
            let reader = AbiReader::new(&payload);
            reader.expect_static_len(3)?;
            Ok(SyncMessage::MapToken {
                root: reader.address(0)?,
                child: reader.address(1)?,
                reserved: reader.fixed_bytes(2)?,
            })
        }
        Some(SyncType::Deposit) => Ok(SyncMessage::Deposit { proof: payload }),
        None => Err(BridgeError::UnknownSyncType(tag)),
    }
}
