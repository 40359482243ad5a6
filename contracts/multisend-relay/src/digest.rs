//! Message digest and signature recovery for multi-send requests.
//!
//! A sender authorizes a batch off-chain by signing the sha256 digest of the
//! borsh-serialized request with a secp256k1 key. The contract recovers the
//! public key from the 65-byte recoverable signature and checks that the
//! account derived from it matches the claimed sender, so no key registry is
//! needed on-chain.

use near_sdk::{env, AccountId};

use crate::constants::SIGNATURE_LENGTH;
use crate::errors::RelayError;
use crate::types::MultiSendPayload;

/// Canonical digest of a multi-send request. Every field that affects
/// execution is included, so a signature over the digest commits the sender
/// to the exact batch, ordering, expiry, and fee.
pub fn message_digest(
    sender: &AccountId,
    nonce: u64,
    recipients: &[AccountId],
    amounts: &[u128],
    expiry: u64,
    fee: u128,
) -> Result<[u8; 32], RelayError> {
    let payload = MultiSendPayload {
        sender,
        nonce,
        recipients,
        amounts,
        expiry,
        fee,
    };
    let serialized = near_sdk::borsh::to_vec(&payload).map_err(|_| RelayError::SerializationError)?;
    Ok(env::sha256_array(&serialized))
}

/// Derives the eth-implicit account ID owned by an uncompressed secp256k1
/// public key: `0x` followed by the last 20 bytes of the key's keccak256
/// hash, hex-encoded.
pub fn derive_sender_account(public_key: &[u8; 64]) -> Option<AccountId> {
    let hash = env::keccak256_array(public_key);
    format!("0x{}", hex::encode(&hash[12..])).parse().ok()
}

/// Recovers the signing key from a 65-byte `r || s || v` signature over
/// `digest` and checks that it derives the claimed sender. Malformed
/// signatures (wrong length, out-of-range recovery id, high-s encoding,
/// unrecoverable point) report `false` rather than trapping.
pub fn verify_sender_signature(
    digest: &[u8; 32],
    signature: &[u8],
    claimed_sender: &AccountId,
) -> bool {
    if signature.len() != SIGNATURE_LENGTH {
        return false;
    }
    let v = signature[SIGNATURE_LENGTH - 1];
    if v > 3 {
        return false;
    }
    match env::ecrecover(digest, &signature[..SIGNATURE_LENGTH - 1], v, true) {
        Some(public_key) => match derive_sender_account(&public_key) {
            Some(recovered) => &recovered == claimed_sender,
            None => false,
        },
        None => false,
    }
}
