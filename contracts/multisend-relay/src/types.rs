use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::json_types::U128;
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::AccountId;
use near_sdk_macros::NearSchema;

/// Canonical signable form of a multi-send request. The message digest is
/// sha256 over the borsh serialization of this struct, fields in declaration
/// order. Borsh length-prefixes both vectors, so requests with different
/// recipient/amount splits can never serialize to the same bytes.
#[derive(BorshSerialize)]
#[borsh(crate = "near_sdk::borsh")]
pub struct MultiSendPayload<'a> {
    pub sender: &'a AccountId,
    pub nonce: u64,
    pub recipients: &'a [AccountId],
    pub amounts: &'a [u128],
    pub expiry: u64,
    pub fee: u128,
}

/// A verified request waiting for execution, keyed by `{sender}-{nonce}`.
/// `fee` is frozen at submission time; `submitted_by` is the relayer that
/// gets paid when the batch executes.
#[derive(Clone, Debug, BorshSerialize, BorshDeserialize, NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct PendingRequest {
    pub recipients: Vec<AccountId>,
    pub amounts: Vec<u128>,
    pub expiry: u64,
    pub fee: u128,
    pub submitted_by: AccountId,
}

/// JSON projection of a pending request returned by view methods.
#[derive(Clone, Debug, Serialize, Deserialize, NearSchema)]
#[serde(crate = "near_sdk::serde")]
#[abi(json)]
pub struct PendingRequestView {
    pub sender: AccountId,
    pub nonce: u64,
    pub recipients: Vec<AccountId>,
    pub amounts: Vec<U128>,
    pub expiry: u64,
    pub fee: U128,
    pub submitted_by: AccountId,
}
