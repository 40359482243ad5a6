use crate::types::PendingRequest;
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::{IterableSet, LookupMap};
use near_sdk::AccountId;

/// State layout shipped in 0.1.0, before the deposit ledger was added.
#[derive(BorshSerialize, BorshDeserialize)]
#[borsh(crate = "near_sdk::borsh")]
pub struct StateV010 {
    pub version: String,
    pub owner: AccountId,
    pub paused: bool,
    pub relayer_fee: u128,
    pub relayers: IterableSet<AccountId>,
    pub nonces: LookupMap<AccountId, u64>,
    pub pending: LookupMap<String, PendingRequest>,
}
