use crate::constants::FALLBACK_RELAYER_FEE;
use crate::errors::RelayError;
use crate::events;
use crate::state_versions::StateV010;
use crate::types::PendingRequest;
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::{IterableSet, LookupMap};
use near_sdk::{env, AccountId, BorshStorageKey};
use near_sdk_macros::NearSchema;
use semver::Version;

#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
pub enum StorageKey {
    Relayers,
    Nonces,
    Pending,
    Balances,
}

#[derive(BorshSerialize, BorshDeserialize, NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct RelayState {
    pub version: String,
    pub owner: AccountId,
    pub paused: bool,
    pub relayer_fee: u128,
    pub relayers: IterableSet<AccountId>,
    pub nonces: LookupMap<AccountId, u64>,
    pub pending: LookupMap<String, PendingRequest>,
    pub balances: LookupMap<AccountId, u128>,
}

impl RelayState {
    pub fn new(owner: AccountId, relayer_fee: u128) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            owner,
            paused: false,
            relayer_fee,
            relayers: IterableSet::new(StorageKey::Relayers),
            nonces: LookupMap::new(StorageKey::Nonces),
            pending: LookupMap::new(StorageKey::Pending),
            balances: LookupMap::new(StorageKey::Balances),
        }
    }

    pub fn is_owner(&self, account_id: &AccountId) -> bool {
        &self.owner == account_id
    }

    pub fn is_relayer(&self, account_id: &AccountId) -> bool {
        self.relayers.contains(account_id)
    }

    /// Nonce of the most recently executed request; the next acceptable
    /// request nonce is this plus one.
    pub fn nonce_of(&self, account_id: &AccountId) -> u64 {
        self.nonces.get(account_id).copied().unwrap_or(0)
    }

    pub fn advance_nonce(&mut self, sender: &AccountId, executed_nonce: u64) {
        self.nonces.insert(sender.clone(), executed_nonce);
    }

    // Nonce renders without '-' and keys are never parsed back, so the
    // separator keeps keys collision-free across senders.
    fn request_key(sender: &AccountId, nonce: u64) -> String {
        format!("{}-{}", sender, nonce)
    }

    pub fn pending_request(&self, sender: &AccountId, nonce: u64) -> Option<&PendingRequest> {
        self.pending.get(&Self::request_key(sender, nonce))
    }

    /// Last submission wins: overwriting a not-yet-executed entry for the
    /// same `(sender, nonce)` is allowed.
    pub fn store_request(&mut self, sender: &AccountId, nonce: u64, request: PendingRequest) {
        self.pending.insert(Self::request_key(sender, nonce), request);
    }

    pub fn remove_request(&mut self, sender: &AccountId, nonce: u64) -> Option<PendingRequest> {
        self.pending.remove(&Self::request_key(sender, nonce))
    }

    pub fn balance_of(&self, account_id: &AccountId) -> u128 {
        self.balances.get(account_id).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, account_id: &AccountId, amount: u128) -> Result<(), RelayError> {
        let updated = self
            .balance_of(account_id)
            .checked_add(amount)
            .ok_or(RelayError::TransferFailed)?;
        self.balances.insert(account_id.clone(), updated);
        Ok(())
    }

    pub fn debit(&mut self, account_id: &AccountId, amount: u128) -> Result<(), RelayError> {
        let updated = self
            .balance_of(account_id)
            .checked_sub(amount)
            .ok_or(RelayError::InsufficientBalance)?;
        self.balances.insert(account_id.clone(), updated);
        Ok(())
    }

    pub fn migrate() -> Self {
        const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
        let current_version =
            Version::parse(CURRENT_VERSION).expect("Invalid current version in Cargo.toml");

        let state_bytes: Vec<u8> = env::storage_read(b"STATE").unwrap_or_default();

        // Try current version
        if let Ok(state) = near_sdk::borsh::from_slice::<RelayState>(&state_bytes) {
            if let Ok(state_version) = Version::parse(&state.version) {
                if state_version >= current_version {
                    env::log_str("State is at current or newer version, no migration needed");
                    return state;
                }
            }
        }

        // Try version 0.1.0, which predates the deposit ledger
        if let Ok(old_state) = near_sdk::borsh::from_slice::<StateV010>(&state_bytes) {
            if let Ok(old_version) = Version::parse(&old_state.version) {
                if old_version <= Version::parse("0.1.0").expect("Invalid version literal") {
                    env::log_str(&format!(
                        "Migrating from state version {}",
                        old_state.version
                    ));
                    let new_state = RelayState {
                        version: CURRENT_VERSION.to_string(),
                        owner: old_state.owner,
                        paused: old_state.paused,
                        relayer_fee: old_state.relayer_fee,
                        relayers: old_state.relayers,
                        nonces: old_state.nonces,
                        pending: old_state.pending,
                        balances: LookupMap::new(StorageKey::Balances),
                    };
                    events::log_state_migrated(&old_state.version, CURRENT_VERSION);
                    return new_state;
                }
            }
        }

        // If no valid state was found or version is unknown, initialize a new state
        env::log_str("No valid prior state found or unknown version, initializing new state");
        Self::new(env::current_account_id(), FALLBACK_RELAYER_FEE)
    }
}
