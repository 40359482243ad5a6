use crate::errors::RelayError;
use crate::state::RelayState;
use crate::types::PendingRequestView;
use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId, PanicOnDefault, Promise};

pub mod admin;
pub mod balance;
pub mod constants;
pub mod digest;
pub mod errors;
mod events;
pub mod multisend;
pub mod state;
pub mod state_versions;
pub mod types;

#[macro_export]
macro_rules! require_not_paused {
    ($state:expr) => {
        if $state.paused {
            return Err($crate::errors::RelayError::Paused);
        }
    };
}

#[macro_export]
macro_rules! require_owner {
    ($state:expr, $caller:expr) => {
        if !$state.is_owner(&$caller) {
            return Err($crate::errors::RelayError::OwnerOnly);
        }
    };
}

#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct MultiSendRelay {
    state: RelayState,
}

#[near]
impl MultiSendRelay {
    #[init]
    #[handle_result]
    pub fn new(owner: AccountId, relayer_fee: U128) -> Result<Self, RelayError> {
        AccountId::validate(owner.as_str())
            .map_err(|_| RelayError::InvalidInput("Invalid owner account ID".to_string()))?;
        let state = RelayState::new(owner, relayer_fee.0);
        events::log_contract_initialized(&state.owner, state.relayer_fee);
        Ok(Self { state })
    }

    #[handle_result]
    pub fn submit_multi_send_request(
        &mut self,
        sender: AccountId,
        nonce: u64,
        recipients: Vec<AccountId>,
        amounts: Vec<U128>,
        expiry: u64,
        signature: Vec<u8>,
    ) -> Result<(), RelayError> {
        require_not_paused!(self.state);
        multisend::submit_multi_send_request(
            &mut self.state,
            sender,
            nonce,
            recipients,
            amounts,
            expiry,
            signature,
        )
    }

    #[handle_result]
    pub fn execute_multi_send(&mut self, sender: AccountId, nonce: u64) -> Result<(), RelayError> {
        require_not_paused!(self.state);
        multisend::execute_multi_send(&mut self.state, sender, nonce)
    }

    #[payable]
    #[handle_result]
    pub fn deposit(&mut self) -> Result<(), RelayError> {
        require_not_paused!(self.state);
        balance::deposit(&mut self.state)
    }

    #[handle_result]
    pub fn withdraw(&mut self, amount: U128) -> Result<Promise, RelayError> {
        require_not_paused!(self.state);
        balance::withdraw(&mut self.state, amount)
    }

    #[handle_result]
    pub fn add_relayer(&mut self, relayer: AccountId) -> Result<(), RelayError> {
        require_not_paused!(self.state);
        admin::add_relayer(&mut self.state, relayer)
    }

    #[handle_result]
    pub fn remove_relayer(&mut self, relayer: AccountId) -> Result<(), RelayError> {
        require_not_paused!(self.state);
        admin::remove_relayer(&mut self.state, relayer)
    }

    #[handle_result]
    pub fn set_relayer_fee(&mut self, new_fee: U128) -> Result<(), RelayError> {
        require_not_paused!(self.state);
        admin::set_relayer_fee(&mut self.state, new_fee.0)
    }

    #[handle_result]
    pub fn set_owner(&mut self, new_owner: AccountId) -> Result<(), RelayError> {
        require_not_paused!(self.state);
        admin::set_owner(&mut self.state, new_owner)
    }

    #[handle_result]
    pub fn pause(&mut self) -> Result<(), RelayError> {
        admin::pause(&mut self.state, &env::predecessor_account_id())
    }

    #[handle_result]
    pub fn unpause(&mut self) -> Result<(), RelayError> {
        admin::unpause(&mut self.state, &env::predecessor_account_id())
    }

    #[handle_result]
    pub fn sweep_requests(
        &mut self,
        sender: AccountId,
        nonces: Vec<u64>,
    ) -> Result<u32, RelayError> {
        require_not_paused!(self.state);
        admin::sweep_requests(&mut self.state, sender, nonces)
    }

    #[handle_result]
    pub fn update_contract(&mut self) -> Result<Promise, RelayError> {
        admin::update_contract(&self.state)
    }

    #[private]
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        Self {
            state: RelayState::migrate(),
        }
    }

    pub fn get_user_nonce(&self, account_id: AccountId) -> u64 {
        self.state.nonce_of(&account_id)
    }

    pub fn is_authorized_relayer(&self, account_id: AccountId) -> bool {
        self.state.is_relayer(&account_id)
    }

    pub fn get_relayer_fee(&self) -> U128 {
        U128(self.state.relayer_fee)
    }

    pub fn get_relayers(&self, limit: u32, offset: u32) -> Vec<AccountId> {
        assert!(limit <= 100, "Limit exceeds maximum allowed value");
        let start = offset as usize;
        let end = (offset + limit) as usize;
        self.state
            .relayers
            .iter()
            .skip(start)
            .take(end - start)
            .cloned()
            .collect()
    }

    pub fn get_pending_request(
        &self,
        sender: AccountId,
        nonce: u64,
    ) -> Option<PendingRequestView> {
        self.state
            .pending_request(&sender, nonce)
            .map(|request| PendingRequestView {
                sender: sender.clone(),
                nonce,
                recipients: request.recipients.clone(),
                amounts: request.amounts.iter().map(|amount| U128(*amount)).collect(),
                expiry: request.expiry,
                fee: U128(request.fee),
                submitted_by: request.submitted_by.clone(),
            })
    }

    #[handle_result]
    pub fn compute_message_digest(
        &self,
        sender: AccountId,
        nonce: u64,
        recipients: Vec<AccountId>,
        amounts: Vec<U128>,
        expiry: u64,
        fee: U128,
    ) -> Result<String, RelayError> {
        let amounts: Vec<u128> = amounts.into_iter().map(|amount| amount.0).collect();
        let digest = digest::message_digest(&sender, nonce, &recipients, &amounts, expiry, fee.0)?;
        Ok(hex::encode(digest))
    }

    pub fn get_deposit_balance(&self, account_id: AccountId) -> U128 {
        U128(self.state.balance_of(&account_id))
    }

    pub fn get_owner(&self) -> &AccountId {
        &self.state.owner
    }

    pub fn get_paused(&self) -> bool {
        self.state.paused
    }

    pub fn get_version(&self) -> String {
        self.state.version.clone()
    }

    #[cfg(test)]
    pub fn set_nonce_for_test(&mut self, account_id: AccountId, nonce: u64) {
        self.state.nonces.insert(account_id, nonce);
    }
}
