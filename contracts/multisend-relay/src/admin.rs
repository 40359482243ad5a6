//! Owner-gated operations: relayer registry, fee and ownership changes,
//! pause switch, pending-request cleanup, and code upgrades.

use crate::constants::MAX_SWEEP_NONCES;
use crate::errors::RelayError;
use crate::events;
use crate::require_owner;
use crate::state::RelayState;
use near_sdk::{env, AccountId, Gas, NearToken, Promise};

const UPGRADE_CALL_GAS: Gas = Gas::from_tgas(200);
const NO_ARGS: Vec<u8> = vec![];

pub fn add_relayer(state: &mut RelayState, relayer: AccountId) -> Result<(), RelayError> {
    require_owner!(state, env::predecessor_account_id());
    AccountId::validate(relayer.as_str())
        .map_err(|_| RelayError::InvalidInput("Invalid relayer account ID".to_string()))?;
    if state.relayers.insert(relayer.clone()) {
        events::log_relayer_added(&relayer);
    }
    Ok(())
}

pub fn remove_relayer(state: &mut RelayState, relayer: AccountId) -> Result<(), RelayError> {
    require_owner!(state, env::predecessor_account_id());
    if state.relayers.remove(&relayer) {
        events::log_relayer_removed(&relayer);
    }
    Ok(())
}

/// Changes the fee charged on future submissions. Requests already pending
/// keep the fee they were submitted under.
pub fn set_relayer_fee(state: &mut RelayState, new_fee: u128) -> Result<(), RelayError> {
    require_owner!(state, env::predecessor_account_id());
    if state.relayer_fee == new_fee {
        return Ok(());
    }
    let old_fee = state.relayer_fee;
    state.relayer_fee = new_fee;
    events::log_config_changed(
        "relayer_fee",
        &old_fee.to_string(),
        &new_fee.to_string(),
        &env::predecessor_account_id(),
    );
    Ok(())
}

pub fn set_owner(state: &mut RelayState, new_owner: AccountId) -> Result<(), RelayError> {
    require_owner!(state, env::predecessor_account_id());
    AccountId::validate(new_owner.as_str())
        .map_err(|_| RelayError::InvalidInput("Invalid owner account ID".to_string()))?;
    if state.owner == new_owner {
        return Ok(());
    }
    let old_owner = state.owner.to_string();
    state.owner = new_owner;
    events::log_config_changed(
        "owner",
        &old_owner,
        state.owner.as_str(),
        &env::predecessor_account_id(),
    );
    Ok(())
}

pub fn pause(state: &mut RelayState, caller: &AccountId) -> Result<(), RelayError> {
    require_owner!(state, *caller);
    if state.paused {
        return Ok(());
    }
    state.paused = true;
    events::log_paused(caller);
    Ok(())
}

pub fn unpause(state: &mut RelayState, caller: &AccountId) -> Result<(), RelayError> {
    require_owner!(state, *caller);
    if !state.paused {
        return Ok(());
    }
    state.paused = false;
    events::log_unpaused(caller);
    Ok(())
}

/// Removes pending entries that can never execute: nonces at or below the
/// sender's executed nonce, and entries past their expiry height. Live
/// entries are left untouched.
pub fn sweep_requests(
    state: &mut RelayState,
    sender: AccountId,
    nonces: Vec<u64>,
) -> Result<u32, RelayError> {
    require_owner!(state, env::predecessor_account_id());
    crate::require!(
        nonces.len() <= MAX_SWEEP_NONCES,
        RelayError::InvalidInput("Too many nonces in one sweep".to_string())
    );

    let executed = state.nonce_of(&sender);
    let height = env::block_height();
    let mut removed = 0u32;
    for nonce in nonces {
        let dead = match state.pending_request(&sender, nonce) {
            Some(request) => nonce <= executed || request.expiry <= height,
            None => false,
        };
        if dead {
            state.remove_request(&sender, nonce);
            removed += 1;
        }
    }

    if removed > 0 {
        events::log_requests_swept(&sender, removed);
    }
    Ok(removed)
}

pub fn update_contract(state: &RelayState) -> Result<Promise, RelayError> {
    require_owner!(state, env::predecessor_account_id());
    let code = env::input()
        .filter(|input| !input.is_empty())
        .ok_or(RelayError::MissingInput)?
        .to_vec();
    events::log_contract_upgraded(&state.owner);
    Ok(Promise::new(env::current_account_id())
        .deploy_contract(code)
        .function_call(
            "migrate".to_string(),
            NO_ARGS,
            NearToken::from_near(0),
            UPGRADE_CALL_GAS,
        ))
}
