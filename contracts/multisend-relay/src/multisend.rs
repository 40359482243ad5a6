//! Batch transfer engine: accepts signed multi-send requests relayed on
//! behalf of senders and settles them against the deposit ledger.
//!
//! Submission re-derives the message digest from the call arguments and the
//! current fee, so a signature can only ever admit the exact batch the
//! sender authorized. Execution applies the whole batch against an
//! in-memory plan first and commits only when every leg fits, so a failed
//! batch leaves no trace beyond its pending entry.

use std::collections::HashMap;

use crate::constants::MAX_RECIPIENTS;
use crate::digest::{message_digest, verify_sender_signature};
use crate::errors::RelayError;
use crate::events;
use crate::state::RelayState;
use crate::types::PendingRequest;
use near_sdk::json_types::U128;
use near_sdk::{env, AccountId};

pub fn submit_multi_send_request(
    state: &mut RelayState,
    sender: AccountId,
    nonce: u64,
    recipients: Vec<AccountId>,
    amounts: Vec<U128>,
    expiry: u64,
    signature: Vec<u8>,
) -> Result<(), RelayError> {
    let relayer = env::predecessor_account_id();
    crate::require!(state.is_relayer(&relayer), RelayError::UnauthorizedRelayer);
    crate::require!(
        state.nonce_of(&sender).checked_add(1) == Some(nonce),
        RelayError::NonceMismatch
    );
    crate::require!(expiry > env::block_height(), RelayError::Expired);

    let amounts: Vec<u128> = amounts.into_iter().map(|amount| amount.0).collect();
    let fee = state.relayer_fee;
    let digest = message_digest(&sender, nonce, &recipients, &amounts, expiry, fee)?;
    crate::require!(
        verify_sender_signature(&digest, &signature, &sender),
        RelayError::InvalidSignature
    );
    crate::require!(
        recipients.len() == amounts.len() && recipients.len() <= MAX_RECIPIENTS,
        RelayError::MalformedRequest
    );

    state.store_request(
        &sender,
        nonce,
        PendingRequest {
            recipients,
            amounts,
            expiry,
            fee,
            submitted_by: relayer.clone(),
        },
    );
    events::log_multi_send_submitted(&sender, nonce, &relayer, fee, expiry);
    Ok(())
}

pub fn execute_multi_send(
    state: &mut RelayState,
    sender: AccountId,
    nonce: u64,
) -> Result<(), RelayError> {
    let caller = env::predecessor_account_id();
    let request = state
        .pending_request(&sender, nonce)
        .cloned()
        .ok_or(RelayError::RequestNotFound)?;

    // Conditions verified at submission are re-checked here; relayer
    // membership, the sender's nonce, and the chain height may all have
    // moved since the request was stored.
    crate::require!(state.is_relayer(&caller), RelayError::UnauthorizedRelayer);
    crate::require!(
        state.nonce_of(&sender).checked_add(1) == Some(nonce),
        RelayError::NonceMismatch
    );
    let height = env::block_height();
    crate::require!(request.expiry > height, RelayError::Expired);

    // A total that overflows u128 can never be covered by any balance.
    let total = checked_total(&request.amounts).ok_or(RelayError::InsufficientBalance)?;
    let required = total
        .checked_add(request.fee)
        .ok_or(RelayError::InsufficientBalance)?;
    crate::require!(
        state.balance_of(&sender) >= required,
        RelayError::InsufficientBalance
    );

    let mut planned: HashMap<AccountId, u128> = HashMap::new();
    for (recipient, amount) in request.recipients.iter().zip(request.amounts.iter()) {
        planned_debit(state, &mut planned, &sender, *amount)?;
        planned_credit(state, &mut planned, recipient, *amount)?;
    }
    planned_debit(state, &mut planned, &sender, request.fee)?;
    planned_credit(state, &mut planned, &request.submitted_by, request.fee)?;

    for (account_id, balance) in planned {
        state.balances.insert(account_id, balance);
    }
    state.advance_nonce(&sender, nonce);
    state.remove_request(&sender, nonce);
    events::log_multi_send_executed(&sender, nonce, &request.recipients, &request.amounts, height);
    Ok(())
}

fn checked_total(amounts: &[u128]) -> Option<u128> {
    amounts
        .iter()
        .try_fold(0u128, |total, amount| total.checked_add(*amount))
}

fn planned_balance(
    state: &RelayState,
    planned: &HashMap<AccountId, u128>,
    account_id: &AccountId,
) -> u128 {
    match planned.get(account_id) {
        Some(balance) => *balance,
        None => state.balance_of(account_id),
    }
}

fn planned_debit(
    state: &RelayState,
    planned: &mut HashMap<AccountId, u128>,
    account_id: &AccountId,
    amount: u128,
) -> Result<(), RelayError> {
    let updated = planned_balance(state, planned, account_id)
        .checked_sub(amount)
        .ok_or(RelayError::TransferFailed)?;
    planned.insert(account_id.clone(), updated);
    Ok(())
}

fn planned_credit(
    state: &RelayState,
    planned: &mut HashMap<AccountId, u128>,
    account_id: &AccountId,
    amount: u128,
) -> Result<(), RelayError> {
    let updated = planned_balance(state, planned, account_id)
        .checked_add(amount)
        .ok_or(RelayError::TransferFailed)?;
    planned.insert(account_id.clone(), updated);
    Ok(())
}
