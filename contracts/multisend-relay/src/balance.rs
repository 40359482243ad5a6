//! Deposit ledger: senders prefund the contract, batches settle against
//! these internal balances.

use crate::errors::RelayError;
use crate::events;
use crate::state::RelayState;
use near_sdk::json_types::U128;
use near_sdk::{env, NearToken, Promise};

pub fn deposit(state: &mut RelayState) -> Result<(), RelayError> {
    let account_id = env::predecessor_account_id();
    let amount = env::attached_deposit().as_yoctonear();
    if amount == 0 {
        return Err(RelayError::InsufficientDeposit);
    }

    state.credit(&account_id, amount)?;
    events::log_deposit(&account_id, amount, state.balance_of(&account_id));
    Ok(())
}

pub fn withdraw(state: &mut RelayState, amount: U128) -> Result<Promise, RelayError> {
    let account_id = env::predecessor_account_id();
    crate::require!(
        amount.0 > 0,
        RelayError::InvalidInput("Withdrawal amount must be greater than zero".to_string())
    );

    state.debit(&account_id, amount.0)?;
    events::log_withdrawal(&account_id, amount.0, state.balance_of(&account_id));
    Ok(Promise::new(account_id).transfer(NearToken::from_yoctonear(amount.0)))
}
