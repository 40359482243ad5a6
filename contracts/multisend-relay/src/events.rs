//! NEP-297 event logs emitted by the multisend relay.

use near_sdk::json_types::U128;
use near_sdk::serde_json::{json, Value};
use near_sdk::{env, AccountId};

pub const EVENT_STANDARD: &str = "multisend-relay";
pub const EVENT_VERSION: &str = "1.0.0";

fn log_event(event: &str, data: Value) {
    let payload = json!({
        "standard": EVENT_STANDARD,
        "version": EVENT_VERSION,
        "event": event,
        "data": data,
    });
    env::log_str(&format!("EVENT_JSON:{}", payload));
}

pub fn log_contract_initialized(owner: &AccountId, relayer_fee: u128) {
    log_event(
        "contract-initialized",
        json!({ "owner": owner, "relayer_fee": U128(relayer_fee) }),
    );
}

pub fn log_multi_send_submitted(
    sender: &AccountId,
    nonce: u64,
    relayer: &AccountId,
    fee: u128,
    expiry: u64,
) {
    log_event(
        "multi-send-submitted",
        json!({
            "sender": sender,
            "nonce": nonce,
            "relayer": relayer,
            "fee": U128(fee),
            "expiry": expiry,
        }),
    );
}

pub fn log_multi_send_executed(
    sender: &AccountId,
    nonce: u64,
    recipients: &[AccountId],
    amounts: &[u128],
    height: u64,
) {
    let amounts: Vec<U128> = amounts.iter().map(|amount| U128(*amount)).collect();
    log_event(
        "multi-send-executed",
        json!({
            "sender": sender,
            "nonce": nonce,
            "recipients": recipients,
            "amounts": amounts,
            "height": height,
        }),
    );
}

pub fn log_deposit(account_id: &AccountId, amount: u128, new_balance: u128) {
    log_event(
        "deposit",
        json!({
            "account_id": account_id,
            "amount": U128(amount),
            "new_balance": U128(new_balance),
        }),
    );
}

pub fn log_withdrawal(account_id: &AccountId, amount: u128, new_balance: u128) {
    log_event(
        "withdrawal",
        json!({
            "account_id": account_id,
            "amount": U128(amount),
            "new_balance": U128(new_balance),
        }),
    );
}

pub fn log_relayer_added(relayer: &AccountId) {
    log_event("relayer-added", json!({ "relayer": relayer }));
}

pub fn log_relayer_removed(relayer: &AccountId) {
    log_event("relayer-removed", json!({ "relayer": relayer }));
}

pub fn log_config_changed(setting: &str, old_value: &str, new_value: &str, changed_by: &AccountId) {
    log_event(
        "config-changed",
        json!({
            "setting": setting,
            "old_value": old_value,
            "new_value": new_value,
            "changed_by": changed_by,
            "timestamp": env::block_timestamp_ms(),
        }),
    );
}

pub fn log_paused(paused_by: &AccountId) {
    log_event(
        "paused",
        json!({ "by": paused_by, "timestamp": env::block_timestamp_ms() }),
    );
}

pub fn log_unpaused(unpaused_by: &AccountId) {
    log_event(
        "unpaused",
        json!({ "by": unpaused_by, "timestamp": env::block_timestamp_ms() }),
    );
}

pub fn log_requests_swept(sender: &AccountId, removed: u32) {
    log_event(
        "requests-swept",
        json!({ "sender": sender, "removed": removed }),
    );
}

pub fn log_state_migrated(old_version: &str, new_version: &str) {
    log_event(
        "state-migrated",
        json!({ "old_version": old_version, "new_version": new_version }),
    );
}

pub fn log_contract_upgraded(owner: &AccountId) {
    log_event(
        "contract-upgraded",
        json!({ "owner": owner, "timestamp": env::block_timestamp_ms() }),
    );
}
