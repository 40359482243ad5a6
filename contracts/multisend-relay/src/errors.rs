use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::{env, FunctionError};
use near_sdk_macros::NearSchema;

#[derive(Debug, PartialEq, NearSchema, BorshSerialize, BorshDeserialize)]
#[abi(borsh)]
#[borsh(crate = "near_sdk::borsh")]
pub enum RelayError {
    UnauthorizedRelayer,
    NonceMismatch,
    Expired,
    InvalidSignature,
    MalformedRequest,
    RequestNotFound,
    InsufficientBalance,
    TransferFailed,
    OwnerOnly,
    Paused,
    InsufficientDeposit,
    InvalidInput(String),
    MissingInput,
    SerializationError,
}

impl FunctionError for RelayError {
    fn panic(&self) -> ! {
        env::panic_str(&format!("RelayError: {:?}", self))
    }
}
