//! Shared constants for the multisend relay contract and modules.
//!
//! Defines:
//! - Batch and sweep size limits
//! - Recoverable signature layout
//! - Fallback relayer fee for state recovery

// Batch and sweep limits
pub const MAX_RECIPIENTS: usize = 50;
pub const MAX_SWEEP_NONCES: usize = 100;

// Recoverable secp256k1 signature: r (32 bytes) || s (32 bytes) || v (1 byte)
pub const SIGNATURE_LENGTH: usize = 65;

// Relayer fee used when migration has to rebuild state from scratch
pub const FALLBACK_RELAYER_FEE: u128 = 10_000_000_000_000_000_000_000; // 0.01 NEAR
