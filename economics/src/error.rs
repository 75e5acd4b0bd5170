//! Economics error types

use thiserror::Error;

/// Vesting ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomicsError {
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(String),

    #[error("Sell of {requested} exceeds daily limit: {remaining} of {limit} remaining today")]
    ExceedsDailyLimit {
        requested: u64,
        remaining: u64,
        limit: u64,
    },

    #[error("Unknown bucket: {0}")]
    UnknownBucket(String),

    #[error("Bucket not registered: {0}")]
    BucketNotFound(String),

    #[error("Grant not found: {0}")]
    GrantNotFound(u64),

    #[error("Stake of {amount} is below the minimum of {minimum}")]
    BelowMinimumStake { amount: u64, minimum: u64 },

    #[error("Stake already active for {0}")]
    StakeExists(String),

    #[error("No stake found for {0}")]
    StakeNotFound(String),

    #[error("Stake is locked until {unlocks_at}")]
    StakeLocked { unlocks_at: u64 },

    #[error("Burn not due until {next_at}")]
    BurnNotDue { next_at: u64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, EconomicsError>;
