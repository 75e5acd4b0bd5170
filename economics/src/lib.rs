//! Bloomex Economics Module
//!
//! Implements the token distribution model including:
//! - Allocation buckets with cliff and linear unlock schedules
//! - Per-beneficiary grants inside buckets
//! - Anti-dump sell fees and the daily sell limit
//! - Staking APY tiers and staking positions
//! - Quarterly fee burns with a lifetime cap

pub mod bucket;
pub mod engine;
pub mod error;
pub mod fees;
pub mod genesis;
pub mod grant;
pub mod schedule;
pub mod staking;
pub mod supply;
pub mod tiers;

pub use bucket::{AllocationBucket, BucketKind, BucketParams};
pub use engine::{SellWindowStatus, VestingEngine};
pub use error::{EconomicsError, Result};
pub use fees::{anti_dump_fee_bps, daily_sell_limit, DailySellWindow, FeeQuote};
pub use genesis::{BucketSpec, GenesisConfig, GrantSpec, ScheduleSpec};
pub use grant::{Grant, GrantId, GrantParams, ScheduleOverride};
pub use schedule::{UnlockEvent, VestingKind, VestingSchedule};
pub use staking::{
    staking_apy, Claimed, PoolStats, StakePosition, StakeStatus, StakingApy, StakingPool,
    StakingTier, Unstaked, MAX_STAKE,
};
pub use supply::{BurnOutcome, SupplyManager, SupplyStats};

/// Economic constants
pub mod constants {
    /// Fixed total supply at TGE, in indivisible units
    pub const TOTAL_SUPPLY: u64 = 10_000_000_000;

    /// Seconds per day
    pub const DAY: u64 = 86_400;

    /// Schedule month (30 days)
    pub const MONTH: u64 = 30 * DAY;

    /// Burn cadence (90 days)
    pub const QUARTER: u64 = 90 * DAY;

    /// Seconds per year (365 days)
    pub const YEAR: u64 = 365 * DAY;

    /// Basis points in 100%
    pub const BPS_DENOMINATOR: u64 = 10_000;

    /// Daily sell limit: 0.1% of circulating supply
    pub const DAILY_SELL_LIMIT_BPS: u64 = 10;

    /// Share of collected fees burned each quarter (1%)
    pub const BURN_RATE_BPS: u64 = 100;

    /// Lifetime burn cap: 10% of the original supply
    pub const BURN_CAP: u64 = TOTAL_SUPPLY / 10;

    /// Window after TGE during which burns may run
    pub const BURN_HORIZON: u64 = 5 * YEAR;
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_module_constants() {
        assert_eq!(TOTAL_SUPPLY, 10_000_000_000);
        assert_eq!(BURN_CAP, 1_000_000_000);
        assert_eq!(MONTH, 2_592_000);
        assert_eq!(BURN_HORIZON, 1_825 * DAY);
    }
}
