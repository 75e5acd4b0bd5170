//! Genesis distribution
//!
//! Describes the bucket table and any investor grants created at TGE. The
//! canonical Bloomex table is available through [`GenesisConfig::bloomex`];
//! alternative tables load from JSON.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bucket::{BucketKind, BucketParams};
use crate::constants::{DAY, MONTH};
use crate::engine::VestingEngine;
use crate::error::{EconomicsError, Result};
use crate::grant::{GrantParams, ScheduleOverride};
use crate::schedule::VestingKind;

/// Schedule terms expressed in 30-day months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    #[serde(default)]
    pub cliff_months: u64,
    #[serde(default)]
    pub vesting_months: u64,
    #[serde(default)]
    pub initial_unlock_pct: u8,
    #[serde(default)]
    pub vesting_kind: VestingKind,
}

/// `count` units of `unit` seconds, rejecting values that overflow a timestamp
fn span(count: u64, unit: u64, field: &str) -> Result<u64> {
    count.checked_mul(unit).ok_or_else(|| {
        EconomicsError::InvalidAllocation(format!("{} of {} is out of range", field, count))
    })
}

impl ScheduleSpec {
    pub fn cliff_duration(&self) -> Result<u64> {
        span(self.cliff_months, MONTH, "cliff_months")
    }

    pub fn vesting_duration(&self) -> Result<u64> {
        span(self.vesting_months, MONTH, "vesting_months")
    }

    pub fn to_override(&self) -> Result<ScheduleOverride> {
        Ok(ScheduleOverride {
            cliff_duration: self.cliff_duration()?,
            vesting_duration: self.vesting_duration()?,
            initial_unlock_pct: self.initial_unlock_pct,
            vesting_kind: self.vesting_kind,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub kind: BucketKind,
    pub total_amount: u64,
    #[serde(flatten)]
    pub schedule: ScheduleSpec,
}

impl BucketSpec {
    pub fn to_params(&self) -> Result<BucketParams> {
        Ok(BucketParams {
            kind: self.kind,
            total_amount: self.total_amount,
            cliff_duration: self.schedule.cliff_duration()?,
            vesting_duration: self.schedule.vesting_duration()?,
            initial_unlock_pct: self.schedule.initial_unlock_pct,
            vesting_kind: self.schedule.vesting_kind,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSpec {
    pub bucket: BucketKind,
    pub beneficiary: String,
    pub amount: u64,
    #[serde(default)]
    pub start_offset_days: u64,
    #[serde(default)]
    pub schedule: Option<ScheduleSpec>,
}

impl GrantSpec {
    pub fn to_params(&self) -> Result<GrantParams> {
        Ok(GrantParams {
            bucket: self.bucket,
            beneficiary: self.beneficiary.clone(),
            amount: self.amount,
            start_offset: span(self.start_offset_days, DAY, "start_offset_days")?,
            schedule_override: self.schedule.map(|s| s.to_override()).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// TGE as a unix timestamp
    pub tge: u64,
    pub buckets: Vec<BucketSpec>,
    #[serde(default)]
    pub grants: Vec<GrantSpec>,
}

const fn bucket(
    kind: BucketKind,
    total_amount: u64,
    cliff_months: u64,
    vesting_months: u64,
    initial_unlock_pct: u8,
    vesting_kind: VestingKind,
) -> BucketSpec {
    BucketSpec {
        kind,
        total_amount,
        schedule: ScheduleSpec {
            cliff_months,
            vesting_months,
            initial_unlock_pct,
            vesting_kind,
        },
    }
}

/// The published Bloomex distribution (10,000,000,000 tokens)
pub const BLOOMEX_BUCKETS: [BucketSpec; 10] = {
    use BucketKind::*;
    use VestingKind::*;
    [
        bucket(Team, 1_500_000_000, 12, 24, 0, Linear),
        bucket(Advisors, 500_000_000, 6, 18, 0, Linear),
        bucket(Seed, 400_000_000, 6, 12, 5, TgeUnlockPlusLinear),
        bucket(Private1, 600_000_000, 3, 12, 10, TgeUnlockPlusLinear),
        bucket(Private2, 500_000_000, 3, 9, 10, TgeUnlockPlusLinear),
        bucket(PublicSale, 500_000_000, 0, 6, 25, TgeUnlockPlusLinear),
        bucket(Reserves, 1_500_000_000, 12, 36, 0, Linear),
        bucket(Liquidity, 1_000_000_000, 0, 0, 100, TgeUnlockPlusLinear),
        bucket(Ecosystem, 2_000_000_000, 1, 48, 5, TgeUnlockPlusLinear),
        bucket(Community, 1_500_000_000, 0, 36, 10, TgeUnlockPlusLinear),
    ]
};

impl GenesisConfig {
    pub fn bloomex(tge: u64) -> Self {
        Self {
            tge,
            buckets: BLOOMEX_BUCKETS.to_vec(),
            grants: Vec::new(),
        }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| EconomicsError::SerializationError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EconomicsError::SerializationError(e.to_string()))
    }

    /// Sum of bucket totals, saturating for tables that could never build
    pub fn total_allocated(&self) -> u64 {
        self.buckets
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.total_amount))
    }

    /// Register every bucket, then every grant, on a fresh engine.
    pub fn build(&self) -> Result<VestingEngine> {
        let engine = VestingEngine::new(self.tge);

        for spec in &self.buckets {
            engine.register_bucket(spec.to_params()?)?;
        }
        for spec in &self.grants {
            engine.register_grant(spec.to_params()?)?;
        }

        info!(
            "Genesis loaded: {} buckets, {} grants, {} tokens allocated",
            self.buckets.len(),
            self.grants.len(),
            engine.total_allocated()
        );

        Ok(engine)
    }
}
