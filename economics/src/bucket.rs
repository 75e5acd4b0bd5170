//! Top-level allocation buckets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EconomicsError, Result};
use crate::schedule::{VestingKind, VestingSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Team,
    Advisors,
    Seed,
    Private1,
    Private2,
    PublicSale,
    Reserves,
    Liquidity,
    Ecosystem,
    Community,
}

impl BucketKind {
    pub const ALL: [BucketKind; 10] = [
        BucketKind::Team,
        BucketKind::Advisors,
        BucketKind::Seed,
        BucketKind::Private1,
        BucketKind::Private2,
        BucketKind::PublicSale,
        BucketKind::Reserves,
        BucketKind::Liquidity,
        BucketKind::Ecosystem,
        BucketKind::Community,
    ];

    /// Identifier used in URLs and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketKind::Team => "team",
            BucketKind::Advisors => "advisors",
            BucketKind::Seed => "seed",
            BucketKind::Private1 => "private1",
            BucketKind::Private2 => "private2",
            BucketKind::PublicSale => "public_sale",
            BucketKind::Reserves => "reserves",
            BucketKind::Liquidity => "liquidity",
            BucketKind::Ecosystem => "ecosystem",
            BucketKind::Community => "community",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BucketKind::Team => "Team",
            BucketKind::Advisors => "Advisors",
            BucketKind::Seed => "Seed Round",
            BucketKind::Private1 => "Private Round 1",
            BucketKind::Private2 => "Private Round 2",
            BucketKind::PublicSale => "Public Sale",
            BucketKind::Reserves => "Reserves",
            BucketKind::Liquidity => "Liquidity",
            BucketKind::Ecosystem => "Ecosystem",
            BucketKind::Community => "Community",
        }
    }
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BucketKind {
    type Err = EconomicsError;

    /// Accepts identifiers and labels, ignoring case, spaces, `-` and `_`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        BucketKind::ALL
            .into_iter()
            .find(|kind| {
                let id = kind.as_str().replace('_', "");
                let label = kind.label().replace(' ', "").to_lowercase();
                wanted == id || wanted == label
            })
            .ok_or_else(|| EconomicsError::UnknownBucket(s.to_string()))
    }
}

/// Parameters for registering a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketParams {
    pub kind: BucketKind,
    pub total_amount: u64,
    /// Seconds after TGE before linear vesting starts
    pub cliff_duration: u64,
    /// Seconds of linear vesting after the cliff
    pub vesting_duration: u64,
    pub initial_unlock_pct: u8,
    #[serde(default)]
    pub vesting_kind: VestingKind,
}

/// An immutable bucket record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationBucket {
    pub kind: BucketKind,
    pub schedule: VestingSchedule,
}

impl AllocationBucket {
    pub fn new(params: BucketParams, tge: u64) -> Result<Self> {
        let schedule = VestingSchedule {
            total: params.total_amount,
            start: tge,
            cliff: params.cliff_duration,
            duration: params.vesting_duration,
            initial_unlock_pct: params.initial_unlock_pct,
            kind: params.vesting_kind,
        };
        schedule.validate()?;

        Ok(Self {
            kind: params.kind,
            schedule,
        })
    }

    pub fn total_amount(&self) -> u64 {
        self.schedule.total
    }

    pub fn unlocked_at(&self, as_of: u64) -> u64 {
        self.schedule.unlocked_at(as_of)
    }

    pub fn locked_at(&self, as_of: u64) -> u64 {
        self.schedule.locked_at(as_of)
    }
}
