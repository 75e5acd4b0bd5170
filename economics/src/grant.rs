//! Beneficiary grants inside a bucket

use serde::{Deserialize, Serialize};

use crate::bucket::{AllocationBucket, BucketKind};
use crate::error::{EconomicsError, Result};
use crate::schedule::{VestingKind, VestingSchedule};

pub type GrantId = u64;

/// Per-grant schedule parameters, used by investment rounds that do not
/// follow the parent bucket's terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOverride {
    pub cliff_duration: u64,
    pub vesting_duration: u64,
    pub initial_unlock_pct: u8,
    #[serde(default)]
    pub vesting_kind: VestingKind,
}

/// Parameters for registering a grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantParams {
    pub bucket: BucketKind,
    pub beneficiary: String,
    pub amount: u64,
    /// Seconds after TGE at which the grant's clock starts
    #[serde(default)]
    pub start_offset: u64,
    #[serde(default)]
    pub schedule_override: Option<ScheduleOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub id: GrantId,
    pub bucket: BucketKind,
    pub beneficiary: String,
    pub schedule: VestingSchedule,
}

impl Grant {
    pub fn new(id: GrantId, params: GrantParams, parent: &AllocationBucket, tge: u64) -> Result<Self> {
        if params.beneficiary.trim().is_empty() {
            return Err(EconomicsError::InvalidAllocation(
                "grant beneficiary must not be empty".to_string(),
            ));
        }

        let inherited = &parent.schedule;
        let (cliff, duration, initial_unlock_pct, kind) = match params.schedule_override {
            Some(o) => (o.cliff_duration, o.vesting_duration, o.initial_unlock_pct, o.vesting_kind),
            None => (
                inherited.cliff,
                inherited.duration,
                inherited.initial_unlock_pct,
                inherited.kind,
            ),
        };

        let schedule = VestingSchedule {
            total: params.amount,
            start: tge.saturating_add(params.start_offset),
            cliff,
            duration,
            initial_unlock_pct,
            kind,
        };
        schedule.validate()?;

        Ok(Self {
            id,
            bucket: params.bucket,
            beneficiary: params.beneficiary,
            schedule,
        })
    }

    pub fn amount(&self) -> u64 {
        self.schedule.total
    }

    pub fn unlocked_at(&self, as_of: u64) -> u64 {
        self.schedule.unlocked_at(as_of)
    }

    pub fn locked_at(&self, as_of: u64) -> u64 {
        self.schedule.locked_at(as_of)
    }
}
