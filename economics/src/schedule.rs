//! Cliff + linear unlock schedules
//!
//! Both allocation buckets and grants resolve their unlocked amount through
//! [`VestingSchedule`]. All arithmetic floors to the indivisible unit; the
//! schedule end always returns the exact total.

use serde::{Deserialize, Serialize};

use crate::error::{EconomicsError, Result};

/// How the initial-unlock percentage is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VestingKind {
    /// Nothing unlocks before the cliff; the initial percentage is released
    /// at cliff end, then the remainder vests linearly
    #[default]
    Linear,
    /// The initial percentage is released at the schedule start (TGE), the
    /// remainder vests linearly after the cliff
    TgeUnlockPlusLinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Total amount governed by the schedule
    pub total: u64,
    /// Unix timestamp the cliff is measured from
    pub start: u64,
    /// Cliff duration in seconds
    pub cliff: u64,
    /// Linear vesting duration in seconds, after the cliff
    pub duration: u64,
    /// Percentage of `total` released up front (0..=100)
    pub initial_unlock_pct: u8,
    pub kind: VestingKind,
}

/// Point-in-time unlock result, derived and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockEvent {
    pub as_of: u64,
    /// Unlocked between the previous query and `as_of`
    pub newly_unlocked: u64,
    pub cumulative_unlocked: u64,
    pub remaining_locked: u64,
}

impl VestingSchedule {
    pub fn validate(&self) -> Result<()> {
        if self.total == 0 {
            return Err(EconomicsError::InvalidAllocation(
                "total amount must be positive".to_string(),
            ));
        }
        if self.initial_unlock_pct > 100 {
            return Err(EconomicsError::InvalidAllocation(format!(
                "initial unlock {}% is outside 0..=100",
                self.initial_unlock_pct
            )));
        }
        Ok(())
    }

    pub fn initial_unlock(&self) -> u64 {
        (self.total as u128 * self.initial_unlock_pct as u128 / 100) as u64
    }

    pub fn cliff_end(&self) -> u64 {
        self.start.saturating_add(self.cliff)
    }

    /// First instant at which the whole total is unlocked
    pub fn end(&self) -> u64 {
        self.cliff_end().saturating_add(self.duration)
    }

    pub fn unlocked_at(&self, as_of: u64) -> u64 {
        if as_of < self.start {
            return 0;
        }

        let initial = self.initial_unlock();
        let cliff_end = self.cliff_end();

        if as_of < cliff_end {
            return match self.kind {
                VestingKind::TgeUnlockPlusLinear => initial,
                VestingKind::Linear => 0,
            };
        }

        // Zero duration releases the remainder atomically at cliff end
        if self.duration == 0 || as_of >= self.end() {
            return self.total;
        }

        let elapsed = (as_of - cliff_end) as u128;
        let remainder = (self.total - initial) as u128;
        let linear = remainder * elapsed / self.duration as u128;

        initial + linear as u64
    }

    pub fn locked_at(&self, as_of: u64) -> u64 {
        self.total - self.unlocked_at(as_of)
    }

    pub fn is_fully_vested(&self, as_of: u64) -> bool {
        self.unlocked_at(as_of) == self.total
    }

    /// Unlock delta between `since` (exclusive baseline) and `as_of`.
    ///
    /// Without a previous query everything unlocked so far counts as new.
    pub fn unlock_event(&self, since: Option<u64>, as_of: u64) -> UnlockEvent {
        let cumulative = self.unlocked_at(as_of);
        let previous = since.map(|t| self.unlocked_at(t)).unwrap_or(0);

        UnlockEvent {
            as_of,
            newly_unlocked: cumulative.saturating_sub(previous),
            cumulative_unlocked: cumulative,
            remaining_locked: self.total - cumulative,
        }
    }
}
