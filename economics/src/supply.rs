//! Supply tracking, fee collection and quarterly burns

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{BPS_DENOMINATOR, BURN_CAP, BURN_HORIZON, BURN_RATE_BPS, QUARTER, TOTAL_SUPPLY};
use crate::error::{EconomicsError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyStats {
    pub original_supply: u64,
    pub total_supply: u64,
    pub total_burned: u64,
    pub fees_collected: u64,
    pub fees_since_last_burn: u64,
    pub burn_count: u64,
    pub last_burn_at: Option<u64>,
    pub next_burn_at: u64,
}

/// Result of a burn attempt. Reaching the cap is not an error; the burn is
/// simply a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BurnOutcome {
    Burned { amount: u64, cumulative_burned: u64 },
    CapExceeded { cumulative_burned: u64 },
    HorizonElapsed { cumulative_burned: u64 },
}

impl BurnOutcome {
    pub fn burned(&self) -> u64 {
        match self {
            BurnOutcome::Burned { amount, .. } => *amount,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SupplyManager {
    tge: u64,
    total_burned: u64,
    fees_collected: u64,
    fees_since_last_burn: u64,
    burn_count: u64,
    last_burn_at: Option<u64>,
    last_burn_quarter: Option<u64>,
}

impl SupplyManager {
    pub fn new(tge: u64) -> Self {
        Self {
            tge,
            total_burned: 0,
            fees_collected: 0,
            fees_since_last_burn: 0,
            burn_count: 0,
            last_burn_at: None,
            last_burn_quarter: None,
        }
    }

    pub fn record_fee(&mut self, amount: u64) {
        self.fees_collected = self.fees_collected.saturating_add(amount);
        self.fees_since_last_burn = self.fees_since_last_burn.saturating_add(amount);
    }

    pub fn total_burned(&self) -> u64 {
        self.total_burned
    }

    /// Original supply minus everything burned
    pub fn total_supply(&self) -> u64 {
        TOTAL_SUPPLY - self.total_burned
    }

    /// Tokens in circulation given the total unlocked across all buckets
    pub fn circulating(&self, total_unlocked: u64) -> u64 {
        total_unlocked.saturating_sub(self.total_burned)
    }

    /// Earliest timestamp at which the next burn may run
    pub fn next_burn_at(&self) -> u64 {
        let quarter = self.last_burn_quarter.map_or(1, |q| q + 1);
        self.tge.saturating_add(quarter.saturating_mul(QUARTER))
    }

    /// Burn 1% of the fees collected since the previous burn.
    ///
    /// Runs at most once per quarter after TGE. The amount is truncated to
    /// the remaining cap headroom; once the cap or the horizon is reached
    /// the call succeeds without burning anything.
    pub fn execute_burn(&mut self, now: u64) -> Result<BurnOutcome> {
        let cumulative_burned = self.total_burned;

        if now >= self.tge.saturating_add(BURN_HORIZON) {
            debug!("Burn requested after the burn horizon, skipping");
            return Ok(BurnOutcome::HorizonElapsed { cumulative_burned });
        }

        let next_at = self.next_burn_at();
        if now < next_at {
            return Err(EconomicsError::BurnNotDue { next_at });
        }

        let headroom = BURN_CAP - self.total_burned;
        if headroom == 0 {
            debug!("Burn cap of {} reached, skipping", BURN_CAP);
            return Ok(BurnOutcome::CapExceeded { cumulative_burned });
        }

        let due = (self.fees_since_last_burn as u128 * BURN_RATE_BPS as u128
            / BPS_DENOMINATOR as u128) as u64;
        let amount = due.min(headroom);

        self.total_burned += amount;
        self.fees_since_last_burn = 0;
        self.burn_count += 1;
        self.last_burn_at = Some(now);
        self.last_burn_quarter = Some((now - self.tge) / QUARTER);

        info!(
            "Burned {} tokens (cumulative {} of cap {})",
            amount, self.total_burned, BURN_CAP
        );

        Ok(BurnOutcome::Burned {
            amount,
            cumulative_burned: self.total_burned,
        })
    }

    pub fn stats(&self) -> SupplyStats {
        SupplyStats {
            original_supply: TOTAL_SUPPLY,
            total_supply: self.total_supply(),
            total_burned: self.total_burned,
            fees_collected: self.fees_collected,
            fees_since_last_burn: self.fees_since_last_burn,
            burn_count: self.burn_count,
            last_burn_at: self.last_burn_at,
            next_burn_at: self.next_burn_at(),
        }
    }
}
