//! Anti-dump sell fees and the daily sell limit

use serde::{Deserialize, Serialize};

use crate::constants::{BPS_DENOMINATOR, DAILY_SELL_LIMIT_BPS, DAY};
use crate::error::{EconomicsError, Result};
use crate::tiers::ThresholdTable;

/// Fee by time elapsed since the tokens unlocked: 3% under 24h, 2% under
/// 72h, 1% afterwards.
const ANTI_DUMP_FEES: ThresholdTable<u64> =
    ThresholdTable::new(&[(0, 300), (DAY, 200), (3 * DAY, 100)]);

/// Fee rate in basis points for a sell `time_since_unlock` seconds after unlock
pub fn anti_dump_fee_bps(time_since_unlock: u64) -> u64 {
    ANTI_DUMP_FEES.lookup(time_since_unlock).unwrap_or(0)
}

/// 0.1% of the circulating baseline
pub fn daily_sell_limit(circulating: u64) -> u64 {
    (circulating as u128 * DAILY_SELL_LIMIT_BPS as u128 / BPS_DENOMINATOR as u128) as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub gross: u64,
    pub fee_rate_bps: u64,
    pub fee: u64,
    pub net: u64,
}

impl FeeQuote {
    pub fn compute(sell_amount: u64, time_since_unlock: u64) -> Self {
        let fee_rate_bps = anti_dump_fee_bps(time_since_unlock);
        let fee =
            (sell_amount as u128 * fee_rate_bps as u128 / BPS_DENOMINATOR as u128) as u64;

        Self {
            gross: sell_amount,
            fee_rate_bps,
            fee,
            net: sell_amount - fee,
        }
    }
}

/// Sell counter for the current day.
///
/// The circulating baseline is captured once when the window rolls over to a
/// new day and stays fixed until the next roll.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySellWindow {
    day: Option<u64>,
    circulating_baseline: u64,
    sold: u64,
}

impl DailySellWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self) -> Option<u64> {
        self.day
    }

    pub fn needs_roll(&self, day: u64) -> bool {
        self.day.map_or(true, |current| day > current)
    }

    pub fn roll(&mut self, day: u64, circulating: u64) {
        self.day = Some(day);
        self.circulating_baseline = circulating;
        self.sold = 0;
    }

    pub fn circulating_baseline(&self) -> u64 {
        self.circulating_baseline
    }

    pub fn sold(&self) -> u64 {
        self.sold
    }

    pub fn limit(&self) -> u64 {
        daily_sell_limit(self.circulating_baseline)
    }

    pub fn remaining(&self) -> u64 {
        self.limit().saturating_sub(self.sold)
    }

    /// Count `amount` against today's limit, or fail leaving the window untouched.
    pub fn try_consume(&mut self, amount: u64) -> Result<()> {
        let remaining = self.remaining();
        if amount > remaining {
            return Err(EconomicsError::ExceedsDailyLimit {
                requested: amount,
                remaining,
                limit: self.limit(),
            });
        }
        self.sold += amount;
        Ok(())
    }
}
