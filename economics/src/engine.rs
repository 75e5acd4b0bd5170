//! Vesting Schedule Engine
//!
//! Owns the bucket and grant registry plus the mutable ledger counters
//! (daily sell window, fee/burn supply ledger, staking pool). Reads only take
//! shared locks; every check-and-update on a counter happens under a single
//! mutex so concurrent sells cannot overrun the daily limit.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::bucket::{AllocationBucket, BucketKind, BucketParams};
use crate::constants::{DAY, TOTAL_SUPPLY};
use crate::error::{EconomicsError, Result};
use crate::fees::{DailySellWindow, FeeQuote};
use crate::grant::{Grant, GrantId, GrantParams};
use crate::schedule::UnlockEvent;
use crate::staking::{self, Claimed, PoolStats, StakePosition, StakingApy, StakingPool, Unstaked};
use crate::supply::{BurnOutcome, SupplyManager, SupplyStats};

/// Snapshot of the daily sell window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellWindowStatus {
    /// Days since TGE
    pub day: u64,
    pub circulating_baseline: u64,
    pub limit: u64,
    pub sold: u64,
    pub remaining: u64,
}

#[derive(Debug)]
struct Ledger {
    window: DailySellWindow,
    supply: SupplyManager,
}

#[derive(Debug)]
pub struct VestingEngine {
    tge: u64,
    buckets: RwLock<BTreeMap<BucketKind, AllocationBucket>>,
    grants: RwLock<BTreeMap<GrantId, Grant>>,
    ledger: Mutex<Ledger>,
    staking: Mutex<StakingPool>,
}

impl VestingEngine {
    pub fn new(tge: u64) -> Self {
        Self {
            tge,
            buckets: RwLock::new(BTreeMap::new()),
            grants: RwLock::new(BTreeMap::new()),
            ledger: Mutex::new(Ledger {
                window: DailySellWindow::new(),
                supply: SupplyManager::new(tge),
            }),
            staking: Mutex::new(StakingPool::new()),
        }
    }

    pub fn tge(&self) -> u64 {
        self.tge
    }

    // ----- Registration -----

    pub fn register_bucket(&self, params: BucketParams) -> Result<AllocationBucket> {
        let bucket = AllocationBucket::new(params, self.tge)?;

        let mut buckets = self.buckets.write();
        if buckets.contains_key(&params.kind) {
            return Err(EconomicsError::InvalidAllocation(format!(
                "bucket {} is already registered",
                params.kind
            )));
        }

        let allocated: u64 = buckets.values().map(|b| b.total_amount()).sum();
        let new_total = allocated as u128 + params.total_amount as u128;
        if new_total > TOTAL_SUPPLY as u128 {
            warn!(
                "Rejected bucket {}: allocation would reach {} of {}",
                params.kind, new_total, TOTAL_SUPPLY
            );
            return Err(EconomicsError::InvalidAllocation(format!(
                "cumulative allocation {} exceeds total supply {}",
                new_total, TOTAL_SUPPLY
            )));
        }

        buckets.insert(params.kind, bucket);
        info!(
            "Registered bucket {} with {} tokens ({} allocated)",
            params.kind, params.total_amount, new_total
        );
        Ok(bucket)
    }

    pub fn register_grant(&self, params: GrantParams) -> Result<Grant> {
        let buckets = self.buckets.read();
        let parent = buckets
            .get(&params.bucket)
            .ok_or_else(|| EconomicsError::BucketNotFound(params.bucket.to_string()))?;

        let mut grants = self.grants.write();
        let granted: u64 = grants
            .values()
            .filter(|g| g.bucket == params.bucket)
            .map(|g| g.amount())
            .sum();
        if granted as u128 + params.amount as u128 > parent.total_amount() as u128 {
            return Err(EconomicsError::InvalidAllocation(format!(
                "grants in {} would exceed the bucket total of {}",
                params.bucket,
                parent.total_amount()
            )));
        }

        let id = grants.len() as GrantId + 1;
        let grant = Grant::new(id, params, parent, self.tge)?;
        grants.insert(id, grant.clone());

        info!(
            "Registered grant #{} for {} in {}: {} tokens",
            id,
            grant.beneficiary,
            grant.bucket,
            grant.amount()
        );
        Ok(grant)
    }

    // ----- Queries -----

    pub fn bucket(&self, kind: BucketKind) -> Result<AllocationBucket> {
        self.buckets
            .read()
            .get(&kind)
            .copied()
            .ok_or_else(|| EconomicsError::BucketNotFound(kind.to_string()))
    }

    pub fn buckets(&self) -> Vec<AllocationBucket> {
        self.buckets.read().values().copied().collect()
    }

    pub fn grant(&self, id: GrantId) -> Result<Grant> {
        self.grants
            .read()
            .get(&id)
            .cloned()
            .ok_or(EconomicsError::GrantNotFound(id))
    }

    pub fn grants_for(&self, beneficiary: &str) -> Vec<Grant> {
        self.grants
            .read()
            .values()
            .filter(|g| g.beneficiary == beneficiary)
            .cloned()
            .collect()
    }

    pub fn total_allocated(&self) -> u64 {
        self.buckets.read().values().map(|b| b.total_amount()).sum()
    }

    pub fn unlocked_amount(&self, kind: BucketKind, as_of: u64) -> Result<u64> {
        Ok(self.bucket(kind)?.unlocked_at(as_of))
    }

    pub fn grant_unlocked_amount(&self, id: GrantId, as_of: u64) -> Result<u64> {
        Ok(self.grant(id)?.unlocked_at(as_of))
    }

    pub fn bucket_unlock_event(
        &self,
        kind: BucketKind,
        since: Option<u64>,
        as_of: u64,
    ) -> Result<UnlockEvent> {
        Ok(self.bucket(kind)?.schedule.unlock_event(since, as_of))
    }

    pub fn grant_unlock_event(
        &self,
        id: GrantId,
        since: Option<u64>,
        as_of: u64,
    ) -> Result<UnlockEvent> {
        Ok(self.grant(id)?.schedule.unlock_event(since, as_of))
    }

    /// Sum of unlocked amounts across all buckets
    pub fn total_unlocked(&self, as_of: u64) -> u64 {
        self.buckets
            .read()
            .values()
            .map(|b| b.unlocked_at(as_of))
            .sum()
    }

    /// Unlocked supply minus everything burned
    pub fn circulating_supply(&self, as_of: u64) -> u64 {
        let unlocked = self.total_unlocked(as_of);
        self.ledger.lock().supply.circulating(unlocked)
    }

    // ----- Fees and the daily sell limit -----

    /// Fee quote without touching the daily window
    pub fn quote_fee(&self, sell_amount: u64, time_since_unlock: u64) -> FeeQuote {
        FeeQuote::compute(sell_amount, time_since_unlock)
    }

    /// Charge the anti-dump fee on a sell at `now` and count it against the
    /// day's sell limit. The fee is credited to the burn ledger.
    pub fn apply_anti_dump_fee(
        &self,
        sell_amount: u64,
        time_since_unlock: u64,
        now: u64,
    ) -> Result<FeeQuote> {
        if sell_amount == 0 {
            return Err(EconomicsError::InvalidAmount(
                "sell amount must be positive".to_string(),
            ));
        }

        let mut ledger = self.ledger.lock();
        if self.roll_window(&mut ledger, now).is_none() {
            // Nothing circulates before TGE
            return Err(EconomicsError::ExceedsDailyLimit {
                requested: sell_amount,
                remaining: 0,
                limit: 0,
            });
        }

        if let Err(e) = ledger.window.try_consume(sell_amount) {
            warn!("Sell of {} rejected: {}", sell_amount, e);
            return Err(e);
        }

        let quote = FeeQuote::compute(sell_amount, time_since_unlock);
        ledger.supply.record_fee(quote.fee);

        debug!(
            "Sell of {} charged {} bps ({} fee), {} left today",
            sell_amount,
            quote.fee_rate_bps,
            quote.fee,
            ledger.window.remaining()
        );
        Ok(quote)
    }

    pub fn sell_window(&self, now: u64) -> SellWindowStatus {
        let mut ledger = self.ledger.lock();
        let Some(day) = self.roll_window(&mut ledger, now) else {
            return SellWindowStatus {
                day: 0,
                circulating_baseline: 0,
                limit: 0,
                sold: 0,
                remaining: 0,
            };
        };

        SellWindowStatus {
            day,
            circulating_baseline: ledger.window.circulating_baseline(),
            limit: ledger.window.limit(),
            sold: ledger.window.sold(),
            remaining: ledger.window.remaining(),
        }
    }

    /// Move the window to the day containing `now`, capturing the circulating
    /// baseline as of that day's start. Returns the day index, or `None`
    /// before TGE.
    fn roll_window(&self, ledger: &mut Ledger, now: u64) -> Option<u64> {
        if now < self.tge {
            return None;
        }
        let day = (now - self.tge) / DAY;
        if ledger.window.needs_roll(day) {
            let day_start = self.tge.saturating_add(day * DAY);
            let circulating = ledger.supply.circulating(self.total_unlocked(day_start));
            ledger.window.roll(day, circulating);
            debug!(
                "Sell window rolled to day {} with baseline {}",
                day, circulating
            );
        }
        Some(day)
    }

    // ----- Supply and burns -----

    pub fn record_transaction_fee(&self, amount: u64) {
        self.ledger.lock().supply.record_fee(amount);
    }

    pub fn execute_burn(&self, now: u64) -> Result<BurnOutcome> {
        self.ledger.lock().supply.execute_burn(now)
    }

    pub fn supply_stats(&self) -> SupplyStats {
        self.ledger.lock().supply.stats()
    }

    // ----- Staking -----

    pub fn staking_apy(&self, locked_amount: u64, lock_period: u64) -> Result<StakingApy> {
        staking::staking_apy(locked_amount, lock_period)
    }

    pub fn stake(
        &self,
        owner: &str,
        amount: u64,
        lock_period: u64,
        now: u64,
    ) -> Result<StakePosition> {
        let position = self.staking.lock().stake(owner, amount, lock_period, now)?;
        info!(
            "{} staked {} for {}s at {} bps",
            owner, amount, lock_period, position.apy.total_bps
        );
        Ok(position)
    }

    pub fn stake_position(&self, owner: &str) -> Result<StakePosition> {
        self.staking.lock().position(owner).cloned()
    }

    pub fn accrued_rewards(&self, owner: &str, now: u64) -> Result<u64> {
        self.staking.lock().accrued_rewards(owner, now)
    }

    pub fn claim_rewards(&self, owner: &str, now: u64) -> Result<Claimed> {
        let claimed = self.staking.lock().claim_rewards(owner, now)?;
        debug!("{} claimed {} staking rewards", owner, claimed.rewards);
        Ok(claimed)
    }

    pub fn unstake(&self, owner: &str, now: u64) -> Result<Unstaked> {
        self.staking.lock().unstake(owner, now)
    }

    pub fn staking_stats(&self) -> PoolStats {
        self.staking.lock().stats()
    }
}
