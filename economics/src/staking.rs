//! Staking tiers and positions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{BPS_DENOMINATOR, DAY, MONTH, TOTAL_SUPPLY};
use crate::error::{EconomicsError, Result};
use crate::tiers::ThresholdTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakingTier {
    Seedling, // 10,000+
    Sprout,   // 50,000+
    Bloom,    // 100,000+
    Harvest,  // 500,000+
}

const AMOUNT_TIERS: ThresholdTable<StakingTier> = ThresholdTable::new(&[
    (10_000, StakingTier::Seedling),
    (50_000, StakingTier::Sprout),
    (100_000, StakingTier::Bloom),
    (500_000, StakingTier::Harvest),
]);

/// Largest single position: the whole supply
pub const MAX_STAKE: u64 = TOTAL_SUPPLY;

/// Bonus for committing to a lock: 3, 6 and 12 months
const LOCK_BONUSES: ThresholdTable<u64> =
    ThresholdTable::new(&[(0, 0), (3 * MONTH, 100), (6 * MONTH, 250), (12 * MONTH, 500)]);

impl StakingTier {
    pub fn from_amount(amount: u64) -> Result<Self> {
        AMOUNT_TIERS
            .lookup(amount)
            .ok_or(EconomicsError::BelowMinimumStake {
                amount,
                minimum: AMOUNT_TIERS.floor(),
            })
    }

    pub fn base_apy_bps(&self) -> u64 {
        match self {
            StakingTier::Seedling => 800,
            StakingTier::Sprout => 1_000,
            StakingTier::Bloom => 1_200,
            StakingTier::Harvest => 1_500,
        }
    }

    pub fn min_stake(&self) -> u64 {
        AMOUNT_TIERS
            .steps()
            .iter()
            .find(|(_, tier)| tier == self)
            .map(|(threshold, _)| *threshold)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingApy {
    pub tier: StakingTier,
    pub base_bps: u64,
    pub bonus_bps: u64,
    pub total_bps: u64,
}

/// APY for locking `locked_amount` tokens for `lock_period` seconds
pub fn staking_apy(locked_amount: u64, lock_period: u64) -> Result<StakingApy> {
    let tier = StakingTier::from_amount(locked_amount)?;
    let base_bps = tier.base_apy_bps();
    let bonus_bps = LOCK_BONUSES.lookup(lock_period).unwrap_or(0);

    Ok(StakingApy {
        tier,
        base_bps,
        bonus_bps,
        total_bps: base_bps + bonus_bps,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeStatus {
    Active,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    pub owner: String,
    pub amount: u64,
    pub start: u64,
    pub lock_period: u64,
    pub apy: StakingApy,
    pub status: StakeStatus,
    /// Rewards accrue from here; advanced by whole days on each claim
    pub last_claim: u64,
    pub total_claimed: u64,
}

impl StakePosition {
    pub fn unlocks_at(&self) -> u64 {
        self.start.saturating_add(self.lock_period)
    }

    fn unclaimed_days(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_claim) / DAY
    }

    /// Simple interest over whole days since the last claim
    pub fn accrued_rewards(&self, now: u64) -> u64 {
        if self.status != StakeStatus::Active {
            return 0;
        }
        let rewards = self.amount as u128 * self.apy.total_bps as u128
            * self.unclaimed_days(now) as u128
            / (BPS_DENOMINATOR as u128 * 365);
        u64::try_from(rewards).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unstaked {
    pub principal: u64,
    pub rewards: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimed {
    pub rewards: u64,
    pub total_claimed: u64,
    /// New accrual baseline
    pub last_claim: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub total_staked: u64,
    pub active_positions: usize,
    pub average_stake: u64,
}

#[derive(Debug, Clone, Default)]
pub struct StakingPool {
    positions: HashMap<String, StakePosition>,
    total_staked: u64,
}

impl StakingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stake(
        &mut self,
        owner: &str,
        amount: u64,
        lock_period: u64,
        now: u64,
    ) -> Result<StakePosition> {
        if let Some(existing) = self.positions.get(owner) {
            if existing.status == StakeStatus::Active {
                return Err(EconomicsError::StakeExists(owner.to_string()));
            }
        }

        if amount > MAX_STAKE {
            return Err(EconomicsError::InvalidAmount(format!(
                "stake of {} exceeds the maximum of {}",
                amount, MAX_STAKE
            )));
        }

        let apy = staking_apy(amount, lock_period)?;
        let position = StakePosition {
            owner: owner.to_string(),
            amount,
            start: now,
            lock_period,
            apy,
            status: StakeStatus::Active,
            last_claim: now,
            total_claimed: 0,
        };

        self.positions.insert(owner.to_string(), position.clone());
        self.total_staked = self.total_staked.saturating_add(amount);
        Ok(position)
    }

    pub fn position(&self, owner: &str) -> Result<&StakePosition> {
        self.positions
            .get(owner)
            .ok_or_else(|| EconomicsError::StakeNotFound(owner.to_string()))
    }

    pub fn accrued_rewards(&self, owner: &str, now: u64) -> Result<u64> {
        Ok(self.position(owner)?.accrued_rewards(now))
    }

    fn active_mut(&mut self, owner: &str) -> Result<&mut StakePosition> {
        self.positions
            .get_mut(owner)
            .filter(|p| p.status == StakeStatus::Active)
            .ok_or_else(|| EconomicsError::StakeNotFound(owner.to_string()))
    }

    /// Pay out rewards for the whole days since the last claim, keeping the
    /// position staked. A partial day carries over to the next claim.
    pub fn claim_rewards(&mut self, owner: &str, now: u64) -> Result<Claimed> {
        let position = self.active_mut(owner)?;

        let days = position.unclaimed_days(now);
        let rewards = position.accrued_rewards(now);
        position.last_claim = position.last_claim.saturating_add(days * DAY);
        position.total_claimed = position.total_claimed.saturating_add(rewards);

        Ok(Claimed {
            rewards,
            total_claimed: position.total_claimed,
            last_claim: position.last_claim,
        })
    }

    pub fn unstake(&mut self, owner: &str, now: u64) -> Result<Unstaked> {
        let position = self.active_mut(owner)?;

        let unlocks_at = position.unlocks_at();
        if now < unlocks_at {
            return Err(EconomicsError::StakeLocked { unlocks_at });
        }

        let rewards = position.accrued_rewards(now);
        let principal = position.amount;
        position.status = StakeStatus::Withdrawn;
        position.total_claimed = position.total_claimed.saturating_add(rewards);
        self.total_staked = self.total_staked.saturating_sub(principal);

        Ok(Unstaked {
            principal,
            rewards,
            total: principal.saturating_add(rewards),
        })
    }

    pub fn stats(&self) -> PoolStats {
        let active_positions = self
            .positions
            .values()
            .filter(|p| p.status == StakeStatus::Active)
            .count();

        PoolStats {
            total_staked: self.total_staked,
            active_positions,
            average_stake: if active_positions > 0 {
                self.total_staked / active_positions as u64
            } else {
                0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_amount() {
        assert!(matches!(
            StakingTier::from_amount(9_999),
            Err(EconomicsError::BelowMinimumStake { minimum: 10_000, .. })
        ));
        assert_eq!(StakingTier::from_amount(10_000).unwrap(), StakingTier::Seedling);
        assert_eq!(StakingTier::from_amount(49_999).unwrap(), StakingTier::Seedling);
        assert_eq!(StakingTier::from_amount(50_000).unwrap(), StakingTier::Sprout);
        assert_eq!(StakingTier::from_amount(100_000).unwrap(), StakingTier::Bloom);
        assert_eq!(StakingTier::from_amount(500_000).unwrap(), StakingTier::Harvest);
        assert_eq!(StakingTier::Bloom.min_stake(), 100_000);
    }

    #[test]
    fn test_apy_with_lock_bonus() {
        let apy = staking_apy(100_000, 6 * MONTH).unwrap();
        assert_eq!(apy.tier, StakingTier::Bloom);
        assert_eq!(apy.base_bps, 1_200);
        assert_eq!(apy.bonus_bps, 250);
        assert_eq!(apy.total_bps, 1_450);

        assert_eq!(staking_apy(10_000, 0).unwrap().total_bps, 800);
        assert_eq!(staking_apy(10_000, 3 * MONTH - 1).unwrap().bonus_bps, 0);
        assert_eq!(staking_apy(1_000_000, 12 * MONTH).unwrap().total_bps, 2_000);
    }

    #[test]
    fn test_stake_accrue_unstake() {
        let mut pool = StakingPool::new();
        let start = 1_000;
        pool.stake("grower-1", 365_000, 3 * MONTH, start).unwrap();

        // Bloom tier 12% + 1% lock bonus = 13%; 365,000 * 13% / 365 = 130 per day
        assert_eq!(pool.accrued_rewards("grower-1", start + 10 * DAY).unwrap(), 1_300);

        assert_eq!(
            pool.unstake("grower-1", start + DAY),
            Err(EconomicsError::StakeLocked {
                unlocks_at: start + 3 * MONTH
            })
        );

        let out = pool.unstake("grower-1", start + 90 * DAY).unwrap();
        assert_eq!(out.principal, 365_000);
        assert_eq!(out.rewards, 11_700);
        assert_eq!(out.total, 376_700);
        assert_eq!(pool.stats().total_staked, 0);
        assert!(pool.unstake("grower-1", start + 91 * DAY).is_err());
    }

    #[test]
    fn test_claim_keeps_position_and_moves_baseline() {
        let mut pool = StakingPool::new();
        let start = 1_000;
        pool.stake("grower-1", 365_000, 3 * MONTH, start).unwrap();

        // 10.5 days in: 10 whole days paid, the half day carries over
        let claimed = pool.claim_rewards("grower-1", start + 10 * DAY + DAY / 2).unwrap();
        assert_eq!(claimed.rewards, 1_300);
        assert_eq!(claimed.last_claim, start + 10 * DAY);
        assert_eq!(pool.accrued_rewards("grower-1", start + 10 * DAY + DAY / 2).unwrap(), 0);

        let again = pool.claim_rewards("grower-1", start + 11 * DAY).unwrap();
        assert_eq!(again.rewards, 130);
        assert_eq!(again.total_claimed, 1_430);
        assert_eq!(pool.stats().total_staked, 365_000);

        // Unstake only pays what was not already claimed
        let out = pool.unstake("grower-1", start + 90 * DAY).unwrap();
        assert_eq!(out.rewards, 11_700 - 1_430);
        assert_eq!(pool.position("grower-1").unwrap().total_claimed, 11_700);
        assert!(pool.claim_rewards("grower-1", start + 91 * DAY).is_err());
    }

    #[test]
    fn test_stake_above_supply_rejected() {
        let mut pool = StakingPool::new();
        assert!(matches!(
            pool.stake("whale", u64::MAX, 0, 0),
            Err(EconomicsError::InvalidAmount(_))
        ));
        assert!(matches!(
            pool.stake("whale", MAX_STAKE + 1, 0, 0),
            Err(EconomicsError::InvalidAmount(_))
        ));

        pool.stake("whale", MAX_STAKE, 0, 0).unwrap();
        pool.stake("minnow", 10_000, 0, 0).unwrap();
        assert_eq!(pool.stats().total_staked, MAX_STAKE + 10_000);

        // A position left for millennia still pays out without wrapping
        let out = pool.unstake("whale", u64::MAX).unwrap();
        assert_eq!(out.principal, MAX_STAKE);
        assert!(out.rewards > 0);
        assert_eq!(out.total, MAX_STAKE.saturating_add(out.rewards));
    }

    #[test]
    fn test_duplicate_active_stake() {
        let mut pool = StakingPool::new();
        pool.stake("a", 10_000, 0, 0).unwrap();
        assert_eq!(
            pool.stake("a", 10_000, 0, 0),
            Err(EconomicsError::StakeExists("a".to_string()))
        );
        pool.stake("b", 30_000, 0, 0).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.active_positions, 2);
        assert_eq!(stats.average_stake, 20_000);
    }
}
