use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::FightbookError;
use crate::utils::{method_of, required_extra_pool, shares_for, side_of, winnings_for};

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,
    pub paused: bool,
    pub seasons_created: u64,
    pub version: u16,
}

/// One season: a batch of fights settled together against a shared
/// token vault. Positions live in per-user PredictionSlip PDAs; the
/// season only carries per-fight aggregates.
#[account]
#[derive(InitSpace)]
pub struct Season {
    pub season_id: u64,
    pub bump: u8,

    /// Token the whole season stakes and pays in.
    pub mint: Pubkey,

    /// SPL TokenAccount PDA holding prize pools plus all stakes.
    /// Authority is this Season PDA.
    pub vault: Pubkey,
    pub vault_bump: u8,

    /// Last timestamp (inclusive) at which predictions lock.
    pub cut_off_time: i64,

    // settlement_time != 0 <=> resolved
    pub resolved: bool,
    pub settlement_time: i64,

    // set once by recover_remaining_balance
    pub swept: bool,
    pub swept_at: i64,

    #[max_len(MAX_FIGHTS_PER_SEASON)]
    pub fights: Vec<Fight>,
}

/// Per-fight configuration, stake aggregates and write-once
/// resolution values.
///
/// The program cannot enumerate position PDAs on-chain, so locking
/// maintains per-outcome aggregates. Points depend only on the
/// predicted outcome, which makes the position-sum of shares equal to
/// `4*staked[w] + 3*(winning_side_staked - staked[w])`, and the
/// per-outcome minimum stake bounds every winner's payout from below.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, InitSpace)]
pub struct Fight {
    // immutable after creation
    pub min_bet: u64,
    pub max_bet: u64,
    pub num_outcomes: u8,

    // accumulators, mutated only while predictions lock
    pub prize_pool: u64,
    pub outcome_staked: [u64; 8],
    pub outcome_min_stake: [u64; 8],
    pub side_a_staked: u64,
    pub side_b_staked: u64,
    pub side_a_users: u32,
    pub side_b_users: u32,

    // write-once, set by resolve_season; all zero under No-Contest
    pub total_winnings_pool: u64,
    pub winning_pool_total_shares: u64,
    pub winning_outcome: u8,
    pub resolved: bool,
}

impl Fight {
    pub fn side_staked(&self, side: u8) -> u64 {
        if side == SIDE_A {
            self.side_a_staked
        } else {
            self.side_b_staked
        }
    }

    /// Folds one freshly locked position into the aggregates.
    pub fn record_position(&mut self, outcome: u8, stake: u64) -> Result<()> {
        let o = outcome as usize;
        self.outcome_staked[o] = self.outcome_staked[o]
            .checked_add(stake)
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;
        if self.outcome_min_stake[o] == 0 || stake < self.outcome_min_stake[o] {
            self.outcome_min_stake[o] = stake;
        }

        if side_of(outcome) == SIDE_A {
            self.side_a_staked = self
                .side_a_staked
                .checked_add(stake)
                .ok_or_else(|| error!(FightbookError::MathOverflow))?;
            self.side_a_users = self
                .side_a_users
                .checked_add(1)
                .ok_or_else(|| error!(FightbookError::MathOverflow))?;
        } else {
            self.side_b_staked = self
                .side_b_staked
                .checked_add(stake)
                .ok_or_else(|| error!(FightbookError::MathOverflow))?;
            self.side_b_users = self
                .side_b_users
                .checked_add(1)
                .ok_or_else(|| error!(FightbookError::MathOverflow))?;
        }
        Ok(())
    }

    /// (total_winnings_pool, winning_pool_total_shares) the fight would
    /// settle to under `winning_outcome`. Pure; moves nothing.
    pub fn resolution_values(&self, winning_outcome: u8) -> Result<(u64, u64)> {
        if method_of(winning_outcome) == METHOD_NO_CONTEST {
            return Ok((0, 0));
        }

        let winning_side = side_of(winning_outcome);
        let losing_staked = if winning_side == SIDE_A {
            self.side_b_staked
        } else {
            self.side_a_staked
        };
        let pool = self
            .prize_pool
            .checked_add(losing_staked)
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;

        let exact_staked = self.outcome_staked[winning_outcome as usize];
        let side_only_staked = self
            .side_staked(winning_side)
            .checked_sub(exact_staked)
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;

        let shares = POINTS_EXACT
            .checked_mul(exact_staked)
            .and_then(|e| POINTS_SIDE_ONLY.checked_mul(side_only_staked).and_then(|s| e.checked_add(s)))
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;

        Ok((pool, shares))
    }

    /// Smallest shares any winning position would hold under
    /// `winning_outcome`; 0 when no position would score.
    pub fn min_winner_shares(&self, winning_outcome: u8) -> Result<u64> {
        if method_of(winning_outcome) == METHOD_NO_CONTEST {
            return Ok(0);
        }
        let winning_side = side_of(winning_outcome);
        let mut min: u64 = 0;
        for o in 0..MAX_OUTCOMES {
            if side_of(o) != winning_side || self.outcome_min_stake[o as usize] == 0 {
                continue;
            }
            let s = shares_for(o, winning_outcome, self.outcome_min_stake[o as usize])?;
            if s > 0 && (min == 0 || s < min) {
                min = s;
            }
        }
        Ok(min)
    }

    /// Minimal prize-pool top-up so that no winner is truncated to
    /// zero winnings under `winning_outcome`. 0 when nothing scores.
    pub fn required_seed(&self, winning_outcome: u8) -> Result<u64> {
        let (pool, shares) = self.resolution_values(winning_outcome)?;
        if shares == 0 {
            return Ok(0);
        }
        let min_shares = self.min_winner_shares(winning_outcome)?;
        required_extra_pool(shares, min_shares, pool)
    }

    /// Fixes the write-once resolution values. Moves no funds.
    pub fn apply_resolution(&mut self, winning_outcome: u8) -> Result<()> {
        let (pool, shares) = self.resolution_values(winning_outcome)?;
        self.total_winnings_pool = pool;
        self.winning_pool_total_shares = shares;
        self.winning_outcome = winning_outcome;
        self.resolved = true;
        Ok(())
    }

    /// Payout owed to one unclaimed position of this resolved fight.
    ///
    /// shares == 0 covers both No-Contest and the degenerate case where
    /// nobody picked the winning side; either way every stake refunds.
    pub fn position_payout(&self, outcome: u8, stake: u64) -> Result<u64> {
        if self.winning_pool_total_shares == 0 {
            return Ok(stake);
        }
        let shares = shares_for(outcome, self.winning_outcome, stake)?;
        if shares == 0 {
            return Ok(0);
        }
        let winnings = winnings_for(
            self.total_winnings_pool,
            shares,
            self.winning_pool_total_shares,
        )?;
        stake
            .checked_add(winnings)
            .ok_or_else(|| error!(FightbookError::MathOverflow))
    }
}

/// Position table for one (user, season): the spec-level
/// (user, season, fight) key is (slip PDA, fight_index).
#[account]
#[derive(InitSpace)]
pub struct PredictionSlip {
    pub user: Pubkey,
    pub season_id: u64,
    pub bump: u8,

    #[max_len(MAX_FIGHTS_PER_SEASON)]
    pub positions: Vec<Position>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, InitSpace)]
pub struct Position {
    pub fight_index: u8,
    pub outcome: u8,
    pub stake: u64,
    pub claimed: bool,
}

impl PredictionSlip {
    pub fn has_position(&self, fight_index: u8) -> bool {
        self.positions.iter().any(|p| p.fight_index == fight_index)
    }

    pub fn all_claimed(&self) -> bool {
        self.positions.iter().all(|p| p.claimed)
    }

    /// Settles every unclaimed position against its resolved fight,
    /// marking each one claimed. Returns (total payout, positions
    /// settled); a second pass finds nothing left and returns (0, 0).
    pub fn settle_unclaimed(&mut self, fights: &[Fight]) -> Result<(u64, u8)> {
        let mut total_payout: u64 = 0;
        let mut settled: u8 = 0;
        for position in self.positions.iter_mut() {
            if position.claimed {
                continue;
            }
            let fight = fights
                .get(position.fight_index as usize)
                .ok_or_else(|| error!(FightbookError::InvalidFightIndex))?;
            let payout = fight.position_payout(position.outcome, position.stake)?;

            position.claimed = true;
            settled += 1;
            total_payout = total_payout
                .checked_add(payout)
                .ok_or_else(|| error!(FightbookError::MathOverflow))?;
        }
        Ok((total_payout, settled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KO_A: u8 = 2;
    const SUB_A: u8 = 0;
    const SUB_B: u8 = 4;
    const KO_B: u8 = 6;
    const NC_A: u8 = 3;

    fn fight(min_bet: u64, max_bet: u64, prize_pool: u64) -> Fight {
        Fight {
            min_bet,
            max_bet,
            num_outcomes: 8,
            prize_pool,
            ..Fight::default()
        }
    }

    #[test]
    fn record_position_tracks_sides_and_minimums() {
        let mut f = fight(1, 1000, 0);
        f.record_position(KO_A, 25).unwrap();
        f.record_position(SUB_A, 30).unwrap();
        f.record_position(SUB_B, 40).unwrap();
        f.record_position(KO_A, 10).unwrap();

        assert_eq!(f.side_a_staked, 65);
        assert_eq!(f.side_b_staked, 40);
        assert_eq!(f.side_a_users, 3);
        assert_eq!(f.side_b_users, 1);
        assert_eq!(f.outcome_staked[KO_A as usize], 35);
        assert_eq!(f.outcome_min_stake[KO_A as usize], 10);
        assert_eq!(f.outcome_min_stake[SUB_B as usize], 40);
    }

    #[test]
    fn side_totals_equal_position_stake_sums() {
        let mut f = fight(1, 1000, 50);
        let positions = [(KO_A, 7u64), (SUB_A, 13), (KO_A, 21), (SUB_B, 9)];
        for (o, s) in positions {
            f.record_position(o, s).unwrap();
        }
        let sum_a: u64 = positions
            .iter()
            .filter(|(o, _)| side_of(*o) == SIDE_A)
            .map(|(_, s)| s)
            .sum();
        let sum_b: u64 = positions
            .iter()
            .filter(|(o, _)| side_of(*o) == SIDE_B)
            .map(|(_, s)| s)
            .sum();
        assert_eq!(f.side_a_staked, sum_a);
        assert_eq!(f.side_b_staked, sum_b);
    }

    // Scenario A: stakes {20, 30, 25}, prize pool 100, two exact
    // matches and one side-only match.
    #[test]
    fn mixed_accuracy_settlement() {
        let mut f = fight(1, 1000, 100);
        f.record_position(KO_A, 20).unwrap(); // exact
        f.record_position(SUB_A, 30).unwrap(); // side-only
        f.record_position(KO_A, 25).unwrap(); // exact
        f.record_position(SUB_B, 50).unwrap(); // loser

        f.apply_resolution(KO_A).unwrap();
        assert_eq!(f.winning_pool_total_shares, 4 * 20 + 3 * 30 + 4 * 25); // 270
        assert_eq!(f.total_winnings_pool, 100 + 50);

        let pool = f.total_winnings_pool;
        let p20 = f.position_payout(KO_A, 20).unwrap();
        let p30 = f.position_payout(SUB_A, 30).unwrap();
        let p25 = f.position_payout(KO_A, 25).unwrap();
        let loser = f.position_payout(SUB_B, 50).unwrap();

        assert_eq!(p20, 20 + pool * 80 / 270);
        assert_eq!(p30, 30 + pool * 90 / 270);
        assert_eq!(p25, 25 + pool * 100 / 270);
        assert_eq!(loser, 0);

        // conservation: payouts never exceed stakes + winnings pool
        let winnings_paid = (p20 - 20) + (p30 - 30) + (p25 - 25);
        assert!(winnings_paid <= pool);
    }

    // Scenario B: prize pool 1, five exact-match winners staking 1
    // each; everything truncates to zero until the pool is seeded.
    #[test]
    fn tiny_pool_needs_seeding() {
        let mut f = fight(1, 1000, 1);
        for _ in 0..5 {
            f.record_position(KO_A, 1).unwrap();
        }

        let (pool, shares) = f.resolution_values(KO_A).unwrap();
        assert_eq!(shares, 20);
        assert_eq!(pool, 1);
        assert_eq!(winnings_for(pool, 4, shares).unwrap(), 0);

        let seed = f.required_seed(KO_A).unwrap();
        assert_eq!(seed, 4);

        f.prize_pool += seed;
        f.apply_resolution(KO_A).unwrap();
        assert_eq!(f.total_winnings_pool, 5);
        for _ in 0..5 {
            let payout = f.position_payout(KO_A, 1).unwrap();
            assert!(payout - 1 >= 1, "every winner must clear truncation");
        }
    }

    #[test]
    fn seeding_not_reported_when_winners_already_clear() {
        let mut f = fight(1, 1000, 1_000);
        f.record_position(KO_A, 20).unwrap();
        f.record_position(SUB_B, 20).unwrap();
        assert_eq!(f.required_seed(KO_A).unwrap(), 0);
    }

    #[test]
    fn seeding_ignores_fights_nobody_would_win() {
        let mut f = fight(1, 1000, 1);
        f.record_position(SUB_B, 20).unwrap();
        // candidate winner is side A: no scoring positions, no seed
        assert_eq!(f.required_seed(KO_A).unwrap(), 0);
    }

    #[test]
    fn seeding_bounds_the_smallest_winner() {
        let mut f = fight(1, 1000, 0);
        f.record_position(KO_A, 100).unwrap(); // 400 shares
        f.record_position(SUB_A, 2).unwrap(); // 6 shares, the binding winner
        f.record_position(SUB_B, 1).unwrap(); // loser funds 1

        assert_eq!(f.min_winner_shares(KO_A).unwrap(), 6);
        let seed = f.required_seed(KO_A).unwrap();
        f.prize_pool += seed;
        f.apply_resolution(KO_A).unwrap();
        assert!(f.position_payout(SUB_A, 2).unwrap() - 2 >= 1);
        assert!(f.position_payout(KO_A, 100).unwrap() - 100 >= 1);
    }

    // Scenario C: No-Contest refunds every stake and never distributes
    // the pool.
    #[test]
    fn no_contest_refunds_everyone() {
        let mut f = fight(1, 1000, 500);
        f.record_position(KO_A, 20).unwrap();
        f.record_position(SUB_B, 35).unwrap();

        f.apply_resolution(NC_A).unwrap();
        assert_eq!(f.total_winnings_pool, 0);
        assert_eq!(f.winning_pool_total_shares, 0);
        assert_eq!(f.position_payout(KO_A, 20).unwrap(), 20);
        assert_eq!(f.position_payout(SUB_B, 35).unwrap(), 35);
    }

    #[test]
    fn nobody_on_winning_side_degenerates_to_refund() {
        let mut f = fight(1, 1000, 100);
        f.record_position(SUB_B, 40).unwrap();
        f.record_position(KO_B, 10).unwrap();

        // side A wins but nobody backed it
        f.apply_resolution(KO_A).unwrap();
        assert_eq!(f.winning_pool_total_shares, 0);
        // side-incorrect positions still refund exactly their stake
        assert_eq!(f.position_payout(SUB_B, 40).unwrap(), 40);
    }

    #[test]
    fn resolution_values_are_pure() {
        let mut f = fight(1, 1000, 10);
        f.record_position(KO_A, 20).unwrap();
        let before = f.clone();
        let _ = f.resolution_values(KO_A).unwrap();
        let _ = f.required_seed(KO_A).unwrap();
        assert_eq!(f.prize_pool, before.prize_pool);
        assert_eq!(f.outcome_staked, before.outcome_staked);
        assert!(!f.resolved);
    }

    #[test]
    fn truncation_floor_total_never_exceeds_pool() {
        let mut f = fight(1, 1000, 7);
        let winners = [(KO_A, 3u64), (SUB_A, 5), (KO_A, 11)];
        for (o, s) in winners {
            f.record_position(o, s).unwrap();
        }
        f.record_position(SUB_B, 13).unwrap();
        f.apply_resolution(KO_A).unwrap();

        let mut winnings_total = 0u64;
        for (o, s) in winners {
            winnings_total += f.position_payout(o, s).unwrap() - s;
        }
        assert!(winnings_total <= f.total_winnings_pool);
    }

    #[test]
    fn slip_detects_duplicate_fights_and_claim_completion() {
        let mut slip = PredictionSlip {
            user: Pubkey::new_unique(),
            season_id: 7,
            bump: 255,
            positions: vec![
                Position { fight_index: 0, outcome: KO_A, stake: 20, claimed: false },
                Position { fight_index: 2, outcome: SUB_B, stake: 30, claimed: true },
            ],
        };
        assert!(slip.has_position(0));
        assert!(!slip.has_position(1));
        assert!(!slip.all_claimed());
        slip.positions[0].claimed = true;
        assert!(slip.all_claimed());
    }

    fn settled_pair() -> Vec<Fight> {
        let mut won = fight(1, 1000, 100);
        won.record_position(KO_A, 20).unwrap();
        won.record_position(SUB_A, 30).unwrap();
        won.record_position(SUB_B, 50).unwrap();
        won.apply_resolution(KO_A).unwrap();

        let mut washed = fight(1, 1000, 0);
        washed.record_position(SUB_B, 40).unwrap();
        washed.apply_resolution(NC_A).unwrap();

        vec![won, washed]
    }

    #[test]
    fn settling_a_slip_twice_pays_only_once() {
        let fights = settled_pair();
        let mut slip = PredictionSlip {
            user: Pubkey::new_unique(),
            season_id: 7,
            bump: 255,
            positions: vec![
                Position { fight_index: 0, outcome: KO_A, stake: 20, claimed: false },
                Position { fight_index: 1, outcome: SUB_B, stake: 40, claimed: false },
            ],
        };

        let expected = fights[0].position_payout(KO_A, 20).unwrap() + 40;
        let (first, settled) = slip.settle_unclaimed(&fights).unwrap();
        assert_eq!(settled, 2);
        assert_eq!(first, expected);
        assert!(slip.all_claimed());

        let (second, resettled) = slip.settle_unclaimed(&fights).unwrap();
        assert_eq!((second, resettled), (0, 0));
    }

    #[test]
    fn settlement_skips_positions_already_claimed() {
        let fights = settled_pair();
        let mut slip = PredictionSlip {
            user: Pubkey::new_unique(),
            season_id: 7,
            bump: 255,
            positions: vec![
                Position { fight_index: 0, outcome: KO_A, stake: 20, claimed: false },
                Position { fight_index: 1, outcome: SUB_B, stake: 40, claimed: true },
            ],
        };

        let (paid, settled) = slip.settle_unclaimed(&fights).unwrap();
        assert_eq!(settled, 1);
        assert_eq!(paid, fights[0].position_payout(KO_A, 20).unwrap());
    }
}
