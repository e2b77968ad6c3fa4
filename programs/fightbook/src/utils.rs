use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::FightbookError;

// -----------------
// Seeds / constants
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const SEASON_SEED: &[u8] = b"season_v1";
pub const SEASON_VAULT_SEED: &[u8] = b"season_vault_v1";
pub const SLIP_SEED: &[u8] = b"slip_v1";

// ---------------
// Batch payloads
// ---------------

/// Per-fight configuration supplied at season creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct FightSetup {
    pub min_bet: u64,
    pub max_bet: u64,
    pub num_outcomes: u8,
}

/// One element of a lock_predictions batch.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct PredictionEntry {
    pub fight_index: u8,
    pub outcome: u8,
    pub stake: u64,
}

// -------------------------
// Outcome encoding helpers
// -------------------------

pub fn side_of(outcome: u8) -> u8 {
    outcome >> SIDE_SHIFT
}

pub fn method_of(outcome: u8) -> u8 {
    outcome & METHOD_MASK
}

// -------------------------
// Settlement calculator
// -------------------------

/// Points awarded to a prediction given the fight's winning outcome.
///
/// A No-Contest winning method zeroes everyone; otherwise an exact
/// (side, method) match scores 4, the right side with the wrong method
/// scores 3, and the wrong side scores 0 regardless of method.
pub fn points_for(outcome: u8, winning_outcome: u8) -> u64 {
    if method_of(winning_outcome) == METHOD_NO_CONTEST {
        return 0;
    }
    if outcome == winning_outcome {
        POINTS_EXACT
    } else if side_of(outcome) == side_of(winning_outcome) {
        POINTS_SIDE_ONLY
    } else {
        0
    }
}

/// shares = points x stake. Larger stakes and better accuracy both
/// increase the payout weight monotonically.
pub fn shares_for(outcome: u8, winning_outcome: u8, stake: u64) -> Result<u64> {
    points_for(outcome, winning_outcome)
        .checked_mul(stake)
        .ok_or_else(|| error!(FightbookError::MathOverflow))
}

/// winnings = floor(pool * shares / total_shares), truncating toward
/// zero. The truncation remainder stays in the vault until recovery.
pub fn winnings_for(pool: u64, shares: u64, total_shares: u64) -> Result<u64> {
    if total_shares == 0 || shares == 0 {
        return Ok(0);
    }
    let q = (pool as u128)
        .checked_mul(shares as u128)
        .ok_or_else(|| error!(FightbookError::MathOverflow))?
        / (total_shares as u128);
    u64::try_from(q).map_err(|_| error!(FightbookError::MathOverflow))
}

/// Minimal top-up so the winner holding `min_winner_shares` (and hence
/// every winner) receives at least 1 after truncation:
/// floor(pool' * s_min / S) >= 1  <=>  pool' >= ceil(S / s_min).
pub fn required_extra_pool(
    total_shares: u64,
    min_winner_shares: u64,
    current_pool: u64,
) -> Result<u64> {
    if total_shares == 0 || min_winner_shares == 0 {
        return Ok(0);
    }
    let needed = total_shares
        .checked_add(min_winner_shares - 1)
        .ok_or_else(|| error!(FightbookError::MathOverflow))?
        / min_winner_shares;
    Ok(needed.saturating_sub(current_pool))
}

// -------------------------
// Claim window timing
// -------------------------

/// Last timestamp (inclusive) at which a claim is accepted.
pub fn claim_deadline(settlement_time: i64) -> i64 {
    settlement_time.saturating_add(CLAIM_WINDOW_SECONDS)
}

/// Claims are accepted from settlement through the deadline, both
/// ends inclusive.
pub fn claim_window_contains(settlement_time: i64, now: i64) -> bool {
    now >= settlement_time && now <= claim_deadline(settlement_time)
}

/// Recovery opens strictly after the claim deadline, so no instant is
/// both claimable and recoverable.
pub fn recovery_open(settlement_time: i64, now: i64) -> bool {
    now > claim_deadline(settlement_time)
}
