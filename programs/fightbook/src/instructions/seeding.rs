use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::FightbookError;
use crate::events::PrizePoolsSeeded;
use crate::state::Season;
use crate::{CalculateRequiredSeed, SeedPrizePools};

fn required_seeds(season: &Season, candidate_outcomes: &[u8]) -> Result<Vec<u64>> {
    require!(
        candidate_outcomes.len() == season.fights.len(),
        FightbookError::OutcomesLengthMismatch
    );

    let mut seeds = Vec::with_capacity(season.fights.len());
    for (fight, outcome) in season.fights.iter().zip(candidate_outcomes.iter()) {
        require!(*outcome < fight.num_outcomes, FightbookError::InvalidOutcome);
        seeds.push(fight.required_seed(*outcome)?);
    }
    Ok(seeds)
}

/// Read-only: per-fight prize-pool shortfall under the candidate
/// outcomes, i.e. the minimum top-up so no expected winner's payout
/// truncates to zero. Returned as Anchor return data.
pub fn calculate_required_seed_for_season(
    ctx: Context<CalculateRequiredSeed>,
    _season_id: u64,
    candidate_outcomes: Vec<u8>,
) -> Result<Vec<u64>> {
    required_seeds(&ctx.accounts.season, &candidate_outcomes)
}

/// Transfers the computed shortfall into the vault and tops up each
/// fight's prize pool. Only meaningful before resolution fixes the
/// winnings pools.
pub fn seed_prize_pools_for_season(
    ctx: Context<SeedPrizePools>,
    season_id: u64,
    candidate_outcomes: Vec<u8>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, FightbookError::Paused);
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), FightbookError::Unauthorized);

    let season = &mut ctx.accounts.season;
    require!(!season.resolved, FightbookError::SeasonAlreadyResolved);

    let seeds = required_seeds(season, &candidate_outcomes)?;
    let mut total_seed: u64 = 0;
    for seed in seeds.iter() {
        total_seed = total_seed
            .checked_add(*seed)
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;
    }

    if total_seed == 0 {
        return Ok(());
    }

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.admin_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.admin.to_account_info(),
            },
        ),
        total_seed,
    )?;

    for (fight, seed) in season.fights.iter_mut().zip(seeds.iter()) {
        fight.prize_pool = fight
            .prize_pool
            .checked_add(*seed)
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;
    }

    emit!(PrizePoolsSeeded { season_id, total_seed });

    Ok(())
}
