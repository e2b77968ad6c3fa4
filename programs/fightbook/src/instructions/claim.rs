use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::FightbookError;
use crate::events::PayoutClaimed;
use crate::utils::claim_window_contains;
use crate::{Claim, PositionWinnings, SEASON_SEED};

/// Settles every unclaimed position the caller holds in the season and
/// pays the sum in one vault transfer. Positions are marked claimed
/// before the transfer; a repeat call finds nothing left and pays 0.
pub fn claim(ctx: Context<Claim>, season_id: u64) -> Result<()> {
    let season = &ctx.accounts.season;
    require!(season.resolved, FightbookError::SeasonNotResolved);

    let now = Clock::get()?.unix_timestamp;
    require!(now >= season.settlement_time, FightbookError::ClaimWindowNotOpen);
    require!(
        claim_window_contains(season.settlement_time, now),
        FightbookError::ClaimWindowExpired
    );

    let slip = &mut ctx.accounts.slip;
    require_keys_eq!(slip.user, ctx.accounts.user.key(), FightbookError::Unauthorized);
    require!(slip.season_id == season.season_id, FightbookError::SlipSeasonMismatch);

    let (total_payout, settled) = slip.settle_unclaimed(&season.fights)?;

    if total_payout > 0 {
        let season_le = season_id.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[SEASON_SEED, &season_le, &[season.bump]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.user_token_account.to_account_info(),
                    authority: season.to_account_info(),
                },
                signer_seeds,
            ),
            total_payout,
        )?;
    }

    emit!(PayoutClaimed {
        season_id,
        user: ctx.accounts.user.key(),
        amount: total_payout,
        positions_settled: settled,
    });

    Ok(())
}

/// Read-only: the payout each of the caller's positions would settle
/// to right now (0 for already-claimed positions). Returned as Anchor
/// return data.
pub fn position_winnings(ctx: Context<PositionWinnings>, _season_id: u64) -> Result<Vec<u64>> {
    let season = &ctx.accounts.season;
    require!(season.resolved, FightbookError::SeasonNotResolved);

    let slip = &ctx.accounts.slip;
    let mut payouts = Vec::with_capacity(slip.positions.len());
    for position in slip.positions.iter() {
        if position.claimed {
            payouts.push(0);
            continue;
        }
        let fight = &season.fights[position.fight_index as usize];
        payouts.push(fight.position_payout(position.outcome, position.stake)?);
    }

    Ok(payouts)
}
