use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::*;
use crate::errors::FightbookError;
use crate::events::PredictionsLocked;
use crate::state::Position;
use crate::utils::PredictionEntry;
use crate::LockPredictions;

/// Locks a batch of predictions. All-or-nothing: every entry is
/// validated against the season, the fight configs and the caller's
/// existing slip before any stake moves or any aggregate changes.
pub fn lock_predictions(
    ctx: Context<LockPredictions>,
    season_id: u64,
    entries: Vec<PredictionEntry>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, FightbookError::Paused);

    let season = &mut ctx.accounts.season;
    require!(!season.resolved, FightbookError::SeasonAlreadyResolved);

    let now = Clock::get()?.unix_timestamp;
    require!(now <= season.cut_off_time, FightbookError::CutoffPassed);

    require!(!entries.is_empty(), FightbookError::EmptyBatch);
    require!(
        entries.len() <= MAX_PREDICTIONS_PER_BATCH,
        FightbookError::TooManyEntries
    );

    let slip = &mut ctx.accounts.slip;

    // --- PRECHECK: reject the whole batch before moving funds ---
    let mut total_stake: u64 = 0;
    for (i, entry) in entries.iter().enumerate() {
        let fight = season
            .fights
            .get(entry.fight_index as usize)
            .ok_or_else(|| error!(FightbookError::InvalidFightIndex))?;

        require!(entry.outcome < fight.num_outcomes, FightbookError::InvalidOutcome);
        require!(
            entry.stake >= fight.min_bet && entry.stake <= fight.max_bet,
            FightbookError::StakeOutOfRange
        );
        require!(
            !slip.has_position(entry.fight_index),
            FightbookError::DuplicatePosition
        );
        require!(
            !entries[..i].iter().any(|e| e.fight_index == entry.fight_index),
            FightbookError::DuplicatePosition
        );

        total_stake = total_stake
            .checked_add(entry.stake)
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;
    }

    // --- TRANSFER the batch total into the season vault ---
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        total_stake,
    )?;

    // --- record positions and fold into fight aggregates ---
    slip.user = ctx.accounts.user.key();
    slip.season_id = season_id;
    slip.bump = ctx.bumps.slip;

    for entry in entries.iter() {
        season.fights[entry.fight_index as usize].record_position(entry.outcome, entry.stake)?;
        slip.positions.push(Position {
            fight_index: entry.fight_index,
            outcome: entry.outcome,
            stake: entry.stake,
            claimed: false,
        });
    }

    emit!(PredictionsLocked {
        season_id,
        user: ctx.accounts.user.key(),
        positions: entries.len() as u8,
        total_stake,
    });

    Ok(())
}
