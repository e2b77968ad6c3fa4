use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::*;
use crate::errors::FightbookError;
use crate::events::SeasonResolved;
use crate::state::Fight;
use crate::utils::FightSetup;
use crate::{CreateSeason, InitializeConfig, ResolveSeason, SetPause, TransferAdmin};

pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
    let cfg = &mut ctx.accounts.config;

    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;
    cfg.paused = false;
    cfg.seasons_created = 0;
    cfg.version = INITIAL_VERSION;

    Ok(())
}

pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), FightbookError::Unauthorized);
    cfg.paused = paused;
    Ok(())
}

pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), FightbookError::Unauthorized);
    cfg.admin = new_admin;
    Ok(())
}

pub fn create_season_with_fights(
    ctx: Context<CreateSeason>,
    season_id: u64,
    cut_off_time: i64,
    fight_setups: Vec<FightSetup>,
    prize_amounts: Vec<u64>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, FightbookError::Paused);
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), FightbookError::Unauthorized);

    let now = Clock::get()?.unix_timestamp;
    require!(cut_off_time > now, FightbookError::CutoffInPast);
    require!(
        !fight_setups.is_empty() && fight_setups.len() <= MAX_FIGHTS_PER_SEASON,
        FightbookError::InvalidFightCount
    );
    require!(
        prize_amounts.len() == fight_setups.len(),
        FightbookError::PrizeLengthMismatch
    );
    for setup in fight_setups.iter() {
        require!(
            setup.min_bet > 0 && setup.min_bet <= setup.max_bet,
            FightbookError::InvalidBetLimits
        );
        require!(
            setup.num_outcomes >= 1 && setup.num_outcomes <= MAX_OUTCOMES,
            FightbookError::InvalidOutcomeCount
        );
    }

    let mut total_prize: u64 = 0;
    for amount in prize_amounts.iter() {
        total_prize = total_prize
            .checked_add(*amount)
            .ok_or_else(|| error!(FightbookError::MathOverflow))?;
    }

    // --- TRANSFER initial prize pools into the season vault ---
    if total_prize > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.admin_token_account.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                    authority: ctx.accounts.admin.to_account_info(),
                },
            ),
            total_prize,
        )?;
    }

    let season = &mut ctx.accounts.season;
    season.season_id = season_id;
    season.bump = ctx.bumps.season;

    season.mint = ctx.accounts.mint.key();
    season.vault = ctx.accounts.vault.key();
    season.vault_bump = ctx.bumps.vault;

    season.cut_off_time = cut_off_time;

    season.resolved = false;
    season.settlement_time = 0;

    season.swept = false;
    season.swept_at = 0;

    season.fights = fight_setups
        .iter()
        .zip(prize_amounts.iter())
        .map(|(setup, prize)| Fight {
            min_bet: setup.min_bet,
            max_bet: setup.max_bet,
            num_outcomes: setup.num_outcomes,
            prize_pool: *prize,
            ..Fight::default()
        })
        .collect();

    let cfg = &mut ctx.accounts.config;
    cfg.seasons_created = cfg
        .seasons_created
        .checked_add(1)
        .ok_or_else(|| error!(FightbookError::MathOverflow))?;

    msg!(
        "Season {} created: {} fights, {} prize units funded",
        season_id,
        season.fights.len(),
        total_prize
    );

    Ok(())
}

/// Fixes each fight's winning outcome and derived pool/share values.
/// Moves no funds; the supplied outcomes are the trusted external
/// result feed.
pub fn resolve_season(
    ctx: Context<ResolveSeason>,
    season_id: u64,
    winning_outcomes: Vec<u8>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, FightbookError::Paused);
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), FightbookError::Unauthorized);

    let season = &mut ctx.accounts.season;
    require!(!season.resolved, FightbookError::SeasonAlreadyResolved);
    require!(
        winning_outcomes.len() == season.fights.len(),
        FightbookError::OutcomesLengthMismatch
    );

    // --- PRECHECK: validate the whole batch before touching state ---
    for (fight, outcome) in season.fights.iter().zip(winning_outcomes.iter()) {
        require!(*outcome < fight.num_outcomes, FightbookError::InvalidOutcome);
    }

    for (fight, outcome) in season.fights.iter_mut().zip(winning_outcomes.iter()) {
        fight.apply_resolution(*outcome)?;
    }

    let now = Clock::get()?.unix_timestamp;
    season.resolved = true;
    season.settlement_time = now;

    emit!(SeasonResolved {
        season_id,
        fight_count: season.fights.len() as u8,
        settlement_time: now,
    });

    Ok(())
}
