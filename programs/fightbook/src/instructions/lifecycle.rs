use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::FightbookError;
use crate::events::BalanceRecovered;
use crate::utils::recovery_open;
use crate::{CloseSeason, CloseSlip, RecoverRemainingBalance, SEASON_SEED};

/// Sweeps whatever is left in the season vault (unclaimed stakes,
/// forfeited losses, truncation remainders) once the claim window has
/// fully elapsed. Unconditional: it does not re-check positions.
pub fn recover_remaining_balance(
    ctx: Context<RecoverRemainingBalance>,
    season_id: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), FightbookError::Unauthorized);

    let season = &mut ctx.accounts.season;
    require!(season.resolved, FightbookError::SeasonNotResolved);
    require!(!season.swept, FightbookError::AlreadySwept);

    let now = Clock::get()?.unix_timestamp;
    require!(
        recovery_open(season.settlement_time, now),
        FightbookError::RecoveryTooEarly
    );

    let amount = ctx.accounts.vault.amount;
    if amount > 0 {
        let season_le = season_id.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[SEASON_SEED, &season_le, &[season.bump]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.recipient_token_account.to_account_info(),
                    authority: season.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    season.swept = true;
    season.swept_at = now;

    emit!(BalanceRecovered {
        season_id,
        to: ctx.accounts.recipient_token_account.key(),
        amount,
    });

    Ok(())
}

/// Closes the vault token account and the season account, reclaiming
/// rent. Requires a prior sweep so the vault is provably empty.
pub fn close_season(ctx: Context<CloseSeason>, season_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), FightbookError::Unauthorized);

    let season = &ctx.accounts.season;
    require!(season.swept, FightbookError::NotSwept);
    require!(ctx.accounts.vault.amount == 0, FightbookError::VaultNotEmpty);

    let season_le = season_id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[SEASON_SEED, &season_le, &[season.bump]]];

    token::close_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        token::CloseAccount {
            account: ctx.accounts.vault.to_account_info(),
            destination: ctx.accounts.admin.to_account_info(),
            authority: season.to_account_info(),
        },
        signer_seeds,
    ))?;

    // season account itself is closed by the `close = admin` constraint
    Ok(())
}

/// Reclaims the slip's rent once it can no longer pay out: every
/// position claimed, or the season swept.
pub fn close_slip(ctx: Context<CloseSlip>, _season_id: u64) -> Result<()> {
    let slip = &ctx.accounts.slip;
    require_keys_eq!(slip.user, ctx.accounts.user.key(), FightbookError::Unauthorized);

    let season = &ctx.accounts.season;
    require!(
        season.swept || slip.all_claimed(),
        FightbookError::UnclaimedPositions
    );

    // lamports move via the `close = user` constraint
    Ok(())
}
