use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::FightbookError;
use crate::state::{Config, PredictionSlip, Season};

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct CreateSeason<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = 8 + Season::INIT_SPACE,
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump
    )]
    pub season: Account<'info, Season>,

    #[account(
        init,
        payer = admin,
        seeds = [crate::SEASON_VAULT_SEED, season_id.to_le_bytes().as_ref()],
        bump,
        token::mint = mint,
        token::authority = season
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    /// Funds the initial prize pools.
    #[account(
        mut,
        constraint = admin_token_account.mint == mint.key() @ FightbookError::MintMismatch,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct ResolveSeason<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct SeedPrizePools<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    #[account(
        mut,
        address = season.vault @ FightbookError::VaultMismatch,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = admin_token_account.mint == season.mint @ FightbookError::MintMismatch,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct CalculateRequiredSeed<'info> {
    #[account(
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct LockPredictions<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    #[account(
        mut,
        address = season.vault @ FightbookError::VaultMismatch,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + PredictionSlip::INIT_SPACE,
        seeds = [crate::SLIP_SEED, season_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump
    )]
    pub slip: Account<'info, PredictionSlip>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_token_account.mint == season.mint @ FightbookError::MintMismatch,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct Claim<'info> {
    #[account(
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    #[account(
        mut,
        address = season.vault @ FightbookError::VaultMismatch,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [crate::SLIP_SEED, season_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump = slip.bump,
    )]
    pub slip: Account<'info, PredictionSlip>,

    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_token_account.mint == season.mint @ FightbookError::MintMismatch,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct PositionWinnings<'info> {
    #[account(
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    #[account(
        seeds = [crate::SLIP_SEED, season_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump = slip.bump,
    )]
    pub slip: Account<'info, PredictionSlip>,

    pub user: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct RecoverRemainingBalance<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    #[account(
        mut,
        address = season.vault @ FightbookError::VaultMismatch,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    /// Destination for everything left in the vault.
    #[account(
        mut,
        constraint = recipient_token_account.mint == season.mint @ FightbookError::MintMismatch,
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct CloseSeason<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        close = admin,
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    #[account(
        mut,
        address = season.vault @ FightbookError::VaultMismatch,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(season_id: u64)]
pub struct CloseSlip<'info> {
    #[account(
        seeds = [crate::SEASON_SEED, season_id.to_le_bytes().as_ref()],
        bump = season.bump,
    )]
    pub season: Account<'info, Season>,

    #[account(
        mut,
        close = user,
        seeds = [crate::SLIP_SEED, season_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump = slip.bump,
    )]
    pub slip: Account<'info, PredictionSlip>,

    #[account(mut)]
    pub user: Signer<'info>,
}
