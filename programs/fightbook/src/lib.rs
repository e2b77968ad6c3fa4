use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Fightbook",
    project_url: "https://fightbook.bet",
    contacts: "email:security@fightbook.bet,link:https://github.com/fightbook/fightbook/issues",
    policy: "https://github.com/fightbook/fightbook/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/fightbook/fightbook"
}

declare_id!("3iHZW2x2566ecutQ8C7kyEooYB1k1xzziqDx2aedCmTz");

#[program]
pub mod fightbook {
    use super::*;
    use crate::instructions::{admin, claim, lifecycle, predict, seeding};

    pub fn initialize_config(ctx: Context<InitializeConfig>) -> Result<()> {
        admin::initialize_config(ctx)
    }

    pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        admin::transfer_admin(ctx, new_admin)
    }

    pub fn create_season_with_fights(
        ctx: Context<CreateSeason>,
        season_id: u64,
        cut_off_time: i64,
        fight_setups: Vec<FightSetup>,
        prize_amounts: Vec<u64>,
    ) -> Result<()> {
        admin::create_season_with_fights(ctx, season_id, cut_off_time, fight_setups, prize_amounts)
    }

    pub fn resolve_season(
        ctx: Context<ResolveSeason>,
        season_id: u64,
        winning_outcomes: Vec<u8>,
    ) -> Result<()> {
        admin::resolve_season(ctx, season_id, winning_outcomes)
    }

    // core
    pub fn lock_predictions(
        ctx: Context<LockPredictions>,
        season_id: u64,
        entries: Vec<PredictionEntry>,
    ) -> Result<()> {
        predict::lock_predictions(ctx, season_id, entries)
    }

    pub fn claim(ctx: Context<Claim>, season_id: u64) -> Result<()> {
        claim::claim(ctx, season_id)
    }

    pub fn position_winnings(
        ctx: Context<PositionWinnings>,
        season_id: u64,
    ) -> Result<Vec<u64>> {
        claim::position_winnings(ctx, season_id)
    }

    // seeding
    pub fn calculate_required_seed_for_season(
        ctx: Context<CalculateRequiredSeed>,
        season_id: u64,
        candidate_outcomes: Vec<u8>,
    ) -> Result<Vec<u64>> {
        seeding::calculate_required_seed_for_season(ctx, season_id, candidate_outcomes)
    }

    pub fn seed_prize_pools_for_season(
        ctx: Context<SeedPrizePools>,
        season_id: u64,
        candidate_outcomes: Vec<u8>,
    ) -> Result<()> {
        seeding::seed_prize_pools_for_season(ctx, season_id, candidate_outcomes)
    }

    // lifecycle
    pub fn recover_remaining_balance(
        ctx: Context<RecoverRemainingBalance>,
        season_id: u64,
    ) -> Result<()> {
        lifecycle::recover_remaining_balance(ctx, season_id)
    }

    pub fn close_season(ctx: Context<CloseSeason>, season_id: u64) -> Result<()> {
        lifecycle::close_season(ctx, season_id)
    }

    pub fn close_slip(ctx: Context<CloseSlip>, season_id: u64) -> Result<()> {
        lifecycle::close_slip(ctx, season_id)
    }
}
