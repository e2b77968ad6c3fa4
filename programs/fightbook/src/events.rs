use anchor_lang::prelude::*;

#[event]
pub struct PredictionsLocked {
    pub season_id: u64,
    pub user: Pubkey,
    pub positions: u8,
    pub total_stake: u64,
}

#[event]
pub struct SeasonResolved {
    pub season_id: u64,
    pub fight_count: u8,
    pub settlement_time: i64,
}

#[event]
pub struct PrizePoolsSeeded {
    pub season_id: u64,
    pub total_seed: u64,
}

#[event]
pub struct PayoutClaimed {
    pub season_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub positions_settled: u8,
}

#[event]
pub struct BalanceRecovered {
    pub season_id: u64,
    pub to: Pubkey,
    pub amount: u64,
}
