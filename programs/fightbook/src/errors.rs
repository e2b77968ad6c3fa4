use anchor_lang::prelude::*;

#[error_code]
pub enum FightbookError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Protocol paused")]
    Paused,

    // -----------------
    // Season creation
    // -----------------
    #[msg("Cutoff time must be in the future")]
    CutoffInPast,
    #[msg("Season must have between 1 and 16 fights")]
    InvalidFightCount,
    #[msg("Fight bet limits invalid (need 0 < min_bet <= max_bet)")]
    InvalidBetLimits,
    #[msg("Outcome count must be between 1 and 8")]
    InvalidOutcomeCount,
    #[msg("Prize amounts length does not match fight count")]
    PrizeLengthMismatch,

    // -----------------
    // Locking predictions
    // -----------------
    #[msg("Betting cutoff has passed")]
    CutoffPassed,
    #[msg("Empty prediction batch")]
    EmptyBatch,
    #[msg("Too many entries in batch")]
    TooManyEntries,
    #[msg("Fight index out of range")]
    InvalidFightIndex,
    #[msg("Outcome out of range for this fight")]
    InvalidOutcome,
    #[msg("Stake outside [min_bet, max_bet]")]
    StakeOutOfRange,
    #[msg("Position already locked for this fight")]
    DuplicatePosition,

    // -----------------
    // Resolution
    // -----------------
    #[msg("Season already resolved")]
    SeasonAlreadyResolved,
    #[msg("Season not resolved")]
    SeasonNotResolved,
    #[msg("Winning outcomes length does not match fight count")]
    OutcomesLengthMismatch,

    // -----------------
    // Claim / recovery
    // -----------------
    #[msg("Claim window not open yet")]
    ClaimWindowNotOpen,
    #[msg("Claim window has expired")]
    ClaimWindowExpired,
    #[msg("Recovery not allowed until the claim window elapses")]
    RecoveryTooEarly,
    #[msg("Season vault already swept")]
    AlreadySwept,
    #[msg("Season vault not swept")]
    NotSwept,
    #[msg("Unclaimed winning positions remain on this slip")]
    UnclaimedPositions,

    // -----------------
    // Account plumbing
    // -----------------
    #[msg("Vault PDA mismatch")]
    VaultMismatch,
    #[msg("Token account mint does not match season mint")]
    MintMismatch,
    #[msg("Slip does not belong to this season")]
    SlipSeasonMismatch,
    #[msg("Vault not empty")]
    VaultNotEmpty,

    #[msg("Math overflow")]
    MathOverflow,
}
