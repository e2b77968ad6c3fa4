// Centralized Protocol Constants

// Time Logic Constants
// ====================

/// Window after season settlement during which claims are accepted
/// (inclusive at both ends). Once it elapses, only admin recovery can
/// move the remaining vault balance.
pub const CLAIM_WINDOW_SECONDS: i64 = 72 * 60 * 60;

// Outcome Encoding
// ================
//
// An outcome packs (side, method) into one byte: `side << 2 | method`.
// side 0 = corner A, side 1 = corner B.
// method 0 = Submission, 1 = Decision, 2 = KO/TKO, 3 = No-Contest.

pub const SIDE_SHIFT: u8 = 2;
pub const METHOD_MASK: u8 = 0b11;

/// Distinguished method value: nobody scores and every stake refunds.
pub const METHOD_NO_CONTEST: u8 = 3;

/// Highest representable outcome count (2 sides x 4 methods).
pub const MAX_OUTCOMES: u8 = 8;

pub const SIDE_A: u8 = 0;
pub const SIDE_B: u8 = 1;

// Scoring
// =======

/// Points for predicting the exact (side, method) pair.
pub const POINTS_EXACT: u64 = 4;

/// Points for the right side with the wrong method.
/// Side-only correctness is worth a fixed 75% of an exact match.
pub const POINTS_SIDE_ONLY: u64 = 3;

// Capacity Limits
// ===============

/// Maximum fights per season. Bounds the Season account size.
pub const MAX_FIGHTS_PER_SEASON: usize = 16;

/// Maximum entries accepted in one lock_predictions call. A slip can
/// never hold more positions than the season has fights.
pub const MAX_PREDICTIONS_PER_BATCH: usize = MAX_FIGHTS_PER_SEASON;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
