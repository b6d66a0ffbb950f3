//! Tunable constants for the draw poker engine.

use super::entities::Chips;

/// Stack every participant starts a session with. Chips live only for
/// the session's lifetime; there is no persistence or buy-in.
pub const STARTING_CHIPS: Chips = 1000;

/// Smallest wager the betting phase accepts.
pub const MIN_BET: Chips = 10;

/// How long each betting/drawing phase lasts before the timeout
/// resolution kicks in.
pub const PHASE_TIME_LIMIT_MS: u64 = 5 * 60 * 1000;

/// Draw attempts allowed per hand, stand-pat submissions included.
pub const MAX_DRAW_COUNT: u8 = 3;

pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 5;
