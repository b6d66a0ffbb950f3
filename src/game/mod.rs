//! Pure, synchronous draw-poker logic. Nothing in this module touches
//! the runtime; the session actor drives it.

pub mod constants;
pub mod entities;
pub mod evaluator;
pub mod ledger;

pub use entities::{
    Card, Chips, Deck, ParticipantId, Phase, PlayerSeat, Rank, SeatIndex, SessionId, Suit, Value,
};
pub use evaluator::{HandCategory, HandEvaluation, evaluate};
pub use ledger::{LedgerError, equalize_bets, escrow_bet, settle_pot};
