//! Chip arithmetic for a two-seat session.
//!
//! Bets move through three stages: escrow (chips leave the stack into
//! the seat's `bet`), equalization (both escrows clamped to the smaller
//! one, excess refunded), and settlement (the pot pays out and bets
//! zero). Chips are conserved across all three; nothing here creates or
//! destroys them.

use thiserror::Error;

use super::entities::{Chips, PlayerSeat, SeatIndex};

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum LedgerError {
    #[error("Minimum bet is {min} chips")]
    BelowMinimum { min: Chips },
    #[error("Insufficient chips")]
    InsufficientFunds,
}

/// Moves `amount` chips from the seat's stack into its escrowed bet.
///
/// The stack is untouched on error, so a rejected bet can simply be
/// answered and retried.
pub fn escrow_bet(
    seat: &mut PlayerSeat,
    amount: Chips,
    min_bet: Chips,
) -> Result<(), LedgerError> {
    if amount < min_bet {
        return Err(LedgerError::BelowMinimum { min: min_bet });
    }
    if amount > seat.chips {
        return Err(LedgerError::InsufficientFunds);
    }
    seat.chips -= amount;
    seat.bet += amount;
    Ok(())
}

/// Clamps both escrowed bets to the smaller of the two and refunds the
/// excess to the larger bettor's stack. Returns the equalized wager and
/// the per-seat refunds.
pub fn equalize_bets(seats: &mut [PlayerSeat; 2]) -> (Chips, [Chips; 2]) {
    let wager = seats[0].bet.min(seats[1].bet);
    let mut refunds = [0; 2];
    for (seat, refund) in seats.iter_mut().zip(&mut refunds) {
        *refund = seat.bet - wager;
        seat.chips += *refund;
        seat.bet = wager;
    }
    (wager, refunds)
}

/// Pays out the pot (the sum of both escrowed bets) and zeroes the
/// bets. `Some(seat)` credits the whole pot to that seat; `None` is a
/// split, returning each seat's own bet. Returns the pot size.
///
/// Covers every resolution path: a showdown after equalization, a
/// betting-phase forfeit where the loser never escrowed anything, and a
/// drawing-phase forfeit where both seats hold the equalized wager.
pub fn settle_pot(seats: &mut [PlayerSeat; 2], winner: Option<SeatIndex>) -> Chips {
    let pot = seats[0].bet + seats[1].bet;
    match winner {
        Some(index) => seats[index].chips += pot,
        None => {
            for seat in seats.iter_mut() {
                seat.chips += seat.bet;
            }
        }
    }
    for seat in seats.iter_mut() {
        seat.bet = 0;
    }
    pot
}
