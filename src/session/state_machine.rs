//! The per-session game state machine.
//!
//! [`Session`] is pure and synchronous: intents and timer fires go in,
//! addressed [`ServerEvent`]s queue up inside and are drained by the
//! actor after each step. Nothing here awaits, spawns, or locks, which
//! keeps every rule testable without a runtime.
//!
//! Invalid traffic (wrong phase, unknown sender, repeated readiness) is
//! dropped without a reply; only bet and draw rejections that a
//! well-behaved client can hit produce error events.

use std::{cmp::Ordering, collections::VecDeque};

use chrono::Utc;

use crate::{
    game::{
        Card, Chips, Deck, ParticipantId, Phase, PlayerSeat, SeatIndex, SessionId,
        constants::HAND_SIZE,
        evaluator::evaluate,
        ledger::{equalize_bets, escrow_bet, settle_pot},
    },
    net::{Outcome, ServerEvent},
};

use super::{
    config::SessionConfig,
    messages::{PlayerSnapshot, SessionSnapshot},
};

const HAND_NAME_TIMEOUT: &str = "Timeout";
const HAND_NAME_OPPONENT_TIMEOUT: &str = "Opponent Timeout";

pub struct Session {
    id: SessionId,
    config: SessionConfig,
    seats: [PlayerSeat; 2],
    hands: [Vec<Card>; 2],
    deck: Deck,
    phase: Phase,
    current_bet: Chips,
    timer_generation: u64,
    phase_started_at: i64,
    events: VecDeque<(SeatIndex, ServerEvent)>,
}

impl Session {
    /// Creates a session in the betting phase. The first drain yields
    /// the opening `timer-started` pair.
    #[must_use]
    pub fn new(id: SessionId, participants: [ParticipantId; 2], config: SessionConfig) -> Self {
        let mut session = Self {
            id,
            config,
            seats: participants.map(|p| PlayerSeat::new(p, config.starting_chips)),
            hands: [Vec::new(), Vec::new()],
            deck: Deck::new(),
            phase: Phase::Betting,
            current_bet: 0,
            timer_generation: 0,
            phase_started_at: 0,
            events: VecDeque::new(),
        };
        session.start_phase(Phase::Betting);
        log::info!(
            "session {id}: started with {} and {}",
            participants[0],
            participants[1]
        );
        session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Bumped on every phase (re-)entry; the actor re-arms the deadline
    /// whenever it moves.
    #[must_use]
    pub fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    #[must_use]
    pub fn seat_of(&self, participant: ParticipantId) -> Option<SeatIndex> {
        self.seats.iter().position(|s| s.id == participant)
    }

    /// Takes all queued outbound events, oldest first.
    pub fn drain_events(&mut self) -> Vec<(SeatIndex, ServerEvent)> {
        std::mem::take(&mut self.events).into()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let players = [0, 1].map(|seat| {
            let s = &self.seats[seat];
            PlayerSnapshot {
                id: s.id,
                seat,
                chips: s.chips,
                bet: s.bet,
                ready: s.ready,
                draw_count: s.draw_count,
            }
        });
        SessionSnapshot {
            session_id: self.id,
            phase: self.phase,
            current_bet: self.current_bet,
            timer_generation: self.timer_generation,
            players,
        }
    }

    /// Escrows a wager for the sender. When both seats have bet, the
    /// larger escrow is clamped to the smaller with a refund, cards are
    /// dealt, and the session moves to drawing.
    pub fn place_bet(&mut self, sender: ParticipantId, amount: Chips) {
        if self.phase != Phase::Betting {
            return;
        }
        let Some(seat) = self.seat_of(sender) else {
            return;
        };
        if self.seats[seat].ready {
            return;
        }

        if let Err(err) = escrow_bet(&mut self.seats[seat], amount, self.config.min_bet) {
            self.emit(
                seat,
                ServerEvent::BetError {
                    message: err.to_string(),
                },
            );
            return;
        }
        self.seats[seat].ready = true;
        self.emit(
            seat,
            ServerEvent::BetPlaced {
                chips: self.seats[seat].chips,
                bet: self.seats[seat].bet,
            },
        );

        if self.seats.iter().all(|s| s.ready && s.bet > 0) {
            let (wager, refunds) = equalize_bets(&mut self.seats);
            self.current_bet = wager;
            for seat in 0..2 {
                if refunds[seat] > 0 {
                    self.emit(
                        seat,
                        ServerEvent::BetRefund {
                            refund: refunds[seat],
                            chips: self.seats[seat].chips,
                            bet: self.seats[seat].bet,
                        },
                    );
                }
            }
            log::debug!("session {}: bets equalized at {wager}", self.id);
            self.deal();
        }
    }

    /// Replaces the cards at `indices` with fresh draws and spends one
    /// of the sender's draw attempts.
    ///
    /// Indices are processed highest first so earlier replacements
    /// cannot shift later ones. Out-of-range indices are skipped;
    /// duplicates each draw a replacement for the same slot, last one
    /// winning. An empty submission stands pat but still costs the
    /// attempt. A player's final attempt marks them ready.
    pub fn draw_cards(&mut self, sender: ParticipantId, indices: &[usize]) {
        if self.phase != Phase::Drawing {
            return;
        }
        let Some(seat) = self.seat_of(sender) else {
            return;
        };
        if self.seats[seat].ready {
            return;
        }
        if self.seats[seat].draw_count >= self.config.max_draws {
            self.emit(
                seat,
                ServerEvent::DrawError {
                    message: "Draw limit reached".to_string(),
                },
            );
            return;
        }
        // Malformed: more replacements than a hand holds. Dropping it
        // also bounds the cards one submission can pull from the deck.
        if indices.len() > HAND_SIZE {
            return;
        }

        let mut order = indices.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));
        for index in order {
            if index < HAND_SIZE {
                self.hands[seat][index] = self.deck.draw();
            }
        }
        self.seats[seat].draw_count += 1;

        self.emit(
            seat,
            ServerEvent::CardsDrawn {
                hand: self.hands[seat].clone(),
                draw_count: self.seats[seat].draw_count,
                remaining_draws: self.config.max_draws - self.seats[seat].draw_count,
            },
        );

        if self.seats[seat].draw_count >= self.config.max_draws {
            self.seats[seat].ready = true;
        }
        if self.seats.iter().all(|s| s.ready) {
            self.resolve_showdown(None);
        }
    }

    /// Declines all remaining draws for the sender.
    pub fn skip_draw(&mut self, sender: ParticipantId) {
        if self.phase != Phase::Drawing {
            return;
        }
        let Some(seat) = self.seat_of(sender) else {
            return;
        };
        if self.seats[seat].ready {
            return;
        }

        self.seats[seat].draw_count = self.config.max_draws;
        self.seats[seat].ready = true;
        self.emit(seat, ServerEvent::DrawSkipped);

        if self.seats.iter().all(|s| s.ready) {
            self.resolve_showdown(None);
        }
    }

    /// Applies the deadline for the phase the timer was armed in. A
    /// fire whose phase or generation no longer matches lost the race
    /// against a phase change and is dropped.
    pub fn handle_timeout(&mut self, phase: Phase, generation: u64) {
        if phase != self.phase || generation != self.timer_generation {
            log::debug!(
                "session {}: dropping stale {phase} deadline (generation {generation}, now {} in {})",
                self.id,
                self.timer_generation,
                self.phase
            );
            return;
        }
        match phase {
            Phase::Betting => self.resolve_betting_timeout(),
            Phase::Drawing => self.resolve_drawing_timeout(),
            // Showdown resolves synchronously and never arms a timer.
            Phase::Showdown => {}
        }
    }

    fn emit(&mut self, seat: SeatIndex, event: ServerEvent) {
        self.events.push_back((seat, event));
    }

    fn emit_both(&mut self, event: ServerEvent) {
        self.emit(0, event.clone());
        self.emit(1, event);
    }

    fn start_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.phase_started_at = Utc::now().timestamp_millis();
        self.timer_generation += 1;
        self.emit_both(ServerEvent::TimerStarted {
            phase,
            time_limit_ms: self.config.phase_time_limit_ms(),
            start_time: self.phase_started_at,
        });
    }

    /// Back to betting for the next hand. Chips stay, everything else
    /// resets.
    fn reset_for_next_hand(&mut self) {
        self.current_bet = 0;
        for seat in self.seats.iter_mut() {
            seat.reset_for_next_hand();
        }
        self.start_phase(Phase::Betting);
    }

    fn deal(&mut self) {
        self.deck = Deck::shuffled();
        for seat in 0..2 {
            self.hands[seat] = (0..HAND_SIZE).map(|_| self.deck.draw()).collect();
            self.seats[seat].ready = false;
            self.seats[seat].draw_count = 0;
            self.emit(
                seat,
                ServerEvent::CardsDealt {
                    hand: self.hands[seat].clone(),
                    draw_count: 0,
                    remaining_draws: self.config.max_draws,
                },
            );
        }
        self.start_phase(Phase::Drawing);
    }

    /// Evaluates both hands, pays the pot, tells both sides, and starts
    /// the next hand. Showdown is never observable from outside.
    fn resolve_showdown(&mut self, reason: Option<&str>) {
        self.phase = Phase::Showdown;
        let evals = [evaluate(&self.hands[0]), evaluate(&self.hands[1])];
        let winner = match evals[0].cmp(&evals[1]) {
            Ordering::Greater => Some(0),
            Ordering::Less => Some(1),
            Ordering::Equal => None,
        };
        let pot = settle_pot(&mut self.seats, winner);
        log::info!(
            "session {}: showdown, {} vs {}, pot {pot}, winner {winner:?}",
            self.id,
            evals[0].category,
            evals[1].category
        );

        for seat in 0..2 {
            let outcome = match winner {
                Some(w) if w == seat => Outcome::You,
                Some(_) => Outcome::Opponent,
                None => Outcome::Draw,
            };
            self.emit(
                seat,
                ServerEvent::GameResult {
                    outcome,
                    your_hand: self.hands[seat].clone(),
                    your_hand_name: evals[seat].category.to_string(),
                    opponent_hand: self.hands[1 - seat].clone(),
                    opponent_hand_name: evals[1 - seat].category.to_string(),
                    chips: self.seats[seat].chips,
                    pot,
                    reason: reason.map(str::to_string),
                },
            );
        }
        self.reset_for_next_hand();
    }

    fn resolve_betting_timeout(&mut self) {
        let unready: Vec<SeatIndex> = (0..2)
            .filter(|&i| !self.seats[i].ready || self.seats[i].bet == 0)
            .collect();
        match unready.len() {
            // Both ready transitions out of betting immediately, so a
            // live deadline always finds someone unready.
            0 => {}
            2 => {
                log::info!("session {}: both players sat out the betting phase", self.id);
                for seat in 0..2 {
                    self.emit(
                        seat,
                        ServerEvent::GameResult {
                            outcome: Outcome::Draw,
                            your_hand: Vec::new(),
                            your_hand_name: HAND_NAME_TIMEOUT.to_string(),
                            opponent_hand: Vec::new(),
                            opponent_hand_name: HAND_NAME_TIMEOUT.to_string(),
                            chips: self.seats[seat].chips,
                            pot: 0,
                            reason: Some("both players timed out".to_string()),
                        },
                    );
                }
                self.reset_for_next_hand();
            }
            _ => {
                let loser = unready[0];
                let winner = 1 - loser;
                // The loser never escrowed, so the pot is the winner's
                // own wager coming straight back.
                let pot = settle_pot(&mut self.seats, Some(winner));
                log::info!(
                    "session {}: seat {loser} sat out the betting phase, pot {pot}",
                    self.id
                );
                for seat in 0..2 {
                    let won = seat == winner;
                    let (yours, theirs) = if won {
                        (HAND_NAME_OPPONENT_TIMEOUT, HAND_NAME_TIMEOUT)
                    } else {
                        (HAND_NAME_TIMEOUT, HAND_NAME_OPPONENT_TIMEOUT)
                    };
                    self.emit(
                        seat,
                        ServerEvent::GameResult {
                            outcome: if won { Outcome::You } else { Outcome::Opponent },
                            your_hand: Vec::new(),
                            your_hand_name: yours.to_string(),
                            opponent_hand: Vec::new(),
                            opponent_hand_name: theirs.to_string(),
                            chips: self.seats[seat].chips,
                            pot,
                            reason: Some("betting timed out".to_string()),
                        },
                    );
                }
                self.reset_for_next_hand();
            }
        }
    }

    fn resolve_drawing_timeout(&mut self) {
        let unready: Vec<SeatIndex> = (0..2).filter(|&i| !self.seats[i].ready).collect();
        match unready.len() {
            0 => {}
            // Neither finished drawing; both hands go to showdown as
            // they stand.
            2 => self.resolve_showdown(None),
            _ => {
                let loser = unready[0];
                let winner = 1 - loser;
                let winner_name = evaluate(&self.hands[winner]).category.to_string();
                let pot = settle_pot(&mut self.seats, Some(winner));
                log::info!(
                    "session {}: seat {loser} sat out the drawing phase, pot {pot}",
                    self.id
                );
                for seat in 0..2 {
                    let won = seat == winner;
                    self.emit(
                        seat,
                        ServerEvent::GameResult {
                            outcome: if won { Outcome::You } else { Outcome::Opponent },
                            your_hand: self.hands[seat].clone(),
                            your_hand_name: if won {
                                winner_name.clone()
                            } else {
                                HAND_NAME_TIMEOUT.to_string()
                            },
                            opponent_hand: self.hands[1 - seat].clone(),
                            opponent_hand_name: if won {
                                HAND_NAME_TIMEOUT.to_string()
                            } else {
                                winner_name.clone()
                            },
                            chips: self.seats[seat].chips,
                            pot,
                            reason: Some("drawing timed out".to_string()),
                        },
                    );
                }
                self.reset_for_next_hand();
            }
        }
    }
}
