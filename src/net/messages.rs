//! Wire-level messages. Transports decode client traffic into
//! [`ClientIntent`]s and encode [`ServerEvent`]s back out; the JSON
//! shape below is the reference encoding.

use serde::{Deserialize, Serialize};

use crate::game::{Card, Chips, ParticipantId, Phase, SeatIndex, SessionId};

/// Everything a connected client can ask for.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "intent", content = "data", rename_all = "kebab-case")]
pub enum ClientIntent {
    RequestMatch,
    #[serde(rename_all = "camelCase")]
    PlaceBet { session_id: SessionId, amount: Chips },
    #[serde(rename_all = "camelCase")]
    DrawCards {
        session_id: SessionId,
        indices: Vec<usize>,
    },
    #[serde(rename_all = "camelCase")]
    SkipDraw { session_id: SessionId },
}

/// Who won a hand, from the perspective of the event's recipient.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    You,
    Opponent,
    Draw,
}

/// Everything the engine can tell a client. Each event is addressed to
/// a single participant; "both players" means two separately addressed
/// events whose payloads differ per recipient.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Waiting,
    #[serde(rename_all = "camelCase")]
    MatchFound {
        session_id: SessionId,
        self_id: ParticipantId,
        opponent_id: ParticipantId,
        player_index: SeatIndex,
    },
    #[serde(rename_all = "camelCase")]
    BetPlaced { chips: Chips, bet: Chips },
    #[serde(rename_all = "camelCase")]
    BetError { message: String },
    #[serde(rename_all = "camelCase")]
    BetRefund {
        refund: Chips,
        chips: Chips,
        bet: Chips,
    },
    #[serde(rename_all = "camelCase")]
    CardsDealt {
        hand: Vec<Card>,
        draw_count: u8,
        remaining_draws: u8,
    },
    #[serde(rename_all = "camelCase")]
    CardsDrawn {
        hand: Vec<Card>,
        draw_count: u8,
        remaining_draws: u8,
    },
    #[serde(rename_all = "camelCase")]
    DrawError { message: String },
    DrawSkipped,
    #[serde(rename_all = "camelCase")]
    TimerStarted {
        phase: Phase,
        time_limit_ms: u64,
        start_time: i64,
    },
    #[serde(rename_all = "camelCase")]
    GameResult {
        outcome: Outcome,
        your_hand: Vec<Card>,
        your_hand_name: String,
        opponent_hand: Vec<Card>,
        opponent_hand_name: String,
        chips: Chips,
        pot: Chips,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    OpponentDisconnected,
}
