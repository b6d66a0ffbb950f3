//! Mailbox messages for the session actor, plus the snapshot types it
//! answers state queries with.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::game::{Chips, ParticipantId, Phase, SeatIndex, SessionId};

/// One unit of work for a session actor. Messages are handled strictly
/// one at a time, which is what serializes concurrent intents from the
/// two participants.
#[derive(Debug)]
pub enum SessionMessage {
    PlaceBet {
        sender: ParticipantId,
        amount: Chips,
    },
    DrawCards {
        sender: ParticipantId,
        indices: Vec<usize>,
    },
    SkipDraw {
        sender: ParticipantId,
    },
    /// Posted by the armed deadline task. Carries the generation it was
    /// armed under so the session can ignore stale fires.
    TimerFired {
        phase: Phase,
        generation: u64,
    },
    Disconnect {
        sender: ParticipantId,
    },
    Snapshot {
        respond_to: oneshot::Sender<SessionSnapshot>,
    },
}

/// Point-in-time view of a session, for status queries and tests.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: Phase,
    pub current_bet: Chips,
    pub timer_generation: u64,
    pub players: [PlayerSnapshot; 2],
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub id: ParticipantId,
    pub seat: SeatIndex,
    pub chips: Chips,
    pub bet: Chips,
    pub ready: bool,
    pub draw_count: u8,
}
