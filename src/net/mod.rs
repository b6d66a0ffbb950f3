//! Transport-facing surface. The engine never talks to sockets; it
//! talks to [`ParticipantHandle`]s, and a transport layer (WebSocket,
//! TCP, an in-process test harness) pumps the far side.

pub mod messages;

pub use messages::{ClientIntent, Outcome, ServerEvent};

use tokio::sync::mpsc;

use crate::game::ParticipantId;

/// The capability to push events at one connected participant.
///
/// Delivery is best-effort: a closed outbox means the participant is
/// already gone, and the disconnect path will tear the session down
/// independently, so a failed send is logged and dropped.
#[derive(Clone, Debug)]
pub struct ParticipantHandle {
    pub id: ParticipantId,
    outbox: mpsc::UnboundedSender<ServerEvent>,
}

impl ParticipantHandle {
    #[must_use]
    pub fn new(id: ParticipantId, outbox: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self { id, outbox }
    }

    /// Builds a handle together with the receiving end of its outbox.
    #[must_use]
    pub fn channel(id: ParticipantId) -> (Self, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(id, tx), rx)
    }

    pub fn deliver(&self, event: ServerEvent) {
        if self.outbox.send(event).is_err() {
            log::debug!("dropping event for disconnected participant {}", self.id);
        }
    }
}
