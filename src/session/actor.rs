//! The async shell around [`Session`].
//!
//! One actor task per session owns the state machine, its mailbox, and
//! the phase deadline. Handles are cheap clones of the mailbox sender;
//! everything mutable lives inside the task, so no locks.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::{
    game::{Chips, ParticipantId, SessionId},
    net::{ParticipantHandle, ServerEvent},
};

use super::{
    config::SessionConfig,
    messages::{SessionMessage, SessionSnapshot},
    state_machine::Session,
    timer::PhaseTimer,
};

const MAILBOX_CAPACITY: usize = 64;

/// The session actor has stopped, either through a disconnect or a
/// shutdown; the state it held is gone.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("session {0} is closed")]
pub struct SessionClosed(pub SessionId);

/// Cloneable address of a running session actor.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    pub id: SessionId,
    pub participants: [ParticipantId; 2],
    sender: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    pub async fn place_bet(
        &self,
        sender: ParticipantId,
        amount: Chips,
    ) -> Result<(), SessionClosed> {
        self.send(SessionMessage::PlaceBet { sender, amount }).await
    }

    pub async fn draw_cards(
        &self,
        sender: ParticipantId,
        indices: Vec<usize>,
    ) -> Result<(), SessionClosed> {
        self.send(SessionMessage::DrawCards { sender, indices })
            .await
    }

    pub async fn skip_draw(&self, sender: ParticipantId) -> Result<(), SessionClosed> {
        self.send(SessionMessage::SkipDraw { sender }).await
    }

    /// Tears the session down; the surviving participant is notified
    /// and the actor stops. No chips are settled.
    pub async fn disconnect(&self, sender: ParticipantId) -> Result<(), SessionClosed> {
        self.send(SessionMessage::Disconnect { sender }).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionClosed> {
        let (respond_to, response) = oneshot::channel();
        self.send(SessionMessage::Snapshot { respond_to }).await?;
        response.await.map_err(|_| SessionClosed(self.id))
    }

    async fn send(&self, message: SessionMessage) -> Result<(), SessionClosed> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionClosed(self.id))
    }
}

pub struct SessionActor {
    session: Session,
    participants: [ParticipantHandle; 2],
    mailbox: mpsc::Receiver<SessionMessage>,
    // Weak so the mailbox closes once every handle is gone; a strong
    // sender here would keep the actor alive forever.
    self_sender: mpsc::WeakSender<SessionMessage>,
    timer: PhaseTimer,
}

impl SessionActor {
    /// Spawns the actor task for a freshly paired session and returns
    /// its handle. The opening `timer-started` events go out before the
    /// first message is processed.
    pub fn spawn(
        id: SessionId,
        participants: [ParticipantHandle; 2],
        config: SessionConfig,
    ) -> SessionHandle {
        let (sender, mailbox) = mpsc::channel(MAILBOX_CAPACITY);
        let participant_ids = [participants[0].id, participants[1].id];
        let actor = Self {
            session: Session::new(id, participant_ids, config),
            participants,
            mailbox,
            self_sender: sender.downgrade(),
            timer: PhaseTimer::new(),
        };
        tokio::spawn(actor.run());
        SessionHandle {
            id,
            participants: participant_ids,
            sender,
        }
    }

    /// Runs until a `Disconnect` arrives or the mailbox closes. The
    /// armed deadline holds the only other sender, and only while it
    /// is pending, so dropping every handle ends the loop after at
    /// most one more timer fire.
    async fn run(mut self) {
        self.flush();
        while let Some(message) = self.mailbox.recv().await {
            match message {
                SessionMessage::PlaceBet { sender, amount } => {
                    self.session.place_bet(sender, amount);
                }
                SessionMessage::DrawCards { sender, indices } => {
                    self.session.draw_cards(sender, &indices);
                }
                SessionMessage::SkipDraw { sender } => {
                    self.session.skip_draw(sender);
                }
                SessionMessage::TimerFired { phase, generation } => {
                    self.session.handle_timeout(phase, generation);
                }
                SessionMessage::Snapshot { respond_to } => {
                    // A dropped receiver just means the caller gave up.
                    let _ = respond_to.send(self.session.snapshot());
                }
                SessionMessage::Disconnect { sender } => {
                    self.timer.cancel();
                    if let Some(seat) = self.session.seat_of(sender) {
                        self.participants[1 - seat].deliver(ServerEvent::OpponentDisconnected);
                    }
                    log::info!(
                        "session {}: {sender} disconnected, closing",
                        self.session.id()
                    );
                    return;
                }
            }
            self.flush();
        }
        self.timer.cancel();
    }

    /// Delivers queued events and re-arms the deadline if the session
    /// entered a new phase during the last step.
    fn flush(&mut self) {
        for (seat, event) in self.session.drain_events() {
            self.participants[seat].deliver(event);
        }
        let generation = self.session.timer_generation();
        if generation != self.timer.armed_generation() {
            // A failed upgrade means the mailbox is closing; the run
            // loop is about to observe that and stop.
            if let Some(mailbox) = self.self_sender.upgrade() {
                self.timer.arm(
                    self.session.phase(),
                    generation,
                    self.session.config().phase_time_limit,
                    mailbox,
                );
            }
        }
    }
}
