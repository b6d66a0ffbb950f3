//! Pairing and routing. The matchmaker owns the process-wide state: a
//! FIFO queue of participants waiting for an opponent, the registry of
//! running session actors, and the participant-to-session memberships
//! it checks before routing any intent.

use std::collections::{HashMap, VecDeque};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    game::{ParticipantId, SessionId},
    net::{ClientIntent, ParticipantHandle, ServerEvent},
    session::{SessionActor, SessionConfig, SessionHandle},
};

pub struct Matchmaker {
    config: SessionConfig,
    waiting: Mutex<VecDeque<ParticipantHandle>>,
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    memberships: RwLock<HashMap<ParticipantId, SessionId>>,
}

impl Matchmaker {
    pub fn new(config: SessionConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            config,
            waiting: Mutex::new(VecDeque::new()),
            sessions: RwLock::new(HashMap::new()),
            memberships: RwLock::new(HashMap::new()),
        })
    }

    /// Pairs the requester with the longest-waiting participant, or
    /// enqueues them. The requester takes seat 0. Requests from someone
    /// already queued or already in a session are dropped.
    pub async fn request_match(&self, participant: ParticipantHandle) {
        if self.memberships.read().await.contains_key(&participant.id) {
            log::debug!("{} requested a match while already in a session", participant.id);
            return;
        }

        let mut waiting = self.waiting.lock().await;
        if waiting.iter().any(|p| p.id == participant.id) {
            log::debug!("{} requested a match while already queued", participant.id);
            return;
        }
        let Some(opponent) = waiting.pop_front() else {
            participant.deliver(ServerEvent::Waiting);
            log::info!("{} is waiting for an opponent", participant.id);
            waiting.push_back(participant);
            return;
        };
        drop(waiting);

        let session_id = Uuid::new_v4();
        log::info!(
            "paired {} (seat 0) with {} (seat 1) in session {session_id}",
            participant.id,
            opponent.id
        );

        // Announce the pairing before the actor starts so both sides
        // see match-found ahead of the opening timer-started.
        participant.deliver(ServerEvent::MatchFound {
            session_id,
            self_id: participant.id,
            opponent_id: opponent.id,
            player_index: 0,
        });
        opponent.deliver(ServerEvent::MatchFound {
            session_id,
            self_id: opponent.id,
            opponent_id: participant.id,
            player_index: 1,
        });

        {
            let mut memberships = self.memberships.write().await;
            memberships.insert(participant.id, session_id);
            memberships.insert(opponent.id, session_id);
        }
        let handle = SessionActor::spawn(session_id, [participant, opponent], self.config);
        self.sessions.write().await.insert(session_id, handle);
    }

    /// Routes one client intent. Intents naming a session the sender is
    /// not a member of are dropped without a reply.
    pub async fn dispatch(&self, sender: &ParticipantHandle, intent: ClientIntent) {
        match intent {
            ClientIntent::RequestMatch => self.request_match(sender.clone()).await,
            ClientIntent::PlaceBet { session_id, amount } => {
                if let Some(session) = self.session_for(sender.id, session_id).await
                    && session.place_bet(sender.id, amount).await.is_err()
                {
                    self.forget_session(session_id).await;
                }
            }
            ClientIntent::DrawCards {
                session_id,
                indices,
            } => {
                if let Some(session) = self.session_for(sender.id, session_id).await
                    && session.draw_cards(sender.id, indices).await.is_err()
                {
                    self.forget_session(session_id).await;
                }
            }
            ClientIntent::SkipDraw { session_id } => {
                if let Some(session) = self.session_for(sender.id, session_id).await
                    && session.skip_draw(sender.id).await.is_err()
                {
                    self.forget_session(session_id).await;
                }
            }
        }
    }

    /// Removes the participant from wherever they are. A running
    /// session is torn down: the survivor is notified and keeps their
    /// stack, nothing is settled.
    pub async fn disconnect(&self, participant: ParticipantId) {
        self.waiting.lock().await.retain(|p| p.id != participant);

        let session_id = self.memberships.read().await.get(&participant).copied();
        if let Some(session_id) = session_id {
            if let Some(handle) = self.sessions.write().await.remove(&session_id) {
                let mut memberships = self.memberships.write().await;
                for member in handle.participants {
                    memberships.remove(&member);
                }
                drop(memberships);
                // Already-closed is fine; the actor is gone either way.
                let _ = handle.disconnect(participant).await;
            }
            log::info!("{participant} disconnected, session {session_id} closed");
        }
    }

    pub async fn waiting_count(&self) -> usize {
        self.waiting.lock().await.len()
    }

    pub async fn active_session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn session(&self, session_id: SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    async fn session_for(
        &self,
        sender: ParticipantId,
        session_id: SessionId,
    ) -> Option<SessionHandle> {
        if self.memberships.read().await.get(&sender) != Some(&session_id) {
            log::debug!("{sender} addressed session {session_id} they are not part of");
            return None;
        }
        self.sessions.read().await.get(&session_id).cloned()
    }

    /// Drops registry entries for an actor that stopped on its own.
    async fn forget_session(&self, session_id: SessionId) {
        if let Some(handle) = self.sessions.write().await.remove(&session_id) {
            let mut memberships = self.memberships.write().await;
            for member in handle.participants {
                if memberships.get(&member) == Some(&session_id) {
                    memberships.remove(&member);
                }
            }
        }
    }
}
