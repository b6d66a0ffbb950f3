//! Phase deadline scheduling.
//!
//! A session has at most one live deadline. Arming a new one aborts the
//! previous task, and every fire carries the generation it was armed
//! under, so a fire that lost the race against a phase change is
//! detectable and harmless on the receiving side.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};

use crate::game::Phase;

use super::messages::SessionMessage;

#[derive(Debug, Default)]
pub struct PhaseTimer {
    task: Option<JoinHandle<()>>,
    armed_generation: u64,
}

impl PhaseTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently armed deadline, 0 before any.
    #[must_use]
    pub fn armed_generation(&self) -> u64 {
        self.armed_generation
    }

    /// Replaces any pending deadline with a new one that posts
    /// `TimerFired` back to the session mailbox after `duration`.
    pub fn arm(
        &mut self,
        phase: Phase,
        generation: u64,
        duration: Duration,
        mailbox: mpsc::Sender<SessionMessage>,
    ) {
        self.cancel();
        self.armed_generation = generation;
        self.task = Some(tokio::spawn(async move {
            time::sleep(duration).await;
            // A closed mailbox means the actor already stopped.
            let _ = mailbox
                .send(SessionMessage::TimerFired { phase, generation })
                .await;
        }));
    }

    /// Aborts the pending deadline, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
