//! A heads-up five-card draw poker session engine.
//!
//! Two participants are paired by the [`matchmaker::Matchmaker`] and
//! play an endless series of hands inside one session: both bet, the
//! smaller wager sets the stake, each player gets up to three chances
//! to replace cards, and the better hand takes the pot. Phases that
//! stall resolve by timeout rather than hanging.
//!
//! # Architecture
//!
//! - [`game`] is the pure core: cards, the deck, the hand evaluator,
//!   and the chip ledger. No async, no I/O.
//! - [`session`] wraps the per-match state machine in a tokio actor.
//!   Each session is a single task draining a mailbox, so all rules run
//!   strictly one intent at a time and the state needs no locks.
//! - [`net`] defines the wire-level intents and events and the
//!   [`net::ParticipantHandle`] a transport hands in for each
//!   connection.
//! - [`matchmaker`] owns the waiting queue and the session registry and
//!   routes intents to the right actor.
//!
//! The crate is transport-agnostic: a WebSocket server, a TCP server,
//! or a test harness feeds [`net::ClientIntent`]s in and pumps
//! [`net::ServerEvent`]s out of each participant's outbox.
//!
//! ```no_run
//! use draw_poker::{
//!     matchmaker::Matchmaker,
//!     net::{ClientIntent, ParticipantHandle},
//!     session::SessionConfig,
//! };
//! use uuid::Uuid;
//!
//! # async fn demo() -> Result<(), String> {
//! let matchmaker = Matchmaker::new(SessionConfig::default())?;
//! let (alice, mut alice_events) = ParticipantHandle::channel(Uuid::new_v4());
//! matchmaker
//!     .dispatch(&alice, ClientIntent::RequestMatch)
//!     .await;
//! while let Some(event) = alice_events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod game;
pub mod matchmaker;
pub mod net;
pub mod session;

pub use game::{Card, Chips, ParticipantId, Phase, Rank, SeatIndex, SessionId, Suit};
pub use matchmaker::Matchmaker;
pub use net::{ClientIntent, Outcome, ParticipantHandle, ServerEvent};
pub use session::{SessionConfig, SessionHandle, SessionSnapshot};
