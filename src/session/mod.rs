//! One running match between two participants: the pure state machine,
//! the actor that owns it, and the deadline timer that keeps phases
//! from hanging.

pub mod actor;
pub mod config;
pub mod messages;
pub mod state_machine;
pub mod timer;

pub use actor::{SessionActor, SessionClosed, SessionHandle};
pub use config::SessionConfig;
pub use messages::{PlayerSnapshot, SessionMessage, SessionSnapshot};
pub use state_machine::Session;
pub use timer::PhaseTimer;
