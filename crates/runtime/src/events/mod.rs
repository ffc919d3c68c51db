//! Combat events and the reporters that receive them.
//!
//! Encounters report through a [`Reporter`]; the [`EventBus`] is one such
//! reporter, rebroadcasting events to topic subscribers.

mod bus;
mod reporter;
mod types;

pub use bus::{EventBus, Topic};
pub use reporter::{RecordingReporter, Reporter, TracingReporter};
pub use types::{ActionKind, CombatEvent};
