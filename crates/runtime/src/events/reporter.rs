//! Reporting boundary between encounters and presentation.
//!
//! An encounter hands every [`CombatEvent`] to its [`Reporter`]. Formatting
//! and delivery belong to the reporter, never to combat resolution.

use arena_core::GameError;

use super::CombatEvent;

/// Receives every event an encounter produces, in order.
pub trait Reporter: Send {
    fn report(&mut self, event: &CombatEvent);
}

/// Logs events through `tracing`: rejections at `warn`, the rest at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::Exchange(outcome) => tracing::info!(
                target: "arena::combat",
                attacker = %outcome.attacker,
                target = %outcome.target,
                damage = outcome.damage,
                defeated = outcome.defeated,
                "{outcome}"
            ),
            CombatEvent::Rejected { error, .. } => tracing::warn!(
                target: "arena::combat",
                code = error.error_code(),
                "{event}"
            ),
            _ => tracing::info!(target: "arena::combat", "{event}"),
        }
    }
}

/// Keeps events in memory for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Vec<CombatEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn rejections(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter().filter(|e| e.is_rejection())
    }

    pub fn take(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &CombatEvent) {
        self.events.push(event.clone());
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, event: &CombatEvent) {
        (**self).report(event);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: &CombatEvent) {
        (**self).report(event);
    }
}

/// Fans every event out to both reporters.
impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn report(&mut self, event: &CombatEvent) {
        self.0.report(event);
        self.1.report(event);
    }
}
