//! Pluggable event sinks.

use std::sync::{Arc, Mutex, PoisonError};

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    /// Human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared view of the events a [`VecSink`] has collected.
///
/// Stays readable after the sink itself has been boxed into a bus.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl EventLog {
    /// Copy of every event collected so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of collected events whose kind is called `name`.
    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.kind.name() == name)
            .count()
    }

    fn push(&self, event: SimulationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Collects events in memory for tests and tooling.
#[derive(Debug, Default)]
pub struct VecSink {
    log: EventLog,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for reading the collected events.
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.log.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let tick = event.tick;
        let event_name = event.kind.name();
        let kind = &event.kind;
        if self.level == tracing::Level::ERROR {
            tracing::error!(tick, event_name, ?kind, "simulation_event");
        } else if self.level == tracing::Level::WARN {
            tracing::warn!(tick, event_name, ?kind, "simulation_event");
        } else if self.level == tracing::Level::INFO {
            tracing::info!(tick, event_name, ?kind, "simulation_event");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(tick, event_name, ?kind, "simulation_event");
        } else {
            tracing::trace!(tick, event_name, ?kind, "simulation_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
