//! # vexil-telemetry
//!
//! Event bus for simulation telemetry. The scene emits structured events
//! (physics steps, impulses, morph transitions, pivot kicks, parameter
//! changes) that pluggable sinks consume: an in-memory log for tests and
//! tooling, or `tracing` for live runs.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventLog, EventSink, TracingSink, VecSink};
