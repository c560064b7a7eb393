//! Simulation event types.
//!
//! Lightweight value types tagged with the frame they were emitted on.
//! Payloads use plain arrays and strings so any sink can serialize them.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub tick: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// The cloth advanced one physics step.
    PhysicsStep {
        /// Integration timestep used (seconds).
        dt: f32,
        /// Impulses live during the step.
        active_impulses: u32,
        /// Wall-clock time of the step (seconds).
        wall_time: f64,
    },

    /// A click added a wind impulse.
    ImpulseAdded {
        origin: [f32; 3],
        strength: f32,
        radius: f32,
    },

    /// Expired or exhausted impulses were dropped.
    ImpulsesPruned {
        count: u32,
        remaining: u32,
    },

    /// The morph changed direction.
    TransitionStarted {
        from: String,
        to: String,
        /// Global progress at the moment of the toggle.
        progress: f32,
    },

    /// The morph settled.
    TransitionFinished {
        state: String,
    },

    /// A click on an element kicked the pivot.
    PivotKicked {
        point: [f32; 3],
    },

    /// A cloth parameter was changed at runtime.
    ParamChanged {
        name: String,
        value: f32,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }
}

impl EventKind {
    /// Short variant name, stable across releases.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PhysicsStep { .. } => "physics_step",
            EventKind::ImpulseAdded { .. } => "impulse_added",
            EventKind::ImpulsesPruned { .. } => "impulses_pruned",
            EventKind::TransitionStarted { .. } => "transition_started",
            EventKind::TransitionFinished { .. } => "transition_finished",
            EventKind::PivotKicked { .. } => "pivot_kicked",
            EventKind::ParamChanged { .. } => "param_changed",
            EventKind::Custom { .. } => "custom",
        }
    }
}
