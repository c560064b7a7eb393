//! # vexil-scene
//!
//! The simulation context: owns the cloth, the morph, the pivot and the
//! element handles, consumes host input, and advances everything once
//! per rendered frame.
//!
//! ```text
//! let mut ctx = SimulationContext::new(SceneConfig::default())?;
//! loop {
//!     ctx.handle_input(event);   // zero or more per frame
//!     ctx.tick(now_ms);
//! }
//! ```

pub mod config;
pub mod context;
pub mod input;

pub use config::SceneConfig;
pub use context::SimulationContext;
pub use input::{DragMotion, DragState, InputEvent};
