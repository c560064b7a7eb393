//! # vexil-morph
//!
//! The flag-to-polyhedron morph: where each element sits in either
//! configuration, and how it travels between them.
//!
//! ## Key Types
//!
//! - [`TransitionController`]: Four-state morph state machine with reversible progress
//! - [`AnimatedElement`]: One star: render handle, rigid pose, cloth `(u, v)`, stagger rank
//! - [`RigidPivot`]: Spring-damped frame the rigid configuration rides on
//! - [`SceneGraph`]: Seam to the host's render transforms; [`NodeStore`] is the headless one
//! - [`MorphConfig`] / [`PivotConfig`]: Tunables with the stock defaults

pub mod blend;
pub mod config;
pub mod element;
pub mod layout;
pub mod pivot;
pub mod scene_graph;
pub mod transition;

pub use blend::{cloth_pose, element_pose, rigid_pose, staggered_progress};
pub use config::{MorphConfig, PivotConfig};
pub use element::{spawn_elements, stagger_order, AnimatedElement};
pub use layout::{cloth_layout, icosahedron_vertices, rigid_layout};
pub use pivot::RigidPivot;
pub use scene_graph::{NodeStore, SceneGraph};
pub use transition::{TransitionController, TransitionState};
