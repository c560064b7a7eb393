//! # vexil-debug
//!
//! State snapshots for debugging simulation issues. A snapshot captures
//! the cloth, the morph and every element pose at one frame, encodes to
//! compact binary for offline inspection, and diffs against another
//! snapshot of the same scene.

pub mod snapshot;

pub use snapshot::SceneSnapshot;
