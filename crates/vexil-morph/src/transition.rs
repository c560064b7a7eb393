//! Morph state machine.
//!
//! | from                        | `toggle_to_rigid`        | `toggle_to_deformable`      |
//! |-----------------------------|--------------------------|-----------------------------|
//! | `Deformable`                | `TransitioningToRigid`   | no-op                       |
//! | `TransitioningToDeformable` | `TransitioningToRigid`   | no-op                       |
//! | `Rigid`                     | no-op                    | `TransitioningToDeformable` |
//! | `TransitioningToRigid`      | no-op                    | `TransitioningToDeformable` |
//!
//! [`TransitionController::advance`] settles into `Rigid` at progress 1
//! and `Deformable` at progress 0.
//!
//! A toggle mid-flight reverses direction without resetting progress.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Observable morph state, derived from the target and animation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionState {
    Deformable,
    Rigid,
    TransitioningToRigid,
    TransitioningToDeformable,
}

impl TransitionState {
    pub fn name(&self) -> &'static str {
        match self {
            TransitionState::Deformable => "deformable",
            TransitionState::Rigid => "rigid",
            TransitionState::TransitioningToRigid => "transitioning_to_rigid",
            TransitionState::TransitioningToDeformable => "transitioning_to_deformable",
        }
    }

    /// Whether the rigid configuration is the target.
    pub fn targets_rigid(&self) -> bool {
        matches!(
            self,
            TransitionState::Rigid | TransitionState::TransitioningToRigid
        )
    }
}

impl fmt::Display for TransitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Global morph progress: 0 is the flag, 1 the polyhedron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionController {
    is_rigid: bool,
    is_animating: bool,
    progress: f32,
    duration: f32,
}

impl TransitionController {
    /// Starts at rest on the flag. `duration` is seconds per full sweep.
    pub fn new(duration: f32) -> Self {
        Self {
            is_rigid: false,
            is_animating: false,
            progress: 0.0,
            duration,
        }
    }

    pub fn state(&self) -> TransitionState {
        match (self.is_rigid, self.is_animating) {
            (false, false) => TransitionState::Deformable,
            (true, false) => TransitionState::Rigid,
            (true, true) => TransitionState::TransitioningToRigid,
            (false, true) => TransitionState::TransitioningToDeformable,
        }
    }

    #[inline]
    pub fn is_rigid(&self) -> bool {
        self.is_rigid
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Heads for the polyhedron. Returns `false` if already headed there.
    pub fn toggle_to_rigid(&mut self) -> bool {
        self.retarget(true)
    }

    /// Heads for the flag. Returns `false` if already headed there.
    pub fn toggle_to_deformable(&mut self) -> bool {
        self.retarget(false)
    }

    fn retarget(&mut self, rigid: bool) -> bool {
        if self.is_rigid == rigid {
            return false;
        }
        let from = self.state();
        self.is_rigid = rigid;
        self.is_animating = true;
        tracing::debug!(
            from = %from,
            to = %self.state(),
            progress = self.progress,
            "morph transition started"
        );
        true
    }

    /// Moves progress toward the target by `dt / duration`.
    ///
    /// Returns the settled state on the tick progress reaches 0 or 1.
    /// A non-finite or negative `dt` advances nothing.
    pub fn advance(&mut self, dt: f32) -> Option<TransitionState> {
        if !self.is_animating {
            return None;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let step = dt / self.duration;

        if self.is_rigid {
            self.progress += step;
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.is_animating = false;
            }
        } else {
            self.progress -= step;
            if self.progress <= 0.0 {
                self.progress = 0.0;
                self.is_animating = false;
            }
        }

        if self.is_animating {
            None
        } else {
            let settled = self.state();
            tracing::debug!(state = %settled, "morph transition finished");
            Some(settled)
        }
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(2.0)
    }
}
