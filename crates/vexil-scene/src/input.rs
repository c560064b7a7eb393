//! Host input events and pointer-drag tracking.

use vexil_math::{Vec2, Vec3};

/// Input delivered by the host. Touch maps onto the pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at screen `(x, y)` pixels.
    PointerDown { x: f32, y: f32 },
    /// Pointer moved to screen `(x, y)` pixels.
    PointerMove { x: f32, y: f32 },
    PointerUp,
    /// A click, with the host's ray-cast hits in world space.
    Click {
        /// Hit on the flag surface, if any.
        flag_hit: Option<Vec3>,
        /// Hit on any element, if any.
        element_hit: Option<Vec3>,
        /// Host clock at the click (milliseconds, same clock as `tick`).
        /// Wind impulses decay from this instant.
        time_ms: f64,
    },
}

/// One pointer move while pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMotion {
    /// Pixels moved since the previous event.
    pub delta: Vec2,
    /// Moved more than one pixel on either axis.
    pub significant: bool,
}

/// Press/move/release bookkeeping.
///
/// A press clears the dragged flag; any significant move sets it. The
/// click that ends a drag consumes the flag via [`DragState::take_dragged`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pressed: bool,
    dragged: bool,
    last: Vec2,
}

impl DragState {
    pub fn press(&mut self, at: Vec2) {
        self.pressed = true;
        self.dragged = false;
        self.last = at;
    }

    /// Records a move. Returns `None` unless the pointer is pressed.
    pub fn motion(&mut self, at: Vec2) -> Option<DragMotion> {
        if !self.pressed {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        let significant = delta.x.abs() > 1.0 || delta.y.abs() > 1.0;
        if significant {
            self.dragged = true;
        }
        Some(DragMotion { delta, significant })
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the last press turned into a drag. Resets the flag.
    pub fn take_dragged(&mut self) -> bool {
        std::mem::take(&mut self.dragged)
    }
}
