//! Strongly-typed identifiers for simulation entities.
//!
//! Newtype wrappers prevent accidental mixing of particle indices
//! with element indices or scene-graph handles.

use serde::{Deserialize, Serialize};

/// Index into the cloth particle array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// Index of an animated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u16);

/// Opaque handle to a render transform owned by the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub u32);

impl ParticleId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ElementId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl NodeHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for ParticleId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<usize> for ParticleId {
    fn from(val: usize) -> Self {
        Self(val as u32)
    }
}

impl From<u16> for ElementId {
    fn from(val: u16) -> Self {
        Self(val)
    }
}

impl From<u32> for NodeHandle {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
