//! Scene snapshot serialization.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vexil_math::{Pose, Vec3};
use vexil_types::{VexilError, VexilResult};

/// The scene at one frame.
///
/// Serialized with `bincode`. Holds observable state only; it is a record
/// for inspection, not a save game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Frame index when this snapshot was taken.
    pub tick: u64,
    /// Host clock at that frame (milliseconds).
    pub clock_ms: f64,
    /// Global morph progress.
    pub progress: f32,
    /// Morph state name (`deformable`, `rigid`, ...).
    pub state: String,
    /// Particle positions (flat: [x0, y0, z0, x1, y1, z1, ...]).
    pub positions: Vec<f32>,
    /// Live wind impulses.
    pub active_impulses: usize,
    /// Rigid pivot pose.
    pub pivot: Pose,
    /// Element poses in element order.
    pub elements: Vec<Pose>,
}

impl SceneSnapshot {
    /// Number of particles captured.
    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position of particle `i`.
    pub fn particle(&self, i: usize) -> Option<Vec3> {
        self.positions
            .get(3 * i..3 * i + 3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    /// Largest per-particle distance to `other`.
    ///
    /// Fails if the snapshots come from grids of different sizes.
    pub fn max_particle_delta(&self, other: &SceneSnapshot) -> VexilResult<f32> {
        if self.positions.len() != other.positions.len() {
            return Err(VexilError::InvalidDimensions(format!(
                "cannot diff {} particles against {}",
                self.particle_count(),
                other.particle_count()
            )));
        }
        Ok(self
            .positions
            .chunks_exact(3)
            .zip(other.positions.chunks_exact(3))
            .map(|(a, b)| Vec3::from_slice(a).distance(Vec3::from_slice(b)))
            .fold(0.0, f32::max))
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> VexilResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| VexilError::Serialization(e.to_string()))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> VexilResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| VexilError::Serialization(format!("snapshot decode failed: {e}")))
    }

    pub fn save(&self, path: &Path) -> VexilResult<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    pub fn load(path: &Path) -> VexilResult<Self> {
        Self::from_bytes(&fs::read(path)?)
    }
}
