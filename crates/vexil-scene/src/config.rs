//! Scene configuration.
//!
//! One TOML document covers every subsystem; missing keys take the
//! stock defaults.
//!
//! ```toml
//! physics_interval_ms = 30.0
//! viewport = [1280.0, 720.0]
//!
//! [flag]
//! cols = 15
//! rows = 20
//!
//! [cloth]
//! wind_strength = 0.5
//!
//! [morph]
//! seed = 7
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vexil_cloth::{ClothParams, FlagDimensions};
use vexil_math::Vec2;
use vexil_morph::{MorphConfig, PivotConfig};
use vexil_types::constants::DEFAULT_PHYSICS_INTERVAL_MS;
use vexil_types::{VexilError, VexilResult};

/// Aggregate configuration for a [`SimulationContext`](crate::SimulationContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Minimum wall-clock gap between cloth steps (milliseconds).
    pub physics_interval_ms: f64,

    /// Host viewport in pixels; normalizes pointer drags.
    pub viewport: Vec2,

    pub flag: FlagDimensions,
    pub cloth: ClothParams,
    pub morph: MorphConfig,
    pub pivot: PivotConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            physics_interval_ms: DEFAULT_PHYSICS_INTERVAL_MS,
            viewport: Vec2::new(1280.0, 720.0),
            flag: FlagDimensions::default(),
            cloth: ClothParams::default(),
            morph: MorphConfig::default(),
            pivot: PivotConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> VexilResult<Self> {
        let config: SceneConfig =
            toml::from_str(source).map_err(|e| VexilError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> VexilResult<Self> {
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "scene config loaded");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> VexilResult<String> {
        toml::to_string_pretty(self).map_err(|e| VexilError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> VexilResult<()> {
        if !(self.physics_interval_ms.is_finite() && self.physics_interval_ms >= 0.0) {
            return Err(VexilError::InvalidConfig(format!(
                "physics_interval_ms must be non-negative, got {}",
                self.physics_interval_ms
            )));
        }
        if !(self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            return Err(VexilError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.x, self.viewport.y
            )));
        }
        self.flag.validate()?;
        self.cloth.validate()?;
        self.morph.validate()?;
        self.pivot.validate()
    }
}
