//! # Engine configuration
//!
//! Tuning knobs and initial state for a [`PointingEngine`](crate::PointingEngine),
//! loadable from a TOML file. Every key is optional:
//!
//! ```toml
//! celestial_update_interval_ms = 60000
//! sensor_tolerance = 0.01
//! field_of_view = 45.0
//! view_direction_mode = "standard"   # or "rotate90", "telescope"
//! auto_update_pointing = true
//! ```

use crate::error::{Error, Result};
use crate::view::ViewDirectionMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Minimum time between celestial-axis recomputes, unless forced.
    pub celestial_update_interval_ms: i64,
    /// Smallest squared magnitude accepted for accelerometer and magnetometer vectors.
    pub sensor_tolerance: f64,
    /// Initial field of view in degrees.
    pub field_of_view: f64,
    pub view_direction_mode: ViewDirectionMode,
    pub auto_update_pointing: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            celestial_update_interval_ms: 60_000,
            sensor_tolerance: 0.01,
            field_of_view: 45.0,
            view_direction_mode: ViewDirectionMode::Standard,
            auto_update_pointing: true,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a config file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.celestial_update_interval_ms < 0 {
            return Err(Error::Config(format!(
                "celestial_update_interval_ms must be non-negative, got {}",
                self.celestial_update_interval_ms
            )));
        }
        if !self.sensor_tolerance.is_finite() || self.sensor_tolerance < 0.0 {
            return Err(Error::Config(format!(
                "sensor_tolerance must be a non-negative number, got {}",
                self.sensor_tolerance
            )));
        }
        if !self.field_of_view.is_finite() || self.field_of_view <= 0.0 {
            return Err(Error::Config(format!(
                "field_of_view must be positive, got {}",
                self.field_of_view
            )));
        }
        Ok(())
    }
}
