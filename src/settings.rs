//! Simulation settings
//!
//! Loaded from JSON; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::BallConstants;
use crate::terrain::SurfaceTable;

/// Settings failed to load or hold out-of-range values
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Course terrain dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Grid nodes along X
    pub width: i32,
    /// Grid nodes along Z
    pub depth: i32,
    /// World units per cell
    pub cell_size: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            width: 256,
            depth: 256,
            cell_size: 1.0,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball aerodynamics and thresholds
    pub ball: BallConstants,
    /// Surface coefficients
    pub surfaces: SurfaceTable,
    /// Course terrain dimensions
    pub terrain: TerrainSettings,

    // === Timing ===
    /// Fixed physics step (seconds)
    pub sim_dt: f32,
    /// Maximum fixed steps run per frame
    pub max_substeps: u32,
    /// Frame times above this are clamped (seconds)
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball: BallConstants::default(),
            surfaces: SurfaceTable::standard(),
            terrain: TerrainSettings::default(),
            sim_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings ({})", err);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the simulation relies on being positive or in range
    pub fn validate(&self) -> Result<(), SettingsError> {
        let ball = &self.ball;
        let positive = [
            ("ball.mass", ball.mass),
            ("ball.radius", ball.radius),
            ("ball.area", ball.area),
            ("ball.gravity", ball.gravity),
            ("ball.min_speed", ball.min_speed),
            ("sim_dt", self.sim_dt),
            ("max_frame_dt", self.max_frame_dt),
            ("terrain.cell_size", self.terrain.cell_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(field, format!("{value} must be positive")));
            }
        }

        let non_negative = [
            ("ball.drag_coeff", ball.drag_coeff),
            ("ball.lift_coeff", ball.lift_coeff),
            ("ball.air_density", ball.air_density),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::invalid(field, format!("{value} must not be negative")));
            }
        }

        if !(0.0..=1.0).contains(&ball.bounce_loss) {
            return Err(SettingsError::invalid(
                "ball.bounce_loss",
                format!("{} outside [0, 1]", ball.bounce_loss),
            ));
        }
        if !ball.wind.is_finite() {
            return Err(SettingsError::invalid("ball.wind", "must be finite"));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::invalid("max_substeps", "must be at least 1"));
        }
        if self.terrain.width < 2 || self.terrain.depth < 2 {
            return Err(SettingsError::invalid(
                "terrain",
                format!("{}x{} is smaller than 2x2", self.terrain.width, self.terrain.depth),
            ));
        }
        if let Some(category) = self.surfaces.first_out_of_range() {
            return Err(SettingsError::invalid(
                "surfaces",
                format!("{} coefficients outside [0, 1]", category.name()),
            ));
        }
        Ok(())
    }
}
