//! Course layout and terrain stamping
//!
//! Runs once at course-load time, before any ball is simulated.

pub mod builder;
pub mod hole;

pub use builder::CourseBuilder;
pub use hole::{Bunker, FairwayPoint, GreenDef, Hole, TeeDef, WaterHazard, default_course};

use thiserror::Error;

use crate::terrain::TerrainError;

/// Bad course data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CourseError {
    #[error("hole {hole}: invalid {feature} ({value})")]
    InvalidFeature {
        hole: u32,
        feature: &'static str,
        value: f32,
    },

    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),
}
