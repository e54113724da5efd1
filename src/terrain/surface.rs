//! Course surface categories and their physical coefficients
//!
//! Surface behaviour is data, not code: a closed enum indexes a flat table.
//! Water carries sentinel values (restitution 0, friction 1, speed
//! multiplier 0) and must be turned into the in-water state by the caller
//! before any bounce or roll math runs.

use serde::{Deserialize, Serialize};

/// Surface types a terrain cell can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceCategory {
    /// Short, manicured
    Tee,
    Fairway,
    /// Tall grass
    #[default]
    Rough,
    DeepRough,
    /// Bunker
    Sand,
    /// Putting surface
    Green,
    /// Hazard
    Water,
    OutOfBounds,
}

impl SurfaceCategory {
    /// Every category, in table order
    pub const ALL: [SurfaceCategory; 8] = [
        SurfaceCategory::Tee,
        SurfaceCategory::Fairway,
        SurfaceCategory::Rough,
        SurfaceCategory::DeepRough,
        SurfaceCategory::Sand,
        SurfaceCategory::Green,
        SurfaceCategory::Water,
        SurfaceCategory::OutOfBounds,
    ];

    /// Display name for HUD text
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceCategory::Tee => "Tee",
            SurfaceCategory::Fairway => "Fairway",
            SurfaceCategory::Rough => "Rough",
            SurfaceCategory::DeepRough => "Deep Rough",
            SurfaceCategory::Sand => "Sand",
            SurfaceCategory::Green => "Green",
            SurfaceCategory::Water => "Water",
            SurfaceCategory::OutOfBounds => "OB",
        }
    }

    /// Landing here costs a penalty stroke
    pub fn is_penalty(&self) -> bool {
        matches!(self, SurfaceCategory::Water | SurfaceCategory::OutOfBounds)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Physical response of a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceProperties {
    /// Rolling friction coefficient [0, 1]
    pub friction: f32,
    /// Bounce restitution [0, 1]
    pub restitution: f32,
    /// Per-tick rolling velocity multiplier [0, 1]
    pub speed_multiplier: f32,
    /// Render color (linear RGB)
    pub color: [f32; 3],
}

impl SurfaceProperties {
    pub const fn new(friction: f32, restitution: f32, speed_multiplier: f32, color: [f32; 3]) -> Self {
        Self {
            friction,
            restitution,
            speed_multiplier,
            color,
        }
    }

    /// True when every coefficient lies in [0, 1]
    pub fn in_range(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.friction)
            && unit.contains(&self.restitution)
            && unit.contains(&self.speed_multiplier)
    }
}

/// Immutable surface lookup, one entry per category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTable {
    entries: [SurfaceProperties; 8],
}

impl SurfaceTable {
    /// Coefficients used by the stock course
    pub const fn standard() -> Self {
        Self {
            entries: [
                SurfaceProperties::new(0.08, 0.50, 1.0, [0.35, 0.75, 0.30]),
                SurfaceProperties::new(0.10, 0.45, 1.0, [0.28, 0.65, 0.22]),
                SurfaceProperties::new(0.30, 0.35, 0.7, [0.22, 0.48, 0.16]),
                SurfaceProperties::new(0.50, 0.25, 0.4, [0.16, 0.36, 0.12]),
                SurfaceProperties::new(0.60, 0.15, 0.5, [0.90, 0.82, 0.60]),
                SurfaceProperties::new(0.04, 0.40, 1.0, [0.22, 0.78, 0.30]),
                SurfaceProperties::new(1.00, 0.00, 0.0, [0.15, 0.35, 0.70]),
                SurfaceProperties::new(0.50, 0.30, 0.5, [0.40, 0.35, 0.30]),
            ],
        }
    }

    /// Build a table from explicit entries (indexed by `SurfaceCategory::ALL` order)
    pub const fn from_entries(entries: [SurfaceProperties; 8]) -> Self {
        Self { entries }
    }

    /// Properties for a category (total, O(1))
    #[inline]
    pub fn properties_of(&self, category: SurfaceCategory) -> SurfaceProperties {
        self.entries[category.index()]
    }

    /// Replace one entry, returning the modified table
    pub fn with(mut self, category: SurfaceCategory, props: SurfaceProperties) -> Self {
        self.entries[category.index()] = props;
        self
    }

    /// First category whose coefficients fall outside [0, 1]
    pub fn first_out_of_range(&self) -> Option<SurfaceCategory> {
        SurfaceCategory::ALL
            .into_iter()
            .find(|c| !self.properties_of(*c).in_range())
    }
}

impl Default for SurfaceTable {
    fn default() -> Self {
        Self::standard()
    }
}
