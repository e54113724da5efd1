//! Golf Sim - ball flight and terrain interaction core
//!
//! Core modules:
//! - `sim`: Ball physics state machine, clubs, fixed-step shot driver
//! - `terrain`: Surface table, heightmap queries, CPU mesh data
//! - `course`: Hole definitions and heightmap stamping
//! - `settings`: Data-driven configuration (JSON)

pub mod course;
pub mod settings;
pub mod sim;
pub mod terrain;

pub use course::{CourseBuilder, CourseError, Hole};
pub use settings::{Settings, SettingsError, TerrainSettings};
pub use sim::{BallConstants, BallEvent, BallPhase, BallPhysics, BallState, CLUBS, Club, ShotClock, ShotSummary, simulate_shot};
pub use terrain::{SurfaceCategory, SurfaceProperties, SurfaceTable, Terrain, TerrainError};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed to the accumulator (stall clamp)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Relative air speed below which flight forces are skipped
    pub const MIN_AIR_SPEED: f32 = 0.001;
    /// Spin magnitude below which Magnus lift is skipped
    pub const MIN_SPIN: f32 = 0.01;
    /// Rolling speed below which friction direction is undefined
    pub const MIN_ROLL_SPEED: f32 = 0.001;
    /// Post-bounce vertical speed below which the ball starts rolling (m/s)
    pub const DEAD_BOUNCE_SPEED: f32 = 0.5;
    /// Per-tick multiplicative spin decay in flight
    pub const SPIN_DECAY: f32 = 0.999;

    /// Height above the tee surface a ball is placed at
    pub const TEE_HEIGHT: f32 = 0.15;
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
