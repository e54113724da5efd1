//! Ball state driven by the physics step
//!
//! The ball is created once, teed up at the start of every hole and after
//! penalties, and otherwise only changed by `launch` and `update`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Motion regime of the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallPhase {
    /// Airborne: gravity, drag and Magnus lift
    Flight,
    /// Hugging the terrain: slope and friction
    Rolling,
    /// At rest, waiting for the next launch
    #[default]
    Stopped,
    /// Came down in a hazard, waiting for the next launch
    InWater,
}

impl BallPhase {
    /// No further motion until the next launch
    pub fn is_terminal(&self) -> bool {
        matches!(self, BallPhase::Stopped | BallPhase::InWater)
    }
}

/// Position, velocity and spin of the ball plus its regime
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Angular velocity (rad/s)
    pub spin: Vec3,
    pub phase: BallPhase,
}

impl BallState {
    /// Ball at rest at `position`
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            spin: Vec3::ZERO,
            phase: BallPhase::Stopped,
        }
    }

    /// Reset to rest at `position`, whatever the ball was doing
    pub fn tee_up(&mut self, position: Vec3) {
        *self = Self::at_rest(position);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn in_flight(&self) -> bool {
        self.phase == BallPhase::Flight
    }

    pub fn rolling(&self) -> bool {
        self.phase == BallPhase::Rolling
    }

    pub fn stopped(&self) -> bool {
        self.phase == BallPhase::Stopped
    }

    pub fn in_water(&self) -> bool {
        self.phase == BallPhase::InWater
    }

    /// Flying or rolling
    pub fn in_motion(&self) -> bool {
        !self.phase.is_terminal()
    }
}
