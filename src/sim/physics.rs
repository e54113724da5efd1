//! Golf ball flight and terrain interaction
//!
//! Physics model:
//! - Flight: gravity + quadratic drag + Magnus lift from spin
//! - Contact: reflect about the terrain normal, scale by restitution
//! - Rolling: slope pull + surface friction + per-tick surface damping
//!
//! One `update` call advances exactly one regime. Stopped and in-water
//! balls are left alone until the next `launch`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{BallPhase, BallState};
use crate::consts::{DEAD_BOUNCE_SPEED, MIN_AIR_SPEED, MIN_ROLL_SPEED, MIN_SPIN, SPIN_DECAY, TEE_HEIGHT};
use crate::course::TeeDef;
use crate::terrain::{SurfaceCategory, SurfaceTable, Terrain};

/// Physical constants for golf ball aerodynamics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConstants {
    /// kg
    pub mass: f32,
    /// m
    pub radius: f32,
    /// Cross-section (m²)
    pub area: f32,
    /// Cd (dimpled ball)
    pub drag_coeff: f32,
    /// Cl (Magnus)
    pub lift_coeff: f32,
    /// kg/m³
    pub air_density: f32,
    /// m/s²
    pub gravity: f32,
    /// Rolling ball stops below this speed (m/s)
    pub min_speed: f32,
    /// Extra energy fraction lost on every bounce
    pub bounce_loss: f32,
    /// m/s
    pub wind: Vec3,
}

impl BallConstants {
    /// Regulation ball in still air at sea level
    pub const fn regulation() -> Self {
        Self {
            mass: 0.04593,
            radius: 0.02135,
            area: 0.001432,
            drag_coeff: 0.25,
            lift_coeff: 0.18,
            air_density: 1.225,
            gravity: 9.81,
            min_speed: 0.02,
            bounce_loss: 0.15,
            wind: Vec3::ZERO,
        }
    }

    /// Restitution applied on a surface with the given bounce coefficient
    #[inline]
    pub fn restitution(&self, surface_bounce: f32) -> f32 {
        surface_bounce * (1.0 - self.bounce_loss)
    }

    /// `0.5 * rho * A * v² / m`, the shared factor of drag and lift accelerations
    #[inline]
    fn aero_factor(&self, speed: f32) -> f32 {
        0.5 * self.air_density * self.area * speed * speed / self.mass
    }
}

impl Default for BallConstants {
    fn default() -> Self {
        Self::regulation()
    }
}

/// Transition reported by a physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallEvent {
    /// Hit the ground and stayed airborne
    Bounced { surface: SurfaceCategory, speed: f32 },
    /// Bounce too weak; now rolling
    StartedRolling { surface: SurfaceCategory },
    /// Came to rest
    Stopped { position: Vec3 },
    /// Landed or rolled into water
    EnteredWater { position: Vec3 },
}

/// Ball physics stepper
#[derive(Debug, Clone, Default)]
pub struct BallPhysics {
    pub constants: BallConstants,
    pub surfaces: SurfaceTable,
}

impl BallPhysics {
    pub fn new(constants: BallConstants, surfaces: SurfaceTable) -> Self {
        Self { constants, surfaces }
    }

    /// Advance the ball by one timestep
    pub fn update(&self, ball: &mut BallState, terrain: &Terrain, dt: f32) -> Option<BallEvent> {
        match ball.phase {
            BallPhase::Stopped | BallPhase::InWater => None,
            BallPhase::Flight => {
                self.update_flight(ball, dt);
                self.check_terrain_contact(ball, terrain)
            }
            BallPhase::Rolling => self.update_rolling(ball, terrain, dt),
        }
    }

    /// Launch the ball, whatever it was doing
    pub fn launch(&self, ball: &mut BallState, velocity: Vec3, spin: Vec3) {
        ball.velocity = velocity;
        ball.spin = spin;
        ball.phase = BallPhase::Flight;
    }

    /// Place the ball at rest on a hole's tee
    pub fn tee_up(&self, ball: &mut BallState, terrain: &Terrain, tee: &TeeDef) {
        let (x, z) = (tee.position.x, tee.position.z);
        let y = terrain.height_at_world(x, z) + TEE_HEIGHT;
        ball.tee_up(Vec3::new(x, y, z));
    }

    /// Semi-implicit Euler step of gravity, drag and lift
    fn update_flight(&self, ball: &mut BallState, dt: f32) {
        let c = &self.constants;

        let rel_vel = ball.velocity - c.wind;
        let speed = rel_vel.length();

        // Aerodynamic terms need a direction; gravity always applies
        let mut aero_accel = Vec3::ZERO;
        if speed >= MIN_AIR_SPEED {
            let aero = c.aero_factor(speed);
            aero_accel -= (rel_vel / speed) * (aero * c.drag_coeff);

            if ball.spin.length() > MIN_SPIN {
                aero_accel += ball.spin.cross(rel_vel).normalize_or_zero() * (aero * c.lift_coeff);
            }
        }

        let gravity_accel = Vec3::new(0.0, -c.gravity, 0.0);

        ball.velocity += (gravity_accel + aero_accel) * dt;
        ball.position += ball.velocity * dt;

        ball.spin *= SPIN_DECAY;
    }

    /// Snap to the ground and bounce, roll, or splash
    fn check_terrain_contact(&self, ball: &mut BallState, terrain: &Terrain) -> Option<BallEvent> {
        let c = &self.constants;
        let (x, z) = (ball.position.x, ball.position.z);

        let ground_y = terrain.height_at_world(x, z);
        if ball.position.y > ground_y + c.radius {
            return None;
        }
        ball.position.y = ground_y + c.radius;

        let surface = terrain.surface_at_world(x, z);
        if surface == SurfaceCategory::Water {
            return Some(self.enter_water(ball));
        }

        let props = self.surfaces.properties_of(surface);
        let normal = terrain.normal_at_world(x, z);

        let v_dot_n = ball.velocity.dot(normal);
        if v_dot_n >= 0.0 {
            return None;
        }

        ball.velocity -= normal * (2.0 * v_dot_n);
        ball.velocity *= c.restitution(props.restitution);

        if ball.velocity.y < DEAD_BOUNCE_SPEED {
            ball.velocity.y = 0.0;
            ball.phase = BallPhase::Rolling;
            log::debug!("Rolling on {} at {:.2} m/s", surface.name(), ball.speed());
            Some(BallEvent::StartedRolling { surface })
        } else {
            log::debug!("Bounced on {} at {:.2} m/s", surface.name(), ball.speed());
            Some(BallEvent::Bounced {
                surface,
                speed: ball.speed(),
            })
        }
    }

    /// Slope and friction step; order of operations is significant
    fn update_rolling(&self, ball: &mut BallState, terrain: &Terrain, dt: f32) -> Option<BallEvent> {
        let c = &self.constants;
        let (x, z) = (ball.position.x, ball.position.z);

        ball.position.y = terrain.height_at_world(x, z) + c.radius;

        let surface = terrain.surface_at_world(x, z);
        if surface == SurfaceCategory::Water {
            return Some(self.enter_water(ball));
        }

        let props = self.surfaces.properties_of(surface);
        let normal = terrain.normal_at_world(x, z);

        // Gravity component along the terrain
        let gravity = Vec3::new(0.0, -c.gravity, 0.0);
        let slope_accel = gravity - normal * gravity.dot(normal);

        let speed = ball.speed();
        let friction_accel = if speed > MIN_ROLL_SPEED {
            -(ball.velocity / speed) * (props.friction * c.gravity)
        } else {
            Vec3::ZERO
        };

        ball.velocity += (slope_accel + friction_accel) * dt;
        ball.velocity *= props.speed_multiplier;
        ball.position += ball.velocity * dt;

        ball.position.y = terrain.height_at_world(ball.position.x, ball.position.z) + c.radius;

        if ball.speed() < c.min_speed {
            ball.velocity = Vec3::ZERO;
            ball.phase = BallPhase::Stopped;
            log::debug!("Stopped on {} at {:?}", surface.name(), ball.position);
            return Some(BallEvent::Stopped {
                position: ball.position,
            });
        }
        None
    }

    fn enter_water(&self, ball: &mut BallState) -> BallEvent {
        ball.velocity = Vec3::ZERO;
        ball.phase = BallPhase::InWater;
        log::debug!("Water hazard at {:?}", ball.position);
        BallEvent::EnteredWater {
            position: ball.position,
        }
    }
}
