//! Fixed timestep shot driver
//!
//! Frame time goes into an accumulator and the ball is advanced in whole
//! `sim_dt` steps, so a shot plays out the same at any frame rate.

use glam::Vec3;

use super::physics::{BallEvent, BallPhysics};
use super::state::{BallPhase, BallState};
use crate::settings::Settings;
use crate::terrain::{SurfaceCategory, Terrain};

/// Accumulator that turns variable frame times into fixed physics steps
#[derive(Debug, Clone)]
pub struct ShotClock {
    sim_dt: f32,
    max_substeps: u32,
    max_frame_dt: f32,
    accumulator: f32,
    ticks: u64,
}

impl ShotClock {
    pub fn new(sim_dt: f32, max_substeps: u32, max_frame_dt: f32) -> Self {
        Self {
            sim_dt,
            max_substeps,
            max_frame_dt,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sim_dt, settings.max_substeps, settings.max_frame_dt)
    }

    pub fn sim_dt(&self) -> f32 {
        self.sim_dt
    }

    /// Fixed steps run since creation or the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Unsimulated time carried into the next frame
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.sim_dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.ticks = 0;
    }

    /// Run the fixed steps owed for a frame of `frame_dt` seconds
    ///
    /// Events from every step are appended to `events`. Returns the number of
    /// steps run. Backlog left over after `max_substeps` steps is dropped.
    pub fn advance(
        &mut self,
        frame_dt: f32,
        physics: &BallPhysics,
        ball: &mut BallState,
        terrain: &Terrain,
        events: &mut Vec<BallEvent>,
    ) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < self.max_substeps {
            if let Some(event) = physics.update(ball, terrain, self.sim_dt) {
                events.push(event);
            }
            self.accumulator -= self.sim_dt;
            self.ticks += 1;
            substeps += 1;
        }

        if self.accumulator >= self.sim_dt {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= self.sim_dt;
        }
        substeps
    }
}

/// Outcome of a shot played to rest
#[derive(Debug, Clone, PartialEq)]
pub struct ShotSummary {
    /// Fixed steps simulated
    pub ticks: u32,
    /// Horizontal distance from launch to first ground contact
    pub carry: Option<f32>,
    /// Horizontal distance from launch to the final position
    pub total_distance: f32,
    /// Highest point reached
    pub apex: f32,
    pub final_position: Vec3,
    pub final_surface: SurfaceCategory,
    /// Distinct phases in the order they were entered
    pub phases: Vec<BallPhase>,
    pub events: Vec<BallEvent>,
}

impl ShotSummary {
    /// The ball came to rest or went in the water within the tick cap
    pub fn finished(&self) -> bool {
        matches!(self.phases.last(), Some(BallPhase::Stopped | BallPhase::InWater))
    }

    pub fn in_water(&self) -> bool {
        self.phases.last() == Some(&BallPhase::InWater)
    }
}

fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec3::new(b.x - a.x, 0.0, b.z - a.z).length()
}

/// Launch `ball` and step it at `dt` until it stops, splashes, or `max_ticks` runs out
pub fn simulate_shot(
    physics: &BallPhysics,
    ball: &mut BallState,
    terrain: &Terrain,
    velocity: Vec3,
    spin: Vec3,
    dt: f32,
    max_ticks: u32,
) -> ShotSummary {
    let start = ball.position;
    physics.launch(ball, velocity, spin);

    let mut phases = vec![ball.phase];
    let mut events = Vec::new();
    let mut carry = None;
    let mut apex = ball.position.y;
    let mut ticks = 0;

    while ball.in_motion() && ticks < max_ticks {
        let event = physics.update(ball, terrain, dt);
        ticks += 1;
        apex = apex.max(ball.position.y);

        if let Some(event) = event {
            if carry.is_none() && !matches!(event, BallEvent::Stopped { .. }) {
                carry = Some(horizontal_distance(start, ball.position));
            }
            events.push(event);
        }
        if phases.last() != Some(&ball.phase) {
            phases.push(ball.phase);
        }
    }

    if ball.in_motion() {
        log::warn!("Shot still moving after {} ticks", ticks);
    }

    let final_position = ball.position;
    ShotSummary {
        ticks,
        carry,
        total_distance: horizontal_distance(start, final_position),
        apex,
        final_position,
        final_surface: terrain.surface_at_world(final_position.x, final_position.z),
        phases,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::club::Club;

    const MAX_TICKS: u32 = 60 * 120;

    fn fairway() -> Terrain {
        Terrain::flat(512, 512, 1.0, 0.0, SurfaceCategory::Fairway)
    }

    fn ball_on_ground(physics: &BallPhysics) -> BallState {
        BallState::at_rest(Vec3::new(0.0, physics.constants.radius, 0.0))
    }

    #[test]
    fn test_clock_runs_whole_steps() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let mut ball = ball_on_ground(&physics);
        let mut events = Vec::new();
        let mut clock = ShotClock::new(0.25, 4, 2.0);

        assert_eq!(clock.advance(0.5, &physics, &mut ball, &terrain, &mut events), 2);
        assert_eq!(clock.advance(0.125, &physics, &mut ball, &terrain, &mut events), 0);
        assert_eq!(clock.accumulator(), 0.125);
        assert_eq!(clock.alpha(), 0.5);
        assert_eq!(clock.advance(0.125, &physics, &mut ball, &terrain, &mut events), 1);
        assert_eq!(clock.accumulator(), 0.0);
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn test_clock_caps_substeps() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let mut ball = ball_on_ground(&physics);
        let mut events = Vec::new();
        let mut clock = ShotClock::new(0.25, 4, 2.0);

        assert_eq!(clock.advance(2.0, &physics, &mut ball, &terrain, &mut events), 4);
        assert!(clock.accumulator() < 0.25);
        assert_eq!(clock.advance(0.0, &physics, &mut ball, &terrain, &mut events), 0);
    }

    #[test]
    fn test_clock_clamps_stalls() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let mut ball = ball_on_ground(&physics);
        let mut events = Vec::new();
        let mut clock = ShotClock::new(0.25, 100, 1.0);

        assert_eq!(clock.advance(10.0, &physics, &mut ball, &terrain, &mut events), 4);
        assert_eq!(clock.advance(-1.0, &physics, &mut ball, &terrain, &mut events), 0);
        clock.reset();
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_clock_collects_events() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let mut ball = BallState::at_rest(Vec3::new(0.0, 1.0, 0.0));
        physics.launch(&mut ball, Vec3::new(0.0, -1.0, 0.0), Vec3::ZERO);

        let mut clock = ShotClock::from_settings(&Settings::default());
        let mut events = Vec::new();
        for _ in 0..600 {
            clock.advance(1.0 / 60.0, &physics, &mut ball, &terrain, &mut events);
            if !ball.in_motion() {
                break;
            }
        }
        assert!(ball.stopped());
        assert!(matches!(events.first(), Some(BallEvent::Bounced { .. })));
        assert!(matches!(events.last(), Some(BallEvent::Stopped { .. })));
    }

    #[test]
    fn test_frame_rate_independent() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let driver = Club::by_key(1).unwrap();
        let aim = Vec3::new(0.0, 0.0, -1.0);

        let step = 1.0 / 128.0;
        let play = |frame_dt: f32| {
            let mut ball = ball_on_ground(&physics);
            physics.launch(&mut ball, driver.launch_velocity(aim, 0.8), driver.default_spin(aim));
            let mut clock = ShotClock::new(step, 8, 0.1);
            let mut events = Vec::new();
            while clock.ticks() < 600 {
                clock.advance(frame_dt, &physics, &mut ball, &terrain, &mut events);
            }
            (clock.ticks(), ball)
        };

        let (ticks_a, a) = play(step * 2.0);
        let (ticks_b, b) = play(step * 4.0);
        assert_eq!(ticks_a, ticks_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_flat_drive_summary() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let mut ball = ball_on_ground(&physics);

        let summary = simulate_shot(
            &physics,
            &mut ball,
            &terrain,
            Vec3::new(0.0, 20.0, -30.0),
            Vec3::ZERO,
            SIM_DT,
            MAX_TICKS,
        );
        assert!(summary.finished());
        assert_eq!(summary.phases, vec![BallPhase::Flight, BallPhase::Rolling, BallPhase::Stopped]);
        let carry = summary.carry.unwrap();
        assert!(carry > 20.0);
        assert!(summary.total_distance > carry);
        assert!(summary.apex > 10.0);
        assert_eq!(summary.final_surface, SurfaceCategory::Fairway);
        assert_eq!(summary.final_position, ball.position);
        assert!(matches!(summary.events.last(), Some(BallEvent::Stopped { .. })));
    }

    #[test]
    fn test_backspin_carries_farther() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let driver = Club::by_key(1).unwrap();
        let aim = Vec3::new(0.0, 0.0, -1.0);
        let velocity = driver.launch_velocity(aim, 0.7);

        let shot = |spin: Vec3| {
            let mut ball = ball_on_ground(&physics);
            simulate_shot(&physics, &mut ball, &terrain, velocity, spin, SIM_DT, MAX_TICKS)
        };
        let flat = shot(Vec3::ZERO);
        let spun = shot(driver.default_spin(aim));

        assert!(spun.apex > flat.apex);
        assert!(spun.carry.unwrap() > flat.carry.unwrap());
    }

    #[test]
    fn test_tick_cap_leaves_ball_moving() {
        let physics = BallPhysics::default();
        let terrain = fairway();
        let mut ball = ball_on_ground(&physics);
        let summary = simulate_shot(
            &physics,
            &mut ball,
            &terrain,
            Vec3::new(0.0, 20.0, -30.0),
            Vec3::ZERO,
            SIM_DT,
            10,
        );
        assert_eq!(summary.ticks, 10);
        assert!(!summary.finished());
        assert!(summary.carry.is_none());
        assert!(ball.in_flight());
    }

    #[test]
    fn test_putt_on_green() {
        let physics = BallPhysics::default();
        let terrain = Terrain::flat(64, 64, 1.0, 0.0, SurfaceCategory::Green);
        let putter = Club::by_key(9).unwrap();
        let aim = Vec3::new(1.0, 0.0, 0.0);
        let mut ball = ball_on_ground(&physics);

        let summary = simulate_shot(
            &physics,
            &mut ball,
            &terrain,
            putter.launch_velocity(aim, 0.3),
            putter.default_spin(aim),
            SIM_DT,
            MAX_TICKS,
        );
        assert!(summary.finished());
        assert!(!summary.in_water());
        assert_eq!(summary.final_surface, SurfaceCategory::Green);
        assert!(summary.final_position.x > 0.0);
        assert!(summary.final_position.z.abs() < 1e-3);
    }
}
