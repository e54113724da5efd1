//! Golf Sim entry point
//!
//! Headless demo: builds the stock course and plays one tee shot per hole.
//!
//! Usage: `golf-sim [settings.json]`

use glam::Vec3;

use golf_sim::course::{CourseBuilder, Hole, default_course};
use golf_sim::settings::Settings;
use golf_sim::sim::{BallPhysics, BallState, CLUBS, Club, ShotClock, simulate_shot};
use golf_sim::terrain::Terrain;

/// Give up on a shot after this many seconds of simulated time
const MAX_SHOT_SECONDS: f32 = 60.0;

/// Rough full-power carry of a club, used to pick club and power
fn nominal_reach(club: &Club) -> f32 {
    club.max_speed * 3.0
}

/// Driver on long holes; on par 3s the shortest full club that reaches
fn tee_club(hole: &Hole, distance: f32) -> &'static Club {
    let driver = &CLUBS[0];
    if hole.par > 3 {
        return driver;
    }
    CLUBS[..8]
        .iter()
        .rev()
        .find(|club| nominal_reach(club) >= distance)
        .unwrap_or(driver)
}

fn play_hole(settings: &Settings, physics: &BallPhysics, terrain: &Terrain, hole: &Hole) {
    let mut ball = BallState::default();
    physics.tee_up(&mut ball, terrain, &hole.tee);

    let to_pin = hole.green.pin - ball.position;
    let distance = Vec3::new(to_pin.x, 0.0, to_pin.z).length();
    let club = tee_club(hole, distance);
    let power = (distance / nominal_reach(club)).clamp(0.2, 1.0);

    log::info!(
        "Hole {} (par {}, {:.0} yds): {} at {:.0}% toward pin {:.1} m away",
        hole.number,
        hole.par,
        hole.yards,
        club.name,
        power * 100.0,
        distance
    );

    let clock = ShotClock::from_settings(settings);
    let max_ticks = (MAX_SHOT_SECONDS / clock.sim_dt()) as u32;
    let summary = simulate_shot(
        physics,
        &mut ball,
        terrain,
        club.launch_velocity(to_pin, power),
        club.default_spin(to_pin),
        clock.sim_dt(),
        max_ticks,
    );

    for event in &summary.events {
        log::debug!("  {:?}", event);
    }

    let left = hole.green.pin - summary.final_position;
    log::info!(
        "  carry {:.1} m, total {:.1} m, apex {:.1} m, {:.2}s in play",
        summary.carry.unwrap_or(0.0),
        summary.total_distance,
        summary.apex,
        summary.ticks as f32 * clock.sim_dt()
    );
    if summary.in_water() {
        log::warn!("  in the water, penalty stroke");
    } else {
        log::info!(
            "  came to rest on {} with {:.1} m to the pin",
            summary.final_surface.name(),
            Vec3::new(left.x, 0.0, left.z).length()
        );
    }
}

fn main() {
    env_logger::init();
    log::info!("Golf Sim (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let holes = default_course();
    let terrain = match CourseBuilder::build_course(&settings.terrain, &holes) {
        Ok(terrain) => terrain,
        Err(err) => {
            log::error!("Failed to build course: {}", err);
            std::process::exit(1);
        }
    };
    log::info!(
        "Course ready: {} holes on a {}x{} grid",
        holes.len(),
        terrain.width(),
        terrain.depth()
    );

    let physics = BallPhysics::new(settings.ball, settings.surfaces);
    for hole in &holes {
        play_hole(&settings, &physics, &terrain, hole);
    }
}
