//! Ball simulation
//!
//! Everything here is deterministic and step driven:
//! - Fixed timestep only
//! - No rendering, audio or platform dependencies
//! - Terrain is read-only while a ball is in play

pub mod club;
pub mod physics;
pub mod state;
pub mod tick;

pub use club::{CLUBS, Club};
pub use physics::{BallConstants, BallEvent, BallPhysics};
pub use state::{BallPhase, BallState};
pub use tick::{ShotClock, ShotSummary, simulate_shot};
