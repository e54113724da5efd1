//! Hole layout data
//!
//! A hole is a pure geometric description. It owns no terrain; the course
//! builder reads it once to stamp surfaces and heights.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::CourseError;

/// Circular sand bunker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bunker {
    pub center: Vec3,
    pub radius: f32,
    /// How far below the surrounding terrain the floor sits
    pub depth: f32,
}

/// Putting green
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreenDef {
    pub center: Vec3,
    pub radius: f32,
    /// Cup position
    pub pin: Vec3,
    /// Tilt of the putting surface (radians)
    pub slope_angle: f32,
    /// Downhill heading in the XZ plane (radians from +X toward +Z)
    pub slope_dir: f32,
}

/// Tee box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeeDef {
    pub position: Vec3,
    pub width: f32,
    pub depth: f32,
}

impl TeeDef {
    /// Radius of the circular pad painted for this tee
    pub fn pad_radius(&self) -> f32 {
        self.width.max(self.depth)
    }
}

/// Fairway centerline control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairwayPoint {
    pub position: Vec3,
    /// Fairway width at this point
    pub width: f32,
}

/// Circular water hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterHazard {
    pub center: Vec3,
    pub radius: f32,
}

/// A single hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub number: u32,
    pub par: u32,
    /// Card length, tee to pin
    pub yards: f32,
    pub tee: TeeDef,
    pub green: GreenDef,
    /// Ordered centerline, tee end first
    pub fairway: Vec<FairwayPoint>,
    pub bunkers: Vec<Bunker>,
    pub water: Option<WaterHazard>,
}

impl Hole {
    /// Straight-line distance from tee to pin (meters)
    pub fn distance_m(&self) -> f32 {
        self.tee.position.distance(self.green.pin)
    }

    /// Check feature sizes. Placement is never checked.
    pub fn validate(&self) -> Result<(), CourseError> {
        let check = |feature: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(CourseError::InvalidFeature {
                    hole: self.number,
                    feature,
                    value,
                })
            }
        };

        check("tee width", self.tee.width)?;
        check("tee depth", self.tee.depth)?;
        check("green radius", self.green.radius)?;
        if !self.green.slope_angle.is_finite() || !self.green.slope_dir.is_finite() {
            return Err(CourseError::InvalidFeature {
                hole: self.number,
                feature: "green slope",
                value: self.green.slope_angle,
            });
        }
        for point in &self.fairway {
            check("fairway width", point.width)?;
        }
        for bunker in &self.bunkers {
            check("bunker radius", bunker.radius)?;
            check("bunker depth", bunker.depth)?;
        }
        if let Some(water) = &self.water {
            check("water radius", water.radius)?;
        }
        Ok(())
    }
}

fn fairway(points: &[(f32, f32, f32)]) -> Vec<FairwayPoint> {
    points
        .iter()
        .map(|&(x, z, width)| FairwayPoint {
            position: Vec3::new(x, 0.0, z),
            width,
        })
        .collect()
}

fn bunkers(defs: &[(f32, f32, f32, f32)]) -> Vec<Bunker> {
    defs.iter()
        .map(|&(x, z, radius, depth)| Bunker {
            center: Vec3::new(x, 0.0, z),
            radius,
            depth,
        })
        .collect()
}

fn tee(x: f32, z: f32) -> TeeDef {
    TeeDef {
        position: Vec3::new(x, 0.0, z),
        width: 3.0,
        depth: 4.0,
    }
}

fn green(x: f32, z: f32, radius: f32, slope_deg: f32, slope_dir: f32) -> GreenDef {
    let center = Vec3::new(x, 0.0, z);
    GreenDef {
        center,
        radius,
        pin: center,
        slope_angle: slope_deg.to_radians(),
        slope_dir,
    }
}

/// Stock three-hole course
pub fn default_course() -> Vec<Hole> {
    vec![
        // Par 4, straight
        Hole {
            number: 1,
            par: 4,
            yards: 380.0,
            tee: tee(0.0, 60.0),
            green: green(0.0, -60.0, 7.0, 2.0, 0.0),
            fairway: fairway(&[
                (0.0, 50.0, 10.0),
                (0.0, 20.0, 14.0),
                (0.0, -10.0, 14.0),
                (0.0, -40.0, 12.0),
                (0.0, -55.0, 10.0),
            ]),
            bunkers: bunkers(&[(-10.0, -45.0, 4.0, 0.4), (8.0, -55.0, 3.0, 0.3)]),
            water: None,
        },
        // Par 3 over water
        Hole {
            number: 2,
            par: 3,
            yards: 160.0,
            tee: tee(40.0, 60.0),
            green: green(40.0, 10.0, 6.0, 3.0, 1.2),
            fairway: fairway(&[(40.0, 50.0, 8.0), (40.0, 30.0, 10.0), (40.0, 15.0, 8.0)]),
            bunkers: bunkers(&[
                (34.0, 8.0, 3.0, 0.3),
                (46.0, 12.0, 3.0, 0.3),
                (40.0, 4.0, 2.0, 0.2),
            ]),
            water: Some(WaterHazard {
                center: Vec3::new(48.0, 0.0, 30.0),
                radius: 6.0,
            }),
        },
        // Par 5, dogleg left
        Hole {
            number: 3,
            par: 5,
            yards: 520.0,
            tee: tee(-40.0, 60.0),
            green: green(-60.0, -50.0, 8.0, 2.0, 0.8),
            fairway: fairway(&[
                (-40.0, 50.0, 12.0),
                (-40.0, 20.0, 14.0),
                (-45.0, -5.0, 14.0),
                (-52.0, -25.0, 13.0),
                (-58.0, -40.0, 11.0),
                (-60.0, -48.0, 10.0),
            ]),
            bunkers: bunkers(&[
                (-35.0, 0.0, 5.0, 0.4),
                (-65.0, -45.0, 3.0, 0.3),
                (-55.0, -55.0, 3.0, 0.3),
            ]),
            water: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_course_is_valid() {
        let holes = default_course();
        assert_eq!(holes.len(), 3);
        for hole in &holes {
            assert!(hole.validate().is_ok(), "hole {} invalid", hole.number);
            assert!(hole.fairway.len() >= 2);
        }
        assert_eq!(holes.iter().map(|h| h.par).sum::<u32>(), 12);
        assert!(holes[1].water.is_some());
    }

    #[test]
    fn test_distance_to_pin() {
        let hole = &default_course()[0];
        assert!((hole.distance_m() - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_green_slope_stored_in_radians() {
        let hole = &default_course()[1];
        assert!((hole.green.slope_angle - 3.0f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_negative_bunker_rejected() {
        let mut hole = default_course().remove(0);
        hole.bunkers[1].radius = -1.0;
        match hole.validate() {
            Err(CourseError::InvalidFeature { hole: 1, feature, value }) => {
                assert_eq!(feature, "bunker radius");
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_hole_json_roundtrip() {
        let hole = default_course().remove(1);
        let json = serde_json::to_string(&hole).unwrap();
        let back: Hole = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hole);
    }
}
