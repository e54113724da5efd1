//! Club set and launch parameters
//!
//! Higher loft trades distance for height and backspin.

use glam::Vec3;

/// A club: loft, top ball speed and stock backspin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Club {
    pub name: &'static str,
    /// Loft (degrees)
    pub loft_deg: f32,
    /// Ball speed at full power (m/s)
    pub max_speed: f32,
    /// Backspin at launch (rad/s)
    pub backspin: f32,
    /// Number key that selects this club
    pub key: u8,
}

/// Standard bag, longest club first
pub static CLUBS: [Club; 9] = [
    Club::new("Driver", 10.5, 73.0, 50.0, 1),
    Club::new("3 Wood", 15.0, 67.0, 60.0, 2),
    Club::new("5 Iron", 27.0, 56.0, 90.0, 3),
    Club::new("7 Iron", 34.0, 49.0, 110.0, 4),
    Club::new("9 Iron", 41.0, 42.0, 130.0, 5),
    Club::new("PW", 46.0, 38.0, 140.0, 6),
    Club::new("SW", 56.0, 30.0, 150.0, 7),
    Club::new("LW", 60.0, 25.0, 160.0, 8),
    Club::new("Putter", 3.0, 10.0, 5.0, 9),
];

/// Horizontal unit direction of `aim`, zero when aim is vertical or zero
#[inline]
fn horizontal_dir(aim: Vec3) -> Vec3 {
    Vec3::new(aim.x, 0.0, aim.z).normalize_or_zero()
}

impl Club {
    pub const fn new(name: &'static str, loft_deg: f32, max_speed: f32, backspin: f32, key: u8) -> Self {
        Self {
            name,
            loft_deg,
            max_speed,
            backspin,
            key,
        }
    }

    /// Club bound to number key `key` (1-9)
    pub fn by_key(key: u8) -> Option<&'static Club> {
        CLUBS.iter().find(|club| club.key == key)
    }

    /// Club named `name`, ignoring case
    pub fn by_name(name: &str) -> Option<&'static Club> {
        CLUBS.iter().find(|club| club.name.eq_ignore_ascii_case(name))
    }

    /// Launch velocity for a swing toward `aim` at `power` (clamped to [0, 1])
    ///
    /// Only the horizontal part of `aim` is used; loft supplies the rise.
    pub fn launch_velocity(&self, aim: Vec3, power: f32) -> Vec3 {
        let speed = self.max_speed * power.clamp(0.0, 1.0);
        let (sin, cos) = self.loft_deg.to_radians().sin_cos();
        horizontal_dir(aim) * (speed * cos) + Vec3::new(0.0, speed * sin, 0.0)
    }

    /// Stock backspin for a swing toward `aim`
    ///
    /// The spin axis is `aim × up`, so Magnus lift on a ball moving along
    /// `aim` points upward.
    pub fn default_spin(&self, aim: Vec3) -> Vec3 {
        horizontal_dir(aim).cross(Vec3::Y) * self.backspin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique_and_ordered() {
        for (i, club) in CLUBS.iter().enumerate() {
            assert_eq!(club.key as usize, i + 1);
            assert_eq!(Club::by_key(club.key), Some(club));
        }
        assert!(Club::by_key(0).is_none());
        assert!(Club::by_key(10).is_none());
        assert_eq!(Club::by_name("driver").map(|c| c.key), Some(1));
    }

    #[test]
    fn test_loft_and_speed_trade_off() {
        for pair in CLUBS[..8].windows(2) {
            assert!(pair[0].loft_deg < pair[1].loft_deg);
            assert!(pair[0].max_speed > pair[1].max_speed);
            assert!(pair[0].backspin < pair[1].backspin);
        }
    }

    #[test]
    fn test_launch_velocity_follows_loft() {
        let driver = Club::by_key(1).unwrap();
        let v = driver.launch_velocity(Vec3::new(0.0, 0.0, -2.0), 1.0);
        assert!((v.length() - 73.0).abs() < 1e-3);
        assert_eq!(v.x, 0.0);
        assert!(v.z < 0.0);
        let angle = v.y.atan2(-v.z).to_degrees();
        assert!((angle - 10.5).abs() < 1e-3);
    }

    #[test]
    fn test_aim_height_is_ignored() {
        let iron = Club::by_key(4).unwrap();
        let flat = iron.launch_velocity(Vec3::new(1.0, 0.0, 1.0), 0.5);
        let tilted = iron.launch_velocity(Vec3::new(1.0, 3.0, 1.0), 0.5);
        assert!((flat - tilted).length() < 1e-5);
    }

    #[test]
    fn test_power_is_clamped() {
        let pw = Club::by_key(6).unwrap();
        let aim = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(pw.launch_velocity(aim, 3.0), pw.launch_velocity(aim, 1.0));
        assert_eq!(pw.launch_velocity(aim, -1.0), Vec3::ZERO);
    }

    #[test]
    fn test_vertical_aim_launches_straight_up() {
        let sw = Club::by_key(7).unwrap();
        let v = sw.launch_velocity(Vec3::Y, 1.0);
        assert_eq!(v.x, 0.0);
        assert_eq!(v.z, 0.0);
        assert!(v.y > 0.0);
        assert_eq!(sw.default_spin(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_default_spin_is_backspin() {
        let aim = Vec3::new(0.0, 0.0, -1.0);
        for club in &CLUBS {
            let spin = club.default_spin(aim);
            assert!((spin.length() - club.backspin).abs() < 1e-4);
            assert!(spin.dot(aim).abs() < 1e-5);
            // Magnus direction for a ball travelling along the aim
            let lift = spin.cross(aim);
            assert!(lift.y > 0.0, "{} spin {:?} pushes down", club.name, spin);
        }
    }
}
