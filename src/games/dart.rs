//! Dart board (2–12 segments).
//!
//! The board spins continuously on the client; a throw freezes the rotation
//! and, after the dart's flight, the segment under the top pointer wins.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GameError;

pub const MAX_OPTIONS: usize = 12;

/// Board rotation per animation frame, degrees
pub const SPIN_STEP_DEGREES: f64 = 1.5;
/// Dart flight time before the hit resolves
pub const FLIGHT_MS: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DartHit {
    pub winner_index: usize,
    /// Board rotation at the moment of the throw, degrees
    pub rotation_degrees: f64,
    pub flight_ms: u32,
}

/// Resolve a throw at the given board rotation.
pub fn throw(option_count: usize, rotation_degrees: f64) -> Result<DartHit, GameError> {
    if option_count < 2 {
        return Err(GameError::InvalidInput("at least 2 options are required"));
    }
    if option_count > MAX_OPTIONS {
        return Err(GameError::InvalidInput("too many options"));
    }

    Ok(DartHit {
        winner_index: segment_at_pointer(option_count, rotation_degrees),
        rotation_degrees,
        flight_ms: FLIGHT_MS,
    })
}

/// A throw with the board frozen at a random angle (headless clients).
pub fn throw_at_random<R: Rng + ?Sized>(
    option_count: usize,
    rng: &mut R,
) -> Result<DartHit, GameError> {
    let rotation = rng.random_range(0.0..360.0);
    throw(option_count, rotation)
}

/// Which segment the top pointer lands in for a board rotated by
/// `rotation_degrees`. Segment edges round to the nearer neighbor.
pub fn segment_at_pointer(option_count: usize, rotation_degrees: f64) -> usize {
    let slice = 360.0 / option_count as f64;
    let normalized = (360.0 - rotation_degrees.rem_euclid(360.0)).rem_euclid(360.0);
    ((normalized / slice).round() as usize) % option_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_bounds() {
        assert!(throw(1, 0.0).is_err());
        assert!(throw(13, 0.0).is_err());
        assert!(throw(12, 0.0).is_ok());
    }

    #[test]
    fn test_zero_rotation_hits_the_first_segment() {
        assert_eq!(segment_at_pointer(6, 0.0), 0);
    }

    #[test]
    fn test_segment_tracks_rotation() {
        // 6 segments of 60 degrees: rotating the board backwards by one
        // slice brings the next segment under the pointer.
        assert_eq!(segment_at_pointer(6, -60.0), 1);
        assert_eq!(segment_at_pointer(6, -120.0), 2);
        assert_eq!(segment_at_pointer(6, 300.0), 1);
        // A full turn changes nothing
        assert_eq!(segment_at_pointer(6, 360.0), 0);
        assert_eq!(segment_at_pointer(6, 720.0 - 60.0), 1);
    }

    #[test]
    fn test_segment_is_always_in_range() {
        for count in 2..=12 {
            for tenth in 0..3600 {
                let rotation = tenth as f64 / 10.0;
                assert!(segment_at_pointer(count, rotation) < count);
            }
        }
    }

    #[test]
    fn test_random_throw() {
        let mut rng = SmallRng::seed_from_u64(8);
        let hit = throw_at_random(5, &mut rng).unwrap();
        assert!(hit.winner_index < 5);
        assert!(hit.rotation_degrees >= 0.0 && hit.rotation_degrees < 360.0);
        assert_eq!(hit.flight_ms, FLIGHT_MS);
    }
}
