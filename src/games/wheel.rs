//! Spin wheel (2–8 slices).
//!
//! The winner is chosen up front and the target rotation is computed so the
//! winning slice center lands under the top pointer after a whole number of
//! extra turns. The client samples `rotation_at` to animate; the server only
//! ever deals in the final numbers.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::GameError;

pub const MAX_OPTIONS: usize = 8;
pub const SPIN_DURATION_MS: u32 = 4000;

const MIN_TURNS: u32 = 5;
const EXTRA_TURNS: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelSpin {
    pub winner_index: usize,
    /// Whole extra turns before settling
    pub turns: u32,
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: u32,
}

/// Plan a spin from the wheel's current rotation.
pub fn spin<R: Rng + ?Sized>(
    option_count: usize,
    start_rotation: f64,
    rng: &mut R,
) -> Result<WheelSpin, GameError> {
    if option_count < 2 {
        return Err(GameError::InvalidInput("at least 2 options are required"));
    }
    if option_count > MAX_OPTIONS {
        return Err(GameError::InvalidInput("too many options"));
    }

    let turns = MIN_TURNS + rng.random_range(0..EXTRA_TURNS);
    let winner_index = rng.random_range(0..option_count);

    let slice = TAU / option_count as f64;
    // The wheel must stop with the winner's slice center under the top
    // pointer: center(i) + rotation = -pi/2 (mod tau)
    let target_center = -FRAC_PI_2 - (winner_index as f64 * slice + slice / 2.0);

    // Shortest positive rotation from where we are to that alignment
    let normalized_target = target_center.rem_euclid(TAU);
    let normalized_start = start_rotation.rem_euclid(TAU);
    let diff = (normalized_target - normalized_start).rem_euclid(TAU);

    let target_rotation = start_rotation + turns as f64 * TAU + diff;

    Ok(WheelSpin {
        winner_index,
        turns,
        start_rotation,
        target_rotation,
        duration_ms: SPIN_DURATION_MS,
    })
}

/// Rotation at `elapsed_ms` into the spin, on an ease-out cubic curve.
pub fn rotation_at(spin: &WheelSpin, elapsed_ms: u32) -> f64 {
    let progress = (elapsed_ms as f64 / spin.duration_ms as f64).min(1.0);
    let eased = 1.0 - (1.0 - progress).powi(3);
    spin.start_rotation + (spin.target_rotation - spin.start_rotation) * eased
}

/// Which slice sits under the top pointer at `rotation`.
pub fn slice_at_pointer(option_count: usize, rotation: f64) -> usize {
    let slice = TAU / option_count as f64;
    // Invert center(i) + rotation = -pi/2
    let center = (-FRAC_PI_2 - rotation).rem_euclid(TAU);
    let index = (center / slice - 0.5).round() as i64;
    index.rem_euclid(option_count as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(spin(1, 0.0, &mut rng).is_err());
        assert!(spin(9, 0.0, &mut rng).is_err());
        assert!(spin(8, 0.0, &mut rng).is_ok());
    }

    #[test]
    fn test_winner_lands_under_the_pointer() {
        for seed in 0..40 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let count = 2 + (seed as usize % 7);
            let start = seed as f64 * 0.37;
            let plan = spin(count, start, &mut rng).unwrap();
            assert_eq!(
                slice_at_pointer(count, plan.target_rotation),
                plan.winner_index
            );
        }
    }

    #[test]
    fn test_spin_always_moves_forward() {
        let mut rng = SmallRng::seed_from_u64(9);
        let plan = spin(6, 1.25, &mut rng).unwrap();
        let min_travel = plan.turns as f64 * TAU;
        let travel = plan.target_rotation - plan.start_rotation;
        assert!(travel >= min_travel);
        assert!(travel < (plan.turns + 1) as f64 * TAU);
        assert!(plan.turns >= MIN_TURNS && plan.turns < MIN_TURNS + EXTRA_TURNS);
    }

    #[test]
    fn test_rotation_at_eases_out_to_the_target() {
        let mut rng = SmallRng::seed_from_u64(2);
        let plan = spin(4, 0.0, &mut rng).unwrap();

        assert_eq!(rotation_at(&plan, 0), plan.start_rotation);
        assert!((rotation_at(&plan, plan.duration_ms) - plan.target_rotation).abs() < 1e-9);
        // Past the end it stays put
        assert_eq!(rotation_at(&plan, plan.duration_ms * 2), plan.target_rotation);

        // Front-loaded: the first half covers more ground than the second
        let halfway = rotation_at(&plan, plan.duration_ms / 2);
        assert!(halfway - plan.start_rotation > plan.target_rotation - halfway);
    }
}
