//! Dice roll over a numbered option list (2–8 faces).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GameError;

pub const MAX_OPTIONS: usize = 8;

const BASE_STEPS: usize = 15;
const EXTRA_STEPS: usize = 10;
const BASE_DELAY_MS: u32 = 60;
const DELAY_RAMP_MS: f64 = 200.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiceStep {
    /// Face to flash at this step (1-based)
    pub face: u32,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiceOutcome {
    pub winner_index: usize,
    /// Winning face, 1-based to match the die
    pub face: u32,
    pub steps: Vec<DiceStep>,
}

pub fn roll<R: Rng + ?Sized>(option_count: usize, rng: &mut R) -> Result<DiceOutcome, GameError> {
    if option_count < 2 {
        return Err(GameError::InvalidInput("at least 2 options are required"));
    }
    if option_count > MAX_OPTIONS {
        return Err(GameError::InvalidInput("too many options"));
    }

    let total = BASE_STEPS + rng.random_range(0..EXTRA_STEPS);
    let winner_index = rng.random_range(0..option_count);
    let face = winner_index as u32 + 1;

    let mut steps = Vec::with_capacity(total);
    for count in 1..=total {
        let step_face = if count == total {
            face
        } else {
            rng.random_range(1..=option_count as u32)
        };
        let delay_ms = BASE_DELAY_MS + (count as f64 / total as f64 * DELAY_RAMP_MS) as u32;
        steps.push(DiceStep {
            face: step_face,
            delay_ms,
        });
    }

    Ok(DiceOutcome {
        winner_index,
        face,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(roll(1, &mut rng).is_err());
        assert!(roll(9, &mut rng).is_err());
        assert!(roll(2, &mut rng).is_ok());
        assert!(roll(8, &mut rng).is_ok());
    }

    #[test]
    fn test_face_is_one_based_winner() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = roll(6, &mut rng).unwrap();
            assert_eq!(outcome.face as usize, outcome.winner_index + 1);
            assert!(outcome.face >= 1 && outcome.face <= 6);
            assert_eq!(outcome.steps.last().unwrap().face, outcome.face);
        }
    }

    #[test]
    fn test_step_faces_stay_on_the_die() {
        let mut rng = SmallRng::seed_from_u64(11);
        let outcome = roll(4, &mut rng).unwrap();
        assert!(outcome.steps.len() >= BASE_STEPS);
        for step in &outcome.steps {
            assert!(step.face >= 1 && step.face <= 4);
        }
    }
}
