//! Slot-machine style random pick over the preset menu list.
//!
//! The winner is decided up front; the returned schedule is the decelerating
//! flicker the client plays back before landing on it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GameError;

const BASE_STEPS: usize = 30;
const EXTRA_STEPS: usize = 20;
const BASE_DELAY_MS: u32 = 20;
const DELAY_RAMP_MS: f64 = 200.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotStep {
    /// Option index to flash at this step
    pub index: usize,
    /// Delay before the next step
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotOutcome {
    pub winner_index: usize,
    pub steps: Vec<SlotStep>,
}

/// Spin over `option_count` entries. The last step always shows the winner.
pub fn spin<R: Rng + ?Sized>(option_count: usize, rng: &mut R) -> Result<SlotOutcome, GameError> {
    if option_count < 2 {
        return Err(GameError::InvalidInput("at least 2 options are required"));
    }

    let total = BASE_STEPS + rng.random_range(0..EXTRA_STEPS);
    let winner_index = rng.random_range(0..option_count);

    let mut steps = Vec::with_capacity(total);
    for count in 1..=total {
        let index = if count == total {
            winner_index
        } else {
            rng.random_range(0..option_count)
        };
        // Flicker slows down as the spin winds out
        let delay_ms = BASE_DELAY_MS + (count as f64 / total as f64 * DELAY_RAMP_MS) as u32;
        steps.push(SlotStep { index, delay_ms });
    }

    Ok(SlotOutcome {
        winner_index,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_tiny_pools() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(spin(0, &mut rng).is_err());
        assert!(spin(1, &mut rng).is_err());
    }

    #[test]
    fn test_last_step_shows_the_winner() {
        let mut rng = SmallRng::seed_from_u64(3);
        let outcome = spin(12, &mut rng).unwrap();
        assert_eq!(outcome.steps.last().unwrap().index, outcome.winner_index);
    }

    #[test]
    fn test_schedule_shape() {
        let mut rng = SmallRng::seed_from_u64(5);
        let outcome = spin(8, &mut rng).unwrap();

        assert!(outcome.steps.len() >= BASE_STEPS);
        assert!(outcome.steps.len() < BASE_STEPS + EXTRA_STEPS);
        assert!(outcome.winner_index < 8);
        for step in &outcome.steps {
            assert!(step.index < 8);
            assert!(step.delay_ms >= BASE_DELAY_MS);
            assert!(step.delay_ms <= BASE_DELAY_MS + DELAY_RAMP_MS as u32);
        }
        // Delays never speed back up
        for pair in outcome.steps.windows(2) {
            assert!(pair[0].delay_ms <= pair[1].delay_ms);
        }
    }
}
