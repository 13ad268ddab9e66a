//! Lottery straws (2–8).
//!
//! The options are shuffled into a fan of straws dressed with visual
//! parameters; labels stay hidden until a straw is pulled.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{shuffle, GameError};

pub const MAX_OPTIONS: usize = 8;

/// Color/pattern palette slots cycled across the fan
pub const PALETTE_SLOTS: usize = 8;
/// Delay between pulling a straw and revealing its label
pub const REVEAL_DELAY_MS: u32 = 600;

const MIN_HEIGHT: f64 = 160.0;
const HEIGHT_SPREAD: f64 = 80.0;
const FAN_STEP_DEGREES: f64 = 8.0;
const JITTER_DEGREES: f64 = 6.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Straw {
    pub label: String,
    pub color_index: usize,
    pub height: f64,
    pub lean_degrees: f64,
}

/// Shuffle the options into a dressed fan of straws.
pub fn draw_straws<R: Rng + ?Sized>(
    options: &[String],
    rng: &mut R,
) -> Result<Vec<Straw>, GameError> {
    if options.len() < 2 {
        return Err(GameError::InvalidInput("at least 2 options are required"));
    }
    if options.len() > MAX_OPTIONS {
        return Err(GameError::InvalidInput("too many options"));
    }

    let mut labels = options.to_vec();
    shuffle(&mut labels, rng);

    let center = (labels.len() / 2) as f64;
    Ok(labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| Straw {
            label,
            color_index: i % PALETTE_SLOTS,
            height: MIN_HEIGHT + rng.random::<f64>() * HEIGHT_SPREAD,
            lean_degrees: (i as f64 - center) * FAN_STEP_DEGREES
                + (rng.random::<f64>() - 0.5) * JITTER_DEGREES,
        })
        .collect())
}

/// Reveal the straw at `index`, if there is one.
pub fn pull(straws: &[Straw], index: usize) -> Option<&str> {
    straws.get(index).map(|s| s.label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn options(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pool_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(draw_straws(&options(&["a"]), &mut rng).is_err());
        let nine: Vec<String> = (0..9).map(|i| i.to_string()).collect();
        assert!(draw_straws(&nine, &mut rng).is_err());
    }

    #[test]
    fn test_straws_are_a_permutation_of_the_options() {
        let mut rng = SmallRng::seed_from_u64(4);
        let opts = options(&["a", "b", "c", "d", "e"]);
        let straws = draw_straws(&opts, &mut rng).unwrap();

        assert_eq!(straws.len(), 5);
        let mut labels: Vec<&str> = straws.iter().map(|s| s.label.as_str()).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_dressing_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(6);
        let opts: Vec<String> = (0..8).map(|i| format!("straw-{}", i)).collect();
        let straws = draw_straws(&opts, &mut rng).unwrap();

        for (i, straw) in straws.iter().enumerate() {
            assert_eq!(straw.color_index, i % PALETTE_SLOTS);
            assert!(straw.height >= MIN_HEIGHT);
            assert!(straw.height < MIN_HEIGHT + HEIGHT_SPREAD);
            assert!(straw.lean_degrees.abs() <= 4.0 * FAN_STEP_DEGREES + JITTER_DEGREES);
        }
    }

    #[test]
    fn test_pull() {
        let mut rng = SmallRng::seed_from_u64(2);
        let straws = draw_straws(&options(&["a", "b", "c"]), &mut rng).unwrap();

        let revealed = pull(&straws, 1).unwrap();
        assert!(["a", "b", "c"].contains(&revealed));
        assert!(pull(&straws, 3).is_none());
    }
}
