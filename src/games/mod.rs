//! Decision mini-game engines.
//!
//! Every engine here is pure and synchronous: outcomes are decided up front
//! from an injected random source, and animation pacing is returned as data
//! (step schedules with per-step delays) for the client to play back. Nothing
//! in this module touches clocks, sockets, or shared state.

pub mod bracket;
pub mod dart;
pub mod dice;
pub mod grid;
pub mod lottery;
pub mod slot;
pub mod wheel;

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    /// The option pool failed validation before a game could start
    #[error("invalid option pool: {0}")]
    InvalidInput(&'static str),
    /// A choice arrived while no match was on the table
    #[error("no match is awaiting a choice")]
    NoActiveMatch,
}

/// Built-in menu list used by the slot machine and the auto-suggest button.
pub const PRESET_MENUS: &[&str] = &[
    "Kimchi Stew",
    "Bibimbap",
    "Bulgogi",
    "Samgyeopsal",
    "Tteokbokki",
    "Gimbap",
    "Cold Noodles",
    "Soybean Paste Stew",
    "Jajangmyeon",
    "Jjamppong",
    "Sweet and Sour Pork",
    "Mala Soup",
    "Fried Rice",
    "Dumplings",
    "Sushi",
    "Ramen",
    "Udon",
    "Donkatsu",
    "Curry Rice",
    "Pizza",
    "Pasta",
    "Steak",
    "Risotto",
    "Burger",
    "Fried Chicken",
    "Sandwich",
    "Burrito",
    "Pho",
    "Pad Thai",
    "Salad",
    "Waffles",
    "Tiramisu",
];

/// Uniform in-place Fisher–Yates shuffle: for each index from the back,
/// swap with a uniformly chosen index at or below it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Pick `count` distinct menus from the preset list, in random order.
pub fn random_menus<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let mut pool: Vec<&str> = PRESET_MENUS.to_vec();
    shuffle(&mut pool, rng);
    pool.truncate(count.min(PRESET_MENUS.len()));
    pool.into_iter().map(String::from).collect()
}

/// Input-layer pool validation shared by the option-based games.
///
/// Duplicate labels are rejected here, not in the engines: the bracket (for
/// one) is positionally correct with duplicates, but results become ambiguous
/// to display.
pub fn validate_pool(options: &[String], max: usize) -> Result<(), GameError> {
    if options.len() < 2 {
        return Err(GameError::InvalidInput("at least 2 options are required"));
    }
    if options.len() > max {
        return Err(GameError::InvalidInput("too many options"));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(GameError::InvalidInput("options must not be blank"));
    }
    let mut seen = std::collections::HashSet::new();
    for option in options {
        if !seen.insert(option.trim().to_lowercase()) {
            return Err(GameError::InvalidInput("duplicate options"));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_rng {
    use rand::RngCore;

    /// Rng whose every output is all-ones. Under the Fisher–Yates loop each
    /// `random_range(0..=i)` then yields `i`, so shuffles become identity —
    /// handy for scripted game scenarios.
    pub struct MaxRng;

    impl RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xFF);
        }
    }
}
