//! Tournament bracket for the balance game.
//!
//! The bracket repeatedly pairs candidates from a pool and asks an external
//! chooser to pick one of each pair, folding winners into the next round
//! until a single candidate stands. Odd-sized rounds hand the leftover
//! candidate a bye straight into the next round.
//!
//! State is immutable per transition: `choose` consumes the bracket and
//! returns the successor state, so every step is a value the caller can
//! inspect or throw away.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{shuffle, GameError};

/// Largest pool the input form accepts
pub const MAX_OPTIONS: usize = 16;

pub type Candidate = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// A resolved pairwise choice, reported back as the bracket advances
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub left: Candidate,
    pub right: Candidate,
    pub picked: Candidate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bracket {
    /// Candidates not yet paired in the current round
    remaining: Vec<Candidate>,
    /// Candidates that already won a match this round (byes included)
    advancing: Vec<Candidate>,
    current_pair: Option<(Candidate, Candidate)>,
    winner: Option<Candidate>,
    /// Candidates alive when the current round began (label only)
    round_size: usize,
    matches_played: u32,
}

impl Bracket {
    /// Shuffle the pool and put the first match on the table.
    ///
    /// Fails with `InvalidInput` for pools below 2 without creating any
    /// round state.
    pub fn start<R: Rng + ?Sized>(pool: &[Candidate], rng: &mut R) -> Result<Self, GameError> {
        if pool.len() < 2 {
            return Err(GameError::InvalidInput(
                "at least 2 options are required",
            ));
        }

        let mut remaining = pool.to_vec();
        shuffle(&mut remaining, rng);

        let mut bracket = Self {
            round_size: remaining.len(),
            remaining,
            advancing: Vec::new(),
            current_pair: None,
            winner: None,
            matches_played: 0,
        };
        bracket.advance(rng);
        Ok(bracket)
    }

    /// Resolve the current pair in favor of `side` and advance to the next
    /// match, the next round, or the final winner.
    pub fn choose<R: Rng + ?Sized>(
        mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<(Self, MatchResult), GameError> {
        if self.winner.is_some() {
            return Err(GameError::NoActiveMatch);
        }
        let (left, right) = self.current_pair.take().ok_or(GameError::NoActiveMatch)?;

        let picked = match side {
            Side::Left => left.clone(),
            Side::Right => right.clone(),
        };
        self.advancing.push(picked.clone());
        self.matches_played += 1;
        self.advance(rng);

        Ok((self, MatchResult { left, right, picked }))
    }

    /// Fold round state forward until a pair is on the table or a winner
    /// stands. Byes and round rollovers can cascade, hence the loop.
    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        loop {
            match (self.remaining.len(), self.advancing.len()) {
                (0, 1) => {
                    self.winner = self.advancing.pop();
                    return;
                }
                (0, _) => self.next_round(rng),
                (1, 0) => {
                    self.winner = self.remaining.pop();
                    return;
                }
                (1, _) => {
                    // Bye: the leftover folds into the next round unmatched
                    let bye = self.remaining.remove(0);
                    self.advancing.push(bye);
                    self.next_round(rng);
                }
                (_, _) => {
                    let left = self.remaining.remove(0);
                    let right = self.remaining.remove(0);
                    self.current_pair = Some((left, right));
                    return;
                }
            }
        }
    }

    fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.remaining = std::mem::take(&mut self.advancing);
        shuffle(&mut self.remaining, rng);
        self.round_size = self.remaining.len();
    }

    pub fn current_pair(&self) -> Option<(&str, &str)> {
        self.current_pair
            .as_ref()
            .map(|(l, r)| (l.as_str(), r.as_str()))
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Candidates still eligible to win
    pub fn alive(&self) -> usize {
        let in_pair = if self.current_pair.is_some() { 2 } else { 0 };
        let decided = if self.winner.is_some() { 1 } else { 0 };
        self.remaining.len() + self.advancing.len() + in_pair + decided
    }

    pub fn matches_played(&self) -> u32 {
        self.matches_played
    }

    /// Label for the round in progress, derived from the number of
    /// candidates alive when it started.
    pub fn round_label(&self) -> String {
        match self.round_size {
            2 => "final".to_string(),
            4 => "semifinal".to_string(),
            n => format!("{}-way round", n),
        }
    }
}
