//! Session-scoped game state: the balance bracket and the face-down
//! lottery straws. Everything else in `crate::games` resolves in a single
//! message and needs no slot here.

use super::AppState;
use crate::games::bracket::{Bracket, Side, MAX_OPTIONS};
use crate::games::lottery::{self, Straw};
use crate::games::{self, GameError};
use crate::protocol::ServerMessage;
use crate::types::*;

/// An in-flight balance game: the bracket plus the pool it started from,
/// kept for retries
#[derive(Debug, Clone)]
pub struct BalanceRun {
    pub pool: Vec<String>,
    pub bracket: Bracket,
}

/// In-flight stateful games for one session
#[derive(Debug, Clone, Default)]
pub struct ActiveGames {
    pub balance: Option<BalanceRun>,
    pub straws: Option<Vec<Straw>>,
}

/// What a balance transition produced
#[derive(Debug, Clone)]
pub enum BalanceProgress {
    Pair {
        left: String,
        right: String,
        round_label: String,
        alive: usize,
    },
    Winner {
        winner: String,
        matches_played: u32,
    },
}

impl AppState {
    /// Start a balance game for the session, replacing any in-flight run
    pub async fn start_balance(
        &self,
        session_id: &SessionId,
        options: Vec<String>,
    ) -> Result<BalanceProgress, String> {
        games::validate_pool(&options, MAX_OPTIONS).map_err(|e| e.to_string())?;

        let bracket =
            Bracket::start(&options, &mut rand::rng()).map_err(|e| e.to_string())?;
        let progress = pair_progress(&bracket)?;

        let mut games = self.games.write().await;
        games.entry(session_id.clone()).or_default().balance = Some(BalanceRun {
            pool: options,
            bracket,
        });
        Ok(progress)
    }

    /// Resolve the current pair. On termination the winner is reported to
    /// the history exactly once and the run stays around for a retry.
    pub async fn balance_choose(
        &self,
        session_id: &SessionId,
        side: Side,
    ) -> Result<BalanceProgress, String> {
        let run = {
            let games = self.games.read().await;
            games
                .get(session_id)
                .and_then(|g| g.balance.clone())
                .ok_or("No balance game in progress")?
        };

        // Failure leaves the stored run untouched; only a successful
        // transition is written back
        let (bracket, result) = run
            .bracket
            .choose(side, &mut rand::rng())
            .map_err(|e| e.to_string())?;

        self.balance_matches.write().await.push(BalanceMatch {
            id: ulid::Ulid::new().to_string(),
            session_id: Some(session_id.clone()),
            food_a: result.left,
            food_b: result.right,
            selected: result.picked,
            created_at: chrono::Utc::now().to_rfc3339(),
        });

        let progress = if let Some(winner) = bracket.winner() {
            let winner = winner.to_string();
            self.record_selection(
                Some(session_id.clone()),
                None,
                winner.clone(),
                SelectionMethod::Balance,
            )
            .await;
            BalanceProgress::Winner {
                winner,
                matches_played: bracket.matches_played(),
            }
        } else {
            pair_progress(&bracket)?
        };

        self.games
            .write()
            .await
            .entry(session_id.clone())
            .or_default()
            .balance = Some(BalanceRun {
            pool: run.pool,
            bracket,
        });
        Ok(progress)
    }

    /// Discard the current round state and reshuffle the original pool
    pub async fn balance_retry(&self, session_id: &SessionId) -> Result<BalanceProgress, String> {
        let pool = {
            let games = self.games.read().await;
            games
                .get(session_id)
                .and_then(|g| g.balance.as_ref())
                .map(|run| run.pool.clone())
                .ok_or("No balance game to retry")?
        };
        self.start_balance(session_id, pool).await
    }

    pub async fn abandon_balance(&self, session_id: &SessionId) {
        let mut games = self.games.write().await;
        if let Some(slot) = games.get_mut(session_id) {
            slot.balance = None;
        }
    }

    /// Shuffle options into face-down straws for the session
    pub async fn draw_straws(
        &self,
        session_id: &SessionId,
        options: Vec<String>,
    ) -> Result<Vec<Straw>, String> {
        let straws =
            lottery::draw_straws(&options, &mut rand::rng()).map_err(|e| e.to_string())?;

        let mut games = self.games.write().await;
        games.entry(session_id.clone()).or_default().straws = Some(straws.clone());
        Ok(straws)
    }

    /// Pull a straw; reveals the label, records the pick, and clears the fan
    pub async fn pull_straw(
        &self,
        session_id: &SessionId,
        index: usize,
    ) -> Result<String, String> {
        let winner = {
            let games = self.games.read().await;
            let straws = games
                .get(session_id)
                .and_then(|g| g.straws.as_ref())
                .ok_or("No straws have been drawn")?;
            lottery::pull(straws, index)
                .ok_or("No straw at that position")?
                .to_string()
        };

        {
            let mut games = self.games.write().await;
            if let Some(slot) = games.get_mut(session_id) {
                slot.straws = None;
            }
        }

        self.record_selection(
            Some(session_id.clone()),
            None,
            winner.clone(),
            SelectionMethod::Lottery,
        )
        .await;
        Ok(winner)
    }
}

fn pair_progress(bracket: &Bracket) -> Result<BalanceProgress, String> {
    let (left, right) = bracket
        .current_pair()
        .ok_or_else(|| GameError::NoActiveMatch.to_string())?;
    Ok(BalanceProgress::Pair {
        left: left.to_string(),
        right: right.to_string(),
        round_label: bracket.round_label(),
        alive: bracket.alive(),
    })
}

impl From<&BalanceProgress> for ServerMessage {
    fn from(progress: &BalanceProgress) -> Self {
        match progress {
            BalanceProgress::Pair {
                left,
                right,
                round_label,
                alive,
            } => ServerMessage::BalancePair {
                left: left.clone(),
                right: right.clone(),
                round_label: round_label.clone(),
                alive: *alive,
            },
            BalanceProgress::Winner {
                winner,
                matches_played,
            } => ServerMessage::BalanceWinner {
                winner: winner.clone(),
                matches_played: *matches_played,
            },
        }
    }
}
