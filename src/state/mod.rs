mod food;
mod games;
mod history;
mod session;
mod stats;
mod status;

pub use food::FoodQuery;
pub use games::{ActiveGames, BalanceProgress, BalanceRun};

use crate::protocol::ServerMessage;
use crate::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub foods: Arc<RwLock<HashMap<FoodId, Food>>>,
    pub history: Arc<RwLock<Vec<SelectionRecord>>>,
    pub balance_matches: Arc<RwLock<Vec<BalanceMatch>>>,
    pub sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    pub statuses: Arc<RwLock<HashMap<StatusId, AnonymousStatus>>>,
    /// In-flight stateful games, one slot per session
    pub games: Arc<RwLock<HashMap<SessionId, games::ActiveGames>>>,
    pub config: FeedConfig,
    /// Broadcast channel for the live feed
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(FeedConfig::default())
    }

    pub fn with_config(config: FeedConfig) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            foods: Arc::new(RwLock::new(HashMap::new())),
            history: Arc::new(RwLock::new(Vec::new())),
            balance_matches: Arc::new(RwLock::new(Vec::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            statuses: Arc::new(RwLock::new(HashMap::new())),
            games: Arc::new(RwLock::new(HashMap::new())),
            config,
            broadcast: tx,
        }
    }

    /// Send to every connected client. No receivers is fine.
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        let _ = self.broadcast.send(msg);
    }

    /// Wipe all collections (admin reset)
    pub async fn reset(&self) {
        self.foods.write().await.clear();
        self.history.write().await.clear();
        self.balance_matches.write().await.clear();
        self.sessions.write().await.clear();
        self.statuses.write().await.clear();
        self.games.write().await.clear();
        tracing::info!("State reset");
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_session() {
        let state = AppState::new();
        let (session, token) = state.create_session().await;

        assert!(!token.is_empty());
        assert!(session.display_name.is_none());
        assert!(!session.guest_name.is_empty());
        assert!(state.session_by_token(&token).await.is_some());
    }

    #[tokio::test]
    async fn test_register_session() {
        let state = AppState::new();
        let (_, token) = state.create_session().await;

        let registered = state
            .register_session(&token, "Alice".to_string())
            .await
            .unwrap();
        assert_eq!(registered.display_name.as_deref(), Some("Alice"));
        assert_eq!(registered.display(), "Alice");
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let state = AppState::new();
        let (session, _) = state.create_session().await;
        state
            .record_selection(
                Some(session.id.clone()),
                None,
                "Pizza".to_string(),
                SelectionMethod::Random,
            )
            .await;

        state.reset().await;
        assert!(state.sessions.read().await.is_empty());
        assert!(state.history.read().await.is_empty());
    }
}
