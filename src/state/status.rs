use super::AppState;
use crate::protocol::{ServerMessage, StatusInfo};
use crate::types::*;
use chrono::{DateTime, Duration, Utc};

impl AppState {
    /// Put an anonymous "I picked X" on the live feed. Entries expire after
    /// the configured TTL.
    pub async fn post_status(
        &self,
        session_id: &SessionId,
        food_name: String,
    ) -> Result<AnonymousStatus, String> {
        let trimmed = food_name.trim();
        if trimmed.is_empty() {
            return Err("Food name must not be empty".to_string());
        }
        if trimmed.chars().count() > 50 {
            return Err("Food name must be at most 50 characters".to_string());
        }

        let now = Utc::now();
        let expires = now + Duration::seconds(self.config.status_ttl_secs as i64);
        let status = AnonymousStatus {
            id: ulid::Ulid::new().to_string(),
            food_name: trimmed.to_string(),
            session_id: session_id.clone(),
            created_at: now.to_rfc3339(),
            expires_at: expires.to_rfc3339(),
        };

        self.statuses
            .write()
            .await
            .insert(status.id.clone(), status.clone());

        self.broadcast_status_feed().await;
        Ok(status)
    }

    /// Unexpired statuses, newest first
    pub async fn active_statuses(&self) -> Vec<AnonymousStatus> {
        let now = Utc::now();
        let statuses = self.statuses.read().await;

        let mut active: Vec<AnonymousStatus> = statuses
            .values()
            .filter(|s| !is_expired(s, now))
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        active
    }

    /// Drop expired statuses. Returns how many were removed.
    pub async fn sweep_expired_statuses(&self) -> usize {
        let now = Utc::now();
        let removed = {
            let mut statuses = self.statuses.write().await;
            let before = statuses.len();
            statuses.retain(|_, s| !is_expired(s, now));
            before - statuses.len()
        };

        if removed > 0 {
            tracing::debug!("Swept {} expired statuses", removed);
            self.broadcast_status_feed().await;
        }
        removed
    }

    pub async fn broadcast_status_feed(&self) {
        let statuses = self.active_statuses().await;
        let infos: Vec<StatusInfo> = statuses.iter().map(|s| s.into()).collect();
        self.broadcast_to_all(ServerMessage::StatusFeed { statuses: infos });
    }
}

fn is_expired(status: &AnonymousStatus, now: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(&status.expires_at) {
        Ok(expires) => expires <= now,
        // An unparseable deadline never expires on its own; reset clears it
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_post_and_list() {
        let state = AppState::new();
        let (session, _) = state.create_session().await;

        state
            .post_status(&session.id, "  Pizza  ".to_string())
            .await
            .unwrap();

        let active = state.active_statuses().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].food_name, "Pizza");
    }

    #[tokio::test]
    async fn test_validation() {
        let state = AppState::new();
        let (session, _) = state.create_session().await;

        assert!(state.post_status(&session.id, "  ".to_string()).await.is_err());
        assert!(state
            .post_status(&session.id, "x".repeat(51))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_expired_statuses_are_hidden_and_swept() {
        let state = AppState::new();
        let (session, _) = state.create_session().await;
        let status = state
            .post_status(&session.id, "Sushi".to_string())
            .await
            .unwrap();

        // Backdate the deadline
        state
            .statuses
            .write()
            .await
            .get_mut(&status.id)
            .unwrap()
            .expires_at = (Utc::now() - Duration::seconds(1)).to_rfc3339();

        assert!(state.active_statuses().await.is_empty());
        assert_eq!(state.sweep_expired_statuses().await, 1);
        assert!(state.statuses.read().await.is_empty());
        assert_eq!(state.sweep_expired_statuses().await, 0);
    }

    #[tokio::test]
    async fn test_post_broadcasts_the_feed() {
        let state = AppState::new();
        let (session, _) = state.create_session().await;
        let mut rx = state.broadcast.subscribe();

        state
            .post_status(&session.id, "Ramen".to_string())
            .await
            .unwrap();

        match rx.try_recv() {
            Ok(ServerMessage::StatusFeed { statuses }) => {
                assert_eq!(statuses.len(), 1);
                assert_eq!(statuses[0].food_name, "Ramen");
            }
            other => panic!("expected StatusFeed, got {:?}", other),
        }
    }
}
