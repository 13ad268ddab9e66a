use super::AppState;
use crate::auth::token_digest;
use crate::types::*;
use rand::Rng;

/// Safe character set for tokens (excludes 0/O, 1/I/L to avoid confusion)
const TOKEN_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const TOKEN_LENGTH: usize = 12;

fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_CHARS[rng.random_range(0..TOKEN_CHARS.len())] as char)
        .collect()
}

fn guest_name() -> String {
    petname::petname(2, "-").unwrap_or_else(|| "hungry-guest".to_string())
}

impl AppState {
    /// Create a new session. Returns the raw token once; only its digest is
    /// stored.
    pub async fn create_session(&self) -> (Session, String) {
        // Digest collisions would silently merge identities, so check
        let (token, digest) = loop {
            let token = generate_token();
            let digest = token_digest(&token);
            let sessions = self.sessions.read().await;
            if !sessions.values().any(|s| s.token_digest == digest) {
                break (token, digest);
            }
        };

        let now = chrono::Utc::now().to_rfc3339();
        let session = Session {
            id: ulid::Ulid::new().to_string(),
            token_digest: digest,
            guest_name: guest_name(),
            display_name: None,
            created_at: now.clone(),
            last_seen: now,
        };

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        (session, token)
    }

    /// Look up a session by raw token
    pub async fn session_by_token(&self, token: &str) -> Option<Session> {
        let digest = token_digest(token);
        self.sessions
            .read()
            .await
            .values()
            .find(|s| s.token_digest == digest)
            .cloned()
    }

    /// Attach a chosen display name to the session behind `token`
    pub async fn register_session(
        &self,
        token: &str,
        display_name: String,
    ) -> Result<Session, String> {
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err("Display name must not be empty".to_string());
        }
        if trimmed.chars().count() > 30 {
            return Err("Display name must be at most 30 characters".to_string());
        }

        let digest = token_digest(token);
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.values_mut().find(|s| s.token_digest == digest) {
            session.display_name = Some(trimmed.to_string());
            Ok(session.clone())
        } else {
            Err("Invalid session token".to_string())
        }
    }

    /// Bump last_seen for an active session
    pub async fn touch_session(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.last_seen = chrono::Utc::now().to_rfc3339();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_charset() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.bytes().all(|b| TOKEN_CHARS.contains(&b)));
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let state = AppState::new();
        assert!(state.session_by_token("NOSUCHTOKEN").await.is_none());
        assert!(state
            .register_session("NOSUCHTOKEN", "Bob".to_string())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_register_validates_name() {
        let state = AppState::new();
        let (_, token) = state.create_session().await;

        assert!(state.register_session(&token, "  ".to_string()).await.is_err());
        let long = "x".repeat(31);
        assert!(state.register_session(&token, long).await.is_err());
    }

    #[tokio::test]
    async fn test_touch_updates_last_seen() {
        let state = AppState::new();
        let (session, _) = state.create_session().await;

        // Force an older timestamp so the bump is observable
        state
            .sessions
            .write()
            .await
            .get_mut(&session.id)
            .unwrap()
            .last_seen = "2000-01-01T00:00:00+00:00".to_string();

        state.touch_session(&session.id).await;
        let touched = state.sessions.read().await.get(&session.id).cloned().unwrap();
        assert!(touched.last_seen > "2000-01-01T00:00:00+00:00".to_string());
    }
}
