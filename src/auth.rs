//! Session-token helpers and HTTP Basic Authentication for the admin
//! endpoint.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, Response, StatusCode},
    middleware::Next,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Header carrying the raw session token on HTTP requests
pub const SESSION_HEADER: &str = "x-amu-session";

/// Hex SHA-256 digest of a raw session token. Only digests are stored.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Pull the raw session token out of request headers
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Admin authentication configuration
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Username for the admin endpoint (None = auth disabled)
    pub username: Option<String>,
    /// Password for the admin endpoint
    pub password: Option<String>,
}

impl AdminConfig {
    /// Load admin config from environment variables.
    /// ADMIN_USERNAME and ADMIN_PASSWORD must both be set to enable auth.
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let password = std::env::var("ADMIN_PASSWORD")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if username.is_some() && password.is_some() {
            tracing::info!("Admin authentication enabled");
            Self { username, password }
        } else {
            if username.is_some() || password.is_some() {
                tracing::warn!(
                    "ADMIN_USERNAME and ADMIN_PASSWORD must both be set to enable authentication"
                );
            }
            tracing::warn!("Admin authentication DISABLED - anyone can reset the state!");
            Self {
                username: None,
                password: None,
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Validate credentials
    pub fn validate(&self, username: &str, password: &str) -> bool {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => {
                // Constant-time comparison to prevent timing attacks
                constant_time_eq(u.as_bytes(), username.as_bytes())
                    && constant_time_eq(p.as_bytes(), password.as_bytes())
            }
            _ => true, // Auth disabled, allow all
        }
    }
}

/// Constant-time byte comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

fn basic_credentials(request: &Request<Body>) -> Option<(String, String)> {
    let auth_str = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let encoded = auth_str.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded_str = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded_str.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware for HTTP Basic Authentication on admin routes
pub async fn admin_auth_middleware(
    State(config): State<Arc<AdminConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    if !config.is_enabled() {
        return next.run(request).await;
    }

    if let Some((username, password)) = basic_credentials(&request) {
        if config.validate(&username, &password) {
            return next.run(request).await;
        }
    }

    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(header::WWW_AUTHENTICATE, "Basic realm=\"AMU Admin\"")
        .body(Body::from("Unauthorized"))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_token_digest_is_stable_hex() {
        let digest = token_digest("ABCDEF234567");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, token_digest("ABCDEF234567"));
        assert_ne!(digest, token_digest("abcdef234567"));
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_session_token_extraction() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        headers.insert(SESSION_HEADER, " ABC123 ".parse().unwrap());
        assert_eq!(session_token(&headers), Some("ABC123"));

        headers.insert(SESSION_HEADER, "   ".parse().unwrap());
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_admin_config_disabled_when_incomplete() {
        let config = AdminConfig {
            username: None,
            password: None,
        };
        assert!(!config.is_enabled());
        assert!(config.validate("any", "thing")); // Passes when disabled

        let config = AdminConfig {
            username: Some("admin".to_string()),
            password: None,
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_admin_config_enabled() {
        let config = AdminConfig {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
        };
        assert!(config.is_enabled());
        assert!(config.validate("admin", "secret"));
        assert!(!config.validate("admin", "wrong"));
        assert!(!config.validate("wrong", "secret"));
        assert!(!config.validate("", ""));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::remove_var("ADMIN_USERNAME");
        std::env::remove_var("ADMIN_PASSWORD");
        assert!(!AdminConfig::from_env().is_enabled());

        std::env::set_var("ADMIN_USERNAME", "admin");
        assert!(!AdminConfig::from_env().is_enabled());

        std::env::set_var("ADMIN_PASSWORD", "secret");
        let config = AdminConfig::from_env();
        assert!(config.is_enabled());
        assert!(config.validate("admin", "secret"));

        std::env::remove_var("ADMIN_USERNAME");
        std::env::remove_var("ADMIN_PASSWORD");
    }

    #[test]
    fn test_basic_credentials() {
        // "admin:secret" -> "YWRtaW46c2VjcmV0"
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Basic YWRtaW46c2VjcmV0")
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            basic_credentials(&request),
            Some(("admin".to_string(), "secret".to_string()))
        );

        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer nope")
            .body(Body::empty())
            .unwrap();
        assert!(basic_credentials(&request).is_none());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
