//! Request-scoped identity: token extraction and session verification.
//!
//! Identity is threaded as an explicit value per request rather than held
//! in framework state. Verification failures on the read path resolve to
//! "no user", which the badge handler maps to a zero count.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use storage::SessionRepository;
use tracing::warn;
use unread_core::SourceError;

/// Resolves an opaque session token to a user identifier.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// `Ok(None)` for an unknown token; `Err` only on backend trouble.
    async fn verify(&self, token: &str) -> Result<Option<String>, SourceError>;
}

#[async_trait]
impl SessionVerifier for SessionRepository {
    async fn verify(&self, token: &str) -> Result<Option<String>, SourceError> {
        self.find_user(token)
            .await
            .map_err(|e| SourceError::Backend(e.to_string()))
    }
}

/// Extracts the session token from `Authorization: Bearer <token>` or the
/// `session` cookie, preferring the header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("session="))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Resolves the caller's identity, or `None` when no token is present, the
/// token is unknown, or the verifier fails.
pub async fn authenticate(verifier: &dyn SessionVerifier, headers: &HeaderMap) -> Option<String> {
    let token = session_token(headers)?;
    match verifier.verify(&token).await {
        Ok(user) => user,
        Err(e) => {
            warn!(error = %e, "Session verification failed");
            None
        }
    }
}
