// ============================================================================
// SESSION VIEWMODEL - Login / restore logic
// ============================================================================
// Returns values; the App controller owns the state and the UI
// ============================================================================

use crate::models::{Role, Session, User};
use crate::services::api::{detail_message, ApiError, ConvoyApi};
use crate::services::TokenStore;
use crate::utils::decode_claims;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Server refused the credentials; carries its message
    Rejected(String),
    /// Token missing or its claims could not be decoded
    InvalidToken,
    /// Request failed before the server could answer
    Transport(ApiError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected(message) => message.clone(),
            AuthError::InvalidToken => "Received an invalid access token".to_string(),
            AuthError::Transport(e) => e.user_message(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Rejected(message) => write!(f, "Login rejected: {}", message),
            AuthError::InvalidToken => write!(f, "Invalid access token"),
            AuthError::Transport(e) => write!(f, "Login failed: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

pub struct SessionViewModel;

impl SessionViewModel {
    /// Build a session from a raw token, or `None` if its claims don't decode
    pub fn session_from_token(token: &str) -> Option<Session> {
        let claims = decode_claims(token)?;
        Some(Session {
            token: token.to_string(),
            user: User {
                username: claims.sub,
                role: Role::from(claims.role),
            },
            expires_at: claims.exp,
        })
    }

    /// Exchange credentials for a session. Never retries.
    pub async fn login(api: &dyn ConvoyApi, username: &str, password: &str) -> Result<Session, AuthError> {
        let response = api.login(username, password).await.map_err(|e| match e {
            ApiError::Http { message, .. } => AuthError::Rejected(message),
            other => AuthError::Transport(other),
        })?;

        if let Some(message) = response.detail.as_ref().and_then(detail_message) {
            return Err(AuthError::Rejected(message));
        }

        let token = response.access_token.ok_or(AuthError::InvalidToken)?;
        Self::session_from_token(&token).ok_or(AuthError::InvalidToken)
    }

    /// Restore the persisted session if its `exp` is strictly after `now_secs`.
    ///
    /// A stale or undecodable token is removed from the store.
    pub fn restore(store: &dyn TokenStore, now_secs: i64) -> Option<Session> {
        let token = store.load()?;
        let session = Self::session_from_token(&token).filter(|session| {
            matches!(session.expires_at, Some(exp) if exp > now_secs)
        });

        if session.is_none() {
            log::info!("⌛ Stored token is expired or invalid, discarding");
            store.clear();
        }
        session
    }
}
