use serde::{Deserialize, Serialize};

/// Role carried in the token's `role` claim
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Commander,
    Operator,
    Analyst,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Commander => "commander",
            Role::Operator => "operator",
            Role::Analyst => "analyst",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_commander(&self) -> bool {
        matches!(self, Role::Commander)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "commander" => Role::Commander,
            "operator" => Role::Operator,
            "analyst" => Role::Analyst,
            _ => Role::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: Role,
}

/// Authenticated session: bearer token plus the identity decoded from it
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
    /// `exp` claim in seconds since the epoch, when the token carries one
    pub expires_at: Option<i64>,
}

impl Session {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        matches!(self.expires_at, Some(exp) if exp <= now_secs)
    }
}

/// Payload segment of the access token
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Body of `POST /login`. Success carries `access_token`, failure carries `detail`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
