//! Wire DTOs for the backend auth endpoints. Token fields are snake_case on
//! this surface, unlike the camelCase domain payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::{Role, User};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub phone: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// `POST /auth/login` success body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// `POST /auth/register` success body. The user record itself is not echoed
/// back; only the new account id and an optional confirmation message.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/refresh-token` success body. The refresh token is only
/// present when the backend rotates it.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error body shared by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Claims embedded in the bearer token the OAuth redirect delivers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CallbackClaims {
    /// Issue time as a proper timestamp; the account creation date shown in
    /// the UI is derived from this.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.iat, 0).unwrap_or_else(Utc::now)
    }

    /// Whether the federated account already carries the profile fields the
    /// dashboard needs. Incomplete profiles get routed to a completion form.
    pub fn profile_complete(&self) -> bool {
        self.username.is_some() && self.phone.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_response_tolerates_missing_rotation() {
        let resp: RefreshResponse = serde_json::from_str(r#"{"access_token":"t2"}"#).unwrap();
        assert_eq!(resp.access_token, "t2");
        assert!(resp.refresh_token.is_none());
    }

    #[test]
    fn callback_claims_derive_issue_time() {
        let claims: CallbackClaims = serde_json::from_str(
            r#"{"sub":"u1","email":"a@b.com","role":"CLIENT","iat":1700000000,"refreshToken":"r1"}"#,
        )
        .unwrap();
        assert_eq!(claims.issued_at().timestamp(), 1_700_000_000);
        assert!(!claims.profile_complete());
    }
}
