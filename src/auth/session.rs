use serde::Serialize;
use uuid::Uuid;

use super::tokens::{TokenIssuer, TokenKind};
use crate::error::AppResult;
use crate::models::User;

/// The account fields a client may see.
#[derive(Debug, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for Account {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct Session {
    pub token_type: &'static str,
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    pub user: Account,
}

impl Session {
    pub fn open(tokens: &TokenIssuer, user: &User) -> AppResult<Self> {
        Ok(Self {
            token_type: "Bearer",
            access_token: tokens.issue(user.id, TokenKind::Access)?,
            refresh_token: tokens.issue(user.id, TokenKind::Refresh)?,
            expires_in: tokens.lifetime(TokenKind::Access).whole_seconds(),
            user: Account::from(user),
        })
    }
}
