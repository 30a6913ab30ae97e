//! Username/password pairs posted to `/auth/register` and `/auth/login`.

use std::fmt;

use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use serde::Deserialize;
use tracing::{error, warn};

use crate::error::{AppError, AppResult};

const MIN_PASSWORD_CHARS: usize = 8;

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9@.+_-]{1,150}$").unwrap();
}

#[derive(Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    #[cfg(test)]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The submitted username without surrounding whitespace.
    pub fn username(&self) -> &str {
        self.username.trim()
    }

    /// Rules a new account has to meet. Login does not re-check them.
    pub fn check_new_account(&self) -> AppResult<()> {
        if !USERNAME_RE.is_match(self.username()) {
            warn!(username = %self.username(), "invalid username");
            return Err(AppError::validation("Invalid username"));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            warn!(username = %self.username(), "password too short");
            return Err(AppError::validation("Password too short"));
        }
        Ok(())
    }

    /// Salted Argon2 hash of the password in PHC string form.
    pub fn password_hash(&self) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(self.password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow!("argon2 hash: {e}")))
    }

    /// Whether the password matches `stored`. A corrupt stored hash never matches.
    pub fn matches(&self, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(self.password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                error!(error = %e, "stored password hash is unreadable");
                false
            }
        }
    }
}
