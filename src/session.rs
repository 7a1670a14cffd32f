//! Ambient session identity.
//!
//! The rating service stores the signed-in user's token, username, and id
//! in cookie-format key/value state written by the host environment. This
//! module only ever reads that state.

use std::path::Path;

/// Username shown when no identity is present.
pub const DEFAULT_USERNAME: &str = "Sign In";

/// File under the data dir holding the cookie string.
const COOKIES_FILE: &str = "cookies.txt";

/// Read-only view of the stored identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    token: String,
    username: Option<String>,
    user_id: String,
}

impl Identity {
    /// Parse a cookie header string (`token=abc; username=kira; user_id=7`).
    ///
    /// Pairs are separated by `;`, keys matched exactly after trimming.
    /// Values keep any embedded `=`. Unknown or malformed pairs are
    /// skipped.
    pub fn parse(cookie_str: &str) -> Self {
        let mut identity = Self::default();
        for pair in cookie_str.split(';') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            match key {
                "token" => identity.token = value.to_string(),
                "username" => identity.username = Some(value.to_string()),
                "user_id" => identity.user_id = value.to_string(),
                _ => {}
            }
        }
        identity
    }

    /// Load the identity from the ambient state under `data_dir`.
    /// A missing or unreadable file yields the signed-out identity.
    pub fn load(data_dir: &Path) -> Self {
        match std::fs::read_to_string(data_dir.join(COOKIES_FILE)) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Display username; [`DEFAULT_USERNAME`] when none is stored.
    /// An explicitly stored empty username is returned as-is.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_signed_in(&self) -> bool {
        !self.token.is_empty()
    }
}
