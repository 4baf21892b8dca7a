//! Secure token manager for the hosting-platform credential
//!
//! The bearer token is read once at startup and held as a `SecretString` so
//! it cannot end up in `Debug` output. It is handed to the host constructor
//! explicitly; nothing below the CLI reads the environment.

use crate::core::error::ReleaseError;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;

/// Environment variable holding the API token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Held tokens shorter than this are not searched for in printed text
const MIN_MASKED_TOKEN_LEN: usize = 8;

/// Secure token manager for hosting-platform authentication
///
/// # Examples
///
/// ```
/// use ghrelease::security::SecureTokenManager;
/// use std::collections::HashMap;
///
/// let env = HashMap::from([("GITHUB_TOKEN".to_string(), "ghp_abcdef123456".to_string())]);
/// let manager = SecureTokenManager::from_env_map(&env);
/// assert!(manager.has_token());
/// assert_eq!(manager.mask_token("ghp_abcdef123456"), "ghp...456");
/// ```
pub struct SecureTokenManager {
    var_name: &'static str,
    token: Option<SecretString>,
}

impl SecureTokenManager {
    /// Read `GITHUB_TOKEN` from the process environment
    pub fn from_env() -> Self {
        Self::with_token(env::var(GITHUB_TOKEN_ENV).ok())
    }

    /// Read `GITHUB_TOKEN` from an explicit variable map
    pub fn from_env_map(env: &HashMap<String, String>) -> Self {
        Self::with_token(env.get(GITHUB_TOKEN_ENV).cloned())
    }

    fn with_token(value: Option<String>) -> Self {
        let token = value
            .filter(|v| !v.trim().is_empty())
            .map(|v| SecretString::new(v.into()));

        Self {
            var_name: GITHUB_TOKEN_ENV,
            token,
        }
    }

    /// Name of the variable the token is read from
    pub fn token_name(&self) -> &str {
        self.var_name
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Return the token, or a configuration error naming the variable
    pub fn require_token(&self) -> Result<SecretString, ReleaseError> {
        self.token
            .as_ref()
            .map(|token| SecretString::new(token.expose_secret().into()))
            .ok_or_else(|| ReleaseError::config(format!("no env var {}", self.var_name)))
    }

    /// Masks a token for safe logging
    ///
    /// Shows only the first 3 and last 3 characters for identification purposes.
    /// Tokens shorter than 10 characters are fully masked as "****".
    pub fn mask_token(&self, token: &str) -> String {
        if token.chars().count() < 10 {
            return "****".to_string();
        }

        let prefix: String = token.chars().take(3).collect();
        let suffix: String = token
            .chars()
            .rev()
            .take(3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}...{}", prefix, suffix)
    }

    /// Replace every occurrence of the held token in `text` with its mask
    ///
    /// A very short token would match inside ordinary words, so it is left
    /// alone.
    pub fn mask_token_in_string(&self, text: &str) -> String {
        match &self.token {
            Some(token) if token.expose_secret().chars().count() >= MIN_MASKED_TOKEN_LEN => {
                let token = token.expose_secret();
                text.replace(token, &self.mask_token(token))
            }
            _ => text.to_string(),
        }
    }
}
