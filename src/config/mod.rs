//! Environment-backed configuration for the invoice API
//!
//! Loaded once by the CLI layer and passed by reference into the pipeline;
//! the pipeline itself never reads process environment state.

use crate::types::{InvsumError, Result};

const API_URL_VAR: &str = "API_URL";
const API_USERNAME_VAR: &str = "API_USERNAME";
const API_PASSWORD_VAR: &str = "API_PASSWORD";

/// Invoice API endpoint and basic-auth credentials.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup.
    ///
    /// Every missing or empty variable is reported in a single error so the
    /// operator can fix them all at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing: Vec<&str> = Vec::new();
        let mut get = |name: &'static str| match lookup(name) {
            Some(value) if !value.is_empty() => Some(value),
            _ => {
                missing.push(name);
                None
            }
        };

        let base_url = get(API_URL_VAR);
        let username = get(API_USERNAME_VAR);
        let password = get(API_PASSWORD_VAR);

        match (base_url, username, password) {
            (Some(base_url), Some(username), Some(password)) => Ok(Self {
                base_url,
                username,
                password,
            }),
            _ => Err(InvsumError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_variables_present() {
        let vars = env(&[
            ("API_URL", "https://api.example.com/invoices?date="),
            ("API_USERNAME", "user"),
            ("API_PASSWORD", "secret"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.base_url, "https://api.example.com/invoices?date=");
        assert_eq!(config.username, "user");
        assert_eq!(config.password, "secret");
    }

    #[test]
    fn test_missing_variables_reported_together() {
        let vars = env(&[("API_URL", "https://api.example.com/")]);
        let err = Config::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("API_USERNAME"));
        assert!(msg.contains("API_PASSWORD"));
        assert!(!msg.contains("API_URL,"));
    }

    #[test]
    fn test_empty_value_treated_as_missing() {
        let vars = env(&[
            ("API_URL", ""),
            ("API_USERNAME", "user"),
            ("API_PASSWORD", "secret"),
        ]);
        let err = Config::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert!(err.to_string().contains("API_URL"));
    }
}
