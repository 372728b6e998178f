use anyhow::{Context, Result};
use std::env;

use crate::api_connection::endpoints::DEFAULT_GEMINI_MODEL;

pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";
pub const LOG_LEVEL_ENV_VAR: &str = "FRIDGE_MENU_LOG";
pub const PROMPT_CAP_ENV_VAR: &str = "FRIDGE_MENU_PROMPT_CAP";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PROMPT_CAP: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Only needed for the AI suggestion commands.
    pub api_key: Option<String>,
    pub model: String,
    pub log_level: String,
    /// Most ingredient names sent in one prompt.
    pub prompt_ingredient_cap: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            prompt_ingredient_cap: DEFAULT_PROMPT_CAP,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let prompt_ingredient_cap = match non_empty(PROMPT_CAP_ENV_VAR) {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("{} must be a positive integer, got '{}'", PROMPT_CAP_ENV_VAR, raw))?,
            None => defaults.prompt_ingredient_cap,
        };
        if prompt_ingredient_cap == 0 {
            anyhow::bail!("{} must be greater than zero", PROMPT_CAP_ENV_VAR);
        }

        Ok(Self {
            api_key: non_empty(API_KEY_ENV_VAR),
            model: non_empty(MODEL_ENV_VAR).unwrap_or(defaults.model),
            log_level: non_empty(LOG_LEVEL_ENV_VAR).unwrap_or(defaults.log_level),
            prompt_ingredient_cap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() -> Result<()> {
        let config = AppConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_reads_overrides() -> Result<()> {
        let config = AppConfig::from_lookup(lookup(&[
            (API_KEY_ENV_VAR, "AIzaSyA1234567890abcdefgh"),
            (MODEL_ENV_VAR, "gemini-2.0-flash"),
            (PROMPT_CAP_ENV_VAR, "8"),
            (LOG_LEVEL_ENV_VAR, " "),
        ]))?;
        assert_eq!(config.api_key.as_deref(), Some("AIzaSyA1234567890abcdefgh"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.prompt_ingredient_cap, 8);
        assert_eq!(config.log_level, "info");
        Ok(())
    }

    #[test]
    fn test_rejects_bad_prompt_cap() {
        assert!(AppConfig::from_lookup(lookup(&[(PROMPT_CAP_ENV_VAR, "many")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(PROMPT_CAP_ENV_VAR, "0")])).is_err());
    }
}
