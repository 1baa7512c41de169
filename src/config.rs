//! Runtime configuration read from `BLOCKFALL_*` environment variables.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::types::DEFAULT_PREVIEW;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const GRAVITY_VAR: &str = "BLOCKFALL_GRAVITY_MS";
pub const PREVIEW_VAR: &str = "BLOCKFALL_PREVIEW";
pub const GHOST_VAR: &str = "BLOCKFALL_GHOST";

pub const DEFAULT_GRAVITY_MS: u64 = 1000;
pub const MAX_PREVIEW: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed bag seed; restarts reuse it. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Milliseconds between gravity steps, `0` disables gravity.
    pub gravity_ms: u64,
    /// Upcoming kinds shown, `1..=MAX_PREVIEW`.
    pub preview: usize,
    pub ghost: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            gravity_ms: DEFAULT_GRAVITY_MS,
            preview: DEFAULT_PREVIEW,
            ghost: true,
        }
    }
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name → value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut config = Self::default();

        if let Some(s) = var(SEED_VAR) {
            let seed = s
                .parse::<u64>()
                .with_context(|| format!("{SEED_VAR}={s:?} is not an unsigned integer"))?;
            config.seed = Some(seed);
        }

        if let Some(s) = var(GRAVITY_VAR) {
            config.gravity_ms = s
                .parse::<u64>()
                .with_context(|| format!("{GRAVITY_VAR}={s:?} is not a number of milliseconds"))?;
        }

        if let Some(s) = var(PREVIEW_VAR) {
            let preview = s
                .parse::<usize>()
                .with_context(|| format!("{PREVIEW_VAR}={s:?} is not a count"))?;
            config.preview = preview.clamp(1, MAX_PREVIEW);
        }

        if let Some(s) = var(GHOST_VAR) {
            config.ghost = match s.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                _ => anyhow::bail!("{GHOST_VAR}={s:?} is not a boolean"),
            };
        }

        Ok(config)
    }

    /// Gravity interval, or `None` when gravity is off.
    pub fn gravity(&self) -> Option<Duration> {
        (self.gravity_ms > 0).then(|| Duration::from_millis(self.gravity_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.gravity(), Some(Duration::from_millis(1000)));
        assert_eq!(config.preview, 3);
        assert!(config.ghost);
    }

    #[test]
    fn test_all_variables() {
        let config = config(&[
            (SEED_VAR, "12345"),
            (GRAVITY_VAR, "250"),
            (PREVIEW_VAR, "5"),
            (GHOST_VAR, "false"),
        ])
        .unwrap();
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.gravity_ms, 250);
        assert_eq!(config.preview, 5);
        assert!(!config.ghost);
    }

    #[test]
    fn test_zero_gravity_disables() {
        let config = config(&[(GRAVITY_VAR, "0")]).unwrap();
        assert_eq!(config.gravity(), None);
    }

    #[test]
    fn test_preview_is_clamped() {
        assert_eq!(config(&[(PREVIEW_VAR, "0")]).unwrap().preview, 1);
        assert_eq!(config(&[(PREVIEW_VAR, "99")]).unwrap().preview, MAX_PREVIEW);
    }

    #[test]
    fn test_blank_is_unset() {
        assert_eq!(config(&[(SEED_VAR, "  ")]).unwrap().seed, None);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        let err = config(&[(SEED_VAR, "abc")]).unwrap_err();
        assert!(err.to_string().contains(SEED_VAR));
        assert!(config(&[(GRAVITY_VAR, "-5")]).is_err());
        assert!(config(&[(PREVIEW_VAR, "many")]).is_err());
        assert!(config(&[(GHOST_VAR, "maybe")]).is_err());
    }
}
