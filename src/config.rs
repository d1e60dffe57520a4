//! Configuration management for the SocialGraph engine
//!
//! Strongly-typed configuration read from environment variables (and a `.env`
//! file when present), with validation and sensible defaults.
//!
//! # Example
//! ```no_run
//! use socialgraph::Config;
//! let config = Config::from_env().expect("failed to load config");
//! println!("Top N: {}", config.ranking.top_n);
//! ```

use crate::error::{Error, Result};
use crate::export::{ExportOptions, DEFAULT_USER_WEIGHT_BASE};
use std::path::PathBuf;
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the cast comes from
    pub scenario: ScenarioConfig,
    /// Export output
    pub export: ExportConfig,
    /// Ranking report
    pub ranking: RankingConfig,
}

/// Scenario source
#[derive(Debug, Clone, Default)]
pub struct ScenarioConfig {
    /// TOML scenario file; the bundled demo is used when unset
    pub path: Option<PathBuf>,
}

/// Export output configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output file; stdout when unset
    pub output_path: Option<PathBuf>,
    /// Pretty-print JSON
    pub pretty: bool,
    /// Per-follower weight step for user nodes
    pub user_weight_base: f64,
}

impl ExportConfig {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            user_weight_base: self.user_weight_base,
        }
    }
}

/// Ranking report configuration
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Number of users/posts listed in the popularity report
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scenario: ScenarioConfig::default(),
            export: ExportConfig {
                output_path: None,
                pretty: true,
                user_weight_base: DEFAULT_USER_WEIGHT_BASE,
            },
            ranking: RankingConfig { top_n: 10 },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore if not found)
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(Error::config(format!("failed to read .env: {}", e))),
        }

        let config = Self {
            scenario: ScenarioConfig::from_env(),
            export: ExportConfig::from_env()?,
            ranking: RankingConfig::from_env()?,
        };

        config.validate()?;
        config.log_summary();

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base = self.export.user_weight_base;
        if !base.is_finite() || base <= 0.0 {
            return Err(Error::InvalidConfig {
                key: "EXPORT_USER_WEIGHT_BASE",
                message: format!("must be a positive number, got {}", base).into(),
            });
        }

        if self.ranking.top_n == 0 {
            return Err(Error::InvalidConfig {
                key: "RANKING_TOP_N",
                message: "must be at least 1".into(),
            });
        }

        Ok(())
    }

    /// Log configuration summary
    fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  Scenario:");
        match &self.scenario.path {
            Some(path) => info!("    File: {}", path.display()),
            None => info!("    File: <bundled demo>"),
        }
        info!("  Export:");
        match &self.export.output_path {
            Some(path) => info!("    Output: {}", path.display()),
            None => info!("    Output: <stdout>"),
        }
        info!("    Pretty: {}", self.export.pretty);
        info!("    User weight base: {}", self.export.user_weight_base);
        info!("  Ranking:");
        info!("    Top N: {}", self.ranking.top_n);
    }
}

impl ScenarioConfig {
    fn from_env() -> Self {
        Self {
            path: get_env_opt("SCENARIO_PATH").map(PathBuf::from),
        }
    }
}

impl ExportConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            output_path: get_env_opt("EXPORT_PATH").map(PathBuf::from),
            pretty: get_env_parsed_or("EXPORT_PRETTY", true)?,
            user_weight_base: get_env_parsed_or(
                "EXPORT_USER_WEIGHT_BASE",
                DEFAULT_USER_WEIGHT_BASE,
            )?,
        })
    }
}

impl RankingConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            top_n: get_env_parsed_or("RANKING_TOP_N", 10)?,
        })
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a non-empty environment variable
fn get_env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get and parse an environment variable, falling back to `default` when unset
fn get_env_parsed_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match get_env_opt(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| Error::InvalidConfig {
            key,
            message: format!("Invalid value '{}': {}", value, e).into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let mut config = Config::default();
        config.export.user_weight_base = 0.0;
        assert!(config.validate().is_err());

        config.export.user_weight_base = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_top_n() {
        let mut config = Config::default();
        config.ranking.top_n = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_parsed_env_fallback_and_error() {
        // Unique keys so parallel tests never race on the same variable
        assert_eq!(get_env_parsed_or("SOCIALGRAPH_TEST_UNSET_KEY", 7usize).unwrap(), 7);

        std::env::set_var("SOCIALGRAPH_TEST_BAD_NUMBER", "seven");
        let err = get_env_parsed_or::<usize>("SOCIALGRAPH_TEST_BAD_NUMBER", 7).unwrap_err();
        assert!(err.to_string().contains("seven"));
        std::env::remove_var("SOCIALGRAPH_TEST_BAD_NUMBER");
    }

    #[test]
    fn test_export_options_follow_config() {
        let mut config = Config::default();
        config.export.user_weight_base = 5.0;
        assert_eq!(config.export.options().user_weight_base, 5.0);
    }
}
