//! # App Configuration
//!
//! Pricing rules and output settings for the demo driver.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (`PricingConfig::default()`, text report)
//! 2. Config file (`orderdesk.toml`)
//! 3. Environment variables (`ORDERDESK_*`)
//!
//! ## Config File Location
//! - `ORDERDESK_CONFIG` if set
//! - otherwise `orderdesk.toml` in the platform config directory
//!   (e.g. `~/.config/orderdesk/orderdesk.toml` on Linux)
//!
//! ## Example Config File
//! ```toml
//! report_format = "json"
//!
//! [pricing]
//! tax_rate = 825        # basis points, 8.25%
//! max_discount = 4000
//!
//! [[pricing.volume_bands]]
//! above_quantity = 20
//! discount = 1500
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use orderdesk_core::{ConfigError, PricingConfig, Rate};

use crate::error::{AppError, AppResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ORDERDESK_CONFIG";

// =============================================================================
// Report Format
// =============================================================================

/// How the summary report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report_format: ReportFormat,

    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment and config file.
    pub fn load() -> AppResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an injectable environment lookup.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut config = Self::default();

        let path = lookup(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(&lookup);

        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without validating it.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let config = toml::from_str(contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.pricing.validate().map_err(ConfigError::from)?;
        Ok(())
    }

    /// Applies `ORDERDESK_*` overrides.
    ///
    /// ## Environment Variables
    /// - `ORDERDESK_TAX_RATE`: tax rate as a percentage (e.g. "8.25")
    /// - `ORDERDESK_MAX_DISCOUNT`: discount cap as a percentage (e.g. "40")
    /// - `ORDERDESK_REPORT_FORMAT`: "text" or "json"
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("ORDERDESK_TAX_RATE") {
            match parse_percentage(&value) {
                Some(rate) => {
                    debug!(%rate, "Overriding tax rate from environment");
                    self.pricing.tax_rate = rate;
                }
                None => warn!(value = %value, "Ignoring invalid ORDERDESK_TAX_RATE"),
            }
        }

        if let Some(value) = lookup("ORDERDESK_MAX_DISCOUNT") {
            match parse_percentage(&value) {
                Some(rate) => {
                    debug!(%rate, "Overriding discount cap from environment");
                    self.pricing.max_discount = rate;
                }
                None => warn!(value = %value, "Ignoring invalid ORDERDESK_MAX_DISCOUNT"),
            }
        }

        if let Some(value) = lookup("ORDERDESK_REPORT_FORMAT") {
            match value.parse() {
                Ok(format) => self.report_format = format,
                Err(e) => warn!("{}", e),
            }
        }
    }

    /// `orderdesk.toml` in the platform config directory.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orderdesk", "orderdesk")
            .map(|dirs| dirs.config_dir().join("orderdesk.toml"))
    }
}

/// "8.25" -> 825 bps. Negative and non-numeric input is rejected.
fn parse_percentage(value: &str) -> Option<Rate> {
    let pct = value.trim().trim_end_matches('%').parse::<f64>().ok()?;
    if !pct.is_finite() || pct < 0.0 {
        return None;
    }
    Some(Rate::from_percentage(pct))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!(" JSON ".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("ORDERDESK_TAX_RATE", "8.25"),
            ("ORDERDESK_MAX_DISCOUNT", "40%"),
            ("ORDERDESK_REPORT_FORMAT", "json"),
        ]));

        assert_eq!(config.pricing.tax_rate, Rate::from_bps(825));
        assert_eq!(config.pricing.max_discount, Rate::from_bps(4000));
        assert_eq!(config.report_format, ReportFormat::Json);
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("ORDERDESK_TAX_RATE", "lots"),
            ("ORDERDESK_MAX_DISCOUNT", "-5"),
            ("ORDERDESK_REPORT_FORMAT", "xml"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_toml_file_contents() {
        let config = AppConfig::from_toml_str(
            "report_format = \"json\"\n\n[pricing]\ntax_rate = 825\n",
        )
        .unwrap();
        assert_eq!(config.report_format, ReportFormat::Json);
        assert_eq!(config.pricing.tax_rate, Rate::from_bps(825));
        assert_eq!(
            config.pricing.max_discount,
            PricingConfig::default().max_discount
        );
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = AppConfig::from_toml_str("report_format = 12").unwrap_err();
        assert_eq!(err.code(), "CONFIG");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load_with(env(&[(
            CONFIG_PATH_ENV,
            "/nonexistent/orderdesk/orderdesk.toml",
        )]))
        .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_file_then_env() {
        let path = std::env::temp_dir().join(format!(
            "orderdesk-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[pricing]\ntax_rate = 1000\nmax_discount = 3000\n").unwrap();

        let config = AppConfig::load_with(env(&[
            (CONFIG_PATH_ENV, path.to_str().unwrap()),
            ("ORDERDESK_TAX_RATE", "5"),
        ]))
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.pricing.tax_rate, Rate::from_bps(500));
        assert_eq!(config.pricing.max_discount, Rate::from_bps(3000));
    }

    #[test]
    fn test_env_cannot_sneak_past_validation() {
        let err = AppConfig::load_with(env(&[
            (CONFIG_PATH_ENV, "/nonexistent/orderdesk.toml"),
            ("ORDERDESK_TAX_RATE", "150"),
        ]))
        .unwrap_err();
        assert_eq!(err.code(), "CONFIG");
    }
}
