//! # App Error Type
//!
//! Everything that can stop the demo driver.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  AppConfig::load ── io / toml / validation ──► AppError::Config        │
//! │  demo::run       ── CoreError ───────────────► AppError::Core          │
//! │                  ── stdout write ────────────► AppError::Io            │
//! │                  ── JSON report ─────────────► AppError::Json          │
//! │                                                                         │
//! │  main() prints `error[CODE]: message` to stderr, exits with failure    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use orderdesk_core::{ConfigError, CoreError};

#[derive(Debug, Error)]
pub enum AppError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Short machine-readable code for the stderr line.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ReadConfig { .. } | AppError::Config(_) => "CONFIG",
            AppError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            AppError::Core(CoreError::InsufficientStock { .. }) => "INSUFFICIENT_STOCK",
            AppError::Core(_) => "ORDER_ERROR",
            AppError::Io(_) => "IO",
            AppError::Json(_) => "SERIALIZATION",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::ValidationError;

    #[test]
    fn test_error_codes() {
        let err: AppError = CoreError::NoOrders.into();
        assert_eq!(err.code(), "ORDER_ERROR");

        let err: AppError = CoreError::InsufficientStock {
            product: "Laptop".to_string(),
            available: 1,
            requested: 2,
        }
        .into();
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");

        let err: AppError = ConfigError::Invalid(ValidationError::Required {
            field: "tax_rate".to_string(),
        })
        .into();
        assert_eq!(err.code(), "CONFIG");
    }

    #[test]
    fn test_core_message_passes_through() {
        let err: AppError = CoreError::NoOrders.into();
        assert_eq!(err.to_string(), "No orders have been processed");
    }
}
