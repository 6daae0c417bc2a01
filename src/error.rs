//! Unified error hierarchy for kcalrs
//!
//! The calculators themselves never fail; malformed input degrades to
//! zeros or placeholders. Errors exist only at the edges: config files,
//! the weight store, and CSV import/export.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all kcalrs operations
#[derive(Debug, Error)]
pub enum KcalError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Weight store errors
    #[error("Weight store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found at specified path
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    /// Config file could not be parsed
    #[error("Invalid config at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Config could not be serialized
    #[error("Could not serialize config: {reason}")]
    Serialize { reason: String },

    /// No usable config directory on this system
    #[error("No config directory available")]
    NoConfigDir,
}

/// Weight store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store file could not be parsed
    #[error("Invalid weight store at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// CSV read/write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An entry that cannot be stored
    #[error("Invalid entry: {reason}")]
    InvalidEntry { reason: String },
}

/// Result type alias for kcalrs operations
pub type Result<T> = std::result::Result<T, KcalError>;

impl KcalError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KcalError::Config(ConfigError::NotFound { .. }) => ErrorSeverity::Warning,
            KcalError::Store(StoreError::InvalidEntry { .. }) => ErrorSeverity::Warning,
            KcalError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            KcalError::Config(ConfigError::NotFound { path }) => {
                format!(
                    "No config file at {}. Run `kcal config init` to create one.",
                    path.display()
                )
            }
            KcalError::Config(ConfigError::Parse { path, .. }) => {
                format!(
                    "Config file {} is not valid TOML. Fix it or re-run `kcal config init`.",
                    path.display()
                )
            }
            KcalError::Store(StoreError::Parse { path, .. }) => {
                format!(
                    "Weight log {} is corrupted. Restore it from an export or delete it to start fresh.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
