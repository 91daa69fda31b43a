//! Error types for the Price Adjustment Engine

use serde::Serialize;
use thiserror::Error;

/// Result type for price adjustment operations
pub type Result<T> = std::result::Result<T, AdjustmentError>;

/// Errors that can occur while computing or configuring adjustments
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AdjustmentError {
    /// A calculator input was missing, out of range, or not a recognized value.
    #[error("Validation error on {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdjustmentError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AdjustmentError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AdjustmentError::Validation { .. })
    }

    /// Input field a validation failure refers to
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AdjustmentError::Validation { field, .. } => Some(field),
            AdjustmentError::Config(_) => None,
        }
    }
}

impl From<::config::ConfigError> for AdjustmentError {
    fn from(err: ::config::ConfigError) -> Self {
        AdjustmentError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AdjustmentError {
    fn from(err: toml::ser::Error) -> Self {
        AdjustmentError::Config(err.to_string())
    }
}
