//! Error types for profile management

use std::path::PathBuf;
use strmforge_types::Error as StrmforgeError;
use thiserror::Error;

/// Profile error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error when reading profile file
    #[error("I/O error reading profile '{path}': {source}")]
    Io {
        /// Path to the profile file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Profile file parsing error
    #[error("Failed to parse profile '{path}': {message}")]
    Parse {
        /// Path to the profile file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Profile validation error
    #[error("Profile validation failed: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Missing required profile key
    #[error("Missing required profile key: {key}")]
    MissingRequired {
        /// Profile key that is missing
        key: String,
    },

    /// Invalid profile value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Profile key
        key: String,
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// Generic profile error
    #[error("Profile error: {message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        Self::Other {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        Self::Other {
            message: error.to_string(),
        }
    }
}

impl From<ConfigError> for StrmforgeError {
    fn from(error: ConfigError) -> Self {
        StrmforgeError::config(error.to_string())
    }
}

/// Result type for profile operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new missing required error
    pub fn missing_required<S: Into<String>>(key: S) -> Self {
        Self::MissingRequired { key: key.into() }
    }

    /// Create a new invalid value error
    pub fn invalid_value<S: Into<String>>(key: S, message: S) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new other error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
