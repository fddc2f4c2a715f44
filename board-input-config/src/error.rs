//! Errors of loading a board file.
//!
//! Each error names the file or the TOML key it's about, so that a board
//! author can find the offending line. Errors from the runtime config
//! constructors, such as an invalid battery curve, are carried as
//! [`ConfigError::Validation`] with their own message.

use std::fmt;

/// Error of loading, validating or converting a board file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The board file can't be read
    FileRead { path: String, message: String },
    /// The board file isn't valid TOML
    TomlParse { path: String, message: String },
    /// Merging the built-in defaults with the board file failed
    Merge { message: String },
    /// A section is inconsistent, `field` names the TOML key
    Validation { field: String, message: String },
    /// A section required by another one is missing
    MissingField { field: String },
    /// A key has a value outside of the accepted set
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, message } => {
                write!(f, "Failed to read board file '{}': {}", path, message)
            }
            ConfigError::TomlParse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            ConfigError::Merge { message } => {
                write!(f, "Failed to merge board config with defaults: {}", message)
            }
            ConfigError::Validation { field, message } => {
                write!(f, "Invalid '{}': {}", field, message)
            }
            ConfigError::MissingField { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::InvalidValue {
                field,
                value,
                expected,
            } => {
                write!(f, "Invalid value '{}' for '{}', expected: {}", value, field, expected)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result of loading a board file
pub type ConfigResult<T> = Result<T, ConfigError>;
