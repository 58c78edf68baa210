//! Error types for grammar loading, argument matching, and value access.
//!
//! Provides a unified error type covering every failure mode of the parser:
//! I/O and configuration, malformed grammar lines, matching failures,
//! constraint violations, and typed access.

use thiserror::Error;

use crate::validate::ConstraintError;

/// Errors that can occur while loading a grammar or parsing arguments.
#[derive(Debug, Error)]
pub enum ArgError {
    /// File I/O failure while reading a grammar or configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A grammar line does not follow the option declaration syntax.
    ///
    /// `line` is 1-based; `text` is the line exactly as it was read.
    #[error("grammar error on line {line}: '{text}'")]
    Grammar { line: usize, text: String },

    /// A grammar line declares a parameter pattern that is not a valid regex.
    #[error("grammar error on line {line}: invalid pattern <{pattern}>: {reason}")]
    InvalidPattern {
        line: usize,
        pattern: String,
        reason: String,
    },

    /// The same spelling is declared more than once.
    #[error("grammar error on line {line}: option '{spelling}' is already declared")]
    DuplicateSpelling { line: usize, spelling: String },

    /// An option that takes a value was the last argument.
    #[error("missing parameter for option '{option}'")]
    MissingParameter { option: String },

    /// A supplied value does not match the option's declared pattern.
    #[error("bad argument for option '{option}': expected <{expected}>, got '{actual}'")]
    BadArgument {
        option: String,
        expected: String,
        actual: String,
    },

    /// Mandatory presence or group constraint violated.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// The requested key is not a declared spelling.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// Strict access to an option that captured no values.
    #[error("option '{0}' was not supplied")]
    NotPresent(String),

    /// A captured value could not be converted to the requested type.
    #[error("cannot convert value '{value}' of option '{option}' to {target}: {reason}")]
    Conversion {
        option: String,
        value: String,
        target: &'static str,
        reason: String,
    },
}

/// Convenience alias for results with [`ArgError`].
pub type Result<T> = std::result::Result<T, ArgError>;
