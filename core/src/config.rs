//! Parser configuration.
//!
//! Controls help dispatch, the optional IOR group policy, and the program
//! name shown in rendered help. Loaded from YAML; every field is optional.
//!
//! # Example YAML
//!
//! ```yaml
//! program_name: convert
//! help_flags:
//!   - --help
//!   - -h
//!   - -?
//! ior_policy: at_least_one
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How numbered IOR groups are validated.
///
/// # Examples
///
/// ```
/// use optgroup_core::IorPolicy;
///
/// assert_eq!(IorPolicy::default(), IorPolicy::Permissive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IorPolicy {
    /// No joint check: members are independent (the default).
    #[default]
    Permissive,
    /// Each numbered IOR group needs at least one member present.
    AtLeastOne,
}

/// Settings for an [`ArgParser`](crate::ArgParser).
///
/// # Examples
///
/// ```
/// use optgroup_core::{IorPolicy, ParserConfig};
///
/// let config: ParserConfig = serde_yaml::from_str("ior_policy: at_least_one").unwrap();
/// assert_eq!(config.ior_policy, IorPolicy::AtLeastOne);
/// assert_eq!(config.help_flags, vec!["--help", "-h"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Program name for the usage line.
    pub program_name: Option<String>,
    /// First-argument tokens that request help instead of parsing.
    pub help_flags: Vec<String>,
    /// IOR group validation policy.
    pub ior_policy: IorPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            program_name: None,
            help_flags: vec!["--help".to_string(), "-h".to_string()],
            ior_policy: IorPolicy::Permissive,
        }
    }
}

impl ParserConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ArgError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::ArgError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ArgError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::ArgError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` if `token` requests help.
    pub fn is_help_flag(&self, token: &str) -> bool {
        self.help_flags.iter().any(|flag| flag == token)
    }

    pub fn with_program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    pub fn with_ior_policy(mut self, policy: IorPolicy) -> Self {
        self.ior_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parser.yaml");

        let config = ParserConfig::default()
            .with_program_name("convert")
            .with_ior_policy(IorPolicy::AtLeastOne);
        config.save(&path).unwrap();

        let loaded = ParserConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: ParserConfig = serde_yaml::from_str("program_name: tool").unwrap();
        assert_eq!(config.program_name.as_deref(), Some("tool"));
        assert!(config.is_help_flag("-h"));
        assert!(config.is_help_flag("--help"));
        assert!(!config.is_help_flag("-?"));
        assert_eq!(config.ior_policy, IorPolicy::Permissive);
    }

    #[test]
    fn test_custom_help_flags_replace_defaults() {
        let config: ParserConfig = serde_yaml::from_str("help_flags: ['-?']").unwrap();
        assert!(config.is_help_flag("-?"));
        assert!(!config.is_help_flag("-h"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ParserConfig::load("/nonexistent/optgroup/parser.yaml").unwrap_err();
        assert!(matches!(err, crate::ArgError::IoError(_)));
    }
}
