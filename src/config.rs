//! Test configuration.
//!
//! Configuration can be built in code or read from JSON:
//!
//! ```json
//! { "parallel": true, "threads": 8, "deadline_ms": 60000, "normalize": true }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use crate::error::{Result, WeatError};
use crate::stats::PermutationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for one WEAT run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatConfig {
    /// Enumerate partitions in parallel.
    pub parallel: bool,
    /// Worker threads for parallel enumeration; `None` uses rayon's global pool.
    pub threads: Option<usize>,
    /// Abort the permutation test after this many milliseconds.
    pub deadline_ms: Option<u64>,
    /// Scale loaded vectors to unit length.
    pub normalize: bool,
}

impl Default for WeatConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            deadline_ms: None,
            normalize: true,
        }
    }
}

impl WeatConfig {
    /// Parse a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WeatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject settings that cannot be honored.
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(WeatError::InputValidation(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Enumeration settings for the permutation test.
    pub fn permutation_options(&self) -> PermutationOptions {
        PermutationOptions {
            parallel: self.parallel,
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WeatConfig::default();
        assert!(!config.parallel);
        assert!(config.normalize);
        assert_eq!(config.permutation_options(), PermutationOptions::default());
    }

    #[test]
    fn test_partial_json() {
        let config = WeatConfig::from_json_str(r#"{"parallel": true, "deadline_ms": 250}"#).unwrap();
        assert!(config.parallel);
        assert!(config.normalize);
        assert_eq!(config.threads, None);
        assert_eq!(
            config.permutation_options().deadline,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            WeatConfig::from_json_str(r#"{"paralel": true}"#),
            Err(WeatError::JsonParse(_))
        ));
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(
            WeatConfig::from_json_str(r#"{"threads": 0}"#),
            Err(WeatError::InputValidation(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"threads": 2, "normalize": false}}"#).unwrap();
        let config = WeatConfig::from_path(file.path()).unwrap();
        assert_eq!(config.threads, Some(2));
        assert!(!config.normalize);
    }
}
