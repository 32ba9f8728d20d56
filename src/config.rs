use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Engine configuration supplied by the caller alongside the raw extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Subject identifier used when the raw data carries none
    #[serde(default = "default_subject_id")]
    pub default_subject_id: String,
    /// ISO 4217 currency code applied to monetary fields
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_subject_id() -> String {
    "subject-unknown".to_string()
}

fn default_currency_code() -> String {
    "GBP".to_string()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_subject_id: default_subject_id(),
            currency_code: default_currency_code(),
        }
    }
}

impl NormalizerConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config = toml::from_str(&data)?;
        Ok(config)
    }
}

/// Optional capture-context metadata passed through from the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    pub site_name: String,
    pub subject_name: Option<String>,
    pub report_date: Option<String>,
    #[serde(default)]
    pub providers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = NormalizerConfig::default();
        assert_eq!(config.default_subject_id, "subject-unknown");
        assert_eq!(config.currency_code, "GBP");
    }

    #[test]
    fn test_config_from_toml() {
        let parsed: NormalizerConfig =
            toml::from_str("default_subject_id = \"subj-1\"\ncurrency_code = \"EUR\"").unwrap();
        assert_eq!(parsed.default_subject_id, "subj-1");
        assert_eq!(parsed.currency_code, "EUR");
    }

    #[test]
    fn test_config_partial_toml_uses_defaults() {
        let parsed: NormalizerConfig = toml::from_str("currency_code = \"USD\"").unwrap();
        assert_eq!(parsed.default_subject_id, "subject-unknown");
        assert_eq!(parsed.currency_code, "USD");
    }
}
