//! Herald configuration.
//!
//! Optional. Loaded from `--config` / `HERALD_CONFIG`, or from
//! `<config dir>/herald/config.toml` when that file exists. Action inputs
//! take precedence over anything set here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::Markup;

/// Errors that can occur loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Herald configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub message: MessageConfig,
}

/// Where messages go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SlackConfig {
    /// Channel name or ID. `SLACK_CHANNEL` overrides it.
    pub channel: Option<String>,

    /// Web API base URL. `SLACK_API_URL` overrides it.
    pub api_url: Option<String>,
}

/// Message defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MessageConfig {
    pub text: Option<String>,
    pub fields: Option<Vec<String>>,
    pub field_type: Option<Markup>,
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// if present, and an empty config otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The default config file path: `<config dir>/herald/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("herald").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn parses_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[slack]
channel = "deployments"
api-url = "https://slack.example.com/api"

[message]
text = "Deploy {GITHUB_REF} by {GITHUB_ACTOR}"
fields = ["{STATUS}", "Env: production"]
field-type = "plain_text"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.slack.channel.as_deref(), Some("deployments"));
        assert_eq!(
            config.slack.api_url.as_deref(),
            Some("https://slack.example.com/api")
        );
        assert_eq!(
            config.message.fields,
            Some(vec!["{STATUS}".to_string(), "Env: production".to_string()])
        );
        assert_eq!(config.message.field_type, Some(Markup::PlainText));
    }

    #[test]
    fn sections_are_optional() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[slack]\nchannel = \"ci\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.message, MessageConfig::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[slack]\ntoken = \"xoxb-secret\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("failed to read "));
    }
}
