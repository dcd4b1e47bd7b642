use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid language '{id}' in config file at {config_path}: {reason}")]
    InvalidLanguage {
        config_path: PathBuf,
        id: String,
        reason: &'static str,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory opened when no path is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,

    /// Extra languages, or replacements for built-in ones with the same id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<LanguageConfig>,
}

/// Comment syntax for one language, as written in the config file.
///
/// ```toml
/// [[languages]]
/// id = "mylang"
/// extensions = ["ml2"]
/// inline = [";;"]
/// block = [["(*", "*)"]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub id: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub inline: Vec<String>,
    /// `[open, close]` pairs.
    #[serde(default)]
    pub block: Vec<[String; 2]>,
}

impl LanguageConfig {
    fn validate(&self) -> Result<(), &'static str> {
        if self.id.trim().is_empty() {
            return Err("id must not be empty");
        }
        if self.inline.iter().any(String::is_empty)
            || self.block.iter().flatten().any(String::is_empty)
        {
            return Err("delimiters must not be empty");
        }
        if self.inline.is_empty() && self.block.is_empty() {
            return Err("at least one inline or block delimiter is required");
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        for language in &config.languages {
            language
                .validate()
                .map_err(|reason| ConfigError::InvalidLanguage {
                    config_path: config_path.to_path_buf(),
                    id: language.id.clone(),
                    reason,
                })?;
        }

        // Expand shell variables and tilde in the loaded project path
        config.project_path = config
            .project_path
            .map(|p| Self::expand_path(&p).unwrap_or(p));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/codechat");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
