//! Configuration management for docforge.
//!
//! Parses `docforge.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [content]
//! list_separator = ", "
//!
//! [merge]
//! strategies = ["same-class-name", "default"]
//!
//! [[platforms]]
//! name = "jvmMain"
//! platform = "jvm"
//! targets = ["jvm"]
//! ```
//!
//! Every section is optional; missing values fall back to defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use docforge_model::{Platform, PlatformData, PlatformSet, UnknownPlatform};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docforge.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content builder defaults.
    pub content: ContentConfig,
    /// Page merging configuration.
    pub merge: MergeConfig,
    /// Platforms declared for the documented project.
    platforms: Vec<PlatformEntry>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content builder defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Separator placed between list elements when none is given.
    pub list_separator: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            list_separator: ", ".to_owned(),
        }
    }
}

/// Page merging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Strategies tried, in order, for pages whose names clash.
    pub strategies: Vec<MergeStrategyName>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            strategies: vec![MergeStrategyName::SameClassName, MergeStrategyName::Default],
        }
    }
}

/// Known page merging strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategyName {
    /// Merge class-like pages that share a name into one page.
    SameClassName,
    /// Keep clashing pages as they are and warn.
    Default,
}

/// Platform declaration as written in TOML.
#[derive(Debug, Deserialize)]
struct PlatformEntry {
    name: String,
    platform: String,
    targets: Option<Vec<String>>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Platform key not recognized.
    #[error("Platform `{name}`: {source}")]
    UnknownPlatform {
        /// Declared platform name.
        name: String,
        source: UnknownPlatform,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docforge.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Validation`/`ConfigError::UnknownPlatform` for invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolved platform declarations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPlatform` if a declaration names an
    /// unsupported platform.
    pub fn platform_data(&self) -> Result<PlatformSet, ConfigError> {
        self.platforms.iter().map(PlatformEntry::resolve).collect()
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_platforms()?;
        if self.merge.strategies.is_empty() {
            return Err(ConfigError::Validation(
                "merge.strategies cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_platforms(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.platforms {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "platforms.name cannot be empty".to_owned(),
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "platform `{}` is declared more than once",
                    entry.name
                )));
            }
            entry.resolve()?;
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}

impl PlatformEntry {
    fn resolve(&self) -> Result<PlatformData, ConfigError> {
        let platform: Platform = match self.platform.parse() {
            Ok(platform) => platform,
            Err(source) => {
                return Err(ConfigError::UnknownPlatform {
                    name: self.name.clone(),
                    source,
                });
            }
        };
        let data = PlatformData::new(self.name.clone(), platform);
        Ok(match &self.targets {
            Some(targets) => data.with_targets(targets.iter().cloned()),
            None => data,
        })
    }
}
