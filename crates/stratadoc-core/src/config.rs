//! Site configuration (`stratadoc.toml`) parsing and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::routing::Router;

/// File name looked up when no config path is given
pub const CONFIG_FILE: &str = "stratadoc.toml";

/// The complete stratadoc.toml configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Site metadata (required).
    pub site: Site,

    /// Where and how pages are written.
    #[serde(default)]
    pub output: Output,

    /// Location of the documented sources.
    #[serde(default)]
    pub source: Source,

    /// Per-namespace constant definitions.
    #[serde(default)]
    pub constants: Constants,
}

/// Site metadata section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Site {
    /// Title shown on every page (required).
    pub title: String,

    /// Category the documented API belongs to.
    #[serde(default)]
    pub category: Option<String>,

    /// Catalog the documented API is listed in.
    #[serde(default)]
    pub catalog: Option<String>,

    /// Prefix prepended to every route.
    #[serde(default, rename = "base-url")]
    pub base_url: String,
}

/// Output section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Output {
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// File extension of generated pages, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Generate annotated source pages.
    #[serde(default = "default_true", rename = "source-code")]
    pub source_code: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            extension: default_extension(),
            source_code: true,
        }
    }
}

/// Source section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Source {
    /// Base directory that relative file locations are resolved against.
    #[serde(default = "default_source_root")]
    pub root: PathBuf,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            root: default_source_root(),
        }
    }
}

/// Constants section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Constants {
    /// Root directory of the per-namespace constant files.
    #[serde(default = "default_constants_directory")]
    pub directory: PathBuf,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            directory: default_constants_directory(),
        }
    }
}

fn default_destination() -> PathBuf {
    PathBuf::from("docs")
}

fn default_extension() -> String {
    "html".to_string()
}

fn default_true() -> bool {
    true
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_constants_directory() -> PathBuf {
    PathBuf::from("ConstDefs")
}

impl Config {
    /// Configuration with the given title and every other value defaulted.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            site: Site {
                title: title.into(),
                category: None,
                catalog: None,
                base_url: String::new(),
            },
            output: Output::default(),
            source: Source::default(),
            constants: Constants::default(),
        }
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "site.title",
                reason: "title cannot be empty",
            });
        }

        let extension = &self.output.extension;
        if extension.is_empty() {
            return Err(ConfigError::Invalid {
                field: "output.extension",
                reason: "extension cannot be empty",
            });
        }
        if !extension
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ConfigError::Invalid {
                field: "output.extension",
                reason: "extension may only contain lowercase letters and digits",
            });
        }

        Ok(())
    }

    /// Router for the configured base URL and extension
    pub fn router(&self) -> Router {
        Router::new(self.site.base_url.clone(), self.output.extension.clone())
    }
}
