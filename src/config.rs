use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Name of the config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rs2html.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
    pub highlight: HighlightConfig,
}

/// Discovery settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub recursive: bool,
    /// Globs matched against paths relative to the scanned root
    pub exclude: Vec<String>,
    /// Extra filename patterns, consulted before the built-in ones
    pub patterns: Vec<PatternConfig>,
}

/// A user-declared filename pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub pattern: String,
    /// Syntax name or extension; plain text when absent
    #[serde(default)]
    pub language: Option<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub style: String,
    /// Default output file is `<dirname>_<suffix>.html`
    pub suffix: String,
    /// Value of the document's `lang` attribute
    pub lang: String,
}

/// Highlighting backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Language used for files no pattern claims
    pub default_language: String,
    /// Folder of extra `.sublime-syntax` definitions
    pub syntax_dir: Option<PathBuf>,
    /// Folder of extra `.tmTheme` themes
    pub theme_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            style: crate::highlight::DEFAULT_THEME.to_string(),
            suffix: "rust".to_string(),
            lang: "en".to_string(),
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            default_language: "Rust".to_string(),
            syntax_dir: None,
            theme_dir: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config for a run: an explicit path must load, the
    /// default file is used only when it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Like [`Config::discover`], but a config that fails to load is
    /// reported and replaced by defaults
    pub fn discover_or_default(explicit: Option<&Path>) -> Self {
        Self::discover(explicit).unwrap_or_else(|e| {
            warn!("Ignoring config: {}", e);
            Self::default()
        })
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, style: Option<String>, recursive: bool, exclude: Vec<String>) {
        if let Some(style) = style {
            self.output.style = style;
        }

        if recursive {
            self.discovery.recursive = true;
        }

        if !exclude.is_empty() {
            self.discovery.exclude.extend(exclude);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.suffix.trim().is_empty() {
            return Err(Error::config_validation("output suffix must not be empty"));
        }

        if self.output.style.trim().is_empty() {
            return Err(Error::config_validation("style must not be empty"));
        }

        if self.highlight.default_language.trim().is_empty() {
            return Err(Error::config_validation("default_language must not be empty"));
        }

        if self.discovery.patterns.iter().any(|p| p.pattern.trim().is_empty()) {
            return Err(Error::config_validation("file patterns must not be empty"));
        }

        for pattern in &self.discovery.exclude {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}
