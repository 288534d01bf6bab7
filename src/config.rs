//! Configuration file support
//!
//! Every setting has a default, so a user file only needs the keys it
//! changes. The defaults are also available as a commented TOML document
//! (`design-snippets --print-config`).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Alias resolution limits
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Maximum number of alias hops before resolution fails
    pub max_alias_depth: usize,
    pub color: ColorOptions,
}

/// Multipliers applied to color channels before truncation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
    pub channel_multiplier: f64,
    pub alpha_multiplier: f64,
}

/// Timeout and retry policy for document fetches
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub timeout_ms: u64,
    /// Extra attempts after the first failure
    pub retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Raw snippet text
    Plain,
    /// One `div` per line, for a preview surface
    Html,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub mode: OutputMode,
    /// Inserted between the snippets of consecutive entries
    pub separator: String,
    /// Prefix for CSS class names in HTML output
    pub class_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypographyOptions {
    /// Name of the frame holding one child frame per text style
    pub styles_frame: String,
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolve: ResolveOptions,
    pub fetch: FetchOptions,
    pub output: OutputOptions,
    pub typography: TypographyOptions,
}

/// Default configuration
const DEFAULT_CONFIG: &str = r#"
[resolve]
max_alias_depth = 16

[resolve.color]
# Non-alpha channels are stored as 0..1 and printed as 0..255.
channel_multiplier = 255.0
# Alpha is printed unscaled. Both values are truncated toward zero.
alpha_multiplier = 1.0

[fetch]
timeout_ms = 5000
retries = 2

[output]
mode = "plain"
separator = "\n\n"
class_prefix = "snip-"

[typography]
styles_frame = "All Styles"
"#;

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            channel_multiplier: 255.0,
            alpha_multiplier: 1.0,
        }
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_alias_depth: 16,
            color: ColorOptions::default(),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            retries: 2,
        }
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Plain,
            separator: "\n\n".to_string(),
            class_prefix: "snip-".to_string(),
        }
    }
}

impl Default for TypographyOptions {
    fn default() -> Self {
        Self {
            styles_frame: "All Styles".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded default configuration, as TOML
    pub fn default_toml() -> &'static str {
        DEFAULT_CONFIG
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the alias hop limit
    pub fn with_max_alias_depth(mut self, depth: usize) -> Self {
        self.resolve.max_alias_depth = depth;
        self
    }

    /// Set the output mode
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output.mode = mode;
        self
    }

    /// Set the fetch policy
    pub fn with_fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }
}
