use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::citation::HighlightStyle;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Where and how cleaned files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Highlight markup for annotated previews
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Before/after preview report settings
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Upload service settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Appended to the input file stem, e.g. `report_cleaned.html`
    #[serde(default = "default_output_suffix")]
    pub suffix: String,

    /// Directory for cleaned files; next to the input when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_output_suffix(),
            output_dir: None,
        }
    }
}

/// Highlight settings for annotated output
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HighlightConfig {
    /// CSS class of highlight spans
    #[serde(default = "default_highlight_class")]
    pub class_name: String,

    /// Tooltip prefix for highlighted markers
    #[serde(default = "default_tooltip_prefix")]
    pub tooltip_prefix: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            class_name: default_highlight_class(),
            tooltip_prefix: default_tooltip_prefix(),
        }
    }
}

impl From<&HighlightConfig> for HighlightStyle {
    fn from(config: &HighlightConfig) -> Self {
        Self {
            class_name: config.class_name.clone(),
            tooltip_prefix: config.tooltip_prefix.clone(),
        }
    }
}

/// Preview report settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreviewConfig {
    /// Spaces per nesting level when re-indenting source for display
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
        }
    }
}

/// Upload service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory cleaned uploads are stored in
    #[serde(default = "default_server_output_dir")]
    pub output_dir: PathBuf,

    /// Largest accepted upload body in bytes; 0 removes the limit
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            output_dir: default_server_output_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_output_suffix() -> String {
    "_cleaned".to_string()
}

fn default_highlight_class() -> String {
    "cite-highlight".to_string()
}

fn default_tooltip_prefix() -> String {
    "Citation marker".to_string()
}

fn default_indent_width() -> usize {
    2
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_server_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

// Exports with inline images easily pass axum's 2 MB default
fn default_max_upload_bytes() -> usize {
    64 * 1024 * 1024
}

/// Longest indent accepted for previews
const MAX_INDENT_WIDTH: usize = 16;

impl Config {
    /// Load the configuration at `path`, writing a default one first if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let suffix = &self.output.suffix;
        if suffix.is_empty() {
            return Err(anyhow!("Output suffix must not be empty"));
        }
        if suffix.contains(['/', '\\']) || suffix.contains("..") {
            return Err(anyhow!("Output suffix must not contain path separators: {}", suffix));
        }

        let class_name = &self.highlight.class_name;
        let valid_class = class_name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && class_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_class {
            return Err(anyhow!("Invalid highlight class name: '{}'", class_name));
        }

        if self.preview.indent_width > MAX_INDENT_WIDTH {
            return Err(anyhow!(
                "Preview indent width {} exceeds the maximum of {}",
                self.preview.indent_width,
                MAX_INDENT_WIDTH
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(anyhow!("Server host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(anyhow!("Server port must be non-zero"));
        }

        Ok(())
    }

    /// Highlight style derived from the `highlight` section
    pub fn highlight_style(&self) -> HighlightStyle {
        HighlightStyle::from(&self.highlight)
    }
}
