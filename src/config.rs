//! Rendering preferences.
//!
//! Settings come from `eula-diff.toml` in the working directory, or from a
//! file named on the command line. Every key is optional.
//!
//! ```toml
//! format = "terminal"          # terminal | html | json
//! color = true
//! wrap_width = 100
//! understanding_title = "AI Understanding"
//! ```

use crate::render::{HtmlRenderer, JsonRenderer, Renderer, TerminalRenderer};
use error_set::error_set;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "eula-diff.toml";

error_set! {
    /// Errors from loading configuration
    ConfigError := {
        #[display("Failed to read config '{path}': {message}")]
        ReadFailed { path: String, message: String },
        #[display("Invalid config '{path}': {message}")]
        InvalidToml { path: String, message: String },
    }
}

/// Output format of a rendered comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Html,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub format: OutputFormat,
    /// Color terminal output
    pub color: bool,
    /// Wrap column for understanding text in terminal output; at least 1
    pub wrap_width: usize,
    pub understanding_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Terminal,
            color: true,
            wrap_width: 100,
            understanding_title: "AI Understanding".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not valid TOML
    /// for this structure.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: display.clone(),
            message: e.to_string(),
        })?;
        log::debug!("loading config from {display}");
        Self::from_toml(&text).map_err(|message| ConfigError::InvalidToml {
            path: display,
            message,
        })
    }

    fn from_toml(text: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(text).map_err(|e| e.to_string())?;
        if config.wrap_width == 0 {
            return Err("wrap_width must be at least 1".to_string());
        }
        Ok(config)
    }

    /// Build the renderer for the configured format
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self.format {
            OutputFormat::Terminal => Box::new(TerminalRenderer {
                color: self.color,
                wrap_width: self.wrap_width,
                understanding_title: self.understanding_title.clone(),
            }),
            OutputFormat::Html => Box::new(HtmlRenderer {
                understanding_title: self.understanding_title.clone(),
            }),
            OutputFormat::Json => Box::new(JsonRenderer { pretty: true }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml("format = \"html\"\ncolor = false").unwrap();
        assert_eq!(config.format, OutputFormat::Html);
        assert!(!config.color);
        assert_eq!(config.wrap_width, 100);
        assert_eq!(config.understanding_title, "AI Understanding");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("colour = true").is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Config::from_toml("format = \"pdf\"").is_err());
    }

    #[test]
    fn zero_wrap_width_is_rejected() {
        assert_eq!(
            Config::from_toml("wrap_width = 0"),
            Err("wrap_width must be at least 1".to_string())
        );
        assert_eq!(Config::from_toml("wrap_width = 1").unwrap().wrap_width, 1);
    }

    #[test]
    fn load_zero_wrap_width() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "format = \"terminal\"\nwrap_width = 0").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToml { .. }));
        assert!(err.to_string().contains("wrap_width must be at least 1"));
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wrap_width = 72\nunderstanding_title = \"Notes\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.wrap_width, 72);
        assert_eq!(config.understanding_title, "Notes");
    }

    #[test]
    fn load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }

    #[test]
    fn load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wrap_width = \"wide\"").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidToml { .. })));
    }

    #[test]
    fn renderer_follows_format() {
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };
        let output = config.renderer().render(&[]).unwrap();
        assert_eq!(output, "[]");
    }
}
