use error_set::error_set;
use serde_json::Value;

pub mod config;
pub mod markdown;
pub mod render;
pub mod sanitize;

pub use config::{Config, ConfigError, OutputFormat};
pub use markdown::{LineKind, ParsedLine, Section, SectionKind, classify_line, split_into_sections};
pub use render::{RenderError, Renderer};

error_set! {
    /// Top-level error for eula-diff operations
    EulaDiffError := {
        #[display("Failed to read {source_name}: {message}")]
        ReadInput { source_name: String, message: String },
        #[display("Input is not valid JSON: {message}")]
        InvalidJson { message: String },
        ConfigError(ConfigError),
        RenderError(RenderError),
    }
}

/// A parsed comparison document
///
/// # Examples
/// ```
/// # use eula_diff::{Comparison, SectionKind};
/// # use eula_diff::render::TerminalRenderer;
/// let raw = r"- old clause\n+ new clause$#69#$The clause changed.";
/// let comparison = Comparison::from_raw(raw);
/// assert_eq!(comparison.sections().len(), 2);
/// assert_eq!(comparison.sections()[1].kind, SectionKind::Understanding);
///
/// let renderer = TerminalRenderer { color: false, ..Default::default() };
/// let text = comparison.render(&renderer).unwrap();
/// assert!(text.starts_with("- old clause\n+ new clause\n"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    sections: Vec<Section>,
}

impl Comparison {
    /// Parse an already sanitized document
    pub fn parse(document: &str) -> Self {
        Self {
            sections: split_into_sections(document),
        }
    }

    /// Sanitize raw payload text, then parse it
    pub fn from_raw(raw: &str) -> Self {
        Self::parse(&sanitize::sanitize_markdown(raw))
    }

    /// Extract the document from a JSON API response, then parse it
    pub fn from_response(response: &Value) -> Self {
        Self::parse(&sanitize::extract_markdown(response))
    }

    /// Parse JSON response text
    ///
    /// # Errors
    ///
    /// Returns [`EulaDiffError::InvalidJson`] if `text` is not JSON.
    pub fn from_json_str(text: &str) -> Result<Self, EulaDiffError> {
        let response: Value =
            serde_json::from_str(text).map_err(|e| EulaDiffError::InvalidJson {
                message: e.to_string(),
            })?;
        Ok(Self::from_response(&response))
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &R) -> Result<String, RenderError> {
        renderer.render(&self.sections)
    }
}
