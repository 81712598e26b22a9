use super::{DiffRow, RenderError, Renderer, diff_rows};
use crate::markdown::{Section, SectionKind};
use serde::Serialize;

/// Renders a comparison as a JSON array of sections
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

#[derive(Serialize)]
struct SectionReport<'a> {
    #[serde(rename = "type")]
    kind: SectionKind,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<DiffRow<'a>>>,
}

impl<'a> From<&'a Section> for SectionReport<'a> {
    fn from(section: &'a Section) -> Self {
        Self {
            kind: section.kind,
            content: &section.content,
            rows: section
                .is_diff()
                .then(|| diff_rows(&section.content).collect()),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, sections: &[Section]) -> Result<String, RenderError> {
        let reports: Vec<SectionReport<'_>> = sections.iter().map(SectionReport::from).collect();
        let encoded = if self.pretty {
            serde_json::to_string_pretty(&reports)
        } else {
            serde_json::to_string(&reports)
        };
        encoded.map_err(|e| RenderError::JsonEncode {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::markdown::{DELIMITER, split_into_sections};
    use serde_json::{Value, json};
    use similar_asserts::assert_eq;

    #[test]
    fn sections_with_rows() {
        let doc = format!("- old\n\n+ new{DELIMITER}Why it changed");
        let output = JsonRenderer::default()
            .render(&split_into_sections(&doc))
            .unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "type": "diff",
                    "content": "- old\n\n+ new",
                    "rows": [
                        { "type": "removed", "content": " old" },
                        { "type": "blank", "content": "" },
                        { "type": "added", "content": " new" },
                    ],
                },
                { "type": "understanding", "content": "Why it changed" },
            ])
        );
    }

    #[test]
    fn pretty_output_is_indented() {
        let renderer = JsonRenderer { pretty: true };
        let output = renderer.render(&split_into_sections("#x")).unwrap();
        insta::assert_snapshot!(output, @r##"
        [
          {
            "type": "diff",
            "content": "#x",
            "rows": [
              {
                "type": "heading",
                "content": "#x"
              }
            ]
          }
        ]
        "##);
    }

    #[test]
    fn empty_document_is_empty_array() {
        let output = JsonRenderer::default().render(&[]).unwrap();
        assert_eq!(output, "[]");
    }
}
