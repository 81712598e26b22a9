use super::{RenderError, Renderer, RowKind, diff_rows, markdown_options};
use crate::markdown::{Section, SectionKind};
use pulldown_cmark::{CowStr, Event, Parser, Tag, TagEnd, html};
use pulldown_cmark_escape as escape;

/// URL schemes a link or image may use; anything else gets an empty target
const SAFE_PROTOCOLS: [&str; 6] = ["http", "https", "mailto", "irc", "ircs", "xmpp"];

/// Renders a comparison as an HTML fragment.
///
/// Diff rows become `div.diff-line.diff-<kind>` elements; understanding
/// sections become `section.understanding` with their markdown rendered.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    pub understanding_title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            understanding_title: "AI Understanding".to_string(),
        }
    }
}

impl HtmlRenderer {
    fn render_diff(&self, out: &mut String, content: &str) {
        out.push_str("<div class=\"diff-block\">\n");
        for row in diff_rows(content) {
            let body = match row.kind {
                RowKind::Blank => "&nbsp;".to_string(),
                RowKind::Removed => format!(
                    "<span class=\"diff-marker\">-</span>{}",
                    inline_html(row.content)
                ),
                RowKind::Added => format!(
                    "<span class=\"diff-marker\">+</span>{}",
                    inline_html(row.content)
                ),
                RowKind::Fence => format!("<code>{}</code>", escaped(row.content)),
                RowKind::Heading => block_html(row.content),
                RowKind::Normal => inline_html(row.content),
            };
            out.push_str(&format!(
                "<div class=\"diff-line diff-{}\">{body}</div>\n",
                row.kind.as_str()
            ));
        }
        out.push_str("</div>\n");
    }

    fn render_understanding(&self, out: &mut String, content: &str) {
        out.push_str("<section class=\"understanding\">\n");
        out.push_str(&format!(
            "<h3 class=\"understanding-title\">{}</h3>\n",
            escaped(&self.understanding_title)
        ));
        out.push_str(&block_html(content));
        out.push_str("\n</section>\n");
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, sections: &[Section]) -> Result<String, RenderError> {
        let mut out = String::from("<div class=\"eula-comparison\">\n");
        for section in sections {
            match section.kind {
                SectionKind::Diff => self.render_diff(&mut out, &section.content),
                SectionKind::Understanding => self.render_understanding(&mut out, &section.content),
            }
        }
        out.push_str("</div>\n");
        Ok(out)
    }
}

/// Markdown rendered without the paragraph wrapper, for use inside a row
fn inline_html(text: &str) -> String {
    let events = Parser::new_ext(text, markdown_options())
        .filter(|event| {
            !matches!(
                event,
                Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
            )
        })
        .map(defuse);
    let mut rendered = String::new();
    html::push_html(&mut rendered, events);
    rendered.trim_end().to_string()
}

fn block_html(text: &str) -> String {
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new_ext(text, markdown_options()).map(defuse));
    rendered.trim_end().to_string()
}

/// Raw HTML is shown as text, and links or images with an unsafe scheme lose
/// their target.
fn defuse(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    }
}

/// Relative URLs are safe; absolute ones must use a scheme from [`SAFE_PROTOCOLS`]
fn is_safe_url(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return true;
    };
    let scheme = &url[..colon];
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    SAFE_PROTOCOLS
        .iter()
        .any(|protocol| scheme.eq_ignore_ascii_case(protocol))
}

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String is infallible
    let _ = escape::escape_html(&mut out, text);
    out
}
