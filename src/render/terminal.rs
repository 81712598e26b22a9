use super::{RenderError, Renderer, RowKind, diff_rows, markdown_options};
use crate::markdown::{Section, SectionKind};
use colored::{ColoredString, Colorize};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Renders a comparison as (optionally colored) terminal text
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    /// Emit ANSI color codes
    pub color: bool,
    /// Column at which understanding text is wrapped
    pub wrap_width: usize,
    /// Title printed above each understanding section
    pub understanding_title: String,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            color: true,
            wrap_width: 100,
            understanding_title: "AI Understanding".to_string(),
        }
    }
}

impl TerminalRenderer {
    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn render_diff(&self, out: &mut String, content: &str) {
        for row in diff_rows(content) {
            let line = match row.kind {
                RowKind::Blank => String::new(),
                RowKind::Removed => self.paint(&format!("-{}", row.content), |s| s.red()),
                RowKind::Added => self.paint(&format!("+{}", row.content), |s| s.green()),
                RowKind::Fence => self.paint(row.content, |s| s.dimmed()),
                RowKind::Heading => self.paint(row.content, |s| s.bold()),
                RowKind::Normal => row.content.to_string(),
            };
            out.push_str(&line);
            out.push('\n');
        }
    }

    fn render_understanding(&self, out: &mut String, content: &str) {
        let title = format!("── {} ──", self.understanding_title);
        out.push_str(&self.paint(&title, |s| s.cyan().bold()));
        out.push('\n');
        out.push_str(&MarkdownWriter::new(self).write(content));
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, sections: &[Section]) -> Result<String, RenderError> {
        let mut out = String::new();
        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            match section.kind {
                SectionKind::Diff => self.render_diff(&mut out, &section.content),
                SectionKind::Understanding => self.render_understanding(&mut out, &section.content),
            }
        }
        Ok(out)
    }
}

/// Writes markdown commentary as wrapped plain text
struct MarkdownWriter<'r> {
    renderer: &'r TerminalRenderer,
    out: String,
    /// Inline text of the block being built
    line: String,
    /// Open lists; `Some(n)` is an ordered list whose next item is `n`
    lists: Vec<Option<u64>>,
    item_prefix: Option<String>,
    strong: usize,
    emphasis: usize,
    link: Option<String>,
    code_block: bool,
}

impl<'r> MarkdownWriter<'r> {
    fn new(renderer: &'r TerminalRenderer) -> Self {
        Self {
            renderer,
            out: String::new(),
            line: String::new(),
            lists: Vec::new(),
            item_prefix: None,
            strong: 0,
            emphasis: 0,
            link: None,
            code_block: false,
        }
    }

    fn write(mut self, source: &str) -> String {
        for event in Parser::new_ext(source, markdown_options()) {
            self.event(event);
        }
        self.flush();

        let end = self.out.trim_end_matches('\n').len();
        self.out.truncate(end);
        self.out.push('\n');
        self.out
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph | Tag::Heading { .. }) => self.flush(),
            Event::End(TagEnd::Paragraph) => {
                self.flush();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            Event::End(TagEnd::Heading(level)) => {
                let text = format!("{} {}", "#".repeat(heading_depth(level)), self.line.trim());
                self.line.clear();
                self.out.push_str(&self.renderer.paint(&text, |s| s.bold()));
                self.out.push_str("\n\n");
            }
            Event::Start(Tag::List(first)) => {
                self.flush();
                self.lists.push(first);
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                self.flush();
                self.item_prefix = Some(self.next_bullet());
            }
            Event::End(TagEnd::Item) => self.flush(),
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.code_block = false;
                self.out.push('\n');
            }
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Start(Tag::Link { dest_url, .. }) => self.link = Some(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                if let Some(url) = self.link.take() {
                    self.line.push_str(&format!(" ({url})"));
                }
            }
            Event::Start(Tag::TableCell) => {
                if !self.line.is_empty() {
                    self.line.push_str(" | ");
                }
            }
            Event::End(TagEnd::TableHead | TagEnd::TableRow) => self.flush(),
            Event::End(TagEnd::Table) => {
                self.flush();
                self.out.push('\n');
            }
            Event::Text(text) if self.code_block => {
                for code_line in text.lines() {
                    self.out.push_str("    ");
                    self.out.push_str(&self.renderer.paint(code_line, |s| s.dimmed()));
                    self.out.push('\n');
                }
            }
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                let code = format!("`{code}`");
                let painted = self.renderer.paint(&code, |s| s.yellow());
                self.line.push_str(&painted);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.line.push_str(&html),
            Event::SoftBreak => self.line.push(' '),
            Event::HardBreak => self.line.push('\n'),
            Event::Rule => {
                self.flush();
                let rule = "─".repeat(self.renderer.wrap_width.min(40));
                self.out.push_str(&self.renderer.paint(&rule, |s| s.dimmed()));
                self.out.push_str("\n\n");
            }
            Event::TaskListMarker(done) => self.line.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if !self.renderer.color {
            self.line.push_str(text);
            return;
        }
        let mut styled: ColoredString = text.normal();
        if self.strong > 0 {
            styled = styled.bold();
        }
        if self.emphasis > 0 {
            styled = styled.italic();
        }
        self.line.push_str(&styled.to_string());
    }

    fn next_bullet(&mut self) -> String {
        match self.lists.last_mut() {
            Some(Some(number)) => {
                let bullet = format!("{number}. ");
                *number += 1;
                bullet
            }
            _ => "• ".to_string(),
        }
    }

    /// Wrap the pending inline text into the output as one block
    fn flush(&mut self) {
        let text = self.line.trim().to_string();
        self.line.clear();
        if text.is_empty() {
            return;
        }

        let indent = "  ".repeat(self.lists.len().saturating_sub(1));
        let (first, rest) = match self.item_prefix.take() {
            Some(bullet) => {
                let first = format!("{indent}{bullet}");
                let rest = " ".repeat(first.chars().count());
                (first, rest)
            }
            None if !self.lists.is_empty() => {
                let pad = format!("{indent}  ");
                (pad.clone(), pad)
            }
            None => (String::new(), String::new()),
        };

        let options = textwrap::Options::new(self.renderer.wrap_width)
            .initial_indent(&first)
            .subsequent_indent(&rest)
            .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
        self.out.push_str(&textwrap::fill(&text, options));
        self.out.push('\n');
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
