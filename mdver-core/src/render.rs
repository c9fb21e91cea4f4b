//! Flatten markdown into plain display lines with heading anchors

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::slug::slugify;

/// One display line of rendered markdown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    /// Anchor id for heading lines, shared with the outline
    pub anchor: Option<String>,
    pub level: Option<u8>,
}

impl RenderedLine {
    fn plain(text: String) -> Self {
        Self {
            text,
            anchor: None,
            level: None,
        }
    }
}

/// Rendered document output
#[derive(Clone, Debug, Default)]
pub struct RenderedDoc {
    pub lines: Vec<RenderedLine>,
}

impl RenderedDoc {
    /// All rendered text, one display line per `\n`
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Scroll target for an outline click: first line carrying the anchor
    pub fn line_for_anchor(&self, id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.anchor.as_deref() == Some(id))
    }
}

struct LineBuilder {
    lines: Vec<RenderedLine>,
    current: String,
    heading_level: Option<u8>,
    list_depth: usize,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: String::new(),
            heading_level: None,
            list_depth: 0,
        }
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.current);
        let line = match self.heading_level {
            Some(level) => RenderedLine {
                anchor: Some(slugify(text.trim())),
                level: Some(level),
                text,
            },
            None => RenderedLine::plain(text),
        };
        self.lines.push(line);
    }

    fn push_text(&mut self, text: &str) {
        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            self.current.push_str(part);
            if parts.peek().is_some() {
                let text = std::mem::take(&mut self.current);
                self.lines.push(RenderedLine::plain(text));
            }
        }
    }
}

/// Render markdown into display lines.
///
/// Block structure becomes line breaks, inline markup is dropped and
/// heading lines carry the same anchor ids the outline uses.
pub fn render(markdown: &str) -> RenderedDoc {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = LineBuilder::new();

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    builder.flush();
                    builder.heading_level = Some(level as u8);
                }
                Tag::List(_) => {
                    builder.flush();
                    builder.list_depth += 1;
                }
                Tag::Item => {
                    builder.flush();
                    let indent = "  ".repeat(builder.list_depth.saturating_sub(1));
                    builder.current.push_str(&indent);
                    builder.current.push_str("- ");
                }
                Tag::CodeBlock(_) | Tag::Paragraph | Tag::BlockQuote(_) | Tag::TableRow | Tag::TableHead => {
                    builder.flush();
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(_) => {
                    builder.flush();
                    builder.heading_level = None;
                }
                TagEnd::List(_) => {
                    builder.flush();
                    builder.list_depth = builder.list_depth.saturating_sub(1);
                }
                TagEnd::TableCell => {
                    builder.current.push_str(" | ");
                }
                TagEnd::Paragraph
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableRow
                | TagEnd::TableHead => {
                    builder.flush();
                }
                _ => {}
            },
            Event::Text(text) => builder.push_text(&text),
            Event::Code(code) => builder.current.push_str(&code),
            Event::SoftBreak => builder.current.push(' '),
            Event::HardBreak => builder.flush(),
            Event::TaskListMarker(done) => {
                builder.current.push_str(if done { "[x] " } else { "[ ] " });
            }
            Event::Rule => {
                builder.flush();
                builder.lines.push(RenderedLine::plain("---".to_string()));
            }
            _ => {}
        }
    }
    builder.flush();

    log::debug!("rendered {} display lines", builder.lines.len());

    RenderedDoc {
        lines: builder.lines,
    }
}
