//! Line-oriented block parser that renders one slide to an HTML fragment.
//!
//! Each line is trimmed and classified into a [`LineKind`]. Fence lines and
//! lines inside a fence are handled first; every other kind drives the
//! [`ListState`] machine through [`ListState::transition`] before its own
//! markup is emitted.
//!
//! List closing is asymmetric: headings, horizontal rules and blank lines
//! leave an open list open, while fences, paragraphs and a switch of list
//! type close it.

use crate::asset::AssetResolver;
use crate::code_fence::{FencePhase, is_fence_line};
use crate::error::{ParseDiagnostics, ParseWarning, SourceLocation};
use crate::inline::InlineRenderer;
use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s+(.+)$").expect("ordered item pattern is valid"));

const MAX_HEADING_LEVEL: usize = 6;

/// Classification of one trimmed slide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Line starting with the fence marker.
    Fence,
    /// `#` to `######` followed by whitespace.
    Heading {
        /// Heading level, 1 to 6.
        level: usize,
        /// Text after the markers, trimmed.
        text: &'a str,
    },
    /// Exactly `---`, `***` or `___`.
    Rule,
    /// `- item` or `* item`.
    UnorderedItem(&'a str),
    /// `1. item`.
    OrderedItem(&'a str),
    /// Any other non-empty line.
    Paragraph(&'a str),
    /// Empty after trimming.
    Blank,
}

impl<'a> LineKind<'a> {
    /// Classify a line. Surrounding whitespace is ignored.
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if is_fence_line(trimmed) {
            return LineKind::Fence;
        }
        if trimmed.is_empty() {
            return LineKind::Blank;
        }
        if let Some((level, text)) = heading(trimmed) {
            return LineKind::Heading { level, text };
        }
        if matches!(trimmed, "---" | "***" | "___") {
            return LineKind::Rule;
        }
        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            return LineKind::UnorderedItem(item);
        }
        if let Some(item) = ORDERED_ITEM
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
        {
            return LineKind::OrderedItem(item.as_str());
        }
        LineKind::Paragraph(trimmed)
    }
}

fn heading(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &trimmed[level..];
    if rest.starts_with(char::is_whitespace) {
        Some((level, rest.trim()))
    } else {
        None
    }
}

/// Which list, if any, is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    /// No list open.
    #[default]
    Closed,
    /// Inside `<ul>`.
    Unordered,
    /// Inside `<ol>`.
    Ordered,
}

/// Effect of one line on the list state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTransition {
    /// Close the currently open list before emitting the line.
    pub close: bool,
    /// Open the next state's list before emitting the line.
    pub open: bool,
    /// State after the line.
    pub next: ListState,
}

impl ListState {
    /// Transition table for a non-code line.
    pub fn transition(self, kind: &LineKind<'_>) -> ListTransition {
        match kind {
            LineKind::Fence | LineKind::Paragraph(_) => self.switch_to(ListState::Closed),
            LineKind::UnorderedItem(_) => self.switch_to(ListState::Unordered),
            LineKind::OrderedItem(_) => self.switch_to(ListState::Ordered),
            LineKind::Heading { .. } | LineKind::Rule | LineKind::Blank => ListTransition {
                close: false,
                open: false,
                next: self,
            },
        }
    }

    fn switch_to(self, next: ListState) -> ListTransition {
        if self == next {
            return ListTransition {
                close: false,
                open: false,
                next,
            };
        }
        ListTransition {
            close: self != ListState::Closed,
            open: next != ListState::Closed,
            next,
        }
    }

    fn open_tag(self) -> &'static str {
        match self {
            ListState::Closed => "",
            ListState::Unordered => "<ul>\n",
            ListState::Ordered => "<ol>\n",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListState::Closed => "",
            ListState::Unordered => "</ul>\n",
            ListState::Ordered => "</ol>\n",
        }
    }
}

/// Renders slide markdown into an HTML fragment.
#[derive(Debug, Clone, Copy)]
pub struct BlockParser<'a> {
    inline: InlineRenderer<'a>,
}

impl<'a> BlockParser<'a> {
    /// Create a parser whose links and images are mounted with `assets`.
    pub fn new(assets: &'a AssetResolver) -> Self {
        Self {
            inline: InlineRenderer::new(assets),
        }
    }

    /// Render one slide.
    pub fn render(&self, text: &str) -> String {
        self.render_with_diagnostics(text).0
    }

    /// Render one slide, also reporting the recoveries that were applied.
    pub fn render_with_diagnostics(&self, text: &str) -> (String, ParseDiagnostics) {
        if text.is_empty() {
            return (String::new(), ParseDiagnostics::new());
        }
        let mut state = BlockState::new(self.inline);
        for (index, line) in text.split('\n').enumerate() {
            state.push_line(index + 1, line);
        }
        state.finish()
    }
}

/// Render one slide using the default asset mount.
pub fn render_slide(text: &str) -> String {
    let assets = AssetResolver::default();
    BlockParser::new(&assets).render(text)
}

/// Per-render state; never shared between invocations.
struct BlockState<'a> {
    inline: InlineRenderer<'a>,
    fence: FencePhase,
    list: ListState,
    opened_fence: Option<(usize, String)>,
    html: String,
}

impl<'a> BlockState<'a> {
    fn new(inline: InlineRenderer<'a>) -> Self {
        Self {
            inline,
            fence: FencePhase::Outside,
            list: ListState::Closed,
            opened_fence: None,
            html: String::new(),
        }
    }

    fn push_line(&mut self, line_number: usize, line: &str) {
        let kind = LineKind::classify(line);

        if kind == LineKind::Fence {
            self.apply_list_transition(&kind);
            self.fence = self.fence.toggle();
            if self.fence.is_inside() {
                self.html.push_str("<pre><code>");
                self.opened_fence = Some((line_number, line.trim().to_string()));
            } else {
                self.html.push_str("</code></pre>");
                self.opened_fence = None;
            }
            return;
        }

        if self.fence.is_inside() {
            let raw = line.strip_suffix('\r').unwrap_or(line);
            self.html
                .push_str(&html_escape::encode_quoted_attribute(raw));
            self.html.push('\n');
            return;
        }

        self.apply_list_transition(&kind);
        match kind {
            LineKind::Heading { level, text } => {
                let content = self.inline.transform(text);
                self.html
                    .push_str(&format!("<h{level}>{content}</h{level}>\n"));
            }
            LineKind::Rule => self.html.push_str("<hr/>\n"),
            LineKind::UnorderedItem(item) | LineKind::OrderedItem(item) => {
                let content = self.inline.transform(item);
                self.html.push_str(&format!("<li>{content}</li>\n"));
            }
            LineKind::Paragraph(text) => {
                let content = self.inline.transform(text);
                self.html.push_str(&format!("<p>{content}</p>\n"));
            }
            LineKind::Blank | LineKind::Fence => {}
        }
    }

    fn apply_list_transition(&mut self, kind: &LineKind<'_>) {
        let transition = self.list.transition(kind);
        if transition.close {
            self.html.push_str(self.list.close_tag());
        }
        if transition.open {
            self.html.push_str(transition.next.open_tag());
        }
        self.list = transition.next;
    }

    fn finish(mut self) -> (String, ParseDiagnostics) {
        let mut diagnostics = ParseDiagnostics::new();
        if self.fence.is_inside() {
            self.html.push_str("</code></pre>");
            if let Some((line, context)) = self.opened_fence.take() {
                log::debug!("closing unterminated code fence opened at line {line}");
                diagnostics.add_warning(ParseWarning::UnclosedCodeFence {
                    location: SourceLocation::new(line),
                    context,
                });
            }
        }
        // Fixed order: unordered before ordered. Only one can be open.
        if self.list == ListState::Unordered {
            self.html.push_str(ListState::Unordered.close_tag());
        }
        if self.list == ListState::Ordered {
            self.html.push_str(ListState::Ordered.close_tag());
        }
        (self.html, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_lines() {
        assert_eq!(LineKind::classify("  ```rust"), LineKind::Fence);
        assert_eq!(
            LineKind::classify("## Title  "),
            LineKind::Heading {
                level: 2,
                text: "Title"
            }
        );
        assert_eq!(LineKind::classify("***"), LineKind::Rule);
        assert_eq!(LineKind::classify("- a"), LineKind::UnorderedItem("a"));
        assert_eq!(LineKind::classify("* a"), LineKind::UnorderedItem("a"));
        assert_eq!(LineKind::classify("12. a b"), LineKind::OrderedItem("a b"));
        assert_eq!(LineKind::classify("   "), LineKind::Blank);
        assert_eq!(LineKind::classify("plain"), LineKind::Paragraph("plain"));
    }

    #[test]
    fn heading_needs_whitespace_and_at_most_six_markers() {
        assert_eq!(LineKind::classify("#tag"), LineKind::Paragraph("#tag"));
        assert_eq!(
            LineKind::classify("####### seven"),
            LineKind::Paragraph("####### seven")
        );
        assert_eq!(
            LineKind::classify("###### six"),
            LineKind::Heading {
                level: 6,
                text: "six"
            }
        );
    }

    #[test]
    fn ordered_items_need_ascii_digits_and_text() {
        assert_eq!(LineKind::classify("1."), LineKind::Paragraph("1."));
        assert_eq!(LineKind::classify("1.x"), LineKind::Paragraph("1.x"));
        assert_eq!(LineKind::classify("١. x"), LineKind::Paragraph("١. x"));
    }

    #[test]
    fn list_transition_table() {
        let heading = LineKind::Heading {
            level: 1,
            text: "h",
        };
        for kind in [heading, LineKind::Rule, LineKind::Blank] {
            let t = ListState::Unordered.transition(&kind);
            assert_eq!((t.close, t.open, t.next), (false, false, ListState::Unordered));
        }

        let t = ListState::Unordered.transition(&LineKind::Paragraph("p"));
        assert_eq!((t.close, t.open, t.next), (true, false, ListState::Closed));

        let t = ListState::Ordered.transition(&LineKind::Fence);
        assert_eq!((t.close, t.open, t.next), (true, false, ListState::Closed));

        let t = ListState::Unordered.transition(&LineKind::OrderedItem("x"));
        assert_eq!((t.close, t.open, t.next), (true, true, ListState::Ordered));

        let t = ListState::Closed.transition(&LineKind::UnorderedItem("x"));
        assert_eq!((t.close, t.open, t.next), (false, true, ListState::Unordered));

        let t = ListState::Ordered.transition(&LineKind::OrderedItem("x"));
        assert_eq!((t.close, t.open, t.next), (false, false, ListState::Ordered));

        let t = ListState::Closed.transition(&LineKind::Paragraph("p"));
        assert_eq!((t.close, t.open, t.next), (false, false, ListState::Closed));
    }

    #[test]
    fn switching_list_type_closes_previous_list() {
        assert_eq!(
            render_slide("- a\n- b\n1. c"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<ol>\n<li>c</li>\n</ol>\n"
        );
    }

    #[test]
    fn paragraph_closes_list() {
        assert_eq!(
            render_slide("1. one\ntext"),
            "<ol>\n<li>one</li>\n</ol>\n<p>text</p>\n"
        );
    }

    #[test]
    fn heading_rule_and_blank_keep_list_open() {
        assert_eq!(
            render_slide("- a\n\n## H\n---\n- b"),
            "<ul>\n<li>a</li>\n<h2>H</h2>\n<hr/>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn fence_closes_list_and_protects_content() {
        assert_eq!(
            render_slide("- a\n```\n**x** <y>\n```"),
            "<ul>\n<li>a</li>\n</ul>\n<pre><code>**x** &lt;y&gt;\n</code></pre>"
        );
    }

    #[test]
    fn code_lines_keep_indentation() {
        assert_eq!(
            render_slide("```rust\nfn main() {\n    let a = 1 & 2;\n}\n```"),
            "<pre><code>fn main() {\n    let a = 1 &amp; 2;\n}\n</code></pre>"
        );
    }

    #[test]
    fn markdown_looking_lines_inside_fence_are_literal() {
        assert_eq!(
            render_slide("```\n# not a heading\n- not an item\n```"),
            "<pre><code># not a heading\n- not an item\n</code></pre>"
        );
    }

    #[test]
    fn unterminated_fence_is_closed_and_reported() {
        let assets = AssetResolver::default();
        let (html, diagnostics) =
            BlockParser::new(&assets).render_with_diagnostics("intro\n```sh\necho hi");
        assert_eq!(html, "<p>intro</p>\n<pre><code>echo hi\n</code></pre>");
        assert_eq!(
            diagnostics.warnings,
            vec![ParseWarning::UnclosedCodeFence {
                location: SourceLocation::new(2),
                context: "```sh".to_string(),
            }]
        );
    }

    #[test]
    fn list_is_closed_at_end_of_input() {
        assert_eq!(render_slide("* x"), "<ul>\n<li>x</li>\n</ul>\n");
    }

    #[test]
    fn headings_render_inline_markup() {
        assert_eq!(
            render_slide("# Hello **world**"),
            "<h1>Hello <strong>world</strong></h1>\n"
        );
        assert_eq!(render_slide("###   spaced   "), "<h3>spaced</h3>\n");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render_slide(""), "");
        assert_eq!(render_slide("\n\n"), "");
    }

    #[test]
    fn paragraphs_are_trimmed_and_escaped() {
        assert_eq!(
            render_slide("   a < b   \n"),
            "<p>a &lt; b</p>\n"
        );
    }
}
