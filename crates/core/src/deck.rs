//! Deck assembly: frontmatter, segmentation and per-slide rendering.

use crate::asset::{AssetResolver, DEFAULT_ASSET_MOUNT};
use crate::block::BlockParser;
use crate::error::{ParseDiagnostics, ParseWarning};
use crate::frontmatter::split_frontmatter;
use crate::segment::segment_slides;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::borrow::Cow;

/// Options shared by every stage of the slide pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideOptions {
    /// URL prefix for document-relative link and image targets.
    pub asset_mount: String,
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            asset_mount: DEFAULT_ASSET_MOUNT.to_string(),
        }
    }
}

impl SlideOptions {
    /// The resolver these options describe.
    pub fn asset_resolver(&self) -> AssetResolver {
        AssetResolver::new(self.asset_mount.as_str())
    }
}

/// One rendered slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// Position in the deck, starting at 1.
    pub number: usize,
    /// Raw markdown the slide was rendered from.
    pub markdown: String,
    /// Rendered HTML fragment.
    pub html: String,
}

/// A parsed slide deck.
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    /// Title from frontmatter, if any.
    pub title: Option<String>,
    /// Full frontmatter mapping (empty object when absent).
    pub metadata: JsonValue,
    /// Slides in presentation order, numbered contiguously from 1.
    pub slides: Vec<Slide>,
    /// Recoveries applied while parsing.
    pub diagnostics: ParseDiagnostics,
    #[serde(skip)]
    assets: AssetResolver,
}

/// Parse a markdown document into a deck using default options.
pub fn parse_deck(document: &str) -> Deck {
    parse_deck_with_options(document, &SlideOptions::default())
}

/// Parse a markdown document into a deck.
pub fn parse_deck_with_options(document: &str, options: &SlideOptions) -> Deck {
    let document = normalize_document(document);
    let assets = options.asset_resolver();
    let parser = BlockParser::new(&assets);
    let mut diagnostics = ParseDiagnostics::new();

    let frontmatter = split_frontmatter(&document);
    if let Some(reason) = frontmatter.rejected {
        diagnostics.add_warning(ParseWarning::MalformedFrontmatter { reason });
    }

    let slides = segment_slides(frontmatter.body)
        .into_iter()
        .enumerate()
        .map(|(index, markdown)| {
            let number = index + 1;
            let (html, slide_diagnostics) = parser.render_with_diagnostics(&markdown);
            for warning in slide_diagnostics.warnings {
                diagnostics.add_warning(warning.in_slide(number));
            }
            Slide {
                number,
                markdown,
                html,
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "parsed deck with {} slides ({} warnings)",
        slides.len(),
        diagnostics.count()
    );

    Deck {
        title: frontmatter.title,
        metadata: frontmatter.metadata,
        slides,
        diagnostics,
        assets,
    }
}

impl Deck {
    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Rendered fragments in order.
    pub fn html_fragments(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|slide| slide.html.as_str())
    }

    /// Render `markdown` and insert it as the first slide.
    pub fn prepend_slide(mut self, markdown: &str) -> Self {
        let slide = self.render_extra(markdown);
        self.slides.insert(0, slide);
        self.diagnostics.shift_slides(1);
        self.renumber();
        self
    }

    /// Render `markdown` and add it as the last slide.
    pub fn append_slide(mut self, markdown: &str) -> Self {
        let slide = self.render_extra(markdown);
        self.slides.push(slide);
        self.renumber();
        self
    }

    fn render_extra(&self, markdown: &str) -> Slide {
        let markdown = normalize_document(markdown).into_owned();
        let html = BlockParser::new(&self.assets).render(&markdown);
        Slide {
            number: 0,
            markdown,
            html,
        }
    }

    fn renumber(&mut self) {
        for (index, slide) in self.slides.iter_mut().enumerate() {
            slide.number = index + 1;
        }
    }
}

/// Drops a leading byte-order mark and converts CRLF line endings to LF.
fn normalize_document(document: &str) -> Cow<'_, str> {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);
    if document.contains('\r') {
        Cow::Owned(document.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceLocation;

    #[test]
    fn frontmatter_title_and_single_slide() {
        let deck = parse_deck("---\ntitle: Foo\n---\nbody text");
        assert_eq!(deck.title.as_deref(), Some("Foo"));
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.slides[0].markdown, "body text");
        assert_eq!(deck.slides[0].html, "<p>body text</p>\n");
        assert!(!deck.diagnostics.has_warnings());
    }

    #[test]
    fn slides_are_numbered_from_one() {
        let deck = parse_deck("a\n---\nb\n---\nc");
        let numbers: Vec<_> = deck.slides.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(
            deck.html_fragments().collect::<Vec<_>>(),
            vec!["<p>a</p>\n", "<p>b</p>\n", "<p>c</p>\n"]
        );
    }

    #[test]
    fn crlf_documents_segment_like_lf() {
        let deck = parse_deck("---\r\ntitle: T\r\n---\r\none\r\n---\r\ntwo\r\n");
        assert_eq!(deck.title.as_deref(), Some("T"));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides[1].markdown, "two");
    }

    #[test]
    fn leading_bom_is_ignored() {
        let deck = parse_deck("\u{feff}# Title\ntext");
        assert_eq!(deck.slides[0].html, "<h1>Title</h1>\n<p>text</p>\n");
    }

    #[test]
    fn malformed_frontmatter_is_reported_and_kept() {
        let deck = parse_deck("---\ntitle: [oops\n---\n# Slide");
        assert_eq!(deck.title, None);
        assert!(matches!(
            deck.diagnostics.warnings.as_slice(),
            [ParseWarning::MalformedFrontmatter { .. }]
        ));
        // The block stays in the body, so its closing delimiter splits slides.
        assert_eq!(deck.slides[0].markdown, "---\ntitle: [oops");
        assert_eq!(deck.slides[1].markdown, "# Slide");
    }

    #[test]
    fn indented_frontmatter_delimiter_opens_the_block() {
        let deck = parse_deck("  ---\ntitle: Foo\n---\nbody text");
        assert_eq!(deck.title.as_deref(), Some("Foo"));
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.slides[0].markdown, "body text");
        assert!(!deck.diagnostics.has_warnings());
    }

    #[test]
    fn list_title_leaves_the_document_untouched() {
        let deck = parse_deck("---\ntitle: [a, b]\n---\nbody text");
        assert_eq!(deck.title, None);
        assert!(matches!(
            deck.diagnostics.warnings.as_slice(),
            [ParseWarning::MalformedFrontmatter { .. }]
        ));
        let markdown: Vec<_> = deck.slides.iter().map(|s| s.markdown.as_str()).collect();
        assert_eq!(markdown, vec!["---\ntitle: [a, b]", "body text"]);
    }

    #[test]
    fn unterminated_fence_is_attributed_to_its_slide() {
        let deck = parse_deck("ok\n---\ntext\n```\ncode");
        assert_eq!(
            deck.diagnostics.warnings,
            vec![ParseWarning::UnclosedCodeFence {
                location: SourceLocation::in_slide(2, 2),
                context: "```".to_string(),
            }]
        );
    }

    #[test]
    fn prepend_and_append_renumber() {
        let deck = parse_deck("a\n---\nb")
            .prepend_slide("# Welcome")
            .append_slide("Thanks!");
        let summary: Vec<_> = deck
            .slides
            .iter()
            .map(|s| (s.number, s.html.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "<h1>Welcome</h1>\n"),
                (2, "<p>a</p>\n"),
                (3, "<p>b</p>\n"),
                (4, "<p>Thanks!</p>\n"),
            ]
        );
    }

    #[test]
    fn prepend_shifts_existing_warning_locations() {
        let deck = parse_deck("```\nx").prepend_slide("intro");
        assert_eq!(
            deck.diagnostics.warnings[0].location(),
            Some(&SourceLocation::in_slide(2, 1))
        );
    }

    #[test]
    fn extra_slides_use_the_deck_mount() {
        let options = SlideOptions {
            asset_mount: "/files".to_string(),
        };
        let deck = parse_deck_with_options("x", &options).append_slide("![logo](logo.png)");
        assert_eq!(
            deck.slides[1].html,
            "<p><img src=\"/files/logo.png\" alt=\"logo\"/></p>\n"
        );
    }

    #[test]
    fn empty_document_has_no_slides() {
        let deck = parse_deck("");
        assert!(deck.is_empty());
        assert_eq!(deck.title, None);
        assert_eq!(deck.append_slide("end").len(), 1);
    }
}
