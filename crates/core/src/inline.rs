//! Inline span transformation for a single line of slide text.
//!
//! The passes run in a fixed order and each one consumes the previous
//! pass's output:
//!
//! 1. HTML-escape the whole line.
//! 2. Swap inline code spans for placeholders.
//! 3. Images, then 4. links (an image match consumes its own brackets, so the
//!    link pattern never sees them).
//! 5. Bold, then 6. whitespace-bounded italic.
//! 7. Restore the placeholders.
//!
//! Code content is captured after escaping and only reinserted at the very
//! end, so none of the markup passes can touch it. Reordering any two passes
//! changes the output.

use crate::asset::AssetResolver;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static CODE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("code span pattern is valid"));
static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid")
});
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern is valid"));
static ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|\s)\*([^*\n]+?)\*(\s|$)").expect("italic pattern is valid")
});
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new("\u{E000}([0-9]+)\u{E001}").expect("placeholder pattern is valid")
});

/// Converts inline markdown spans within one line to HTML.
#[derive(Debug, Clone, Copy)]
pub struct InlineRenderer<'a> {
    assets: &'a AssetResolver,
}

impl<'a> InlineRenderer<'a> {
    /// Create a renderer that mounts link and image targets with `assets`.
    pub fn new(assets: &'a AssetResolver) -> Self {
        Self { assets }
    }

    /// Transform one line of text into HTML.
    pub fn transform(&self, text: &str) -> String {
        let mut spans = CodeSpans::default();

        let escaped = escape(text);
        let protected = spans.extract(&escaped);
        let with_images = self.replace_images(&protected);
        let with_links = self.replace_links(&with_images);
        let with_bold = replace_bold(&with_links);
        let with_italic = replace_italic(&with_bold);
        spans.restore(&with_italic)
    }

    fn replace_images<'t>(&self, text: &'t str) -> Cow<'t, str> {
        IMAGE.replace_all(text, |caps: &Captures<'_>| {
            format!(
                r#"<img src="{}" alt="{}"/>"#,
                self.assets.resolve(&caps[2]),
                &caps[1]
            )
        })
    }

    fn replace_links<'t>(&self, text: &'t str) -> Cow<'t, str> {
        LINK.replace_all(text, |caps: &Captures<'_>| {
            format!(
                r#"<a href="{}">{}</a>"#,
                self.assets.resolve(&caps[2]),
                &caps[1]
            )
        })
    }
}

/// Transform one line of text into HTML using the default asset mount.
pub fn transform_inline(text: &str) -> String {
    let assets = AssetResolver::default();
    InlineRenderer::new(&assets).transform(text)
}

/// Escapes markup characters and quotes, and neutralizes placeholder sentinels
/// so source text can never forge a code placeholder.
fn escape(text: &str) -> String {
    let escaped = html_escape::encode_quoted_attribute(text);
    if !escaped.contains([PLACEHOLDER_OPEN, PLACEHOLDER_CLOSE]) {
        return escaped.into_owned();
    }
    escaped
        .replace(PLACEHOLDER_OPEN, "&#xE000;")
        .replace(PLACEHOLDER_CLOSE, "&#xE001;")
}

fn replace_bold(text: &str) -> Cow<'_, str> {
    BOLD.replace_all(text, "<strong>${1}</strong>")
}

fn replace_italic(text: &str) -> Cow<'_, str> {
    ITALIC.replace_all(text, "${1}<em>${2}</em>${3}")
}

/// Placeholder table for code spans, local to one transformation.
#[derive(Debug, Default)]
struct CodeSpans {
    markup: Vec<String>,
}

impl CodeSpans {
    fn extract(&mut self, text: &str) -> String {
        CODE_SPAN
            .replace_all(text, |caps: &Captures<'_>| {
                let index = self.markup.len();
                self.markup.push(format!("<code>{}</code>", &caps[1]));
                format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
            })
            .into_owned()
    }

    fn restore(&self, text: &str) -> String {
        if self.markup.is_empty() {
            return text.to_string();
        }
        PLACEHOLDER
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.markup.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
