//! Presentation assembly: a parsed deck plus the theme settings that frame it.

use crate::Theme;
use serde::Serialize;
use slidemd_core::{Deck, SlideOptions, parse_deck_with_options};

const DEFAULT_CLASSIFICATION_BG: &str = "#5e81ac";
const DEFAULT_CLASSIFICATION_FG: &str = "#ffffff";
const DEFAULT_WATERMARK_OPACITY: f64 = 0.08;
const WATERMARK_TILES: usize = 96;

/// How the page moves between slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Swap instantly.
    #[default]
    Cut,
    /// Cross-fade.
    Fade,
    /// Slide horizontally in the direction of travel.
    Slide,
}

impl Transition {
    /// Read a theme's transition, falling back to [`Transition::Cut`].
    pub fn from_theme(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "fade" => Transition::Fade,
            "slide" => Transition::Slide,
            "cut" | "" => Transition::Cut,
            other => {
                log::warn!("unknown transition '{other}', using 'cut'");
                Transition::Cut
            }
        }
    }

    /// Lowercase name, as used in CSS class names.
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Cut => "cut",
            Transition::Fade => "fade",
            Transition::Slide => "slide",
        }
    }
}

/// Classification banner shown above the slides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Banner text.
    pub label: String,
    /// Background colour.
    pub background: String,
    /// Text colour.
    pub foreground: String,
}

impl Classification {
    fn from_theme(theme: &Theme) -> Option<Self> {
        let label = theme.classification_label.trim();
        if label.is_empty() {
            return None;
        }
        Some(Self {
            label: label.to_string(),
            background: non_blank(&theme.classification_bg)
                .unwrap_or(DEFAULT_CLASSIFICATION_BG)
                .to_string(),
            foreground: non_blank(&theme.classification_fg)
                .unwrap_or(DEFAULT_CLASSIFICATION_FG)
                .to_string(),
        })
    }
}

/// Tiled watermark settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Watermark {
    /// Text repeated across the page.
    pub text: String,
    /// Opacity with two decimals, ready for CSS.
    pub opacity: String,
    /// How many copies of the text to tile.
    pub tiles: usize,
    /// Milliseconds between drift steps, when drifting is enabled.
    pub move_interval_ms: Option<u64>,
}

impl Watermark {
    fn from_theme(theme: &Theme, page_title: &str) -> Option<Self> {
        if !theme.watermark {
            return None;
        }
        let opacity = if theme.watermark_opacity > 0.0 && theme.watermark_opacity <= 1.0 {
            theme.watermark_opacity
        } else {
            DEFAULT_WATERMARK_OPACITY
        };
        let move_interval_ms = u64::try_from(theme.watermark_move_seconds)
            .ok()
            .filter(|seconds| *seconds > 0)
            .map(|seconds| seconds.saturating_mul(1000));
        Some(Self {
            text: non_blank(&theme.watermark_text)
                .unwrap_or(page_title)
                .to_string(),
            opacity: format!("{opacity:.2}"),
            tiles: WATERMARK_TILES,
            move_interval_ms,
        })
    }
}

/// Everything a page shell needs to show a deck.
#[derive(Debug, Clone, Serialize)]
pub struct Presentation {
    /// Title for the page and the deck header.
    pub page_title: String,
    /// Slides, including any theme-provided first and last slides.
    pub deck: Deck,
    /// Slide transition.
    pub transition: Transition,
    /// Mounted logo URL, if the theme has a logo.
    pub logo: Option<String>,
    /// Classification banner, if the theme sets a label.
    pub classification: Option<Classification>,
    /// Watermark, if the theme enables it.
    pub watermark: Option<Watermark>,
    /// Theme stylesheet.
    pub css: String,
}

impl Presentation {
    /// Parse `document` and frame it with `theme`.
    pub fn build(document: &str, theme: &Theme, options: &SlideOptions) -> Self {
        let mut deck = parse_deck_with_options(document, options);
        if let Some(first) = non_blank(&theme.first_slide) {
            deck = deck.prepend_slide(first);
        }
        if let Some(last) = non_blank(&theme.last_slide) {
            deck = deck.append_slide(last);
        }

        let page_title = deck
            .title
            .clone()
            .unwrap_or_else(|| theme.title.clone());
        let assets = options.asset_resolver();
        let logo = non_blank(&theme.logo).map(|logo| assets.resolve(logo).into_owned());

        for warning in &deck.diagnostics.warnings {
            log::debug!("{warning}");
        }

        Self {
            transition: Transition::from_theme(&theme.transition),
            classification: Classification::from_theme(theme),
            watermark: Watermark::from_theme(theme, &page_title),
            css: theme.css.clone(),
            page_title,
            deck,
            logo,
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(document: &str, theme: &Theme) -> Presentation {
        Presentation::build(document, theme, &SlideOptions::default())
    }

    #[test]
    fn transitions_are_normalized() {
        assert_eq!(Transition::from_theme(" FADE "), Transition::Fade);
        assert_eq!(Transition::from_theme("slide"), Transition::Slide);
        assert_eq!(Transition::from_theme(""), Transition::Cut);
        assert_eq!(Transition::from_theme("zoom"), Transition::Cut);
        assert_eq!(Transition::Slide.as_str(), "slide");
    }

    #[test]
    fn frontmatter_title_wins_over_theme_title() {
        let theme = Theme {
            title: "Theme Title".to_string(),
            ..Theme::default()
        };
        assert_eq!(build("---\ntitle: Doc\n---\nx", &theme).page_title, "Doc");
        assert_eq!(build("x", &theme).page_title, "Theme Title");
    }

    #[test]
    fn theme_slides_wrap_the_document() {
        let theme = Theme {
            first_slide: "# Hello".to_string(),
            last_slide: "  ".to_string(),
            ..Theme::default()
        };
        let presentation = build("a\n---\nb", &theme);
        let numbers: Vec<_> = presentation.deck.slides.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(presentation.deck.slides[0].html, "<h1>Hello</h1>\n");
        assert_eq!(presentation.deck.slides[2].html, "<p>b</p>\n");
    }

    #[test]
    fn logo_is_mounted_when_present() {
        let theme = Theme {
            logo: "logo.svg".to_string(),
            ..Theme::default()
        };
        assert_eq!(build("x", &theme).logo.as_deref(), Some("/assets/logo.svg"));
        assert_eq!(build("x", &Theme::default()).logo, None);
    }

    #[test]
    fn classification_defaults_colours() {
        let theme = Theme {
            classification_label: "INTERNAL".to_string(),
            classification_fg: "#000".to_string(),
            ..Theme::default()
        };
        assert_eq!(
            build("x", &theme).classification,
            Some(Classification {
                label: "INTERNAL".to_string(),
                background: "#5e81ac".to_string(),
                foreground: "#000".to_string(),
            })
        );
        assert_eq!(build("x", &Theme::default()).classification, None);
    }

    #[test]
    fn watermark_falls_back_to_title_and_clamps_opacity() {
        let theme = Theme {
            title: "Deck".to_string(),
            watermark: true,
            watermark_opacity: 1.5,
            watermark_move_seconds: 3,
            ..Theme::default()
        };
        assert_eq!(
            build("x", &theme).watermark,
            Some(Watermark {
                text: "Deck".to_string(),
                opacity: "0.08".to_string(),
                tiles: 96,
                move_interval_ms: Some(3000),
            })
        );
    }

    #[test]
    fn watermark_keeps_valid_settings() {
        let theme = Theme {
            watermark: true,
            watermark_text: " DRAFT ".to_string(),
            watermark_opacity: 0.25,
            watermark_move_seconds: -1,
            ..Theme::default()
        };
        let watermark = build("x", &theme).watermark.unwrap();
        assert_eq!(watermark.text, "DRAFT");
        assert_eq!(watermark.opacity, "0.25");
        assert_eq!(watermark.move_interval_ms, None);
    }

    #[test]
    fn disabled_watermark_is_absent() {
        assert_eq!(build("x", &Theme::default()).watermark, None);
    }
}
