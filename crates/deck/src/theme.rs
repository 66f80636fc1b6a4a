//! Theme definitions for the YAML theme registry.

use crate::DeckError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A named bundle of presentation settings.
///
/// Every field is optional in YAML; missing fields take their empty default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Display name.
    pub name: String,
    /// Stylesheet served alongside the deck.
    pub css: String,
    /// Page title used when the document has none.
    pub title: String,
    /// Logo path or URL; relative paths are mounted like slide assets.
    pub logo: String,
    /// Classification banner text; the banner is hidden when blank.
    pub classification_label: String,
    /// Banner background colour.
    pub classification_bg: String,
    /// Banner text colour.
    pub classification_fg: String,
    /// Slide transition: `cut`, `fade` or `slide`.
    pub transition: String,
    /// Whether to draw the watermark.
    pub watermark: bool,
    /// Watermark text; falls back to the page title.
    pub watermark_text: String,
    /// Watermark opacity in `(0, 1]`.
    pub watermark_opacity: f64,
    /// Seconds between watermark drift steps; zero or less disables drift.
    pub watermark_move_seconds: i64,
    /// Markdown for a slide inserted before the document's slides.
    pub first_slide: String,
    /// Markdown for a slide added after the document's slides.
    pub last_slide: String,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    themes: BTreeMap<String, Theme>,
}

/// Themes keyed by name, as read from a `themes:` YAML mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    /// Parse a registry from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DeckError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: RegistryFile = serde_yaml::from_str(yaml)?;
        log::debug!("loaded {} themes", file.themes.len());
        Ok(Self {
            themes: file.themes,
        })
    }

    /// Read and parse a registry file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Look up a theme by name.
    pub fn get(&self, name: &str) -> Result<&Theme, DeckError> {
        self.themes.get(name).ok_or_else(|| DeckError::UnknownTheme {
            name: name.to_string(),
            available: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Theme names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the registry has no themes.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Add or replace a theme.
    pub fn insert(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }
}
