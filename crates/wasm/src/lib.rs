use serde::Serialize;
use slidemd_core::{BlockParser, SlideOptions, parse_deck_with_options};
use slidemd_deck::{Presentation, ThemeRegistry};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Options
// ============================================================================

/// Options accepted by every exported function.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WasmSlideOptions {
    #[serde(default, alias = "assetMount")]
    pub asset_mount: Option<String>,
}

fn parse_options(options: JsValue) -> Result<SlideOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(SlideOptions::default());
    }
    let parsed: WasmSlideOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    let mut slide_options = SlideOptions::default();
    if let Some(mount) = parsed.asset_mount {
        slide_options.asset_mount = mount;
    }
    Ok(slide_options)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Deck API
// ============================================================================

/// Parses a markdown document into a deck.
///
/// Returns `{ title, metadata, slides: [{ number, markdown, html }], diagnostics }`.
/// Malformed input never throws; recoveries are listed in `diagnostics.warnings`.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { parse_deck } from './slidemd_wasm';
///
/// const deck = parse_deck("---\ntitle: Demo\n---\n# One\n---\n# Two");
/// // deck.title === "Demo"
/// // deck.slides.map(s => s.number) => [1, 2]
/// ```
#[wasm_bindgen]
pub fn parse_deck(source: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let deck = parse_deck_with_options(source, &options);
    to_js(&deck)
}

/// Renders a single slide's markdown to an HTML fragment.
#[wasm_bindgen]
pub fn render_slide(markdown: &str, options: JsValue) -> Result<String, JsError> {
    let options = parse_options(options)?;
    let assets = options.asset_resolver();
    Ok(BlockParser::new(&assets).render(markdown))
}

// ============================================================================
// Presentation API
// ============================================================================

/// Parses a document and frames it with a theme from a YAML registry.
///
/// # Arguments
///
/// * `source` - The markdown document
/// * `themes_yaml` - Registry text with a top-level `themes:` mapping
/// * `theme_name` - Key of the theme to use
/// * `options` - Optional `{ assetMount }`
#[wasm_bindgen]
pub fn build_presentation(
    source: &str,
    themes_yaml: &str,
    theme_name: &str,
    options: JsValue,
) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let registry =
        ThemeRegistry::from_yaml_str(themes_yaml).map_err(|e| JsError::new(&e.to_string()))?;
    let theme = registry
        .get(theme_name)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&Presentation::build(source, theme, &options))
}
