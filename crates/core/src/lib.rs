#![deny(missing_docs)]
//! slidemd core: turns one markdown document into numbered HTML slide fragments.
//!
//! The pipeline is frontmatter → segmentation → block parsing, with the
//! inline transformer and asset resolver called per line. Everything is pure
//! string work over borrowed input; parse state lives only as long as a call.

/// Asset path classification and mounting.
pub mod asset;
/// Line-oriented block parser.
pub mod block;
/// Code fence tracking.
pub mod code_fence;
/// Deck model and the top-level pipeline.
pub mod deck;
/// Diagnostics for recovered input.
pub mod error;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Inline span transformation.
pub mod inline;
/// Slide segmentation.
pub mod segment;

pub use asset::{AssetResolver, DEFAULT_ASSET_MOUNT, resolve_asset_path};
pub use block::{BlockParser, LineKind, ListState, ListTransition, render_slide};
pub use code_fence::{FENCE_MARKER, FencePhase};
pub use deck::{Deck, Slide, SlideOptions, parse_deck, parse_deck_with_options};
pub use error::{ParseDiagnostics, ParseWarning, SourceLocation};
pub use frontmatter::{
    Frontmatter, FrontmatterError, FrontmatterExtraction, extract_frontmatter, split_frontmatter,
};
pub use inline::{InlineRenderer, transform_inline};
pub use segment::{SLIDE_SEPARATOR, segment_slides};
