#![deny(missing_docs)]
//! slidemd deck: theme registry and presentation assembly.
//!
//! Combines a parsed [`slidemd_core::Deck`] with a [`Theme`] into the data a
//! page shell needs. Rendering that page is left to the host.

/// Error types for registry loading and theme lookup.
pub mod error;
/// Presentation assembly from a document and a theme.
pub mod presentation;
/// Theme definitions and the YAML registry.
pub mod theme;

pub use error::DeckError;
pub use presentation::{Classification, Presentation, Transition, Watermark};
pub use theme::{Theme, ThemeRegistry};
