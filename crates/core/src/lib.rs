//! # screenfit core
//!
//! Domain types, traits, and error definitions for screenfit, which turns
//! one block of text into length-bounded summary layers sized for
//! different display surfaces.
//!
//! This crate does no I/O. It defines the value types every other crate
//! works with and the capability traits (summarizer, screenshot analyzer,
//! token counter) that callers plug in.

pub mod error;
pub mod layer;
pub mod persona;
pub mod profile;
pub mod screenshot;
pub mod summarizer;
pub mod summary;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use layer::{LAYER_SPECS, LayerName, LayerSpec, parse_layers};
pub use persona::{ExamplesPlacement, Persona};
pub use profile::{Budget, DisplayProfile};
pub use screenshot::{OcrResult, ScreenshotAnalyzer};
pub use summarizer::{ELLIPSIS, Summarizer, TokenCounter};
pub use summary::{LayerSummaries, SummaryResult};
