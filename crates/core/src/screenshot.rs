//! Screenshot analyzer trait. OCR is an external capability.
//!
//! The core never decodes images. An analyzer hands back the extracted
//! text plus a density estimate, and the engine uses the density only to
//! nudge profile buffers before budgeting.

use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// What an analyzer extracted from one screenshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrResult {
    /// All recognised text, in reading order.
    pub full_text: String,
    /// How much of the image is covered by text, in `[0, 1]`.
    pub text_density: f64,
    /// Number of text regions recognised.
    pub regions_found: usize,
    /// Whether image preprocessing ran before recognition.
    pub preprocessing_applied: bool,
    /// Source image size in pixels, when known.
    pub image_size: Option<(u32, u32)>,
}

/// Extracts text from a screenshot.
pub trait ScreenshotAnalyzer: Send + Sync {
    /// Analyze the image at `source`.
    ///
    /// Failures should be reported as [`Error::Extraction`](crate::Error::Extraction).
    fn analyze(&self, source: &Path) -> Result<OcrResult>;
}
