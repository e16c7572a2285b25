//! Screenshot-aware summarization.
//!
//! Text comes from a [`ScreenshotAnalyzer`]; its density estimate nudges
//! each profile's buffer before budgeting. Dense captures get a more
//! conservative budget, sparse ones a slightly looser one.

use crate::coordinator::ProfileCoordinator;
use screenfit_core::{DisplayProfile, Error, OcrResult, Result, ScreenshotAnalyzer, SummaryResult};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Density above which buffers shrink.
pub const DENSE_THRESHOLD: f64 = 0.7;
/// Density below which buffers grow.
pub const SPARSE_THRESHOLD: f64 = 0.3;

const DENSE_DELTA: f64 = 0.1;
const DENSE_FLOOR: f64 = 0.7;
const SPARSE_DELTA: f64 = 0.05;
const SPARSE_CEILING: f64 = 0.95;

/// Provenance attached to screenshot-sourced summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionMetadata {
    pub source: String,
    pub text_density: f64,
    pub regions_found: usize,
    pub preprocessing_applied: bool,
    pub image_size: Option<(u32, u32)>,
}

/// Summaries plus where their text came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenshotSummary {
    #[serde(flatten)]
    pub summaries: SummaryResult,
    #[serde(rename = "_extraction_metadata")]
    pub metadata: ExtractionMetadata,
}

/// Buffer after the density nudge.
///
/// Dense content lowers the buffer by 0.1, not below 0.7; sparse content
/// raises it by 0.05, not above 0.95. A nudge never moves the buffer the
/// opposite way, so a buffer already under 0.7 stays put for dense content.
pub fn adjusted_buffer(buffer: f64, text_density: f64) -> f64 {
    if text_density > DENSE_THRESHOLD {
        (buffer - DENSE_DELTA).max(DENSE_FLOOR).min(buffer)
    } else if text_density < SPARSE_THRESHOLD {
        (buffer + SPARSE_DELTA).min(SPARSE_CEILING).max(buffer)
    } else {
        buffer
    }
}

/// New profiles with density-adjusted buffers. The inputs are untouched.
pub fn adjust_profiles_for_density(
    profiles: &[DisplayProfile],
    text_density: f64,
) -> Result<Vec<DisplayProfile>> {
    profiles
        .iter()
        .map(|p| {
            let buffer = adjusted_buffer(p.buffer(), text_density);
            debug!(
                profile = p.name(),
                from = p.buffer(),
                to = buffer,
                "Adjusted buffer for text density"
            );
            p.with_buffer(buffer)
        })
        .collect()
}

/// Extract text from `source`, adjust the profiles, and summarize.
///
/// Fails with [`Error::EmptyInput`] when the capture holds no text.
pub fn screenshot_aware_summarize<S: AsRef<str>>(
    coordinator: &ProfileCoordinator<'_>,
    analyzer: &dyn ScreenshotAnalyzer,
    source: &Path,
    profiles: &[DisplayProfile],
    layer_names: &[S],
    persona_name: Option<&str>,
) -> Result<ScreenshotSummary> {
    let ocr = analyzer.analyze(source)?;
    if ocr.full_text.trim().is_empty() {
        return Err(Error::EmptyInput(format!(
            "no text found in {}",
            source.display()
        )));
    }

    let adjusted = adjust_profiles_for_density(profiles, ocr.text_density)?;
    let summaries =
        coordinator.summarize_for_profiles(&ocr.full_text, &adjusted, layer_names, persona_name)?;

    info!(
        source = %source.display(),
        density = ocr.text_density,
        regions = ocr.regions_found,
        "Summarized screenshot text"
    );

    Ok(ScreenshotSummary {
        summaries,
        metadata: ExtractionMetadata {
            source: source.display().to_string(),
            text_density: ocr.text_density,
            regions_found: ocr.regions_found,
            preprocessing_applied: ocr.preprocessing_applied,
            image_size: ocr.image_size,
        },
    })
}

/// Analyzer for text that was already extracted by an external OCR step
/// and saved as a plain-text file.
///
/// Density is the share of the text's bounding grid (lines × longest line)
/// covered by non-whitespace characters. Each non-blank line counts as a
/// region.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextAnalyzer;

impl PlainTextAnalyzer {
    pub fn analyze_text(text: &str) -> OcrResult {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let area = width * lines.len();
        let filled = text.chars().filter(|c| !c.is_whitespace()).count();
        let text_density = if area == 0 {
            0.0
        } else {
            (filled as f64 / area as f64).min(1.0)
        };

        OcrResult {
            full_text: text.to_string(),
            text_density,
            regions_found: lines.iter().filter(|l| !l.trim().is_empty()).count(),
            preprocessing_applied: false,
            image_size: None,
        }
    }
}

impl ScreenshotAnalyzer for PlainTextAnalyzer {
    fn analyze(&self, source: &Path) -> Result<OcrResult> {
        let text = std::fs::read_to_string(source)
            .map_err(|e| Error::Extraction(format!("{}: {e}", source.display())))?;
        Ok(Self::analyze_text(&text))
    }
}
