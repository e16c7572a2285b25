//! Display profiles and the character budgets derived from them.
//!
//! A [`DisplayProfile`] describes a target display surface (phone, laptop,
//! slide, tweet card). It is validated once at construction and never
//! mutated afterwards; adjustments such as a screenshot-density nudge
//! produce a new value via [`DisplayProfile::with_buffer`].

use crate::error::{Error, Result};
use serde::Serialize;

/// Geometry and font metrics of a target display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayProfile {
    name: String,
    width_px: u32,
    height_px: u32,
    font_size_px: u32,
    ruler_columns: u32,
    buffer: f64,
}

impl DisplayProfile {
    /// Create a validated profile.
    ///
    /// Fails with [`Error::InvalidGeometry`] when the name is blank, any
    /// dimension is zero, or `buffer` lies outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        width_px: u32,
        height_px: u32,
        font_size_px: u32,
        ruler_columns: u32,
        buffer: f64,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::geometry("name", "must not be empty"));
        }
        for (field, value) in [
            ("width_px", width_px),
            ("height_px", height_px),
            ("font_size_px", font_size_px),
            ("ruler_columns", ruler_columns),
        ] {
            if value == 0 {
                return Err(Error::geometry(field, "must be > 0"));
            }
        }
        validate_buffer(buffer)?;

        Ok(Self {
            name,
            width_px,
            height_px,
            font_size_px,
            ruler_columns,
            buffer,
        })
    }

    /// Return a copy of this profile with a different buffer ratio.
    pub fn with_buffer(&self, buffer: f64) -> Result<Self> {
        validate_buffer(buffer)?;
        Ok(Self {
            buffer,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn font_size_px(&self) -> u32 {
        self.font_size_px
    }

    pub fn ruler_columns(&self) -> u32 {
        self.ruler_columns
    }

    /// Fraction of the raw character budget actually targeted, in `(0, 1]`.
    pub fn buffer(&self) -> f64 {
        self.buffer
    }
}

fn validate_buffer(buffer: f64) -> Result<()> {
    if !buffer.is_finite() || buffer <= 0.0 || buffer > 1.0 {
        return Err(Error::geometry(
            "buffer",
            format!("must be in (0, 1], got {buffer}"),
        ));
    }
    Ok(())
}

/// Character budget derived from a profile's geometry.
///
/// Ephemeral: recomputed for every profile on every summarization call.
/// `target_chars <= char_budget` and both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Budget {
    /// Characters per line (capped by the editor ruler).
    pub columns: usize,
    /// Visible lines.
    pub lines: usize,
    /// `columns * lines`.
    pub char_budget: usize,
    /// `char_budget` scaled down by the profile buffer.
    pub target_chars: usize,
}
