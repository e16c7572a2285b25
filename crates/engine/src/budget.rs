//! Character budgets from display geometry.
//!
//! Glyph width and line height are fixed multiples of the font size:
//! monospace-ish text averages ~0.6em per glyph and is set at ~1.5em
//! leading. Columns are further capped by the editor ruler.

use screenfit_core::{Budget, DisplayProfile, Error, Result};

/// Average glyph width as a fraction of font size.
pub const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Line height as a multiple of font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.5;

/// Average glyph width in pixels for a font size.
pub fn avg_glyph_width(font_size_px: u32) -> f64 {
    font_size_px as f64 * GLYPH_WIDTH_RATIO
}

/// Line height in pixels for a font size.
pub fn line_height(font_size_px: u32) -> f64 {
    font_size_px as f64 * LINE_HEIGHT_RATIO
}

/// Compute the character budget for raw geometry.
///
/// Fails with [`Error::InvalidGeometry`] when width, height, font size or
/// ruler columns is zero, or when `buffer` is not a positive finite number.
/// Buffers above 1 are clamped to 1.
pub fn compute_budget(
    width_px: u32,
    height_px: u32,
    font_size_px: u32,
    ruler_columns: u32,
    buffer: f64,
) -> Result<Budget> {
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
    if !buffer.is_finite() || buffer <= 0.0 {
        return Err(Error::geometry(
            "buffer",
            format!("must be in (0, 1], got {buffer}"),
        ));
    }

    Ok(derive(
        width_px,
        height_px,
        font_size_px,
        ruler_columns,
        buffer.min(1.0),
    ))
}

/// Budget for an already-validated profile.
pub fn budget_for_profile(profile: &DisplayProfile) -> Budget {
    derive(
        profile.width_px(),
        profile.height_px(),
        profile.font_size_px(),
        profile.ruler_columns(),
        profile.buffer(),
    )
}

fn derive(
    width_px: u32,
    height_px: u32,
    font_size_px: u32,
    ruler_columns: u32,
    buffer: f64,
) -> Budget {
    let fitting_columns = (width_px as f64 / avg_glyph_width(font_size_px)).floor() as usize;
    let columns = fitting_columns.min(ruler_columns as usize).max(1);
    let lines = ((height_px as f64 / line_height(font_size_px)).floor() as usize).max(1);
    let char_budget = columns * lines;
    let target_chars = ((char_budget as f64 * buffer).floor() as usize).clamp(1, char_budget);

    Budget {
        columns,
        lines,
        char_budget,
        target_chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laptop_budget_reasonable() {
        let budget = compute_budget(1920, 1080, 14, 80, 0.9).unwrap();
        assert_eq!(budget.columns, 80);
        assert_eq!(budget.lines, 51);
        assert_eq!(budget.char_budget, 4080);
        assert_eq!(budget.target_chars, 3672);
        assert!(budget.target_chars > 1000);
        assert!(budget.target_chars < 10_000);
    }

    #[test]
    fn phone_budget_is_fraction_of_laptop() {
        let laptop = compute_budget(1920, 1080, 14, 80, 0.9).unwrap();
        let phone = compute_budget(375, 667, 12, 40, 0.85).unwrap();
        let ratio = phone.target_chars as f64 / laptop.target_chars as f64;
        assert!(ratio > 0.1 && ratio < 0.5, "unexpected ratio {ratio}");
    }

    #[test]
    fn zero_geometry_is_invalid() {
        assert!(matches!(
            compute_budget(0, 1080, 14, 80, 0.9),
            Err(Error::InvalidGeometry { field: "width_px", .. })
        ));
        assert!(compute_budget(1920, 0, 14, 80, 0.9).is_err());
        assert!(compute_budget(1920, 1080, 0, 80, 0.9).is_err());
    }

    #[test]
    fn non_positive_buffer_is_invalid() {
        assert!(compute_budget(1920, 1080, 14, 80, 0.0).is_err());
        assert!(compute_budget(1920, 1080, 14, 80, -0.5).is_err());
        assert!(compute_budget(1920, 1080, 14, 80, f64::INFINITY).is_err());
    }

    #[test]
    fn buffer_above_one_is_clamped() {
        let budget = compute_budget(1920, 1080, 14, 80, 1.7).unwrap();
        assert_eq!(budget.target_chars, budget.char_budget);
    }

    #[test]
    fn tiny_surfaces_still_get_one_char() {
        let budget = compute_budget(1, 1, 200, 80, 0.01).unwrap();
        assert_eq!(budget.columns, 1);
        assert_eq!(budget.lines, 1);
        assert_eq!(budget.char_budget, 1);
        assert_eq!(budget.target_chars, 1);
    }

    #[test]
    fn target_never_exceeds_char_budget() {
        for width in [1, 7, 50, 333, 1024, 4000] {
            for height in [1, 19, 400, 1080] {
                for font in [1, 9, 14, 32] {
                    for buffer in [0.05, 0.5, 0.9, 1.0] {
                        let b = compute_budget(width, height, font, 80, buffer).unwrap();
                        assert!(b.target_chars <= b.char_budget);
                        assert!(b.target_chars >= 1);
                        assert!(b.char_budget >= 1);
                    }
                }
            }
        }
    }

    #[test]
    fn growing_the_surface_never_shrinks_the_budget() {
        let mut previous = 0;
        for width in (10..3000).step_by(37) {
            let b = compute_budget(width, 900, 14, 120, 0.9).unwrap();
            assert!(b.char_budget >= previous);
            previous = b.char_budget;
        }
        let mut previous = 0;
        for height in (10..3000).step_by(41) {
            let b = compute_budget(1200, height, 14, 120, 0.9).unwrap();
            assert!(b.char_budget >= previous);
            previous = b.char_budget;
        }
    }

    #[test]
    fn profile_budget_matches_raw_geometry() {
        let profile = DisplayProfile::new("slides", 1024, 768, 18, 60, 0.8).unwrap();
        assert_eq!(
            budget_for_profile(&profile),
            compute_budget(1024, 768, 18, 60, 0.8).unwrap()
        );
    }
}
