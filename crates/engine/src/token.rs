//! Token ↔ character conversions.
//!
//! Character budgets come from geometry; token budgets are what language
//! models care about. The default ratio is ~4 characters per token, which
//! is within ~10% for BPE tokenizers on English text. A [`TokenCounter`]
//! can calibrate the ratio from sample text.

use screenfit_core::{Budget, Error, Result, TokenCounter};

/// Fallback characters per token when nothing better is known.
pub const DEFAULT_CHARS_PER_TOKEN: f64 = 4.0;

/// Estimate the token count for a string.
///
/// Heuristic: 1 token ≈ 4 characters. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Estimate the average characters per token.
///
/// Uses `counter` over the non-empty `samples`; returns `fallback` when no
/// counter is given, no samples exist, or the counter reports zero tokens.
pub fn estimate_avg_chars_per_token(
    samples: &[&str],
    counter: Option<&dyn TokenCounter>,
    fallback: f64,
) -> f64 {
    let Some(counter) = counter else {
        return fallback;
    };

    let (chars, tokens) = samples
        .iter()
        .filter(|s| !s.is_empty())
        .fold((0usize, 0usize), |(c, t), s| {
            (c + s.chars().count(), t + counter.count_tokens(s))
        });

    if tokens == 0 {
        return fallback;
    }
    chars as f64 / tokens as f64
}

/// Estimated tokens for `chars` characters. Never less than 1.
pub fn chars_to_tokens(chars: usize, chars_per_token: f64) -> Result<usize> {
    check_ratio(chars_per_token)?;
    Ok(((chars as f64 / chars_per_token).round() as usize).max(1))
}

/// Rough character count that `tokens` tokens would produce.
pub fn tokens_to_chars(tokens: usize, chars_per_token: f64) -> Result<usize> {
    check_ratio(chars_per_token)?;
    Ok((tokens as f64 * chars_per_token).round() as usize)
}

/// A budget's `target_chars` expressed in tokens.
pub fn target_tokens(budget: &Budget, chars_per_token: f64) -> Result<usize> {
    chars_to_tokens(budget.target_chars, chars_per_token)
}

fn check_ratio(chars_per_token: f64) -> Result<()> {
    if !chars_per_token.is_finite() || chars_per_token <= 0.0 {
        return Err(Error::InvalidRatio(chars_per_token));
    }
    Ok(())
}
