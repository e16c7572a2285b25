//! Summarizer trait: the pluggable text shortener.
//!
//! The engine only does budget bookkeeping; turning text into a shorter
//! text is delegated to a [`Summarizer`]. Any `Fn(&str, usize) -> String`
//! closure is a summarizer too, which keeps tests and ad-hoc strategies
//! cheap to write.

/// Marker appended when a summarizer has to cut text mid-unit.
pub const ELLIPSIS: &str = "...";

/// Shortens text to a character ceiling.
///
/// Contract relied on by the engine:
/// - deterministic and pure: same input, same output;
/// - the result is at most `max_chars` characters (Unicode scalar values),
///   cutting with [`ELLIPSIS`] when no natural boundary fits.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, max_chars: usize) -> String;
}

impl<F> Summarizer for F
where
    F: Fn(&str, usize) -> String + Send + Sync,
{
    fn summarize(&self, text: &str, max_chars: usize) -> String {
        self(text, max_chars)
    }
}

/// Counts tokens for a piece of text (e.g. a BPE tokenizer binding).
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_summarizers() {
        let first_n = |text: &str, max: usize| text.chars().take(max).collect::<String>();
        let summarizer: &dyn Summarizer = &first_n;
        assert_eq!(summarizer.summarize("abcdef", 3), "abc");
    }
}
