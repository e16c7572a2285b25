//! Default extractive summarizer: whole leading sentences, or a hard cut
//! with an ellipsis when not even the first sentence fits.

use screenfit_core::{ELLIPSIS, Summarizer};

/// Keeps leading sentences that fit the ceiling.
///
/// The ceiling is hard: output never exceeds `max_chars` characters, the
/// ellipsis included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentenceSummarizer {
    max_sentences: Option<usize>,
}

impl SentenceSummarizer {
    pub const fn new() -> Self {
        Self {
            max_sentences: None,
        }
    }

    /// Stop after at most `max` sentences even if more would fit.
    pub const fn with_max_sentences(max: usize) -> Self {
        Self {
            max_sentences: Some(max),
        }
    }
}

impl Summarizer for SentenceSummarizer {
    fn summarize(&self, text: &str, max_chars: usize) -> String {
        let normalized = normalize_whitespace(text);
        if normalized.is_empty() {
            return String::new();
        }

        let limit = self.max_sentences.unwrap_or(usize::MAX);
        let mut out = String::new();
        let mut used = 0;
        for (taken, sentence) in split_sentences(&normalized).into_iter().enumerate() {
            if taken >= limit {
                break;
            }
            let extra = sentence.chars().count() + usize::from(!out.is_empty());
            if used + extra > max_chars {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(sentence);
            used += extra;
        }

        if out.is_empty() {
            truncate_with_ellipsis(&normalized, max_chars)
        } else {
            out
        }
    }
}

/// Cut `text` so that it plus [`ELLIPSIS`] fits `max_chars`.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let marker_len = ELLIPSIS.chars().count();
    if max_chars < marker_len {
        return ELLIPSIS.chars().take(max_chars).collect();
    }
    let kept: String = text.chars().take(max_chars - marker_len).collect();
    format!("{}{ELLIPSIS}", kept.trim_end())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split at `.`, `!` or `?` followed by a space or the end of text.
/// Expects whitespace-normalized input.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = match chars.peek() {
                None => true,
                Some((_, next)) => *next == ' ',
            };
            if at_boundary {
                let end = idx + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
