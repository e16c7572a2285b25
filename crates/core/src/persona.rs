//! Personas: audience viewpoints expressed as a vocabulary, context and
//! example transform. The transform itself lives in the engine crate; this
//! module only defines the immutable value.

use serde::{Deserialize, Serialize};

/// Where a persona's example block goes relative to the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamplesPlacement {
    Prepend,
    #[default]
    Append,
    None,
}

impl ExamplesPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prepend => "prepend",
            Self::Append => "append",
            Self::None => "none",
        }
    }
}

/// An audience viewpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,

    /// Old term → new term, applied in declaration order.
    #[serde(default)]
    pub vocabulary_mappings: Vec<(String, String)>,

    #[serde(default)]
    pub example_sentences: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_prefix: Option<String>,

    #[serde(default)]
    pub examples_placement: ExamplesPlacement,
}

impl Persona {
    /// A persona with no transforms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vocabulary_mappings: Vec::new(),
            example_sentences: Vec::new(),
            context_prefix: None,
            examples_placement: ExamplesPlacement::default(),
        }
    }

    pub fn with_mapping(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.vocabulary_mappings.push((old.into(), new.into()));
        self
    }

    pub fn with_example(mut self, sentence: impl Into<String>) -> Self {
        self.example_sentences.push(sentence.into());
        self
    }

    pub fn with_context(mut self, prefix: impl Into<String>) -> Self {
        self.context_prefix = Some(prefix.into());
        self
    }

    pub fn with_placement(mut self, placement: ExamplesPlacement) -> Self {
        self.examples_placement = placement;
        self
    }

    pub fn has_vocabulary(&self) -> bool {
        !self.vocabulary_mappings.is_empty()
    }

    /// The context prefix, if set and non-empty.
    pub fn context_text(&self) -> Option<&str> {
        self.context_prefix.as_deref().filter(|c| !c.is_empty())
    }

    /// Example lines formatted as `"Example: <sentence>"`, newline-joined.
    /// `None` when the persona has no examples.
    pub fn examples_text(&self) -> Option<String> {
        if self.example_sentences.is_empty() {
            return None;
        }
        Some(
            self.example_sentences
                .iter()
                .map(|s| format!("Example: {s}"))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
