//! Persona transform and overhead accounting.
//!
//! [`apply`] produces the persona-voiced text:
//!
//! ```text
//! [examples\n\n]        <- placement = prepend
//! [context\n\n]
//! vocabulary-substituted text
//! [\n\nexamples]        <- placement = append
//! ```
//!
//! [`overhead`] predicts exactly how many characters `apply` adds when
//! both context and examples are requested, so the allocator can reserve
//! room for them without running the transform.

use screenfit_core::{Error, ExamplesPlacement, Persona, Result};
use std::sync::LazyLock;

/// Separator between persona sections and the text.
const SECTION_SEPARATOR: &str = "\n\n";

/// Replace vocabulary terms, pair by pair, over the progressively
/// transformed string. Empty source terms are ignored.
pub fn substitute_vocabulary(persona: &Persona, text: &str) -> String {
    persona
        .vocabulary_mappings
        .iter()
        .filter(|(old, _)| !old.is_empty())
        .fold(text.to_string(), |acc, (old, new)| acc.replace(old, new))
}

/// Apply the persona transform to `text`.
pub fn apply(
    persona: &Persona,
    text: &str,
    include_examples: bool,
    include_context: bool,
) -> String {
    let mut transformed = substitute_vocabulary(persona, text);

    if include_context && let Some(context) = persona.context_text() {
        transformed = format!("{context}{SECTION_SEPARATOR}{transformed}");
    }

    if include_examples && let Some(examples) = persona.examples_text() {
        transformed = match persona.examples_placement {
            ExamplesPlacement::Prepend => format!("{examples}{SECTION_SEPARATOR}{transformed}"),
            ExamplesPlacement::Append => format!("{transformed}{SECTION_SEPARATOR}{examples}"),
            ExamplesPlacement::None => transformed,
        };
    }

    transformed
}

/// Characters `apply(persona, text, true, true)` adds beyond the
/// vocabulary-substituted text.
///
/// - context: its length plus the 2-char separator;
/// - examples (unless placement is `none`): one `"Example: …"` line plus a
///   newline per sentence, plus one more char because the block's blank-line
///   separator is two chars while the last line carries no newline.
pub fn overhead(persona: &Persona) -> usize {
    let mut total = 0;

    if let Some(context) = persona.context_text() {
        total += context.chars().count() + SECTION_SEPARATOR.len();
    }

    if persona.examples_placement != ExamplesPlacement::None
        && !persona.example_sentences.is_empty()
    {
        total += persona
            .example_sentences
            .iter()
            .map(|s| format!("Example: {s}").chars().count() + 1)
            .sum::<usize>();
        total += 1;
    }

    total
}

/// Persona material appended after a summary, outside its budget:
/// context and examples separated by blank lines. `None` when the persona
/// carries neither.
pub fn postfix(persona: &Persona) -> Option<String> {
    let items: Vec<String> = persona
        .context_text()
        .map(str::to_string)
        .into_iter()
        .chain(persona.examples_text())
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items.join(SECTION_SEPARATOR))
    }
}

// ── Registry ──────────────────────────────────────────────────────────────

static BUILTIN: LazyLock<PersonaRegistry> = LazyLock::new(|| PersonaRegistry {
    personas: vec![
        Persona::new("developer")
            .with_mapping("user", "end-user")
            .with_mapping("problem", "issue")
            .with_mapping("fix", "resolve")
            .with_example("Focus on technical implementation details.")
            .with_example("Consider API design patterns.")
            .with_context("As a software developer reviewing this content:"),
        Persona::new("designer")
            .with_mapping("functionality", "user experience")
            .with_mapping("code", "interface")
            .with_example("Consider visual hierarchy and layout.")
            .with_example("Focus on user interaction patterns.")
            .with_context("From a UX/UI design perspective:"),
        Persona::new("manager")
            .with_mapping("technical", "strategic")
            .with_mapping("implementation", "execution")
            .with_example("Consider business impact and timeline.")
            .with_example("Focus on resource allocation.")
            .with_context("From a project management viewpoint:"),
    ],
});

/// Named personas, looked up by exact name.
///
/// The built-in registry is a process-wide constant; callers that add
/// personas (e.g. from a config file) build their own owned registry on top
/// of it and never mutate the shared one.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// The built-in personas: developer, designer, manager.
    pub fn builtin() -> &'static PersonaRegistry {
        &BUILTIN
    }

    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            personas: Vec::new(),
        }
    }

    /// Add a persona, replacing any existing one with the same name.
    pub fn with_persona(mut self, persona: Persona) -> Self {
        match self.personas.iter_mut().find(|p| p.name == persona.name) {
            Some(existing) => *existing = persona,
            None => self.personas.push(persona),
        }
        self
    }

    /// Resolve a persona by name, failing with [`Error::UnknownPersona`].
    pub fn resolve(&self, name: &str) -> Result<&Persona> {
        self.get(name).ok_or_else(|| Error::UnknownPersona {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }
}
