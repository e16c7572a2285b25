//! Multi-profile coordination: one budget per display profile, one layered
//! summary per budget.
//!
//! All names (persona, layers, profiles) are resolved before any
//! summarization starts, so a bad request fails without partial results.
//! Profiles share nothing but the read-only persona registry and layer
//! table.

use crate::allocator::LayerAllocator;
use crate::budget::budget_for_profile;
use crate::persona::PersonaRegistry;
use crate::summarizer::SentenceSummarizer;
use screenfit_core::{DisplayProfile, Error, Result, Summarizer, SummaryResult, parse_layers};
use std::collections::HashSet;
use tracing::{debug, info};

static DEFAULT_SUMMARIZER: SentenceSummarizer = SentenceSummarizer::new();

/// Produces a profile × layer table of summaries.
pub struct ProfileCoordinator<'a> {
    registry: &'a PersonaRegistry,
    summarizer: &'a dyn Summarizer,
}

impl Default for ProfileCoordinator<'static> {
    fn default() -> Self {
        Self {
            registry: PersonaRegistry::builtin(),
            summarizer: &DEFAULT_SUMMARIZER,
        }
    }
}

impl<'a> ProfileCoordinator<'a> {
    /// Coordinator over a specific registry and summarizer.
    pub fn new(registry: &'a PersonaRegistry, summarizer: &'a dyn Summarizer) -> Self {
        Self {
            registry,
            summarizer,
        }
    }

    /// Swap in a different summarizer.
    pub fn with_summarizer(self, summarizer: &'a dyn Summarizer) -> Self {
        Self { summarizer, ..self }
    }

    /// Swap in a different persona registry.
    pub fn with_registry(self, registry: &'a PersonaRegistry) -> Self {
        Self { registry, ..self }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        self.registry
    }

    /// Summarize `text` for every profile and requested layer.
    ///
    /// Each profile's `target_chars` becomes its total character budget.
    pub fn summarize_for_profiles<S: AsRef<str>>(
        &self,
        text: &str,
        profiles: &[DisplayProfile],
        layer_names: &[S],
        persona_name: Option<&str>,
    ) -> Result<SummaryResult> {
        let persona = persona_name
            .map(|name| self.registry.resolve(name))
            .transpose()?;
        let layers = parse_layers(layer_names)?;

        let mut seen = HashSet::new();
        for profile in profiles {
            if !seen.insert(profile.name()) {
                return Err(Error::DuplicateProfile(profile.name().to_string()));
            }
        }

        let allocator = LayerAllocator::new(self.summarizer);
        let mut result = SummaryResult::new();
        for profile in profiles {
            let budget = budget_for_profile(profile);
            debug!(
                profile = profile.name(),
                columns = budget.columns,
                lines = budget.lines,
                target_chars = budget.target_chars,
                "Computed profile budget"
            );
            let summaries = allocator.allocate_layers(text, budget.target_chars, &layers, persona);
            result.insert(profile.name(), summaries);
        }

        info!(
            profiles = result.len(),
            layers = layers.len(),
            persona = persona_name.unwrap_or("none"),
            "Generated layered summaries"
        );
        Ok(result)
    }
}
