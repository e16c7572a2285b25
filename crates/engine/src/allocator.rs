//! Layer allocation: splitting one character budget across summary layers.
//!
//! For each requested layer the allocator computes the layer's share of the
//! budget, subtracts persona and metadata overhead, picks a persona policy,
//! and hands the remaining content budget to the summarizer.
//!
//! # Policy (first match wins)
//!
//! | Branch | When | Summarized text | Content budget |
//! |--------|------|-----------------|----------------|
//! | vocabulary only | headline + persona with vocabulary | vocabulary-substituted | layer − metadata |
//! | persona addendum | persona places examples (append/prepend) | original | layer − metadata, persona appended outside the budget |
//! | inline persona | persona, layer > overhead + metadata + floor | fully persona-transformed | layer − persona − metadata |
//! | plain | otherwise | original | layer − metadata |
//!
//! The addendum branch never drops persona material for budget reasons, so
//! such layers can print longer than their nominal budget. Callers needing
//! a hard ceiling should use personas with `none` placement.
//!
//! # Determinism
//!
//! Allocation is deterministic: identical inputs always produce identical
//! outputs. The metadata tag is a content hash of the original text.

use crate::persona;
use screenfit_core::{
    ExamplesPlacement, LayerName, LayerSummaries, Persona, Result, Summarizer, parse_layers,
};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Hex characters in the content fingerprint.
pub const FINGERPRINT_LEN: usize = 8;

/// Characters reserved for the `"[hash:XXXXXXXX] "` tag.
pub const METADATA_TAG_OVERHEAD: usize = "[hash:] ".len() + FINGERPRINT_LEN;

/// Minimum content characters required before persona material is inlined.
pub const MIN_CONTENT_FLOOR: usize = 20;

/// Which persona policy a layer was produced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationBranch {
    VocabularyOnly,
    PersonaAddendum,
    InlinePersona,
    Plain,
}

/// Budget arithmetic for one layer, before any summarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerPlan {
    pub layer: LayerName,
    /// The layer's share of the total budget.
    pub layer_budget: usize,
    /// Characters reserved for the fingerprint tag.
    pub metadata_overhead: usize,
    /// Characters reserved for inline persona material.
    pub persona_overhead: usize,
    /// What the summarizer is allowed to produce.
    pub content_budget: usize,
    pub branch: AllocationBranch,
}

/// Short content fingerprint: the first [`FINGERPRINT_LEN`] hex chars of
/// the SHA-256 of `text`.
pub fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(&digest[..FINGERPRINT_LEN / 2])
}

/// Decide the policy and budgets for one layer.
pub fn plan_layer(layer: LayerName, char_budget: usize, persona: Option<&Persona>) -> LayerPlan {
    let spec = layer.spec();
    let layer_budget = (char_budget as f64 * spec.budget_fraction).floor() as usize;
    let metadata_overhead = if spec.includes_metadata_tag {
        METADATA_TAG_OVERHEAD
    } else {
        0
    };
    let plain_budget = layer_budget.saturating_sub(metadata_overhead);

    let (branch, persona_overhead) = match persona {
        Some(p) if layer == LayerName::Headline && p.has_vocabulary() => {
            (AllocationBranch::VocabularyOnly, 0)
        }
        Some(p)
            if matches!(
                p.examples_placement,
                ExamplesPlacement::Append | ExamplesPlacement::Prepend
            ) =>
        {
            (AllocationBranch::PersonaAddendum, 0)
        }
        Some(p) => {
            let overhead = persona::overhead(p);
            if layer_budget > overhead + metadata_overhead + MIN_CONTENT_FLOOR {
                (AllocationBranch::InlinePersona, overhead)
            } else {
                (AllocationBranch::Plain, 0)
            }
        }
        None => (AllocationBranch::Plain, 0),
    };

    LayerPlan {
        layer,
        layer_budget,
        metadata_overhead,
        persona_overhead,
        content_budget: plain_budget.saturating_sub(persona_overhead),
        branch,
    }
}

/// Splits a character budget across layers. Stateless; create one and
/// reuse it.
pub struct LayerAllocator<'a> {
    summarizer: &'a dyn Summarizer,
}

impl<'a> LayerAllocator<'a> {
    pub fn new(summarizer: &'a dyn Summarizer) -> Self {
        Self { summarizer }
    }

    /// Produce every requested layer for `text` under `char_budget`.
    ///
    /// Layer names are resolved before any summarization; an unknown name
    /// fails the whole call with `UnknownLayer`.
    pub fn allocate<S: AsRef<str>>(
        &self,
        text: &str,
        char_budget: usize,
        layer_names: &[S],
        persona: Option<&Persona>,
    ) -> Result<LayerSummaries> {
        let layers = parse_layers(layer_names)?;
        Ok(self.allocate_layers(text, char_budget, &layers, persona))
    }

    /// Like [`allocate`](Self::allocate) for already-resolved layers.
    pub fn allocate_layers(
        &self,
        text: &str,
        char_budget: usize,
        layers: &[LayerName],
        persona: Option<&Persona>,
    ) -> LayerSummaries {
        let mut out = LayerSummaries::new();
        for &layer in layers {
            out.insert(layer, self.render_layer(text, char_budget, layer, persona));
        }
        out
    }

    fn render_layer(
        &self,
        text: &str,
        char_budget: usize,
        layer: LayerName,
        persona: Option<&Persona>,
    ) -> String {
        let plan = plan_layer(layer, char_budget, persona);
        debug!(
            layer = %layer,
            branch = ?plan.branch,
            layer_budget = plan.layer_budget,
            content_budget = plan.content_budget,
            "Allocating layer"
        );

        let summary = match (plan.branch, persona) {
            (AllocationBranch::VocabularyOnly, Some(p)) => self.summarizer.summarize(
                &persona::substitute_vocabulary(p, text),
                plan.content_budget,
            ),
            (AllocationBranch::PersonaAddendum, Some(p)) => {
                let summary = self.summarizer.summarize(text, plan.content_budget);
                match persona::postfix(p) {
                    Some(postfix) => format!("{}\n\n{postfix}", summary.trim()),
                    None => summary,
                }
            }
            (AllocationBranch::InlinePersona, Some(p)) => self
                .summarizer
                .summarize(&persona::apply(p, text, true, true), plan.content_budget),
            _ => self.summarizer.summarize(text, plan.content_budget),
        };

        if layer.spec().includes_metadata_tag {
            format!("[hash:{}] {summary}", fingerprint(text))
        } else {
            summary
        }
    }
}
