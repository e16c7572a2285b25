//! The screenfit engine: from display geometry to layered summaries.
//!
//! The pipeline for one request:
//!
//! 1. **Budget** each display profile from its pixel geometry
//! 2. **Plan** every requested layer inside that budget, reserving room
//!    for the metadata tag and any persona material
//! 3. **Summarize** the text into the content budget with the configured
//!    [`Summarizer`](screenfit_core::Summarizer)
//! 4. **Collect** the results per profile, in request order
//!
//! Screenshot input runs the same pipeline after an analyzer extracts the
//! text and its density adjusts each profile's buffer.

pub mod allocator;
pub mod budget;
pub mod coordinator;
pub mod persona;
pub mod screenshot;
pub mod summarizer;
pub mod token;

pub use allocator::{
    AllocationBranch, LayerAllocator, LayerPlan, METADATA_TAG_OVERHEAD, MIN_CONTENT_FLOOR,
    fingerprint, plan_layer,
};
pub use budget::{budget_for_profile, compute_budget};
pub use coordinator::ProfileCoordinator;
pub use persona::PersonaRegistry;
pub use screenshot::{
    ExtractionMetadata, PlainTextAnalyzer, ScreenshotSummary, adjust_profiles_for_density,
    screenshot_aware_summarize,
};
pub use summarizer::SentenceSummarizer;
