//! End-to-end integration tests for screenfit.
//!
//! These tests run the full pipeline across crates: profiles resolved by
//! the config store, budgets and layered summaries from the engine, and
//! screenshot text read from disk.

use screenfit_config::{AppConfig, ProfileStore};
use screenfit_core::{
    DisplayProfile, Error, ExamplesPlacement, LayerName, Persona, Summarizer, parse_layers,
};
use screenfit_engine::persona::{apply, overhead};
use screenfit_engine::token::{chars_to_tokens, tokens_to_chars};
use screenfit_engine::{
    LayerAllocator, METADATA_TAG_OVERHEAD, PersonaRegistry, PlainTextAnalyzer, ProfileCoordinator,
    SentenceSummarizer, budget_for_profile, compute_budget, plan_layer,
    screenshot_aware_summarize,
};
use std::sync::atomic::{AtomicUsize, Ordering};

const REPORT: &str = "This is a sample text for testing the layered summarization system. \
    It contains multiple sentences that should be summarized differently based on the \
    target display profiles. The technical implementation uses budget calculations to \
    determine appropriate lengths. Each user sees a fix tailored to the problem at hand, \
    and the system adapts vocabulary to the reader.";

fn store() -> (tempfile::TempDir, ProfileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());
    (dir, store)
}

fn is_lower_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

// ── Budgets ──────────────────────────────────────────────────────────────

#[test]
fn e2e_builtin_profiles_budget_sanely() {
    let (_dir, store) = store();
    let profiles = store
        .parse_profile_list("laptop,phone,slides,tweet", None)
        .unwrap();
    for profile in &profiles {
        let budget = budget_for_profile(profile);
        assert!(budget.target_chars >= 1, "{}", profile.name());
        assert!(budget.target_chars <= budget.char_budget, "{}", profile.name());
    }

    let laptop = budget_for_profile(&profiles[0]);
    let phone = budget_for_profile(&profiles[1]);
    assert!(laptop.target_chars > 1000);
    assert!(phone.target_chars < laptop.target_chars / 2);
}

#[test]
fn e2e_budget_is_monotonic_in_surface() {
    let mut previous = 0;
    for width in (100..=4000).step_by(150) {
        let budget = compute_budget(width, 900, 14, 200, 0.9).unwrap();
        assert!(budget.char_budget >= previous, "width {width}");
        previous = budget.char_budget;
    }

    let mut previous = 0;
    for height in (50..=3000).step_by(95) {
        let budget = compute_budget(1200, height, 14, 80, 0.9).unwrap();
        assert!(budget.char_budget >= previous, "height {height}");
        previous = budget.char_budget;
    }
}

#[test]
fn e2e_invalid_geometry_is_rejected_at_construction() {
    assert!(matches!(
        DisplayProfile::new("broken", 0, 600, 14, 80, 0.9),
        Err(Error::InvalidGeometry { .. })
    ));
    assert!(compute_budget(800, 600, 0, 80, 0.9).is_err());
}

#[test]
fn e2e_token_round_trip() {
    for ratio in [0.5, 1.0, 2.5, 3.7, 4.0, 6.2] {
        for tokens in [0usize, 1, 7, 100, 4096] {
            let chars = tokens_to_chars(tokens, ratio).unwrap();
            let back = chars_to_tokens(chars, ratio).unwrap();
            assert!(
                back.abs_diff(tokens.max(1)) <= 1,
                "ratio {ratio} tokens {tokens} -> {back}"
            );
        }
    }
}

// ── Layered summaries ───────────────────────────────────────────────────

#[test]
fn e2e_layers_fit_their_budgets_without_persona() {
    let (_dir, store) = store();
    let profiles = store.parse_profile_list("phone,tweet,laptop", None).unwrap();
    let result = ProfileCoordinator::default()
        .summarize_for_profiles(REPORT, &profiles, &["headline", "one_screen", "deep"], None)
        .unwrap();

    for profile in &profiles {
        let budget = budget_for_profile(profile);
        for layer in [LayerName::Headline, LayerName::OneScreen, LayerName::Deep] {
            let text = result.get(profile.name(), layer).unwrap();
            let plan = plan_layer(layer, budget.target_chars, None);
            assert!(
                text.chars().count() <= plan.layer_budget,
                "{}.{layer}: {} > {}",
                profile.name(),
                text.chars().count(),
                plan.layer_budget
            );
        }
    }
}

#[test]
fn e2e_laptop_headline_with_persona_is_short() {
    let laptop = DisplayProfile::new("laptop", 1920, 1080, 14, 80, 0.9).unwrap();
    let target = budget_for_profile(&laptop).target_chars;

    for persona in PersonaRegistry::builtin().names() {
        let result = ProfileCoordinator::default()
            .summarize_for_profiles(REPORT, &[laptop.clone()], &["headline"], Some(persona))
            .unwrap();
        let headline = result.get("laptop", LayerName::Headline).unwrap();
        assert!(
            headline.chars().count() * 5 < target,
            "{persona}: {} chars",
            headline.chars().count()
        );
        let plan = plan_layer(LayerName::Headline, target, PersonaRegistry::builtin().get(persona));
        assert!(headline.chars().count() <= plan.content_budget);
    }
}

#[test]
fn e2e_headline_uses_persona_vocabulary() {
    let phone = DisplayProfile::new("phone", 375, 667, 12, 40, 0.85).unwrap();
    let text = "The user found a problem. We shipped a fix the same day.";
    let result = ProfileCoordinator::default()
        .summarize_for_profiles(text, &[phone], &["headline"], Some("developer"))
        .unwrap();
    let headline = result.get("phone", LayerName::Headline).unwrap();
    assert!(headline.contains("end-user"));
    assert!(headline.contains("issue"));
    assert!(!headline.contains("From a"));
}

#[test]
fn e2e_deep_layer_carries_fingerprint() {
    let (_dir, store) = store();
    let profiles = store.parse_profile_list("tweet,laptop", None).unwrap();
    for persona in [None, Some("manager")] {
        let result = ProfileCoordinator::default()
            .summarize_for_profiles(REPORT, &profiles, &["deep"], persona)
            .unwrap();
        for (_, layers) in result.iter() {
            let deep = layers.get(LayerName::Deep).unwrap();
            assert!(deep.starts_with("[hash:"), "{deep}");
            let hash = &deep[6..14];
            assert!(is_lower_hex(hash), "{hash}");
            assert_eq!(&deep[14..16], "] ");
        }
    }
    assert_eq!(METADATA_TAG_OVERHEAD, "[hash:00000000] ".len());
}

#[test]
fn e2e_append_persona_context_survives_any_budget() {
    let persona = PersonaRegistry::builtin().resolve("designer").unwrap();
    let context = persona.context_prefix.as_deref().unwrap();
    let summarizer = SentenceSummarizer::new();
    let allocator = LayerAllocator::new(&summarizer);

    for budget in [1, 10, 50, 200, 1000, 5000] {
        let layers = allocator
            .allocate(REPORT, budget, &["one_screen", "deep"], Some(persona))
            .unwrap();
        for (layer, text) in layers.iter() {
            assert!(text.contains(context), "budget {budget} {layer}");
            assert!(text.contains("Example: Consider visual hierarchy and layout."));
        }
    }
}

#[test]
fn e2e_persona_overhead_matches_apply() {
    let text = "Quarterly numbers are in.";
    let shapes = [
        Persona::new("bare"),
        Persona::new("context").with_context("Read this as finance:"),
        Persona::new("examples")
            .with_example("Revenue grew.")
            .with_example("Costs fell."),
        Persona::new("both")
            .with_context("Read this as finance:")
            .with_example("Revenue grew."),
        Persona::new("prepended")
            .with_context("Read this as finance:")
            .with_example("Revenue grew.")
            .with_placement(ExamplesPlacement::Prepend),
        Persona::new("no-examples")
            .with_context("Read this as finance:")
            .with_example("Never shown.")
            .with_placement(ExamplesPlacement::None),
    ];
    // vocabulary changes length, so builtins are compared without it
    let builtins = PersonaRegistry::builtin().iter().map(|p| Persona {
        vocabulary_mappings: Vec::new(),
        ..p.clone()
    });
    for persona in shapes.into_iter().chain(builtins) {
        let applied = apply(&persona, text, true, true);
        assert_eq!(
            applied.chars().count() - text.chars().count(),
            overhead(&persona),
            "{}",
            persona.name
        );
    }
}

#[test]
fn e2e_summaries_are_deterministic() {
    let (_dir, store) = store();
    let profiles = store.parse_profile_list("phone,slides", None).unwrap();
    let layers = ["deep", "headline", "one_screen"];
    let run = || {
        ProfileCoordinator::default()
            .summarize_for_profiles(REPORT, &profiles, &layers, Some("manager"))
            .unwrap()
    };
    let first = serde_json::to_string(&run()).unwrap();
    let second = serde_json::to_string(&run()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn e2e_json_follows_request_order() {
    let (_dir, store) = store();
    let profiles = store.parse_profile_list("tweet,laptop,phone", None).unwrap();
    let result = ProfileCoordinator::default()
        .summarize_for_profiles(REPORT, &profiles, &["deep", "headline"], None)
        .unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let tweet = json.find("\"tweet\"").unwrap();
    let laptop = json.find("\"laptop\"").unwrap();
    let phone = json.find("\"phone\"").unwrap();
    assert!(tweet < laptop && laptop < phone);
    assert!(json.find("\"deep\"").unwrap() < json.find("\"headline\"").unwrap());
}

// ── Failures ─────────────────────────────────────────────────────────────

/// Counts calls so failures can be shown to happen before any work.
struct CountingSummarizer(AtomicUsize);

impl Summarizer for CountingSummarizer {
    fn summarize(&self, text: &str, max_chars: usize) -> String {
        self.0.fetch_add(1, Ordering::SeqCst);
        text.chars().take(max_chars).collect()
    }
}

#[test]
fn e2e_unknown_names_fail_before_summarizing() {
    let counter = CountingSummarizer(AtomicUsize::new(0));
    let coordinator = ProfileCoordinator::default().with_summarizer(&counter);
    let laptop = DisplayProfile::new("laptop", 1920, 1080, 14, 80, 0.9).unwrap();

    let err = coordinator
        .summarize_for_profiles(REPORT, &[laptop.clone()], &["headline", "summary"], None)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownLayer { .. }));

    let err = coordinator
        .summarize_for_profiles(REPORT, &[laptop], &["headline"], Some("lawyer"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPersona { .. }));
    assert!(err.to_string().contains("developer"));

    assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    assert!(parse_layers(&["deep", "Deep"]).is_err());
}

#[test]
fn e2e_unknown_profile_is_reported() {
    let (_dir, store) = store();
    let err = store.parse_profile_list("laptop,smartwatch", None).unwrap_err();
    assert!(err.to_string().contains("smartwatch"));
}

// ── Config and profile files ─────────────────────────────────────────────

#[test]
fn e2e_saved_profile_drives_summaries() {
    let (dir, store) = store();
    let kiosk = DisplayProfile::new("kiosk", 800, 480, 16, 50, 0.8).unwrap();
    store.save_profile(&kiosk, None).unwrap();

    let list = dir.path().join("targets.json");
    std::fs::write(&list, r#"{"profiles": ["kiosk", "phone"]}"#).unwrap();
    let profiles = store
        .parse_profile_list(&format!("@{}", list.display()), Some(0.6))
        .unwrap();
    assert_eq!(profiles[0].name(), "kiosk");
    assert!((profiles[0].buffer() - 0.6).abs() < 1e-9);

    let result = ProfileCoordinator::default()
        .summarize_for_profiles(REPORT, &profiles, &["one_screen"], None)
        .unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.get("kiosk", LayerName::OneScreen).is_some());
}

#[test]
fn e2e_config_personas_join_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_persona = "ops"

[[personas]]
name = "ops"
vocabulary_mappings = [["deploy", "rollout"]]
context_prefix = "On-call view:"
examples_placement = "none"
"#,
    )
    .unwrap();
    let config = AppConfig::load_from(&path).unwrap();

    let registry = config
        .personas
        .iter()
        .cloned()
        .fold(PersonaRegistry::builtin().clone(), PersonaRegistry::with_persona);
    let coordinator = ProfileCoordinator::default().with_registry(&registry);
    let laptop = DisplayProfile::new("laptop", 1920, 1080, 14, 80, 0.9).unwrap();

    let result = coordinator
        .summarize_for_profiles(
            "We deploy on Fridays. Every deploy is watched.",
            &[laptop],
            &["headline", "one_screen"],
            config.default_persona.as_deref(),
        )
        .unwrap();
    assert!(result.get("laptop", LayerName::Headline).unwrap().contains("rollout"));
    let one_screen = result.get("laptop", LayerName::OneScreen).unwrap();
    assert!(one_screen.starts_with("On-call view:"));
    assert!(one_screen.contains("Every rollout is watched."));
}

// ── Screenshots ──────────────────────────────────────────────────────────

#[test]
fn e2e_screenshot_text_file_is_summarized() {
    let dir = tempfile::tempdir().unwrap();
    let capture = dir.path().join("capture.txt");
    std::fs::write(
        &capture,
        "Build 1432 failed on the integration stage.\n\
         Three tests timed out waiting for the database.\n\
         Retrying with a larger pool fixed the run.",
    )
    .unwrap();

    let (_store_dir, store) = store();
    let profiles = store.parse_profile_list("phone,laptop", None).unwrap();
    let summary = screenshot_aware_summarize(
        &ProfileCoordinator::default(),
        &PlainTextAnalyzer,
        &capture,
        &profiles,
        &["headline", "deep"],
        None,
    )
    .unwrap();

    assert_eq!(summary.metadata.regions_found, 3);
    assert!(summary.metadata.text_density > 0.7);
    assert!(
        summary
            .summaries
            .get("laptop", LayerName::Deep)
            .unwrap()
            .starts_with("[hash:")
    );

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["_extraction_metadata"]["source"]
        .as_str()
        .unwrap()
        .ends_with("capture.txt"));
}

#[test]
fn e2e_blank_screenshot_text_is_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let capture = dir.path().join("blank.txt");
    std::fs::write(&capture, "\n   \n").unwrap();
    let laptop = DisplayProfile::new("laptop", 1920, 1080, 14, 80, 0.9).unwrap();

    let err = screenshot_aware_summarize(
        &ProfileCoordinator::default(),
        &PlainTextAnalyzer,
        &capture,
        &[laptop],
        &["headline"],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyInput(_)));
}
