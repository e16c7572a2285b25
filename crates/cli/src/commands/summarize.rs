//! `screenfit summarize`: layered summaries for each requested profile.

use crate::commands::{load_config, persona_registry, resolve_profiles};
use crate::output;
use clap::Args;
use screenfit_config::OutputFormat;
use screenfit_core::Error;
use screenfit_engine::{PlainTextAnalyzer, ProfileCoordinator, screenshot_aware_summarize};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Input file; reads stdin when absent or "-"
    pub file: Option<PathBuf>,

    /// Profiles: comma-separated names, paths, or @file
    #[arg(short, long)]
    pub profiles: Option<String>,

    /// Layers to generate, comma-separated (headline, one_screen, deep)
    #[arg(short, long, value_delimiter = ',')]
    pub layers: Option<Vec<String>>,

    /// Persona to adapt the summaries for
    #[arg(long)]
    pub persona: Option<String>,

    /// Output format: stacked, json, or compact
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Override every profile's buffer ratio, in (0, 1]
    #[arg(short, long)]
    pub buffer: Option<f64>,

    /// Treat FILE as text extracted from a screenshot; its density adjusts
    /// each profile's buffer
    #[arg(long)]
    pub ocr_text: bool,
}

pub fn run(args: SummarizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let profiles = resolve_profiles(&config, args.profiles.as_deref(), args.buffer)?;
    let layers: Vec<String> = args
        .layers
        .unwrap_or_else(|| config.default_layers.clone())
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    let persona = args.persona.or_else(|| config.default_persona.clone());
    let format = args.format.unwrap_or(config.output_format);

    let registry = persona_registry(&config);
    let coordinator = ProfileCoordinator::default().with_registry(&registry);

    let rendered = if args.ocr_text {
        let path = args
            .file
            .filter(|p| p != Path::new("-"))
            .ok_or("--ocr-text needs an input FILE")?;
        let summary = screenshot_aware_summarize(
            &coordinator,
            &PlainTextAnalyzer,
            &path,
            &profiles,
            &layers,
            persona.as_deref(),
        )?;
        output::render_screenshot(&summary, format)?
    } else {
        let text = read_input(args.file.as_deref())?;
        if text.trim().is_empty() {
            return Err(Error::EmptyInput("input text is blank".into()).into());
        }
        let result =
            coordinator.summarize_for_profiles(&text, &profiles, &layers, persona.as_deref())?;
        output::render(&result, format)?
    };

    println!("{rendered}");
    Ok(())
}

/// Read the whole input from a file, or stdin for `None` / `-`.
fn read_input(file: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()).into()),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
