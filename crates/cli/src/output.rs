//! Rendering of summary tables for the terminal.

use screenfit_config::OutputFormat;
use screenfit_core::SummaryResult;
use screenfit_engine::ScreenshotSummary;

/// Render summaries in the requested format. No trailing newline.
pub fn render(result: &SummaryResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result),
        OutputFormat::Compact => Ok(compact(result)),
        OutputFormat::Stacked => Ok(stacked(result)),
    }
}

/// Like [`render`], with the extraction metadata appended (or embedded,
/// for JSON).
pub fn render_screenshot(
    summary: &ScreenshotSummary,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(summary);
    }

    let meta = &summary.metadata;
    let mut out = render(&summary.summaries, format)?;
    out.push_str(&format!(
        "\n\n[source: {}, density {:.2}, regions {}]",
        meta.source, meta.text_density, meta.regions_found
    ));
    Ok(out)
}

fn compact(result: &SummaryResult) -> String {
    result
        .iter()
        .flat_map(|(profile, layers)| {
            layers
                .iter()
                .map(move |(layer, text)| format!("{profile}.{layer}: {text}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn stacked(result: &SummaryResult) -> String {
    let mut lines = Vec::new();
    for (profile, layers) in result.iter() {
        lines.push(format!("=== {} ===", profile.to_uppercase()));
        for (layer, text) in layers.iter() {
            lines.push(format!("--- {} ---", layer.title()));
            lines.push(text.trim().to_string());
            lines.push(String::new());
        }
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}
