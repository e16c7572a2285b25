//! Subcommand implementations and the resolution helpers they share.

pub mod budget;
pub mod config_cmd;
pub mod personas;
pub mod profiles;
pub mod summarize;

use screenfit_config::{AppConfig, ProfileStore};
use screenfit_core::DisplayProfile;
use screenfit_engine::PersonaRegistry;

/// Load the config, reporting which file failed.
pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Resolve the profiles for a run.
///
/// An explicit list wins over the config defaults; an explicit buffer wins
/// over the config's `buffer_override`.
pub fn resolve_profiles(
    config: &AppConfig,
    requested: Option<&str>,
    buffer: Option<f64>,
) -> Result<Vec<DisplayProfile>, Box<dyn std::error::Error>> {
    let store = ProfileStore::from_config(config);
    let spec = requested
        .map(String::from)
        .unwrap_or_else(|| config.default_profiles.join(","));
    let profiles = store.parse_profile_list(&spec, buffer.or(config.buffer_override))?;
    if profiles.is_empty() {
        return Err("no display profiles selected".into());
    }
    Ok(profiles)
}

/// The built-in personas plus any defined in config, which replace
/// built-ins of the same name.
pub fn persona_registry(config: &AppConfig) -> PersonaRegistry {
    config
        .personas
        .iter()
        .cloned()
        .fold(PersonaRegistry::builtin().clone(), PersonaRegistry::with_persona)
}
