//! Configuration loading, validation, and management for screenfit.
//!
//! Loads configuration from `~/.screenfit/config.toml` with environment
//! variable overrides. Validates all settings at startup, including every
//! custom profile and persona, so a bad file is reported before any text
//! is summarized.

pub mod profiles;

pub use profiles::{BUILTIN_PROFILES, ProfileConfig, ProfileStore, builtin_profile};

use screenfit_core::{Persona, parse_layers};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The root configuration structure.
///
/// Maps directly to `~/.screenfit/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Profiles used when none are given on the command line
    #[serde(default = "default_profiles")]
    pub default_profiles: Vec<String>,

    /// Layers generated when none are given on the command line
    #[serde(default = "default_layers")]
    pub default_layers: Vec<String>,

    /// Persona applied when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_persona: Option<String>,

    /// Output format for `summarize`
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Buffer applied to every profile, replacing each profile's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_override: Option<f64>,

    /// Directory holding user profile JSON files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,

    /// Custom display profiles
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,

    /// Custom personas, added to (or replacing) the built-in ones
    #[serde(default)]
    pub personas: Vec<Persona>,
}

fn default_profiles() -> Vec<String> {
    vec!["laptop".into()]
}
fn default_layers() -> Vec<String> {
    vec!["headline".into(), "one_screen".into(), "deep".into()]
}

/// How `summarize` prints its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `=== PROFILE ===` blocks with `--- Layer ---` headings
    #[default]
    Stacked,
    /// Nested JSON object, profile then layer, in request order
    Json,
    /// One `profile.layer: text` line per summary
    Compact,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [Self::Stacked, Self::Json, Self::Compact];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stacked => "stacked",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "unknown output format '{s}' (expected stacked, json or compact)"
                ))
            })
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.screenfit/config.toml).
    ///
    /// Environment variables override the file:
    /// - `SCREENFIT_PROFILES` (comma-separated profile names)
    /// - `SCREENFIT_PERSONA`
    /// - `SCREENFIT_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup. Blank values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(profiles) = var("SCREENFIT_PROFILES") {
            self.default_profiles = profiles
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(persona) = var("SCREENFIT_PERSONA") {
            self.default_persona = Some(persona.trim().to_string());
        }

        if let Some(format) = var("SCREENFIT_FORMAT") {
            match format.parse() {
                Ok(format) => self.output_format = format,
                Err(e) => tracing::warn!("Ignoring SCREENFIT_FORMAT: {e}"),
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".screenfit")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Directory searched for `<name>.json` profile files.
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("profiles"))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(buffer) = self.buffer_override
            && !(buffer.is_finite() && buffer > 0.0 && buffer <= 1.0)
        {
            return Err(ConfigError::ValidationError(format!(
                "buffer_override must be in (0, 1], got {buffer}"
            )));
        }

        parse_layers(&self.default_layers)?;

        let mut seen = HashSet::new();
        for profile in &self.profiles {
            profile.to_profile()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "profile '{}' is defined more than once",
                    profile.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for persona in &self.personas {
            if persona.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "persona name must not be empty".into(),
                ));
            }
            if !seen.insert(persona.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "persona '{}' is defined more than once",
                    persona.name
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config show`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_profiles: default_profiles(),
            default_layers: default_layers(),
            default_persona: None,
            output_format: OutputFormat::default(),
            buffer_override: None,
            profile_dir: None,
            profiles: vec![],
            personas: vec![],
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Failed to write {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error(transparent)]
    Profile(#[from] screenfit_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_profiles, vec!["laptop"]);
        assert_eq!(config.default_layers.len(), 3);
        assert_eq!(config.output_format, OutputFormat::Stacked);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn invalid_buffer_override_rejected() {
        for buffer in [0.0, -0.5, 1.5, f64::NAN] {
            let config = AppConfig {
                buffer_override: Some(buffer),
                ..AppConfig::default()
            };
            assert!(config.validate().is_err(), "buffer {buffer}");
        }
    }

    #[test]
    fn unknown_default_layer_rejected() {
        let config = AppConfig {
            default_layers: vec!["headline".into(), "tldr".into()],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Profile(screenfit_core::Error::UnknownLayer { .. }))
        ));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("laptop"));
        assert!(toml_str.contains("one_screen"));
        assert!(toml_str.contains("stacked"));
    }

    #[test]
    fn custom_profiles_and_personas_parse() {
        let toml_str = r#"
default_profiles = ["monitor", "phone"]
default_persona = "ops"
output_format = "compact"

[[profiles]]
name = "monitor"
width_px = 2560
height_px = 1440
font_size_px = 16
ruler_columns = 100

[[personas]]
name = "ops"
vocabulary_mappings = [["deploy", "rollout"]]
example_sentences = ["Rollout paused at 40%."]
context_prefix = "On-call context."
examples_placement = "none"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_format, OutputFormat::Compact);
        assert_eq!(config.profiles[0].editor_ruler_columns, 100);
        assert!((config.profiles[0].buffer - 0.9).abs() < 1e-9);
        assert_eq!(
            config.personas[0].vocabulary_mappings,
            vec![("deploy".to_string(), "rollout".to_string())]
        );
        assert_eq!(
            config.personas[0].examples_placement,
            screenfit_core::ExamplesPlacement::None
        );
    }

    #[test]
    fn invalid_custom_profile_rejected() {
        let toml_str = r#"
[[profiles]]
name = "broken"
width_px = 0
height_px = 100
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Profile(_))));
    }

    #[test]
    fn duplicate_persona_rejected() {
        let config = AppConfig {
            personas: vec![Persona::new("ops"), Persona::new("ops")],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn load_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output_format = \"json\"\nbuffer_override = 0.8\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.buffer_override, Some(0.8));

        std::fs::write(&path, "buffer_override = 2.0\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());

        std::fs::write(&path, "output_format = [").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("SCREENFIT_PROFILES", "phone, tweet,,"),
            ("SCREENFIT_PERSONA", "manager"),
            ("SCREENFIT_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.default_profiles, vec!["phone", "tweet"]);
        assert_eq!(config.default_persona.as_deref(), Some("manager"));
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn bad_env_format_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|k| (k == "SCREENFIT_FORMAT").then(|| "yaml".to_string()));
        assert_eq!(config.output_format, OutputFormat::Stacked);
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("Compact".parse::<OutputFormat>().unwrap(), OutputFormat::Compact);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
