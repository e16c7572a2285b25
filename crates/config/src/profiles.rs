//! Display profile store: built-in profiles, config-defined profiles, and
//! JSON profile files on disk.

use crate::ConfigError;
use screenfit_core::DisplayProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A display profile as written in config or JSON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,

    #[serde(default = "default_font_size")]
    pub font_size_px: u32,

    #[serde(default = "default_ruler_columns", alias = "ruler_columns")]
    pub editor_ruler_columns: u32,

    #[serde(default = "default_buffer")]
    pub buffer: f64,
}

fn default_font_size() -> u32 {
    14
}
fn default_ruler_columns() -> u32 {
    80
}
fn default_buffer() -> f64 {
    0.9
}

impl ProfileConfig {
    /// Validate into a core profile.
    pub fn to_profile(&self) -> Result<DisplayProfile, ConfigError> {
        Ok(DisplayProfile::new(
            self.name.clone(),
            self.width_px,
            self.height_px,
            self.font_size_px,
            self.editor_ruler_columns,
            self.buffer,
        )?)
    }
}

impl From<&DisplayProfile> for ProfileConfig {
    fn from(p: &DisplayProfile) -> Self {
        Self {
            name: p.name().to_string(),
            width_px: p.width_px(),
            height_px: p.height_px(),
            font_size_px: p.font_size_px(),
            editor_ruler_columns: p.ruler_columns(),
            buffer: p.buffer(),
        }
    }
}

/// Built-in profiles: `(name, width, height, font size, ruler columns, buffer)`.
pub const BUILTIN_PROFILES: [(&str, u32, u32, u32, u32, f64); 4] = [
    ("laptop", 1920, 1080, 14, 80, 0.9),
    ("phone", 375, 667, 12, 40, 0.85),
    ("slides", 1024, 768, 18, 60, 0.8),
    ("tweet", 280, 400, 14, 40, 0.9),
];

/// Look up a built-in profile by name.
pub fn builtin_profile(name: &str) -> Option<DisplayProfile> {
    BUILTIN_PROFILES
        .iter()
        .find(|(n, ..)| *n == name)
        .and_then(|&(n, w, h, f, c, b)| DisplayProfile::new(n, w, h, f, c, b).ok())
}

/// Resolves profile names and paths.
///
/// Lookup order for a name: built-in, config-defined, an existing file at
/// that path, then `<profile_dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profile_dir: PathBuf,
    custom: Vec<ProfileConfig>,
}

impl ProfileStore {
    pub fn new(profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            profile_dir: profile_dir.into(),
            custom: Vec::new(),
        }
    }

    /// A store using the config's profile directory and custom profiles.
    pub fn from_config(config: &crate::AppConfig) -> Self {
        Self::new(config.profile_dir()).with_profiles(config.profiles.clone())
    }

    pub fn with_profiles(mut self, profiles: Vec<ProfileConfig>) -> Self {
        self.custom = profiles;
        self
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// Load a profile by name or from a JSON file path.
    pub fn load_profile(&self, name_or_path: &str) -> Result<DisplayProfile, ConfigError> {
        if let Some(profile) = builtin_profile(name_or_path) {
            return Ok(profile);
        }

        if let Some(custom) = self.custom.iter().find(|p| p.name == name_or_path) {
            return custom.to_profile();
        }

        let direct = PathBuf::from(name_or_path);
        let path = if direct.is_file() {
            direct
        } else {
            self.profile_dir.join(format!("{name_or_path}.json"))
        };

        if !path.is_file() {
            return Err(ConfigError::ProfileNotFound(name_or_path.to_string()));
        }

        debug!("Loading profile from {}", path.display());
        read_profile_file(&path)
    }

    /// All available profile names (built-in, config-defined, and files in
    /// the profile directory), sorted and deduplicated.
    pub fn list_profiles(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_PROFILES
            .iter()
            .map(|(n, ..)| n.to_string())
            .chain(self.custom.iter().map(|p| p.name.clone()))
            .collect();

        match std::fs::read_dir(&self.profile_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|e| e == "json")
                        && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_string());
                    }
                }
            }
            Err(e) => debug!("Profile dir {} not readable: {e}", self.profile_dir.display()),
        }

        names.sort();
        names.dedup();
        names
    }

    /// Write a profile as pretty JSON into the profile directory.
    ///
    /// The file is named `<profile name>.json` unless `filename` is given.
    pub fn save_profile(
        &self,
        profile: &DisplayProfile,
        filename: Option<&str>,
    ) -> Result<PathBuf, ConfigError> {
        let filename = filename
            .map(String::from)
            .unwrap_or_else(|| format!("{}.json", profile.name()));
        let path = self.profile_dir.join(filename);
        let write_err = |reason: String| ConfigError::WriteError {
            path: path.clone(),
            reason,
        };

        std::fs::create_dir_all(&self.profile_dir).map_err(|e| write_err(e.to_string()))?;
        let json = serde_json::to_string_pretty(&ProfileConfig::from(profile))
            .map_err(|e| write_err(e.to_string()))?;
        std::fs::write(&path, json).map_err(|e| write_err(e.to_string()))?;

        debug!("Saved profile '{}' to {}", profile.name(), path.display());
        Ok(path)
    }

    /// Parse a command-line profile list.
    ///
    /// Accepts `"phone,laptop"` or `@path`, where the file holds a JSON
    /// array of names, `{"profiles": [...]}`, a single profile object, or
    /// newline/comma separated names. A buffer override yields new profile
    /// values; stored profiles are never modified.
    pub fn parse_profile_list(
        &self,
        spec: &str,
        buffer_override: Option<f64>,
    ) -> Result<Vec<DisplayProfile>, ConfigError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(Vec::new());
        }

        let names = match spec.strip_prefix('@') {
            Some(path) => names_from_file(Path::new(path))?,
            None => split_names(spec),
        };

        names
            .iter()
            .map(|name| -> Result<DisplayProfile, ConfigError> {
                let profile = self.load_profile(name).map_err(|e| match e {
                    ConfigError::ProfileNotFound(_) => e,
                    other => ConfigError::ValidationError(format!(
                        "failed to load profile '{name}': {other}"
                    )),
                })?;
                match buffer_override {
                    Some(buffer) => Ok(profile.with_buffer(buffer)?),
                    None => Ok(profile),
                }
            })
            .collect()
    }
}

fn read_profile_file(path: &Path) -> Result<DisplayProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ProfileConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    config.to_profile()
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn names_from_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::ProfileNotFound(format!(
            "profile list file {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let content = content.trim();
    if content.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "profile list file {} is empty",
            path.display()
        )));
    }

    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Array(items)) => Ok(json_names(&items)),
        Ok(serde_json::Value::Object(map)) => match map.get("profiles") {
            Some(serde_json::Value::Array(items)) => Ok(json_names(&items)),
            // A single profile object: load it through its own path.
            _ => Ok(vec![path.display().to_string()]),
        },
        Ok(other) => {
            warn!("Unexpected JSON in {}: {other}", path.display());
            Ok(split_names(content))
        }
        Err(_) if content.contains('\n') => Ok(content
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()),
        Err(_) => Ok(split_names(content)),
    }
}

fn json_names(items: &[serde_json::Value]) -> Vec<String> {
    items
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        })
        .filter(|s| !s.is_empty())
        .collect()
}
