//! Summary results: profile name → layer name → produced text.
//!
//! Both levels keep request order. They serialize as nested JSON objects.

use crate::layer::LayerName;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Produced text for each requested layer of one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSummaries {
    entries: Vec<(LayerName, String)>,
}

impl LayerSummaries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the text for a layer.
    pub fn insert(&mut self, layer: LayerName, text: String) {
        match self.entries.iter_mut().find(|(l, _)| *l == layer) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((layer, text)),
        }
    }

    pub fn get(&self, layer: LayerName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, t)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerName, &str)> {
        self.entries.iter().map(|(l, t)| (*l, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LayerSummaries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (layer, text) in &self.entries {
            map.serialize_entry(layer.as_str(), text)?;
        }
        map.end()
    }
}

/// Summaries for every requested profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryResult {
    profiles: Vec<(String, LayerSummaries)>,
}

impl SummaryResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: impl Into<String>, layers: LayerSummaries) {
        let profile = profile.into();
        match self.profiles.iter_mut().find(|(p, _)| *p == profile) {
            Some(entry) => entry.1 = layers,
            None => self.profiles.push((profile, layers)),
        }
    }

    pub fn profile(&self, name: &str) -> Option<&LayerSummaries> {
        self.profiles
            .iter()
            .find(|(p, _)| p == name)
            .map(|(_, l)| l)
    }

    /// Shorthand for `profile(name)?.get(layer)`.
    pub fn get(&self, profile: &str, layer: LayerName) -> Option<&str> {
        self.profile(profile)?.get(layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayerSummaries)> {
        self.profiles.iter().map(|(p, l)| (p.as_str(), l))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Serialize for SummaryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.profiles.len()))?;
        for (profile, layers) in &self.profiles {
            map.serialize_entry(profile, layers)?;
        }
        map.end()
    }
}
