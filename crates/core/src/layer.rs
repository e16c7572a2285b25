//! Summary layers: named variants of one summary, each sized as a
//! fraction of a profile's character budget.
//!
//! | Layer | Budget fraction | Notes |
//! |-------|-----------------|-------|
//! | `headline` | 10% | at most two sentences, persona vocabulary only |
//! | `one_screen` | 80% | |
//! | `deep` | 100% | prefixed with a content fingerprint tag |

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the fixed set of layer names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerName {
    Headline,
    OneScreen,
    Deep,
}

impl LayerName {
    /// All layers in their canonical order.
    pub const ALL: [LayerName; 3] = [LayerName::Headline, LayerName::OneScreen, LayerName::Deep];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::OneScreen => "one_screen",
            Self::Deep => "deep",
        }
    }

    /// Human-readable title, e.g. `"One Screen"`.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Headline => "Headline",
            Self::OneScreen => "One Screen",
            Self::Deep => "Deep",
        }
    }

    /// The static configuration for this layer.
    pub fn spec(&self) -> &'static LayerSpec {
        match self {
            Self::Headline => &LAYER_SPECS[0],
            Self::OneScreen => &LAYER_SPECS[1],
            Self::Deep => &LAYER_SPECS[2],
        }
    }

    fn available() -> String {
        Self::ALL
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "headline" => Ok(Self::Headline),
            "one_screen" => Ok(Self::OneScreen),
            "deep" => Ok(Self::Deep),
            other => Err(Error::UnknownLayer {
                name: other.to_string(),
                available: Self::available(),
            }),
        }
    }
}

impl Serialize for LayerName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Static configuration of a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub name: LayerName,
    /// Fraction of the profile budget given to this layer, in `(0, 1]`.
    pub budget_fraction: f64,
    /// Sentence cap a summarizer may honour for this layer.
    pub max_sentences: Option<usize>,
    /// Whether output is prefixed with a `[hash:XXXXXXXX] ` tag.
    pub includes_metadata_tag: bool,
}

/// Process-wide layer table.
pub static LAYER_SPECS: [LayerSpec; 3] = [
    LayerSpec {
        name: LayerName::Headline,
        budget_fraction: 0.1,
        max_sentences: Some(2),
        includes_metadata_tag: false,
    },
    LayerSpec {
        name: LayerName::OneScreen,
        budget_fraction: 0.8,
        max_sentences: None,
        includes_metadata_tag: false,
    },
    LayerSpec {
        name: LayerName::Deep,
        budget_fraction: 1.0,
        max_sentences: None,
        includes_metadata_tag: true,
    },
];

/// Resolve requested layer names, failing on the first unknown one.
///
/// Duplicates collapse to their first occurrence; request order is kept.
pub fn parse_layers<S: AsRef<str>>(names: &[S]) -> Result<Vec<LayerName>> {
    let mut layers = Vec::with_capacity(names.len());
    for name in names {
        let layer: LayerName = name.as_ref().parse()?;
        if !layers.contains(&layer) {
            layers.push(layer);
        }
    }
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_through_from_str() {
        for layer in LayerName::ALL {
            assert_eq!(layer.as_str().parse::<LayerName>().unwrap(), layer);
        }
    }

    #[test]
    fn unknown_layer_rejected() {
        let err = "summary".parse::<LayerName>().unwrap_err();
        match err {
            Error::UnknownLayer { name, available } => {
                assert_eq!(name, "summary");
                assert!(available.contains("one_screen"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn spec_table_matches_names() {
        for layer in LayerName::ALL {
            assert_eq!(layer.spec().name, layer);
            assert!(layer.spec().budget_fraction > 0.0);
            assert!(layer.spec().budget_fraction <= 1.0);
        }
        assert!(LayerName::Deep.spec().includes_metadata_tag);
        assert!(!LayerName::Headline.spec().includes_metadata_tag);
        assert_eq!(LayerName::Headline.spec().max_sentences, Some(2));
    }

    #[test]
    fn parse_layers_keeps_order_and_dedupes() {
        let layers = parse_layers(&["deep", "headline", "deep"]).unwrap();
        assert_eq!(layers, vec![LayerName::Deep, LayerName::Headline]);
    }

    #[test]
    fn parse_layers_fails_fast() {
        assert!(parse_layers(&["headline", "nope", "deep"]).is_err());
    }

    #[test]
    fn title_is_human_readable() {
        assert_eq!(LayerName::OneScreen.title(), "One Screen");
    }
}
