//! Chord progressions
//!
//! A progression is an ordered list of bars, one chord per bar. Progressions
//! come from the builder UI or the AI suggestion service and are stored as
//! YAML or JSON documents:
//!
//! ```yaml
//! title: Epic in C
//! tempo: 96
//! progression:
//!   - { root: C, variety: Major, numeral: I }
//!   - { root: A, variety: Minor, numeral: vi }
//! ```
//!
//! The JSON returned by the suggestion service (`{"progression": [...]}`) is a
//! valid document as-is.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::theory::PitchClass;
use crate::DEFAULT_TEMPO;

/// One bar of harmony.
///
/// `root` stays a string so that a malformed name from upstream reaches the
/// encoder (which falls back to C) instead of rejecting the whole document.
/// `numeral` is display-only and never encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStep {
    pub root: String,
    pub variety: String,
    #[serde(default)]
    pub numeral: String,
}

impl ProgressionStep {
    pub fn new(root: PitchClass, variety: impl Into<String>, numeral: impl Into<String>) -> Self {
        ProgressionStep {
            root: root.name().to_string(),
            variety: variety.into(),
            numeral: numeral.into(),
        }
    }

    /// Resolve the root name, treating anything outside the 12 canonical
    /// names as C.
    pub fn pitch_class(&self) -> PitchClass {
        match self.root.parse() {
            Ok(pc) => pc,
            Err(_) => {
                warn!("unknown root '{}' in {}, using C", self.root, self.label());
                PitchClass::C
            }
        }
    }

    /// Chord name as shown in the builder, e.g. "Eb Major 7th".
    pub fn chord_name(&self) -> String {
        format!("{} {}", self.root, self.variety)
    }

    fn label(&self) -> String {
        if self.numeral.is_empty() {
            format!("'{}'", self.chord_name())
        } else {
            format!("'{}' ({})", self.chord_name(), self.numeral)
        }
    }
}

/// A progression document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Tempo in BPM; callers choose a default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub progression: Vec<ProgressionStep>,
}

impl Progression {
    pub fn new(steps: Vec<ProgressionStep>) -> Self {
        Progression {
            progression: steps,
            ..Default::default()
        }
    }

    /// Parse a YAML or JSON document.
    ///
    /// ```
    /// use harmoniq::Progression;
    ///
    /// let doc = Progression::parse(r#"{"progression": [
    ///     {"root": "D", "variety": "Minor 7th", "numeral": "ii7"},
    ///     {"root": "G", "variety": "Dominant 7th", "numeral": "V7"}
    /// ]}"#).unwrap();
    /// assert_eq!(doc.steps().len(), 2);
    /// assert_eq!(doc.tempo, None);
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Tempo to encode at: `tempo_override` if given, then the document's own
    /// tempo, then [`DEFAULT_TEMPO`].
    pub fn tempo_or(&self, tempo_override: Option<f64>) -> f64 {
        tempo_override.or(self.tempo).unwrap_or(DEFAULT_TEMPO)
    }

    pub fn steps(&self) -> &[ProgressionStep] {
        &self.progression
    }

    pub fn is_empty(&self) -> bool {
        self.progression.is_empty()
    }
}
