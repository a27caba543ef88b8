pub mod error;
pub mod midi;
pub mod progression;
pub mod theory;

pub use error::{HarmoniqError, Result};
pub use midi::{generate, Encoder, MidiFile};
pub use progression::{Progression, ProgressionStep};
pub use theory::{interval_label, ChordTable, PitchClass};

/// Tempo used when neither the caller nor the document sets one.
pub const DEFAULT_TEMPO: f64 = 120.0;

/// Encode a progression document, using its own tempo or [`DEFAULT_TEMPO`].
pub fn export(document: &Progression) -> Result<MidiFile> {
    generate(document.steps(), document.tempo_or(None))
}
