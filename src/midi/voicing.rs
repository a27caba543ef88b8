//! Chord voicing for MIDI export
//!
//! Every chord tone is placed on its own in the C3 octave (MIDI 48-59), the
//! range used for piano accompaniment. Placement is per note, not chord-aware:
//! a chord whose tones cross the B/C boundary is spread rather than inverted.
//!
//! # MIDI Note Reference
//! - C3 = 48, D3 = 50, E3 = 52, F3 = 53, G3 = 55, A3 = 57, B3 = 59
//! - C4 (middle C) = 60

use log::warn;

use crate::progression::ProgressionStep;
use crate::theory::{ChordTable, PitchClass, MAJOR_TRIAD};

/// Octave chord tones are placed in.
pub const TARGET_OCTAVE: u8 = 3;

/// Notes below this are raised an octave.
pub const LOWEST_NOTE: u8 = 48;

/// MIDI note number of `pitch_class` in `octave` (C4 = 60).
///
/// Returns `None` if the note falls outside 0-127.
///
/// ```
/// use harmoniq::PitchClass;
/// use harmoniq::midi::voicing::midi_note;
///
/// assert_eq!(midi_note(PitchClass::C, 4), Some(60));
/// assert_eq!(midi_note(PitchClass::A, 3), Some(57));
/// assert_eq!(midi_note(PitchClass::G, 9), Some(127));
/// assert_eq!(midi_note(PitchClass::Ab, 9), None);
/// ```
pub fn midi_note(pitch_class: PitchClass, octave: u8) -> Option<u8> {
    let note = (octave as u16 + 1) * 12 + pitch_class.semitone() as u16;
    if note <= 127 {
        Some(note as u8)
    } else {
        None
    }
}

/// Scientific pitch name of a MIDI note, e.g. 60 -> "C4".
pub fn note_name(note: u8) -> String {
    let pitch_class = PitchClass::from_semitone(note % 12);
    let octave = (note / 12) as i8 - 1;
    format!("{}{}", pitch_class, octave)
}

/// Place a chord tone near middle C.
pub fn place_note(pitch_class: PitchClass) -> u8 {
    let note = (TARGET_OCTAVE + 1) * 12 + pitch_class.semitone();
    if note < LOWEST_NOTE {
        note + 12
    } else {
        note
    }
}

/// MIDI notes for one bar, in chord-table order.
///
/// Unknown qualities are played as a major triad. Offsets above 11 (9ths) are
/// folded into the octave before placement.
pub fn chord_notes(step: &ProgressionStep, table: &ChordTable) -> Vec<u8> {
    let root = step.pitch_class();
    let offsets = match table.get(&step.variety) {
        Some(offsets) => offsets,
        None => {
            warn!(
                "unknown chord quality '{}' for root {}, using Major",
                step.variety, step.root
            );
            &MAJOR_TRIAD[..]
        }
    };

    offsets
        .iter()
        .map(|&offset| place_note(root.transpose(offset as i32)))
        .collect()
}
