//! Pitch classes and chord qualities
//!
//! The 12 canonical pitch-class names (flats only, no enharmonic spellings) and
//! the chord-quality table mapping a quality label such as `"Minor 7th"` to its
//! semitone offsets from the chord root.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmoniqError, Result};

/// One of the 12 pitch classes, C = 0 through B = 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Db,
    D,
    Eb,
    E,
    F,
    Gb,
    G,
    Ab,
    A,
    Bb,
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order starting from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Db,
        PitchClass::D,
        PitchClass::Eb,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Gb,
        PitchClass::G,
        PitchClass::Ab,
        PitchClass::A,
        PitchClass::Bb,
        PitchClass::B,
    ];

    /// Semitone offset from C (0-11).
    pub fn semitone(self) -> u8 {
        self as u8
    }

    /// Pitch class for a semitone count, wrapping modulo 12.
    pub fn from_semitone(semitone: u8) -> PitchClass {
        Self::ALL[(semitone % 12) as usize]
    }

    /// Transpose by a signed number of semitones.
    ///
    /// ```
    /// use harmoniq::PitchClass;
    ///
    /// assert_eq!(PitchClass::Bb.transpose(3), PitchClass::Db);
    /// assert_eq!(PitchClass::C.transpose(-1), PitchClass::B);
    /// ```
    pub fn transpose(self, semitones: i32) -> PitchClass {
        let index = (self.semitone() as i32 + semitones).rem_euclid(12);
        Self::ALL[index as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Db => "Db",
            PitchClass::D => "D",
            PitchClass::Eb => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Gb => "Gb",
            PitchClass::G => "G",
            PitchClass::Ab => "Ab",
            PitchClass::A => "A",
            PitchClass::Bb => "Bb",
            PitchClass::B => "B",
        }
    }
}

impl FromStr for PitchClass {
    type Err = HarmoniqError;

    /// Only the canonical spellings are accepted: `"C#"` and `"c"` are errors.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|pc| pc.name() == s)
            .ok_or_else(|| HarmoniqError::UnknownPitchClass(s.to_string()))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offsets substituted for any quality the table does not know.
pub const MAJOR_TRIAD: [u8; 3] = [0, 4, 7];

/// Degree label for a semitone offset from the root ("R", "b3", "9", ...).
///
/// Offsets past the 13th are printed as plain numbers.
pub fn interval_label(offset: u8) -> String {
    let label = match offset {
        0 => "R",
        1 => "b2",
        2 => "2",
        3 => "b3",
        4 => "3",
        5 => "4",
        6 => "#4",
        7 => "5",
        8 => "b6",
        9 => "6",
        10 => "b7",
        11 => "7",
        12 => "8",
        13 => "b9",
        14 => "9",
        15 => "#9",
        16 => "10",
        17 => "11",
        18 => "#11",
        19 => "12",
        20 => "b13",
        21 => "13",
        other => return other.to_string(),
    };
    label.to_string()
}

/// Chord-quality lookup table.
///
/// Keeps labels in insertion order so listings are stable. Offsets are
/// semitones above the root and may exceed 11 for extended chords; consumers
/// fold them into pitch-class range themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordTable {
    entries: Vec<(String, Vec<u8>)>,
}

impl ChordTable {
    /// An empty table. Every lookup through [`offsets_or_major`](Self::offsets_or_major)
    /// falls back to the major triad.
    pub fn empty() -> Self {
        ChordTable { entries: Vec::new() }
    }

    /// The chord qualities offered by the progression builder.
    pub fn standard() -> Self {
        let mut table = ChordTable::empty();
        table.insert("Major", vec![0, 4, 7]);
        table.insert("Minor", vec![0, 3, 7]);
        table.insert("Diminished", vec![0, 3, 6]);
        table.insert("Augmented", vec![0, 4, 8]);
        table.insert("Major 7th", vec![0, 4, 7, 11]);
        table.insert("Minor 7th", vec![0, 3, 7, 10]);
        table.insert("Dominant 7th", vec![0, 4, 7, 10]);
        table.insert("m7b5", vec![0, 3, 6, 10]);
        table.insert("Diminished 7th", vec![0, 3, 6, 9]);
        table.insert("Major 9th", vec![0, 4, 7, 11, 14]);
        table.insert("Minor 9th", vec![0, 3, 7, 10, 14]);
        table
    }

    /// Parse a table from a YAML (or JSON) mapping of label to offsets:
    ///
    /// ```
    /// use harmoniq::ChordTable;
    ///
    /// let table = ChordTable::from_yaml_str("Power: [0, 7]\nSus4: [0, 5, 7]\n").unwrap();
    /// assert_eq!(table.get("Sus4"), Some(&[0u8, 5, 7][..]));
    /// assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Power", "Sus4"]);
    /// ```
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        // Mapping keeps document order, a HashMap would not
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(source)?;
        let mut table = ChordTable::empty();
        for (key, value) in mapping {
            let label: String = serde_yaml::from_value(key)?;
            let offsets: Vec<u8> = serde_yaml::from_value(value)?;
            table.insert(label, offsets);
        }
        Ok(table)
    }

    /// Add a quality, replacing the offsets of an existing label in place.
    pub fn insert(&mut self, label: impl Into<String>, offsets: Vec<u8>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = offsets,
            None => self.entries.push((label, offsets)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, offsets)| offsets.as_slice())
    }

    /// Offsets for `label`, or the major triad if the label is unknown.
    pub fn offsets_or_major(&self, label: &str) -> &[u8] {
        self.get(label).unwrap_or(&MAJOR_TRIAD[..])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(l, o)| (l.as_str(), o.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chord tones of `label` built on `root`, in table order.
    ///
    /// ```
    /// use harmoniq::{ChordTable, PitchClass};
    ///
    /// let table = ChordTable::standard();
    /// let tones = table.spell(PitchClass::D, "Minor 7th");
    /// assert_eq!(tones, vec![PitchClass::D, PitchClass::F, PitchClass::A, PitchClass::C]);
    /// ```
    pub fn spell(&self, root: PitchClass, label: &str) -> Vec<PitchClass> {
        self.offsets_or_major(label)
            .iter()
            .map(|&offset| root.transpose(offset as i32))
            .collect()
    }
}

impl Default for ChordTable {
    fn default() -> Self {
        ChordTable::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_semitones() {
        for (i, pc) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pc.semitone() as usize, i);
            assert_eq!(PitchClass::from_semitone(i as u8), *pc);
        }
        assert_eq!(PitchClass::from_semitone(14), PitchClass::D);
    }

    #[test]
    fn test_pitch_class_parsing() {
        assert_eq!("Eb".parse::<PitchClass>().unwrap(), PitchClass::Eb);
        assert_eq!("B".parse::<PitchClass>().unwrap(), PitchClass::B);

        // No enharmonic spellings or lowercase names
        assert!("C#".parse::<PitchClass>().is_err());
        assert!("eb".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_pitch_class_display_round_trips() {
        for pc in PitchClass::ALL {
            assert_eq!(pc.to_string().parse::<PitchClass>().unwrap(), pc);
        }
    }

    #[test]
    fn test_standard_table() {
        let table = ChordTable::standard();
        assert_eq!(table.len(), 11);
        assert_eq!(table.get("Major 7th"), Some(&[0u8, 4, 7, 11][..]));
        assert_eq!(table.get("m7b5"), Some(&[0u8, 3, 6, 10][..]));
        assert_eq!(table.get("Minor 9th"), Some(&[0u8, 3, 7, 10, 14][..]));
        assert_eq!(table.labels().next(), Some("Major"));
    }

    #[test]
    fn test_unknown_quality_falls_back_to_major() {
        let table = ChordTable::standard();
        assert_eq!(table.get("Nonexistent"), None);
        assert!(!table.contains("Nonexistent"));
        assert!(table.contains("Dominant 7th"));
        assert_eq!(table.offsets_or_major("Nonexistent"), &MAJOR_TRIAD);
        assert_eq!(ChordTable::empty().offsets_or_major("Minor"), &MAJOR_TRIAD);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut table = ChordTable::standard();
        table.insert("Minor", vec![0, 3]);
        assert_eq!(table.len(), 11);
        assert_eq!(table.get("Minor"), Some(&[0u8, 3][..]));
        assert_eq!(table.labels().nth(1), Some("Minor"));
    }

    #[test]
    fn test_table_from_yaml_rejects_bad_offsets() {
        assert!(ChordTable::from_yaml_str("Major: [0, 4, 300]").is_err());
        assert!(ChordTable::from_yaml_str("- 0\n- 4").is_err());
    }

    #[test]
    fn test_spell_folds_extensions() {
        let table = ChordTable::standard();
        let tones = table.spell(PitchClass::C, "Major 9th");
        assert_eq!(
            tones,
            vec![PitchClass::C, PitchClass::E, PitchClass::G, PitchClass::B, PitchClass::D]
        );
    }

    #[test]
    fn test_interval_labels() {
        assert_eq!(interval_label(0), "R");
        assert_eq!(interval_label(6), "#4");
        assert_eq!(interval_label(14), "9");
        assert_eq!(interval_label(22), "22");
    }
}
