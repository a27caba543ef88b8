//! Standard MIDI File encoder
//!
//! Writes a Format 0 file: one `MThd` header chunk followed by one `MTrk`
//! chunk holding the tempo, a 4/4 time signature, one block chord per bar, and
//! the end-of-track marker.

use std::path::{Path, PathBuf};

use log::debug;

use super::vlq;
use super::voicing::chord_notes;
use crate::error::{HarmoniqError, Result};
use crate::progression::ProgressionStep;
use crate::theory::ChordTable;

/// Pulses per quarter note.
pub const TICKS_PER_QUARTER: u16 = 480;

pub const BEATS_PER_BAR: u32 = 4;

/// One bar of 4/4, the length of every chord.
pub const TICKS_PER_BAR: u32 = TICKS_PER_QUARTER as u32 * BEATS_PER_BAR;

/// All notes go to the first channel.
pub const CHANNEL: u8 = 0;

pub const VELOCITY: u8 = 100;

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const META: u8 = 0xFF;
const META_TEMPO: u8 = 0x51;
const META_TIME_SIGNATURE: u8 = 0x58;
const META_END_OF_TRACK: u8 = 0x2F;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Largest value the 3-byte tempo field holds.
const MAX_TEMPO_MICROS: u64 = 0xFF_FFFF;

/// `MThd` + length + format + track count + division.
const HEADER_LEN: usize = 14;

/// An encoded `.mid` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFile {
    bytes: Box<[u8]>,
}

impl MidiFile {
    pub const MIME_TYPE: &'static str = "audio/midi";
    pub const EXTENSION: &'static str = "mid";

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }

    /// Where an export of `document` goes when no output path is given: the
    /// same path with a `.mid` extension.
    pub fn path_for(document: impl AsRef<Path>) -> PathBuf {
        document.as_ref().with_extension(Self::EXTENSION)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

impl AsRef<[u8]> for MidiFile {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for MidiFile {
    fn from(bytes: Vec<u8>) -> Self {
        MidiFile {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

/// Microseconds per quarter note for a tempo, as written in the tempo event.
///
/// ```
/// use harmoniq::midi::tempo_micros;
///
/// assert_eq!(tempo_micros(120.0).unwrap(), 500_000);
/// assert_eq!(tempo_micros(90.0).unwrap(), 666_666);
/// assert!(tempo_micros(0.0).is_err());
/// ```
pub fn tempo_micros(bpm: f64) -> Result<u32> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(HarmoniqError::InvalidTempo { bpm });
    }
    // Float to int casts saturate, so absurdly slow tempos land above the limit
    let micros = (MICROS_PER_MINUTE / bpm).floor() as u64;
    if micros == 0 || micros > MAX_TEMPO_MICROS {
        return Err(HarmoniqError::TempoOutOfRange { bpm, micros });
    }
    Ok(micros as u32)
}

/// Builds the event stream of a track chunk.
///
/// Every event takes the delta time (in ticks) since the previous event.
/// [`finish`](Self::finish) wraps the stream in its `MTrk` chunk header.
#[derive(Debug, Default)]
pub struct TrackBuilder {
    events: Vec<u8>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of event data written so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Note On. `note` and `velocity` must be 0-127; nothing is written
    /// otherwise.
    pub fn note_on(&mut self, delta: u32, note: u8, velocity: u8) -> Result<()> {
        self.channel_event(delta, NOTE_ON, note, velocity)
    }

    pub fn note_off(&mut self, delta: u32, note: u8) -> Result<()> {
        self.channel_event(delta, NOTE_OFF, note, 0)
    }

    /// Set Tempo (`FF 51 03 tt tt tt`).
    pub fn tempo(&mut self, delta: u32, micros_per_quarter: u32) -> Result<()> {
        let [_, hi, mid, lo] = micros_per_quarter.to_be_bytes();
        self.meta_event(delta, META_TEMPO, &[hi, mid, lo])
    }

    /// Time Signature (`FF 58 04 nn dd cc bb`).
    ///
    /// `denominator_pow2` is the power of two of the lower number (2 for a
    /// quarter note).
    pub fn time_signature(
        &mut self,
        delta: u32,
        numerator: u8,
        denominator_pow2: u8,
        clocks_per_click: u8,
        thirty_seconds_per_quarter: u8,
    ) -> Result<()> {
        self.meta_event(
            delta,
            META_TIME_SIGNATURE,
            &[
                numerator,
                denominator_pow2,
                clocks_per_click,
                thirty_seconds_per_quarter,
            ],
        )
    }

    /// End of Track (`FF 2F 00`).
    pub fn end_of_track(&mut self, delta: u32) -> Result<()> {
        self.meta_event(delta, META_END_OF_TRACK, &[])
    }

    /// The complete `MTrk` chunk.
    pub fn finish(self) -> Result<Vec<u8>> {
        let len = u32::try_from(self.events.len())
            .map_err(|_| HarmoniqError::TrackTooLong(self.events.len()))?;
        let mut chunk = Vec::with_capacity(8 + self.events.len());
        chunk.extend_from_slice(b"MTrk");
        chunk.extend_from_slice(&len.to_be_bytes());
        chunk.extend_from_slice(&self.events);
        Ok(chunk)
    }

    fn channel_event(&mut self, delta: u32, status: u8, key: u8, velocity: u8) -> Result<()> {
        data_byte("note", key)?;
        data_byte("velocity", velocity)?;
        vlq::try_write(delta, &mut self.events)?;
        self.events.extend_from_slice(&[status | CHANNEL, key, velocity]);
        Ok(())
    }

    fn meta_event(&mut self, delta: u32, kind: u8, data: &[u8]) -> Result<()> {
        vlq::try_write(delta, &mut self.events)?;
        self.events.extend_from_slice(&[META, kind]);
        vlq::try_write(data.len() as u32, &mut self.events)?;
        self.events.extend_from_slice(data);
        Ok(())
    }
}

fn data_byte(field: &'static str, value: u8) -> Result<u8> {
    if value > 0x7F {
        return Err(HarmoniqError::DataByteOutOfRange { field, value });
    }
    Ok(value)
}

fn write_header(out: &mut Vec<u8>) {
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // format 0
    out.extend_from_slice(&1u16.to_be_bytes()); // one track
    out.extend_from_slice(&TICKS_PER_QUARTER.to_be_bytes());
}

/// Encodes progressions against a chord-quality table.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    chords: ChordTable,
}

impl Encoder {
    pub fn new(chords: ChordTable) -> Self {
        Encoder { chords }
    }

    pub fn chords(&self) -> &ChordTable {
        &self.chords
    }

    /// Encode `progression` at `tempo_bpm`, one chord per bar.
    ///
    /// A quality the table maps to no offsets produces a silent bar.
    ///
    /// # Errors
    /// Returns [`HarmoniqError::InvalidTempo`] or
    /// [`HarmoniqError::TempoOutOfRange`] if the tempo cannot be written.
    pub fn encode(&self, progression: &[ProgressionStep], tempo_bpm: f64) -> Result<MidiFile> {
        let micros = tempo_micros(tempo_bpm)?;

        let mut track = TrackBuilder::new();
        track.tempo(0, micros)?;
        track.time_signature(0, BEATS_PER_BAR as u8, 2, 24, 8)?;

        // Ticks since the last event, only non-zero after a silent bar
        let mut pending = 0u32;
        for step in progression {
            let notes = chord_notes(step, &self.chords);
            if notes.is_empty() {
                pending = pending.saturating_add(TICKS_PER_BAR);
                continue;
            }

            for (i, &note) in notes.iter().enumerate() {
                let delta = if i == 0 { pending } else { 0 };
                track.note_on(delta, note, VELOCITY)?;
            }
            pending = 0;

            for (i, &note) in notes.iter().enumerate() {
                let delta = if i == 0 { TICKS_PER_BAR } else { 0 };
                track.note_off(delta, note)?;
            }
        }
        track.end_of_track(pending)?;

        let track = track.finish()?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + track.len());
        write_header(&mut bytes);
        bytes.extend_from_slice(&track);

        debug!(
            "encoded {} bar(s) at {} bpm into {} bytes",
            progression.len(),
            tempo_bpm,
            bytes.len()
        );
        Ok(MidiFile::from(bytes))
    }
}

/// Encode a progression with the standard chord table.
///
/// This is the main entry point for the library.
///
/// # Example
/// ```rust
/// use harmoniq::{generate, PitchClass, ProgressionStep};
///
/// let progression = vec![
///     ProgressionStep::new(PitchClass::C, "Major", "I"),
///     ProgressionStep::new(PitchClass::A, "Minor", "vi"),
/// ];
/// let file = generate(&progression, 120.0)?;
///
/// assert_eq!(&file.as_bytes()[..4], b"MThd");
/// assert_eq!(file.mime_type(), "audio/midi");
/// # Ok::<(), harmoniq::HarmoniqError>(())
/// ```
pub fn generate(progression: &[ProgressionStep], tempo_bpm: f64) -> Result<MidiFile> {
    Encoder::default().encode(progression, tempo_bpm)
}
