//! # MIDI Module
//!
//! Export chord progressions as Standard MIDI Files.
//!
//! ## Purpose
//! The progression builder offers its chords as a `.mid` download so they can
//! be opened in any DAW or MIDI player. This module produces those bytes.
//!
//! ## Sub-modules
//! - `encoder` - Header and track chunk construction, [`MidiFile`], [`Encoder`]
//! - `voicing` - Chord quality + root to MIDI note numbers
//! - `vlq` - Variable-length quantities for delta times
//!
//! ## Entry Point
//! [`generate()`] - Encode a progression with the standard chord table
//!
//! ## Example
//! ```rust
//! use harmoniq::midi::generate;
//! use harmoniq::{PitchClass, ProgressionStep};
//!
//! let progression = vec![ProgressionStep::new(PitchClass::C, "Major", "I")];
//! let file = generate(&progression, 120.0).unwrap();
//!
//! // 14-byte header + 8-byte track header + 44 bytes of events
//! assert_eq!(file.len(), 66);
//! ```
//!
//! ## File Layout
//!
//! Always Format 0 (one track), 480 ticks per quarter note, channel 1:
//!
//! ```text
//! MThd 00000006 0000 0001 01E0
//! MTrk <length>
//!   00 FF 51 03 tt tt tt        tempo
//!   00 FF 58 04 04 02 18 08     4/4
//!   per bar:
//!     00 90 nn 64               note on, once per chord tone
//!     8F 00 80 nn 00            first note off, one bar later
//!     00 80 nn 00               remaining note offs
//!   00 FF 2F 00                 end of track
//! ```
//!
//! ## Related Modules
//! - `theory` - Pitch classes and the chord-quality table
//! - `progression` - Progression steps and documents

pub mod encoder;
pub mod vlq;
pub mod voicing;


pub use encoder::{
    generate, tempo_micros, Encoder, MidiFile, TrackBuilder, TICKS_PER_BAR, TICKS_PER_QUARTER,
};
