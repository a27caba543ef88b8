//! # Error Types
//!
//! This module defines all error types for Harmoniq.
//!
//! The encoder itself is total over well-formed progressions: unknown chord
//! qualities and malformed root names degrade to fallbacks instead of failing.
//! What remains are tempo validation, document parsing, and I/O.
//!
//! ## Error Types
//! - `InvalidTempo` / `TempoOutOfRange` - tempo cannot be written to the file
//! - `UnknownPitchClass` - strict parsing of a pitch-class name failed
//! - `InvalidVlq` / `VlqOverflow` - variable-length quantity errors
//! - `DataByteOutOfRange` - note number or velocity above 127
//! - `TrackTooLong` - event stream does not fit a 32-bit chunk length
//! - `ParseError` - progression or chord-table document is not valid YAML/JSON
//! - `Io` - reading or writing files
//!
//! ## Usage
//! ```rust
//! use harmoniq::{generate, HarmoniqError};
//!
//! match generate(&[], 0.0) {
//!     Ok(file) => println!("{} bytes", file.len()),
//!     Err(HarmoniqError::InvalidTempo { bpm }) => eprintln!("bad tempo: {}", bpm),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarmoniqError {
    /// Tempo is zero, negative, NaN or infinite.
    ///
    /// # Example
    /// ```
    /// # use harmoniq::HarmoniqError;
    /// let err = HarmoniqError::InvalidTempo { bpm: -10.0 };
    /// assert_eq!(err.to_string(), "Invalid tempo: -10 bpm (must be positive and finite)");
    /// ```
    #[error("Invalid tempo: {bpm} bpm (must be positive and finite)")]
    InvalidTempo { bpm: f64 },

    /// Tempo is valid but its microseconds-per-quarter value does not fit the
    /// 24-bit tempo field (or rounds down to zero).
    #[error("Tempo {bpm} bpm gives {micros} us per quarter note, outside the 24-bit tempo field")]
    TempoOutOfRange { bpm: f64, micros: u64 },

    /// Name is not one of the 12 canonical pitch-class spellings.
    ///
    /// # Example
    /// ```
    /// # use harmoniq::HarmoniqError;
    /// let err = HarmoniqError::UnknownPitchClass("C#".to_string());
    /// assert_eq!(err.to_string(), "Unknown pitch class: 'C#'");
    /// ```
    #[error("Unknown pitch class: '{0}'")]
    UnknownPitchClass(String),

    /// Variable-length quantity is truncated, too long, or overflows 32 bits.
    #[error("Invalid variable-length quantity: {0}")]
    InvalidVlq(String),

    /// Value exceeds the largest delta time a MIDI file can hold.
    #[error("Value {0} exceeds the maximum variable-length quantity (0x0FFFFFFF)")]
    VlqOverflow(u32),

    /// Note number or velocity does not fit a 7-bit MIDI data byte.
    ///
    /// # Example
    /// ```
    /// # use harmoniq::HarmoniqError;
    /// let err = HarmoniqError::DataByteOutOfRange { field: "velocity", value: 200 };
    /// assert_eq!(err.to_string(), "MIDI velocity 200 is outside 0-127");
    /// ```
    #[error("MIDI {field} {value} is outside 0-127")]
    DataByteOutOfRange { field: &'static str, value: u8 },

    /// Track event stream is longer than a chunk length can express.
    #[error("Track is {0} bytes, too long for a 32-bit chunk length")]
    TrackTooLong(usize),

    /// Progression or chord-table document could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarmoniqError>;
