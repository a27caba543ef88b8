//! Variable-length quantities
//!
//! MIDI delta times are written 7 bits per byte, most significant group first,
//! with the high bit set on every byte except the last. 1920 (one 4/4 bar at
//! 480 ticks per quarter) is `8F 00`.

use crate::error::{HarmoniqError, Result};

/// Largest value a Standard MIDI File allows in a variable-length quantity.
pub const MAX_VALUE: u32 = 0x0FFF_FFFF;

/// Longest quantity a Standard MIDI File allows.
pub const MAX_LEN: usize = 4;

/// Longest quantity [`write`] produces (a full `u32`).
pub const MAX_ENCODED_LEN: usize = 5;

/// Append `value` to `out`.
///
/// Any `u32` can be encoded (up to five bytes); use [`try_write`] when the
/// bytes are going into a MIDI file.
pub fn write(value: u32, out: &mut Vec<u8>) {
    // Groups are produced low to high, then emitted high to low
    let mut groups = [0u8; MAX_ENCODED_LEN];
    let mut len = 0;
    let mut n = value;
    loop {
        let mut byte = (n & 0x7F) as u8;
        if len > 0 {
            byte |= 0x80;
        }
        groups[len] = byte;
        len += 1;
        n >>= 7;
        if n == 0 {
            break;
        }
    }
    out.extend(groups[..len].iter().rev());
}

/// Like [`write`], but rejects values a MIDI file cannot hold.
pub fn try_write(value: u32, out: &mut Vec<u8>) -> Result<()> {
    if value > MAX_VALUE {
        return Err(HarmoniqError::VlqOverflow(value));
    }
    write(value, out);
    Ok(())
}

/// Encode `value` into a fresh buffer.
///
/// ```
/// use harmoniq::midi::vlq;
///
/// assert_eq!(vlq::encode(0), vec![0x00]);
/// assert_eq!(vlq::encode(127), vec![0x7F]);
/// assert_eq!(vlq::encode(1920), vec![0x8F, 0x00]);
/// ```
pub fn encode(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_ENCODED_LEN);
    write(value, &mut out);
    out
}

/// Decode one quantity from the front of `bytes`.
///
/// Accepts anything [`write`] produces, so values above [`MAX_VALUE`] decode
/// from five bytes. Returns the value and the number of bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(u32, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in bytes.iter().take(MAX_ENCODED_LEN).enumerate() {
        value = (value << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            let value = u32::try_from(value).map_err(|_| {
                HarmoniqError::InvalidVlq(format!("{:#X} does not fit in 32 bits", value))
            })?;
            return Ok((value, i + 1));
        }
    }
    if bytes.len() < MAX_ENCODED_LEN {
        Err(HarmoniqError::InvalidVlq(format!(
            "truncated after {} byte(s)",
            bytes.len()
        )))
    } else {
        Err(HarmoniqError::InvalidVlq(format!(
            "longer than {} bytes",
            MAX_ENCODED_LEN
        )))
    }
}
