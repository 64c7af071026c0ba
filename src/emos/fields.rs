//! # Field Extraction
//!
//! Reads the [`FrameLayout`] descriptors out of an inverted frame.
//!
//! Unsigned fields are packed MSB-first. Signed fields are left-justified
//! into a 32-bit signed container and arithmetic-shifted back down, so the
//! top bit of the field propagates into the result.

use super::frame::Frame;
use super::protocol::{BitField, FrameLayout};

/// Read an unsigned MSB-first bit field
///
/// # Panics
///
/// Panics if the field extends past the end of `bytes` or is wider than 32
/// bits; layouts are static and checked by tests.
pub fn read_unsigned(bytes: &[u8], field: &BitField) -> u32 {
    debug_assert!(field.width <= 32);

    let mut value: u32 = 0;
    for bit in field.offset..field.end() {
        let byte = bytes[bit / 8];
        let set = (byte >> (7 - bit % 8)) & 1;
        value = (value << 1) | set as u32;
    }
    value
}

/// Read a two's complement MSB-first bit field
pub fn read_signed(bytes: &[u8], field: &BitField) -> i32 {
    let pad = 32 - field.width as u32;
    ((read_unsigned(bytes, field) << pad) as i32) >> pad
}

/// Read a field according to its signedness
pub fn read(bytes: &[u8], field: &BitField) -> i32 {
    if field.signed {
        read_signed(bytes, field)
    } else {
        read_unsigned(bytes, field) as i32
    }
}

/// Raw field values of one frame, before scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields {
    pub id: u8,
    pub battery: u8,
    pub datetime: u32,
    pub channel: u8,
    pub temperature: i16,
    pub humidity: u8,
    pub wind_speed: u8,
    pub wind_dir: u8,
    pub unknown: u8,
}

/// Extract every field of the layout
///
/// Total once the frame has passed validation and checksum: every field
/// lies inside the fixed 14-byte body.
pub fn extract(frame: &Frame, layout: &FrameLayout) -> RawFields {
    let b = frame.bytes();

    RawFields {
        id: read_unsigned(b, &layout.id) as u8,
        battery: read_unsigned(b, &layout.battery) as u8,
        datetime: read_unsigned(b, &layout.datetime),
        channel: read_unsigned(b, &layout.channel) as u8,
        temperature: read(b, &layout.temperature) as i16,
        humidity: read_unsigned(b, &layout.humidity) as u8,
        wind_speed: read_unsigned(b, &layout.wind_speed) as u8,
        wind_dir: read_unsigned(b, &layout.wind_dir) as u8,
        unknown: read_unsigned(b, &layout.unknown) as u8,
    }
}

/// Sub-fields of the packed date/time value
///
/// The bit encoding has not been confirmed against a DCF77 reference, so
/// these values carry no calendar guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeGuess {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl DateTimeGuess {
    pub fn from_raw(raw: u32) -> Self {
        Self {
            seconds: raw & 0x3F,
            minutes: (raw >> 6) & 0x3F,
            hours: (raw >> 12) & 0x1F,
            days: raw >> 17,
        }
    }
}

impl std::fmt::Display for DateTimeGuess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}T{}:{}:{}", self.days, self.hours, self.minutes, self.seconds)
    }
}
