//! # EMOS E6016 Protocol Constants and Types
//!
//! Frame layout, field descriptors and pulse timing for the EMOS E6016
//! weather station.
//!
//! ```text
//! PP PP PP II BK KK KK KK CT TT HH SS D? XX RR
//! ```
//!
//! | Symbol | Bits | Meaning |
//! |--------|------|---------|
//! | P | 24 | Signature `55 5A 7C` (on the wire, before inversion) |
//! | I | 8 | ID |
//! | B | 4 | Battery indicator |
//! | K | 30 | Date/time, encoding not known |
//! | C | 2 | Channel (0-based on the wire) |
//! | T | 12 | Temperature, signed, 0.1 °C |
//! | H | 8 | Humidity, % |
//! | S | 8 | Wind speed, m/s |
//! | D | 4 | Wind direction, 22.5° steps |
//! | ? | 4 | Unknown |
//! | X | 8 | Checksum |
//! | R | 8 | Repeat counter |

use std::fmt;

/// Model identifier reported in every reading
pub const EMOS_MODEL: &str = "EMOS-E6016";

/// Exact row length in bits
pub const EMOS_FRAME_BITS: usize = 120;

/// Frame length in bytes
pub const EMOS_FRAME_BYTES: usize = EMOS_FRAME_BITS / 8;

/// Signature bytes, checked before inversion
pub const EMOS_MAGIC: [u8; 3] = [0x55, 0x5A, 0x7C];

/// Number of bytes summed by the checksum
pub const EMOS_CHECKSUM_SPAN: usize = 13;

/// Index of the transmitted checksum byte
pub const EMOS_CHECKSUM_INDEX: usize = 13;

/// Minimum number of identical rows per transmission
pub const EMOS_MIN_REPEATS: usize = 3;

/// Width of the trailing repeat counter, excluded from row matching
pub const EMOS_REPEAT_COUNTER_BITS: usize = 8;

/// Integrity tag attached to every checksum verified reading
pub const EMOS_MIC: &str = "CHECKSUM";

/// Wind direction step in degrees
pub const WIND_DIR_STEP_DEG: f64 = 22.5;

/// Raw temperature units per °C
pub const TEMPERATURE_DIVISOR: f64 = 10.0;

/// A fixed-position bit field, MSB-first from the start of the frame
///
/// The physical value is `(raw + bias) * multiplier / divisor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitField {
    /// Field name used in trace output
    pub name: &'static str,

    /// Offset of the most significant bit from the start of the frame
    pub offset: usize,

    /// Width in bits (1-32)
    pub width: usize,

    /// Two's complement field
    pub signed: bool,

    /// Added to the raw value before scaling
    pub bias: i32,

    pub multiplier: f64,

    pub divisor: f64,
}

impl BitField {
    pub const fn unsigned(name: &'static str, offset: usize, width: usize) -> Self {
        Self { name, offset, width, signed: false, bias: 0, multiplier: 1.0, divisor: 1.0 }
    }

    pub const fn signed(name: &'static str, offset: usize, width: usize) -> Self {
        Self { name, offset, width, signed: true, bias: 0, multiplier: 1.0, divisor: 1.0 }
    }

    pub const fn biased(self, bias: i32) -> Self {
        Self { bias, ..self }
    }

    pub const fn scaled(self, multiplier: f64, divisor: f64) -> Self {
        Self { multiplier, divisor, ..self }
    }

    /// Raw value with the bias applied
    pub const fn adjust(&self, raw: i32) -> i32 {
        raw + self.bias
    }

    /// Physical value of a raw reading
    ///
    /// The divisor is applied last so decimal scales round like `raw / 10`.
    pub fn apply(&self, raw: i32) -> f64 {
        self.adjust(raw) as f64 * self.multiplier / self.divisor
    }

    /// Bit just past the end of the field
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Field layout of the 14 checksum covered bytes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    pub id: BitField,
    pub battery: BitField,
    pub datetime: BitField,
    pub channel: BitField,
    pub temperature: BitField,
    pub humidity: BitField,
    pub wind_speed: BitField,
    pub wind_dir: BitField,
    pub unknown: BitField,
}

impl FrameLayout {
    /// All fields in frame order
    pub fn fields(&self) -> [BitField; 9] {
        [
            self.id,
            self.battery,
            self.datetime,
            self.channel,
            self.temperature,
            self.humidity,
            self.wind_speed,
            self.wind_dir,
            self.unknown,
        ]
    }
}

/// Pulse timing the OOK PWM front end uses for this sensor (microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub short_width: u32,
    pub long_width: u32,
    pub gap_limit: u32,
    pub reset_limit: u32,
    pub sync_width: u32,
}

/// Static description of one sensor protocol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtocolSpec {
    pub model: &'static str,
    pub frame_bits: usize,
    pub magic: [u8; 3],
    pub checksum_span: usize,
    pub checksum_index: usize,
    pub min_repeats: usize,
    pub repeat_counter_bits: usize,
    pub layout: FrameLayout,
    pub timing: PulseTiming,
}

impl ProtocolSpec {
    /// Number of leading bits that must match between repeated rows
    pub const fn match_bits(&self) -> usize {
        self.frame_bits - self.repeat_counter_bits
    }

    /// rtl_433 flex decoder spec for the front end
    pub fn flex_spec(&self) -> FlexSpec<'_> {
        FlexSpec(self)
    }
}

/// Display adapter producing an rtl_433 `-X` flex spec string
pub struct FlexSpec<'a>(&'a ProtocolSpec);

impl fmt::Display for FlexSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.0;
        write!(
            f,
            "n={},m=OOK_PWM,s={},l={},r={},g=0,t=0,y={},rows>={},bits={}",
            spec.model,
            spec.timing.short_width,
            spec.timing.long_width,
            spec.timing.reset_limit,
            spec.timing.sync_width,
            spec.min_repeats,
            spec.frame_bits,
        )
    }
}

/// The EMOS E6016 weather station with DCF77
pub static EMOS_E6016: ProtocolSpec = ProtocolSpec {
    model: EMOS_MODEL,
    frame_bits: EMOS_FRAME_BITS,
    magic: EMOS_MAGIC,
    checksum_span: EMOS_CHECKSUM_SPAN,
    checksum_index: EMOS_CHECKSUM_INDEX,
    min_repeats: EMOS_MIN_REPEATS,
    repeat_counter_bits: EMOS_REPEAT_COUNTER_BITS,
    layout: FrameLayout {
        id: BitField::unsigned("id", 24, 8),
        battery: BitField::unsigned("battery", 32, 4),
        datetime: BitField::unsigned("datetime", 36, 30),
        channel: BitField::unsigned("channel", 66, 2).biased(1),
        temperature: BitField::signed("temperature", 68, 12).scaled(1.0, TEMPERATURE_DIVISOR),
        humidity: BitField::unsigned("humidity", 80, 8),
        wind_speed: BitField::unsigned("wind_speed", 88, 8),
        wind_dir: BitField::unsigned("wind_dir", 96, 4).scaled(WIND_DIR_STEP_DEG, 1.0),
        unknown: BitField::unsigned("unknown", 100, 4),
    },
    timing: PulseTiming {
        short_width: 280,
        long_width: 796,
        gap_limit: 3000,
        reset_limit: 804,
        sync_width: 1836,
    },
};
