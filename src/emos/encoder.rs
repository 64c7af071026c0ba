//! # Frame Encoder
//!
//! Builds wire rows the way the sensor transmits them. Used to synthesize
//! transmissions for replay and tests.

use super::checksum::add_bytes;
use super::fields::RawFields;
use super::protocol::{BitField, ProtocolSpec};
use crate::bitbuffer::{BitRow, BitRowStore};

/// Write the low `field.width` bits of `value` MSB-first into `bytes`
pub fn write_field(bytes: &mut [u8], field: &BitField, value: u32) {
    for i in 0..field.width {
        let bit = field.offset + i;
        let set = (value >> (field.width - 1 - i)) & 1;
        let mask = 1u8 << (7 - bit % 8);

        if set == 1 {
            bytes[bit / 8] |= mask;
        } else {
            bytes[bit / 8] &= !mask;
        }
    }
}

/// Encode raw fields into the `spec.frame_bits / 8` wire bytes of one row
///
/// The body and checksum are built in inverted form, then every byte is
/// flipped back to wire levels. The signature is written on the wire
/// side. `repeat` is the trailing counter as it appears on air.
pub fn encode_frame(spec: &ProtocolSpec, raw: &RawFields, repeat: u8) -> Vec<u8> {
    let layout = &spec.layout;
    let mut frame = vec![0u8; spec.frame_bits / 8];

    for (i, &b) in spec.magic.iter().enumerate() {
        frame[i] = !b;
    }

    write_field(&mut frame, &layout.id, raw.id as u32);
    write_field(&mut frame, &layout.battery, raw.battery as u32);
    write_field(&mut frame, &layout.datetime, raw.datetime);
    write_field(&mut frame, &layout.channel, raw.channel as u32);
    write_field(&mut frame, &layout.temperature, raw.temperature as u16 as u32);
    write_field(&mut frame, &layout.humidity, raw.humidity as u32);
    write_field(&mut frame, &layout.wind_speed, raw.wind_speed as u32);
    write_field(&mut frame, &layout.wind_dir, raw.wind_dir as u32);
    write_field(&mut frame, &layout.unknown, raw.unknown as u32);

    frame[spec.checksum_index] = add_bytes(&frame[..spec.checksum_span]);
    if let Some(last) = frame.last_mut() {
        *last = !repeat;
    }

    frame.into_iter().map(|b| !b).collect()
}

/// Encode a burst of `repeats` rows with a decrementing repeat counter
pub fn encode_transmission(spec: &ProtocolSpec, raw: &RawFields, repeats: usize) -> BitRowStore {
    (0..repeats)
        .map(|i| {
            let counter = 0xFFu8.wrapping_sub(i as u8);
            BitRow::from_bytes(&encode_frame(spec, raw, counter))
        })
        .collect()
}
