//! # Key/Value Sink
//!
//! Prints readings as aligned `key : value` lines, one block per reading.

use std::io::Write;

use super::OutputSink;
use crate::emos::{FieldValue, Reading};
use crate::error::Result;

/// Width of the key column
const KEY_WIDTH: usize = 16;

/// Separator line written before each reading
const SEPARATOR: &str = "_ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _";

/// Human readable writer
pub struct KeyValueSink<W: Write> {
    writer: W,
}

impl<W: Write> KeyValueSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Render one field value
fn format_value(name: &str, value: &FieldValue) -> String {
    match value {
        // Packed bits read better as hex
        FieldValue::Int(v) if name == "datetime_raw" => format!("{:08x}", v),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => format!("{:.1}", v),
        FieldValue::Bool(v) => u8::from(*v).to_string(),
        FieldValue::Str(s) => s.clone(),
    }
}

impl<W: Write> OutputSink for KeyValueSink<W> {
    fn emit(&mut self, reading: &Reading) -> Result<()> {
        writeln!(self.writer, "{}", SEPARATOR)?;
        for (name, value) in reading.fields() {
            writeln!(
                self.writer,
                "{:<width$}: {}",
                name,
                format_value(name, &value),
                width = KEY_WIDTH
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emos::fields::RawFields;
    use crate::emos::EMOS_E6016;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value("datetime_raw", &FieldValue::Int(0x156A_7C63)), "156a7c63");
        assert_eq!(format_value("datetime_raw", &FieldValue::Int(0x63)), "00000063");
        assert_eq!(format_value("id", &FieldValue::Int(255)), "255");
        assert_eq!(format_value("temperature_C", &FieldValue::Float(-12.5)), "-12.5");
        assert_eq!(format_value("battery_ok", &FieldValue::Bool(true)), "1");
    }

    #[test]
    fn test_block_layout() {
        let reading = Reading::build(
            &EMOS_E6016,
            &RawFields {
                id: 255,
                battery: 9,
                datetime: 0x156A_7C63,
                channel: 0,
                temperature: 201,
                humidity: 37,
                wind_speed: 0,
                wind_dir: 10,
                unknown: 2,
            },
        );

        let mut sink = KeyValueSink::new(Vec::new());
        sink.emit(&reading).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], SEPARATOR);
        assert_eq!(lines[1], "model           : EMOS-E6016");
        assert_eq!(lines[5], "temperature_C   : 20.1");
        assert_eq!(lines[8], "wind_dir_deg    : 225.0");
        assert_eq!(lines[9], "datetime_raw    : 156a7c63");
        assert_eq!(lines[10], "datetime_maybe  : 2741T7:49:35");
    }
}
