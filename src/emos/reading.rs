//! # Readings
//!
//! Typed output record of one successful decode.

use serde::Serialize;

use super::fields::{DateTimeGuess, RawFields};
use super::protocol::{ProtocolSpec, EMOS_MIC};

/// One decoded weather station reading
///
/// Field names follow the rtl_433 output conventions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub model: &'static str,

    /// House code
    pub id: u8,

    /// Channel switch position (1-based)
    pub channel: u8,

    pub battery_ok: bool,

    /// Temperature in °C
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,

    /// Relative humidity in %
    pub humidity: u8,

    /// Wind speed in m/s
    pub wind_avg_m_s: f64,

    /// Wind direction in degrees
    pub wind_dir_deg: f64,

    /// Packed date/time bits, encoding unknown
    pub datetime_raw: u32,

    /// Best-effort rendering of `datetime_raw`, not verified
    pub datetime_maybe: String,

    /// Integrity check that passed
    pub mic: &'static str,
}

/// A typed value in the ordered field view of a reading
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Reading {
    /// Build a reading from checksum-verified raw fields
    ///
    /// Bias and scale come from the field descriptors in `spec.layout`.
    pub fn build(spec: &ProtocolSpec, raw: &RawFields) -> Self {
        let layout = &spec.layout;

        Self {
            model: spec.model,
            id: raw.id,
            channel: layout.channel.adjust(raw.channel as i32) as u8,
            battery_ok: raw.battery != 0,
            temperature_c: layout.temperature.apply(raw.temperature as i32),
            humidity: raw.humidity,
            wind_avg_m_s: layout.wind_speed.apply(raw.wind_speed as i32),
            wind_dir_deg: layout.wind_dir.apply(raw.wind_dir as i32),
            datetime_raw: raw.datetime,
            datetime_maybe: DateTimeGuess::from_raw(raw.datetime).to_string(),
            mic: EMOS_MIC,
        }
    }

    /// Ordered name/value view for text sinks
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("model", FieldValue::Str(self.model.to_string())),
            ("id", FieldValue::Int(self.id as i64)),
            ("channel", FieldValue::Int(self.channel as i64)),
            ("battery_ok", FieldValue::Bool(self.battery_ok)),
            ("temperature_C", FieldValue::Float(self.temperature_c)),
            ("humidity", FieldValue::Int(self.humidity as i64)),
            ("wind_avg_m_s", FieldValue::Float(self.wind_avg_m_s)),
            ("wind_dir_deg", FieldValue::Float(self.wind_dir_deg)),
            ("datetime_raw", FieldValue::Int(self.datetime_raw as i64)),
            ("datetime_maybe", FieldValue::Str(self.datetime_maybe.clone())),
            ("mic", FieldValue::Str(self.mic.to_string())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emos::protocol::EMOS_E6016;

    fn raw() -> RawFields {
        RawFields {
            id: 0xFF,
            battery: 9,
            datetime: 0x156A_7C63,
            channel: 0,
            temperature: 201,
            humidity: 37,
            wind_speed: 4,
            wind_dir: 10,
            unknown: 2,
        }
    }

    #[test]
    fn test_build_scales_fields() {
        let reading = Reading::build(&EMOS_E6016, &raw());

        assert_eq!(reading.model, "EMOS-E6016");
        assert_eq!(reading.channel, 1);
        assert!(reading.battery_ok);
        assert_eq!(reading.temperature_c, 20.1);
        assert_eq!(reading.wind_avg_m_s, 4.0);
        assert_eq!(reading.wind_dir_deg, 225.0);
        assert_eq!(reading.datetime_maybe, "2741T7:49:35");
        assert_eq!(reading.mic, "CHECKSUM");
    }

    #[test]
    fn test_battery_zero_is_low() {
        let mut fields = raw();
        fields.battery = 0;
        assert!(!Reading::build(&EMOS_E6016, &fields).battery_ok);
    }

    #[test]
    fn test_negative_temperature_scaled() {
        let mut fields = raw();
        fields.temperature = -125;
        let reading = Reading::build(&EMOS_E6016, &fields);
        assert_eq!(reading.temperature_c, -12.5);
    }

    #[test]
    fn test_temperature_serializes_as_decimal() {
        let mut fields = raw();
        fields.temperature = 3;
        let json = serde_json::to_string(&Reading::build(&EMOS_E6016, &fields)).unwrap();
        assert!(json.contains("\"temperature_C\":0.3,"), "got {}", json);

        fields.temperature = -7;
        let json = serde_json::to_string(&Reading::build(&EMOS_E6016, &fields)).unwrap();
        assert!(json.contains("\"temperature_C\":-0.7,"), "got {}", json);
    }

    #[test]
    fn test_build_follows_layout_descriptors() {
        let mut spec = EMOS_E6016;
        spec.layout.temperature = spec.layout.temperature.scaled(1.0, 100.0);
        spec.layout.wind_dir = spec.layout.wind_dir.scaled(45.0, 2.0);
        spec.layout.channel = spec.layout.channel.biased(0);

        let reading = Reading::build(&spec, &raw());
        assert_eq!(reading.temperature_c, 2.01);
        assert_eq!(reading.wind_dir_deg, 225.0);
        assert_eq!(reading.channel, 0);
    }

    #[test]
    fn test_field_order_and_serialized_keys() {
        let reading = Reading::build(&EMOS_E6016, &raw());
        let names: Vec<_> = reading.fields().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            [
                "model",
                "id",
                "channel",
                "battery_ok",
                "temperature_C",
                "humidity",
                "wind_avg_m_s",
                "wind_dir_deg",
                "datetime_raw",
                "datetime_maybe",
                "mic",
            ]
        );

        let json = serde_json::to_value(&reading).unwrap();
        let object = json.as_object().unwrap();
        for name in names {
            assert!(object.contains_key(name), "missing key {}", name);
        }
    }
}
