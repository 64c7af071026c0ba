//! # JSON Lines Sink
//!
//! Writes each reading as one JSON object per line.

use std::io::Write;

use chrono::Local;
use serde::Serialize;

use super::OutputSink;
use crate::emos::Reading;
use crate::error::Result;

/// rtl_433 style local timestamp format
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reading with an optional leading receive time
#[derive(Serialize)]
struct Record<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,

    #[serde(flatten)]
    reading: &'a Reading,
}

/// JSON Lines writer
pub struct JsonLinesSink<W: Write> {
    writer: W,
    timestamps: bool,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink; with `timestamps`, a leading `time` key is added
    pub fn new(writer: W, timestamps: bool) -> Self {
        Self { writer, timestamps }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for JsonLinesSink<W> {
    fn emit(&mut self, reading: &Reading) -> Result<()> {
        let record = Record {
            time: self
                .timestamps
                .then(|| Local::now().format(TIME_FORMAT).to_string()),
            reading,
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
