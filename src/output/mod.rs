//! # Output Module
//!
//! Sinks that receive decoded readings.
//!
//! This module handles:
//! - The `OutputSink` seam the decoder emits through
//! - JSON Lines output (one object per reading)
//! - Human readable key/value output

pub mod json;
pub mod kv;

pub use json::JsonLinesSink;
pub use kv::KeyValueSink;

use crate::emos::Reading;
use crate::error::Result;

/// Receiver of decoded readings
///
/// Called exactly once per successful decode and never for failures.
#[cfg_attr(test, mockall::automock)]
pub trait OutputSink {
    /// Serialize or display one reading
    fn emit(&mut self, reading: &Reading) -> Result<()>;
}
