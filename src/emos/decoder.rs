//! # Transmission Decoder
//!
//! Runs one transmission through consensus, validation, inversion,
//! checksum and field extraction.

use tracing::{debug, info, trace, warn};

use super::consensus::find_repeated_row;
use super::checksum;
use super::fields::extract;
use super::frame::validate;
use super::protocol::{ProtocolSpec, EMOS_E6016};
use super::reading::Reading;
use crate::bitbuffer::BitRowStore;
use crate::error::DecodeError;
use crate::output::OutputSink;

/// Decode a transmission into a reading
///
/// Pure: the store is never modified and the same input always yields the
/// same result.
///
/// # Errors
///
/// Returns the first failing stage. No partial reading is ever built.
pub fn decode(spec: &ProtocolSpec, store: &BitRowStore) -> Result<Reading, DecodeError> {
    let index = find_repeated_row(store, spec.min_repeats, spec.match_bits())?;
    trace!(row = index, "found repeated row");

    let row = &store.rows()[index];
    let frame = validate(spec, index, row)?.invert();

    checksum::verify(frame.bytes(), spec.checksum_span, spec.checksum_index).map_err(
        |(computed, received)| DecodeError::ChecksumMismatch {
            row: index,
            computed,
            received,
        },
    )?;

    let raw = extract(&frame, &spec.layout);
    trace!(row = index, unknown = raw.unknown, "extracted fields");

    Ok(Reading::build(spec, &raw))
}

/// Per-decoder counters for a shutdown summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub transmissions: u64,
    pub readings: u64,
    pub consensus_failures: u64,
    pub length_mismatches: u64,
    pub signature_mismatches: u64,
    pub checksum_mismatches: u64,
    pub sink_failures: u64,
}

impl DecodeStats {
    fn record_failure(&mut self, err: &DecodeError) {
        match err {
            DecodeError::ConsensusFailure { .. } => self.consensus_failures += 1,
            DecodeError::LengthMismatch { .. } => self.length_mismatches += 1,
            DecodeError::SignatureMismatch { .. } => self.signature_mismatches += 1,
            DecodeError::ChecksumMismatch { .. } => self.checksum_mismatches += 1,
        }
    }
}

/// Decoder bound to one protocol description
#[derive(Debug, Clone)]
pub struct Decoder {
    spec: &'static ProtocolSpec,
    stats: DecodeStats,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(&EMOS_E6016)
    }
}

impl Decoder {
    pub fn new(spec: &'static ProtocolSpec) -> Self {
        Self {
            spec,
            stats: DecodeStats::default(),
        }
    }

    pub fn spec(&self) -> &'static ProtocolSpec {
        self.spec
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Decode without side effects on the output
    pub fn decode(&self, store: &BitRowStore) -> Result<Reading, DecodeError> {
        decode(self.spec, store)
    }

    /// Decode and hand a successful reading to `sink`
    ///
    /// Failures are logged and counted, never returned.
    ///
    /// # Returns
    ///
    /// * `usize` - 1 if a reading was emitted, 0 otherwise
    pub fn decode_into(&mut self, store: &BitRowStore, sink: &mut dyn OutputSink) -> usize {
        self.stats.transmissions += 1;

        let reading = match decode(self.spec, store) {
            Ok(reading) => reading,
            Err(e) => {
                debug!(stage = e.stage(), status = ?e.status(), "{}: {}", self.spec.model, e);
                self.stats.record_failure(&e);
                return 0;
            }
        };

        if let Err(e) = sink.emit(&reading) {
            warn!("Failed to emit reading: {}", e);
            self.stats.sink_failures += 1;
            return 0;
        }

        info!(
            id = reading.id,
            channel = reading.channel,
            "{} reading: {:.1} C, {}%",
            reading.model,
            reading.temperature_c,
            reading.humidity
        );
        self.stats.readings += 1;
        1
    }
}
