//! # EMOS E6016 Protocol Module
//!
//! Decoder for the EMOS E6016 weather station with DCF77.
//!
//! This module handles:
//! - Consensus matching over repeated rows
//! - Length and signature validation
//! - Additive checksum verification on the inverted frame
//! - Table-driven field extraction with sign extension
//! - Frame encoding for synthetic transmissions

pub mod protocol;
pub mod consensus;
pub mod frame;
pub mod checksum;
pub mod fields;
pub mod reading;
pub mod encoder;
pub mod decoder;

pub use decoder::{decode, DecodeStats, Decoder};
pub use protocol::EMOS_E6016;
pub use reading::{FieldValue, Reading};
