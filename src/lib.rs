//! # EMOS Decoder Library
//!
//! Decode EMOS E6016 433 MHz weather station transmissions.
//!
//! This library takes the bit rows an OOK PWM front end produces for one
//! reception window, picks a row the sensor repeated often enough, checks
//! it and turns it into a typed [`emos::Reading`].
//!
//! ```
//! use emos_decoder::bitbuffer::{BitRow, BitRowStore};
//! use emos_decoder::emos::{decode, EMOS_E6016};
//!
//! let wire = [
//!     0x55, 0x5a, 0x7c, 0x00, 0x6a, 0xa5, 0x60, 0xe7, 0x3f, 0x36, 0xda, 0xff, 0x5d, 0x38,
//! ];
//! let store: BitRowStore = [0xff, 0xfe, 0xfd]
//!     .iter()
//!     .map(|&repeat| BitRow::from_bytes(&[&wire[..], &[repeat][..]].concat()))
//!     .collect();
//!
//! let reading = decode(&EMOS_E6016, &store).unwrap();
//! assert_eq!(reading.humidity, 37);
//! assert_eq!(reading.wind_dir_deg, 225.0);
//! ```

pub mod bitbuffer;
pub mod capture;
pub mod config;
pub mod emos;
pub mod error;
pub mod output;
