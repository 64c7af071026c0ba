//! # Additive Checksum
//!
//! Modulo-256 byte sum used by the EMOS E6016.
//!
//! The checksum is defined over the inverted frame: the sum of bytes
//! 0..13 must equal byte 13.

/// Sum bytes with 8-bit wraparound
///
/// # Examples
///
/// ```
/// use emos_decoder::emos::checksum::add_bytes;
///
/// assert_eq!(add_bytes(&[0xFF, 0x02]), 0x01);
/// ```
pub fn add_bytes(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

/// Verify the checksum of an inverted frame
///
/// # Returns
///
/// * `Ok(())` if the computed sum matches, otherwise `Err((computed, received))`
pub fn verify(frame: &[u8], span: usize, index: usize) -> Result<(), (u8, u8)> {
    let computed = add_bytes(&frame[..span]);
    let received = frame[index];

    if computed == received {
        Ok(())
    } else {
        Err((computed, received))
    }
}
