//! Hex digests over the DTMF alphabet
//!
//! Byte payloads travel the audio channel as uppercase hex with the
//! two digits missing from the keypad remapped: `E` becomes `*` and
//! `F` becomes `#`. The inverse mapping also accepts raw `E`/`F` and
//! lowercase hex, so digests survive relaxed transcription.

use crate::error::{DtmfError, Result};

/// Render bytes as a DTMF-safe hex digest
pub fn digest_from_bytes(bytes: &[u8]) -> String {
    hex::encode_upper(bytes).replace('E', "*").replace('F', "#")
}

/// Recover bytes from a digest string
///
/// Errors with `InvalidDigest` on odd length or characters outside the
/// digest alphabet.
pub fn bytes_from_digest(digest: &str) -> Result<Vec<u8>> {
    let hex_text = digest.replace('*', "E").replace('#', "F");
    hex::decode(hex_text).map_err(|e| DtmfError::InvalidDigest(e.to_string()))
}
