//! Permissive text decoding
//!
//! Files are decoded best-effort: a BOM wins, valid UTF-8 is taken as-is, and
//! anything else goes through charset detection with malformed sequences
//! replaced by U+FFFD. Decoding itself never fails; only the read can.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::io;
use std::path::Path;

/// Read a file and decode it to text, returning the encoding that was used.
pub fn read_file_safe(path: &Path) -> io::Result<(String, &'static Encoding)> {
    let bytes = fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

/// Decode raw bytes to a `String`, replacing undecodable sequences.
pub fn decode_bytes(bytes: &[u8]) -> (String, &'static Encoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text.into_owned(), encoding);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced malformed byte sequences");
    }
    (text.into_owned(), encoding)
}
