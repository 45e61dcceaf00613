use std::io::Read;

/// How many leading bytes the heuristic inspects.
pub const SCAN_LIMIT: usize = 4096;

/// Control bytes that are legal in text: Tab, LF, VT, FF, CR.
const ALLOWED_CONTROL: [u8; 5] = [0x09, 0x0A, 0x0B, 0x0C, 0x0D];

/// Classify a byte source as binary or text.
///
/// Reads up to the first [`SCAN_LIMIT`] bytes (fewer if the source is
/// shorter) and scans them in order:
///
/// - a NUL byte (`0x00`) means binary, scanning stops;
/// - any other control byte below `0x20` that is not Tab, LF, VT, FF or CR
///   means binary, scanning stops;
/// - a clean prefix, or an empty source, means text.
///
/// This is a heuristic, not a MIME detector: a file whose first 4096 bytes
/// look like text is text, whatever comes after.
///
/// # Errors
///
/// Propagates any I/O error from `reader`. The caller decides what a failed
/// classification means; this function never guesses.
pub fn is_binary(mut reader: impl Read) -> std::io::Result<bool> {
    let mut buf = [0u8; SCAN_LIMIT];
    let mut filled = 0;

    // A single read may return short; keep filling until the prefix is
    // complete or the source runs out.
    while filled < SCAN_LIMIT {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }

    // Empty file is text.
    if filled == 0 {
        return Ok(false);
    }

    for &byte in &buf[..filled] {
        if byte == 0x00 {
            return Ok(true);
        }
        if byte < 0x20 && !ALLOWED_CONTROL.contains(&byte) {
            return Ok(true);
        }
    }

    Ok(false)
}
