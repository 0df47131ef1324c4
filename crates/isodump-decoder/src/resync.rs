use isodump_wire::mti::{MTI_LEN, STX};

/// Find the next plausible record start after a decode fault.
///
/// Scans forward from `fault_position + 1` for the next STX framing
/// byte. When one is found at offset `p`, decoding resumes `MTI_LEN`
/// bytes earlier where the message type indicator of the framed record
/// would begin — or at `p` itself when `p` is too close to the buffer
/// head for that backstep. When no marker remains, the decode pass is
/// over: the caller returns everything decoded so far as a partial
/// success.
///
/// This function only locates the resume point; the caller is
/// responsible for emitting the skipped-byte-range warning and for
/// guaranteeing forward progress when the resume point would not
/// advance the cursor.
#[must_use]
pub fn resync(buffer: &[u8], fault_position: usize) -> Option<usize> {
    let search_from = fault_position + 1;
    if search_from >= buffer.len() {
        return None;
    }

    let p = buffer[search_from..]
        .iter()
        .position(|&b| b == STX)?
        + search_from;

    Some(if p >= MTI_LEN { p - MTI_LEN } else { p })
}
