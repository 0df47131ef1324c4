/// Length of a message type indicator on the wire.
pub const MTI_LEN: usize = 4;

/// Start-of-text control byte used by the source network's framing.
///
/// Binary settlement dumps mark record payloads with STX. The
/// resynchronizer scans for this byte to find the next plausible record
/// start after a fault, and the encoding detector treats a leading STX
/// (or SOH) as a binary-format signal.
pub const STX: u8 = 0x02;

/// Start-of-header control byte, the other binary-format signal.
pub const SOH: u8 = 0x01;

/// Message type indicators observed in network settlement dumps.
///
/// This is the lookahead set for the record boundary heuristic: a
/// candidate record start must begin with one of these values. The set
/// is deliberately explicit rather than a numeric-range pattern so that
/// additions are reviewable one value at a time.
pub const KNOWN_MTIS: [&str; 10] = [
    "1240", "1442", "1644", "1804", "1420", "1422", "1424", "1426", "1428", "1430",
];

/// Human-readable meaning of a known MTI.
///
/// | MTI  | Meaning                     |
/// |------|-----------------------------|
/// | 1240 | Authorization Request       |
/// | 1250 | Authorization Response      |
/// | 1420 | Clearing Advice             |
/// | 1430 | Clearing Advice Response    |
/// | 1440 | Clearing Notification       |
///
/// Returns `None` for values outside the table — callers render those
/// as an unknown transaction type, not an error.
#[must_use]
pub fn describe(mti: &str) -> Option<&'static str> {
    match mti {
        "1240" => Some("Authorization Request"),
        "1250" => Some("Authorization Response"),
        "1420" => Some("Clearing Advice"),
        "1430" => Some("Clearing Advice Response"),
        "1440" => Some("Clearing Notification"),
        _ => None,
    }
}

/// Whether a decoded MTI looks like a real message type indicator.
///
/// Exactly four ASCII digits. Used by the binary record decoder to
/// distinguish a record start from mid-stream garbage: an implausible
/// MTI is the fault signal that hands control to the resynchronizer.
#[must_use]
pub fn is_plausible(mti: &str) -> bool {
    mti.len() == MTI_LEN && mti.bytes().all(|b| b.is_ascii_digit())
}
