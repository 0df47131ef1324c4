/// Result of a lossy decode of padded wire bytes.
///
/// Binary records carry ASCII field bodies padded with NUL bytes or
/// spaces. When the bytes are not cleanly ASCII the decoder degrades to
/// a hex rendering rather than failing the record, and the caller needs
/// to know which of the two it got — hex values become raw values in
/// the output, not text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaddedText {
    /// ASCII content with NUL padding and edge whitespace stripped.
    Clean(String),
    /// Non-ASCII content, rendered as lowercase hex.
    Hex(String),
}

impl PaddedText {
    /// The decoded string regardless of which path produced it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PaddedText::Clean(s) | PaddedText::Hex(s) => s,
        }
    }
}

/// Decode padded wire bytes as ASCII, falling back to hex.
///
/// Strips NUL bytes anywhere in the content and whitespace at the
/// edges. Any byte outside the ASCII range makes the whole slice
/// degrade to [`PaddedText::Hex`] — partial salvage of a mixed slice
/// would silently shift field boundaries for the caller.
#[must_use]
pub fn decode_padded(data: &[u8]) -> PaddedText {
    if data.is_ascii() {
        let cleaned: String = data
            .iter()
            .filter(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect();
        PaddedText::Clean(cleaned.trim().to_string())
    } else {
        PaddedText::Hex(hex::encode(data))
    }
}
