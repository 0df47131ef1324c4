use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, Encoding};
use isodump_wire::mti::{SOH, STX};

/// Classification of a raw input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    /// Bitmap-framed binary records.
    Binary,
    /// Character data: delimited or fixed-width records.
    Text,
}

/// Extensions that conventionally carry binary settlement dumps.
const BINARY_EXTENSIONS: [&str; 2] = ["001", "002"];

/// How far into the buffer to look for NUL bytes when sniffing.
const SNIFF_WINDOW: usize = 1000;

/// Minimum chardet confidence before a detected charset is trusted.
const CHARSET_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Classify a buffer as binary or text.
///
/// Binary when any of: the filename carries a binary-dump extension,
/// the buffer opens with an SOH/STX control byte, or a NUL byte
/// appears within the first [`SNIFF_WINDOW`] bytes. Everything else is
/// text. Pure function of `(content, filename)` — no I/O, no state.
#[must_use]
pub fn classify(content: &[u8], filename: &str) -> ContentKind {
    let extension_hit = filename
        .rsplit('.')
        .next()
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

    let control_prefix = matches!(content.first(), Some(&SOH | &STX));

    let early_nul = content[..content.len().min(SNIFF_WINDOW)]
        .iter()
        .any(|&b| b == 0);

    if extension_hit || control_prefix || early_nul {
        ContentKind::Binary
    } else {
        ContentKind::Text
    }
}

/// Decode text content, detecting its charset statistically.
///
/// Runs chardet-style detection over the buffer and uses the detected
/// charset when its confidence clears [`CHARSET_CONFIDENCE_THRESHOLD`];
/// otherwise falls back to Latin-1, the byte-preserving single-byte
/// charset that can never fail to decode. Undecodable sequences under
/// the detected charset are replaced, not fatal.
///
/// Returns the decoded string and the charset label actually used.
#[must_use]
pub fn decode_text(content: &[u8]) -> (String, String) {
    let (charset, confidence, _language) = chardet::detect(content);

    if confidence > CHARSET_CONFIDENCE_THRESHOLD {
        if let Some(codec) = encoding_from_whatwg_label(chardet::charset2encoding(&charset)) {
            if let Ok(decoded) = codec.decode(content, DecoderTrap::Replace) {
                return (decoded, codec.name().to_string());
            }
        }
    }

    // Latin-1 maps every byte; this branch cannot fail.
    let decoded = encoding::all::ISO_8859_1
        .decode(content, DecoderTrap::Replace)
        .unwrap_or_else(|_| String::from_utf8_lossy(content).into_owned());
    (decoded, "latin-1".to_string())
}
