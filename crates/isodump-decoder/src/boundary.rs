use std::sync::LazyLock;

use isodump_types::layout::MIN_RECORD_LEN;
use isodump_wire::mti::KNOWN_MTIS;
use regex::Regex;

/// How strictly the boundary heuristic vets a candidate record.
///
/// The source data admits two interpretations of "record start": any
/// known-MTI substring, or a known-MTI substring whose span also
/// contains something PAN-shaped. The strict variant is the default —
/// an MTI pattern is four digits and fires constantly inside unrelated
/// numeric data, while a 12–19 digit card-prefixed run almost never
/// does. The lax variant exists as a lower-confidence mode for dumps
/// whose PANs are truncated or absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Accept a candidate only when a PAN-shaped digit run confirms it.
    #[default]
    PanConfirmed,
    /// Accept on the MTI pattern alone.
    MtiOnly,
}

/// One carved candidate record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The candidate text, end-trimmed.
    pub text: &'a str,
    /// Byte offset of the candidate start within the scanned content.
    pub offset: usize,
}

/// Primary pattern: any known message type indicator.
static MTI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&KNOWN_MTIS.join("|")).expect("static MTI alternation must compile")
});

/// Confirmatory pattern: a plausible primary account number — a 12–19
/// digit run starting with a card-scheme leading digit (2/5 Mastercard,
/// 4 Visa, 6 Discover/UnionPay).
static PAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[2456][0-9]{11,18}").expect("static PAN pattern must compile"));

/// Carve unframed text into candidate records.
///
/// A two-stage match, kept as two separate patterns so the tie-break
/// logic stays auditable:
///
///   1. Find every non-overlapping known-MTI match start. Each
///      candidate spans from one match start to the next (or to the end
///      of content for the last).
///   2. Drop candidates shorter than [`MIN_RECORD_LEN`] (trailing noise
///      fragments), and — in [`BoundaryMode::PanConfirmed`] — drop
///      candidates with no PAN-shaped digit run, which rejects spurious
///      MTI matches inside unrelated data.
///
/// Approximate by design: a genuine record whose PAN was truncated away
/// is a tolerated false negative. Missing a record is preferred over
/// inventing one.
#[must_use]
pub fn split(content: &str, mode: BoundaryMode) -> Vec<Candidate<'_>> {
    let starts: Vec<usize> = MTI_PATTERN.find_iter(content).map(|m| m.start()).collect();

    let mut candidates = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(content.len());
        let text = content[start..end].trim_end();

        if text.len() < MIN_RECORD_LEN {
            continue;
        }
        if mode == BoundaryMode::PanConfirmed && !PAN_PATTERN.is_match(text) {
            continue;
        }
        candidates.push(Candidate {
            text,
            offset: start,
        });
    }
    candidates
}
