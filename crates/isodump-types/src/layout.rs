use crate::field::DecodeStrategy;

/// Fixed record length of a T112-style settlement dump, in characters.
pub const T112_RECORD_LEN: usize = 256;

/// Minimum plausible length of a boundary-carved record candidate.
///
/// Candidates shorter than this are trailing noise fragments, not
/// records — a real fixed-width record carries at least the leading
/// identification fields.
pub const MIN_RECORD_LEN: usize = 60;

/// One slice of the fixed-width layout.
///
/// `start` and `len` are character offsets into the record. `number`
/// links the slice to its ISO field number where one exists, which is
/// what spec conformance validation keys on; unlinked slices are
/// network-private data and are never validated.
#[derive(Clone, Copy, Debug)]
pub struct LayoutField {
    pub name: &'static str,
    pub start: usize,
    pub len: usize,
    pub number: Option<u8>,
    pub strategy: DecodeStrategy,
}

/// The T112 fixed-width layout.
///
/// Field boundaries are constant character offsets; there are no
/// delimiters. The MTI occupies characters 0..4 and is not listed here
/// — the text decoder reads it before slicing data fields. Offsets are
/// the observed clearing-file positions, so gaps between consecutive
/// slices are intentional (filler and fields nobody analyses).
pub const T112_LAYOUT: [LayoutField; 23] = [
    lf("PAN", 4, 19, Some(2), DecodeStrategy::Identity),
    lf("Processing Code", 23, 6, Some(3), DecodeStrategy::Identity),
    lf("Amount Transaction", 29, 12, Some(4), DecodeStrategy::AmountRescale),
    lf("Amount Reconciliation", 41, 12, Some(5), DecodeStrategy::AmountRescale),
    lf("Conversion Rate Reconciliation", 53, 8, Some(9), DecodeStrategy::Identity),
    lf("Local Transaction Date/Time", 61, 10, Some(12), DecodeStrategy::DateTimeReformat),
    lf("Date Expiration", 71, 4, Some(14), DecodeStrategy::Identity),
    lf("POS Data Code", 75, 3, Some(22), DecodeStrategy::Identity),
    lf("Card Sequence Number", 78, 3, Some(23), DecodeStrategy::Identity),
    lf("Function Code", 81, 3, Some(24), DecodeStrategy::Identity),
    lf("Message Reason Code", 84, 4, Some(25), DecodeStrategy::Identity),
    lf("Card Acceptor Business Code", 88, 4, Some(26), DecodeStrategy::Identity),
    lf("Amounts Original", 92, 12, Some(30), DecodeStrategy::AmountRescale),
    lf("Acquirer Reference Data", 104, 12, Some(31), DecodeStrategy::Identity),
    lf("Acquiring Institution ID Code", 116, 11, Some(32), DecodeStrategy::Identity),
    lf("Forwarding Institution ID Code", 127, 11, Some(33), DecodeStrategy::Identity),
    lf("Retrieval Reference Number", 138, 12, Some(37), DecodeStrategy::Identity),
    lf("Approval Code", 150, 6, Some(38), DecodeStrategy::Identity),
    lf("Service Code", 156, 3, Some(40), DecodeStrategy::Identity),
    lf("Card Acceptor Terminal ID", 159, 8, Some(41), DecodeStrategy::Identity),
    lf("Card Acceptor ID Code", 167, 15, Some(42), DecodeStrategy::Identity),
    lf("Card Acceptor Name/Location", 182, 40, Some(43), DecodeStrategy::Identity),
    lf("Additional Data", 222, 34, Some(48), DecodeStrategy::Identity),
];

const fn lf(
    name: &'static str,
    start: usize,
    len: usize,
    number: Option<u8>,
    strategy: DecodeStrategy,
) -> LayoutField {
    LayoutField {
        name,
        start,
        len,
        number,
        strategy,
    }
}
