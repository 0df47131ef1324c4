use isodump_types::record::{DecodedRecord, Diagnostic};
use isodump_types::spec::SpecSet;

use crate::binary::BinaryDecoder;
use crate::boundary::BoundaryMode;
use crate::encoding::{self, ContentKind};
use crate::text;

/// Everything one decode pass produced.
///
/// The engine never throws past its own boundary: every input yields a
/// (possibly empty) record sequence plus the diagnostics accumulated
/// along the way. An empty record list is the total-failure outcome —
/// the caller decides how loudly to surface "no valid records".
#[derive(Debug, Default)]
pub struct DecodeOutput {
    pub records: Vec<DecodedRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// The decoding engine.
///
/// One instance holds the decode-time configuration (external field
/// specifications, boundary strictness) and is reusable across any
/// number of buffers — it keeps no per-buffer state, so decoding
/// different files from different threads through one shared instance
/// is sound.
///
/// ```text
///   raw bytes ──► classify ──┬─► BinaryDecoder ──► records
///                            └─► charset decode ──► text decoder
///                                  (boundary heuristic carves
///                                   unframed fixed-width content)
/// ```
#[derive(Debug, Default)]
pub struct DumpDecoder {
    specs: Option<SpecSet>,
    boundary_mode: BoundaryMode,
}

impl DumpDecoder {
    /// An engine with no external specifications and strict boundary
    /// confirmation.
    #[must_use]
    pub fn new() -> Self {
        DumpDecoder::default()
    }

    /// Attach an externally supplied specification surface. Overrides
    /// registry field lengths and switches on conformance validation.
    #[must_use]
    pub fn with_specs(mut self, specs: SpecSet) -> Self {
        self.specs = Some(specs);
        self
    }

    /// Select the boundary heuristic's strictness.
    #[must_use]
    pub fn with_boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.boundary_mode = mode;
        self
    }

    /// Decode one raw buffer.
    ///
    /// `filename` is an opaque source identifier: it feeds the
    /// extension hint of the format classifier and is stamped on every
    /// record as `source`, but is never opened — the engine does no
    /// file-system interaction of its own.
    #[must_use]
    pub fn decode(&self, content: &[u8], filename: &str) -> DecodeOutput {
        let (mut records, diagnostics) = match encoding::classify(content, filename) {
            ContentKind::Binary => BinaryDecoder::new(content, self.specs.as_ref()).decode_all(),
            ContentKind::Text => {
                let (decoded, _charset) = encoding::decode_text(content);
                text::decode_text(&decoded, self.specs.as_ref(), self.boundary_mode)
            }
        };

        for record in &mut records {
            record.source = Some(filename.to_string());
        }

        DecodeOutput {
            records,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isodump_types::record::RecordFormat;

    #[test]
    fn stamps_source_on_every_record() {
        let output = DumpDecoder::new().decode(b"1240|3:123456", "batch7.txt");
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].source.as_deref(), Some("batch7.txt"));
        assert_eq!(output.records[0].record_format, RecordFormat::Text);
    }

    #[test]
    fn unparseable_buffer_is_empty_not_error() {
        let output = DumpDecoder::new().decode(b"nothing resembling a record", "noise.txt");
        assert!(output.records.is_empty());
    }

    #[test]
    fn extension_routes_to_binary() {
        // A text-looking payload with a binary extension goes down the
        // binary path and fails to find a plausible MTI: no records.
        let output = DumpDecoder::new().decode(b"hello world, not a dump", "x.001");
        assert!(output.records.is_empty());
    }
}
