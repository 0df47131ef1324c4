use isodump_types::field::DecodeStrategy;
use isodump_types::record::{DecodedRecord, Diagnostic, RecordFormat};
use isodump_types::registry;
use isodump_types::spec::{MessageSpec, SpecSet};
use isodump_types::value::FieldValue;
use isodump_wire::ascii::{PaddedText, decode_padded};
use isodump_wire::bitmap::{BITMAP_LEN, decode_bitmap};
use isodump_wire::mti::{MTI_LEN, is_plausible};

use crate::fault::{DecodeFault, FaultReason};
use crate::resync::resync;

/// Cursor-based decoder for bitmap-framed binary records.
///
/// Walks a buffer as a state machine over a monotone cursor:
///
/// ```text
///   ReadMti ──► ReadBitmap ──► ReadField(i)* ──► RecordComplete ──┐
///      │             │              │                             │
///      │             │ <8 bytes     │ body truncated              │
///      │             ▼              ▼                             │
///      │      stream exhausted   partial record emitted           │
///      │                                                          │
///      └── implausible MTI / unknown field length ──► Fault ──────┤
///                                       │                         │
///                                       ▼                         ▼
///                                  resynchronize ──────────► next ReadMti
/// ```
///
/// Per-field problems degrade in place (hex values, `Absent` amounts)
/// and never abort a record. A `Fault` hands the cursor to the
/// resynchronizer, which skips forward to the next STX-framed record
/// start; when no marker remains, everything decoded so far is
/// returned — one corrupt record never aborts the run.
pub struct BinaryDecoder<'a> {
    content: &'a [u8],
    specs: Option<&'a SpecSet>,
    pos: usize,
}

impl<'a> BinaryDecoder<'a> {
    /// Create a decoder over a buffer.
    ///
    /// `specs` is the externally supplied specification surface, if
    /// any: it overrides registry field lengths and switches on
    /// conformance validation.
    #[must_use]
    pub fn new(content: &'a [u8], specs: Option<&'a SpecSet>) -> Self {
        BinaryDecoder {
            content,
            specs,
            pos: 0,
        }
    }

    /// Decode every record in the buffer.
    ///
    /// Never fails: content problems become diagnostics, and the worst
    /// case is an empty record list. One full pass over the buffer.
    #[must_use]
    pub fn decode_all(mut self) -> (Vec<DecodedRecord>, Vec<Diagnostic>) {
        let mut records = Vec::new();
        let mut diagnostics = Vec::new();

        while self.pos + MTI_LEN <= self.content.len() {
            let record_start = self.pos;
            match self.decode_record(&mut diagnostics) {
                Ok(Some(record)) => records.push(record),
                // Not enough bytes left for a bitmap: the stream is
                // exhausted, not faulted.
                Ok(None) => break,
                Err(fault) => {
                    diagnostics.push(Diagnostic::at(
                        fault.position,
                        format!("skipping malformed record: {}", fault.reason),
                    ));
                    if !self.resynchronize(record_start, &fault, &mut diagnostics) {
                        break;
                    }
                }
            }
        }

        (records, diagnostics)
    }

    /// Move the cursor past a faulted record.
    ///
    /// Returns `false` when no framing marker remains and the pass is
    /// over. The cursor must advance past `record_start` on success —
    /// a resume point at or before the faulted attempt would replay the
    /// same bytes forever, so markers that close are skipped and the
    /// scan continues.
    fn resynchronize(
        &mut self,
        record_start: usize,
        fault: &DecodeFault,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let mut search_from = fault.position;
        loop {
            match resync(self.content, search_from) {
                None => return false,
                Some(resume) if resume > record_start => {
                    diagnostics.push(Diagnostic::at(
                        record_start,
                        format!("resynchronized: skipped bytes {record_start}..{resume}"),
                    ));
                    self.pos = resume;
                    return true;
                }
                Some(resume) => {
                    // Marker too close to make progress; scan past it.
                    search_from = resume + MTI_LEN;
                }
            }
        }
    }

    /// Decode one record starting at the cursor.
    ///
    /// `Ok(None)` means the stream ended cleanly (not enough bytes for
    /// a bitmap after the MTI). `Err` is a per-record fault for the
    /// resynchronizer.
    fn decode_record(
        &mut self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<DecodedRecord>, DecodeFault> {
        let record_start = self.pos;

        // ReadMti: exactly 4 bytes. Undecodable bytes fall back to hex
        // rather than failing the record; cleanly decoded bytes that do
        // not look like an MTI are the fault signal for a corrupt region.
        let mti = match decode_padded(&self.content[self.pos..self.pos + MTI_LEN]) {
            PaddedText::Clean(s) => {
                if !is_plausible(&s) {
                    return Err(DecodeFault::new(
                        record_start,
                        FaultReason::ImplausibleMti(s),
                    ));
                }
                s
            }
            PaddedText::Hex(h) => h,
        };
        self.pos += MTI_LEN;

        // ReadBitmap: 8 bytes or the buffer is exhausted.
        let Ok(present) = decode_bitmap(&self.content[self.pos..]) else {
            return Ok(None);
        };
        self.pos += BITMAP_LEN;

        let spec = self.resolve_spec(&mti);
        let mut record = DecodedRecord::new(mti, RecordFormat::Binary);
        // Raw (field number, stripped body) pairs for conformance checks.
        let mut raw_bodies: Vec<(u8, String)> = Vec::new();

        // ReadField(i) for each present i, ascending.
        for number in present {
            let Some(length) = self.field_length(number, spec) else {
                return Err(DecodeFault::new(
                    self.pos,
                    FaultReason::UnknownFieldLength(number),
                ));
            };

            // Fewer bytes than declared is a non-fatal truncation: keep
            // what was accumulated, stop scanning this record.
            if self.pos + length > self.content.len() {
                diagnostics.push(Diagnostic::at(
                    self.pos,
                    format!(
                        "field {number} truncated: needed {length} bytes, {} available",
                        self.content.len() - self.pos
                    ),
                ));
                break;
            }

            let body = &self.content[self.pos..self.pos + length];
            self.pos += length;
            self.decode_field(number, body, &mut record, &mut raw_bodies, diagnostics);
        }

        if let Some(spec) = spec {
            let pairs: Vec<(u8, &str)> = raw_bodies
                .iter()
                .map(|(n, body)| (*n, body.as_str()))
                .collect();
            record.validation = Some(spec.validate(&pairs));
        }

        Ok(Some(record))
    }

    /// Resolve the active specification for a record's MTI.
    ///
    /// `None` when no external specification surface was configured —
    /// registry lengths apply and validation stays off. A configured
    /// surface that cannot resolve the MTI is handled by the engine
    /// before binary decoding is reached for framed text; for binary
    /// records the registry remains the authority, so resolution
    /// failures simply fall back to it.
    fn resolve_spec(&self, mti: &str) -> Option<&'a MessageSpec> {
        self.specs.and_then(|set| set.for_mti(mti).ok())
    }

    /// Declared body length for a field: the external specification
    /// wins, the registry is the fallback, and `None` means the cursor
    /// cannot advance.
    fn field_length(&self, number: u8, spec: Option<&MessageSpec>) -> Option<usize> {
        if let Some(rule) = spec.and_then(|s| s.rule(number)) {
            return Some(rule.max_len);
        }
        registry::lookup(number).map(|field_def| field_def.length)
    }

    /// Decode one field body into the record.
    fn decode_field(
        &self,
        number: u8,
        body: &[u8],
        record: &mut DecodedRecord,
        raw_bodies: &mut Vec<(u8, String)>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let name = registry::field_name(number);

        // Amount Transaction gets the dual decode: ASCII minor units,
        // then packed binary, then Absent.
        if number == 4 {
            record.fields.insert(name, decode_amount(body));
            if let PaddedText::Clean(s) = decode_padded(body) {
                raw_bodies.push((number, s));
            }
            return;
        }

        match decode_padded(body) {
            PaddedText::Clean(s) => {
                let strategy =
                    registry::lookup(number).map_or(DecodeStrategy::Identity, |d| d.strategy);
                match strategy.apply(&s) {
                    Ok(value) => {
                        record.fields.insert(name, value);
                    }
                    Err(reason) => {
                        diagnostics.push(Diagnostic::plain(format!(
                            "field {number} decode degraded to raw bytes: {reason}"
                        )));
                        record.fields.insert(name, FieldValue::Raw(hex::encode(body)));
                    }
                }
                raw_bodies.push((number, s));
            }
            PaddedText::Hex(h) => {
                record.fields.insert(name, FieldValue::Raw(h));
            }
        }
    }
}

/// The amount dual decode.
///
/// ASCII-numeric minor units divided by 100 when the body decodes
/// cleanly; otherwise the trailing 6 bytes reinterpreted as a
/// big-endian packed integer divided by 100; `Absent` when both paths
/// fail. Both paths must agree for the same numeric value — covered by
/// the integration suite.
#[must_use]
pub fn decode_amount(body: &[u8]) -> FieldValue {
    if let PaddedText::Clean(s) = decode_padded(body) {
        if !s.is_empty() {
            if let Ok(minor) = s.parse::<i64>() {
                #[allow(clippy::cast_precision_loss)]
                return FieldValue::Number(minor as f64 / 100.0);
            }
        }
    }

    if body.len() >= 6 {
        let mut word = [0u8; 8];
        word[2..].copy_from_slice(&body[body.len() - 6..]);
        let minor = i64::from_be_bytes(word);
        #[allow(clippy::cast_precision_loss)]
        return FieldValue::Number(minor as f64 / 100.0);
    }

    FieldValue::Absent
}
