//! Integration tests for the text path: boundary carving of fixed-width
//! settlement records, spec resolution, and conformance validation.

use std::collections::BTreeMap;

use isodump_decoder::{BoundaryMode, DumpDecoder, text};
use isodump_tests::fixtures::t112_record;
use isodump_types::record::{RecordFormat, RecordStatus};
use isodump_types::spec::{MessageSpec, SpecSet};
use isodump_types::value::FieldValue;

const PAN: &str = "5412345678901234567";

fn settlement_record() -> String {
    t112_record(
        "1240",
        &[
            ("PAN", PAN),
            ("Amount Transaction", "000000012345"),
            ("Local Transaction Date/Time", "0828120533"),
            ("Card Acceptor Terminal ID", "TERM0001"),
        ],
    )
}

#[test]
fn framed_line_decodes_each_record_slot() {
    // Two 256-character records glued into a single line. The length
    // framing is authoritative; no boundary heuristic runs.
    let line = format!("{}{}", settlement_record(), settlement_record());
    let (records, diagnostics) = text::decode_text(&line, None, BoundaryMode::PanConfirmed);

    assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
    assert_eq!(records.len(), 2);

    for record in &records {
        assert_eq!(record.mti, "1240");
        assert_eq!(record.record_format, RecordFormat::Text);
        assert_eq!(record.fields["PAN"], FieldValue::Text(PAN.to_string()));
        assert_eq!(record.fields["Amount Transaction"], FieldValue::Number(123.45));
        assert_eq!(
            record.fields["Local Transaction Date/Time"],
            FieldValue::Text("08-28-12 05:33".to_string())
        );
        assert_eq!(
            record.fields["Card Acceptor Terminal ID"],
            FieldValue::Text("TERM0001".to_string())
        );
        // All-padding slices decode to absent, not noise.
        assert_eq!(record.fields["Amount Reconciliation"], FieldValue::Absent);
    }
}

#[test]
fn framed_record_outside_lookahead_set_still_decodes() {
    // 1250 never appears in the boundary lookahead set, so the
    // heuristic would drop it. The length framing must carry it anyway.
    let line = format!(
        "{}{}",
        settlement_record(),
        t112_record("1250", &[("PAN", PAN), ("Card Acceptor Terminal ID", "TERM0002")]),
    );
    let (records, diagnostics) = text::decode_text(&line, None, BoundaryMode::PanConfirmed);

    assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].mti, "1250");
    assert_eq!(records[1].fields["PAN"], FieldValue::Text(PAN.to_string()));
    assert_eq!(
        records[1].fields["Card Acceptor Terminal ID"],
        FieldValue::Text("TERM0002".to_string())
    );
}

#[test]
fn unframed_concatenated_records_are_carved() {
    // Trailing padding stripped from the first record breaks the length
    // framing; the boundary heuristic carves the line instead.
    let line = format!("{}{}", settlement_record().trim_end(), settlement_record());
    let (records, _) = text::decode_text(&line, None, BoundaryMode::PanConfirmed);

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.mti, "1240");
        assert_eq!(record.fields["PAN"], FieldValue::Text(PAN.to_string()));
    }
}

#[test]
fn short_fragment_after_last_record_is_dropped() {
    let line = format!("{}1240{PAN}", settlement_record());
    let (records, _) = text::decode_text(&line, None, BoundaryMode::PanConfirmed);
    // The 23-character tail looks like a record start but is too short
    // to be one.
    assert_eq!(records.len(), 1);
}

#[test]
fn lax_mode_accepts_record_without_pan() {
    // Trimmed so the line is unframed and boundary carving decides.
    let record = t112_record("1644", &[("Function Code", "680")]);
    let record = record.trim_end();

    let (strict, _) = text::decode_text(record, None, BoundaryMode::PanConfirmed);
    assert!(strict.is_empty(), "an administrative record has no PAN");

    let (lax, _) = text::decode_text(record, None, BoundaryMode::MtiOnly);
    assert_eq!(lax.len(), 1);
    assert_eq!(lax[0].mti, "1644");
    assert_eq!(lax[0].fields["Function Code"], FieldValue::Text("680".to_string()));
}

#[test]
fn mixed_delimited_and_fixed_width_lines() {
    let content = format!("1240|3:123456|11:000042\n\n{}\n", settlement_record());
    let (records, _) = text::decode_text(&content, None, BoundaryMode::PanConfirmed);

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].fields["System Trace Audit Number"],
        FieldValue::Text("000042".to_string())
    );
    assert_eq!(records[1].fields["PAN"], FieldValue::Text(PAN.to_string()));
}

// ── Spec resolution and validation ────────────────────────────────────────────

fn spec_set_for_1240(json: &str) -> SpecSet {
    let spec = MessageSpec::from_json(json, "1240.json").unwrap();
    let mut by_mti = BTreeMap::new();
    by_mti.insert("1240".to_string(), spec);
    SpecSet::new(by_mti, None)
}

#[test]
fn conforming_record_passes_validation() {
    let specs = spec_set_for_1240(
        r#"{ "2": { "max_len": 19, "type": "numeric" },
            "4": { "max_len": 12, "type": "numeric" } }"#,
    );
    let (records, _) =
        text::decode_text(&settlement_record(), Some(&specs), BoundaryMode::PanConfirmed);

    assert_eq!(records.len(), 1);
    let validation = records[0].validation.as_ref().unwrap();
    assert!(validation.passed, "errors: {}", validation.errors);
}

#[test]
fn nonconforming_record_fails_with_field_errors() {
    // A 12-digit PAN against a rule demanding exactly 19.
    let record = t112_record(
        "1240",
        &[
            ("PAN", "541234567890"),
            ("Amount Transaction", "000000012345"),
            ("Card Acceptor Terminal ID", "TERM0001"),
        ],
    );
    let specs = spec_set_for_1240(r#"{ "2": { "max_len": 19, "type": "numeric" } }"#);
    let (records, _) = text::decode_text(&record, Some(&specs), BoundaryMode::PanConfirmed);

    assert_eq!(records.len(), 1);
    let validation = records[0].validation.as_ref().unwrap();
    assert!(!validation.passed);
    assert_eq!(validation.errors, "Field 2: length 12 vs 19");
    // The nonconforming value itself is kept.
    assert_eq!(
        records[0].fields["PAN"],
        FieldValue::Text("541234567890".to_string())
    );
}

#[test]
fn unresolvable_mti_yields_spec_missing_record() {
    // A spec surface that only knows 1644, with no default to fall
    // back on.
    let spec = MessageSpec::from_json(r#"{ "24": { "max_len": 3 } }"#, "1644.json").unwrap();
    let mut by_mti = BTreeMap::new();
    by_mti.insert("1644".to_string(), spec);
    let specs = SpecSet::new(by_mti, None);

    let (records, diagnostics) =
        text::decode_text(&settlement_record(), Some(&specs), BoundaryMode::PanConfirmed);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, RecordStatus::SpecMissing);
    assert!(records[0].fields.is_empty());
    assert!(!diagnostics.is_empty());
}

#[test]
fn default_spec_catches_unlisted_mti() {
    let mut by_mti = BTreeMap::new();
    by_mti.insert(
        "1644".to_string(),
        MessageSpec::from_json(r#"{ "24": { "max_len": 3 } }"#, "1644.json").unwrap(),
    );
    let specs = SpecSet::new(by_mti, Some(MessageSpec::default()));

    let (records, _) =
        text::decode_text(&settlement_record(), Some(&specs), BoundaryMode::PanConfirmed);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, RecordStatus::Decoded);
    // An empty default spec rules nothing, so everything passes.
    assert!(records[0].validation.as_ref().unwrap().passed);
}

// ── Engine routing ────────────────────────────────────────────────────────────

#[test]
fn engine_decodes_text_bytes_end_to_end() {
    let line = settlement_record();
    let output = DumpDecoder::new().decode(line.as_bytes(), "t112_20260828.txt");

    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].source.as_deref(), Some("t112_20260828.txt"));
    assert_eq!(output.records[0].mti_description, Some("Authorization Request"));
}

#[test]
fn engine_survives_non_utf8_text() {
    // Latin-1 content: 0xC9 is 'É'. Must decode without loss of the
    // surrounding ASCII structure.
    let mut bytes = b"1240|41:CAF".to_vec();
    bytes.push(0xC9);
    bytes.extend_from_slice(b" TERMINAL");

    let output = DumpDecoder::new().decode(&bytes, "export.txt");
    assert_eq!(output.records.len(), 1);
    let FieldValue::Text(terminal) = &output.records[0].fields["Card Acceptor Terminal ID"]
    else {
        panic!("expected text value");
    };
    assert!(terminal.starts_with("CAF"));
    assert!(terminal.ends_with("TERMINAL"));
}
