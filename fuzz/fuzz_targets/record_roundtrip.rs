#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use isodump_types::field::{FieldDefinition, ValueClass};
use isodump_types::registry::FIELD_DEFS;
use isodump_wire::bitmap::encode_bitmap;
use isodump_wire::mti::KNOWN_MTIS;

// Fuzz target: structured record round-trip.
//
// Builds a well-formed binary record from arbitrary structured input
// (known MTI, registry fields, class-sanitized values) and asserts the
// binary decoder recovers exactly the fields that went in, with no
// diagnostics. Catches bugs in:
// - Bitmap encode/decode agreement
// - Field body padding vs the decoder's trim
// - Strategy handling of every registry field
#[derive(Arbitrary, Debug)]
struct RecordInput {
    mti_index: u8,
    fields: Vec<FieldInput>,
}

#[derive(Arbitrary, Debug)]
struct FieldInput {
    field_index: u8,
    value: String,
}

/// Keep only characters the field's class admits, truncated to the
/// registry length. The result always pads and decodes cleanly.
fn sanitize(def: &FieldDefinition, value: &str) -> String {
    let keep: fn(&char) -> bool = match def.class {
        ValueClass::Numeric => |c| c.is_ascii_digit(),
        ValueClass::AlphaNumeric | ValueClass::Special => char::is_ascii_alphanumeric,
    };
    value.chars().filter(keep).take(def.length).collect()
}

fn pad(def: &FieldDefinition, value: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(def.length);
    match def.class {
        ValueClass::Numeric => {
            body.resize(def.length - value.len(), b'0');
            body.extend_from_slice(value.as_bytes());
        }
        ValueClass::AlphaNumeric | ValueClass::Special => {
            body.extend_from_slice(value.as_bytes());
            body.resize(def.length, b' ');
        }
    }
    body
}

fuzz_target!(|input: RecordInput| {
    let mti = KNOWN_MTIS[input.mti_index as usize % KNOWN_MTIS.len()];

    // Dedupe on the field number; the bitmap carries each at most once.
    let mut fields: BTreeMap<u8, (&FieldDefinition, String)> = BTreeMap::new();
    for field in &input.fields {
        let def = &FIELD_DEFS[field.field_index as usize % FIELD_DEFS.len()];
        fields.insert(def.number, (def, sanitize(def, &field.value)));
    }

    let numbers: Vec<u8> = fields.keys().copied().collect();
    let mut dump = Vec::new();
    dump.extend_from_slice(mti.as_bytes());
    dump.extend_from_slice(&encode_bitmap(&numbers));
    for (def, value) in fields.values() {
        dump.extend_from_slice(&pad(def, value));
    }

    let (records, diagnostics) =
        isodump_decoder::binary::BinaryDecoder::new(&dump, None).decode_all();

    assert!(diagnostics.is_empty(), "clean input diagnosed: {diagnostics:?}");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mti, mti);
    assert_eq!(records[0].fields.len(), fields.len());
    for (def, _) in fields.values() {
        assert!(
            records[0].fields.contains_key(def.name),
            "{} missing from decoded record",
            def.name
        );
    }
});
