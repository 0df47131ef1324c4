//! Synthetic dump builders.
//!
//! The binary builder is the encode-side inverse of the binary record
//! decoder for the registry subset: MTI, primary bitmap, then each
//! field body padded to its registry length in ascending field order.

use isodump_types::field::ValueClass;
use isodump_types::layout::{T112_LAYOUT, T112_RECORD_LEN};
use isodump_types::registry;
use isodump_wire::bitmap::encode_bitmap;

/// Pad a field value to its registry length: numeric fields are
/// left-padded with zeros, everything else right-padded with spaces.
///
/// # Panics
///
/// Panics when the field has no registry entry or the value exceeds
/// the declared length — fixtures are for well-formed input; malformed
/// shapes are built by hand in the tests that need them.
#[must_use]
pub fn pad_field(number: u8, value: &str) -> Vec<u8> {
    let field_def = registry::lookup(number)
        .unwrap_or_else(|| panic!("fixture field {number} has no registry entry"));
    assert!(
        value.len() <= field_def.length,
        "fixture value {value:?} exceeds field {number} length {}",
        field_def.length
    );

    let mut body = Vec::with_capacity(field_def.length);
    match field_def.class {
        ValueClass::Numeric => {
            body.resize(field_def.length - value.len(), b'0');
            body.extend_from_slice(value.as_bytes());
        }
        ValueClass::AlphaNumeric | ValueClass::Special => {
            body.extend_from_slice(value.as_bytes());
            body.resize(field_def.length, b' ');
        }
    }
    body
}

/// Build one well-formed binary record: MTI, bitmap, padded bodies in
/// ascending field order.
#[must_use]
pub fn binary_record(mti: &str, fields: &[(u8, &str)]) -> Vec<u8> {
    let mut sorted: Vec<(u8, &str)> = fields.to_vec();
    sorted.sort_by_key(|&(number, _)| number);

    let numbers: Vec<u8> = sorted.iter().map(|&(n, _)| n).collect();
    let mut record = Vec::new();
    record.extend_from_slice(mti.as_bytes());
    record.extend_from_slice(&encode_bitmap(&numbers));
    for (number, value) in sorted {
        record.extend_from_slice(&pad_field(number, value));
    }
    record
}

/// Build one 256-character fixed-width text record: values placed at
/// their layout offsets, space-filled elsewhere.
///
/// # Panics
///
/// Panics when a name is not in the layout or a value overruns its slice.
#[must_use]
pub fn t112_record(mti: &str, values: &[(&str, &str)]) -> String {
    let mut chars = vec![' '; T112_RECORD_LEN];
    chars[..4].copy_from_slice(&mti.chars().collect::<Vec<char>>()[..4]);

    for &(name, value) in values {
        let layout_field = T112_LAYOUT
            .iter()
            .find(|lf| lf.name == name)
            .unwrap_or_else(|| panic!("fixture field {name:?} not in layout"));
        assert!(
            value.len() <= layout_field.len,
            "fixture value {value:?} overruns {name:?} slice of {}",
            layout_field.len
        );
        for (i, c) in value.chars().enumerate() {
            chars[layout_field.start + i] = c;
        }
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_zero_pad_left() {
        assert_eq!(pad_field(3, "1234"), b"001234".to_vec());
    }

    #[test]
    fn ans_fields_space_pad_right() {
        assert_eq!(pad_field(38, "OK12"), b"OK12  ".to_vec());
    }

    #[test]
    fn binary_record_layout() {
        let record = binary_record("1240", &[(3, "123456")]);
        // 4 MTI + 8 bitmap + 6 body.
        assert_eq!(record.len(), 18);
        assert_eq!(&record[..4], b"1240");
        assert_eq!(&record[12..], b"123456");
    }

    #[test]
    fn t112_record_is_exactly_record_length() {
        let record = t112_record("1240", &[("PAN", "5412345678901234567")]);
        assert_eq!(record.len(), T112_RECORD_LEN);
        assert_eq!(&record[..4], "1240");
        assert_eq!(&record[4..23], "5412345678901234567");
    }
}
