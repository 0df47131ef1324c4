use isodump_types::layout::{MIN_RECORD_LEN, T112_LAYOUT, T112_RECORD_LEN};
use isodump_types::record::{DecodedRecord, Diagnostic, RecordFormat};
use isodump_types::registry;
use isodump_types::spec::SpecSet;
use isodump_types::value::FieldValue;
use isodump_wire::mti::{MTI_LEN, is_plausible};

use crate::boundary::{self, BoundaryMode};

/// Reserved padding character stripped from fixed-width records.
const PAD_CHAR: char = '@';

/// Decode text content into records.
///
/// Three line-level shapes are auto-detected per non-blank line:
///
///   - **Delimited** — `MTI|field:value|field:value|…`. Tokens that are
///     not `number:value` pairs with a registry-known number are
///     silently skipped; they never fault the record.
///   - **Length-framed fixed-width** — no delimiter, line length an
///     exact multiple of the record length, every record slot opening
///     with a plausible MTI. The frame boundaries are authoritative and
///     no heuristic runs — framed records decode even when their MTI is
///     outside the boundary lookahead set.
///   - **Unframed fixed-width** — no delimiter, no length framing. The
///     line is carved into candidate records by the boundary heuristic
///     first.
///
/// Either fixed-width shape is then sliced by the layout table. Content
/// problems degrade into diagnostics; this function never fails.
#[must_use]
pub fn decode_text(
    content: &str,
    specs: Option<&SpecSet>,
    mode: BoundaryMode,
) -> (Vec<DecodedRecord>, Vec<Diagnostic>) {
    let mut records = Vec::new();
    let mut diagnostics = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.contains('|') {
            records.push(decode_delimited(trimmed));
        } else if let Some(framed) = framed_records(line) {
            for raw in &framed {
                records.push(decode_fixed_width(raw, specs, &mut diagnostics));
            }
        } else {
            let candidates = boundary::split(trimmed, mode);
            if candidates.is_empty() && trimmed.len() >= MIN_RECORD_LEN {
                diagnostics.push(Diagnostic::plain(format!(
                    "no record boundaries found in {}-character line",
                    trimmed.len()
                )));
            }
            for candidate in candidates {
                records.push(decode_fixed_width(
                    candidate.text,
                    specs,
                    &mut diagnostics,
                ));
            }
        }
    }

    (records, diagnostics)
}

/// Decode one pipe-delimited line: `MTI|field:value|…`.
fn decode_delimited(line: &str) -> DecodedRecord {
    let mut parts = line.split('|');
    let mti = parts.next().unwrap_or_default().to_string();
    let mut record = DecodedRecord::new(mti, RecordFormat::Text);

    for part in parts {
        let Some((number_token, value)) = part.split_once(':') else {
            continue;
        };
        let Ok(number) = number_token.parse::<u8>() else {
            continue;
        };
        let Some(field_def) = registry::lookup(number) else {
            continue;
        };
        // A value the strategy cannot digest is skipped, not faulted.
        if let Ok(value) = field_def.strategy.apply(value) {
            record.fields.insert(field_def.name.to_string(), value);
        }
    }

    record
}

/// Split a line into length-framed fixed-width records.
///
/// A line is framed when its character count is a nonzero multiple of
/// the record length and every record slot opens with a plausible MTI.
/// Trailing space padding is part of the frame, so the raw line is
/// measured with only control characters (record marks, `\r`) dropped.
/// Returns `None` when either condition fails, handing the line to the
/// boundary heuristic instead.
fn framed_records(line: &str) -> Option<Vec<String>> {
    let chars: Vec<char> = line.chars().filter(|c| !c.is_control()).collect();
    if chars.is_empty() || chars.len() % T112_RECORD_LEN != 0 {
        return None;
    }
    let records: Vec<String> = chars
        .chunks(T112_RECORD_LEN)
        .map(|chunk| chunk.iter().collect())
        .collect();
    let all_framed = records
        .iter()
        .all(|record| is_plausible(&record.chars().take(MTI_LEN).collect::<String>()));
    all_framed.then_some(records)
}

/// Decode one fixed-width candidate record by the layout table.
///
/// Control characters and the reserved padding character are stripped
/// before slicing — settlement dumps interleave both with the data.
/// Slicing is by character offset (charset decoding may have produced
/// multi-byte characters), and a slice starting past the end of a short
/// candidate is simply omitted rather than treated as an error.
fn decode_fixed_width(
    raw: &str,
    specs: Option<&SpecSet>,
    diagnostics: &mut Vec<Diagnostic>,
) -> DecodedRecord {
    let cleaned: Vec<char> = raw
        .chars()
        .filter(|&c| !c.is_control() && c != PAD_CHAR)
        .collect();

    let mti: String = cleaned.iter().take(MTI_LEN).collect();

    // Spec resolution failure is the configuration fault: fatal for
    // this record only, surfaced as a status rather than a field map.
    let spec = match specs {
        Some(set) => match set.for_mti(&mti) {
            Ok(spec) => Some(spec),
            Err(err) => {
                diagnostics.push(Diagnostic::plain(err.to_string()));
                return DecodedRecord::spec_missing(mti, RecordFormat::Text);
            }
        },
        None => None,
    };

    let mut record = DecodedRecord::new(mti, RecordFormat::Text);
    let mut raw_bodies: Vec<(u8, String)> = Vec::new();

    for layout_field in &T112_LAYOUT {
        if layout_field.start >= cleaned.len() {
            break;
        }
        let end = (layout_field.start + layout_field.len).min(cleaned.len());
        let body: String = cleaned[layout_field.start..end].iter().collect();
        let body = body.trim();

        // PAN bodies keep only the alphanumeric content — scheme
        // separators and filler are noise.
        let body = if layout_field.number == Some(2) {
            body.chars().filter(char::is_ascii_alphanumeric).collect()
        } else {
            body.to_string()
        };

        match layout_field.strategy.apply(&body) {
            Ok(value) => {
                record.fields.insert(layout_field.name.to_string(), value);
            }
            Err(reason) => {
                diagnostics.push(Diagnostic::plain(format!(
                    "{}: kept raw text: {reason}",
                    layout_field.name
                )));
                record
                    .fields
                    .insert(layout_field.name.to_string(), FieldValue::Text(body.clone()));
            }
        }

        if let Some(number) = layout_field.number {
            raw_bodies.push((number, body));
        }
    }

    if let Some(spec) = spec {
        let pairs: Vec<(u8, &str)> = raw_bodies
            .iter()
            .map(|(n, body)| (*n, body.as_str()))
            .collect();
        record.validation = Some(spec.validate(&pairs));
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use isodump_types::record::RecordStatus;

    #[test]
    fn delimited_line_decodes_registry_fields() {
        let (records, diagnostics) = decode_text(
            "1240|2:5412345678901234|4:000000012345|99:ignored|junk",
            None,
            BoundaryMode::PanConfirmed,
        );
        assert!(diagnostics.is_empty());
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.mti, "1240");
        assert_eq!(record.record_format, RecordFormat::Text);
        assert_eq!(
            record.fields["Primary Account Number"],
            FieldValue::Text("5412345678901234".to_string())
        );
        assert_eq!(record.fields["Amount Transaction"], FieldValue::Number(123.45));
        // Field 99 has no registry entry; "junk" has no colon. Neither faults.
        assert_eq!(record.fields.len(), 2);
    }

    #[test]
    fn blank_lines_skipped() {
        let (records, _) = decode_text("\n   \n\n", None, BoundaryMode::PanConfirmed);
        assert!(records.is_empty());
    }

    #[test]
    fn fixed_width_strips_padding_and_controls() {
        let mut line = String::from("1240");
        line.push_str(&format!("{:<19}", "5412345678901234"));
        line.push_str(&"@".repeat(240));
        // Embedded control characters must vanish before slicing.
        let line = format!("\x01{line}\x03");

        let (records, _) = decode_text(&line, None, BoundaryMode::PanConfirmed);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].fields["PAN"],
            FieldValue::Text("5412345678901234".to_string())
        );
    }

    #[test]
    fn framed_line_splits_on_record_length() {
        let first = format!("1240{:<19}{}", "5412345678901234", " ".repeat(233));
        let second = format!("1250{:<19}{}", "4000001234567899", " ".repeat(233));
        let framed = framed_records(&format!("{first}{second}")).unwrap();
        assert_eq!(framed.len(), 2);
        assert_eq!(&framed[1][..4], "1250");

        // Off-length lines and non-digit slot openings are not framed.
        assert!(framed_records(&first[..200]).is_none());
        assert!(framed_records(&format!("ABCD{}", " ".repeat(252))).is_none());
    }

    #[test]
    fn spec_missing_status_when_unresolvable() {
        use std::collections::BTreeMap;
        let specs = SpecSet::new(BTreeMap::new(), None);

        let line = format!("1240{:<19}{}", "5412345678901234", "0".repeat(233));
        let (records, diagnostics) =
            decode_text(&line, Some(&specs), BoundaryMode::PanConfirmed);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, RecordStatus::SpecMissing);
        assert!(records[0].fields.is_empty());
        assert!(!diagnostics.is_empty());
    }
}
