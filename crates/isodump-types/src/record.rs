use indexmap::IndexMap;

use crate::value::FieldValue;

/// Wire shape the record was decoded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    Binary,
    Text,
}

/// Terminal state of one record's decode.
///
/// `Decoded` covers everything from a pristine record to a truncated
/// partial one — per-field degradation never changes the status.
/// `SpecMissing` is the configuration fault: no field specification was
/// found for the record's MTI and no default exists, so the record
/// carries no field map and must stay distinguishable from a decoded
/// one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Decoded,
    SpecMissing,
}

/// Result of spec conformance validation over one record.
///
/// All per-field errors are joined into a single `; `-separated
/// diagnostic string; values are kept even when they fail validation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Validation {
    pub passed: bool,
    pub errors: String,
}

impl Validation {
    /// Collapse a list of per-field error strings into a record-level result.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Validation {
            passed: errors.is_empty(),
            errors: errors.join("; "),
        }
    }
}

/// One decoded transaction record.
///
/// An ordered field map plus decode metadata. Created by exactly one
/// decoder pass, immutable once handed to the caller; the display
/// collaborator may attach its own metadata downstream but never
/// rewrites decoded values.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DecodedRecord {
    /// Message type indicator, 4 characters when cleanly decoded, hex
    /// when the MTI bytes were undecodable.
    pub mti: String,

    /// Meaning of a known MTI, e.g. `1240` → "Authorization Request".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mti_description: Option<&'static str>,

    /// Which decoder produced this record.
    pub record_format: RecordFormat,

    /// Opaque caller-supplied origin, typically the source filename.
    /// Not interpreted by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Decoded fields in wire order: registry name (or `Field N`) →
    /// value. Empty for `SpecMissing` records.
    pub fields: IndexMap<String, FieldValue>,

    /// Spec conformance result, present only when a specification was
    /// consulted for this record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,

    pub status: RecordStatus,
}

impl DecodedRecord {
    /// A fresh record shell for the given MTI.
    #[must_use]
    pub fn new(mti: String, record_format: RecordFormat) -> Self {
        DecodedRecord {
            mti_description: isodump_wire::mti::describe(&mti),
            mti,
            record_format,
            source: None,
            fields: IndexMap::new(),
            validation: None,
            status: RecordStatus::Decoded,
        }
    }

    /// The configuration-fault shell: MTI only, no field map.
    #[must_use]
    pub fn spec_missing(mti: String, record_format: RecordFormat) -> Self {
        let mut record = Self::new(mti, record_format);
        record.status = RecordStatus::SpecMissing;
        record
    }
}

/// One caller-visible decode warning.
///
/// Diagnostics are collected into an explicit list returned alongside
/// the record sequence — there is no global warning stream. `offset`
/// is a byte position for binary input and a character position for
/// text, where one is meaningful.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub offset: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn at(offset: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            offset: Some(offset),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn plain(message: impl Into<String>) -> Self {
        Diagnostic {
            offset: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "[offset {offset}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Mask a primary account number for display: first six and last four
/// digits kept, the middle replaced. Values too short to have a
/// maskable middle are returned unchanged.
///
/// Operates on characters, not bytes: lossy charset decoding can put
/// multi-byte characters into a PAN-named field, and masking must never
/// panic on displayable input.
#[must_use]
pub fn mask_pan(pan: &str) -> String {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() >= 10 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}******{tail}")
    } else {
        pan.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_mti_gets_description() {
        let record = DecodedRecord::new("1240".to_string(), RecordFormat::Binary);
        assert_eq!(record.mti_description, Some("Authorization Request"));
    }

    #[test]
    fn unknown_mti_has_no_description() {
        let record = DecodedRecord::new("9999".to_string(), RecordFormat::Text);
        assert_eq!(record.mti_description, None);
    }

    #[test]
    fn spec_missing_has_empty_fields() {
        let record = DecodedRecord::spec_missing("1644".to_string(), RecordFormat::Text);
        assert_eq!(record.status, RecordStatus::SpecMissing);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn validation_joins_errors() {
        let v = Validation::from_errors(vec![
            "Field 2: length 18 vs 19".to_string(),
            "Field 3: expected numeric".to_string(),
        ]);
        assert!(!v.passed);
        assert_eq!(v.errors, "Field 2: length 18 vs 19; Field 3: expected numeric");

        let ok = Validation::from_errors(Vec::new());
        assert!(ok.passed);
        assert!(ok.errors.is_empty());
    }

    #[test]
    fn pan_masking() {
        assert_eq!(mask_pan("5412345678901234"), "541234******1234");
        assert_eq!(mask_pan("541234"), "541234");
    }

    #[test]
    fn pan_masking_is_char_aware() {
        // Lossy charset decoding can leave multi-byte characters in a
        // PAN field; masking must count characters, not bytes.
        assert_eq!(mask_pan("aééééé"), "aééééé");
        assert_eq!(mask_pan("éé2345678901234é"), "éé2345******234é");
    }

    #[test]
    fn diagnostic_display() {
        assert_eq!(
            Diagnostic::at(17, "skipped 4 bytes").to_string(),
            "[offset 17] skipped 4 bytes"
        );
        assert_eq!(Diagnostic::plain("no records").to_string(), "no records");
    }
}
