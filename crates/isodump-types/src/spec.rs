use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SpecError;
use crate::field::ValueClass;
use crate::record::Validation;
use crate::registry::FIELD_DEFS;

/// One externally supplied field rule.
///
/// The JSON shape is the observed spec-file convention:
///
/// ```json
/// { "2": { "max_len": 19, "type": "numeric" },
///   "3": { "max_len": 6,  "type": "numeric" },
///   "41": { "max_len": 16, "type": "ans" } }
/// ```
///
/// `max_len` overrides the registry's declared length when slicing;
/// `type` of `"numeric"` additionally requires a digits-only body.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct FieldRule {
    pub max_len: usize,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl FieldRule {
    /// Whether this rule demands a digits-only value.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind.as_deref() == Some("numeric")
    }
}

/// The field specification for one message type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSpec {
    rules: BTreeMap<u8, FieldRule>,
}

impl MessageSpec {
    /// Parse a specification document from JSON.
    ///
    /// `path` is used only for error context.
    ///
    /// # Errors
    ///
    /// [`SpecError::Parse`] on malformed JSON, [`SpecError::BadFieldNumber`]
    /// when a key is not an integer in 1..=128.
    pub fn from_json(json: &str, path: &str) -> Result<Self, SpecError> {
        let raw: BTreeMap<String, FieldRule> =
            serde_json::from_str(json).map_err(|source| SpecError::Parse {
                path: path.to_string(),
                source,
            })?;

        let mut rules = BTreeMap::new();
        for (key, rule) in raw {
            let number: u8 = key
                .parse()
                .ok()
                .filter(|n| (1..=128).contains(n))
                .ok_or(SpecError::BadFieldNumber { key: key.clone() })?;
            rules.insert(number, rule);
        }
        Ok(MessageSpec { rules })
    }

    /// The default specification derived from the static registry.
    ///
    /// Used when the caller supplies no spec files at all, so the
    /// engine always has a specification to consult.
    #[must_use]
    pub fn from_registry() -> Self {
        let rules = FIELD_DEFS
            .iter()
            .map(|field_def| {
                let kind = match field_def.class {
                    ValueClass::Numeric => Some("numeric".to_string()),
                    ValueClass::AlphaNumeric => Some("ans".to_string()),
                    ValueClass::Special => None,
                };
                (
                    field_def.number,
                    FieldRule {
                        max_len: field_def.length,
                        kind,
                    },
                )
            })
            .collect();
        MessageSpec { rules }
    }

    /// Rule for a field number, if the specification declares one.
    #[must_use]
    pub fn rule(&self, number: u8) -> Option<&FieldRule> {
        self.rules.get(&number)
    }

    /// Rules in ascending field number order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &FieldRule)> {
        self.rules.iter().map(|(&n, rule)| (n, rule))
    }

    /// Validate raw sliced field bodies against this specification.
    ///
    /// `fields` pairs each field number with its stripped body string.
    /// A declared length mismatch and a non-digit body under a numeric
    /// rule each record an error; values are kept regardless. Fields
    /// without a rule pass silently.
    #[must_use]
    pub fn validate(&self, fields: &[(u8, &str)]) -> Validation {
        let mut errors = Vec::new();
        for &(number, body) in fields {
            let Some(rule) = self.rule(number) else {
                continue;
            };
            if rule.max_len > 0 && body.len() != rule.max_len {
                errors.push(format!(
                    "Field {number}: length {} vs {}",
                    body.len(),
                    rule.max_len
                ));
            }
            if rule.is_numeric() && !(!body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()))
            {
                errors.push(format!("Field {number}: expected numeric"));
            }
        }
        Validation::from_errors(errors)
    }
}

/// The full specification surface: per-MTI documents plus a default.
///
/// Resolution mirrors the spec-file directory convention — a document
/// named after the MTI wins, `default.json` catches the rest, and a
/// missing default makes an unknown MTI a per-record configuration
/// fault.
#[derive(Clone, Debug, Default)]
pub struct SpecSet {
    by_mti: BTreeMap<String, MessageSpec>,
    default: Option<MessageSpec>,
}

impl SpecSet {
    /// Build a spec set directly. `default` of `None` means unknown
    /// MTIs fault rather than fall back.
    #[must_use]
    pub fn new(by_mti: BTreeMap<String, MessageSpec>, default: Option<MessageSpec>) -> Self {
        SpecSet { by_mti, default }
    }

    /// The built-in spec set: no per-MTI documents, registry-derived
    /// default. This is what the engine uses when the caller configures
    /// nothing.
    #[must_use]
    pub fn builtin() -> Self {
        SpecSet {
            by_mti: BTreeMap::new(),
            default: Some(MessageSpec::from_registry()),
        }
    }

    /// Load a specification directory.
    ///
    /// Every `*.json` file becomes one document: `default.json` is the
    /// fallback, any other stem is taken as an MTI value (`1240.json`,
    /// `1644.json`, …).
    ///
    /// # Errors
    ///
    /// [`SpecError::Io`] on unreadable paths, [`SpecError::Parse`] /
    /// [`SpecError::BadFieldNumber`] on malformed documents, and
    /// [`SpecError::Empty`] when the directory holds no specification
    /// files at all — a configured-but-empty spec dir is a mistake the
    /// caller needs to hear about, not silently ignore.
    pub fn load_dir(dir: &Path) -> Result<Self, SpecError> {
        let mut by_mti = BTreeMap::new();
        let mut default = None;

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let json = std::fs::read_to_string(&path)?;
            let spec = MessageSpec::from_json(&json, &path.display().to_string())?;
            if stem == "default" {
                default = Some(spec);
            } else {
                by_mti.insert(stem.to_string(), spec);
            }
        }

        if by_mti.is_empty() && default.is_none() {
            return Err(SpecError::Empty {
                path: dir.display().to_string(),
            });
        }

        Ok(SpecSet { by_mti, default })
    }

    /// Resolve the specification for a message type.
    ///
    /// # Errors
    ///
    /// [`SpecError::NoSpecForMti`] when no per-MTI document matches and
    /// no default exists. The decoders turn this into a record with
    /// [`RecordStatus::SpecMissing`](crate::record::RecordStatus).
    pub fn for_mti(&self, mti: &str) -> Result<&MessageSpec, SpecError> {
        self.by_mti
            .get(mti)
            .or(self.default.as_ref())
            .ok_or_else(|| SpecError::NoSpecForMti {
                mti: mti.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_spec_document() {
        let spec = MessageSpec::from_json(
            r#"{ "2": { "max_len": 19, "type": "numeric" }, "41": { "max_len": 16 } }"#,
            "test.json",
        )
        .unwrap();
        assert_eq!(spec.rule(2).unwrap().max_len, 19);
        assert!(spec.rule(2).unwrap().is_numeric());
        assert!(!spec.rule(41).unwrap().is_numeric());
        assert_eq!(spec.rule(3), None);
    }

    #[test]
    fn reject_bad_field_number() {
        let err = MessageSpec::from_json(r#"{ "xyz": { "max_len": 4 } }"#, "test.json");
        assert!(matches!(err, Err(SpecError::BadFieldNumber { .. })));

        let err = MessageSpec::from_json(r#"{ "200": { "max_len": 4 } }"#, "test.json");
        assert!(matches!(err, Err(SpecError::BadFieldNumber { .. })));
    }

    #[test]
    fn registry_derived_default() {
        let spec = MessageSpec::from_registry();
        assert_eq!(spec.rule(4).unwrap().max_len, 12);
        assert!(spec.rule(4).unwrap().is_numeric());
        assert!(!spec.rule(41).unwrap().is_numeric());
    }

    #[test]
    fn mti_resolution_prefers_specific() {
        let specific = MessageSpec::from_json(r#"{ "2": { "max_len": 16 } }"#, "1240.json").unwrap();
        let mut by_mti = BTreeMap::new();
        by_mti.insert("1240".to_string(), specific);
        let set = SpecSet::new(by_mti, Some(MessageSpec::from_registry()));

        assert_eq!(set.for_mti("1240").unwrap().rule(2).unwrap().max_len, 16);
        // Unlisted MTI falls back to the default.
        assert_eq!(set.for_mti("1644").unwrap().rule(2).unwrap().max_len, 19);
    }

    #[test]
    fn missing_default_is_per_mti_fault() {
        let set = SpecSet::new(BTreeMap::new(), None);
        assert!(matches!(
            set.for_mti("1240"),
            Err(SpecError::NoSpecForMti { .. })
        ));
    }

    #[test]
    fn validation_checks_length_and_type() {
        let spec = MessageSpec::from_registry();
        let ok = spec.validate(&[(3, "123456"), (41, "TERM0001TERM0001")]);
        assert!(ok.passed);

        let bad = spec.validate(&[(3, "12345"), (49, "84O")]);
        assert!(!bad.passed);
        assert_eq!(
            bad.errors,
            "Field 3: length 5 vs 6; Field 49: expected numeric"
        );
    }

    #[test]
    fn validation_skips_unruled_fields() {
        let spec = MessageSpec::from_json(r#"{ "2": { "max_len": 19 } }"#, "t.json").unwrap();
        let result = spec.validate(&[(60, "whatever")]);
        assert!(result.passed);
    }
}
