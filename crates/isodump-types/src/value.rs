use std::fmt;

/// A decoded field value.
///
/// Field maps are duck-typed at the output boundary (a consumer sees
/// string, number, or null), but internally every value carries its
/// provenance as a closed variant so consumers must handle all four
/// cases explicitly:
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────┬──────┐
/// │ Variant│ Produced by                                  │ JSON │
/// ├────────┼──────────────────────────────────────────────┼──────┤
/// │ Text   │ clean ASCII decode, reformatted timestamps   │ "…"  │
/// │ Number │ amount rescale (minor units / 100)           │ n.nn │
/// │ Raw    │ hex fallback for undecodable bytes           │ "…"  │
/// │ Absent │ empty amount body, both amount paths failing │ null │
/// └────────┴──────────────────────────────────────────────┴──────┘
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Decoded textual content.
    Text(String),
    /// A numeric value, e.g. a currency amount recovered from minor units.
    Number(f64),
    /// Undecodable bytes rendered as lowercase hex.
    Raw(String),
    /// No recoverable value. Serializes as `null`.
    Absent,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Raw(h) => write!(f, "0x{h}"),
            FieldValue::Absent => f.write_str("-"),
        }
    }
}
