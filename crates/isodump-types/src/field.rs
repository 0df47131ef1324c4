use crate::value::FieldValue;

/// Value class of an ISO-8583 field, from the field attribute codes.
///
/// `Numeric` is `n` (digits only), `AlphaNumeric` is `ans` (letters,
/// digits, spaces), `Special` covers the remaining character-set codes.
/// The class feeds spec conformance checks, not decoding — decoding is
/// driven by [`DecodeStrategy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueClass {
    Numeric,
    AlphaNumeric,
    Special,
}

/// How a field's sliced string becomes a [`FieldValue`].
///
/// A closed enumeration rather than per-field function pointers: the
/// full set of transformations the registry needs is small and fixed,
/// and an enum keeps every decode path visible in one match.
///
/// ```text
/// ┌──────────────────┬─────────────────────────────────────────────┐
/// │ Strategy         │ Transformation                              │
/// ├──────────────────┼─────────────────────────────────────────────┤
/// │ Identity         │ value kept as text                          │
/// │ AmountRescale    │ minor-unit digits → amount / 100            │
/// │ DateTimeReformat │ MMDDhhmmss → "MM-DD-hh mm:ss"               │
/// │ TimeReformat     │ hhmmss → "hh:mm:ss"                         │
/// └──────────────────┴─────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStrategy {
    Identity,
    AmountRescale,
    DateTimeReformat,
    TimeReformat,
}

impl DecodeStrategy {
    /// Apply this strategy to a sliced, padding-stripped field string.
    ///
    /// An empty input decodes to [`FieldValue::Absent`] for every
    /// strategy except `Identity` — an all-padding body carries no
    /// value, and degrading it to a warning would drown real problems
    /// in sparse records.
    ///
    /// # Errors
    ///
    /// Returns a reason string when the input does not fit the
    /// strategy's expected shape. The caller degrades the field to a
    /// raw hex value and records a diagnostic; strategy failures never
    /// abort a record.
    pub fn apply(self, raw: &str) -> Result<FieldValue, String> {
        match self {
            DecodeStrategy::Identity => Ok(FieldValue::Text(raw.to_string())),

            DecodeStrategy::AmountRescale => {
                if raw.is_empty() {
                    return Ok(FieldValue::Absent);
                }
                let minor: i64 = raw
                    .parse()
                    .map_err(|_| format!("non-numeric amount body {raw:?}"))?;
                #[allow(clippy::cast_precision_loss)]
                Ok(FieldValue::Number(minor as f64 / 100.0))
            }

            DecodeStrategy::DateTimeReformat => {
                if raw.is_empty() {
                    return Ok(FieldValue::Absent);
                }
                if raw.len() < 10 || !raw.is_ascii() {
                    return Err(format!("timestamp body {raw:?} shorter than 10 digits"));
                }
                Ok(FieldValue::Text(format!(
                    "{}-{}-{} {}:{}",
                    &raw[0..2],
                    &raw[2..4],
                    &raw[4..6],
                    &raw[6..8],
                    &raw[8..10],
                )))
            }

            DecodeStrategy::TimeReformat => {
                if raw.is_empty() {
                    return Ok(FieldValue::Absent);
                }
                if raw.len() < 6 || !raw.is_ascii() {
                    return Err(format!("time body {raw:?} shorter than 6 digits"));
                }
                Ok(FieldValue::Text(format!(
                    "{}:{}:{}",
                    &raw[0..2],
                    &raw[2..4],
                    &raw[4..6],
                )))
            }
        }
    }
}

/// Static definition of one ISO-8583 data field.
///
/// Constructed once in the registry and shared read-only by every
/// decoder. `length` is the fixed on-wire body size in bytes (binary)
/// or characters (text); an externally supplied per-MTI specification
/// may override it at decode time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDefinition {
    /// ISO field number, 2..=128. Unique within the registry.
    pub number: u8,
    /// Canonical field name used as the output map key.
    pub name: &'static str,
    /// Fixed body length.
    pub length: usize,
    /// Character-class attribute.
    pub class: ValueClass,
    /// Transformation from sliced string to output value.
    pub strategy: DecodeStrategy,
}
