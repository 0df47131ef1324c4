use crate::field::{DecodeStrategy, FieldDefinition, ValueClass};

/// The static field registry.
///
/// The commonly used financial fields observed in network dumps, with
/// their fixed body lengths. This is the practical subset an analyst
/// actually sees in settlement files — not the full standard. Fields
/// absent here still decode when an external per-MTI specification
/// supplies a length; they just get a synthetic `Field N` name.
///
/// ```text
/// ┌────┬──────────────────────────────┬─────┬───────┬──────────────────┐
/// │ No │ Name                         │ Len │ Class │ Strategy         │
/// ├────┼──────────────────────────────┼─────┼───────┼──────────────────┤
/// │  2 │ Primary Account Number       │  19 │ n     │ Identity         │
/// │  3 │ Processing Code              │   6 │ n     │ Identity         │
/// │  4 │ Amount Transaction           │  12 │ n     │ AmountRescale    │
/// │  7 │ Transmission Date/Time       │  10 │ n     │ DateTimeReformat │
/// │ 11 │ System Trace Audit Number    │   6 │ n     │ Identity         │
/// │ 12 │ Local Transaction Time       │   6 │ n     │ TimeReformat     │
/// │ 22 │ POS Data Code                │  12 │ ans   │ Identity         │
/// │ 24 │ Function Code                │   3 │ n     │ Identity         │
/// │ 32 │ Acquiring Institution ID     │  11 │ n     │ Identity         │
/// │ 37 │ Retrieval Reference Number   │  12 │ ans   │ Identity         │
/// │ 38 │ Approval Code                │   6 │ ans   │ Identity         │
/// │ 41 │ Card Acceptor Terminal ID    │  16 │ ans   │ Identity         │
/// │ 43 │ Card Acceptor Name/Location  │  99 │ ans   │ Identity         │
/// │ 49 │ Currency Code                │   3 │ n     │ Identity         │
/// └────┴──────────────────────────────┴─────┴───────┴──────────────────┘
/// ```
pub const FIELD_DEFS: [FieldDefinition; 14] = [
    def(2, "Primary Account Number", 19, ValueClass::Numeric, DecodeStrategy::Identity),
    def(3, "Processing Code", 6, ValueClass::Numeric, DecodeStrategy::Identity),
    def(4, "Amount Transaction", 12, ValueClass::Numeric, DecodeStrategy::AmountRescale),
    def(7, "Transmission Date/Time", 10, ValueClass::Numeric, DecodeStrategy::DateTimeReformat),
    def(11, "System Trace Audit Number", 6, ValueClass::Numeric, DecodeStrategy::Identity),
    def(12, "Local Transaction Time", 6, ValueClass::Numeric, DecodeStrategy::TimeReformat),
    def(22, "POS Data Code", 12, ValueClass::AlphaNumeric, DecodeStrategy::Identity),
    def(24, "Function Code", 3, ValueClass::Numeric, DecodeStrategy::Identity),
    def(32, "Acquiring Institution ID", 11, ValueClass::Numeric, DecodeStrategy::Identity),
    def(37, "Retrieval Reference Number", 12, ValueClass::AlphaNumeric, DecodeStrategy::Identity),
    def(38, "Approval Code", 6, ValueClass::AlphaNumeric, DecodeStrategy::Identity),
    def(41, "Card Acceptor Terminal ID", 16, ValueClass::AlphaNumeric, DecodeStrategy::Identity),
    def(43, "Card Acceptor Name/Location", 99, ValueClass::AlphaNumeric, DecodeStrategy::Identity),
    def(49, "Currency Code", 3, ValueClass::Numeric, DecodeStrategy::Identity),
];

const fn def(
    number: u8,
    name: &'static str,
    length: usize,
    class: ValueClass,
    strategy: DecodeStrategy,
) -> FieldDefinition {
    FieldDefinition {
        number,
        name,
        length,
        class,
        strategy,
    }
}

/// Look up the static definition for a field number.
///
/// Constant-time: the match compiles to a jump table. Returns `None`
/// for numbers outside the registry — a present bit without a
/// definition is not an error.
#[must_use]
pub fn lookup(number: u8) -> Option<&'static FieldDefinition> {
    let idx = match number {
        2 => 0,
        3 => 1,
        4 => 2,
        7 => 3,
        11 => 4,
        12 => 5,
        22 => 6,
        24 => 7,
        32 => 8,
        37 => 9,
        38 => 10,
        41 => 11,
        43 => 12,
        49 => 13,
        _ => return None,
    };
    Some(&FIELD_DEFS[idx])
}

/// Output map key for a field number: the registry name when one
/// exists, otherwise the synthetic `Field N` form.
#[must_use]
pub fn field_name(number: u8) -> String {
    match lookup(number) {
        Some(field_def) => field_def.name.to_string(),
        None => format!("Field {number}"),
    }
}
