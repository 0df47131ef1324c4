/// Implementation of `isodump inspect`.
///
/// Human-readable per-record view for eyeballing a dump. Account
/// numbers are masked to `first6******last4` — the inspect surface is
/// for terminals and screenshots, not for exporting card numbers.
///
/// # Example output
///
/// ```text
/// record 1: MTI 1240 (Authorization Request) [binary]
///   Primary Account Number       541234******1234
///   Processing Code              000000
///   Amount Transaction           123.45
///
/// 1 record from dump.001 (2 warnings)
/// ```
use std::fs;

use anyhow::{Context, Result};
use isodump_decoder::DumpDecoder;
use isodump_types::record::{RecordStatus, mask_pan};
use isodump_types::value::FieldValue;

use crate::InspectArgs;

/// Field names whose values are PANs and must be masked on display.
const PAN_FIELD_NAMES: [&str; 2] = ["Primary Account Number", "PAN"];

/// Run the `isodump inspect` command.
///
/// # Errors
///
/// Returns an error when the file cannot be read.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output = DumpDecoder::new().decode(&bytes, &filename);
    let shown = args.limit.unwrap_or(usize::MAX);

    for (index, record) in output.records.iter().take(shown).enumerate() {
        println!("{}", describe_record(index, record));
        if record.status == RecordStatus::SpecMissing {
            println!("  (no specification for this message type)");
            continue;
        }
        for (name, value) in &record.fields {
            println!("  {name:<28} {}", display_value(name, value));
        }
        println!();
    }

    println!(
        "{} record(s) from {filename} ({} warning(s))",
        output.records.len(),
        output.diagnostics.len()
    );
    Ok(())
}

/// One-line record header: index, MTI, meaning, format.
fn describe_record(index: usize, record: &isodump_types::record::DecodedRecord) -> String {
    let meaning = record
        .mti_description
        .map(|m| format!(" ({m})"))
        .unwrap_or_default();
    let format = match record.record_format {
        isodump_types::record::RecordFormat::Binary => "binary",
        isodump_types::record::RecordFormat::Text => "text",
    };
    format!("record {}: MTI {}{meaning} [{format}]", index + 1, record.mti)
}

/// Render a value for display, masking PAN fields.
fn display_value(name: &str, value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) if PAN_FIELD_NAMES.contains(&name) => mask_pan(s),
        other => other.to_string(),
    }
}
