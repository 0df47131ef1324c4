/// Implementation of `isodump stats`.
///
/// Decodes each input and prints record counts by message type and by
/// record format.
///
/// # Example output
///
/// ```text
/// Files:   2, Records: 125, Warnings: 3
///
/// MTI    Meaning                     Count
/// ─────────────────────────────────────────
/// 1240   Authorization Request         108
/// 1644   (unknown)                      17
///
/// Format       Count
/// ──────────────────
/// binary         108
/// text            17
/// ```
use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use isodump_decoder::DumpDecoder;
use isodump_types::record::RecordFormat;
use isodump_wire::mti;

use crate::StatsArgs;

/// Run the `isodump stats` command.
///
/// # Errors
///
/// Returns an error when any input file cannot be read.
pub fn run(args: &StatsArgs) -> Result<()> {
    let engine = DumpDecoder::new();

    let mut by_mti: BTreeMap<String, usize> = BTreeMap::new();
    let mut binary_count = 0usize;
    let mut text_count = 0usize;
    let mut warnings = 0usize;
    let mut total = 0usize;

    for path in &args.files {
        let bytes =
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let output = engine.decode(&bytes, &filename);
        warnings += output.diagnostics.len();
        total += output.records.len();

        for record in &output.records {
            *by_mti.entry(record.mti.clone()).or_default() += 1;
            match record.record_format {
                RecordFormat::Binary => binary_count += 1,
                RecordFormat::Text => text_count += 1,
            }
        }
    }

    println!(
        "Files:   {}, Records: {total}, Warnings: {warnings}\n",
        args.files.len()
    );

    println!("{:<6} {:<27} {:>5}", "MTI", "Meaning", "Count");
    println!("{}", "\u{2500}".repeat(41));
    for (mti_value, count) in &by_mti {
        let meaning = mti::describe(mti_value).unwrap_or("(unknown)");
        println!("{mti_value:<6} {meaning:<27} {count:>5}");
    }

    println!();
    println!("{:<12} {:>5}", "Format", "Count");
    println!("{}", "\u{2500}".repeat(18));
    println!("{:<12} {binary_count:>5}", "binary");
    println!("{:<12} {text_count:>5}", "text");

    Ok(())
}
