/// Implementation of `isodump validate`.
///
/// Decodes with conformance validation on and reports per-record
/// pass/fail plus the concatenated error string for failures. Records
/// with no resolvable specification count as failures — a record you
/// cannot check is not a record you can vouch for.
use std::fs;

use anyhow::{Context, Result, bail};
use isodump_decoder::DumpDecoder;
use isodump_types::record::RecordStatus;
use isodump_types::spec::SpecSet;

use crate::ValidateArgs;

/// Run the `isodump validate` command.
///
/// # Errors
///
/// Returns an error when the file cannot be read, the spec directory
/// is unusable, or any record fails validation (exit code 1).
pub fn run(args: &ValidateArgs) -> Result<()> {
    let specs = match &args.spec_dir {
        Some(dir) => SpecSet::load_dir(dir)
            .with_context(|| format!("cannot load spec directory {}", dir.display()))?,
        None => SpecSet::builtin(),
    };

    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output = DumpDecoder::new().with_specs(specs).decode(&bytes, &filename);

    let mut failures = 0usize;
    for (index, record) in output.records.iter().enumerate() {
        let number = index + 1;
        if record.status == RecordStatus::SpecMissing {
            failures += 1;
            println!("record {number}: FAIL (no specification for MTI {})", record.mti);
            continue;
        }
        match &record.validation {
            Some(validation) if !validation.passed => {
                failures += 1;
                println!("record {number}: FAIL ({})", validation.errors);
            }
            _ => println!("record {number}: pass"),
        }
    }

    println!(
        "\n{} record(s), {} failure(s), {} warning(s)",
        output.records.len(),
        failures,
        output.diagnostics.len()
    );

    if failures > 0 {
        bail!("{failures} record(s) failed validation");
    }
    Ok(())
}
