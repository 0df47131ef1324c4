/// Implementation of `isodump decode`.
///
/// Decodes each input file in order and writes one JSON object per
/// record to stdout. Diagnostics go to stderr, prefixed with the file
/// they came from. Zero records across all inputs is an error — the
/// caller asked for data and got none.
use std::fs;

use anyhow::{Context, Result, bail};

use crate::{DecodeArgs, build_engine};

/// Run the `isodump decode` command.
///
/// # Errors
///
/// Returns an error when a file cannot be read, the spec directory is
/// unusable, or no record decodes from any input.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let engine = build_engine(args.spec_dir.as_ref(), args.lax_boundaries)?;

    let mut total = 0usize;
    for path in &args.files {
        let bytes =
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let output = engine.decode(&bytes, &filename);

        for diagnostic in &output.diagnostics {
            eprintln!("{filename}: warning: {diagnostic}");
        }
        for record in &output.records {
            println!("{}", serde_json::to_string(record)?);
        }
        total += output.records.len();
    }

    if total == 0 {
        bail!("no valid records decoded from {} file(s)", args.files.len());
    }
    Ok(())
}
