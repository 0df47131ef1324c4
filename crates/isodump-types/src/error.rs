/// Errors raised while loading or resolving external field specifications.
///
/// These are configuration faults, not content faults: they come from
/// the caller-supplied spec files (or the absence of them), never from
/// the dump bytes being decoded. Content problems are absorbed into
/// diagnostics by the decoders and never surface as `Err`.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A specification file was not valid JSON.
    #[error("specification file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A specification key was not a field number in 1..=128.
    #[error("invalid field number key {key:?} in specification")]
    BadFieldNumber { key: String },

    /// No per-MTI entry matched and no default specification exists.
    ///
    /// Fatal for the affected record only — the engine turns this into
    /// a record with an explicit error status, never a panic.
    #[error("no specification for MTI {mti} and no default specification exists")]
    NoSpecForMti { mti: String },

    /// A specification directory was supplied but held no usable files.
    #[error("specification directory {path} contains no specification files")]
    Empty { path: String },

    /// I/O failure reading a specification directory or file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
