//! Error types for gmatkit
//!
//! Errors are layered the same way the crate is: builder-time problems are
//! [`ConfigError`], engine invocation problems are [`DispatchError`], and
//! malformed result files are [`ReportError`]. The top-level [`Error`] wraps
//! all three for callers that drive the whole pipeline.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Top-level library error.
///
/// Library code returns `Error` (or one of its component enums) and never
/// calls `std::process::exit()`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid builder input, raised synchronously at construction or insertion
/// time. Nothing partially built is left observable when one of these is
/// returned.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The resource kind is absent from the fixed category ordering table.
    #[error("unrecognized resource kind: {kind}")]
    UnrecognizedKind { kind: String },

    /// A propagate step was built with no spacecraft.
    #[error("propagate step requires at least one spacecraft")]
    NoSpacecraft,

    /// A propagate step was built with no termination condition.
    #[error("propagate step requires at least one stop condition")]
    NoStopCondition,

    /// A custom coordinate system was built without axes.
    #[error("coordinate system '{name}' is not predefined and has no axes")]
    MissingAxes { name: String },

    /// Modified-Keplerian state with apoapsis below periapsis.
    #[error("apoapsis radius {radapo} must not be below periapsis radius {radper}")]
    InvalidOrbitShape { radper: f64, radapo: f64 },

    /// Gregorian epoch fields that do not form a real calendar date-time.
    #[error("invalid epoch: {reason}")]
    InvalidEpoch { reason: String },

    /// Parallel fan-out was asked for zero worker groups.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,
}

/// Failure of an engine invocation.
///
/// The engine's own diagnostics are opaque to this layer; an
/// [`EngineFailure`](DispatchError::EngineFailure) carries the session log
/// path so the caller can inspect them externally.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The engine executable could not be located on PATH.
    #[error("engine executable '{program}' not found: {reason}")]
    EngineNotFound { program: String, reason: String },

    /// The engine process could not be spawned at all.
    #[error("failed to spawn engine process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The engine exited with a nonzero status (or was killed by a signal,
    /// in which case `code` is `None`).
    ///
    /// `artifact` is `None` for batch invocations: batch failures carry no
    /// per-plan attribution.
    #[error("engine run failed (exit {code:?}) for {}; log: {log}",
            artifact.as_deref().map_or("batch", |p| p.as_str()))]
    EngineFailure {
        artifact: Option<Utf8PathBuf>,
        code: Option<i32>,
        log: Utf8PathBuf,
    },
}

/// Malformed result file produced by the engine.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),

    /// A data row's token count does not match the header's field count.
    #[error("row {line}: expected {expected} fields, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A non-numeric token where a number was expected.
    #[error("row {line}: non-numeric value '{token}'")]
    NonNumeric { line: usize, token: String },

    /// A field name requested by the caller is not in the header row.
    #[error("unknown report field '{field}'")]
    UnknownField { field: String },
}
