//! Crate-wide error type.
//!
//! Every fallible operation in the library surfaces an `EngineError`. The
//! binary maps the error kind to a process exit code:
//!
//! - 2: input problems (missing/unreadable file, malformed CSV)
//! - 3: axis inference failure (the sheet has no recognizable date axis)
//! - 4: formula problems (parse, unknown function, arity, coercion, argument)

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Report file missing or unreadable.
    #[error("failed to read report '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse report '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// No slice of the sheet scored positively for dates.
    #[error("unable to identify the date axis of report '{path}'")]
    AxisInference { path: PathBuf },

    /// Structurally invalid formula text.
    #[error("malformed formula: {0}")]
    Parse(String),

    /// A function node names something outside the registry.
    #[error("cannot find definition for function '{0}'")]
    UnknownFunction(String),

    /// Argument count violates the registry's arity contract.
    #[error("{name} expects {expected} args, found {found}")]
    Arity {
        name: String,
        expected: String,
        found: usize,
    },

    /// A cell whose denoised text does not parse as a number reached a
    /// numeric context that does not allow skipping.
    #[error("cannot interpret '{0}' as a number")]
    NumericCoercion(String),

    /// Bad argument value (non-integer index, out-of-range traverser index).
    #[error("invalid argument: {0}")]
    Argument(String),
}

impl EngineError {
    /// Exit code for the `rentroll` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            EngineError::Io { .. } | EngineError::Csv { .. } => 2,
            EngineError::AxisInference { .. } => 3,
            EngineError::Parse(_)
            | EngineError::UnknownFunction(_)
            | EngineError::Arity { .. }
            | EngineError::NumericCoercion(_)
            | EngineError::Argument(_) => 4,
        }
    }
}
