//! Error types for spec-file parsing.
//!
//! `ValueError` describes why a single value fragment was rejected.
//! `SpecError` adds the line context and is what the loader returns.

use std::collections::TryReserveError;
use std::path::PathBuf;

/// Errors that can occur while parsing one parameter value
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("expected at least one digit")]
    MissingDigits,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("value is too large to represent")]
    Overflow,

    #[error("value {value} exceeds the maximum of {max}")]
    OutOfRange { value: u64, max: u64 },

    #[error("connection identifier is longer than {max} bytes")]
    ConnectionIdTooLong { max: usize },

    #[error("unknown congestion control algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("unknown link segment field tag '{0}'")]
    UnknownSegmentTag(char),

    #[error("empty link segment field")]
    EmptySegmentField,

    #[error("empty link scenario")]
    EmptyLinkScenario,

    #[error("link segment {index}: {source}")]
    Segment {
        index: usize,
        #[source]
        source: Box<ValueError>,
    },

    #[error("'{value}' is neither a named scenario nor a valid segment list: {source}")]
    UnknownLinkScenario {
        value: String,
        #[source]
        source: Box<ValueError>,
    },

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Errors that abort loading a whole spec file
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("cannot open spec file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: incorrect specification line: {text}")]
    UnknownParameter { line: usize, text: String },

    #[error("line {line}: expected ':' after parameter '{param}'")]
    MissingSeparator { line: usize, param: &'static str },

    #[error("line {line}: error parsing {param}: {value}: {source}")]
    InvalidValue {
        line: usize,
        param: &'static str,
        value: String,
        #[source]
        source: ValueError,
    },
}

impl SpecError {
    /// Line number (1-based) the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Open { .. } => None,
            Self::Read { line, .. }
            | Self::UnknownParameter { line, .. }
            | Self::MissingSeparator { line, .. }
            | Self::InvalidValue { line, .. } => Some(*line),
        }
    }
}
