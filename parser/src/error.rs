//! Fatal index parse errors.
//!
//! Rows that match no data-row shape are not errors; the splitter rejects
//! them and the driver moves on. The variants here are malformed rows the
//! parser refuses to guess about.

use keyref_core::CommandError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// A continuation line appeared with no record to extend.
    #[error("line {line} ({mode}): continuation line without a preceding command")]
    OrphanContinuation { line: usize, mode: String },

    /// A continuation line carried a `|tag|`.
    #[error("line {line} ({mode}): continuation line carries tag '{tag}'")]
    TaggedContinuation {
        line: usize,
        mode: String,
        tag: String,
    },

    /// A continuation line had no text.
    #[error("line {line} ({mode}): empty continuation line")]
    EmptyContinuation { line: usize, mode: String },

    /// A record could not be built for the active section.
    #[error("line {line}: {source}")]
    Command {
        line: usize,
        #[source]
        source: CommandError,
    },

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::OrphanContinuation { line, .. }
            | Self::TaggedContinuation { line, .. }
            | Self::EmptyContinuation { line, .. }
            | Self::Command { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}
