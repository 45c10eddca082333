//! Unified failure type for every llbasic compilation phase.
//!
//! ## Failure Taxonomy
//!
//! ```text
//! Fail
//! ├── Source   - user-facing error with a source location (lexing, parsing, resolution)
//! ├── Internal - the compiler violated its own invariants (a compiler bug)
//! └── Io       - the output artifact could not be written
//! ```
//!
//! Failures are returned, never thrown. They travel up through `?` until they
//! reach the pass manager, which stops the pipeline and hands the failure to
//! the caller unchanged.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{Location, Token};

/// Result alias used throughout the compiler.
pub type FailResult<T> = Result<T, Fail>;

/// A compilation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fail {
    /// A source-attributable error.
    #[error("at {location}: {message}")]
    Source {
        /// Human readable description.
        message: String,
        /// Where the offending construct starts.
        location: Location,
    },

    /// An internal consistency check failed.
    ///
    /// These indicate a compiler defect rather than a problem in user code.
    #[error("internal compiler error: {message}")]
    Internal {
        /// Description of the violated invariant.
        message: String,
        /// Location of the construct being processed, when known.
        location: Option<Location>,
    },

    /// The output artifact could not be written.
    #[error("cannot write '{}': {message}", .path.display())]
    Io {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying error kind.
        kind: io::ErrorKind,
        /// Underlying error message.
        message: String,
    },
}

impl Fail {
    /// Create a source error at a bare line/column position.
    pub fn at(message: impl Into<String>, location: Location) -> Self {
        Fail::Source {
            message: message.into(),
            location,
        }
    }

    /// Create a source error blaming a token.
    pub fn from_token(message: impl Into<String>, token: &Token) -> Self {
        Self::at(message, token.location)
    }

    /// Create an internal consistency failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Fail::Internal {
            message: message.into(),
            location: None,
        }
    }

    /// Create an internal consistency failure with the location being processed.
    pub fn internal_at(message: impl Into<String>, location: Location) -> Self {
        Fail::Internal {
            message: message.into(),
            location: Some(location),
        }
    }

    /// Wrap an I/O error raised while writing `path`.
    pub fn io(path: &Path, err: &io::Error) -> Self {
        Fail::Io {
            path: path.to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// The message text without location decoration.
    pub fn message(&self) -> &str {
        match self {
            Fail::Source { message, .. } => message,
            Fail::Internal { message, .. } => message,
            Fail::Io { message, .. } => message,
        }
    }

    /// The source location, if the failure has one.
    pub fn location(&self) -> Option<Location> {
        match self {
            Fail::Source { location, .. } => Some(*location),
            Fail::Internal { location, .. } => *location,
            Fail::Io { .. } => None,
        }
    }

    /// Whether this failure is a compiler defect.
    pub fn is_internal(&self) -> bool {
        matches!(self, Fail::Internal { .. })
    }

    /// Whether this failure came from writing the artifact.
    pub fn is_io(&self) -> bool {
        matches!(self, Fail::Io { .. })
    }
}
