// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for OFF decoding and encoding

use crate::reader::ReaderState;
use thiserror::Error;

/// Result type for OFF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing OFF text.
///
/// Line numbers are 1-based and count every physical line of the input,
/// including comments and blank lines.
#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: malformed OFF header {content:?}")]
    MalformedHeader { line: usize, content: String },

    #[error("line {line}: malformed dimension line {content:?}")]
    MalformedDimension { line: usize, content: String },

    #[error("line {line}: malformed count line, expected {expected} integers, found {found}")]
    MalformedCounts {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: malformed vertex, expected {expected} values, found {found}")]
    MalformedVertex {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: malformed face, expected at least {expected} indices, found {found}")]
    MalformedFace {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        line: usize,
        index: u64,
        vertex_count: usize,
    },

    #[error("line {line}: more faces than the {declared} declared")]
    ExtraFace { line: usize, declared: usize },

    #[error("unexpected end of input while reading {state}: expected {expected}, found {found}")]
    TruncatedInput {
        state: ReaderState,
        expected: usize,
        found: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Line number the error was raised on, if it is tied to one line
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedHeader { line, .. }
            | Error::MalformedDimension { line, .. }
            | Error::MalformedCounts { line, .. }
            | Error::MalformedVertex { line, .. }
            | Error::MalformedFace { line, .. }
            | Error::IndexOutOfRange { line, .. }
            | Error::ExtraFace { line, .. } => Some(*line),
            Error::TruncatedInput { .. } | Error::Io(_) => None,
        }
    }

    /// True for errors caused by the content of the stream rather than I/O
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_line() {
        let err = Error::MalformedCounts {
            line: 3,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.line(), Some(3));
        assert!(err.is_format_error());

        let err = Error::TruncatedInput {
            state: ReaderState::Vertices,
            expected: 4,
            found: 2,
        };
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_error_display() {
        let err = Error::MalformedVertex {
            line: 7,
            expected: 6,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "line 7: malformed vertex, expected 6 values, found 3"
        );

        let err = Error::TruncatedInput {
            state: ReaderState::Faces,
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "unexpected end of input while reading faces: expected 2, found 1"
        );
    }
}
