//! Errors raised while reading puzzle input.
//!
//! Line and column numbers are 1-based so they can be matched against an
//! editor view of the input file.

use thiserror::Error;

use crate::warehouse::InvariantViolation;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character {ch:?} at line {line}, column {column}")]
    UnexpectedChar {
        ch: char,
        line: usize,
        column: usize,
    },
    #[error("line {line} has width {found}, but previous ones are {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("no {0} found in input")]
    Missing(&'static str),
    #[error("more than one {0} found in input")]
    Duplicate(&'static str),
    #[error("invalid number {text:?} on line {line}")]
    InvalidNumber { text: String, line: usize },
    #[error("malformed line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("input is empty")]
    Empty,
    /// A value derived from the input outgrows its integer type.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl ParseError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
