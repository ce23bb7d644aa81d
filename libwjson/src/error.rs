//! Error types for JSON parsing.

use std::io;
use thiserror::Error;

/// Result type for JSON parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// What went wrong while parsing.
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// The lookahead does not start any JSON production.
    #[error("Unexpected character '{0}' (U+{code:04X})", code = *.0 as u32)]
    UnexpectedCharacter(char),

    /// Input ended in the middle of a token or container.
    #[error("Incomplete JSON input")]
    IncompleteInput,

    /// A string literal was never closed.
    #[error("JSON string is not closed")]
    UnterminatedString,

    /// An array was not closed by `]`.
    #[error("JSON array must end with ']'")]
    UnterminatedArray,

    /// Unknown escape character, or a non-hex digit in a `\u` escape.
    #[error("Invalid escape character '{0}' in string literal")]
    InvalidEscape(char),

    /// Input ended inside an escape sequence.
    #[error("Incomplete escape sequence in string literal")]
    IncompleteEscape,

    /// A numeric literal is malformed (dangling `.` or bare `-`).
    #[error("Invalid numeric literal")]
    InvalidNumber,

    /// An exponent marker has no digits after it.
    #[error("Invalid numeric literal; incomplete exponent")]
    IncompleteExponent,

    /// A keyword or punctuation did not match.
    #[error("Expected {expected}, got '{found}'")]
    ExpectedToken { expected: String, found: char },

    /// Non-whitespace input remains after the top-level value.
    #[error("Extra characters in JSON input")]
    TrailingData,

    /// The character source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// More input than the configured limit allows.
    #[error("Input exceeds {0} UTF-16 units")]
    InputTooLarge(u64),

    /// Containers nested deeper than the configured limit allows.
    #[error("Nesting exceeds {0} levels")]
    NestingTooDeep(u64),
}

/// A parse failure with its 0-based position.
#[derive(Error, Debug)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    kind: ErrorKind,
    line: usize,
    column: usize,
}

impl ParseError {
    /// Create an error at the given 0-based line and column.
    pub fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The error message without its location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

/// Render a UTF-16 code unit for an error message.
///
/// Surrogate halves have no `char`; they show as U+FFFD.
pub(crate) fn unit_char(unit: u16) -> char {
    char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}
