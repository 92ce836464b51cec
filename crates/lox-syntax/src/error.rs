//! Error types for the Lox toolchain.
//!
//! Two families live here:
//!
//! - [`ScanError`]: a diagnostic recorded by the scanner. Scanning never fails
//!   outright; problems are collected next to the tokens and handed to the
//!   caller as data.
//! - [`Error`]: the general error used by the tools around the scanner
//!   (reading scripts, writing benchmark reports) and propagated with `?`.
//!
//! # Examples
//!
//! ```rust
//! use lox_syntax::error::{ScanError, ScanErrorKind};
//!
//! let err = ScanError::new(ScanErrorKind::UnexpectedCharacter('@'), 1, 1);
//! assert_eq!(err.to_string(), "Scan error [1:1]: Unexpected character: @");
//! ```
//!
//! ```rust
//! use lox_syntax::error::{Result, Error, error};
//!
//! fn parse_count(s: &str) -> Result<u32> {
//!     s.parse().map_err(|_| Error::new(format!("Invalid count: {}", s)))
//! }
//!
//! fn checked(input: &str) -> Result<u32> {
//!     let n = parse_count(input)?;
//!     if n == 0 {
//!         error("Count must be positive")
//!     } else {
//!         Ok(n)
//!     }
//! }
//! assert!(checked("0").is_err());
//! ```

use std::fmt;

/// The two problems the scanner can run into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A character that starts no token and is not whitespace.
    UnexpectedCharacter(char),
    /// End of input was reached inside a string literal.
    UnterminatedString,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanErrorKind::UnexpectedCharacter(c) => write!(f, "Unexpected character: {}", c),
            ScanErrorKind::UnterminatedString => f.write_str("Unterminated string literal"),
        }
    }
}

/// A problem found while scanning, anchored where the offending lexeme starts.
///
/// `line` and `offset` are both 1-based and use the same convention as
/// [`Token`](crate::Token) positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub line: usize,
    pub offset: usize,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, line: usize, offset: usize) -> Self {
        Self { kind, line, offset }
    }

    /// Human-readable message, without the position prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scan error [{}:{}]: {}", self.line, self.offset, self.kind)
    }
}

/// An error raised by the tooling around the scanner.
///
/// ```rust
/// use lox_syntax::Error;
///
/// let err = Error::new("File not found: missing.lox");
/// assert_eq!(err.to_string(), "File not found: missing.lox");
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    /// Human-readable error message
    pub msg: String,
}

impl Error {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for Lox tooling.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}
