use std::{io, path::PathBuf};

use bstr::BString;
use thiserror::Error;

/// Why a field could not be read as a signed 64-bit integer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerError {
    #[error("empty value")]
    Empty,
    /// More digits than `i64::MIN`/`i64::MAX` can be written with, or a bare
    /// sign with no digits at all.
    #[error("value too long")]
    TooLong,
    #[error("invalid character '{}'", .0.escape_ascii())]
    InvalidCharacter(u8),
    #[error("overflow")]
    Overflow,
}

/// Failure to access a field of the current line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("field index {index} out of range for line with {count} fields")]
    OutOfRange { index: usize, count: usize },
    #[error("{source} in {text:?}")]
    Integer { source: IntegerError, text: BString },
    #[error("no line has been scanned")]
    NoLine,
}

impl FieldError {
    pub(crate) fn integer(source: IntegerError, bytes: &[u8]) -> Self {
        FieldError::Integer {
            source,
            text: BString::from(bytes),
        }
    }
}

/// Malformed input detected while scanning a line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("line has more than {limit} fields")]
    TooManyFields { limit: usize },
    #[error("line does not fit in a {capacity} byte buffer")]
    LineTooLong { capacity: usize },
}

/// Rejected [`ReaderOptions`](crate::ReaderOptions).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("buffer capacity must be greater than zero")]
    ZeroCapacity,
    #[error("field limit must be greater than zero")]
    ZeroFieldLimit,
    #[error("low-water mark {low_water_mark} exceeds buffer capacity {capacity}")]
    LowWaterMarkTooLarge {
        low_water_mark: usize,
        capacity: usize,
    },
    #[error("separator '{}' must be an ASCII byte other than a line terminator", .0.escape_ascii())]
    InvalidSeparator(u8),
}

/// Failure to open a source or scan the next line from it.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("invalid reader options: {0}")]
    Config(#[from] ConfigError),
    #[error("reader has not been opened")]
    NotOpen,
    #[error("cannot memory-map compressed input {}", .0.display())]
    CompressedInput(PathBuf),
}

/// Unrecognised reader strategy name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown reader strategy {0:?}, expected one of: fast, buffered, split, mmap")]
pub struct UnknownStrategy(pub String);

/// Malformed `key=value` tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("invalid tag: {0}")]
    Invalid(String),
    #[error("duplicate tag: {key}={new}, already have {key}={existing}")]
    Duplicate {
        key: String,
        existing: String,
        new: String,
    },
}

/// A point that failed validation, or a read failure during import.
///
/// `line` is the 1-based number of the offending line and `points` the
/// number of points successfully imported before it.
#[derive(Error, Debug)]
#[error("{kind} at line {line} ({points} points imported)")]
pub struct ImportError {
    pub kind: ImportErrorKind,
    pub line: u64,
    pub points: u64,
}

#[derive(Error, Debug)]
pub enum ImportErrorKind {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("expected at least 3 fields, found {found}")]
    MissingFields { found: usize },
    #[error("invalid metric: empty name")]
    InvalidMetric,
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("invalid value: empty")]
    InvalidValue,
    #[error(transparent)]
    Tag(#[from] TagError),
}
