//! Interchangeable ways of turning a file into lines of fields.
//!
//! [`LineReader`] is the contract the import pipeline and the benchmark
//! harness program against. The zero-copy tokenizer is one implementation;
//! the others are simpler baselines kept for throughput comparison. For the
//! same well-formed input every strategy yields the same fields.

use std::{
    borrow::Cow,
    fmt,
    fs::File,
    io::{self, BufReader, Read},
    ops::Range,
    path::Path,
    str::FromStr,
};

use flate2::read::GzDecoder;
use memchr::memchr_iter;

use crate::{
    error::{FieldError, FormatError, ReadError, UnknownStrategy},
    integer::parse_i64,
    options::ReaderOptions,
};

mod buffered;
mod fast;
mod mmap;
mod split;

pub use buffered::BufferedReader;
pub use fast::FastReader;
pub use mmap::MmapReader;
pub use split::SplitReader;

/// A source of separator-delimited lines.
///
/// Callers `open` a path, then alternate `next_line` with field reads. Field
/// reads always refer to the line returned by the most recent `next_line`.
pub trait LineReader {
    /// Opens `path`, replacing any previously opened input.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the file cannot be opened.
    fn open(&mut self, path: &Path) -> Result<(), ReadError>;

    /// Advances to the next line. Returns `false` at end-of-input.
    ///
    /// # Errors
    ///
    /// [`ReadError::NotOpen`] before `open`, [`ReadError::Io`] on read
    /// failure, [`ReadError::Format`] for a line the strategy cannot hold.
    fn next_line(&mut self) -> Result<bool, ReadError>;

    /// Number of fields in the current line, `0` before the first line.
    fn field_count(&self) -> usize;

    /// Field `index` of the current line as text.
    ///
    /// # Errors
    ///
    /// [`FieldError::OutOfRange`] if `index >= field_count()`.
    fn string_field(&self, index: usize) -> Result<Cow<'_, str>, FieldError>;

    /// Field `index` of the current line as an `i64`.
    ///
    /// # Errors
    ///
    /// As [`string_field`](Self::string_field), plus [`FieldError::Integer`]
    /// when the field is not a valid integer.
    fn integer_field(&self, index: usize) -> Result<i64, FieldError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Selects a [`LineReader`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    /// Zero-copy tokenizer over a fixed byte window.
    #[default]
    Fast,
    /// Buffered line reads split into index ranges.
    Buffered,
    /// Buffered line reads split into trimmed owned strings.
    Split,
    /// Whole-file memory map decoded up front.
    Mmap,
}

impl StrategyKind {
    /// Every strategy, fastest first.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Fast,
        StrategyKind::Buffered,
        StrategyKind::Split,
        StrategyKind::Mmap,
    ];

    /// Name accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Fast => "fast",
            StrategyKind::Buffered => "buffered",
            StrategyKind::Split => "split",
            StrategyKind::Mmap => "mmap",
        }
    }

    /// Creates an unopened reader of this kind.
    #[must_use]
    pub fn build(self, options: ReaderOptions) -> Box<dyn LineReader> {
        match self {
            StrategyKind::Fast => Box::new(FastReader::new(options)),
            StrategyKind::Buffered => Box::new(BufferedReader::new(options)),
            StrategyKind::Split => Box::new(SplitReader::new(options)),
            StrategyKind::Mmap => Box::new(MmapReader::new(options)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}

pub(crate) fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Opens `path` for sequential reading, decompressing `*.gz` files.
pub(crate) fn open_stream(path: &Path) -> io::Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        log::debug!("decompressing {}", path.display());
        Ok(Box::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(file))
    }
}

/// Strips a trailing `\n` or `\r\n`.
pub(crate) fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Splits `line` on `separator` into byte ranges, rejecting more than
/// `max_fields` fields.
pub(crate) fn split_ranges(
    line: &[u8],
    separator: u8,
    max_fields: usize,
    out: &mut Vec<Range<usize>>,
) -> Result<(), FormatError> {
    out.clear();
    let mut start = 0;
    for at in memchr_iter(separator, line).chain(std::iter::once(line.len())) {
        if out.len() == max_fields {
            return Err(FormatError::TooManyFields { limit: max_fields });
        }
        out.push(start..at);
        start = at + 1;
    }
    Ok(())
}

/// Looks up `ranges[index]` inside `text`.
pub(crate) fn range_field<'t>(
    text: &'t str,
    ranges: &[Range<usize>],
    index: usize,
) -> Result<&'t str, FieldError> {
    ranges
        .get(index)
        .map(|r| &text[r.clone()])
        .ok_or(FieldError::OutOfRange {
            index,
            count: ranges.len(),
        })
}

pub(crate) fn parse_field(text: &str) -> Result<i64, FieldError> {
    parse_i64(text.as_bytes()).map_err(|e| FieldError::integer(e, text.as_bytes()))
}
