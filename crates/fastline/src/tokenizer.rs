//! Zero-copy line and field tokenizer over a [`ByteWindow`].
//!
//! Each call to [`LineTokenizer::next_line`] scans forward from the window's
//! read cursor to the next `\n`, recording every field as an
//! `(offset, length)` pair relative to the start of the line. Nothing is
//! copied: field bytes are read back out of the window's buffer on demand.
//!
//! Bookkeeping across refills
//! - The read cursor is not advanced until the whole line has been scanned,
//!   so the line start is always the window's read cursor while scanning.
//! - When the unread bytes run out mid-line the window is compacted and
//!   refilled; because offsets are relative to the line start, fields that
//!   were already closed stay valid.
//! - A line that still has no terminator once the window is full of unread
//!   bytes cannot fit and is rejected with [`FormatError::LineTooLong`].
//!
//! Field lifetime
//! - Offsets are only meaningful against the buffer as it was when the line
//!   was scanned; the next scan may compact or overwrite it. [`Line`] borrows
//!   the tokenizer, so the borrow checker rejects any attempt to keep a line's
//!   fields across the next call to `next_line`.
//!
//! Line endings
//! - `\n` terminates a line; a `\r` immediately before it is dropped from the
//!   last field.
//! - A final line without a trailing `\n` is accepted.

use std::{borrow::Cow, io::Read};

use memchr::memchr2;

use crate::{
    error::{FieldError, FormatError, ReadError},
    integer::parse_i64,
    options::ReaderOptions,
    window::ByteWindow,
};

/// Bounded `(start, length)` index of the fields of one line.
///
/// Capacity is fixed at construction; pushing past it is an error, never a
/// reallocation.
#[derive(Debug)]
pub(crate) struct FieldIndex {
    starts: Box<[usize]>,
    lengths: Box<[usize]>,
    count: usize,
}

impl FieldIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            starts: vec![0; capacity].into_boxed_slice(),
            lengths: vec![0; capacity].into_boxed_slice(),
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub(crate) fn push(&mut self, start: usize, len: usize) -> Result<(), FormatError> {
        if self.count == self.starts.len() {
            return Err(FormatError::TooManyFields {
                limit: self.starts.len(),
            });
        }
        self.starts[self.count] = start;
        self.lengths[self.count] = len;
        self.count += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.count).then(|| (self.starts[index], self.lengths[index]))
    }
}

/// End of the last field given the position of its terminator, with a
/// trailing `\r` removed.
#[inline]
fn trim_cr(bytes: &[u8], field_start: usize, end: usize) -> usize {
    if end > field_start && bytes[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}

/// Streaming tokenizer for separator-delimited lines.
///
/// # Examples
///
/// ```rust
/// use fastline::{LineTokenizer, ReaderOptions};
///
/// let input = &b"sys.cpu 1000000000 42.5 host=web01\n"[..];
/// let mut tokenizer = LineTokenizer::new(input, ReaderOptions::default()).unwrap();
/// let line = tokenizer.next_line().unwrap().unwrap();
/// assert_eq!(line.field_count(), 4);
/// assert_eq!(line.string(0).unwrap(), "sys.cpu");
/// assert_eq!(line.integer(1).unwrap(), 1_000_000_000);
/// ```
#[derive(Debug)]
pub struct LineTokenizer<R> {
    window: ByteWindow<R>,
    index: FieldIndex,
    separator: u8,
    /// Buffer offset of the current line, valid while `has_line`.
    line_start: usize,
    line_len: usize,
    has_line: bool,
    lines: u64,
}

impl<R: Read> LineTokenizer<R> {
    /// Creates a tokenizer reading from `inner`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Config`] if `options` fail
    /// [`ReaderOptions::validate`].
    pub fn new(inner: R, options: ReaderOptions) -> Result<Self, ReadError> {
        options.validate()?;
        Ok(Self {
            window: ByteWindow::new(inner, options.buffer_capacity, options.low_water_mark),
            index: FieldIndex::with_capacity(options.max_fields),
            separator: options.separator,
            line_start: 0,
            line_len: 0,
            has_line: false,
            lines: 0,
        })
    }

    /// Scans the next line and returns a view of its fields, or `None` at
    /// end-of-input.
    ///
    /// # Errors
    ///
    /// - [`ReadError::Io`] if the source fails.
    /// - [`ReadError::Format`] if the line has more fields than
    ///   `max_fields`, or does not fit in the buffer.
    pub fn next_line(&mut self) -> Result<Option<Line<'_>>, ReadError> {
        if self.advance()? {
            Ok(self.current())
        } else {
            Ok(None)
        }
    }

    /// Scans the next line, keeping its fields available through the
    /// tokenizer's own accessors. Returns `false` at end-of-input.
    ///
    /// # Errors
    ///
    /// Same as [`next_line`](Self::next_line).
    pub fn advance(&mut self) -> Result<bool, ReadError> {
        self.has_line = false;
        self.index.clear();
        self.window.refill()?;

        let separator = self.separator;
        let mut field_start = 0;
        let mut scanned = 0;
        loop {
            let unread = self.window.unread();
            match memchr2(separator, b'\n', &unread[scanned..]) {
                Some(i) => {
                    let at = scanned + i;
                    if unread[at] == b'\n' {
                        let end = trim_cr(unread, field_start, at);
                        self.index.push(field_start, end - field_start)?;
                        self.finish_line(end, at + 1);
                        return Ok(true);
                    }
                    self.index.push(field_start, at - field_start)?;
                    field_start = at + 1;
                    scanned = at + 1;
                }
                None => {
                    scanned = unread.len();
                    if self.window.fill_more()? > 0 {
                        continue;
                    }
                    if !self.window.is_exhausted() {
                        return Err(FormatError::LineTooLong {
                            capacity: self.window.capacity(),
                        }
                        .into());
                    }
                    if scanned == 0 {
                        return Ok(false);
                    }
                    let unread = self.window.unread();
                    let end = trim_cr(unread, field_start, scanned);
                    self.index.push(field_start, end - field_start)?;
                    self.finish_line(end, scanned);
                    return Ok(true);
                }
            }
        }
    }

    fn finish_line(&mut self, line_len: usize, consumed: usize) {
        self.line_start = self.window.position();
        self.line_len = line_len;
        self.window.consume(consumed);
        self.has_line = true;
        self.lines += 1;
    }
}

impl<R> LineTokenizer<R> {
    /// View of the most recently scanned line, if any.
    #[must_use]
    pub fn current(&self) -> Option<Line<'_>> {
        self.has_line.then(|| {
            let start = self.line_start;
            Line {
                bytes: &self.window.filled()[start..start + self.line_len],
                index: &self.index,
            }
        })
    }

    fn line(&self) -> Result<Line<'_>, FieldError> {
        self.current().ok_or(FieldError::NoLine)
    }

    /// Number of fields in the current line, `0` before the first line.
    #[must_use]
    pub fn field_count(&self) -> usize {
        if self.has_line { self.index.len() } else { 0 }
    }

    /// Raw bytes of field `index` of the current line.
    ///
    /// # Errors
    ///
    /// [`FieldError::OutOfRange`] if `index >= field_count()`,
    /// [`FieldError::NoLine`] before the first line.
    pub fn field(&self, index: usize) -> Result<&[u8], FieldError> {
        self.line()?.field(index)
    }

    /// Field `index` decoded as UTF-8, replacing invalid sequences.
    ///
    /// # Errors
    ///
    /// Same as [`field`](Self::field).
    pub fn string(&self, index: usize) -> Result<Cow<'_, str>, FieldError> {
        self.line()?.string(index)
    }

    /// Field `index` parsed in place as an `i64`.
    ///
    /// # Errors
    ///
    /// Same as [`field`](Self::field), plus [`FieldError::Integer`] when the
    /// field is not a valid integer.
    pub fn integer(&self, index: usize) -> Result<i64, FieldError> {
        self.line()?.integer(index)
    }

    /// Lines scanned so far.
    #[must_use]
    pub fn lines_scanned(&self) -> u64 {
        self.lines
    }

    /// Bytes pulled from the source so far.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.window.bytes_read()
    }

    /// Releases the source.
    pub fn into_inner(self) -> R {
        self.window.into_inner()
    }
}

/// Fields of one scanned line, borrowed from the tokenizer's buffer.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    bytes: &'a [u8],
    index: &'a FieldIndex,
}

impl<'a> Line<'a> {
    /// Number of fields: one more than the number of separators.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.index.len()
    }

    /// The line without its terminator (and without a trailing `\r`).
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Raw bytes of field `index`.
    ///
    /// # Errors
    ///
    /// [`FieldError::OutOfRange`] if `index >= field_count()`.
    pub fn field(&self, index: usize) -> Result<&'a [u8], FieldError> {
        let (start, len) = self.index.get(index).ok_or(FieldError::OutOfRange {
            index,
            count: self.index.len(),
        })?;
        Ok(&self.bytes[start..start + len])
    }

    /// Field `index` decoded as UTF-8, replacing invalid sequences. Borrows
    /// when the bytes are already valid.
    ///
    /// # Errors
    ///
    /// Same as [`field`](Self::field).
    pub fn string(&self, index: usize) -> Result<Cow<'a, str>, FieldError> {
        self.field(index).map(String::from_utf8_lossy)
    }

    /// Field `index` parsed in place as an `i64`.
    ///
    /// # Errors
    ///
    /// Same as [`field`](Self::field), plus [`FieldError::Integer`] when the
    /// field is not a valid integer.
    pub fn integer(&self, index: usize) -> Result<i64, FieldError> {
        let bytes = self.field(index)?;
        parse_i64(bytes).map_err(|e| FieldError::integer(e, bytes))
    }

    /// Iterates over the raw bytes of every field in order.
    pub fn fields(self) -> impl Iterator<Item = &'a [u8]> {
        let bytes = self.bytes;
        let index = self.index;
        (0..index.len()).filter_map(move |i| index.get(i).map(|(s, l)| &bytes[s..s + l]))
    }
}
