use std::{
    borrow::Cow,
    io::{BufRead, BufReader, Read},
    ops::Range,
    path::Path,
};

use super::{
    LineReader, open_stream, parse_field, range_field, split_ranges, trim_line_ending,
};
use crate::{
    error::{FieldError, ReadError},
    options::ReaderOptions,
};

/// Baseline: `BufReader::read_line` into one reused `String`, split on the
/// separator byte into index ranges.
///
/// Pays for UTF-8 validation of every line but never copies a field.
pub struct BufferedReader {
    options: ReaderOptions,
    reader: Option<BufReader<Box<dyn Read>>>,
    line: String,
    fields: Vec<Range<usize>>,
}

impl BufferedReader {
    /// Creates an unopened reader.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            options,
            reader: None,
            line: String::new(),
            fields: Vec::new(),
        }
    }

    fn text(&self) -> &str {
        trim_line_ending(&self.line)
    }
}

impl LineReader for BufferedReader {
    fn open(&mut self, path: &Path) -> Result<(), ReadError> {
        self.options.validate()?;
        let stream = open_stream(path)?;
        self.reader = Some(BufReader::with_capacity(self.options.buffer_capacity, stream));
        self.fields.clear();
        Ok(())
    }

    fn next_line(&mut self) -> Result<bool, ReadError> {
        let reader = self.reader.as_mut().ok_or(ReadError::NotOpen)?;
        self.line.clear();
        self.fields.clear();
        if reader.read_line(&mut self.line)? == 0 {
            return Ok(false);
        }
        let text = trim_line_ending(&self.line);
        split_ranges(
            text.as_bytes(),
            self.options.separator,
            self.options.max_fields,
            &mut self.fields,
        )?;
        Ok(true)
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn string_field(&self, index: usize) -> Result<Cow<'_, str>, FieldError> {
        range_field(self.text(), &self.fields, index).map(Cow::Borrowed)
    }

    fn integer_field(&self, index: usize) -> Result<i64, FieldError> {
        range_field(self.text(), &self.fields, index).and_then(parse_field)
    }

    fn name(&self) -> &'static str {
        "buffered"
    }
}
