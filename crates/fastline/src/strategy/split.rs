use std::{
    borrow::Cow,
    io::{BufRead, BufReader, Lines, Read},
    path::Path,
};

use super::{LineReader, open_stream, parse_field};
use crate::{
    error::{FieldError, FormatError, ReadError},
    options::ReaderOptions,
};

/// Baseline: `BufRead::lines` with a generic splitter that trims every field
/// and collects owned `String`s.
///
/// The most allocation-heavy strategy; one `String` per line plus one per
/// field.
pub struct SplitReader {
    options: ReaderOptions,
    lines: Option<Lines<BufReader<Box<dyn Read>>>>,
    fields: Vec<String>,
}

impl SplitReader {
    /// Creates an unopened reader.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            options,
            lines: None,
            fields: Vec::new(),
        }
    }

    fn get(&self, index: usize) -> Result<&str, FieldError> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(FieldError::OutOfRange {
                index,
                count: self.fields.len(),
            })
    }
}

impl LineReader for SplitReader {
    fn open(&mut self, path: &Path) -> Result<(), ReadError> {
        self.options.validate()?;
        let stream = open_stream(path)?;
        self.lines = Some(BufReader::with_capacity(self.options.buffer_capacity, stream).lines());
        self.fields.clear();
        Ok(())
    }

    fn next_line(&mut self) -> Result<bool, ReadError> {
        let lines = self.lines.as_mut().ok_or(ReadError::NotOpen)?;
        self.fields.clear();
        let Some(line) = lines.next().transpose()? else {
            return Ok(false);
        };
        for field in line.split(char::from(self.options.separator)) {
            if self.fields.len() == self.options.max_fields {
                return Err(FormatError::TooManyFields {
                    limit: self.options.max_fields,
                }
                .into());
            }
            self.fields.push(field.trim().to_owned());
        }
        Ok(true)
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn string_field(&self, index: usize) -> Result<Cow<'_, str>, FieldError> {
        self.get(index).map(Cow::Borrowed)
    }

    fn integer_field(&self, index: usize) -> Result<i64, FieldError> {
        self.get(index).and_then(parse_field)
    }

    fn name(&self) -> &'static str {
        "split"
    }
}
