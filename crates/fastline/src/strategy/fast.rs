use std::{borrow::Cow, io::Read, path::Path};

use super::{LineReader, open_stream};
use crate::{
    error::{FieldError, ReadError},
    options::ReaderOptions,
    tokenizer::LineTokenizer,
};

/// [`LineReader`] backed by the zero-copy [`LineTokenizer`].
pub struct FastReader {
    options: ReaderOptions,
    tokenizer: Option<LineTokenizer<Box<dyn Read>>>,
}

impl FastReader {
    /// Creates an unopened reader.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            options,
            tokenizer: None,
        }
    }
}

impl LineReader for FastReader {
    fn open(&mut self, path: &Path) -> Result<(), ReadError> {
        let stream = open_stream(path)?;
        self.tokenizer = Some(LineTokenizer::new(stream, self.options)?);
        Ok(())
    }

    fn next_line(&mut self) -> Result<bool, ReadError> {
        self.tokenizer
            .as_mut()
            .ok_or(ReadError::NotOpen)?
            .advance()
    }

    fn field_count(&self) -> usize {
        self.tokenizer.as_ref().map_or(0, LineTokenizer::field_count)
    }

    fn string_field(&self, index: usize) -> Result<Cow<'_, str>, FieldError> {
        self.tokenizer
            .as_ref()
            .ok_or(FieldError::NoLine)?
            .string(index)
    }

    fn integer_field(&self, index: usize) -> Result<i64, FieldError> {
        self.tokenizer
            .as_ref()
            .ok_or(FieldError::NoLine)?
            .integer(index)
    }

    fn name(&self) -> &'static str {
        "fast"
    }
}
