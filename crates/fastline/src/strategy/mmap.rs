use std::{borrow::Cow, fs::File, ops::Range, path::Path};

use memchr::memchr;
use memmap2::Mmap;

use super::{LineReader, is_gzip, parse_field, range_field, split_ranges};
use crate::{
    error::{FieldError, ReadError},
    options::ReaderOptions,
};

/// Baseline: memory-maps the whole file and decodes it into one `String`
/// before the first line is returned.
///
/// Trades memory proportional to the file size for a tight line loop.
/// Invalid UTF-8 is replaced rather than rejected.
#[derive(Debug)]
pub struct MmapReader {
    options: ReaderOptions,
    text: String,
    cursor: usize,
    line: Range<usize>,
    fields: Vec<Range<usize>>,
    opened: bool,
}

impl MmapReader {
    /// Creates an unopened reader.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            options,
            text: String::new(),
            cursor: 0,
            line: 0..0,
            fields: Vec::new(),
            opened: false,
        }
    }

    fn line_text(&self) -> &str {
        &self.text[self.line.clone()]
    }
}

impl LineReader for MmapReader {
    fn open(&mut self, path: &Path) -> Result<(), ReadError> {
        self.options.validate()?;
        if is_gzip(path) {
            return Err(ReadError::CompressedInput(path.to_path_buf()));
        }
        let file = File::open(path)?;
        self.text = if file.metadata()?.len() == 0 {
            String::new()
        } else {
            // SAFETY: the mapping is read-only and dropped before `open`
            // returns; only the decoded copy outlives it.
            let map = unsafe { Mmap::map(&file)? };
            String::from_utf8_lossy(&map).into_owned()
        };
        log::debug!("mapped {} ({} bytes)", path.display(), self.text.len());
        self.cursor = 0;
        self.line = 0..0;
        self.fields.clear();
        self.opened = true;
        Ok(())
    }

    fn next_line(&mut self) -> Result<bool, ReadError> {
        if !self.opened {
            return Err(ReadError::NotOpen);
        }
        self.fields.clear();
        let bytes = self.text.as_bytes();
        if self.cursor >= bytes.len() {
            return Ok(false);
        }

        let start = self.cursor;
        let newline = memchr(b'\n', &bytes[start..]).map(|i| start + i);
        let mut end = newline.unwrap_or(bytes.len());
        self.cursor = newline.map_or(bytes.len(), |i| i + 1);
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }

        self.line = start..end;
        split_ranges(
            &bytes[start..end],
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
        range_field(self.line_text(), &self.fields, index).map(Cow::Borrowed)
    }

    fn integer_field(&self, index: usize) -> Result<i64, FieldError> {
        range_field(self.line_text(), &self.fields, index).and_then(parse_field)
    }

    fn name(&self) -> &'static str {
        "mmap"
    }
}
