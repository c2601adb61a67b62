//! Zero-copy ingestion of line-oriented, space-delimited time series files.
//!
//! Every line is one data point, `metric timestamp value [tag=value ...]`.
//! The core of the crate is [`LineTokenizer`]: it reads raw bytes into a
//! fixed-size [`ByteWindow`], finds line and field boundaries in place and
//! parses integers straight out of the buffer, so scanning a line allocates
//! nothing.
//!
//! Slower [`strategy`] implementations sit behind the same [`LineReader`]
//! contract for throughput comparison, and [`import`] validates points on
//! top of whichever reader is selected.
//!
//! ```rust
//! use fastline::{LineTokenizer, ReaderOptions};
//!
//! let input = &b"sys.cpu 1356998400 42.5 host=web01\nsys.mem 1356998400 7 host=web01\n"[..];
//! let mut tokenizer = LineTokenizer::new(input, ReaderOptions::default())?;
//! let mut timestamps = Vec::new();
//! while let Some(line) = tokenizer.next_line()? {
//!     timestamps.push(line.integer(1)?);
//! }
//! assert_eq!(timestamps, [1356998400, 1356998400]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(missing_docs)]

mod error;
pub mod import;
mod integer;
mod options;
pub mod strategy;
mod tags;
mod tokenizer;
mod window;

#[cfg(test)]
mod tests;

pub use error::{
    ConfigError, FieldError, FormatError, ImportError, ImportErrorKind, IntegerError, ReadError,
    TagError, UnknownStrategy,
};
pub use import::{ImportStats, Point, import, import_file, import_with};
pub use integer::parse_i64;
pub use options::{
    DEFAULT_BUFFER_CAPACITY, DEFAULT_LOW_WATER_MARK, DEFAULT_MAX_FIELDS, DEFAULT_SEPARATOR,
    ImportOptions, ReaderOptions,
};
pub use strategy::{LineReader, StrategyKind};
pub use tags::parse_tag;
pub use tokenizer::{Line, LineTokenizer};
pub use window::ByteWindow;
