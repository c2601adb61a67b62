use crate::error::ConfigError;

/// Default size of the byte window.
pub const DEFAULT_BUFFER_CAPACITY: usize = 100_000;
/// Default number of unread bytes below which the window is refilled.
pub const DEFAULT_LOW_WATER_MARK: usize = 10_000;
/// Default upper bound on the number of fields in one line.
pub const DEFAULT_MAX_FIELDS: usize = 1000;
/// Default field separator.
pub const DEFAULT_SEPARATOR: u8 = b' ';

/// Configuration shared by every reader strategy.
///
/// # Examples
///
/// ```rust
/// use fastline::ReaderOptions;
///
/// let options = ReaderOptions {
///     buffer_capacity: 64 * 1024,
///     low_water_mark: 4096,
///     ..Default::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Size in bytes of the fixed input buffer.
    ///
    /// For the zero-copy tokenizer this also bounds the longest line that can
    /// be scanned. Line-based baselines use it as their `BufReader` capacity.
    ///
    /// # Default
    ///
    /// `100_000`
    pub buffer_capacity: usize,

    /// Number of unread bytes below which the window compacts and reads more
    /// input.
    ///
    /// Must not exceed `buffer_capacity`.
    ///
    /// # Default
    ///
    /// `10_000`
    pub low_water_mark: usize,

    /// Maximum number of fields in a single line.
    ///
    /// A line with more fields is rejected rather than truncated.
    ///
    /// # Default
    ///
    /// `1000`
    pub max_fields: usize,

    /// Byte separating the fields of a line.
    ///
    /// Must be ASCII and must not be `\n` or `\r`.
    ///
    /// # Default
    ///
    /// `b' '`
    pub separator: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            low_water_mark: DEFAULT_LOW_WATER_MARK,
            max_fields: DEFAULT_MAX_FIELDS,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl ReaderOptions {
    /// Checks the invariants the byte window and field index rely on.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_fields == 0 {
            return Err(ConfigError::ZeroFieldLimit);
        }
        if self.low_water_mark > self.buffer_capacity {
            return Err(ConfigError::LowWaterMarkTooLarge {
                low_water_mark: self.low_water_mark,
                capacity: self.buffer_capacity,
            });
        }
        if !self.separator.is_ascii() || matches!(self.separator, b'\n' | b'\r') {
            return Err(ConfigError::InvalidSeparator(self.separator));
        }
        Ok(())
    }
}

/// Configuration for [`import`](crate::import::import).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Log throughput every time this many points have been imported.
    ///
    /// `0` disables progress logging.
    ///
    /// # Default
    ///
    /// `1_000_000`
    pub progress_interval: u64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            progress_interval: 1_000_000,
        }
    }
}
