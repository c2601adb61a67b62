//! Fixed-capacity input buffer with compacting refills.
//!
//! A [`ByteWindow`] owns one contiguous buffer allocated at construction and
//! never grown. Bytes between the read cursor and the write limit are unread;
//! everything before the read cursor has been consumed and may be overwritten
//! by the next refill.
//!
//! ```text
//!  0          pos               limit          capacity
//!  |--consumed--|----unread-------|----free--------|
//! ```
//!
//! Refilling first shifts the unread region to offset 0 (compaction) and then
//! reads into the space that follows it, so retained bytes are extended and
//! never overwritten. The window knows nothing about lines or fields.
//!
//! Invariants
//! - `0 <= pos <= limit <= capacity`.
//! - Once the source reports end-of-input no further read is issued; bytes
//!   already buffered stay available.

use std::io::{self, Read};

/// Fixed-capacity byte buffer fed from a [`Read`] source.
#[derive(Debug)]
pub struct ByteWindow<R> {
    inner: R,
    buf: Box<[u8]>,
    pos: usize,
    limit: usize,
    low_water_mark: usize,
    exhausted: bool,
    bytes_read: u64,
}

impl<R: Read> ByteWindow<R> {
    /// Creates an empty window of `capacity` bytes over `inner`.
    ///
    /// No read is issued until the first [`refill`](Self::refill) or
    /// [`fill_more`](Self::fill_more).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or `low_water_mark` exceeds `capacity`.
    #[must_use]
    pub fn new(inner: R, capacity: usize, low_water_mark: usize) -> Self {
        assert!(capacity > 0, "byte window capacity must be non-zero");
        assert!(
            low_water_mark <= capacity,
            "low-water mark {low_water_mark} exceeds capacity {capacity}"
        );
        Self {
            inner,
            buf: vec![0; capacity].into_boxed_slice(),
            pos: 0,
            limit: 0,
            low_water_mark,
            exhausted: false,
            bytes_read: 0,
        }
    }

    /// Tops the window up when fewer than `low_water_mark` bytes are unread.
    ///
    /// On return either `remaining() >= low_water_mark` or the source is
    /// exhausted and `remaining()` is whatever is left of it.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from the source other than
    /// [`io::ErrorKind::Interrupted`], which is retried.
    pub fn refill(&mut self) -> io::Result<()> {
        while self.remaining() < self.low_water_mark {
            if self.fill_more()? == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Compacts and issues one read regardless of the low-water mark.
    ///
    /// Returns the number of bytes appended: `0` means either the source is
    /// exhausted or the window is full of unread bytes (see
    /// [`is_full`](Self::is_full)).
    ///
    /// # Errors
    ///
    /// Same as [`refill`](Self::refill).
    pub fn fill_more(&mut self) -> io::Result<usize> {
        if self.exhausted {
            return Ok(0);
        }
        self.compact();
        if self.limit == self.buf.len() {
            return Ok(0);
        }

        let n = loop {
            match self.inner.read(&mut self.buf[self.limit..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        };

        if n == 0 {
            log::debug!(
                "input exhausted after {} bytes, {} unread",
                self.bytes_read,
                self.remaining()
            );
            self.exhausted = true;
        }
        self.limit += n;
        self.bytes_read += n as u64;
        Ok(n)
    }

    fn compact(&mut self) {
        if self.pos == 0 {
            return;
        }
        self.buf.copy_within(self.pos..self.limit, 0);
        self.limit -= self.pos;
        self.pos = 0;
    }
}

impl<R> ByteWindow<R> {
    /// Bytes available without another read.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// The unread region `[pos, limit)`.
    #[inline]
    #[must_use]
    pub fn unread(&self) -> &[u8] {
        &self.buf[self.pos..self.limit]
    }

    /// Marks `n` unread bytes as consumed.
    ///
    /// # Panics
    ///
    /// Panics if `n > remaining()`.
    #[inline]
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.remaining(), "consumed past the write limit");
        self.pos += n;
    }

    /// Offset of the read cursor inside the buffer.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// All valid bytes `[0, limit)`, consumed or not.
    #[inline]
    pub(crate) fn filled(&self) -> &[u8] {
        &self.buf[..self.limit]
    }

    /// Whether the source has signalled end-of-input.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether every byte of the buffer is unread, so no read can make
    /// progress until some are consumed.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.pos == 0 && self.limit == self.buf.len()
    }

    /// Fixed size of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Total bytes pulled from the source so far.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Releases the source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
