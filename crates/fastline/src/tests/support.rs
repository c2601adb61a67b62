use std::io::{self, Read};

/// Returns at most `step` bytes per read, to force lines across fills.
pub(crate) struct Trickle<R> {
    inner: R,
    step: usize,
}

impl<R: Read> Trickle<R> {
    pub(crate) fn new(inner: R, step: usize) -> Self {
        assert!(step > 0);
        Self { inner, step }
    }
}

impl<R: Read> Read for Trickle<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step);
        self.inner.read(&mut buf[..n])
    }
}

/// Fails every read with `kind`, optionally after one `Interrupted`.
pub(crate) struct Failing {
    kind: io::ErrorKind,
    interrupt_first: bool,
    data: Option<io::Cursor<Vec<u8>>>,
}

impl Failing {
    pub(crate) fn new(kind: io::ErrorKind) -> Self {
        Self {
            kind,
            interrupt_first: false,
            data: None,
        }
    }

    /// Interrupts the first read, then serves `data`.
    pub(crate) fn interrupted_then(data: Vec<u8>) -> Self {
        Self {
            kind: io::ErrorKind::Interrupted,
            interrupt_first: true,
            data: Some(io::Cursor::new(data)),
        }
    }
}

impl Read for Failing {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_first {
            self.interrupt_first = false;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        match &mut self.data {
            Some(data) => data.read(buf),
            None => Err(io::Error::from(self.kind)),
        }
    }
}

/// Collects every line's fields as owned byte strings.
pub(crate) fn collect_fields<R: Read>(
    tokenizer: &mut crate::LineTokenizer<R>,
) -> Result<Vec<Vec<Vec<u8>>>, crate::ReadError> {
    let mut lines = Vec::new();
    while let Some(line) = tokenizer.next_line()? {
        lines.push(line.fields().map(<[u8]>::to_vec).collect());
    }
    Ok(lines)
}

/// Reference split: `\n`-terminated lines (final one optional), trailing `\r`
/// stripped, split on `separator`.
pub(crate) fn reference_split(input: &[u8], separator: u8) -> Vec<Vec<Vec<u8>>> {
    let mut lines: Vec<&[u8]> = input.split(|&b| b == b'\n').collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
        .into_iter()
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            line.split(|&b| b == separator).map(<[u8]>::to_vec).collect()
        })
        .collect()
}
