#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use fastline::{FormatError, LineTokenizer, ReadError, ReaderOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    capacity: u8,
    low_water_mark: u8,
    step: u8,
    separator: u8,
    data: &'a [u8],
}

/// Hands out at most `step` bytes per read.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn reference_split(input: &[u8], separator: u8) -> Vec<Vec<Vec<u8>>> {
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

fuzz_target!(|input: Input<'_>| {
    let capacity = usize::from(input.capacity).max(1);
    let options = ReaderOptions {
        buffer_capacity: capacity,
        low_water_mark: usize::from(input.low_water_mark) % (capacity + 1),
        max_fields: 256,
        separator: input.separator,
    };
    if options.validate().is_err() {
        return;
    }

    let source = Trickle {
        data: input.data,
        step: usize::from(input.step).max(1),
    };
    let mut tokenizer = LineTokenizer::new(source, options).unwrap();
    let mut lines = Vec::new();
    let result = loop {
        match tokenizer.next_line() {
            Ok(Some(line)) => lines.push(line.fields().map(<[u8]>::to_vec).collect::<Vec<_>>()),
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    let longest = input.data.split(|&b| b == b'\n').map(<[u8]>::len).max().unwrap_or(0);
    match result {
        Ok(()) => assert_eq!(lines, reference_split(input.data, input.separator)),
        Err(ReadError::Format(FormatError::LineTooLong { .. })) => assert!(longest >= capacity),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
