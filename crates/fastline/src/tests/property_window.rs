//! Tokenizing through a tiny window, fed a few bytes at a time, must give
//! the same lines as splitting the whole input at once.

use quickcheck::{Arbitrary, Gen, QuickCheck};

use super::support::{Trickle, collect_fields, reference_split};
use crate::{FormatError, LineTokenizer, ReadError, ReaderOptions};

/// Input drawn from a small alphabet so separators, empty fields, `\r` and
/// blank lines are frequent.
#[derive(Debug, Clone)]
struct Input(Vec<u8>);

impl Arbitrary for Input {
    fn arbitrary(g: &mut Gen) -> Self {
        const ALPHABET: &[u8] = b"ab1-  \n\n\r=";
        let len = usize::arbitrary(g) % 200;
        Input(
            (0..len)
                .map(|_| *g.choose(ALPHABET).unwrap_or(&b'a'))
                .collect(),
        )
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Input))
    }
}

fn longest_line(input: &[u8]) -> usize {
    input.split(|&b| b == b'\n').map(<[u8]>::len).max().unwrap_or(0)
}

fn tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

fn options(capacity: usize) -> ReaderOptions {
    ReaderOptions {
        buffer_capacity: capacity,
        low_water_mark: capacity / 3,
        ..Default::default()
    }
}

#[test]
fn small_windows_agree_with_reference_split() {
    fn prop(input: Input, capacity: u8, step: u8) -> bool {
        let capacity = usize::from(capacity).max(1);
        let step = usize::from(step).max(1);
        let trickle = Trickle::new(&input.0[..], step);
        let mut t = LineTokenizer::new(trickle, options(capacity)).unwrap();
        let result = collect_fields(&mut t);

        // A line only fits when it and its terminator are in the window
        // together; an unterminated final line needs no terminator.
        if longest_line(&input.0) < capacity {
            result.is_ok_and(|lines| lines == reference_split(&input.0, b' '))
        } else {
            matches!(
                result,
                Err(ReadError::Format(FormatError::LineTooLong { .. }))
            ) || result.is_ok_and(|lines| lines == reference_split(&input.0, b' '))
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Input, u8, u8) -> bool);
}

#[test]
fn window_size_does_not_change_the_result() {
    fn prop(input: Input, step: u8) -> bool {
        let step = usize::from(step).max(1);
        let small = options(longest_line(&input.0) + 1);
        let mut a = LineTokenizer::new(Trickle::new(&input.0[..], step), small).unwrap();
        let mut b = LineTokenizer::new(&input.0[..], ReaderOptions::default()).unwrap();
        match (collect_fields(&mut a), collect_fields(&mut b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Input, u8) -> bool);
}
