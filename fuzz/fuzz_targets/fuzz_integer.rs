#![no_main]
use fastline::{IntegerError, parse_i64};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let ours = parse_i64(data);
    let digits = data
        .strip_prefix(b"+")
        .or_else(|| data.strip_prefix(b"-"))
        .unwrap_or(data);

    match std::str::from_utf8(data).ok().and_then(|s| s.parse::<i64>().ok()) {
        // Leading zeros can push a valid value past the length limit.
        Some(_) if digits.len() > 19 => assert_eq!(ours, Err(IntegerError::TooLong), "{data:?}"),
        Some(expected) => assert_eq!(ours, Ok(expected), "{data:?}"),
        None => assert!(ours.is_err(), "{data:?} parsed as {ours:?}"),
    }
});
