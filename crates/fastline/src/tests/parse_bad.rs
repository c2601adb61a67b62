use std::io;

use super::support::{Failing, Trickle};
use crate::{FieldError, FormatError, IntegerError, LineTokenizer, ReadError, ReaderOptions};

fn first_line_error(input: &[u8], options: ReaderOptions) -> ReadError {
    let mut t = LineTokenizer::new(input, options).unwrap();
    match t.next_line() {
        Err(e) => e,
        Ok(line) => panic!("expected an error, got {line:?}"),
    }
}

#[test]
fn too_many_fields_is_fatal() {
    let options = ReaderOptions {
        max_fields: 3,
        ..Default::default()
    };
    let err = first_line_error(b"a b c d\n", options);
    assert!(matches!(
        err,
        ReadError::Format(FormatError::TooManyFields { limit: 3 })
    ));
    insta::assert_snapshot!(err, @"format error: line has more than 3 fields");
}

#[test]
fn too_many_fields_detected_on_unterminated_last_line() {
    let options = ReaderOptions {
        max_fields: 2,
        ..Default::default()
    };
    let err = first_line_error(b"a b c", options);
    assert!(matches!(
        err,
        ReadError::Format(FormatError::TooManyFields { limit: 2 })
    ));
}

#[test]
fn line_longer_than_window_is_rejected() {
    let options = ReaderOptions {
        buffer_capacity: 16,
        low_water_mark: 4,
        ..Default::default()
    };
    let input = b"ok 1 v\nthis line is longer than sixteen bytes\n";
    let mut t = LineTokenizer::new(Trickle::new(&input[..], 3), options).unwrap();
    assert_eq!(t.next_line().unwrap().unwrap().field_count(), 3);
    let err = t.next_line().unwrap_err();
    assert!(matches!(
        err,
        ReadError::Format(FormatError::LineTooLong { capacity: 16 })
    ));
    insta::assert_snapshot!(err, @"format error: line does not fit in a 16 byte buffer");
}

#[test]
fn field_index_out_of_range() {
    let mut t = LineTokenizer::new(&b"a b\n"[..], ReaderOptions::default()).unwrap();
    let line = t.next_line().unwrap().unwrap();
    let err = line.field(2).unwrap_err();
    assert_eq!(err, FieldError::OutOfRange { index: 2, count: 2 });
    insta::assert_snapshot!(err, @"field index 2 out of range for line with 2 fields");
    assert!(matches!(line.integer(5), Err(FieldError::OutOfRange { .. })));
    assert!(matches!(line.string(2), Err(FieldError::OutOfRange { .. })));
}

#[test]
fn field_access_before_first_line() {
    let t = LineTokenizer::new(&b"a\n"[..], ReaderOptions::default()).unwrap();
    assert_eq!(t.field(0), Err(FieldError::NoLine));
}

#[test]
fn integer_errors_carry_the_field_text() {
    let input = &b"m 12x3 - 99999999999999999999\n"[..];
    let mut t = LineTokenizer::new(input, ReaderOptions::default()).unwrap();
    let line = t.next_line().unwrap().unwrap();

    let err = line.integer(1).unwrap_err();
    assert!(matches!(
        err,
        FieldError::Integer {
            source: IntegerError::InvalidCharacter(b'x'),
            ..
        }
    ));
    insta::assert_snapshot!(err, @r#"invalid character 'x' in "12x3""#);

    let err = line.integer(2).unwrap_err();
    insta::assert_snapshot!(err, @r#"value too long in "-""#);

    let err = line.integer(3).unwrap_err();
    insta::assert_snapshot!(err, @r#"value too long in "99999999999999999999""#);
}

#[test]
fn empty_field_is_not_an_integer() {
    let mut t = LineTokenizer::new(&b"m  v\n"[..], ReaderOptions::default()).unwrap();
    let line = t.next_line().unwrap().unwrap();
    let err = line.integer(1).unwrap_err();
    insta::assert_snapshot!(err, @r#"empty value in """#);
}

#[test]
fn read_errors_propagate() {
    let source = Failing::new(io::ErrorKind::PermissionDenied);
    let mut t = LineTokenizer::new(source, ReaderOptions::default()).unwrap();
    let err = t.next_line().unwrap_err();
    assert!(matches!(err, ReadError::Io(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
}

#[test]
fn invalid_options_are_rejected_up_front() {
    let options = ReaderOptions {
        buffer_capacity: 8,
        low_water_mark: 9,
        ..Default::default()
    };
    let err = LineTokenizer::new(&b""[..], options).unwrap_err();
    insta::assert_snapshot!(err, @"invalid reader options: low-water mark 9 exceeds buffer capacity 8");
}
