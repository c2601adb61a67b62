//! Allocation-free `i64` parsing straight out of a byte slice.
//!
//! Accepts exactly what `str::parse::<i64>` accepts for inputs of at most 19
//! digits (20 bytes with a sign): an optional `+`/`-` followed by ASCII
//! digits. Longer inputs are rejected up front, even when the extra length is
//! leading zeros.
//!
//! The value is accumulated as a negative running total so that `i64::MIN`
//! is representable without a final negation overflowing. Accumulation wraps
//! on overflow; a wrapped total is always positive, which is how overflow is
//! detected after the loop.

use crate::error::IntegerError;

/// Digits in `i64::MAX` (`9223372036854775807`).
const MAX_UNSIGNED_LEN: usize = 19;
/// Bytes in `i64::MIN` (`-9223372036854775808`).
const MAX_SIGNED_LEN: usize = 20;

/// Parses a decimal `i64` from `bytes`, touching each byte once.
///
/// # Errors
///
/// - [`IntegerError::Empty`] for an empty slice.
/// - [`IntegerError::TooLong`] for more than 19 digits, or a sign with no
///   digits after it.
/// - [`IntegerError::InvalidCharacter`] for any byte outside `0-9` after the
///   optional sign.
/// - [`IntegerError::Overflow`] when the value does not fit in an `i64`.
///
/// # Examples
///
/// ```rust
/// use fastline::{IntegerError, parse_i64};
///
/// assert_eq!(parse_i64(b"-42"), Ok(-42));
/// assert_eq!(parse_i64(b"+007"), Ok(7));
/// assert_eq!(parse_i64(b"9223372036854775808"), Err(IntegerError::Overflow));
/// ```
pub fn parse_i64(bytes: &[u8]) -> Result<i64, IntegerError> {
    let Some(&first) = bytes.first() else {
        return Err(IntegerError::Empty);
    };

    let negative = first == b'-';
    let digits = if negative || first == b'+' {
        if bytes.len() == 1 || bytes.len() > MAX_SIGNED_LEN {
            return Err(IntegerError::TooLong);
        }
        &bytes[1..]
    } else {
        if bytes.len() > MAX_UNSIGNED_LEN {
            return Err(IntegerError::TooLong);
        }
        bytes
    };

    let mut v: i64 = 0;
    for &b in digits {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return Err(IntegerError::InvalidCharacter(b));
        }
        v = v.wrapping_mul(10).wrapping_sub(i64::from(d));
    }

    if v > 0 {
        Err(IntegerError::Overflow)
    } else if negative {
        Ok(v)
    } else if v == i64::MIN {
        Err(IntegerError::Overflow)
    } else {
        Ok(-v)
    }
}
