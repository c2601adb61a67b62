//! `key=value` tag parsing.

use std::collections::HashMap;

use crate::error::TagError;

/// Parses one `key=value` tag into `tags`.
///
/// Repeating a tag with the same value is accepted; repeating it with a
/// different value is not.
///
/// # Errors
///
/// [`TagError::Invalid`] unless the tag contains exactly one `=` with a
/// non-empty key and value, [`TagError::Duplicate`] for a conflicting repeat.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use fastline::parse_tag;
///
/// let mut tags = HashMap::new();
/// parse_tag(&mut tags, "host=web01").unwrap();
/// assert_eq!(tags["host"], "web01");
/// assert!(parse_tag(&mut tags, "host=web02").is_err());
/// ```
pub fn parse_tag(tags: &mut HashMap<String, String>, tag: &str) -> Result<(), TagError> {
    let mut parts = tag.split('=');
    let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TagError::Invalid(tag.to_owned()));
    };
    if key.is_empty() || value.is_empty() {
        return Err(TagError::Invalid(tag.to_owned()));
    }

    match tags.get(key) {
        Some(existing) if existing == value => Ok(()),
        Some(existing) => Err(TagError::Duplicate {
            key: key.to_owned(),
            existing: existing.clone(),
            new: value.to_owned(),
        }),
        None => {
            tags.insert(key.to_owned(), value.to_owned());
            Ok(())
        }
    }
}
