mod parse_bad;
mod property_window;
pub(crate) mod support;
