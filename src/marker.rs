//! Template markers
//!
//! Markers are placeholders embedded in request templates. They only exist
//! as the [`Native::Marker`] variant, so no string or number supplied by a
//! caller can ever be mistaken for one.

use crate::native::Native;
use std::fmt;

/// Placeholder kinds understood by the template substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Replaced by the current page number
    Page,
    /// Replaced by the current cursor
    Cursor,
    /// Drops the enclosing key or element
    Omit,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Marker::Page => "page",
            Marker::Cursor => "cursor",
            Marker::Omit => "omit",
        };
        write!(f, "<marker:{name}>")
    }
}

/// Page number placeholder
pub const PAGE: Native = Native::Marker(Marker::Page);

/// Cursor placeholder
pub const CURSOR: Native = Native::Marker(Marker::Cursor);

/// Drop-this-key placeholder
pub const OMIT: Native = Native::Marker(Marker::Omit);

/// The undefined sentinel
pub const UNDEFINED: Native = Native::Undefined;

/// Use `value` when present, otherwise drop the key from the request
pub fn or_omit<T: Into<Native>>(value: Option<T>) -> Native {
    value.map_or(OMIT, Into::into)
}

/// Use `value` when present, otherwise send it as undefined
pub fn or_undefined<T: Into<Native>>(value: Option<T>) -> Native {
    value.map_or(UNDEFINED, Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_distinct() {
        assert_ne!(PAGE, CURSOR);
        assert_ne!(CURSOR, OMIT);
        assert_ne!(PAGE, OMIT);
        assert_ne!(OMIT, UNDEFINED);
    }

    #[test]
    fn test_marker_never_equals_user_values() {
        assert_ne!(PAGE, Native::from("<marker:page>"));
        assert_ne!(CURSOR, Native::from("cursor"));
        assert_ne!(OMIT, Native::Null);
    }

    #[test]
    fn test_or_omit_and_or_undefined() {
        assert_eq!(or_omit(Some(3)), Native::from(3));
        assert_eq!(or_omit(None::<i32>), OMIT);
        assert_eq!(or_undefined(None::<&str>), UNDEFINED);
    }
}
