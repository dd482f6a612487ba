//! Request template substitution
//!
//! Templates are static request bodies containing [`Marker`]s. A single
//! recursive rebuild handles both uses:
//!
//! - [`substitute`] replaces every occurrence of one marker with a value
//!   (the current page or cursor) and drops `OMIT` entries.
//! - [`strip_omitted`] only drops `OMIT` entries, for one-shot requests.
//!
//! `OMIT` removes the enclosing object key, or the enclosing array element.
//! The input template is never modified.

use crate::marker::Marker;
use crate::native::Native;

/// What a template rebuild does besides dropping `OMIT` entries
#[derive(Debug, Clone, Copy)]
pub enum Substitution<'a> {
    /// Replace every `marker` with `value`
    Replace { marker: Marker, value: &'a Native },
    /// Leave all other markers in place
    StripOmitted,
}

impl Substitution<'_> {
    fn apply(&self, leaf: &Native) -> Native {
        match (self, leaf) {
            (Substitution::Replace { marker, value }, Native::Marker(m)) if m == marker => {
                (*value).clone()
            }
            _ => leaf.clone(),
        }
    }
}

/// Rebuild `template` according to `substitution`
pub fn rebuild(template: &Native, substitution: Substitution<'_>) -> Native {
    match template {
        Native::Object(map) => Native::Object(
            map.iter()
                .filter(|(_, value)| !is_omit(value))
                .map(|(key, value)| (key.clone(), rebuild(value, substitution)))
                .collect(),
        ),
        Native::Array(items) => Native::Array(
            items
                .iter()
                .filter(|value| !is_omit(value))
                .map(|value| rebuild(value, substitution))
                .collect(),
        ),
        leaf => substitution.apply(leaf),
    }
}

/// Replace `marker` with `value` everywhere in `template`
pub fn substitute(template: &Native, marker: Marker, value: &Native) -> Native {
    rebuild(template, Substitution::Replace { marker, value })
}

/// Drop every `OMIT`-marked key and element from `template`
pub fn strip_omitted(template: &Native) -> Native {
    rebuild(template, Substitution::StripOmitted)
}

fn is_omit(value: &Native) -> bool {
    matches!(value, Native::Marker(Marker::Omit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{CURSOR, OMIT, PAGE, UNDEFINED};
    use pretty_assertions::assert_eq;

    fn template() -> Native {
        Native::object([
            ("period", Native::from("AllTime")),
            ("username", OMIT),
            (
                "nested",
                Native::object([("cursor", CURSOR), ("types", Native::from(vec![OMIT]))]),
            ),
            ("cursor", CURSOR),
            ("authed", Native::from(true)),
        ])
    }

    #[test]
    fn test_substitute_cursor() {
        let result = substitute(&template(), Marker::Cursor, &Native::from("xyz"));
        assert_eq!(
            result,
            Native::object([
                ("period", Native::from("AllTime")),
                (
                    "nested",
                    Native::object([
                        ("cursor", Native::from("xyz")),
                        ("types", Native::Array(vec![])),
                    ]),
                ),
                ("cursor", Native::from("xyz")),
                ("authed", Native::from(true)),
            ])
        );
        assert!(!result.contains_marker());
    }

    #[test]
    fn test_substitute_preserves_sibling_order() {
        let result = substitute(&template(), Marker::Cursor, &UNDEFINED);
        let keys: Vec<&str> = result
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["period", "nested", "cursor", "authed"]);
    }

    #[test]
    fn test_substitute_leaves_other_markers() {
        let template = Native::object([("page", PAGE), ("cursor", CURSOR)]);
        let result = substitute(&template, Marker::Page, &Native::from(2));
        assert_eq!(result.get("page"), Some(&Native::from(2)));
        assert_eq!(result.get("cursor"), Some(&CURSOR));
    }

    #[test]
    fn test_substitute_does_not_touch_lookalike_values() {
        let template = Native::object([("cursor", Native::from("<marker:cursor>"))]);
        let result = substitute(&template, Marker::Cursor, &Native::from("xyz"));
        assert_eq!(result, template);
    }

    #[test]
    fn test_substitute_root_marker() {
        assert_eq!(
            substitute(&PAGE, Marker::Page, &Native::from(5)),
            Native::from(5)
        );
    }

    #[test]
    fn test_strip_omitted() {
        let template = Native::object([
            ("keep", Native::from(1)),
            ("drop", OMIT),
            ("list", Native::from(vec![Native::from(1), OMIT, Native::from(3)])),
            ("page", PAGE),
        ]);
        assert_eq!(
            strip_omitted(&template),
            Native::object([
                ("keep", Native::from(1)),
                ("list", Native::from(vec![1, 3])),
                ("page", PAGE),
            ])
        );
    }

    #[test]
    fn test_template_is_not_modified() {
        let original = template();
        let copy = original.clone();
        let _ = substitute(&original, Marker::Cursor, &Native::from(1));
        assert_eq!(original, copy);
    }
}
