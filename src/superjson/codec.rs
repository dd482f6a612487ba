//! Envelope encode/decode

use super::types::{Envelope, Meta, MetaValues, TypeTag};
use crate::error::{Error, Result};
use crate::native::Native;
use crate::types::{JsonObject, JsonValue};
use indexmap::IndexMap;
use std::mem;

// ============================================================================
// Encode
// ============================================================================

#[derive(Default)]
struct Collected {
    paths: IndexMap<String, Vec<String>>,
    whole: Option<TypeTag>,
}

/// Encode a native value into a wire envelope.
///
/// Fails if a template marker is still present.
pub fn format(native: &Native) -> Result<Envelope> {
    let mut collected = Collected::default();
    let json = encode(native, &mut Vec::new(), &mut collected)?;

    let values = if let Some(tag) = collected.whole {
        Some(MetaValues::Whole(vec![tag.as_str().to_string()]))
    } else if collected.paths.is_empty() {
        None
    } else {
        Some(MetaValues::Paths(collected.paths))
    };

    Ok(Envelope {
        json,
        meta: values.map(|values| Meta {
            values: Some(values),
        }),
    })
}

fn encode(node: &Native, path: &mut Vec<String>, collected: &mut Collected) -> Result<JsonValue> {
    match node {
        Native::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                out.push(encode(item, path, collected)?);
                path.pop();
            }
            Ok(JsonValue::Array(out))
        }
        Native::Object(map) => {
            let mut out = JsonObject::new();
            for (key, item) in map {
                path.push(key.clone());
                let value = encode(item, path, collected)?;
                path.pop();
                out.insert(key.clone(), value);
            }
            Ok(JsonValue::Object(out))
        }
        Native::Marker(_) => Err(Error::UnresolvedMarker {
            path: path.join("."),
        }),
        Native::Null => Ok(JsonValue::Null),
        Native::Bool(b) => Ok(JsonValue::Bool(*b)),
        Native::Number(n) => Ok(JsonValue::Number(n.clone())),
        Native::String(s) => Ok(JsonValue::String(s.clone())),
        typed => {
            let Some(tag) = TypeTag::of(typed) else {
                return Err(Error::Other(format!("no type tag for {typed:?}")));
            };
            if path.is_empty() {
                collected.whole = Some(tag);
            } else {
                collected
                    .paths
                    .insert(path.join("."), vec![tag.as_str().to_string()]);
            }
            Ok(tag.encode(typed))
        }
    }
}

// ============================================================================
// Decode
// ============================================================================

/// Decode a wire envelope into a native value
pub fn parse(envelope: &Envelope) -> Result<Native> {
    let mut value = Native::from_json(envelope.json.clone());

    let values = match envelope.meta.as_ref().and_then(|meta| meta.values.as_ref()) {
        Some(values) if !values.is_empty() => values,
        _ => return Ok(value),
    };

    match values {
        MetaValues::Paths(paths) => {
            for (path, tags) in paths {
                let tag = single_tag(tags, path)?;
                apply_at_path(&mut value, path, tag)?;
            }
            Ok(value)
        }
        MetaValues::Whole(tags) => {
            if tags.len() != 1 {
                return Err(Error::invalid_meta(format!(
                    "whole-value tag list must have one element, found {tags:?}"
                )));
            }
            let tag: TypeTag = tags[0].parse()?;
            tag.decode(value)
        }
    }
}

/// Decode a raw JSON value holding an envelope
pub fn parse_value(raw: &JsonValue) -> Result<Native> {
    let envelope: Envelope = serde_json::from_value(raw.clone())?;
    parse(&envelope)
}

fn single_tag(tags: &[String], path: &str) -> Result<TypeTag> {
    match tags.first() {
        Some(tag) => tag.parse(),
        None => Err(Error::invalid_meta(format!("empty tag list for '{path}'"))),
    }
}

fn apply_at_path(root: &mut Native, path: &str, tag: TypeTag) -> Result<()> {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return Err(Error::malformed_path(path, "empty path"));
    };

    let mut node = root;
    for segment in parents {
        node = child_mut(node, segment, path)?;
    }

    match node {
        Native::Object(map) => match map.get_mut(*last) {
            Some(slot) => {
                let current = mem::take(slot);
                *slot = tag.decode(current)?;
            }
            // JSON drops undefined keys, so only the metadata remembers them
            None if tag == TypeTag::Undefined => {
                map.insert((*last).to_string(), Native::Null);
            }
            None => {
                return Err(Error::malformed_path(path, format!("missing key '{last}'")));
            }
        },
        Native::Array(items) => {
            let index = parse_index(last, path)?;
            let len = items.len();
            let slot = items.get_mut(index).ok_or_else(|| {
                Error::malformed_path(path, format!("index {index} out of bounds ({len})"))
            })?;
            let current = mem::take(slot);
            *slot = tag.decode(current)?;
        }
        other => {
            return Err(Error::malformed_path(
                path,
                format!("cannot address '{last}' inside {}", kind(other)),
            ));
        }
    }

    Ok(())
}

fn child_mut<'a>(node: &'a mut Native, segment: &str, path: &str) -> Result<&'a mut Native> {
    match node {
        Native::Object(map) => map
            .get_mut(segment)
            .ok_or_else(|| Error::malformed_path(path, format!("missing key '{segment}'"))),
        Native::Array(items) => {
            let index = parse_index(segment, path)?;
            let len = items.len();
            items.get_mut(index).ok_or_else(|| {
                Error::malformed_path(path, format!("index {index} out of bounds ({len})"))
            })
        }
        other => Err(Error::malformed_path(
            path,
            format!("cannot address '{segment}' inside {}", kind(other)),
        )),
    }
}

fn parse_index(segment: &str, path: &str) -> Result<usize> {
    segment
        .parse()
        .map_err(|_| Error::malformed_path(path, format!("'{segment}' is not an array index")))
}

fn kind(value: &Native) -> &'static str {
    match value {
        Native::Null => "null",
        Native::Bool(_) => "a boolean",
        Native::Number(_) => "a number",
        Native::String(_) => "a string",
        Native::Array(_) => "an array",
        Native::Object(_) => "an object",
        Native::Undefined => "undefined",
        Native::Date(_) => "a date",
        Native::Marker(_) => "a marker",
    }
}
