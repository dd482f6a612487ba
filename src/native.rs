//! Native values
//!
//! `Native` is the in-memory side of the superjson envelope. It extends the
//! plain JSON data model with the values that only exist on the client:
//! the undefined sentinel, timestamps, and template markers.

use crate::error::{Error, Result};
use crate::marker::Marker;
use crate::time::format_utc;
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, FixedOffset, TimeZone};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Number;

/// Ordered object of native values
pub type NativeObject = IndexMap<String, Native>;

/// A request or response value on the native side of the codec
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Native {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Native>),
    Object(NativeObject),
    /// Key present without a value; encoded as an `"undefined"` tag
    Undefined,
    /// Timestamp; encoded as a `"Date"` tag
    Date(DateTime<FixedOffset>),
    /// Template placeholder, never valid on the wire
    Marker(Marker),
}

impl Native {
    /// Build an ordered object from key/value pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Native)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Deep-convert a wire JSON value
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::Number(n),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::Array(items.into_iter().map(Self::from_json).collect()),
            JsonValue::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert a decoded value to plain JSON.
    ///
    /// Timestamps become RFC 3339 strings and undefined becomes null. Fails if
    /// a marker is still present.
    pub fn to_json(&self) -> Result<JsonValue> {
        to_json_at(self, &mut Vec::new())
    }

    /// Deserialize a decoded value into a typed structure
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json()?)?)
    }

    /// Look up a key of an object
    pub fn get(&self, key: &str) -> Option<&Native> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Native>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&NativeObject> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check whether any marker remains anywhere in this value
    pub fn contains_marker(&self) -> bool {
        match self {
            Self::Marker(_) => true,
            Self::Array(items) => items.iter().any(Self::contains_marker),
            Self::Object(map) => map.values().any(Self::contains_marker),
            _ => false,
        }
    }
}

fn to_json_at(value: &Native, path: &mut Vec<String>) -> Result<JsonValue> {
    Ok(match value {
        Native::Null | Native::Undefined => JsonValue::Null,
        Native::Bool(b) => JsonValue::Bool(*b),
        Native::Number(n) => JsonValue::Number(n.clone()),
        Native::String(s) => JsonValue::String(s.clone()),
        Native::Date(d) => JsonValue::String(format_utc(d)),
        Native::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                out.push(to_json_at(item, path)?);
                path.pop();
            }
            JsonValue::Array(out)
        }
        Native::Object(map) => {
            let mut out = JsonObject::new();
            for (key, item) in map {
                path.push(key.clone());
                out.insert(key.clone(), to_json_at(item, path)?);
                path.pop();
            }
            JsonValue::Object(out)
        }
        Native::Marker(_) => {
            return Err(Error::UnresolvedMarker {
                path: path.join("."),
            })
        }
    })
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Native {
                fn from(n: $t) -> Self {
                    Self::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Native {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<bool> for Native {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Native {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Native {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Native>> From<Vec<T>> for Native {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Native>> From<Option<T>> for Native {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Native {
    fn from(d: DateTime<Tz>) -> Self {
        Self::Date(d.fixed_offset())
    }
}

impl From<Marker> for Native {
    fn from(m: Marker) -> Self {
        Self::Marker(m)
    }
}

impl From<JsonValue> for Native {
    fn from(value: JsonValue) -> Self {
        Self::from_json(value)
    }
}

impl From<NativeObject> for Native {
    fn from(map: NativeObject) -> Self {
        Self::Object(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Native)> for Native {
    fn from_iter<I: IntoIterator<Item = (K, Native)>>(iter: I) -> Self {
        Self::object(iter)
    }
}
