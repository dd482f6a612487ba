//! Envelope types and the type tag registry

use crate::error::{Error, Result};
use crate::native::Native;
use crate::time::{format_utc, parse_time};
use crate::types::JsonValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire envelope wrapping every tRPC input and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Payload with typed values in their wire form
    #[serde(default)]
    pub json: JsonValue,
    /// Side-channel type metadata, absent when nothing is typed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    /// Envelope for a payload without typed values
    pub fn plain(json: JsonValue) -> Self {
        Self { json, meta: None }
    }
}

/// Envelope metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<MetaValues>,
}

/// Location of typed values inside the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValues {
    /// Dotted path → one-element tag list
    Paths(IndexMap<String, Vec<String>>),
    /// Tag list for a payload that is itself a typed value
    Whole(Vec<String>),
}

impl MetaValues {
    pub fn is_empty(&self) -> bool {
        match self {
            MetaValues::Paths(paths) => paths.is_empty(),
            MetaValues::Whole(tags) => tags.is_empty(),
        }
    }
}

/// Registered type transforms, keyed by the native variant they apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Undefined,
    Date,
}

impl TypeTag {
    /// Tag name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Date => "Date",
        }
    }

    /// Tag for a native value, matched on its exact variant.
    ///
    /// Containers are never tagged, even when they hold a single typed value.
    pub fn of(value: &Native) -> Option<TypeTag> {
        match value {
            Native::Undefined => Some(TypeTag::Undefined),
            Native::Date(_) => Some(TypeTag::Date),
            _ => None,
        }
    }

    /// Wire form of a value this tag applies to
    pub fn encode(&self, value: &Native) -> JsonValue {
        match (self, value) {
            (TypeTag::Date, Native::Date(time)) => JsonValue::String(format_utc(time)),
            _ => JsonValue::Null,
        }
    }

    /// Native form of a tagged wire value
    pub fn decode(&self, value: Native) -> Result<Native> {
        match self {
            TypeTag::Undefined => Ok(Native::Null),
            TypeTag::Date => match value {
                Native::String(s) => parse_time(&s).map(Native::Date),
                Native::Date(time) => Ok(Native::Date(time)),
                other => Err(Error::tag_value(
                    self.as_str(),
                    format!("expected a timestamp string, got {other:?}"),
                )),
            },
        }
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "undefined" => Ok(TypeTag::Undefined),
            "Date" => Ok(TypeTag::Date),
            other => Err(Error::unknown_tag(other)),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
