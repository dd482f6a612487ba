//! Session cookies and the signed-in user's identity

use crate::error::{Error, Result, ResultExt};
use crate::time::parse_time;
use crate::types::JsonValue;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Cookies sent with every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookies: BTreeMap<String, String>,
}

impl Session {
    /// Create an anonymous session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from name/value pairs
    pub fn from_cookies<K, V>(cookies: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cookies: cookies
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a `Cookie` header value such as `a=1; b=2`.
    ///
    /// Fragments without `=` are ignored.
    pub fn from_cookie_header(header: &str) -> Self {
        Self::from_cookies(header.split(';').filter_map(|part| {
            let (name, value) = part.trim().split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
        }))
    }

    /// Load a saved cookie file.
    ///
    /// Accepts either a plain `{name: value}` object or the saved form
    /// `{"cookies": {...}, "raw_user_info": {...}}`; the latter also yields
    /// the identity it was saved with.
    pub fn from_file(path: impl AsRef<Path>) -> Result<(Self, Option<Identity>)> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cookie file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Parse the contents of a cookie file
    pub fn from_json_str(content: &str) -> Result<(Self, Option<Identity>)> {
        match serde_json::from_str::<CookieFile>(content)? {
            CookieFile::Saved {
                cookies,
                raw_user_info,
            } => {
                let identity = match raw_user_info {
                    Some(raw) => Identity::from_raw_user(&raw)?,
                    None => None,
                };
                Ok((Self { cookies }, identity))
            }
            CookieFile::Plain(cookies) => Ok((Self { cookies }, None)),
        }
    }

    /// Add or replace a cookie
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Look up a cookie value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Iterate over cookies in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Value for the `Cookie` request header, `None` when there are no cookies
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CookieFile {
    Saved {
        cookies: BTreeMap<String, String>,
        #[serde(default)]
        raw_user_info: Option<JsonValue>,
    },
    Plain(BTreeMap<String, String>),
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: u64,
    pub name: Option<String>,
    pub username: String,
    pub email: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Avatar URL
    pub image: Option<String>,
    /// The user object as the server sent it
    pub raw: JsonValue,
}

impl Identity {
    /// Build an identity from a raw user object.
    ///
    /// `null` or a missing user means nobody is signed in and yields `None`.
    pub fn from_raw_user(raw: &JsonValue) -> Result<Option<Self>> {
        let user = match raw {
            JsonValue::Null => return Ok(None),
            JsonValue::Object(user) => user,
            other => {
                return Err(Error::session(format!(
                    "user info must be an object, got {other}"
                )))
            }
        };

        let id = user
            .get("id")
            .and_then(JsonValue::as_u64)
            .ok_or_else(|| Error::session("user info has no numeric id"))?;
        let username = user
            .get("username")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::session("user info has no username"))?
            .to_string();
        let text = |key: &str| user.get(key).and_then(JsonValue::as_str).map(String::from);
        let created_at = match user.get("createdAt").and_then(JsonValue::as_str) {
            Some(s) => Some(parse_time(s)?),
            None => None,
        };

        Ok(Some(Self {
            id,
            name: text("name"),
            username,
            email: text("email"),
            created_at,
            image: text("image"),
            raw: raw.clone(),
        }))
    }

    /// Extract the identity from an `/api/auth/session` response body
    pub fn from_session_response(body: &JsonValue) -> Result<Option<Self>> {
        match body.get("user") {
            Some(user) => Self::from_raw_user(user),
            None => Ok(None),
        }
    }
}
