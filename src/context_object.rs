//! OpenURL context objects and their query-string form.
//!
//! A [`ContextObject`] is the ordered key/value mapping embedded in a COinS
//! span: `ctx_ver`, `rft_val_fmt`, `rfr_id` and the `rft.*` referent keys.
//! Keys keep the position of their first insertion.
//!
//! Keys hold either a scalar value or a list of values. The query-string
//! encoder writes lists with indexed bracket notation, the way PHP's
//! `http_build_query` does:
//!
//! ```text
//! ctx_ver=Z39.88-2004&rft.creator%5B0%5D=Smith&rft.creator%5B1%5D=Jones
//! ```
//!
//! [`crate::span`] strips the index suffixes again so that repeated keys
//! appear as plain repeats in the final span.

use std::fmt::Write;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use url::form_urlencoded;

lazy_static! {
    /// Trailing `[n]` on a decoded key.
    static ref INDEX_SUFFIX: Regex = Regex::new(r"\[[0-9]+\]$").expect("valid regex");
}

/// Value stored under a context object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    /// Single value, written as `key=value`
    Scalar(String),
    /// Ordered values, written as `key[0]=...&key[1]=...`
    List(Vec<String>),
}

impl ContextValue {
    /// Values in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            ContextValue::Scalar(value) => std::slice::from_ref(value),
            ContextValue::List(values) => values,
        }
    }
}

/// Ordered citation context object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextObject {
    entries: IndexMap<String, ContextValue>,
}

impl ContextObject {
    /// Create an empty context object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the list under `key`.
    ///
    /// A scalar already stored under `key` becomes the first list element.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let slot = self
            .entries
            .entry(key.into())
            .or_insert_with(|| ContextValue::List(Vec::new()));
        let mut values = match std::mem::replace(slot, ContextValue::List(Vec::new())) {
            ContextValue::Scalar(existing) => vec![existing],
            ContextValue::List(values) => values,
        };
        values.push(value.into());
        *slot = ContextValue::List(values);
    }

    /// Store `value` as the scalar under `key`, replacing any previous value.
    ///
    /// A replaced key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), ContextValue::Scalar(value.into()));
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// All values under `key` (empty when missing).
    #[must_use]
    pub fn get(&self, key: &str) -> &[String] {
        self.entries
            .get(key)
            .map(ContextValue::as_slice)
            .unwrap_or_default()
    }

    /// First value under `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    /// True if `key` has been set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Key/value pairs in order, with list values flattened.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, value)| {
            value
                .as_slice()
                .iter()
                .map(move |v| (key.as_str(), v.as_str()))
        })
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as an `application/x-www-form-urlencoded` query string.
    ///
    /// Keys and values are percent-encoded like PHP's `urlencode` (space as
    /// `+`, only alphanumerics and `-_.` left bare). List values use indexed
    /// bracket keys, `key%5B0%5D=...`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = String::new();
        for (key, value) in &self.entries {
            let key = urlencode(key);
            match value {
                ContextValue::Scalar(v) => append_pair(&mut query, &key, v),
                ContextValue::List(values) => {
                    for (index, v) in values.iter().enumerate() {
                        append_pair(&mut query, &format!("{key}%5B{index}%5D"), v);
                    }
                },
            }
        }
        query
    }

    /// Decode a query string produced by [`ContextObject::to_query_string`]
    /// or by a COinS span title.
    ///
    /// Indexed keys (`key[0]`) and repeated plain keys are folded into a
    /// list under the bare key. Keys seen once without an index decode as
    /// scalars.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut ctx = ContextObject::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let bare = INDEX_SUFFIX.replace(&key, "");
            if bare.len() != key.len() || ctx.contains_key(&bare) {
                ctx.push(bare.into_owned(), value.into_owned());
            } else {
                ctx.set(bare.into_owned(), value.into_owned());
            }
        }
        ctx
    }
}

fn append_pair(query: &mut String, encoded_key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    write!(query, "{encoded_key}={}", urlencode(value)).ok();
}

/// Percent-encode like PHP `urlencode`.
fn urlencode(s: &str) -> String {
    // form_urlencoded leaves `*` bare, urlencode does not
    form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}
