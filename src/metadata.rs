//! Metadata lookup against a host catalog.
//!
//! The span builder never talks to a catalog directly. It asks a
//! [`MetadataProvider`] for element texts by [`FieldPath`], passing
//! [`MetadataOptions`] that mirror the host's lookup switches (filtering,
//! escaping, snippet truncation, first vs. all values).
//!
//! # Examples
//!
//! ```ignore
//! use coins::metadata::{FieldPath, MetadataOptions, MetadataProvider};
//!
//! let path = FieldPath::dublin_core("Creator");
//! let creators = provider
//!     .metadata(&item, &path, &MetadataOptions::raw(500).all())
//!     .into_values();
//! ```

use std::borrow::Cow;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Appended to text cut short by [`snippet`].
pub const SNIPPET_ELLIPSIS: &str = "…";

lazy_static! {
    /// Any HTML tag, opening or closing.
    static ref TAGS: Regex = Regex::new(r"<[^>]*>").expect("valid regex");
}

/// The element set a metadata element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementSet {
    /// The 15 Dublin Core elements plus refinements such as `Date Issued`.
    #[serde(rename = "Dublin Core")]
    DublinCore,
    /// Elements defined by the item's type (e.g. `Alanimeke` for articles).
    #[serde(rename = "Item Type Metadata")]
    ItemTypeMetadata,
}

impl ElementSet {
    /// Display name used by the host catalog.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DublinCore => "Dublin Core",
            Self::ItemTypeMetadata => "Item Type Metadata",
        }
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Address of a metadata element: element set plus element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    /// Element set the element belongs to
    pub set: ElementSet,
    /// Element name within the set, e.g. `Title` or `Lehden nimi`
    pub element: String,
}

impl FieldPath {
    /// Create a path for an arbitrary element set.
    #[must_use]
    pub fn new(set: ElementSet, element: impl Into<String>) -> Self {
        FieldPath {
            set,
            element: element.into(),
        }
    }

    /// Path to a Dublin Core element.
    #[must_use]
    pub fn dublin_core(element: impl Into<String>) -> Self {
        Self::new(ElementSet::DublinCore, element)
    }

    /// Path to an item type metadata element.
    #[must_use]
    pub fn item_type(element: impl Into<String>) -> Self {
        Self::new(ElementSet::ItemTypeMetadata, element)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.set, self.element)
    }
}

/// Lookup switches passed along with every metadata request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MetadataOptions {
    /// Skip the host's display filters.
    pub no_filter: bool,
    /// Return text without HTML escaping.
    pub no_escape: bool,
    /// Truncate each text to this many characters.
    pub snippet: Option<usize>,
    /// Return every value instead of only the first.
    pub all: bool,
}

impl MetadataOptions {
    /// Unfiltered, unescaped lookup truncated to `snippet` characters,
    /// returning the first value only.
    #[must_use]
    pub const fn raw(snippet: usize) -> Self {
        MetadataOptions {
            no_filter: true,
            no_escape: true,
            snippet: Some(snippet),
            all: false,
        }
    }

    /// Same options, returning all values.
    #[must_use]
    pub const fn all(mut self) -> Self {
        self.all = true;
        self
    }
}

/// Result of a metadata lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetadataValue {
    /// The element has no text on this item
    #[default]
    Absent,
    /// First value only (lookup without `all`)
    Single(String),
    /// Every value in catalog order (lookup with `all`)
    Many(Vec<String>),
}

impl MetadataValue {
    /// Shape `values` according to the `all` switch.
    #[must_use]
    pub fn from_values(values: Vec<String>, all: bool) -> Self {
        if all {
            return MetadataValue::Many(values);
        }
        match values.into_iter().next() {
            Some(value) => MetadataValue::Single(value),
            None => MetadataValue::Absent,
        }
    }

    /// True when the lookup produced nothing.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            MetadataValue::Absent => true,
            MetadataValue::Single(_) => false,
            MetadataValue::Many(values) => values.is_empty(),
        }
    }

    /// First value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            MetadataValue::Absent => None,
            MetadataValue::Single(value) => Some(value),
            MetadataValue::Many(values) => values.first().map(String::as_str),
        }
    }

    /// Consume into the first value, if any.
    #[must_use]
    pub fn into_first(self) -> Option<String> {
        match self {
            MetadataValue::Absent => None,
            MetadataValue::Single(value) => Some(value),
            MetadataValue::Many(values) => values.into_iter().next(),
        }
    }

    /// Consume into all values (empty when absent).
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        match self {
            MetadataValue::Absent => Vec::new(),
            MetadataValue::Single(value) => vec![value],
            MetadataValue::Many(values) => values,
        }
    }
}

/// Metadata lookup capability supplied by the host catalog.
///
/// `Item` is the host's record handle. The builder only borrows it for the
/// duration of one render call.
pub trait MetadataProvider {
    /// Host record handle
    type Item: ?Sized;

    /// Look up element texts for `item` at `path`.
    fn metadata(
        &self,
        item: &Self::Item,
        path: &FieldPath,
        options: &MetadataOptions,
    ) -> MetadataValue;

    /// Name of the item's type (e.g. `Oral History`), if it has one.
    fn item_type_name(&self, item: &Self::Item) -> Option<String>;

    /// Signal that the builder is done with `item` and the host may reclaim it.
    fn release(&self, _item: &Self::Item) {}
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    type Item = P::Item;

    fn metadata(
        &self,
        item: &Self::Item,
        path: &FieldPath,
        options: &MetadataOptions,
    ) -> MetadataValue {
        (**self).metadata(item, path, options)
    }

    fn item_type_name(&self, item: &Self::Item) -> Option<String> {
        (**self).item_type_name(item)
    }

    fn release(&self, item: &Self::Item) {
        (**self).release(item);
    }
}

/// Reduce `text` to plain text of at most `max_chars` characters.
///
/// HTML tags are removed first, so formatted element texts such as
/// `<p>Hello <em>world</em></p>` count and read as `Hello world`. Entities
/// are left as they are. Truncated text is cut back to the last word
/// boundary and gets [`SNIPPET_ELLIPSIS`] appended. Tag-free text that
/// already fits is borrowed as is.
#[must_use]
pub fn snippet(text: &str, max_chars: usize) -> Cow<'_, str> {
    let plain = TAGS.replace_all(text, "");
    let Some((cut, _)) = plain.char_indices().nth(max_chars) else {
        return plain;
    };

    let head = &plain[..cut];
    let head = match head.rfind(char::is_whitespace) {
        Some(boundary) if boundary > 0 => &head[..boundary],
        _ => head,
    };
    Cow::Owned(format!("{}{SNIPPET_ELLIPSIS}", head.trim_end()))
}
