//! In-memory catalog items.
//!
//! [`Item`] holds element texts grouped by element set, in insertion order,
//! and [`InMemoryProvider`] answers metadata lookups against it. Together they
//! stand in for a host catalog in the command-line front end and in tests.
//!
//! Items deserialize from JSON of the form:
//!
//! ```json
//! {
//!   "id": 7,
//!   "item_type": "Artikkeliviite",
//!   "elements": {
//!     "Dublin Core": { "Title": ["Kotiseutu"], "Description": ["..."] },
//!     "Item Type Metadata": { "Alanimeke": ["Vuosikirja"] }
//!   }
//! }
//! ```

use std::cell::RefCell;

use indexmap::IndexMap;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

use crate::metadata::{
    snippet, ElementSet, FieldPath, MetadataOptions, MetadataProvider, MetadataValue,
};

/// Catalog identifier of an item.
pub type ItemId = u64;

/// A catalog item with its element texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog identifier
    pub id: ItemId,
    /// Item type name, e.g. `Sound` or `Artikkeliviite`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Element set -> element name -> texts, preserves insertion order
    #[serde(default)]
    pub elements: IndexMap<ElementSet, IndexMap<String, Vec<String>>>,
}

impl Item {
    /// Create an empty item with no type.
    #[must_use]
    pub fn new(id: ItemId) -> Self {
        Item {
            id,
            ..Default::default()
        }
    }

    /// Set the item type name.
    #[must_use]
    pub fn with_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Append a Dublin Core text.
    #[must_use]
    pub fn with_dc(mut self, element: &str, value: impl Into<String>) -> Self {
        self.add_value(&FieldPath::dublin_core(element), value);
        self
    }

    /// Append an item type metadata text.
    #[must_use]
    pub fn with_type_field(mut self, element: &str, value: impl Into<String>) -> Self {
        self.add_value(&FieldPath::item_type(element), value);
        self
    }

    /// Append a text at `path`.
    pub fn add_value(&mut self, path: &FieldPath, value: impl Into<String>) {
        self.elements
            .entry(path.set)
            .or_default()
            .entry(path.element.clone())
            .or_default()
            .push(value.into());
    }

    /// All texts at `path`, in insertion order.
    #[must_use]
    pub fn values(&self, path: &FieldPath) -> &[String] {
        self.elements
            .get(&path.set)
            .and_then(|elements| elements.get(&path.element))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Metadata provider over [`Item`] values.
///
/// Snippet lookups return plain text: tags are stripped before truncation
/// (see [`snippet`]). Records every released item id so callers can observe the release
/// signal sent after each item of a sequence.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    released: RefCell<Vec<ItemId>>,
}

impl InMemoryProvider {
    /// Create a provider with an empty release log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids released so far, in release order.
    #[must_use]
    pub fn released(&self) -> Vec<ItemId> {
        self.released.borrow().clone()
    }
}

impl MetadataProvider for InMemoryProvider {
    type Item = Item;

    fn metadata(&self, item: &Item, path: &FieldPath, options: &MetadataOptions) -> MetadataValue {
        let values = item
            .values(path)
            .iter()
            .map(|text| {
                let text = match options.snippet {
                    Some(max) => snippet(text, max),
                    None => text.as_str().into(),
                };
                if options.no_escape {
                    text.into_owned()
                } else {
                    escape(&text).into_owned()
                }
            })
            .collect();
        MetadataValue::from_values(values, options.all)
    }

    fn item_type_name(&self, item: &Item) -> Option<String> {
        item.item_type.clone()
    }

    fn release(&self, item: &Item) {
        tracing::trace!(item = item.id, "released item");
        self.released.borrow_mut().push(item.id);
    }
}
