//! Configuration options for COinS generation.
//!
//! [`CoinsConfig::default()`] produces spans exactly as the Porstua catalog
//! does: Omeka referrer id, the eleven plain Dublin Core elements, Finnish
//! article reference handling. Every table can be overridden from JSON.
//!
//! # Examples
//!
//! ```ignore
//! use coins::config::CoinsConfig;
//!
//! let config = CoinsConfig::from_json(r#"{ "rfr_id": "info:sid/example.org:catalog" }"#)?;
//! assert_eq!(config.snippet_length, 500);
//! # Ok::<(), coins::CoinsError>(())
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::citation_type::{
    Assignment, CitationType, ARTICLE_EXTRA_FIELDS, ARTICLE_REFERENCE_TYPES, ITEM_TYPE_TABLE,
    SUBTITLE_ELEMENT,
};
use crate::error::{CoinsError, Result};

/// Dublin Core elements copied without special handling, in output order.
pub const PLAIN_DUBLIN_CORE_ELEMENTS: &[&str] = &[
    "Creator",
    "Publisher",
    "Contributor",
    "Date",
    "Format",
    "Source",
    "Language",
    "Coverage",
    "Rights",
    "Relation",
    "Subject",
];

/// An item type metadata element copied into the context object for
/// article references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraField {
    /// Item type metadata element to read
    pub element: String,
    /// Context object key to write, e.g. `rft.jtitle`
    pub key: String,
    /// Text prepended to the value
    #[serde(default)]
    pub prefix: String,
    /// Append to or replace the key's value
    #[serde(default)]
    pub mode: Assignment,
}

/// Configuration for COinS generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinsConfig {
    // === Context constants ===
    /// OpenURL context object version (`ctx_ver`)
    pub ctx_ver: String,
    /// Referent metadata format (`rft_val_fmt`)
    pub rft_val_fmt: String,
    /// Referrer id (`rfr_id`)
    pub rfr_id: String,

    // === Element lookup ===
    /// Dublin Core elements copied to `rft.<lowercased name>`, in order.
    pub dublin_core_elements: Vec<String>,
    /// Maximum characters per element text.
    pub snippet_length: usize,

    // === Titles ===
    /// Stand-in for an empty title.
    pub unknown_title: String,
    /// Joins title and subtitle.
    pub subtitle_separator: String,

    // === Item types ===
    /// Catalog item type name -> Zotero type. Unlisted names pass through verbatim.
    pub item_types: IndexMap<String, CitationType>,
    /// Item types that get subtitle and extra field handling.
    pub article_types: Vec<String>,
    /// Item type metadata element holding the subtitle.
    pub subtitle_element: String,
    /// Extra fields read for article types.
    pub article_fields: Vec<ExtraField>,
}

impl Default for CoinsConfig {
    fn default() -> Self {
        Self {
            ctx_ver: "Z39.88-2004".to_string(),
            rft_val_fmt: "info:ofi/fmt:kev:mtx:dc".to_string(),
            rfr_id: "info:sid/omeka.org:generator".to_string(),
            dublin_core_elements: PLAIN_DUBLIN_CORE_ELEMENTS
                .iter()
                .map(ToString::to_string)
                .collect(),
            snippet_length: 500,
            unknown_title: "[unknown title]".to_string(),
            subtitle_separator: ": ".to_string(),
            item_types: ITEM_TYPE_TABLE
                .iter()
                .map(|(name, citation_type)| ((*name).to_string(), *citation_type))
                .collect(),
            article_types: ARTICLE_REFERENCE_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            subtitle_element: SUBTITLE_ELEMENT.to_string(),
            article_fields: ARTICLE_EXTRA_FIELDS
                .iter()
                .map(|spec| ExtraField {
                    element: spec.element.to_string(),
                    key: spec.key.to_string(),
                    prefix: spec.prefix.to_string(),
                    mode: spec.assignment,
                })
                .collect(),
        }
    }
}

impl CoinsConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CoinsError::Json`] for malformed JSON and
    /// [`CoinsError::InvalidConfig`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CoinsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CoinsError::Io`] if the file cannot be read, otherwise as
    /// [`CoinsConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that the configuration can produce well-formed spans.
    ///
    /// # Errors
    ///
    /// Returns [`CoinsError::InvalidConfig`] naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("ctx_ver", &self.ctx_ver),
            ("rft_val_fmt", &self.rft_val_fmt),
            ("rfr_id", &self.rfr_id),
        ] {
            if value.is_empty() {
                return Err(CoinsError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        if self.snippet_length == 0 {
            return Err(CoinsError::InvalidConfig(
                "snippet_length must be at least 1".to_string(),
            ));
        }
        if self.dublin_core_elements.iter().any(String::is_empty) {
            return Err(CoinsError::InvalidConfig(
                "dublin_core_elements must not contain empty names".to_string(),
            ));
        }
        for field in &self.article_fields {
            if field.element.is_empty() || field.key.is_empty() {
                return Err(CoinsError::InvalidConfig(format!(
                    "article field needs element and key: {field:?}"
                )));
            }
        }
        Ok(())
    }

    /// True if `item_type` gets article reference handling.
    #[must_use]
    pub fn is_article(&self, item_type: &str) -> bool {
        self.article_types.iter().any(|t| t == item_type)
    }

    /// Zotero type configured for `item_type`.
    #[must_use]
    pub fn citation_type(&self, item_type: &str) -> Option<CitationType> {
        self.item_types.get(item_type).copied()
    }
}
