#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # COinS: ContextObjects in Spans
//!
//! Render hidden `<span class="Z3988">` citation tags for catalog items, so
//! that citation managers such as Zotero can scrape bibliographic metadata
//! from a page.
//!
//! ## Quick Start
//!
//! ```ignore
//! use coins::{CoinsBuilder, InMemoryProvider, Item, StaticRequest};
//!
//! # fn main() -> Result<(), coins::CoinsError> {
//! let provider = InMemoryProvider::new();
//! let builder = CoinsBuilder::new(&provider, StaticRequest::parse("https://example.org/items")?);
//!
//! let items = vec![
//!     Item::new(1)
//!         .with_type("Oral History")
//!         .with_dc("Title", "Interview with a weaver")
//!         .with_dc("Creator", "Virtanen, Aino")
//!         .with_dc("Description", "Recorded in Kuopio."),
//! ];
//!
//! println!("{}", builder.spans(&items));
//! # Ok(())
//! # }
//! ```
//!
//! ## Plugging in a catalog
//!
//! Implement [`MetadataProvider`] for the host's item handle and
//! [`RequestContext`] for its request object. The builder only borrows items
//! and never holds on to them between calls.
//!
//! ## Modules
//!
//! - [`coins`] — Span builder (`CoinsBuilder`)
//! - [`metadata`] — Metadata provider trait, field paths and lookup options
//! - [`item`] — In-memory items and provider
//! - [`request`] — Request context trait and fixed-URL implementation
//! - [`context_object`] — OpenURL context object and query-string codec
//! - [`citation_type`] — Item type to Zotero type tables
//! - [`span`] — Span markup rendering and extraction
//! - [`config`] — Configuration
//! - [`error`] — Error types and result type

pub mod citation_type;
pub mod coins;
pub mod config;
pub mod context_object;
pub mod error;
pub mod item;
pub mod metadata;
pub mod request;
pub mod span;

pub use citation_type::{Assignment, CitationType};
pub use coins::CoinsBuilder;
pub use config::{CoinsConfig, ExtraField};
pub use context_object::{ContextObject, ContextValue};
pub use error::{CoinsError, Result};
pub use item::{InMemoryProvider, Item, ItemId};
pub use metadata::{ElementSet, FieldPath, MetadataOptions, MetadataProvider, MetadataValue};
pub use request::{RequestContext, StaticRequest};
