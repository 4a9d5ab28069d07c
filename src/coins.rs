//! COinS span construction for catalog items.
//!
//! [`CoinsBuilder`] reads an item's Dublin Core and item type metadata
//! through a [`MetadataProvider`], assembles the OpenURL [`ContextObject`],
//! and renders it as a hidden `Z3988` span that citation managers such as
//! Zotero pick up from the page.
//!
//! Missing metadata never fails a render. Absent elements are left out of
//! the context object; an item without a description renders as an empty
//! string.
//!
//! # Examples
//!
//! ```ignore
//! use coins::{CoinsBuilder, InMemoryProvider, Item, StaticRequest};
//!
//! let provider = InMemoryProvider::new();
//! let request = StaticRequest::parse("https://example.org/items/show/7")?;
//! let builder = CoinsBuilder::new(&provider, request);
//!
//! let item = Item::new(7)
//!     .with_type("Sound")
//!     .with_dc("Title", "Harvest songs")
//!     .with_dc("Description", "Field recording, 1962.");
//!
//! let span = builder.span(&item);
//! assert!(span.starts_with("<span class=\"Z3988\""));
//! # Ok::<(), coins::CoinsError>(())
//! ```

use tracing::{debug, trace};

use crate::citation_type::Assignment;
use crate::config::CoinsConfig;
use crate::context_object::ContextObject;
use crate::metadata::{FieldPath, MetadataOptions, MetadataProvider};
use crate::request::RequestContext;
use crate::span;

/// Dublin Core element read for `rft.title`.
pub const TITLE_ELEMENT: &str = "Title";
/// Dublin Core element read for `rft.description`.
pub const DESCRIPTION_ELEMENT: &str = "Description";
/// Dublin Core element used when an item has no item type.
pub const TYPE_ELEMENT: &str = "Type";
/// Dublin Core refinement appended to `rft.date`.
pub const DATE_ISSUED_ELEMENT: &str = "Date Issued";

/// Builds COinS spans for items of one catalog.
#[derive(Debug, Clone)]
pub struct CoinsBuilder<P, R> {
    provider: P,
    request: R,
    config: CoinsConfig,
}

impl<P, R> CoinsBuilder<P, R>
where
    P: MetadataProvider,
    R: RequestContext,
{
    /// Create a builder with the default configuration.
    #[must_use]
    pub fn new(provider: P, request: R) -> Self {
        CoinsBuilder {
            provider,
            request,
            config: CoinsConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: CoinsConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &CoinsConfig {
        &self.config
    }

    /// The metadata provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Render the span for one item.
    ///
    /// Returns an empty string if the item has no description. The item is
    /// not released.
    #[must_use]
    pub fn span(&self, item: &P::Item) -> String {
        match self.context_object(item) {
            Some(ctx) => {
                let markup = span::render(&ctx);
                trace!(keys = ctx.len(), "rendered COinS span");
                markup
            },
            None => String::new(),
        }
    }

    /// Render spans for a sequence of items, concatenated in input order.
    ///
    /// Each item is released back to the provider once its span is built.
    pub fn spans<'i, I>(&self, items: I) -> String
    where
        I: IntoIterator<Item = &'i P::Item>,
        P::Item: 'i,
    {
        let mut coins = String::new();
        for item in items {
            coins.push_str(&self.span(item));
            self.provider.release(item);
        }
        coins
    }

    /// Assemble the citation context object for `item`.
    ///
    /// Returns `None` when the item has no description.
    #[must_use]
    pub fn context_object(&self, item: &P::Item) -> Option<ContextObject> {
        let config = &self.config;
        let mut ctx = ContextObject::new();

        ctx.set("ctx_ver", config.ctx_ver.as_str());
        ctx.set("rft_val_fmt", config.rft_val_fmt.as_str());
        ctx.set("rfr_id", config.rfr_id.as_str());

        for element in &config.dublin_core_elements {
            let key = format!("rft.{}", element.to_lowercase());
            for value in self.dublin_core_all(item, element) {
                ctx.push(key.as_str(), value);
            }
        }

        let item_type = self
            .provider
            .item_type_name(item)
            .filter(|name| !name.is_empty());
        let is_article = item_type
            .as_deref()
            .is_some_and(|name| config.is_article(name));

        let subtitle = if is_article {
            self.item_type_field(item, &config.subtitle_element)
        } else {
            None
        };
        self.add_titles(&mut ctx, item, subtitle.as_deref());

        let Some(description) = self.dublin_core_first(item, DESCRIPTION_ELEMENT) else {
            debug!("item has no description, skipping COinS");
            return None;
        };
        ctx.set("rft.description", description);

        let citation_type = match item_type.as_deref() {
            Some(name) => Some(
                config
                    .citation_type(name)
                    .map_or_else(|| name.to_string(), |t| t.as_str().to_string()),
            ),
            None => self.dublin_core_first(item, TYPE_ELEMENT),
        };
        if let Some(citation_type) = citation_type {
            ctx.set("rft.type", citation_type);
        }

        for date in self.dublin_core_all(item, DATE_ISSUED_ELEMENT) {
            ctx.push("rft.date", date);
        }

        if is_article {
            self.add_article_fields(&mut ctx, item);
        }

        ctx.set("rft.identifier", self.request.absolute_url());

        Some(ctx)
    }

    fn add_titles(&self, ctx: &mut ContextObject, item: &P::Item, subtitle: Option<&str>) {
        for title in self.dublin_core_all(item, TITLE_ELEMENT) {
            let title = if title.trim().is_empty() {
                self.config.unknown_title.clone()
            } else {
                title
            };
            match subtitle {
                Some(subtitle) => ctx.push(
                    "rft.title",
                    format!("{title}{}{subtitle}", self.config.subtitle_separator),
                ),
                None => ctx.push("rft.title", title),
            }
        }
    }

    fn add_article_fields(&self, ctx: &mut ContextObject, item: &P::Item) {
        for field in &self.config.article_fields {
            let Some(value) = self.item_type_field(item, &field.element) else {
                continue;
            };
            let value = format!("{}{value}", field.prefix);
            match field.mode {
                Assignment::Append => ctx.push(field.key.as_str(), value),
                Assignment::Set => ctx.set(field.key.as_str(), value),
            }
        }
    }

    fn options(&self) -> MetadataOptions {
        MetadataOptions::raw(self.config.snippet_length)
    }

    fn dublin_core_all(&self, item: &P::Item, element: &str) -> Vec<String> {
        self.provider
            .metadata(item, &FieldPath::dublin_core(element), &self.options().all())
            .into_values()
    }

    fn dublin_core_first(&self, item: &P::Item, element: &str) -> Option<String> {
        self.provider
            .metadata(item, &FieldPath::dublin_core(element), &self.options())
            .into_first()
    }

    /// First non-empty item type metadata text.
    fn item_type_field(&self, item: &P::Item, element: &str) -> Option<String> {
        self.provider
            .metadata(item, &FieldPath::item_type(element), &self.options())
            .into_first()
            .filter(|value| !value.is_empty())
    }
}
