//! Request context: where the rendered page lives.
//!
//! Every span carries the absolute URL of the page it is rendered on as its
//! `rft.identifier`. The host supplies that URL through [`RequestContext`].

use url::Url;

use crate::error::{CoinsError, Result};

/// Access to the current request.
pub trait RequestContext {
    /// Canonical absolute URL of the current request.
    fn absolute_url(&self) -> String;
}

impl<R: RequestContext + ?Sized> RequestContext for &R {
    fn absolute_url(&self) -> String {
        (**self).absolute_url()
    }
}

/// A request context fixed to one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRequest {
    url: Url,
}

impl StaticRequest {
    /// Parse and validate an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoinsError::InvalidUrl`] if `url` is relative or malformed.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| CoinsError::InvalidUrl(format!("{url}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(CoinsError::InvalidUrl(format!("{url}: not a page URL")));
        }
        Ok(StaticRequest { url })
    }

    /// The validated URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl From<Url> for StaticRequest {
    fn from(url: Url) -> Self {
        StaticRequest { url }
    }
}

impl RequestContext for StaticRequest {
    fn absolute_url(&self) -> String {
        self.url.to_string()
    }
}
