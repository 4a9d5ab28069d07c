//! COinS span markup.
//!
//! [`render`] turns a [`ContextObject`] into
//! `<span class="Z3988" title="..."></span>`, and [`extract`] reads such
//! spans back out of an HTML fragment the way a citation manager scraping
//! the page would.

use lazy_static::lazy_static;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::context_object::ContextObject;

/// Class attribute marking a COinS span.
pub const COINS_CLASS: &str = "Z3988";

lazy_static! {
    /// Percent-encoded `[n]` suffix left by indexed list keys.
    static ref ENCODED_INDEX: Regex = Regex::new(r"%5B[0-9]+%5D").expect("valid regex");
}

/// Render the span for `ctx`.
#[must_use]
pub fn render(ctx: &ContextObject) -> String {
    let query = strip_array_indices(&ctx.to_query_string());
    format!(
        "<span class=\"{COINS_CLASS}\" title=\"{}\"></span>",
        escape(&query)
    )
}

/// Remove `%5B<n>%5D` index suffixes from the keys of an encoded query string.
///
/// Values are left untouched, so a title containing a literal `[1]` survives.
#[must_use]
pub fn strip_array_indices(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => format!("{}={value}", ENCODED_INDEX.replace_all(key, "")),
            None => ENCODED_INDEX.replace_all(pair, "").into_owned(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode every COinS span in an HTML fragment, in document order.
///
/// The fragment is read leniently: void elements such as `<br>` or `<img>`
/// and mismatched end tags are tolerated. Malformed markup is skipped and
/// reading resumes after it; parsing only gives up if it stops advancing.
#[must_use]
pub fn extract(html: &str) -> Vec<ContextObject> {
    let mut reader = Reader::from_str(html);
    reader.check_end_names(false);
    let mut found = Vec::new();
    let mut last_error_at = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                if let Some(title) = coins_title(e) {
                    found.push(ContextObject::from_query_string(&title));
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                let position = reader.buffer_position();
                if last_error_at == Some(position) {
                    tracing::debug!(error = %e, position, "stopped reading COinS spans");
                    break;
                }
                tracing::debug!(error = %e, position, "skipping malformed markup");
                last_error_at = Some(position);
            },
            Ok(_) => {},
        }
    }

    found
}

fn coins_title(element: &BytesStart<'_>) -> Option<String> {
    if element.name().as_ref() != b"span" {
        return None;
    }

    let mut is_coins = false;
    let mut title = None;
    for attr in element.attributes().flatten() {
        match attr.key.as_ref() {
            b"class" => {
                is_coins = attr
                    .unescape_value()
                    .is_ok_and(|class| class.split_whitespace().any(|c| c == COINS_CLASS));
            },
            b"title" => title = attr.unescape_value().ok().map(|t| t.into_owned()),
            _ => {},
        }
    }

    if is_coins {
        title
    } else {
        None
    }
}
