//! End-to-end tests: items in, COinS spans out, spans decoded again the way
//! a citation manager reads them.

mod common;

use std::cell::RefCell;
use std::collections::HashMap;

use coins::metadata::{FieldPath, MetadataOptions, MetadataProvider, MetadataValue};
use coins::span;
use coins::{CoinsBuilder, ContextObject, InMemoryProvider, Item, RequestContext};

use common::{create_article_item, create_full_item, create_test_request, PAGE_URL};

fn decode_single(markup: &str) -> ContextObject {
    let mut found = span::extract(markup);
    assert_eq!(found.len(), 1, "expected one span in {markup}");
    found.remove(0)
}

#[test]
fn test_full_item_has_one_entry_per_field_in_order() {
    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, create_test_request());

    let ctx = decode_single(&builder.span(&create_full_item()));
    let keys: Vec<&str> = ctx.keys().collect();
    assert_eq!(
        keys,
        [
            "ctx_ver",
            "rft_val_fmt",
            "rfr_id",
            "rft.creator",
            "rft.publisher",
            "rft.contributor",
            "rft.date",
            "rft.format",
            "rft.source",
            "rft.language",
            "rft.coverage",
            "rft.rights",
            "rft.relation",
            "rft.subject",
            "rft.title",
            "rft.description",
            "rft.type",
            "rft.identifier",
        ]
    );
    assert_eq!(ctx.first("rft.type"), Some("interview"));
    assert_eq!(ctx.first("rft.identifier"), Some(PAGE_URL));
    assert_eq!(ctx.get("rft.description"), ["Recorded at the weaver's home."]);
}

#[test]
fn test_span_markup_shape() {
    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, create_test_request());
    let markup = builder.span(&create_full_item());

    assert!(markup.starts_with(
        "<span class=\"Z3988\" title=\"ctx_ver=Z39.88-2004&amp;rft_val_fmt=info%3Aofi%2Ffmt%3Akev%3Amtx%3Adc&amp;rfr_id=info%3Asid%2Fomeka.org%3Agenerator&amp;"
    ));
    assert!(markup.ends_with(
        "rft.identifier=https%3A%2F%2Fporstua.example.org%2Fitems%2Fbrowse\"></span>"
    ));
    assert!(!markup.contains("%5B"));
}

#[test]
fn test_missing_description_renders_empty() {
    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, create_test_request());

    let mut item = create_full_item();
    item.elements
        .get_mut(&coins::ElementSet::DublinCore)
        .unwrap()
        .shift_remove("Description");

    assert_eq!(builder.span(&item), "");
}

#[test]
fn test_repeated_creators_are_plain_repeats() {
    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, create_test_request());
    let item = create_full_item()
        .with_dc("Creator", "Korhonen, Eero")
        .with_dc("Creator", "Nieminen, Pekka");

    let markup = builder.span(&item);
    assert_eq!(markup.matches("&amp;rft.creator=").count(), 3);
    assert!(!markup.contains("rft.creator%5B"));

    let ctx = decode_single(&markup);
    assert_eq!(
        ctx.get("rft.creator"),
        ["Virtanen, Aino", "Korhonen, Eero", "Nieminen, Pekka"]
    );
}

#[test]
fn test_article_reference() {
    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, create_test_request());

    let ctx = decode_single(&builder.span(&create_article_item()));
    assert_eq!(ctx.get("rft.title"), ["Kotiseudun tarinoita: Vuosikirja 1998"]);
    assert_eq!(ctx.first("rft.type"), Some("journalArticle"));
    assert_eq!(ctx.get("rft.subject"), ["YKL 90.1"]);
    assert_eq!(ctx.first("rft.pages"), Some("12-18"));
    assert_eq!(ctx.first("rft.jtitle"), Some("Kotiseutu"));
    assert_eq!(ctx.first("rft.issue"), Some("4"));
    assert_eq!(ctx.get("rft.creator"), ["Mäkinen, Liisa"]);
}

#[test]
fn test_sequence_is_concatenation_in_order() {
    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, create_test_request());
    let items = vec![
        create_article_item(),
        Item::new(3).with_dc("Title", "No description"),
        create_full_item(),
    ];

    let expected: String = items.iter().map(|item| builder.span(item)).collect();
    assert_eq!(builder.spans(&items), expected);
    assert_eq!(span::extract(&expected).len(), 2);
    assert_eq!(provider.released(), vec![2, 3, 1]);
}

#[test]
fn test_items_from_json() {
    let json = r#"[
        {
            "id": 10,
            "item_type": "Moving Image",
            "elements": {
                "Dublin Core": {
                    "Title": ["Log floating on the Kallavesi"],
                    "Description": ["16 mm film, digitized."],
                    "Date Issued": ["1951"]
                }
            }
        },
        { "id": 11, "elements": { "Dublin Core": { "Title": ["Untitled"] } } }
    ]"#;
    let items: Vec<Item> = serde_json::from_str(json).unwrap();

    let provider = InMemoryProvider::new();
    let builder = CoinsBuilder::new(&provider, create_test_request());
    let found = span::extract(&builder.spans(&items));

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first("rft.type"), Some("videoRecording"));
    assert_eq!(found[0].get("rft.date"), ["1951"]);
}

/// A host-style provider: items are numeric handles into a shared store.
#[derive(Default)]
struct HandleStore {
    texts: HashMap<(u32, FieldPath), Vec<String>>,
    types: HashMap<u32, String>,
    released: RefCell<Vec<u32>>,
}

impl MetadataProvider for HandleStore {
    type Item = u32;

    fn metadata(&self, item: &u32, path: &FieldPath, options: &MetadataOptions) -> MetadataValue {
        assert!(options.no_filter && options.no_escape);
        assert_eq!(options.snippet, Some(500));
        let values = self
            .texts
            .get(&(*item, path.clone()))
            .cloned()
            .unwrap_or_default();
        MetadataValue::from_values(values, options.all)
    }

    fn item_type_name(&self, item: &u32) -> Option<String> {
        self.types.get(item).cloned()
    }

    fn release(&self, item: &u32) {
        self.released.borrow_mut().push(*item);
    }
}

struct CurrentPage;

impl RequestContext for CurrentPage {
    fn absolute_url(&self) -> String {
        "http://localhost/items/show/42".to_string()
    }
}

#[test]
fn test_custom_provider_and_request() {
    let mut store = HandleStore::default();
    store.types.insert(42, "Sound".to_string());
    store.texts.insert(
        (42, FieldPath::dublin_core("Description")),
        vec!["Birdsong".to_string()],
    );
    store.texts.insert(
        (42, FieldPath::dublin_core("Title")),
        vec!["Dawn chorus".to_string()],
    );

    let builder = CoinsBuilder::new(&store, CurrentPage);
    let markup = builder.spans([&42, &43]);

    let ctx = decode_single(&markup);
    assert_eq!(ctx.first("rft.type"), Some("audioRecording"));
    assert_eq!(ctx.get("rft.title"), ["Dawn chorus"]);
    assert_eq!(
        ctx.first("rft.identifier"),
        Some("http://localhost/items/show/42")
    );
    assert_eq!(*store.released.borrow(), vec![42, 43]);
}
