//! Common test helpers shared across the integration test suite.

use coins::{Item, StaticRequest};

/// Page URL used as `rft.identifier` throughout the tests.
pub const PAGE_URL: &str = "https://porstua.example.org/items/browse";

/// Request context for [`PAGE_URL`].
pub fn create_test_request() -> StaticRequest {
    StaticRequest::parse(PAGE_URL).expect("valid test URL")
}

/// An item with every plain Dublin Core element populated once.
pub fn create_full_item() -> Item {
    Item::new(1)
        .with_type("Oral History")
        .with_dc("Title", "Interview with a weaver")
        .with_dc("Creator", "Virtanen, Aino")
        .with_dc("Publisher", "Porstua")
        .with_dc("Contributor", "Korhonen, Eero")
        .with_dc("Date", "1962")
        .with_dc("Format", "audio/mpeg")
        .with_dc("Source", "Kuopio folklore archive")
        .with_dc("Language", "fi")
        .with_dc("Coverage", "Kuopio")
        .with_dc("Rights", "CC BY 4.0")
        .with_dc("Relation", "Weaving collection")
        .with_dc("Subject", "Textile crafts")
        .with_dc("Description", "Recorded at the weaver's home.")
}

/// A Finnish article reference with subtitle and journal details.
#[allow(dead_code)]
pub fn create_article_item() -> Item {
    Item::new(2)
        .with_type("Artikkeliviite")
        .with_dc("Title", "Kotiseudun tarinoita")
        .with_dc("Creator", "Mäkinen, Liisa")
        .with_dc("Description", "Artikkeli kotiseutuhistoriasta.")
        .with_type_field("Alanimeke", "Vuosikirja 1998")
        .with_type_field("YKL", "90.1")
        .with_type_field("Sivunumerot", "12-18")
        .with_type_field("Lehden nimi", "Kotiseutu")
        .with_type_field("Lehden numero", "4")
}
