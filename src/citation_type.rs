//! Item type classification tables.
//!
//! Catalog item types are mapped onto Zotero item types, which citation
//! managers read from `rft.type`. Article references additionally carry
//! journal details stored in item type metadata. Both mappings are plain data
//! here; [`crate::config::CoinsConfig`] starts from these tables and may
//! override them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Zotero item type written to `rft.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CitationType {
    /// Artwork or still image
    Artwork,
    /// Audio recording
    AudioRecording,
    /// Book
    Book,
    /// Generic document
    Document,
    /// Email message
    Email,
    /// Interview or oral history
    Interview,
    /// Journal or magazine article
    JournalArticle,
    /// Letter
    Letter,
    /// Manuscript
    Manuscript,
    /// Map
    Map,
    /// Thesis
    Thesis,
    /// Video recording or moving image
    VideoRecording,
    /// Web page
    Webpage,
}

impl CitationType {
    /// Zotero name of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Artwork => "artwork",
            Self::AudioRecording => "audioRecording",
            Self::Book => "book",
            Self::Document => "document",
            Self::Email => "email",
            Self::Interview => "interview",
            Self::JournalArticle => "journalArticle",
            Self::Letter => "letter",
            Self::Manuscript => "manuscript",
            Self::Map => "map",
            Self::Thesis => "thesis",
            Self::VideoRecording => "videoRecording",
            Self::Webpage => "webpage",
        }
    }
}

impl fmt::Display for CitationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog item type name -> Zotero type.
///
/// Finnish labels come from the Porstua catalog (`Linkki` = link,
/// `Kirje` = letter, `Artikkeliviite` = article reference).
pub const ITEM_TYPE_TABLE: &[(&str, CitationType)] = &[
    ("Oral History", CitationType::Interview),
    ("Moving Image", CitationType::VideoRecording),
    ("Sound", CitationType::AudioRecording),
    ("Email", CitationType::Email),
    ("Website", CitationType::Webpage),
    ("Linkki", CitationType::Webpage),
    ("Text", CitationType::Document),
    ("Document", CitationType::Document),
    ("Kirje", CitationType::Document),
    ("Artikkeliviite", CitationType::JournalArticle),
    ("Artikkeli", CitationType::JournalArticle),
];

/// Item types treated as article references.
pub const ARTICLE_REFERENCE_TYPES: &[&str] = &["Artikkeliviite", "Artikkeli"];

/// Item type metadata element holding an article's subtitle.
pub const SUBTITLE_ELEMENT: &str = "Alanimeke";

/// How an extra field is written into the context object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assignment {
    /// Append to the key's list of values
    Append,
    /// Replace the key's value
    #[default]
    Set,
}

/// Static description of an article extra field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraFieldSpec {
    /// Item type metadata element to read
    pub element: &'static str,
    /// Context object key to write
    pub key: &'static str,
    /// Text prepended to the value
    pub prefix: &'static str,
    /// Append or replace
    pub assignment: Assignment,
}

/// Extra fields read for article references.
pub const ARTICLE_EXTRA_FIELDS: &[ExtraFieldSpec] = &[
    // Finnish public library classification code
    ExtraFieldSpec {
        element: "YKL",
        key: "rft.subject",
        prefix: "YKL ",
        assignment: Assignment::Append,
    },
    ExtraFieldSpec {
        element: "Sivunumerot",
        key: "rft.pages",
        prefix: "",
        assignment: Assignment::Set,
    },
    ExtraFieldSpec {
        element: "Lehden nimi",
        key: "rft.jtitle",
        prefix: "",
        assignment: Assignment::Set,
    },
    ExtraFieldSpec {
        element: "Lehden numero",
        key: "rft.issue",
        prefix: "",
        assignment: Assignment::Set,
    },
];
