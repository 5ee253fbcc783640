//! Filter specification for list/count queries.
//!
//! Instead of conditionally mutating a filter document at every call
//! site, list operations build a [`TextFilter`] once and hand it to the
//! repository, which renders it to BSON only at the query boundary.

use mongodb::bson::{Document, doc};

/// Selection criteria for a collection scan.
///
/// A search term is matched as a case-insensitive substring of a single
/// field. An absent or empty search term selects every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFilter {
    /// Match all records
    NoFilter,
    /// Match records whose `field` contains `text`, ignoring case
    SubstringMatch { field: &'static str, text: String },
}

impl TextFilter {
    /// Build a filter from an optional search term.
    ///
    /// `None` and `""` both mean "no filter" - an empty search box must
    /// not turn into a match-nothing query.
    pub fn substring(field: &'static str, search: Option<String>) -> Self {
        match search {
            Some(text) if !text.is_empty() => Self::SubstringMatch { field, text },
            _ => Self::NoFilter,
        }
    }

    /// Render the filter as a MongoDB query document.
    pub fn to_document(&self) -> Document {
        match self {
            Self::NoFilter => doc! {},
            Self::SubstringMatch { field, text } => {
                let mut filter = Document::new();
                filter.insert(*field, doc! { "$regex": text, "$options": "i" });
                filter
            }
        }
    }

    /// Whether this filter selects every record.
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::NoFilter)
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::NoFilter
    }
}
