use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Mapping from license id to its record, ordered by id.
pub type LicenseMap = BTreeMap<String, License>;

/// One license entry extracted from the list page.
///
/// A record may receive several contributions when its anchor appears in more
/// than one grouping (or when several anchors fold into one id via the split
/// table); [`License::merge`] defines how those contributions combine.
#[derive(Debug, Clone, Serialize)]
pub struct License {
    /// Display name, taken from the first contributing anchor's text.
    pub name: String,
    /// Classification keywords, kept sorted and deduplicated.
    pub tags: BTreeSet<String>,
    /// Page fragment URI plus any resolved hyperlink targets, in contribution order.
    pub uris: Vec<String>,
    /// External identifiers keyed by scheme (e.g. `spdx`), attached once at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<BTreeMap<String, Vec<String>>>,
}

impl License {
    /// Fold a repeat contribution into an existing record: the grouping's tags
    /// are unioned in (tag overrides apply only to the first contribution) and
    /// unseen URIs are appended. `name` and `identifiers` keep their original
    /// values.
    pub fn merge(&mut self, group_tags: &[&str], uris: &[String]) {
        for tag in group_tags {
            self.tags.insert((*tag).to_string());
        }
        for uri in uris {
            if !self.uris.contains(uri) {
                self.uris.push(uri.clone());
            }
        }
    }
}
