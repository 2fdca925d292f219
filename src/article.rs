// src/article.rs
// =============================================================================
// Article identifiers and reference normalization.
//
// A wiki article can be referred to in several spellings:
//   "Poké Ball", "Poké_Ball", "Pok%C3%A9_Ball", "/wiki/Poké_Ball#Usage"
// All of them name the same page. ArticleId stores the canonical title so
// that the crawler's visited set sees them as one entry.
//
// References that contain a namespace delimiter (':') point at special
// pages (Category:, File:, Help:, ...) rather than articles and are
// rejected outright.
// =============================================================================

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Path prefix MediaWiki uses for article links.
pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";

const NAMESPACE_DELIMITER: char = ':';

// Characters that cannot appear raw in a URL path segment. Spaces are
// turned into underscores before encoding, so they are not listed.
const TITLE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Canonical title of a wiki article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    /// Builds an id from a user-supplied title (e.g. a crawl seed).
    ///
    /// Returns None when nothing is left after normalization.
    pub fn new(title: &str) -> Option<Self> {
        let decoded = percent_decode_str(title).decode_utf8_lossy();
        let without_fragment = decoded.split('#').next().unwrap_or_default();
        let canonical = without_fragment
            .replace('_', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if canonical.is_empty() {
            None
        } else {
            Some(ArticleId(canonical))
        }
    }

    /// Normalizes an outbound reference found on a page.
    ///
    /// Accepts both `/wiki/Title` hrefs and bare titles. Returns None for
    /// references into another namespace and for pure in-page anchors.
    pub fn from_reference(reference: &str) -> Option<Self> {
        let title = reference.strip_prefix(ARTICLE_PATH_PREFIX).unwrap_or(reference);

        if title.contains(NAMESPACE_DELIMITER) {
            return None;
        }

        // An encoded colon (%3A) still names another namespace.
        let id = Self::new(title)?;
        if id.0.contains(NAMESPACE_DELIMITER) {
            return None;
        }

        Some(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segment for this article: spaces become underscores and
    /// URL-significant characters are percent-encoded.
    pub fn to_path_segment(&self) -> String {
        utf8_percent_encode(&self.0.replace(' ', "_"), TITLE_ENCODE_SET).to_string()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a page's raw references into article ids.
///
/// Non-article references are dropped and duplicates (after
/// normalization) are removed, keeping first-seen order.
pub fn article_links<'a>(references: impl IntoIterator<Item = &'a str>) -> Vec<ArticleId> {
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter_map(ArticleId::from_reference)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_with_anchor() {
        let id = ArticleId::from_reference("/wiki/Poké_Ball#Usage").unwrap();
        assert_eq!(id.as_str(), "Poké Ball");
    }

    #[test]
    fn test_namespace_reference_excluded() {
        assert_eq!(ArticleId::from_reference("Category:Items"), None);
        assert_eq!(ArticleId::from_reference("/wiki/File:Lugia.png"), None);
    }

    #[test]
    fn test_encoded_namespace_excluded() {
        assert_eq!(ArticleId::from_reference("/wiki/Help%3AContents"), None);
    }

    #[test]
    fn test_differently_encoded_references_are_equal() {
        let plain = ArticleId::new("Poké Ball").unwrap();
        let underscored = ArticleId::from_reference("/wiki/Poké_Ball").unwrap();
        let encoded = ArticleId::from_reference("/wiki/Pok%C3%A9_Ball").unwrap();
        assert_eq!(plain, underscored);
        assert_eq!(plain, encoded);
    }

    #[test]
    fn test_anchor_only_reference_rejected() {
        assert_eq!(ArticleId::from_reference("/wiki/#Top"), None);
        assert_eq!(ArticleId::new("  "), None);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let id = ArticleId::new("  Team__Rocket ").unwrap();
        assert_eq!(id.as_str(), "Team Rocket");
    }

    #[test]
    fn test_article_links_normalized_and_deduplicated() {
        let refs = [
            "/wiki/Poké_Ball#Usage",
            "/wiki/Category:Items",
            "/wiki/Pok%C3%A9_Ball",
            "/wiki/Lugia",
            "/wiki/#cite_note-1",
        ];
        let ids = article_links(refs);
        assert_eq!(
            ids,
            vec![ArticleId::new("Poké Ball").unwrap(), ArticleId::new("Lugia").unwrap()]
        );
    }

    #[test]
    fn test_path_segment() {
        let id = ArticleId::new("Who's That Pokémon?").unwrap();
        assert_eq!(id.to_path_segment(), "Who's_That_Pok%C3%A9mon%3F");
    }
}
