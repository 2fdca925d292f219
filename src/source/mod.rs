// src/source/mod.rs
// =============================================================================
// Page sources: where article text and links come from.
//
// The crawler never looks at HTML. It asks a PageSource for an article and
// gets back plain prose plus the raw link references found in it:
//
// - WikiSource:      fetches articles over HTTP from a MediaWiki site
// - DirectorySource: reads saved article pages from a local directory
//
// Both share the HTML extraction in html.rs, which knows where a MediaWiki
// page keeps its article body and which parts of it are not prose.
// =============================================================================

mod html;
mod http;
mod offline;

use async_trait::async_trait;

use crate::article::ArticleId;
use crate::error::FetchError;

pub use html::{ArticleExtractor, DEFAULT_CONTENT_SELECTOR};
pub use http::{SourceConfig, WikiSource, DEFAULT_BASE_URL};
pub use offline::DirectorySource;

/// Text and outbound references of one article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Prose text with structural markup already removed.
    pub text: String,
    /// Raw link references (e.g. `/wiki/Poké_Ball#Usage`), deduplicated,
    /// in document order. Normalization happens in the crawler.
    pub links: Vec<String>,
    /// First paragraph of the article, if it has one with any text.
    pub summary: Option<String>,
}

/// Something that can hand out article content by id.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, article: &ArticleId) -> Result<Page, FetchError>;
}

