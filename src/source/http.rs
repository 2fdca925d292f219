// src/source/http.rs
// =============================================================================
// Fetches wiki articles over HTTP.
//
// An article title becomes a URL by replacing spaces with underscores,
// percent-encoding what needs it, and appending it to the wiki's article
// base URL:
//   "Team Rocket" -> https://bulbapedia.bulbagarden.net/wiki/Team_Rocket
//
// Responses are classified into FetchError variants (404 -> NotFound,
// other non-2xx -> Status, transport errors -> Timeout / Network) so the
// crawler can log why an article was skipped.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use super::{ArticleExtractor, Page, PageSource};
use crate::article::ArticleId;
use crate::error::{ConfigError, FetchError};

/// Article base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://bulbapedia.bulbagarden.net/wiki/";

/// HTTP settings for the wiki page source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL that article paths are appended to. Must end with '/'.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 10,
            user_agent: concat!("wiki-wordfreq/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Page source backed by a live MediaWiki site.
#[derive(Debug, Clone)]
pub struct WikiSource {
    client: Client,
    base_url: Url,
    timeout: u64,
    extractor: ArticleExtractor,
}

impl WikiSource {
    pub fn new(config: &SourceConfig) -> Result<Self, ConfigError> {
        Self::with_extractor(config, ArticleExtractor::default())
    }

    pub fn with_extractor(
        config: &SourceConfig,
        extractor: ArticleExtractor,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
            extractor,
        })
    }

    /// Full URL of an article.
    pub fn article_url(&self, article: &ArticleId) -> Result<Url, FetchError> {
        // "./" keeps a title like "Category:Items" from parsing as a scheme.
        self.base_url
            .join(&format!("./{}", article.to_path_segment()))
            .map_err(|e| {
                FetchError::Malformed(format!("cannot build URL for '{}': {}", article, e))
            })
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::from(error)
        }
    }
}

#[async_trait]
impl PageSource for WikiSource {
    async fn fetch(&self, article: &ArticleId) -> Result<Page, FetchError> {
        let url = self.article_url(article)?;

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(article.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| self.classify(e))?;
        self.extractor.extract(&html, article.as_str())
    }
}

// Url::join drops the last path segment of a base without a trailing
// slash ("https://x/wiki" + "A" = "https://x/A"), so one is added.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }

    Ok(url)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why build one Client per source?
//    - reqwest::Client holds a connection pool; reusing it across the whole
//      crawl keeps connections to the wiki alive between articles
//    - Client is cheap to clone, so WikiSource can be cloned too
//
// 2. Why not retry?
//    - A failed article is skipped and the crawl moves on; retrying would
//      hammer a wiki that is already struggling
// -----------------------------------------------------------------------------
