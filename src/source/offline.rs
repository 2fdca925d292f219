// src/source/offline.rs
// =============================================================================
// Reads articles from saved HTML files instead of the network.
//
// The file for an article is its title with spaces replaced by
// underscores plus ".html", the same name a browser's "Save page as" gives
// a MediaWiki page:
//   "Team Rocket" -> <dir>/Team_Rocket.html
// Characters that are not allowed in Windows file names (and path
// separators) become '-', so "AC/DC" cannot escape the directory.
//
// Useful for crawling a snapshot of a wiki and for tests that must not
// touch the network.
// =============================================================================

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ArticleExtractor, Page, PageSource};
use crate::article::ArticleId;
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extractor: ArticleExtractor,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extractor: ArticleExtractor::default(),
        }
    }

    pub fn with_extractor(dir: impl Into<PathBuf>, extractor: ArticleExtractor) -> Self {
        Self { dir: dir.into(), extractor }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the saved page for `article`.
    pub fn article_path(&self, article: &ArticleId) -> PathBuf {
        let file_name = format!("{}.html", file_stem(article.as_str()));
        self.dir.join(file_name)
    }
}

const UNSAFE_FILE_CHARS: &[char] = &[':', '<', '>', '"', '/', '\\', '|', '?', '*'];

fn file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            ' ' => '_',
            c if UNSAFE_FILE_CHARS.contains(&c) => '-',
            c => c,
        })
        .collect()
}

#[async_trait]
impl PageSource for DirectorySource {
    async fn fetch(&self, article: &ArticleId) -> Result<Page, FetchError> {
        let path = self.article_path(article);

        let html = match tokio::fs::read_to_string(&path).await {
            Ok(html) => html,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::NotFound(article.to_string()))
            }
            Err(e) => return Err(FetchError::Io { path, source: e }),
        };

        self.extractor.extract(&html, article.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_saved_page() {
        let dir = TempDir::new().unwrap();
        let html = concat!(
            r#"<div id="mw-content-text"><p>Team Rocket blasts off</p>"#,
            r#"<a href="/wiki/Jessie">Jessie</a></div>"#,
        );
        std::fs::write(dir.path().join("Team_Rocket.html"), html).unwrap();

        let source = DirectorySource::new(dir.path());
        let page = source.fetch(&ArticleId::new("Team Rocket").unwrap()).await.unwrap();
        assert_eq!(page.text, "Team Rocket blasts off Jessie");
        assert_eq!(page.links, vec!["/wiki/Jessie"]);
        assert_eq!(page.summary.as_deref(), Some("Team Rocket blasts off"));
    }

    #[test]
    fn test_article_path_is_sanitized() {
        let source = DirectorySource::new("pages");
        let path = source.article_path(&ArticleId::new("AC/DC?").unwrap());
        assert_eq!(path, Path::new("pages").join("AC-DC-.html"));
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());
        let result = source.fetch(&ArticleId::new("Missingno").unwrap()).await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }
}
