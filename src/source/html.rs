// src/source/html.rs
// =============================================================================
// Pulls article prose and article links out of a MediaWiki HTML page.
//
// MediaWiki puts the article body in <div id="mw-content-text">. Inside it
// we walk the DOM and:
// - collect text nodes (joined with spaces, so "a<b>b</b>" stays two words)
// - collect href values of <a> tags that point at /wiki/ articles
// - skip <script>, <style>, <table> and <noscript> subtrees entirely,
//   including any links inside them (infobox and navbox tables would
//   otherwise dominate the counts)
// - keep the first non-empty <p> as the article summary
//
// We use the `scraper` crate for parsing and CSS selectors.
// =============================================================================

use std::collections::HashSet;

use scraper::{ElementRef, Html, Node, Selector};

use super::Page;
use crate::article::ARTICLE_PATH_PREFIX;
use crate::error::{ConfigError, FetchError};

/// CSS selector of the MediaWiki article body.
pub const DEFAULT_CONTENT_SELECTOR: &str = "div#mw-content-text";

// Subtrees that are markup or boilerplate rather than prose.
const SKIPPED_TAGS: [&str; 4] = ["script", "style", "table", "noscript"];

/// Extracts a Page from article HTML.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    container: Selector,
    paragraph: Selector,
}

impl ArticleExtractor {
    /// Creates an extractor for a custom content container selector.
    pub fn new(container_selector: &str) -> Result<Self, ConfigError> {
        let container =
            Selector::parse(container_selector).map_err(|e| ConfigError::InvalidSelector {
                selector: container_selector.to_string(),
                reason: format!("{:?}", e),
            })?;
        Ok(Self {
            container,
            ..Self::default()
        })
    }

    /// Extracts prose and article links from `html`.
    ///
    /// `label` names the page in the error if it has no content container.
    pub fn extract(&self, html: &str, label: &str) -> Result<Page, FetchError> {
        let document = Html::parse_document(html);

        let content = document
            .select(&self.container)
            .next()
            .ok_or_else(|| FetchError::EmptyContent(label.to_string()))?;

        let mut collector = Collector::default();
        collector.walk(content);

        Ok(Page {
            text: collector.text.join(" "),
            links: collector.links,
            summary: self.summary(content),
        })
    }

    // First paragraph with any prose in it, skipped subtrees excluded.
    fn summary(&self, content: ElementRef<'_>) -> Option<String> {
        content.select(&self.paragraph).find_map(|p| {
            let mut collector = Collector::default();
            collector.walk(p);
            let text = collector.text.join(" ");
            (!text.is_empty()).then_some(text)
        })
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self {
            container: Selector::parse(DEFAULT_CONTENT_SELECTOR).unwrap(),
            paragraph: Selector::parse("p").unwrap(),
        }
    }
}

#[derive(Default)]
struct Collector {
    text: Vec<String>,
    links: Vec<String>,
    seen_links: HashSet<String>,
}

impl Collector {
    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        self.text.push(trimmed.to_string());
                    }
                }
                Node::Element(el) => {
                    if SKIPPED_TAGS.contains(&el.name()) {
                        continue;
                    }

                    if el.name() == "a" {
                        if let Some(href) = el.attr("href") {
                            self.push_link(href);
                        }
                    }

                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.walk(child_element);
                    }
                }
                _ => {}
            }
        }
    }

    // Only same-wiki article paths are kept; external URLs, edit links
    // (/w/index.php?...) and bare anchors are not articles.
    fn push_link(&mut self, href: &str) {
        if !href.starts_with(ARTICLE_PATH_PREFIX) {
            return;
        }
        if self.seen_links.insert(href.to_string()) {
            self.links.push(href.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r##"
        <html><body>
          <div id="siteNotice">Donate now</div>
          <div id="mw-content-text">
            <p>Lugia is a <b>Legendary</b> Pokémon. See <a
               href="/wiki/Poké_Ball#Usage">Poké Balls</a>.</p>
            <table><tr><td>Infobox</td><td><a href="/wiki/Ho-Oh">Ho-Oh</a></td></tr></table>
            <script>var x = 1;</script>
            <style>.a { color: red }</style>
            <p><a href="/wiki/Category:Items">Items</a> <a href="https://example.com">Out</a>
               <a href="/wiki/Poké_Ball#Usage">again</a> <a href="#cite">[1]</a></p>
          </div>
        </body></html>
    "##;

    #[test]
    fn test_extracts_prose_only() {
        let page = ArticleExtractor::default().extract(ARTICLE, "Lugia").unwrap();
        assert!(page.text.contains("Lugia is a Legendary Pokémon"));
        assert!(!page.text.contains("Infobox"));
        assert!(!page.text.contains("var x"));
        assert!(!page.text.contains("color"));
        assert!(!page.text.contains("Donate"));
    }

    #[test]
    fn test_extracts_article_links_deduplicated() {
        let page = ArticleExtractor::default().extract(ARTICLE, "Lugia").unwrap();
        // Table links are dropped with the table; namespace filtering is
        // left to ArticleId::from_reference.
        assert_eq!(page.links, vec!["/wiki/Poké_Ball#Usage", "/wiki/Category:Items"]);
    }

    #[test]
    fn test_missing_container_is_empty_content() {
        let html = "<html><body><p>Hi</p></body></html>";
        let result = ArticleExtractor::default().extract(html, "Nope");
        assert!(matches!(result, Err(FetchError::EmptyContent(_))));
    }

    #[test]
    fn test_custom_selector() {
        let extractor = ArticleExtractor::new("main").unwrap();
        let page = extractor.extract("<main><p>Hello there</p></main>", "X").unwrap();
        assert_eq!(page.text, "Hello there");
    }

    #[test]
    fn test_summary_is_first_paragraph() {
        let page = ArticleExtractor::default().extract(ARTICLE, "Lugia").unwrap();
        assert_eq!(
            page.summary.as_deref(),
            Some("Lugia is a Legendary Pokémon. See Poké Balls .")
        );
    }

    #[test]
    fn test_summary_skips_empty_paragraphs() {
        let html = r#"<div id="mw-content-text"><p>  </p><p><script>x</script></p>
            <p>Ho-Oh is a <i>Legendary</i> Pokémon.</p></div>"#;
        let page = ArticleExtractor::default().extract(html, "Ho-Oh").unwrap();
        assert_eq!(page.summary.as_deref(), Some("Ho-Oh is a Legendary Pokémon."));
    }

    #[test]
    fn test_no_paragraphs_means_no_summary() {
        let html = r#"<div id="mw-content-text">Just text</div>"#;
        let page = ArticleExtractor::default().extract(html, "X").unwrap();
        assert_eq!(page.text, "Just text");
        assert_eq!(page.summary, None);
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(
            ArticleExtractor::new("div[[["),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }
}
