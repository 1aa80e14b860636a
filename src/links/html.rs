// src/links/html.rs
// =============================================================================
// This module extracts article links from the rendered HTML of a page.
//
// Wikipedia's REST HTML endpoint renders intra-wiki links as relative
// paths: <a href="./Kevin_Bacon">. That prefix is what separates real
// article-to-article edges from everything else on the page; interwiki,
// external, file and category links all start differently, so filtering
// on the prefix is the whole game.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Rust concepts:
// - Iterators: For walking the selected anchors
// - Cow<str>: urlencoding::decode only allocates when it has to
// =============================================================================

use scraper::{Html, Selector};

use super::{LinkError, LinkSource};
use crate::fetch::WikiClient;

/// The rendered HTML links to other articles by relative paths to their title.
pub const ARTICLE_LINK_PREFIX: &str = "./";

// Link discovery backed by the rendered-HTML endpoint
#[derive(Debug)]
pub struct HtmlLinkSource {
    client: WikiClient,
}

impl HtmlLinkSource {
    pub fn new(client: WikiClient) -> Self {
        Self { client }
    }
}

impl LinkSource for HtmlLinkSource {
    async fn links_of(&self, title: &str) -> Result<Vec<String>, LinkError> {
        let html = self
            .client
            .fetch_document(title)
            .await
            .map_err(|source| LinkError::Fetch {
                title: title.to_string(),
                source,
            })?;

        Ok(linked_titles_in_html(&html))
    }
}

// Extracts linked article titles from an HTML document
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<String> of titles, in document order, duplicates included
//
// Example:
//   html = r#"<a href="./Kevin_Bacon">Kevin Bacon</a>"#
//   result = ["Kevin_Bacon"]
pub fn linked_titles_in_html(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selector is a constant and known
    // to be valid. Generally avoid unwrap() on user input!
    let selector = Selector::parse("a[href]").unwrap();

    let mut titles = Vec::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            // Only hrefs carrying the intra-wiki prefix are article edges
            if let Some(rest) = href.strip_prefix(ARTICLE_LINK_PREFIX) {
                if let Some(title) = title_from_path(rest) {
                    titles.push(title);
                }
            }
        }
    }

    titles
}

// Turns the path remainder of an intra-wiki href into an article title
//
// Drops any #fragment (a link into a section still targets the same
// article) and percent-decodes the rest.
//
// Examples:
//   "Kevin_Bacon"            -> Some("Kevin_Bacon")
//   "Kevin_Bacon#Early_life" -> Some("Kevin_Bacon")
//   "Caf%C3%A9"              -> Some("Café")
fn title_from_path(raw: &str) -> Option<String> {
    let raw = raw.split_once('#').map_or(raw, |(path, _fragment)| path);

    if raw.is_empty() {
        // "./#section" is a self-link, not an edge
        return None;
    }

    match urlencoding::decode(raw) {
        Ok(decoded) => Some(decoded.into_owned()),
        // Percent sequences that decode to invalid UTF-8: keep the raw form,
        // equality on titles is exact string match anyway
        Err(_) => Some(raw.to_string()),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like querySelector)
//    - "a[href]" means "all <a> tags that have an href attribute"
//
// 2. Why strip_prefix instead of starts_with?
//    - strip_prefix checks AND removes the prefix in one step
//    - It returns Option<&str>: Some(rest) on a match, None otherwise
//    - That pairs naturally with if let
//
// 3. What is Cow<str>?
//    - urlencoding::decode returns Cow<str> ("clone on write")
//    - If nothing needed decoding, it's a borrow: no allocation
//    - into_owned() turns either case into a String
//
// 4. Why keep duplicates?
//    - A page often links the same article several times
//    - The crawler's discovered set already makes discovery idempotent,
//      so deduplicating here would be wasted work
// -----------------------------------------------------------------------------
