// src/links/api.rs
// =============================================================================
// This module extracts article links through the wiki's Action API.
//
// One request rarely tells the whole story: the API caps how many links it
// returns per response and hands back a `continue` object when more remain.
// Every key in that object must be echoed into the next request, over and
// over, until the server stops sending one. Dropping the token silently
// truncates the link set, which is the single worst bug this module can
// have, so the loop below treats the token with great suspicion: a token
// that repeats, or a loop that runs past a hard cap, aborts the title.
//
// The API also returns links from every namespace (talk pages, categories,
// templates, ...). Only namespace 0, the main content namespace, holds real
// articles, so everything else is filtered out.
//
// Rust concepts:
// - serde derive: Deserialize the JSON response into plain structs
// - BTreeMap: Keeps continuation parameters in a stable order
// =============================================================================

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use super::{LinkError, LinkSource};
use crate::fetch::{FetchError, WikiClient};

/// The namespace holding actual encyclopedia articles.
const MAIN_NAMESPACE: u32 = 0;

// A well-behaved listing for one page finishes in a handful of rounds.
// Hitting this cap means the continuation token is leading us in circles.
const MAX_CONTINUATION_ROUNDS: usize = 500;

// Link discovery backed by the paginated Action API
#[derive(Debug)]
pub struct ApiLinkSource {
    client: WikiClient,
}

// The slice of the Action API response we care about.
//
// A full response looks like:
//   {
//     "continue": { "plcontinue": "4547|0|Foo", "continue": "||" },
//     "query": { "pages": { "4547": { "links": [ {"ns": 0, "title": "Foo"} ] } } }
//   }
#[derive(Debug, Deserialize)]
struct LinksResponse {
    query: Option<Query>,
    // `continue` is a Rust keyword, so the field needs a rename
    #[serde(rename = "continue")]
    continuation: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct Query {
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    // Missing for pages with no outbound links (and for missing pages)
    links: Option<Vec<PageLink>>,
}

#[derive(Debug, Deserialize)]
struct PageLink {
    ns: u32,
    title: String,
}

impl ApiLinkSource {
    pub fn new(client: WikiClient) -> Self {
        Self { client }
    }

    // Builds the query parameters for one round
    //
    // The base parameters are the same every round; the continuation
    // entries from the previous response are merged on top.
    fn round_params(title: &str, continuation: Option<&BTreeMap<String, String>>) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("action".to_string(), "query".to_string()),
            ("format".to_string(), "json".to_string()),
            ("titles".to_string(), title.to_string()),
            ("prop".to_string(), "links".to_string()),
            ("pllimit".to_string(), "max".to_string()),
        ];

        if let Some(continuation) = continuation {
            for (key, value) in continuation {
                params.push((key.clone(), value.clone()));
            }
        }

        params
    }
}

impl LinkSource for ApiLinkSource {
    async fn links_of(&self, title: &str) -> Result<Vec<String>, LinkError> {
        let mut titles = Vec::new();
        let mut continuation: Option<BTreeMap<String, String>> = None;

        for _round in 0..MAX_CONTINUATION_ROUNDS {
            let params = Self::round_params(title, continuation.as_ref());

            let response: LinksResponse =
                self.client
                    .fetch_json(&params)
                    .await
                    .map_err(|error| match error {
                        // The body arrived but wasn't the shape we asked for
                        FetchError::Decode { .. } => LinkError::Parse {
                            title: title.to_string(),
                            reason: error.to_string(),
                        },
                        other => LinkError::Fetch {
                            title: title.to_string(),
                            source: other,
                        },
                    })?;

            let query = response.query.ok_or_else(|| LinkError::Parse {
                title: title.to_string(),
                reason: "response has no `query` object".to_string(),
            })?;

            // The response keys pages by page id; for a single-title query
            // there is exactly one, but iterating is simpler than assuming
            for page in query.pages.values() {
                for link in page.links.iter().flatten() {
                    if link.ns == MAIN_NAMESPACE {
                        titles.push(link.title.clone());
                    }
                }
            }

            match response.continuation {
                // No token left: every page has been merged
                None => return Ok(titles),
                Some(next) => {
                    if continuation.as_ref() == Some(&next) {
                        // Echoing this token back would fetch the same page forever
                        return Err(LinkError::Continuation {
                            title: title.to_string(),
                        });
                    }
                    continuation = Some(next);
                }
            }
        }

        Err(LinkError::Continuation {
            title: title.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::DEFAULT_CONTACT;
    use mockito::Matcher;

    // The exact query string of a first-round request (no continuation)
    const FIRST_ROUND_QUERY: &str = "action=query&format=json&titles=Herbert_Ross&prop=links&pllimit=max";

    async fn source_for(server: &mockito::Server) -> ApiLinkSource {
        let client = WikiClient::with_base(&server.url(), DEFAULT_CONTACT).unwrap();
        ApiLinkSource::new(client)
    }

    #[tokio::test]
    async fn test_single_page_of_links() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_body(
                r#"{
                    "query": { "pages": { "1" : { "links": [
                        {"ns": 0, "title": "Ginetta_GT5_Challenge"},
                        {"ns": 0, "title": "Gran_Turismo_5"}
                    ]}}}
                }"#,
            )
            .create_async()
            .await;

        let source = source_for(&server).await;
        let titles = source.links_of("GT5").await.unwrap();
        assert_eq!(titles, vec!["Ginetta_GT5_Challenge", "Gran_Turismo_5"]);
    }

    #[tokio::test]
    async fn test_filters_out_non_article_namespaces() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_body(
                r#"{
                    "query": { "pages": { "1" : { "links": [
                        {"ns": 1, "title": "Talk:Kevin_Bacon"},
                        {"ns": 0, "title": "Footloose_(1984_film)"},
                        {"ns": 14, "title": "Category:American_actors"},
                        {"ns": 10, "title": "Template:Infobox_person"}
                    ]}}}
                }"#,
            )
            .create_async()
            .await;

        let source = source_for(&server).await;
        let titles = source.links_of("Kevin_Bacon").await.unwrap();
        assert_eq!(titles, vec!["Footloose_(1984_film)"]);
    }

    #[tokio::test]
    async fn test_follows_continuation_across_pages() {
        let mut server = mockito::Server::new_async().await;

        // First round: no continuation parameters yet. Matching the full
        // query string exactly keeps this mock from swallowing round two.
        let first = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Exact(FIRST_ROUND_QUERY.to_string()))
            .with_body(
                r#"{
                    "continue": { "plcontinue": "10|0|Kyra_Sedgwick", "continue": "||" },
                    "query": { "pages": { "10" : { "links": [
                        {"ns": 0, "title": "Footloose_(1984_film)"}
                    ]}}}
                }"#,
            )
            .create_async()
            .await;

        // Second round: the request must echo the continuation token back
        let second = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::UrlEncoded(
                "plcontinue".to_string(),
                "10|0|Kyra_Sedgwick".to_string(),
            ))
            .with_body(
                r#"{
                    "query": { "pages": { "10" : { "links": [
                        {"ns": 0, "title": "Kevin_Bacon"}
                    ]}}}
                }"#,
            )
            .create_async()
            .await;

        let source = source_for(&server).await;
        let titles = source.links_of("Herbert_Ross").await.unwrap();

        // The union of both pages, in arrival order
        assert_eq!(titles, vec!["Footloose_(1984_film)", "Kevin_Bacon"]);
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_stuck_continuation_token_is_an_error() {
        let mut server = mockito::Server::new_async().await;

        let _first = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Exact(FIRST_ROUND_QUERY.to_string()))
            .with_body(
                r#"{
                    "continue": { "plcontinue": "10|0|Stuck", "continue": "||" },
                    "query": { "pages": { "10" : { "links": [] } } }
                }"#,
            )
            .create_async()
            .await;

        // The server keeps answering with the same token it was given
        let _stuck = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::UrlEncoded(
                "plcontinue".to_string(),
                "10|0|Stuck".to_string(),
            ))
            .with_body(
                r#"{
                    "continue": { "plcontinue": "10|0|Stuck", "continue": "||" },
                    "query": { "pages": { "10" : { "links": [] } } }
                }"#,
            )
            .create_async()
            .await;

        let source = source_for(&server).await;
        let result = source.links_of("Herbert_Ross").await;
        assert!(matches!(result, Err(LinkError::Continuation { .. })));
    }

    #[tokio::test]
    async fn test_missing_query_object_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_body(r#"{"batchcomplete": ""}"#)
            .create_async()
            .await;

        let source = source_for(&server).await;
        let result = source.links_of("Kevin_Bacon").await;
        assert!(matches!(result, Err(LinkError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_http_failure_is_a_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        let _down = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let source = source_for(&server).await;
        let result = source.links_of("Kevin_Bacon").await;
        assert!(matches!(result, Err(LinkError::Fetch { .. })));
    }
}
