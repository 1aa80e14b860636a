// src/links/mod.rs
// =============================================================================
// This module answers one question: which articles does this article link to?
//
// Submodules:
// - html: parses anchors out of the rendered HTML of a page
// - api: walks the paginated link-listing API until it runs dry
//
// Both strategies sit behind the LinkSource trait so the crawler never
// knows (or cares) where its edges come from. The WikiLinkSource enum is
// the runtime switch between them, picked by a CLI flag.
//
// Rust concepts:
// - Traits: A capability interface the crawler is generic over
// - impl Trait in return position: async methods inside a trait
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod api;
mod html;

// Re-export public items from submodules
pub use api::ApiLinkSource;
pub use html::HtmlLinkSource;

use crate::fetch::{FetchError, WikiClient};
use clap::ValueEnum;
use std::future::Future;
use thiserror::Error;

// Represents the ways link discovery for a single title can fail
//
// Fetch and Parse are recoverable: the crawler logs them and treats the
// title as a dead end. Continuation means the paginated API stopped making
// progress, which also only aborts that one title's expansion.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Network or HTTP failure while fetching links for a title
    #[error("fetch failed for '{title}': {source}")]
    Fetch {
        title: String,
        #[source]
        source: FetchError,
    },

    /// The response arrived but did not have the shape we expect
    #[error("unexpected response shape for '{title}': {reason}")]
    Parse { title: String, reason: String },

    /// The paginated fetch loop failed to terminate
    #[error("pagination for '{title}' stopped making progress")]
    Continuation { title: String },
}

// The capability interface for link discovery
//
// links_of returns every article title the given article links to,
// in the order the source reports them. Duplicates are allowed; the
// crawler's discovered set takes care of them.
pub trait LinkSource {
    fn links_of(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<String>, LinkError>> + Send;
}

/// Which link-source strategy to use, selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Parse article links out of the rendered HTML
    Html,
    /// Query the paginated link-listing API
    Api,
}

impl Strategy {
    /// Builds the link source for this strategy on top of a client.
    pub fn into_source(self, client: WikiClient) -> WikiLinkSource {
        match self {
            Strategy::Html => WikiLinkSource::Html(HtmlLinkSource::new(client)),
            Strategy::Api => WikiLinkSource::Api(ApiLinkSource::new(client)),
        }
    }
}

// Runtime dispatch between the two strategies
//
// An enum (rather than a Box<dyn ...>) keeps the crawler free of dynamic
// dispatch and works with async trait methods.
#[derive(Debug)]
pub enum WikiLinkSource {
    Html(HtmlLinkSource),
    Api(ApiLinkSource),
}

impl LinkSource for WikiLinkSource {
    async fn links_of(&self, title: &str) -> Result<Vec<String>, LinkError> {
        match self {
            WikiLinkSource::Html(source) => source.links_of(title).await,
            WikiLinkSource::Api(source) => source.links_of(title).await,
        }
    }
}
