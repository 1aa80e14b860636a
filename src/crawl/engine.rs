// src/crawl/engine.rs
// =============================================================================
// This module drives the search: a level-by-level breadth-first crawl from
// the start article toward the target article.
//
// How it works:
// 1. Seed the frontier with the start title
// 2. Drain one full BFS level from the frontier
// 3. Fetch the links of every title in that level, a few pages at a time
// 4. Record parent edges, enqueue newly discovered titles, watch for the
//    target
// 5. Repeat until the target shows up or the frontier runs dry
//
// Processing whole levels (instead of one title at a time) buys two things:
// the level counter always equals the graph distance to the titles being
// expanded, and the fetches inside a level can run concurrently without
// risking a wrong hop count. The level boundary is a hard barrier: nothing
// from level k+1 is fetched until all of level k has been expanded.
//
// A page that fails to fetch or parse is a dead end, not a fatal error.
// One bad page must never sink a whole search.
//
// Rust concepts:
// - Generics: The crawler works over any LinkSource implementation
// - Streams: buffer_unordered() bounds how many fetches are in flight
// =============================================================================

use futures::stream::{self, StreamExt};

use super::frontier::Frontier;
use super::parents::{ParentTracker, Tracking};
use super::path::{rebuild_path, SearchError};
use crate::links::{LinkError, LinkSource};

/// The article every search is trying to reach, unless told otherwise.
pub const KEVIN_BACON_TITLE: &str = "Kevin_Bacon";

// How many link fetches may be in flight at once within a level.
// Wikipedia is a shared resource; a handful of parallel requests is a big
// speedup already, hundreds would just get us rate-limited.
const CONCURRENT_FETCHES: usize = 8;

// One search: the controller plus all the per-search state it owns
//
// Everything (frontier, discovered set, parent relation) lives inside a
// single call to run(), so separate searches never share mutable state and
// can run concurrently from, say, two server requests.
#[derive(Debug)]
pub struct Crawler<S> {
    source: S,
    target: String,
    tracking: Tracking,
}

impl<S: LinkSource> Crawler<S> {
    pub fn new(source: S, target: &str, tracking: Tracking) -> Self {
        Self {
            source,
            target: target.to_string(),
            tracking,
        }
    }

    // Searches for the target and reports the hop count
    //
    // Returns: Some(hops) when the target was found, None when the frontier
    // emptied without reaching it (the target is unreachable)
    pub async fn min_hops(&self, start: &str) -> Option<usize> {
        self.run(start).await.map(|(hops, _tracker)| hops)
    }

    // Searches for the target and reports the full path
    //
    // Returns: Ok(Some(path)) with start first and target last,
    // Ok(None) when the target is unreachable, and Err only when the
    // recorded parent relation is inconsistent (an engine bug, not a
    // property of the graph)
    pub async fn find_path(&self, start: &str) -> Result<Option<Vec<String>>, SearchError> {
        match self.run(start).await {
            None => Ok(None),
            Some((_hops, tracker)) => {
                let path = rebuild_path(&tracker, start, &self.target)?;
                Ok(Some(path))
            }
        }
    }

    // The BFS loop shared by both modes
    //
    // Returns the level the target was found at, together with the parent
    // relation recorded up to that point; None when the search exhausted
    // the frontier.
    async fn run(&self, start: &str) -> Option<(usize, ParentTracker)> {
        let mut tracker = ParentTracker::new(self.tracking, start);

        // Starting on the target is a zero-hop result; no network needed
        if start == self.target {
            return Some((0, tracker));
        }

        let mut frontier = Frontier::seeded(start);
        let mut level = 0;
        let mut expanded_pages = 0;

        while !frontier.is_empty() {
            level += 1;
            let batch = frontier.drain_level();

            println!(
                "  Expanding level {} ({} page(s), {} title(s) discovered so far)",
                level,
                batch.len(),
                frontier.discovered_count()
            );

            // Fan the level's fetches out, a bounded number at a time.
            // Results come back in completion order, which is fine: they
            // all belong to the same level.
            let source = &self.source;
            let fetches = batch.into_iter().map(|title| async move {
                let links = source.links_of(&title).await;
                (title, links)
            });
            let results: Vec<(String, Result<Vec<String>, LinkError>)> = stream::iter(fetches)
                .buffer_unordered(CONCURRENT_FETCHES)
                .collect()
                .await;

            // The barrier is behind us: apply every result sequentially,
            // so the discovered set and parent relation have one writer
            let mut found = false;
            for (parent, links) in results {
                expanded_pages += 1;

                let links = match links {
                    Ok(links) => links,
                    Err(error) => {
                        // Dead end: log it and move on
                        eprintln!("  Warning: skipping '{}': {}", parent, error);
                        continue;
                    }
                };

                for link in links {
                    tracker.record_edge(&link, &parent);

                    if link == self.target {
                        // Keep applying this level's already-fetched
                        // results: with multi-parent tracking they may
                        // hold more same-level parents of the target
                        found = true;
                    } else {
                        frontier.enqueue_if_new(&link);
                    }
                }
            }

            if found {
                println!("  Found after expanding {} page(s)", expanded_pages);
                return Some((level, tracker));
            }
        }

        println!("  Exhausted after expanding {} page(s)", expanded_pages);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // An in-memory link source over a fixed graph. Titles missing from the
    // graph fail to fetch, which lets tests exercise the dead-end path.
    struct StubSource {
        graph: HashMap<&'static str, Vec<&'static str>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn new(edges: &[(&'static str, &[&'static str])]) -> Self {
            let mut graph = HashMap::new();
            for (from, to) in edges {
                graph.insert(*from, to.to_vec());
            }
            Self {
                graph,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn fetched_titles(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl LinkSource for &StubSource {
        async fn links_of(&self, title: &str) -> Result<Vec<String>, LinkError> {
            self.calls.lock().unwrap().push(title.to_string());
            match self.graph.get(title) {
                Some(links) => Ok(links.iter().map(|link| link.to_string()).collect()),
                None => Err(LinkError::Fetch {
                    title: title.to_string(),
                    source: FetchError::Status {
                        url: format!("stub://{}", title),
                        status: reqwest::StatusCode::NOT_FOUND,
                    },
                }),
            }
        }
    }

    fn crawler(source: &StubSource, tracking: Tracking) -> Crawler<&StubSource> {
        Crawler::new(source, KEVIN_BACON_TITLE, tracking)
    }

    #[tokio::test]
    async fn test_start_equals_target_makes_no_network_calls() {
        let source = StubSource::new(&[]);
        let crawler = crawler(&source, Tracking::Single);

        let path = crawler.find_path(KEVIN_BACON_TITLE).await.unwrap();
        assert_eq!(path, Some(vec![KEVIN_BACON_TITLE.to_string()]));
        assert!(source.fetched_titles().is_empty());

        let hops = crawler.min_hops(KEVIN_BACON_TITLE).await;
        assert_eq!(hops, Some(0));
        assert!(source.fetched_titles().is_empty());
    }

    #[tokio::test]
    async fn test_one_hop() {
        let source = StubSource::new(&[(
            "Footloose_(1984_film)",
            &["Herbert_Ross", "Kevin_Bacon", "Kenny_Loggins"][..],
        )]);
        let crawler = crawler(&source, Tracking::Single);

        let path = crawler.find_path("Footloose_(1984_film)").await.unwrap();
        assert_eq!(
            path,
            Some(vec![
                "Footloose_(1984_film)".to_string(),
                KEVIN_BACON_TITLE.to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn test_hop_count_equals_graph_distance() {
        // Two routes to the target: one of length 2 and one of length 3.
        // Level batching must report 2, never 3.
        let source = StubSource::new(&[
            ("Amanda_Clayton", &["Katey_Sagal", "City_on_a_Hill"][..]),
            ("Katey_Sagal", &["Kyra_Sedgwick"][..]),
            ("Kyra_Sedgwick", &["Kevin_Bacon"][..]),
            ("City_on_a_Hill", &["Kevin_Bacon"][..]),
        ]);
        let crawler = crawler(&source, Tracking::Single);

        assert_eq!(crawler.min_hops("Amanda_Clayton").await, Some(2));

        let path = crawler.find_path("Amanda_Clayton").await.unwrap().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], "Amanda_Clayton");
        assert_eq!(path[2], KEVIN_BACON_TITLE);
    }

    #[tokio::test]
    async fn test_every_page_is_expanded_at_most_once() {
        // A diamond: "Shared" is discovered through both level-1 titles
        // but must be fetched exactly once
        let source = StubSource::new(&[
            ("Start", &["Left", "Right"][..]),
            ("Left", &["Shared"][..]),
            ("Right", &["Shared"][..]),
            ("Shared", &["Kevin_Bacon"][..]),
        ]);
        let crawler = crawler(&source, Tracking::Single);

        let path = crawler.find_path("Start").await.unwrap().unwrap();
        assert_eq!(path.len(), 4);

        let mut fetched = source.fetched_titles();
        fetched.sort();
        fetched.dedup();
        assert_eq!(fetched.len(), source.fetched_titles().len());
    }

    #[tokio::test]
    async fn test_failed_fetch_is_a_dead_end_not_an_abort() {
        // "Broken" has no entry in the stub graph, so fetching it fails.
        // The search must still reach the target through "City_on_a_Hill".
        let source = StubSource::new(&[
            ("Start", &["Broken", "City_on_a_Hill"][..]),
            ("City_on_a_Hill", &["Kevin_Bacon"][..]),
        ]);
        let crawler = crawler(&source, Tracking::Single);

        let path = crawler.find_path("Start").await.unwrap().unwrap();
        assert_eq!(
            path,
            vec!["Start", "City_on_a_Hill", KEVIN_BACON_TITLE]
        );
    }

    #[tokio::test]
    async fn test_unreachable_target_returns_none() {
        let source = StubSource::new(&[
            ("Island", &["Islet"][..]),
            ("Islet", &[][..]),
        ]);
        let crawler = crawler(&source, Tracking::Single);

        assert_eq!(crawler.find_path("Island").await.unwrap(), None);
        assert_eq!(crawler.min_hops("Island").await, None);
    }

    #[tokio::test]
    async fn test_multi_parent_path_is_still_shortest() {
        // Two equal-length routes; multi-parent tracking records both and
        // reconstruction must come back with one of the two-hop chains
        let source = StubSource::new(&[
            ("Start", &["Via_A", "Via_B"][..]),
            ("Via_A", &["Kevin_Bacon"][..]),
            ("Via_B", &["Kevin_Bacon"][..]),
        ]);
        let crawler = crawler(&source, Tracking::Multi);

        let path = crawler.find_path("Start").await.unwrap().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], "Start");
        assert!(path[1] == "Via_A" || path[1] == "Via_B");
        assert_eq!(path[2], KEVIN_BACON_TITLE);

        assert_eq!(crawler.min_hops("Start").await, Some(2));
    }

    #[tokio::test]
    async fn test_links_back_to_start_are_ignored() {
        // Pages linking back to the start (very common on Wikipedia)
        // must not re-enqueue it or distort the path
        let source = StubSource::new(&[
            ("Start", &["Middle"][..]),
            ("Middle", &["Start", "Kevin_Bacon"][..]),
        ]);
        let crawler = crawler(&source, Tracking::Single);

        let path = crawler.find_path("Start").await.unwrap().unwrap();
        assert_eq!(path, vec!["Start", "Middle", KEVIN_BACON_TITLE]);

        let fetched = source.fetched_titles();
        assert_eq!(
            fetched.iter().filter(|title| *title == "Start").count(),
            1
        );
    }
}
