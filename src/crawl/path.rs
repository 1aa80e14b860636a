// src/crawl/path.rs
// =============================================================================
// This module turns the recorded parent relation into an ordered path from
// the start title to the target title.
//
// Single-parent tracking makes this a straight walk: follow the one parent
// from the target until the start appears, then reverse.
//
// Multi-parent tracking branches: every title can have several parents, so
// we explore every chain and keep a shortest one. A memo table holding each
// title's best-known chain keeps shared suffixes from being recomputed,
// which on link-dense graphs is the difference between linear work and
// exponential blowup.
//
// A title with no recorded parent before the start is reached means the
// engine broke its own invariants. That is an internal error the caller
// must see, never a silent empty result.
// =============================================================================

use std::collections::HashMap;
use thiserror::Error;

use super::parents::{ParentTracker, Tracking};

// Represents a broken engine invariant discovered during reconstruction
#[derive(Debug, Error)]
pub enum SearchError {
    /// A title on the path has no recorded parent (and is not the start)
    #[error("no recorded parent for '{0}' while rebuilding the path")]
    MissingParent(String),
}

// Rebuilds the start-to-target path from the parent relation
//
// Parameters:
//   tracker: the parent relation recorded during the crawl
//   start: the title the search began at
//   target: the title the search found
//
// Returns: the path as a Vec, start first, target last
pub fn rebuild_path(
    tracker: &ParentTracker,
    start: &str,
    target: &str,
) -> Result<Vec<String>, SearchError> {
    if start == target {
        return Ok(vec![start.to_string()]);
    }

    match tracker.tracking() {
        Tracking::Single => single_parent_path(tracker, start, target),
        Tracking::Multi => shortest_multi_parent_path(tracker, start, target),
    }
}

// Follows the single recorded parent backwards, then reverses
fn single_parent_path(
    tracker: &ParentTracker,
    start: &str,
    target: &str,
) -> Result<Vec<String>, SearchError> {
    let mut current = target.to_string();
    let mut path = vec![current.clone()];

    while current != start {
        let parent = tracker
            .parents_of(&current)
            .and_then(|parents| parents.first())
            .ok_or_else(|| SearchError::MissingParent(current.clone()))?;

        current = parent.clone();
        path.push(current.clone());
    }

    path.reverse();
    Ok(path)
}

// Explores every parent chain and keeps a shortest one
fn shortest_multi_parent_path(
    tracker: &ParentTracker,
    start: &str,
    target: &str,
) -> Result<Vec<String>, SearchError> {
    let mut memo: HashMap<String, Vec<String>> = HashMap::new();
    best_chain(tracker, start, target, &mut memo)
}

// The best-known chain from `start` to `title`, inclusive on both ends
//
// Recursion is safe here: parent edges always point one BFS level up, so
// the parent relation is a DAG and every branch shortens toward the start.
fn best_chain(
    tracker: &ParentTracker,
    start: &str,
    title: &str,
    memo: &mut HashMap<String, Vec<String>>,
) -> Result<Vec<String>, SearchError> {
    if title == start {
        return Ok(vec![start.to_string()]);
    }

    if let Some(chain) = memo.get(title) {
        return Ok(chain.clone());
    }

    let parents = tracker
        .parents_of(title)
        .filter(|parents| !parents.is_empty())
        .ok_or_else(|| SearchError::MissingParent(title.to_string()))?;

    let mut best: Option<Vec<String>> = None;
    for parent in parents {
        let mut chain = best_chain(tracker, start, parent, memo)?;
        chain.push(title.to_string());

        // Strictly shorter wins; ties keep the first chain found, so the
        // earliest-recorded parent decides between equal-length paths
        if best.as_ref().map_or(true, |known| chain.len() < known.len()) {
            best = Some(chain);
        }
    }

    // parents is non-empty, so the loop produced at least one chain
    let best = best.ok_or_else(|| SearchError::MissingParent(title.to_string()))?;
    memo.insert(title.to_string(), best.clone());
    Ok(best)
}
