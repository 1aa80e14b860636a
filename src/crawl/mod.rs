// src/crawl/mod.rs
// =============================================================================
// This module is the search engine: a breadth-first crawl over the
// article-link graph, stopping at the target article.
//
// Submodules:
// - frontier: the BFS queue plus the discovered set
// - parents: who discovered whom, for rebuilding the path afterwards
// - path: walks the parent relation backwards into an ordered path
// - engine: the controller gluing it all together, level by level
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod engine;
mod frontier;
mod parents;
mod path;

// Re-export public items from submodules
pub use engine::{Crawler, KEVIN_BACON_TITLE};
pub use parents::Tracking;
