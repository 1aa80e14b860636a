// src/crawl/frontier.rs
// =============================================================================
// This module owns the BFS queue and the discovered set.
//
// The one invariant everything else leans on: a title is enqueued at most
// once across the whole search. The discovered set is checked and updated
// in the same call that enqueues, so no two callers can both see "new" for
// the same title. Discovered titles are never removed; the set only grows.
//
// Rust concepts:
// - HashSet: To track discovered titles (O(1) lookup)
// - VecDeque: Double-ended queue for breadth-first ordering
// =============================================================================

use std::collections::{HashSet, VecDeque};

// The queue of discovered-but-not-yet-expanded titles
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<String>,
    discovered: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only the starting title.
    ///
    /// The start counts as discovered from the first moment, so a page
    /// linking back to it never re-enqueues it.
    pub fn seeded(start: &str) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            discovered: HashSet::new(),
        };
        frontier.discovered.insert(start.to_string());
        frontier.queue.push_back(start.to_string());
        frontier
    }

    // Enqueues a title unless it has ever been discovered before
    //
    // Returns: true if the title was newly discovered (and enqueued),
    //          false if it was already known
    //
    // HashSet::insert is the single check-and-add: it returns false when
    // the value was already present, so discovery stays idempotent.
    pub fn enqueue_if_new(&mut self, title: &str) -> bool {
        if !self.discovered.insert(title.to_string()) {
            return false;
        }

        self.queue.push_back(title.to_string());
        true
    }

    /// Removes and returns the oldest queued title, FIFO order.
    pub fn dequeue(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    // Empties the queue and returns its contents in order
    //
    // When the controller drains after fully expanding the previous level,
    // the queue holds exactly one BFS level, which is what makes the
    // engine's level counter equal the graph distance.
    pub fn drain_level(&mut self) -> Vec<String> {
        let mut level = Vec::with_capacity(self.queue.len());
        while let Some(title) = self.dequeue() {
            level.push(title);
        }
        level
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// How many titles have ever been discovered, the start included.
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is VecDeque?
//    - A double-ended queue (deck)
//    - push_back() adds to the end, pop_front() removes from the start
//    - That FIFO order is exactly what breadth-first search needs:
//      everything at distance k comes out before anything at distance k+1
//
// 2. What does HashSet::insert return?
//    - true if the value was NOT in the set (it is now)
//    - false if it was already there
//    - Using that return value makes "check and add" one operation,
//      so there is no gap where two callers both think a title is new
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_pre_discovered() {
        let mut frontier = Frontier::seeded("Kevin_Bacon");
        assert!(!frontier.enqueue_if_new("Kevin_Bacon"));
        assert_eq!(frontier.dequeue(), Some("Kevin_Bacon".to_string()));
        assert_eq!(frontier.dequeue(), None);
    }

    #[test]
    fn test_enqueue_is_idempotent() {
        let mut frontier = Frontier::seeded("A");
        assert!(frontier.enqueue_if_new("B"));
        assert!(!frontier.enqueue_if_new("B"));
        assert!(!frontier.enqueue_if_new("B"));
        assert_eq!(frontier.discovered_count(), 2);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::seeded("A");
        frontier.enqueue_if_new("B");
        frontier.enqueue_if_new("C");
        assert_eq!(frontier.dequeue(), Some("A".to_string()));
        assert_eq!(frontier.dequeue(), Some("B".to_string()));
        assert_eq!(frontier.dequeue(), Some("C".to_string()));
    }

    #[test]
    fn test_drain_level_takes_the_whole_queue() {
        let mut frontier = Frontier::seeded("A");
        frontier.enqueue_if_new("B");
        let level = frontier.drain_level();
        assert_eq!(level, vec!["A".to_string(), "B".to_string()]);
        assert!(frontier.is_empty());

        // Draining does not forget what was discovered
        assert!(!frontier.enqueue_if_new("A"));
    }
}
