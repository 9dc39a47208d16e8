//! Future-Event Set
//!
//! Priority structure holding not-yet-processed events, ordered ascending
//! by time. The engine pops the minimum-time event, advances the clock to
//! it, and processes it; new events produced along the way are inserted
//! back, including events scheduled beyond the horizon (the engine
//! discards those at extraction time, since pre-filtering would require
//! look-ahead the inserter does not have).

use crate::models::event::Event;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-ordered set of pending events
///
/// `insert` and `extract_min` are both O(log n). Extraction order among
/// events with exactly equal times is unspecified (and immaterial: event
/// times are continuous random draws).
///
/// # Example
/// ```
/// use queueing_simulator_core::{Event, FutureEventSet};
///
/// let mut fes = FutureEventSet::new();
/// fes.insert(Event::arrival(2.0, "b", 1, true));
/// fes.insert(Event::arrival(1.0, "a", 0, true));
///
/// let first = fes.extract_min().unwrap();
/// assert_eq!(first.time, 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FutureEventSet {
    heap: BinaryHeap<Reverse<Event>>,
}

impl FutureEventSet {
    /// Create an empty future-event set
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Insert a pending event
    pub fn insert(&mut self, event: Event) {
        self.heap.push(Reverse(event));
    }

    /// Remove and return the event with the smallest time
    pub fn extract_min(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(event)| event)
    }

    /// True if no events remain
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_time_order() {
        let mut fes = FutureEventSet::new();
        fes.insert(Event::arrival(3.0, "c", 2, true));
        fes.insert(Event::arrival(1.0, "a", 0, true));
        fes.insert(Event::departure(2.0, "b", 1));

        assert_eq!(fes.len(), 3);
        assert_eq!(fes.extract_min().unwrap().time, 1.0);
        assert_eq!(fes.extract_min().unwrap().time, 2.0);
        assert_eq!(fes.extract_min().unwrap().time, 3.0);
        assert!(fes.extract_min().is_none());
        assert!(fes.is_empty());
    }

    #[test]
    fn test_interleaved_insert_extract() {
        let mut fes = FutureEventSet::new();
        fes.insert(Event::arrival(5.0, "a", 0, true));
        fes.insert(Event::arrival(1.0, "a", 1, true));

        assert_eq!(fes.extract_min().unwrap().time, 1.0);

        // An event earlier than the remaining one still comes out first
        fes.insert(Event::arrival(2.0, "a", 2, true));
        assert_eq!(fes.extract_min().unwrap().time, 2.0);
        assert_eq!(fes.extract_min().unwrap().time, 5.0);
    }

    #[test]
    fn test_beyond_horizon_events_are_insertable() {
        let mut fes = FutureEventSet::new();
        fes.insert(Event::arrival(1.0e12, "a", 0, true));
        assert_eq!(fes.len(), 1);
    }
}
