//! Events and the processed-event log.
//!
//! An [`Event`] is an immutable record of a single future occurrence: a
//! client arriving at a node, or a client finishing service there. Events
//! carry a totally-ordered scheduling key (their time) and no behavior
//! beyond that ordering.
//!
//! The [`EventLog`] records events in the order the engine processed
//! them. It enables:
//! - Determinism checks (two runs with one seed → one log)
//! - Debugging (understand what happened and when)
//! - Conservation audits (count departures per node, arrivals per client)
//!
//! # Example
//!
//! ```rust
//! use queueing_simulator_core::{Event, EventKind};
//!
//! let event = Event::arrival(0.75, "triage", 0, true);
//! assert_eq!(event.kind, EventKind::Arrival);
//! assert!(event.external_source);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What happens when an event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A client reaches a node (from outside the network or routed from
    /// another node)
    Arrival,
    /// A client completes service at a node
    Departure,
}

/// A single scheduled occurrence in the simulation.
///
/// Immutable once created. Ordered by `time` ascending; ties carry no
/// defined order beyond time (arrival times are continuous draws, so
/// exact ties have probability zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Simulated clock value at which the event fires
    pub time: f64,

    /// Arrival or departure
    pub kind: EventKind,

    /// Node the event concerns
    pub node_id: String,

    /// Globally unique client identifier
    pub client_id: u64,

    /// True only for an arrival that also represents the periodic
    /// external-generation process for its node
    pub external_source: bool,
}

impl Event {
    /// Create an arrival event
    pub fn arrival(time: f64, node_id: impl Into<String>, client_id: u64, external: bool) -> Self {
        Self {
            time,
            kind: EventKind::Arrival,
            node_id: node_id.into(),
            client_id,
            external_source: external,
        }
    }

    /// Create a departure event
    pub fn departure(time: f64, node_id: impl Into<String>, client_id: u64) -> Self {
        Self {
            time,
            kind: EventKind::Departure,
            node_id: node_id.into(),
            client_id,
            external_source: false,
        }
    }
}

// Ordering is by time only. Event times are finite by construction
// (exponential draws), so total_cmp gives a total order consistent
// across the heap.
impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.total_cmp(&other.time)
    }
}

/// Log of processed events, in processing order.
///
/// This is a simple wrapper around Vec<Event> with convenience queries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events concerning a specific node
    pub fn events_for_node(&self, node_id: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.node_id == node_id).collect()
    }

    /// Get events of a specific kind
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<&Event> {
        self.events.iter().filter(|e| e.kind == kind).collect()
    }

    /// Get events for a specific client
    pub fn events_for_client(&self, client_id: u64) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.client_id == client_id)
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_time() {
        let e1 = Event::arrival(1.0, "a", 0, true);
        let e2 = Event::arrival(2.0, "a", 1, true);

        assert!(e1 < e2);
        assert!(e2 > e1);
    }

    #[test]
    fn test_ordering_ignores_kind_and_node() {
        let dep = Event::departure(0.5, "zzz", 7);
        let arr = Event::arrival(0.5, "aaa", 3, false);

        assert_eq!(dep.cmp(&arr), Ordering::Equal);
    }

    #[test]
    fn test_event_log_queries() {
        let mut log = EventLog::new();
        log.log(Event::arrival(0.1, "reg", 0, true));
        log.log(Event::departure(0.4, "reg", 0));
        log.log(Event::arrival(0.4, "exam", 0, false));
        log.log(Event::arrival(0.6, "reg", 1, true));

        assert_eq!(log.len(), 4);
        assert_eq!(log.events_for_node("reg").len(), 3);
        assert_eq!(log.events_of_kind(EventKind::Arrival).len(), 3);
        assert_eq!(log.events_for_client(0).len(), 3);
    }

    #[test]
    fn test_event_log_clear() {
        let mut log = EventLog::new();
        log.log(Event::arrival(0.1, "reg", 0, true));
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
    }
}
