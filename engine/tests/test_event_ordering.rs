//! Tests for event ordering and future-event-set extraction
//!
//! The event loop's correctness rests on the future-event set always
//! yielding the smallest-time event next, regardless of insertion order.

use queueing_simulator_core::{Event, EventKind, FutureEventSet};

#[test]
fn test_event_orders_by_time_only() {
    let early = Event::departure(1.0, "zzz", 99);
    let late = Event::arrival(2.0, "aaa", 0, true);

    // Node id, kind, and client id play no part in the order
    assert!(early < late);
}

#[test]
fn test_extraction_is_time_sorted() {
    let mut fes = FutureEventSet::new();
    let times = [5.5, 0.25, 3.0, 1.75, 4.0, 0.5];
    for (i, &t) in times.iter().enumerate() {
        fes.insert(Event::arrival(t, "n", i as u64, true));
    }

    let mut extracted = Vec::new();
    while let Some(event) = fes.extract_min() {
        extracted.push(event.time);
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(extracted, sorted);
}

#[test]
fn test_extract_from_empty_returns_none() {
    let mut fes = FutureEventSet::new();
    assert!(fes.is_empty());
    assert!(fes.extract_min().is_none());
}

#[test]
fn test_insert_during_drain() {
    // Simulates the engine inserting follow-up events mid-loop
    let mut fes = FutureEventSet::new();
    fes.insert(Event::arrival(1.0, "a", 0, true));
    fes.insert(Event::arrival(10.0, "a", 1, true));

    let first = fes.extract_min().unwrap();
    assert_eq!(first.time, 1.0);

    // A departure scheduled after the first arrival, before the second
    fes.insert(Event::departure(2.5, "a", 0));

    assert_eq!(fes.extract_min().unwrap().kind, EventKind::Departure);
    assert_eq!(fes.extract_min().unwrap().time, 10.0);
}

#[test]
fn test_equal_times_all_extracted() {
    // Exact ties have probability zero in a real run, but the structure
    // must still return every event
    let mut fes = FutureEventSet::new();
    fes.insert(Event::arrival(1.0, "a", 0, false));
    fes.insert(Event::departure(1.0, "b", 1));
    fes.insert(Event::arrival(1.0, "c", 2, false));

    let mut count = 0;
    while let Some(event) = fes.extract_min() {
        assert_eq!(event.time, 1.0);
        count += 1;
    }
    assert_eq!(count, 3);
}
