//! Time management for the simulation
//!
//! The simulation operates in continuous time: the clock jumps from one
//! event to the next, and the gap between consecutive events is the
//! quantity integrated into the per-node area accumulators.

use serde::{Deserialize, Serialize};

/// Continuous simulation clock, advanced event by event
///
/// The clock starts at 0 and is monotonically non-decreasing. A
/// retrograde event time indicates a corrupted future-event set and is
/// treated as a fatal internal-consistency failure.
///
/// # Example
/// ```
/// use queueing_simulator_core::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.current_time(), 0.0);
///
/// let elapsed = clock.advance_to(2.5);
/// assert_eq!(elapsed, 2.5);
/// assert_eq!(clock.current_time(), 2.5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Current simulation time, same unit as the rates' reciprocal
    current_time: f64,
}

impl SimClock {
    /// Create a new clock at time 0
    pub fn new() -> Self {
        Self { current_time: 0.0 }
    }

    /// Advance the clock to an event's time, returning the elapsed gap
    ///
    /// # Panics
    /// Panics if `time` is earlier than the current clock value.
    pub fn advance_to(&mut self, time: f64) -> f64 {
        assert!(
            time >= self.current_time,
            "clock moved backwards: {} < {}",
            time,
            self.current_time
        );
        let elapsed = time - self.current_time;
        self.current_time = time;
        elapsed
    }

    /// Get the current simulation time
    pub fn current_time(&self) -> f64 {
        self.current_time
    }
}
