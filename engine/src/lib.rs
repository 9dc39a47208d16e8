//! Queueing Network Simulator Core - Rust Engine
//!
//! Discrete-event simulator of an open queueing network with
//! deterministic execution: a set of service stations ("nodes"), each
//! with parallel servers and an unbounded FIFO queue, connected by
//! probabilistic routing.
//!
//! # Architecture
//!
//! - **core**: Continuous simulation clock
//! - **models**: Domain types (Event, Node, SimulationState, FutureEventSet)
//! - **orchestrator**: Main event loop (arrivals, departures, routing)
//! - **metrics**: Pure reduction of final state to queueing metrics
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (one seeded stream per run)
//! 2. Area accumulators are exact step-function integrals, advanced with
//!    pre-event occupancy on every event, for every node
//! 3. Wait queues are FIFO; `busy_servers` never exceeds `server_count`

// Module declarations
pub mod core;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use crate::core::clock::SimClock;
pub use metrics::NodeMetrics;
pub use models::{
    event::{Event, EventKind, EventLog},
    future_events::FutureEventSet,
    node::{Node, NodeError, QueueEntry},
    state::SimulationState,
};
pub use orchestrator::{
    NodeConfig, Orchestrator, RunSummary, SimulationConfig, SimulationError, StepOutcome,
    Termination,
};
pub use rng::RngManager;
