//! Domain models for the queueing network simulator

pub mod event;
pub mod future_events;
pub mod node;
pub mod state;

// Re-exports
pub use event::{Event, EventKind, EventLog};
pub use future_events::FutureEventSet;
pub use node::{Node, NodeError, QueueEntry};
pub use state::SimulationState;
