//! Orchestrator - main simulation loop
//!
//! Drives the future-event set to completion: pops the next event,
//! advances the clock, integrates occupancy statistics, and dispatches
//! arrival/departure handling.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    NodeConfig, Orchestrator, RunSummary, SimulationConfig, SimulationError, StepOutcome,
    Termination,
};
