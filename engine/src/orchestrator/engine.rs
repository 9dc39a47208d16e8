//! Orchestrator Engine
//!
//! Main simulation loop integrating all components:
//! - External-arrival seeding (one pending arrival per Poisson source)
//! - The future-event set (time-ordered pending events)
//! - Node state transitions (seize/queue on arrival, release/promote on
//!   departure)
//! - Probabilistic routing (instantaneous transfer between nodes)
//! - Exact statistical bookkeeping (network-wide area integration on
//!   every event)
//!
//! # Architecture
//!
//! The event loop, one iteration per event:
//!
//! ```text
//! 1. Extract the minimum-time event
//! 2. Stop if the set is empty or the event lies beyond the horizon
//! 3. Advance the clock; integrate queue/busy areas for EVERY node
//! 4. Arrival:   perpetuate the external stream if applicable, then
//!               seize a free server (wait = 0) or join the FIFO queue
//!    Departure: count the service, free the server, promote the
//!               longest-waiting client, then route the departing client
//!               (or let it exit the system)
//! ```
//!
//! # Determinism
//!
//! All randomness flows through one seeded [`RngManager`]. Same seed +
//! same configuration = identical event sequence and identical metrics.
//! Nodes are seeded and stored in sorted-id order so the draw order is
//! reproducible.
//!
//! # Example
//!
//! ```rust
//! use queueing_simulator_core::{NodeConfig, Orchestrator, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     horizon: 1000.0,
//!     rng_seed: 42,
//!     node_configs: vec![NodeConfig {
//!         id: "desk".to_string(),
//!         service_rate: 2.0,
//!         server_count: 1,
//!         routing: vec![],
//!         external_arrival_rate: 1.0,
//!     }],
//! };
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! let summary = orchestrator.run().unwrap();
//! assert!(summary.events_processed > 0);
//!
//! let metrics = orchestrator.metrics();
//! assert!(metrics["desk"].rho > 0.0);
//! ```

use crate::core::clock::SimClock;
use crate::metrics::{self, NodeMetrics};
use crate::models::event::{Event, EventKind, EventLog};
use crate::models::future_events::FutureEventSet;
use crate::models::node::{Node, NodeError};
use crate::models::state::SimulationState;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// # Fields
///
/// * `horizon` - Simulated-time cutoff `T`; events beyond it are discarded
/// * `rng_seed` - Seed for the run's single random stream
/// * `node_configs` - One entry per service station in the network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation horizon `T`, in the same unit as the rates' reciprocal
    pub horizon: f64,

    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// Per-node configuration
    pub node_configs: Vec<NodeConfig>,
}

/// Per-node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Unique node identifier
    pub id: String,

    /// Service rate μ of each server
    pub service_rate: f64,

    /// Number of parallel servers
    pub server_count: usize,

    /// Routing table as (destination, probability) pairs, walked in the
    /// given order; unassigned mass is the exit-system probability
    #[serde(default)]
    pub routing: Vec<(String, f64)>,

    /// Exogenous Poisson arrival rate λ (0 = no external stream)
    #[serde(default)]
    pub external_arrival_rate: f64,
}

// ============================================================================
// Errors
// ============================================================================

/// Simulation error types
///
/// All of these are fatal: the run is a single deterministic pass with no
/// retry layer.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Two nodes share an identifier
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    /// A node's own parameters are invalid
    #[error("node '{node_id}': {source}")]
    InvalidNode {
        node_id: String,
        #[source]
        source: NodeError,
    },

    /// A routing table names a destination absent from the network
    #[error("node '{node_id}' routes to unknown destination '{destination}'")]
    UnknownRoutingDestination {
        node_id: String,
        destination: String,
    },

    /// An event targets a node absent from the network (unreachable for
    /// configurations that passed validation)
    #[error("event targets unknown node '{0}'")]
    NodeNotFound(String),
}

// ============================================================================
// Run Outcomes
// ============================================================================

/// Why the event loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The future-event set emptied out
    Drained,
    /// The next event lay beyond the horizon and was discarded
    HorizonReached,
}

/// Outcome of a single [`Orchestrator::step`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One event was processed
    Processed,
    /// The run is complete; no event was processed
    Finished(Termination),
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total events processed
    pub events_processed: u64,

    /// Arrival events processed
    pub arrivals_processed: u64,

    /// Departure events processed
    pub departures_processed: u64,

    /// Client ids minted over the run (including clients whose first
    /// arrival was still pending at termination)
    pub clients_created: u64,

    /// Clients that left the network through routing remainder mass or
    /// an empty routing table
    pub exits: u64,

    /// Clock value of the last processed event — the accumulators
    /// integrate exactly up to here, not up to the horizon
    pub final_time: f64,

    /// Why the loop stopped
    pub termination: Termination,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator owning all run state
///
/// The Orchestrator owns the node set, the clock, the future-event set,
/// and the run's single RNG stream. Construction validates the entire
/// configuration eagerly — in particular, every routing destination must
/// resolve to a real node, so a malformed topology fails before the first
/// event rather than mid-run.
#[derive(Debug)]
pub struct Orchestrator {
    /// Network state (nodes, wait samples, client-id mint)
    state: SimulationState,

    /// Continuous simulation clock
    clock: SimClock,

    /// Pending events, min-time first
    future_events: FutureEventSet,

    /// Deterministic RNG, sole source of randomness for the run
    rng: RngManager,

    /// Simulated-time cutoff `T`
    horizon: f64,

    /// Processed events, in processing order
    event_log: EventLog,

    events_processed: u64,
    arrivals_processed: u64,
    departures_processed: u64,
    exits: u64,
}

impl Orchestrator {
    /// Create a new orchestrator from configuration
    ///
    /// Validates the configuration, constructs the node set, and seeds
    /// the future-event set with the first external arrival of every
    /// node that has an exogenous stream (in sorted node-id order).
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the horizon is negative or
    /// non-finite, the network is empty, a node id repeats, a node's own
    /// parameters are invalid, or a routing destination does not resolve.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        // Build nodes, surfacing per-node construction errors with the
        // offending id attached
        let mut nodes = Vec::with_capacity(config.node_configs.len());
        for nc in &config.node_configs {
            let node = Node::new(nc.id.clone(), nc.service_rate, nc.server_count)
                .and_then(|n| n.with_routing(nc.routing.clone()))
                .and_then(|n| n.with_external_arrivals(nc.external_arrival_rate))
                .map_err(|source| SimulationError::InvalidNode {
                    node_id: nc.id.clone(),
                    source,
                })?;
            nodes.push(node);
        }

        let mut state = SimulationState::new(nodes);
        let mut rng = RngManager::new(config.rng_seed);
        let mut future_events = FutureEventSet::new();

        // Seed one pending arrival per external source. Sorted-id order
        // (BTreeMap iteration) keeps the draw sequence reproducible.
        let sources: Vec<(String, f64)> = state
            .nodes()
            .values()
            .filter(|n| n.has_external_arrivals())
            .map(|n| (n.id().to_string(), n.external_arrival_rate()))
            .collect();
        for (node_id, rate) in sources {
            let gap = rng.exponential(rate);
            let client_id = state.mint_client_id();
            future_events.insert(Event::arrival(gap, node_id, client_id, true));
        }

        Ok(Self {
            state,
            clock: SimClock::new(),
            future_events,
            rng,
            horizon: config.horizon,
            event_log: EventLog::new(),
            events_processed: 0,
            arrivals_processed: 0,
            departures_processed: 0,
            exits: 0,
        })
    }

    /// Validate configuration
    fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
        if !config.horizon.is_finite() || config.horizon < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "horizon must be finite and non-negative, got {}",
                config.horizon
            )));
        }

        if config.node_configs.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "network must have at least one node".to_string(),
            ));
        }

        // Check for duplicate node ids
        let mut ids = HashSet::new();
        for nc in &config.node_configs {
            if !ids.insert(nc.id.as_str()) {
                return Err(SimulationError::DuplicateNode(nc.id.clone()));
            }
        }

        // Every routing destination must resolve to a real node
        for nc in &config.node_configs {
            for (destination, _) in &nc.routing {
                if !ids.contains(destination.as_str()) {
                    return Err(SimulationError::UnknownRoutingDestination {
                        node_id: nc.id.clone(),
                        destination: destination.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current simulation time
    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    /// Simulation horizon `T`
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Get reference to the run state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Get mutable reference to the run state
    ///
    /// Primarily for testing. Direct mutation bypasses engine
    /// invariants.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Get reference to the processed-event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Pending events not yet processed
    pub fn pending_events(&self) -> usize {
        self.future_events.len()
    }

    /// Current RNG state (seed bookkeeping)
    pub fn rng_state(&self) -> u64 {
        self.rng.get_state()
    }

    /// Clients that exited the network so far
    pub fn exits(&self) -> u64 {
        self.exits
    }

    /// Reduce the current node state to per-node metrics
    ///
    /// Pure read; normally called once after [`run`](Self::run).
    pub fn metrics(&self) -> BTreeMap<String, NodeMetrics> {
        metrics::compute(&self.state, self.horizon)
    }

    // ========================================================================
    // Event Loop
    // ========================================================================

    /// Process exactly one event
    ///
    /// This is the safe interruption point: a caller wanting early
    /// termination can stop between calls with the state consistent.
    ///
    /// Returns [`StepOutcome::Finished`] without processing anything when
    /// the future-event set is empty or the next event lies beyond the
    /// horizon (that event, and every later one, describes activity
    /// outside the observation window and is discarded).
    pub fn step(&mut self) -> Result<StepOutcome, SimulationError> {
        let event = match self.future_events.extract_min() {
            Some(event) => event,
            None => return Ok(StepOutcome::Finished(Termination::Drained)),
        };

        if event.time > self.horizon {
            return Ok(StepOutcome::Finished(Termination::HorizonReached));
        }

        // Advance the clock and integrate occupancy for EVERY node:
        // occupancy anywhere in the network is constant between
        // consecutive events.
        let elapsed = self.clock.advance_to(event.time);
        self.state.accumulate_all(elapsed);

        match event.kind {
            EventKind::Arrival => {
                self.handle_arrival(&event)?;
                self.arrivals_processed += 1;
            }
            EventKind::Departure => {
                self.handle_departure(&event)?;
                self.departures_processed += 1;
            }
        }

        self.event_log.log(event);
        self.events_processed += 1;
        Ok(StepOutcome::Processed)
    }

    /// Drive the event loop to completion and summarize the run
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        loop {
            match self.step()? {
                StepOutcome::Processed => {}
                StepOutcome::Finished(termination) => {
                    return Ok(RunSummary {
                        events_processed: self.events_processed,
                        arrivals_processed: self.arrivals_processed,
                        departures_processed: self.departures_processed,
                        clients_created: self.state.clients_created(),
                        exits: self.exits,
                        final_time: self.clock.current_time(),
                        termination,
                    });
                }
            }
        }
    }

    // ========================================================================
    // Event Handlers
    // ========================================================================

    /// Handle a client reaching a node
    fn handle_arrival(&mut self, event: &Event) -> Result<(), SimulationError> {
        let now = self.clock.current_time();

        let (external_rate, service_rate, has_free) = {
            let node = self
                .state
                .get_node(&event.node_id)
                .ok_or_else(|| SimulationError::NodeNotFound(event.node_id.clone()))?;
            (
                node.external_arrival_rate(),
                node.service_rate(),
                node.has_free_server(),
            )
        };

        // An external-source arrival perpetuates its node's exogenous
        // stream: schedule the next external client before attending the
        // current one. Each external event passes through here once.
        if event.external_source {
            let gap = self.rng.exponential(external_rate);
            let client_id = self.state.mint_client_id();
            self.future_events
                .insert(Event::arrival(now + gap, event.node_id.clone(), client_id, true));
        }

        if has_free {
            // Free server: service starts immediately, wait is zero
            let duration = self.rng.exponential(service_rate);
            let node = self
                .state
                .get_node_mut(&event.node_id)
                .expect("node presence checked above");
            node.seize_server();
            self.state.record_wait(&event.node_id, 0.0);
            self.future_events.insert(Event::departure(
                now + duration,
                event.node_id.clone(),
                event.client_id,
            ));
        } else {
            // All servers busy: join the FIFO queue
            let node = self
                .state
                .get_node_mut(&event.node_id)
                .expect("node presence checked above");
            node.enqueue(event.client_id, now);
        }

        Ok(())
    }

    /// Handle a client finishing service at a node
    fn handle_departure(&mut self, event: &Event) -> Result<(), SimulationError> {
        let now = self.clock.current_time();

        let (service_rate, promoted) = {
            let node = self
                .state
                .get_node_mut(&event.node_id)
                .ok_or_else(|| SimulationError::NodeNotFound(event.node_id.clone()))?;
            node.record_served();
            node.release_server();

            // Promote the longest-waiting client, if any
            let promoted = node.dequeue_front();
            if promoted.is_some() {
                node.seize_server();
            }
            (node.service_rate(), promoted)
        };

        if let Some(entry) = promoted {
            self.state
                .record_wait(&event.node_id, now - entry.entered_at);
            let duration = self.rng.exponential(service_rate);
            self.future_events.insert(Event::departure(
                now + duration,
                event.node_id.clone(),
                entry.client_id,
            ));
        }

        // Route the departing client. No draw is consumed when the
        // routing table is empty (the client always exits).
        let destination = {
            let node = self
                .state
                .get_node(&event.node_id)
                .expect("node presence checked above");
            if node.routing().is_empty() {
                None
            } else {
                let draw = self.rng.next_f64();
                let mut cumulative = 0.0;
                let mut selected = None;
                for (dest, probability) in node.routing() {
                    cumulative += probability;
                    if draw < cumulative {
                        selected = Some(dest.clone());
                        break;
                    }
                }
                selected
            }
        };

        match destination {
            // Routing is instantaneous: the arrival fires at the current
            // clock value
            Some(dest) => self
                .future_events
                .insert(Event::arrival(now, dest, event.client_id, false)),
            None => self.exits += 1,
        }

        Ok(())
    }
}
