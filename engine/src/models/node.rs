//! Node (service station) model
//!
//! A node is one service station of the open network:
//! - One or more identical parallel servers, each serving at rate μ
//! - An unbounded FIFO wait queue
//! - A probabilistic routing table toward downstream nodes
//! - An optional exogenous Poisson arrival stream at rate λ
//!
//! Nodes also carry the running statistical accumulators: the exact
//! time-weighted integrals of queue length and busy-server count, and the
//! count of completed services. The accumulators only ever advance by
//! `(pre-event value) × (elapsed time)`, which makes the derived metrics
//! exact step-function integrals rather than sampled approximations.
//!
//! # Critical Invariants
//!
//! 1. `0 ≤ busy_servers ≤ server_count` at all times
//! 2. The wait queue is FIFO: longest-waiting client is served first
//! 3. Routing probabilities each lie in [0, 1] and sum to at most 1;
//!    the unassigned remainder is the probability of leaving the system

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Tolerance for the routing-mass sum check (accumulated float error
/// from config arithmetic like `p` and `1.0 - p`)
const ROUTING_MASS_EPSILON: f64 = 1e-9;

/// Errors raised while constructing or configuring a node
#[derive(Debug, Error, PartialEq)]
pub enum NodeError {
    #[error("service rate must be positive, got {0}")]
    NonPositiveServiceRate(f64),

    #[error("node must have at least one server")]
    ZeroServers,

    #[error("external arrival rate must be non-negative, got {0}")]
    NegativeArrivalRate(f64),

    #[error("routing probability to '{destination}' must be in [0, 1], got {probability}")]
    InvalidRoutingProbability {
        destination: String,
        probability: f64,
    },

    #[error("routing probabilities sum to {total}, which exceeds 1")]
    RoutingMassExceedsOne { total: f64 },
}

/// A client waiting in a node's queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Client identifier
    pub client_id: u64,
    /// Clock value at which the client joined the queue
    pub entered_at: f64,
}

/// One service station of the network
///
/// # Example
/// ```
/// use queueing_simulator_core::Node;
///
/// let node = Node::new("registration", 8.0, 1)
///     .unwrap()
///     .with_routing(vec![("exam".to_string(), 1.0)])
///     .unwrap()
///     .with_external_arrivals(4.0)
///     .unwrap();
///
/// assert_eq!(node.server_count(), 1);
/// assert!(node.has_free_server());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier (e.g., "exam1")
    id: String,

    /// Service rate μ of each server (exponential)
    service_rate: f64,

    /// Number of parallel servers
    server_count: usize,

    /// Routing table: (destination id, probability), walked in insertion
    /// order when resolving a routing draw. Unassigned probability mass
    /// means the client exits the system.
    routing: Vec<(String, f64)>,

    /// Exogenous arrival rate λ (0 = no external stream)
    external_arrival_rate: f64,

    /// Servers currently serving a client
    busy_servers: usize,

    /// Clients waiting for a server, FIFO
    wait_queue: VecDeque<QueueEntry>,

    /// Integral of queue length over elapsed simulated time
    area_queue: f64,

    /// Integral of busy-server count over elapsed simulated time
    area_busy: f64,

    /// Total departures completed at this node
    served_count: u64,
}

impl Node {
    /// Create a node with the given service rate and server count
    ///
    /// The node starts empty: no external stream, empty routing table
    /// (every served client exits the system).
    ///
    /// # Errors
    /// Returns [`NodeError`] for a non-positive service rate or zero
    /// servers.
    pub fn new(
        id: impl Into<String>,
        service_rate: f64,
        server_count: usize,
    ) -> Result<Self, NodeError> {
        if !(service_rate > 0.0) {
            return Err(NodeError::NonPositiveServiceRate(service_rate));
        }
        if server_count == 0 {
            return Err(NodeError::ZeroServers);
        }

        Ok(Self {
            id: id.into(),
            service_rate,
            server_count,
            routing: Vec::new(),
            external_arrival_rate: 0.0,
            busy_servers: 0,
            wait_queue: VecDeque::new(),
            area_queue: 0.0,
            area_busy: 0.0,
            served_count: 0,
        })
    }

    /// Set the routing table, validating each probability and the total
    /// mass
    ///
    /// # Errors
    /// Returns [`NodeError`] if any probability is outside [0, 1] or the
    /// probabilities sum to more than 1.
    pub fn with_routing(mut self, routing: Vec<(String, f64)>) -> Result<Self, NodeError> {
        let mut total = 0.0;
        for (destination, probability) in &routing {
            if !(*probability >= 0.0 && *probability <= 1.0) {
                return Err(NodeError::InvalidRoutingProbability {
                    destination: destination.clone(),
                    probability: *probability,
                });
            }
            total += probability;
        }
        if total > 1.0 + ROUTING_MASS_EPSILON {
            return Err(NodeError::RoutingMassExceedsOne { total });
        }

        self.routing = routing;
        Ok(self)
    }

    /// Set the exogenous arrival rate λ
    ///
    /// # Errors
    /// Returns [`NodeError`] for a negative rate. Zero is valid and means
    /// the node receives clients only through internal routing.
    pub fn with_external_arrivals(mut self, rate: f64) -> Result<Self, NodeError> {
        if !(rate >= 0.0) {
            return Err(NodeError::NegativeArrivalRate(rate));
        }
        self.external_arrival_rate = rate;
        Ok(self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Node identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Service rate μ per server
    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Number of parallel servers
    pub fn server_count(&self) -> usize {
        self.server_count
    }

    /// Routing table in insertion order
    pub fn routing(&self) -> &[(String, f64)] {
        &self.routing
    }

    /// Exogenous arrival rate λ
    pub fn external_arrival_rate(&self) -> f64 {
        self.external_arrival_rate
    }

    /// True if the node has an exogenous arrival stream
    pub fn has_external_arrivals(&self) -> bool {
        self.external_arrival_rate > 0.0
    }

    /// Servers currently busy
    pub fn busy_servers(&self) -> usize {
        self.busy_servers
    }

    /// True if at least one server is idle
    pub fn has_free_server(&self) -> bool {
        self.busy_servers < self.server_count
    }

    /// Current queue length
    pub fn queue_len(&self) -> usize {
        self.wait_queue.len()
    }

    /// Integral of queue length over time so far
    pub fn area_queue(&self) -> f64 {
        self.area_queue
    }

    /// Integral of busy-server count over time so far
    pub fn area_busy(&self) -> f64 {
        self.area_busy
    }

    /// Total departures completed at this node
    pub fn served_count(&self) -> u64 {
        self.served_count
    }

    // ========================================================================
    // State transitions (called by the engine)
    // ========================================================================

    /// Occupy one server
    ///
    /// # Panics
    /// Panics if all servers are already busy — callers must check
    /// [`has_free_server`](Self::has_free_server) first.
    pub fn seize_server(&mut self) {
        assert!(
            self.busy_servers < self.server_count,
            "node '{}': seize_server with all {} servers busy",
            self.id,
            self.server_count
        );
        self.busy_servers += 1;
    }

    /// Free one server
    ///
    /// # Panics
    /// Panics if no server is busy (a departure without a matching
    /// service start).
    pub fn release_server(&mut self) {
        assert!(
            self.busy_servers > 0,
            "node '{}': release_server with no busy server",
            self.id
        );
        self.busy_servers -= 1;
    }

    /// Append a client to the back of the wait queue
    pub fn enqueue(&mut self, client_id: u64, entered_at: f64) {
        self.wait_queue.push_back(QueueEntry {
            client_id,
            entered_at,
        });
    }

    /// Pop the longest-waiting client, if any
    pub fn dequeue_front(&mut self) -> Option<QueueEntry> {
        self.wait_queue.pop_front()
    }

    /// Advance the statistical accumulators by an inter-event gap
    ///
    /// Must be called with the pre-event occupancy values, for every node
    /// on every event: occupancy anywhere in the network is constant
    /// between consecutive events.
    pub fn accumulate(&mut self, elapsed: f64) {
        self.area_queue += self.wait_queue.len() as f64 * elapsed;
        self.area_busy += self.busy_servers as f64 * elapsed;
    }

    /// Count one completed service
    pub fn record_served(&mut self) {
        self.served_count += 1;
    }
}
