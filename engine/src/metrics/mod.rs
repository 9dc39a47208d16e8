//! Metrics reducer
//!
//! Pure post-processing: converts each node's final accumulators and
//! recorded wait samples into the reported metric set. Nothing here
//! mutates the run state, so the reducer can be applied at any point —
//! normally once, after the horizon is reached.
//!
//! # Metric definitions
//!
//! For a node with horizon `T`:
//!
//! - `lq = area_queue / T` — time-average queue length
//! - `l = lq + area_busy / T` — time-average number in the node
//! - `rho = (area_busy / T) / server_count` — per-server utilization
//! - `wq = mean(wait samples)` — average queueing delay
//! - `throughput = served / T` — completed services per unit time
//! - `w = l / throughput` — average time in the node, derived through
//!   Little's Law from the time-average count rather than sampled
//!   sojourn times

use crate::models::state::SimulationState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived metrics for one node
///
/// Degenerate cases are handled by explicit policy, not by exceptions:
/// a node that served no one reports `wq = 0` and `w = 0`, and a run
/// with a non-positive horizon reports all-zero metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    /// Average time a client waits in queue
    pub wq: f64,

    /// Average time a client spends in the node (queue + service)
    pub w: f64,

    /// Time-average queue length
    pub lq: f64,

    /// Time-average number of clients in the node
    pub l: f64,

    /// Per-server utilization, in [0, 1]
    pub rho: f64,

    /// Completed services per unit time
    pub throughput: f64,
}

/// Reduce final node state to per-node metrics
///
/// # Arguments
///
/// * `state` - Final simulation state (read-only after the horizon)
/// * `horizon` - Simulation horizon `T` the areas are normalized by
///
/// # Example
///
/// ```rust
/// use queueing_simulator_core::{metrics, Node, SimulationState};
///
/// let state = SimulationState::new(vec![Node::new("desk", 2.0, 1).unwrap()]);
/// let m = metrics::compute(&state, 100.0);
/// assert_eq!(m["desk"].rho, 0.0);
/// ```
pub fn compute(state: &SimulationState, horizon: f64) -> BTreeMap<String, NodeMetrics> {
    let mut result = BTreeMap::new();

    for (id, node) in state.nodes() {
        // Horizon zero means an empty observation window: no event was
        // ever processed, and every metric is zero by policy.
        if horizon <= 0.0 {
            result.insert(id.clone(), NodeMetrics::default());
            continue;
        }

        let lq = node.area_queue() / horizon;
        let busy_avg = node.area_busy() / horizon;
        let l = lq + busy_avg;
        let rho = busy_avg / node.server_count() as f64;
        let throughput = node.served_count() as f64 / horizon;

        let wq = state
            .wait_samples()
            .get(id)
            .filter(|samples| !samples.is_empty())
            .map(|samples| samples.iter().sum::<f64>() / samples.len() as f64)
            .unwrap_or(0.0);

        let w = if throughput > 0.0 { l / throughput } else { 0.0 };

        result.insert(
            id.clone(),
            NodeMetrics {
                wq,
                w,
                lq,
                l,
                rho,
                throughput,
            },
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node::Node;

    #[test]
    fn test_idle_node_all_zero() {
        let state = SimulationState::new(vec![Node::new("a", 1.0, 1).unwrap()]);
        let m = compute(&state, 50.0);

        assert_eq!(m["a"], NodeMetrics::default());
    }

    #[test]
    fn test_zero_horizon_all_zero() {
        let mut state = SimulationState::new(vec![Node::new("a", 1.0, 1).unwrap()]);
        // Even with accumulated area, T = 0 reports zeros by policy
        state.get_node_mut("a").unwrap().seize_server();
        state.get_node_mut("a").unwrap().accumulate(1.0);

        let m = compute(&state, 0.0);
        assert_eq!(m["a"], NodeMetrics::default());
    }

    #[test]
    fn test_hand_computed_metrics() {
        let mut state = SimulationState::new(vec![Node::new("a", 1.0, 2).unwrap()]);
        {
            let node = state.get_node_mut("a").unwrap();
            // One busy server and one queued client for 4 of 10 units
            node.seize_server();
            node.enqueue(0, 0.0);
            node.accumulate(4.0);
            node.record_served();
        }
        state.record_wait("a", 2.0);
        state.record_wait("a", 0.0);

        let m = compute(&state, 10.0);
        let a = &m["a"];

        assert_eq!(a.lq, 0.4);
        assert_eq!(a.l, 0.4 + 0.4);
        assert_eq!(a.rho, 0.4 / 2.0);
        assert_eq!(a.throughput, 0.1);
        assert_eq!(a.wq, 1.0);
        assert_eq!(a.w, a.l / a.throughput);
    }

    #[test]
    fn test_zero_throughput_reports_zero_w() {
        let mut state = SimulationState::new(vec![Node::new("a", 1.0, 1).unwrap()]);
        // Client in service the whole window but never finished
        state.get_node_mut("a").unwrap().seize_server();
        state.get_node_mut("a").unwrap().accumulate(10.0);

        let m = compute(&state, 10.0);
        assert_eq!(m["a"].w, 0.0);
        assert_eq!(m["a"].rho, 1.0);
    }
}
