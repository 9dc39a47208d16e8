//! Outpatient-clinic case study
//!
//! The modeled network: two registration desks, each feeding its own
//! examination room; each examination room feeds one of two consultation
//! suites; consultations discharge the patient.
//!
//! ```text
//! reg1 (λ=4, μ=8)  → exam1 (μ=6) → consult1 (μ=2.5, 2 servers) → out
//! reg2 (λ=3, μ=10) → exam2 (μ=6) → consult2 (μ=3.0, 2 servers) → out
//! ```
//!
//! Three redesigns are compared against this base layout, all pooling
//! the consultation suites behind a probabilistic split `p` (share of
//! patients sent to consult1):
//!
//! - `p` proportional to observed queue lengths in the base run
//! - `p` proportional to the consultation service rates
//! - additionally merging the two examination rooms into one
//!   two-server room

use queueing_simulator_core::{NodeConfig, NodeMetrics};
use std::collections::BTreeMap;

/// Consultation service rates, used both for node construction and for
/// the rate-proportional split
pub const CONSULT1_RATE: f64 = 2.5;
pub const CONSULT2_RATE: f64 = 3.0;

fn node(
    id: &str,
    service_rate: f64,
    server_count: usize,
    routing: Vec<(String, f64)>,
    external_arrival_rate: f64,
) -> NodeConfig {
    NodeConfig {
        id: id.to_string(),
        service_rate,
        server_count,
        routing,
        external_arrival_rate,
    }
}

fn consult_nodes() -> Vec<NodeConfig> {
    vec![
        node("consult1", CONSULT1_RATE, 2, vec![], 0.0),
        node("consult2", CONSULT2_RATE, 2, vec![], 0.0),
    ]
}

/// Base layout: each examination room feeds one consultation suite
pub fn base_clinic() -> Vec<NodeConfig> {
    let mut nodes = vec![
        node("reg1", 8.0, 1, vec![("exam1".to_string(), 1.0)], 4.0),
        node("reg2", 10.0, 1, vec![("exam2".to_string(), 1.0)], 3.0),
        node("exam1", 6.0, 1, vec![("consult1".to_string(), 1.0)], 0.0),
        node("exam2", 6.0, 1, vec![("consult2".to_string(), 1.0)], 0.0),
    ];
    nodes.extend(consult_nodes());
    nodes
}

/// Pooled consultations: both examination rooms split patients between
/// the two suites, sending a `consult1_share` fraction to consult1
pub fn pooled_consultations(consult1_share: f64) -> Vec<NodeConfig> {
    let split = vec![
        ("consult1".to_string(), consult1_share),
        ("consult2".to_string(), 1.0 - consult1_share),
    ];
    let mut nodes = vec![
        node("reg1", 8.0, 1, vec![("exam1".to_string(), 1.0)], 4.0),
        node("reg2", 10.0, 1, vec![("exam2".to_string(), 1.0)], 3.0),
        node("exam1", 6.0, 1, split.clone(), 0.0),
        node("exam2", 6.0, 1, split, 0.0),
    ];
    nodes.extend(consult_nodes());
    nodes
}

/// Pooled consultations plus a single merged two-server examination room
pub fn merged_exam(consult1_share: f64) -> Vec<NodeConfig> {
    let split = vec![
        ("consult1".to_string(), consult1_share),
        ("consult2".to_string(), 1.0 - consult1_share),
    ];
    let mut nodes = vec![
        node("reg1", 8.0, 1, vec![("exam".to_string(), 1.0)], 4.0),
        node("reg2", 10.0, 1, vec![("exam".to_string(), 1.0)], 3.0),
        node("exam", 6.0, 2, split, 0.0),
    ];
    nodes.extend(consult_nodes());
    nodes
}

/// Split derived from the base run: route proportionally to the queue
/// pressure observed at the OTHER suite, so the longer queue receives
/// the smaller share
pub fn consult1_share_from_queues(base_metrics: &BTreeMap<String, NodeMetrics>) -> f64 {
    let lq1 = base_metrics["consult1"].lq;
    let lq2 = base_metrics["consult2"].lq;
    lq2 / (lq1 + lq2)
}

/// Split proportional to the consultation service rates
pub fn consult1_share_from_rates() -> f64 {
    CONSULT1_RATE / (CONSULT1_RATE + CONSULT2_RATE)
}
