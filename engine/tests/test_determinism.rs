//! Run-level determinism
//!
//! Given one seed and one scenario, the event sequence and every derived
//! metric must be bit-for-bit identical across runs.

use queueing_simulator_core::{NodeConfig, Orchestrator, SimulationConfig};

fn network_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        horizon: 500.0,
        rng_seed: seed,
        node_configs: vec![
            NodeConfig {
                id: "reg".to_string(),
                service_rate: 8.0,
                server_count: 1,
                routing: vec![("exam".to_string(), 1.0)],
                external_arrival_rate: 4.0,
            },
            NodeConfig {
                id: "exam".to_string(),
                service_rate: 6.0,
                server_count: 1,
                routing: vec![("consult".to_string(), 0.5)],
                external_arrival_rate: 0.0,
            },
            NodeConfig {
                id: "consult".to_string(),
                service_rate: 2.5,
                server_count: 2,
                routing: vec![],
                external_arrival_rate: 0.0,
            },
        ],
    }
}

#[test]
fn test_same_seed_same_event_sequence() {
    let mut run1 = Orchestrator::new(network_config(12345)).unwrap();
    let mut run2 = Orchestrator::new(network_config(12345)).unwrap();

    let summary1 = run1.run().unwrap();
    let summary2 = run2.run().unwrap();

    assert_eq!(summary1, summary2);
    assert_eq!(run1.event_log().events(), run2.event_log().events());
}

#[test]
fn test_same_seed_same_metrics() {
    let mut run1 = Orchestrator::new(network_config(777)).unwrap();
    let mut run2 = Orchestrator::new(network_config(777)).unwrap();

    run1.run().unwrap();
    run2.run().unwrap();

    assert_eq!(run1.metrics(), run2.metrics());
    assert_eq!(run1.rng_state(), run2.rng_state());
}

#[test]
fn test_different_seeds_diverge() {
    let mut run1 = Orchestrator::new(network_config(1)).unwrap();
    let mut run2 = Orchestrator::new(network_config(2)).unwrap();

    run1.run().unwrap();
    run2.run().unwrap();

    // The very first draw differs, so the sequences diverge immediately
    assert_ne!(
        run1.event_log().events()[0].time,
        run2.event_log().events()[0].time
    );
    assert_ne!(run1.metrics(), run2.metrics());
}

#[test]
fn test_stepwise_and_full_run_agree() {
    let mut stepped = Orchestrator::new(network_config(55)).unwrap();
    let mut full = Orchestrator::new(network_config(55)).unwrap();

    // Driving by hand (the caller-interruptible path) must visit the
    // same events as run()
    while let queueing_simulator_core::StepOutcome::Processed = stepped.step().unwrap() {}
    full.run().unwrap();

    assert_eq!(stepped.event_log().events(), full.event_log().events());
    assert_eq!(stepped.metrics(), full.metrics());
}

#[test]
fn test_runs_own_independent_state() {
    // Two runs of the same scenario never share node state: mutating
    // one leaves the other untouched
    let mut run1 = Orchestrator::new(network_config(4)).unwrap();
    let run2 = Orchestrator::new(network_config(4)).unwrap();

    run1.run().unwrap();

    assert!(run1.state().get_node("reg").unwrap().served_count() > 0);
    assert_eq!(run2.state().get_node("reg").unwrap().served_count(), 0);
}
