//! Display and persistence of simulation results
//!
//! Renders per-node metrics as a fixed-width grid for the terminal, and
//! saves each case as a `simulation_results.csv` plus a
//! `simulation_params.json` under the run directory.

use queueing_simulator_core::{NodeConfig, NodeMetrics};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const METRIC_COLUMNS: [&str; 6] = ["Wq", "W", "Lq", "L", "rho", "throughput"];

fn metric_values(m: &NodeMetrics) -> [f64; 6] {
    [m.wq, m.w, m.lq, m.l, m.rho, m.throughput]
}

/// Render the metrics of one case as a grid table
pub fn render_table(metrics: &BTreeMap<String, NodeMetrics>) -> String {
    let node_width = metrics
        .keys()
        .map(|id| id.len())
        .chain(std::iter::once("node".len()))
        .max()
        .unwrap_or(4);
    let col_width = 12;

    let mut separator = format!("+{}+", "-".repeat(node_width + 2));
    for _ in METRIC_COLUMNS {
        separator.push_str(&"-".repeat(col_width + 2));
        separator.push('+');
    }

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');

    out.push_str(&format!("| {:node_width$} |", "node"));
    for column in METRIC_COLUMNS {
        out.push_str(&format!(" {:>col_width$} |", column));
    }
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    for (id, m) in metrics {
        out.push_str(&format!("| {:node_width$} |", id));
        for value in metric_values(m) {
            out.push_str(&format!(" {:>col_width$.4} |", value));
        }
        out.push('\n');
    }
    out.push_str(&separator);
    out
}

/// Per-node parameters recorded alongside the results
#[derive(Debug, Serialize)]
struct NodeParams {
    service_rate: f64,
    server_count: usize,
    external_arrival_rate: f64,
}

/// Parameter record for one saved case
#[derive(Debug, Serialize)]
struct CaseParams {
    seed: u64,
    horizon: f64,
    nodes: BTreeMap<String, NodeParams>,
}

/// Persist one case: CSV results and JSON parameters
///
/// Creates `<run_dir>/<case_name>/` and returns the paths written.
pub fn save_case(
    run_dir: &Path,
    case_name: &str,
    metrics: &BTreeMap<String, NodeMetrics>,
    node_configs: &[NodeConfig],
    horizon: f64,
    seed: u64,
) -> io::Result<(PathBuf, PathBuf)> {
    let case_dir = run_dir.join(case_name);
    fs::create_dir_all(&case_dir)?;

    let results_path = case_dir.join("simulation_results.csv");
    let mut csv = fs::File::create(&results_path)?;
    writeln!(csv, "node,{}", METRIC_COLUMNS.join(","))?;
    for (id, m) in metrics {
        let row: Vec<String> = metric_values(m)
            .iter()
            .map(|v| format!("{:.4}", v))
            .collect();
        writeln!(csv, "{},{}", id, row.join(","))?;
    }

    let params = CaseParams {
        seed,
        horizon,
        nodes: node_configs
            .iter()
            .map(|nc| {
                (
                    nc.id.clone(),
                    NodeParams {
                        service_rate: nc.service_rate,
                        server_count: nc.server_count,
                        external_arrival_rate: nc.external_arrival_rate,
                    },
                )
            })
            .collect(),
    };
    let params_path = case_dir.join("simulation_params.json");
    let file = fs::File::create(&params_path)?;
    serde_json::to_writer_pretty(file, &params)?;

    Ok((results_path, params_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> BTreeMap<String, NodeMetrics> {
        let mut metrics = BTreeMap::new();
        metrics.insert(
            "reg1".to_string(),
            NodeMetrics {
                wq: 0.125,
                w: 0.25,
                lq: 0.5,
                l: 1.0,
                rho: 0.5,
                throughput: 4.0,
            },
        );
        metrics
    }

    #[test]
    fn test_table_contains_header_and_values() {
        let table = render_table(&sample_metrics());
        assert!(table.contains("| node"));
        assert!(table.contains("Wq"));
        assert!(table.contains("reg1"));
        assert!(table.contains("0.1250"));
    }

    #[test]
    fn test_table_row_count() {
        let table = render_table(&sample_metrics());
        // 3 separators + header + 1 data row
        assert_eq!(table.trim_end().lines().count(), 5);
    }
}
