//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Domain cell count.
    pub cell_count: usize,
    /// Number of timesteps executed.
    pub timesteps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per timestep (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Million lattice-cell updates per second — the standard LBM
    /// throughput figure.
    pub mlups: f64,
    /// Relative drift of total mass over the run. Should sit at
    /// floating-point noise for a healthy solver.
    pub mass_drift: f64,
    /// Maximum post-collision speed seen across the whole run.
    pub peak_speed: f32,
}

impl BenchmarkMetrics {
    /// Format as a CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,cell_count,timesteps,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,mlups,mass_drift,peak_speed".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.6},{:.4},{:.4},{:.4},{:.2},{:.3e},{:.5}",
            self.scenario,
            self.cell_count,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.mlups,
            self.mass_drift,
            self.peak_speed,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
