//! Benchmark runner — executes scenarios and collects metrics.

use std::time::Instant;

use cascade_solver::TimeStepper;
use cascade_telemetry::{EventBus, EventKind, SimulationEvent};
use cascade_types::CascadeResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::Scenario;

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// Returns metrics for the completed run. When a bus is supplied,
    /// per-step timing and mass-balance events are emitted and flushed
    /// once per step.
    pub fn run(scenario: &Scenario, bus: Option<&mut EventBus>) -> CascadeResult<BenchmarkMetrics> {
        let grid = scenario.setup.build_grid()?;
        let cell_count = grid.cell_count();
        let mut stepper = TimeStepper::new(grid);
        let config = &scenario.setup.config;

        let initial_mass = stepper.grid().total_mass();
        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut peak_speed: f32 = 0.0;
        let mut bus = bus;

        let total_start = Instant::now();

        for _ in 0..scenario.timesteps {
            let report = stepper.step(config)?;
            step_times.push(report.wall_time);
            peak_speed = peak_speed.max(report.max_speed);

            if let Some(bus) = bus.as_deref_mut() {
                let total_mass = stepper.grid().total_mass();
                let drift = if initial_mass != 0.0 {
                    (total_mass - initial_mass).abs() / initial_mass
                } else {
                    0.0
                };
                bus.emit(SimulationEvent::new(
                    report.timestep,
                    EventKind::TimestepEnd {
                        wall_time: report.wall_time,
                        max_speed: report.max_speed,
                    },
                ));
                bus.emit(SimulationEvent::new(
                    report.timestep,
                    EventKind::MassBalance { total_mass, drift },
                ));
                bus.flush();
            }
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let final_mass = stepper.grid().total_mass();
        let mass_drift = if initial_mass != 0.0 {
            (final_mass - initial_mass).abs() / initial_mass
        } else {
            0.0
        };

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);
        let mlups = if total_wall_time > 0.0 {
            cell_count as f64 * scenario.timesteps as f64 / total_wall_time / 1.0e6
        } else {
            0.0
        };

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            cell_count,
            timesteps: scenario.timesteps,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            mlups,
            mass_drift,
            peak_speed,
        })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> CascadeResult<Vec<BenchmarkMetrics>> {
        use crate::scenarios::ScenarioKind;
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            let metrics = Self::run(&scenario, None)?;
            results.push(metrics);
        }
        Ok(results)
    }
}
