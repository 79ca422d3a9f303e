//! CLI command implementations.

use cascade_bench::metrics::BenchmarkMetrics;
use cascade_bench::runner::BenchmarkRunner;
use cascade_bench::scenarios::{Scenario, ScenarioKind};
use cascade_io::contract::SimulationSetup;
use cascade_io::snapshot::FieldSnapshot;
use cascade_solver::TimeStepper;

/// Run a simulation from a setup file.
pub fn simulate(
    config_path: &str,
    steps: u32,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Cascade Simulation");
    println!("──────────────────");
    println!("Setup:  {config_path}");
    println!("Steps:  {steps}");
    println!();

    let content = std::fs::read_to_string(config_path)?;
    let setup: SimulationSetup = toml::from_str(&content)?;

    let grid = setup.build_grid()?;
    let [nx, ny, nz] = grid.dims();
    println!("Domain: {nx}x{ny}x{nz} ({} cells)", grid.cell_count());

    let initial_mass = grid.total_mass();
    let mut stepper = TimeStepper::new(grid);
    let mut peak_speed: f32 = 0.0;
    let mut wall_time = 0.0f64;

    for _ in 0..steps {
        let report = stepper.step(&setup.config)?;
        peak_speed = peak_speed.max(report.max_speed);
        wall_time += report.wall_time;
    }

    let final_mass = stepper.grid().total_mass();
    let drift = if initial_mass != 0.0 {
        (final_mass - initial_mass).abs() / initial_mass
    } else {
        0.0
    };

    println!();
    println!("Wall time:   {wall_time:.3}s");
    println!("Peak speed:  {peak_speed:.5}");
    println!("Total mass:  {final_mass:.6} (drift {drift:.3e})");

    if let Some(path) = output_path {
        let snapshot = FieldSnapshot::capture(stepper.grid(), stepper.timestep());
        std::fs::write(path, snapshot.to_bytes()?)?;
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Cascade Benchmark Suite");
    println!("═══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind = match scenario_name {
            "quiescent_tank" => ScenarioKind::QuiescentTank,
            "breaking_dam" => ScenarioKind::BreakingDam,
            "channel_obstacle" => ScenarioKind::ChannelObstacle,
            other => {
                eprintln!("Unknown scenario: {other}");
                eprintln!("Available: quiescent_tank, breaking_dam, channel_obstacle, all");
                return Err("Unknown scenario".into());
            }
        };
        vec![kind]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        let [nx, ny, nz] = scenario.setup.domain;

        println!(
            "Running: {} ({nx}x{ny}x{nz}, {} steps)",
            kind.name(),
            scenario.timesteps,
        );

        let metrics = BenchmarkRunner::run(&scenario, None)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:   {:.3}s", metrics.total_wall_time);
        println!("  Avg step:    {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Throughput:  {:.1} MLUPS", metrics.mlups);
        println!("  Mass drift:  {:.3e}", metrics.mass_drift);
        println!("  Peak speed:  {:.5}", metrics.peak_speed);
        println!();

        all_metrics.push(metrics);
    }

    // Output CSV
    if let Some(path) = output_path {
        let csv = BenchmarkMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Inspect a field snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Cascade Snapshot Inspector");
    println!("─────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot = FieldSnapshot::from_bytes(&data)
        .map_err(|e| format!("Failed to read snapshot: {e}"))?;

    let [nx, ny, nz] = snapshot.domain;
    println!("Timestep:     {}", snapshot.timestep);
    println!("Domain:       {nx}x{ny}x{nz}");
    println!("Cells:        {}", snapshot.density.len());

    // Quick stats over collided cells (walls and gas read as zero).
    let populated: Vec<f32> = snapshot
        .density
        .iter()
        .copied()
        .filter(|&rho| rho > 0.0)
        .collect();
    if !populated.is_empty() {
        let min = populated.iter().copied().fold(f32::INFINITY, f32::min);
        let max = populated.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        println!("Fluid cells:  {}", populated.len());
        println!("Rho range:    [{min:.4}, {max:.4}]");
    }

    Ok(())
}

/// Validate a setup file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Cascade Validator");
    println!("─────────────────");
    println!();

    if !path.ends_with(".toml") {
        println!("Unsupported file format. Use .toml (setup).");
        return Ok(());
    }

    println!("Validating setup: {path}");
    let content = std::fs::read_to_string(path)?;
    let setup: SimulationSetup = toml::from_str(&content)?;
    match cascade_io::validate_setup(&setup) {
        Ok(()) => {
            let [nx, ny, nz] = setup.domain;
            println!(
                "✅ Setup is valid ({nx}x{ny}x{nz}, {} regions).",
                setup.regions.len()
            );
        }
        Err(e) => println!("❌ Setup validation failed: {e}"),
    }

    Ok(())
}
