//! Cascade CLI — simulation, benchmarking, and inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cascade")]
#[command(version, about = "Cascade — free-surface lattice Boltzmann fluid engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a setup file.
    Simulate {
        /// Path to simulation setup (TOML).
        #[arg(short, long, default_value = "simulation.toml")]
        config: String,

        /// Number of timesteps to run.
        #[arg(short, long, default_value_t = 500)]
        steps: u32,

        /// Write a field snapshot of the final state here.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (quiescent_tank, breaking_dam,
        /// channel_obstacle, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a field snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a simulation setup file.
    Validate {
        /// Path to setup file (TOML).
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            steps,
            output,
        } => commands::simulate(&config, steps, output.as_deref()),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
