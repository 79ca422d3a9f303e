//! # cascade-bench
//!
//! Benchmark scenarios and regression metrics for the Cascade engine.
//!
//! Three canonical scenarios:
//! 1. **Quiescent tank** — fluid at rest, no gravity; any mass drift or
//!    spontaneous motion is a solver bug
//! 2. **Breaking dam** — a fluid column with an interface skin under
//!    gravity; the free-surface stress test
//! 3. **Channel obstacle** — periodic channel flow around a solid box;
//!    bounce-back under sustained throughput

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
