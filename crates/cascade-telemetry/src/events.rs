//! Simulation event types.
//!
//! Structured events emitted by the timestep loop. Events are
//! lightweight value types that carry just enough data to be useful
//! for monitoring a running simulation and for regression dashboards.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
///
/// Events are tagged with a timestep index and carry domain-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Timestep number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Timestep started.
    TimestepBegin,

    /// Timestep completed.
    TimestepEnd {
        /// Wall-clock time for the entire timestep (seconds).
        wall_time: f64,
        /// Maximum post-collision speed seen this step.
        max_speed: f32,
    },

    /// Mass accounting snapshot.
    MassBalance {
        /// Total mass over fluid and interface cells.
        total_mass: f64,
        /// Relative drift against the run's initial mass.
        drift: f64,
    },

    /// Result of a driver sanity scan.
    SanityReport {
        /// Whether the scan found the grid healthy.
        ok: bool,
        /// Human-readable detail when unhealthy.
        detail: Option<String>,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given timestep.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}
