//! # cascade-solver
//!
//! The numerical engine: per-cell collision-and-forcing kernel,
//! obstacle bounce-back, lattice grid state, and the timestep driver.
//!
//! ## Key Types
//!
//! - [`LatticeGrid`] — SoA storage for distributions, flags, fill levels
//! - [`LbmConfig`] — run-wide simulation parameters (TOML-loadable)
//! - [`collision::collide_cell`] — the per-cell state transition
//! - [`TimeStepper`] — collision pass + streaming pass + sanity scan

pub mod collision;
pub mod config;
pub mod grid;
pub mod stepper;

pub use config::{LbmConfig, RelaxationMode};
pub use grid::LatticeGrid;
pub use stepper::{StepReport, TimeStepper};
