//! # cascade-io
//!
//! The I/O boundary of the Cascade engine:
//!
//! - [`SimulationSetup`] — serializable description of a run (domain,
//!   config, initial cell regions), loadable from TOML
//! - [`validate_setup`] — setup-time rejection of invalid inputs,
//!   before any collision pass begins
//! - [`FieldSnapshot`] — compact binary export of the macroscopic
//!   fields (density, velocity, fill level, flags) consumed by
//!   external rendering pipelines

pub mod contract;
pub mod snapshot;
pub mod validator;

pub use contract::{CellRegion, SimulationSetup};
pub use snapshot::FieldSnapshot;
pub use validator::validate_setup;
