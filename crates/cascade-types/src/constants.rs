//! Lattice constants and simulation defaults.
//!
//! All quantities are in lattice units (cell spacing = 1, timestep = 1).

use crate::scalar::Scalar;

/// Lattice speed of sound squared: c_s² = 1/3.
pub const SOUND_SPEED_SQ: Scalar = 1.0 / 3.0;

/// Default inverse relaxation time (1/τ). τ = 1 corresponds to a
/// kinematic viscosity of 1/6 in lattice units.
pub const DEFAULT_INV_TAU: Scalar = 1.0;

/// Default interval (in timesteps) between driver sanity scans.
pub const DEFAULT_SANITY_INTERVAL: u32 = 16;

/// Reference density for freshly initialized cells.
pub const REFERENCE_DENSITY: Scalar = 1.0;

/// Epsilon for floating-point comparisons in tests and validation.
pub const EPSILON: Scalar = 1.0e-6;
