//! # cascade-lattice
//!
//! The D3Q19 velocity set and the lattice-level math built on it.
//!
//! Provides:
//! - Re-exports of `glam` vector types (`Vec3`, etc.)
//! - The direction table: 19 discrete velocities, weights, the
//!   opposite-direction permutation, and the nine symmetric pairs
//! - Maxwell-Boltzmann equilibrium distributions (incompressible and
//!   compressible formulations, with the even/odd pair split used by
//!   two-relaxation-time collision)
//! - Macroscopic moment extraction (density, velocity)
//!
//! Direction index `i` means the same physical direction everywhere in
//! the engine; every component indexes through this crate's table.

pub mod directions;
pub mod equilibrium;
pub mod moments;

// Re-export glam types as the canonical math types for Cascade.
pub use glam::{Vec3, Vec4};

pub use directions::{DIRECTIONS, OPPOSITE, PAIRS, Q, REST, WEIGHTS};
pub use equilibrium::{EquilibriumBasis, EquilibriumModel};
