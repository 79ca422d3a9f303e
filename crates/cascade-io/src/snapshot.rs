//! Field snapshot export for external consumers.
//!
//! The rendering pipeline (surface extraction, volume shading) consumes
//! the macroscopic fields as read-only arrays. A snapshot captures them
//! through the same moment-extraction routine the kernel uses, so the
//! renderer and the solver can never disagree about what density or
//! velocity mean. Serialized with `bincode` for compact binary output.

use serde::{Deserialize, Serialize};

use cascade_lattice::moments;
use cascade_solver::LatticeGrid;
use cascade_types::{CascadeError, CascadeResult, Scalar};

/// Macroscopic fields of the whole domain at one timestep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Timestep index when this snapshot was taken.
    pub timestep: u32,
    /// Domain extents [nx, ny, nz].
    pub domain: [usize; 3],
    /// Per-cell density. Zero for Obstacle and Gas cells.
    pub density: Vec<Scalar>,
    /// Per-cell velocity (flat: [vx0, vy0, vz0, vx1, ...]).
    /// Zero for Obstacle and Gas cells — a wall has no velocity field.
    pub velocity: Vec<Scalar>,
    /// Per-cell fill level.
    pub fluid_fraction: Vec<Scalar>,
    /// Per-cell flag bytes.
    pub flags: Vec<u8>,
}

impl FieldSnapshot {
    /// Captures the macroscopic fields of a grid.
    pub fn capture(grid: &LatticeGrid, timestep: u32) -> Self {
        let ncells = grid.cell_count();
        let mut density = Vec::with_capacity(ncells);
        let mut velocity = Vec::with_capacity(ncells * 3);
        let mut flags = Vec::with_capacity(ncells);

        let [nx, ny, nz] = grid.dims();
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let flag = grid.flag(x, y, z);
                    flags.push(flag as u8);
                    if flag.is_collided() {
                        let dd = grid.distributions(x, y, z);
                        let (rho, u) = moments::moments(&dd);
                        density.push(rho);
                        velocity.extend_from_slice(&[u.x, u.y, u.z]);
                    } else {
                        density.push(0.0);
                        velocity.extend_from_slice(&[0.0, 0.0, 0.0]);
                    }
                }
            }
        }

        Self {
            timestep,
            domain: grid.dims(),
            density,
            velocity,
            fluid_fraction: grid.raw_fluid_fractions().to_vec(),
            flags,
        }
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> CascadeResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| CascadeError::Serialization(format!("snapshot encode: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> CascadeResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| CascadeError::Serialization(format!("snapshot decode: {e}")))
    }
}
