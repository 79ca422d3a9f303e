//! Per-cell type flags.
//!
//! Each lattice cell carries exactly one flag. The collision kernel
//! branch-dispatches on it: Fluid and Interface cells get the full
//! relaxation update, Obstacle cells get bounce-back only, and Gas
//! cells are skipped entirely. The flag field is read-only within the
//! kernel; the external free-surface subsystem may rewrite it between
//! collision passes.

use serde::{Deserialize, Serialize};

use crate::error::CascadeError;

/// The type of a lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellFlag {
    /// Completely filled with fluid. Full collision update.
    Fluid = 0,
    /// Partially filled free-surface cell. Collided exactly like Fluid;
    /// its fill level only modulates gravitational forcing.
    Interface = 1,
    /// Solid no-slip wall. Bounce-back only — no relaxation, no
    /// equilibrium, no velocity field.
    Obstacle = 2,
    /// Empty cell. Not processed by collision at all.
    Gas = 3,
}

impl CellFlag {
    /// True for the cells that take the full collision branch.
    #[inline]
    pub fn is_collided(self) -> bool {
        matches!(self, CellFlag::Fluid | CellFlag::Interface)
    }
}

impl TryFrom<u8> for CellFlag {
    type Error = CascadeError;

    /// Converts a stored flag byte, failing fast on anything outside
    /// the defined set. Used when loading setups from disk; inside the
    /// kernel the enum is total and no invalid state exists.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellFlag::Fluid),
            1 => Ok(CellFlag::Interface),
            2 => Ok(CellFlag::Obstacle),
            3 => Ok(CellFlag::Gas),
            other => Err(CascadeError::InvalidFlag(other)),
        }
    }
}
