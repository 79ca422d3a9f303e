//! Maxwell-Boltzmann equilibrium distributions.
//!
//! The equilibrium populations a cell's distributions relax toward each
//! timestep. Two formulations, selected once per run (never per cell):
//!
//! - **Incompressible** (default): `eq_i = w_i·(dd_param + 3v + (9/2)v²)`
//!   with `dd_param = rho − (3/2)|u|²`, where `v = e_i · u`.
//! - **Compressible**: `eq_i = w_i·rho·(1 + 3v + (9/2)v² − dd_param)`
//!   with `dd_param = (3/2)|u|²`.
//!
//! Both satisfy `Σ eq_i = rho` exactly, which is what makes relaxation
//! conserve mass. The per-pair even/odd split (`eq_plus ± eq_minus`)
//! feeds the two-relaxation-time collision mode.

use cascade_types::Scalar;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::directions::{self, REST, WEIGHTS};

/// Which equilibrium formulation the run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquilibriumModel {
    /// He-Luo incompressible formulation. Density enters only through
    /// `dd_param`; velocity terms are unscaled.
    #[default]
    Incompressible,
    /// Standard compressible formulation. All terms scale with density.
    Compressible,
}

/// Per-cell equilibrium inputs, precomputed once per collision.
///
/// Holds the density and the formulation-dependent `dd_param` so the
/// per-direction closed forms reduce to a weight, a velocity
/// projection, and two multiply-adds.
#[derive(Debug, Clone, Copy)]
pub struct EquilibriumBasis {
    model: EquilibriumModel,
    rho: Scalar,
    dd_param: Scalar,
}

impl EquilibriumBasis {
    /// Precompute the basis for one cell.
    #[inline]
    pub fn new(model: EquilibriumModel, rho: Scalar, velocity: Vec3) -> Self {
        let vel_sq = velocity.length_squared();
        let dd_param = match model {
            EquilibriumModel::Incompressible => rho - (3.0 / 2.0) * vel_sq,
            EquilibriumModel::Compressible => (3.0 / 2.0) * vel_sq,
        };
        Self { model, rho, dd_param }
    }

    /// Equilibrium population for a non-rest direction with weight
    /// `weight` (1/18 or 1/36) and velocity projection `v = e_i · u`.
    #[inline]
    pub fn directional(&self, weight: Scalar, v: Scalar) -> Scalar {
        let kinetic = 3.0 * v + (9.0 / 2.0) * v * v;
        match self.model {
            EquilibriumModel::Incompressible => weight * (self.dd_param + kinetic),
            EquilibriumModel::Compressible => {
                weight * self.rho * (1.0 + kinetic - self.dd_param)
            }
        }
    }

    /// Equilibrium population for the rest direction (weight 1/3).
    #[inline]
    pub fn rest(&self) -> Scalar {
        match self.model {
            EquilibriumModel::Incompressible => (1.0 / 3.0) * self.dd_param,
            EquilibriumModel::Compressible => (1.0 / 3.0) * self.rho * (1.0 - self.dd_param),
        }
    }

    /// Equilibria for a symmetric (+v, −v) direction pair.
    ///
    /// The two share every term except the sign of the odd `3v` part,
    /// so the pair costs one squaring.
    #[inline]
    pub fn pair(&self, weight: Scalar, v: Scalar) -> (Scalar, Scalar) {
        let square = (9.0 / 2.0) * v * v;
        let odd = 3.0 * v;
        match self.model {
            EquilibriumModel::Incompressible => {
                let even = self.dd_param + square;
                (weight * (even + odd), weight * (even - odd))
            }
            EquilibriumModel::Compressible => {
                let even = 1.0 + square - self.dd_param;
                let scale = weight * self.rho;
                (scale * (even + odd), scale * (even - odd))
            }
        }
    }
}

/// Equilibrium population for one direction, table-driven.
///
/// Convenience for initialization and tests; the collision kernel uses
/// [`EquilibriumBasis`] directly to share per-cell work across the 19
/// directions.
#[inline]
pub fn equilibrium(model: EquilibriumModel, i: usize, rho: Scalar, velocity: Vec3) -> Scalar {
    let basis = EquilibriumBasis::new(model, rho, velocity);
    if i == REST {
        basis.rest()
    } else {
        basis.directional(WEIGHTS[i], directions::project(i, velocity))
    }
}
