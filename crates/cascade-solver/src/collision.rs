//! The collision-and-forcing kernel.
//!
//! A pure per-cell state transition: each invocation reads and writes
//! only its own cell's 19 populations, its flag, its fill level, and
//! the run-wide parameters. No suspension points, no neighbor access —
//! the driver may execute it over all cells in any order or in
//! parallel, in place.
//!
//! Branch dispatch on the cell flag:
//! - Fluid / Interface → relaxation toward equilibrium (SRT or TRT),
//!   optional velocity clamp, optional gravitational forcing
//! - Obstacle → bounce-back only
//! - Gas → untouched
//!
//! The kernel performs no validation: a cell that has left the stable
//! regime (negative density, NaN populations) flows through unchecked
//! and is caught by the driver's sanity scan. The only clamping it ever
//! applies is the explicit, configured velocity limiter.

use cascade_lattice::directions::{project, PAIRS, REST, WEIGHTS};
use cascade_lattice::{moments, EquilibriumBasis, Q, Vec3};
use cascade_types::{CellFlag, Scalar};

use crate::config::{LbmConfig, RelaxationMode};

/// Post-collision macroscopic state of a collided cell.
///
/// Returned so callers (field export, diagnostics) reuse the moments
/// computed during collision instead of re-deriving them. When
/// gravitation is enabled the velocity carries the `g/3` forcing nudge.
#[derive(Debug, Clone, Copy)]
pub struct CellUpdate {
    pub rho: Scalar,
    pub velocity: Vec3,
}

/// Applies one collision update to a single cell.
///
/// Returns the post-collision moments for Fluid/Interface cells, `None`
/// for Obstacle (bounce-back has no velocity field) and Gas (skipped).
#[inline]
pub fn collide_cell(
    dd: &mut [Scalar; Q],
    flag: CellFlag,
    fluid_fraction: Scalar,
    config: &LbmConfig,
) -> Option<CellUpdate> {
    match flag {
        CellFlag::Fluid | CellFlag::Interface => {
            Some(collide_fluid(dd, fluid_fraction, config))
        }
        CellFlag::Obstacle => {
            bounce_back(dd);
            None
        }
        CellFlag::Gas => None,
    }
}

/// Full collision for Fluid and Interface cells.
fn collide_fluid(dd: &mut [Scalar; Q], fluid_fraction: Scalar, config: &LbmConfig) -> CellUpdate {
    let (rho, mut velocity) = moments::moments(dd);

    // Velocity clamp rescales the vector fed into the equilibrium
    // computation; the stored populations are never clamped directly.
    if let Some(limit) = config.velocity_limit {
        let speed = velocity.length();
        if speed > limit {
            velocity *= limit / speed;
        }
    }

    let basis = EquilibriumBasis::new(config.equilibrium, rho, velocity);

    match config.relaxation {
        RelaxationMode::Srt => {
            for &(plus, minus) in &PAIRS {
                let v = project(plus, velocity);
                let (eq_plus, eq_minus) = basis.pair(WEIGHTS[plus], v);
                dd[plus] += config.inv_tau * (eq_plus - dd[plus]);
                dd[minus] += config.inv_tau * (eq_minus - dd[minus]);
            }
        }
        RelaxationMode::Trt => {
            // Even (conserved) parts relax with inv_tau, odd
            // (momentum-carrying) parts with inv_trt_tau. Identical
            // rates reduce this to the SRT update exactly.
            for &(plus, minus) in &PAIRS {
                let v = project(plus, velocity);
                let (eq_plus, eq_minus) = basis.pair(WEIGHTS[plus], v);
                let even = config.inv_tau * ((eq_plus + eq_minus) - (dd[plus] + dd[minus]));
                let odd = config.inv_trt_tau * ((eq_plus - eq_minus) - (dd[plus] - dd[minus]));
                dd[plus] += 0.5 * (even + odd);
                dd[minus] += 0.5 * (even - odd);
            }
        }
    }

    // The rest population has no pair; it always relaxes at inv_tau.
    dd[REST] += config.inv_tau * (basis.rest() - dd[REST]);

    if config.gravitation_enabled {
        let g = config.gravity_vec();

        // Reference velocity for the forcing step; matches the
        // momentum the paired redistribution below injects.
        velocity += g * (1.0 / 3.0);

        let rho_ff = rho * fluid_fraction;

        // Paired redistribution: the "+" member of each pair gains the
        // projected force term, the "−" member loses it. Mass
        // telescopes to zero; injected momentum is rho_ff·g/3.
        for &(plus, minus) in &PAIRS {
            let term = project(plus, g) * WEIGHTS[plus] * rho_ff;
            dd[plus] += term;
            dd[minus] -= term;
        }
    }

    CellUpdate { rho, velocity }
}

/// Obstacle bounce-back: reflect every population into its opposite
/// direction. A pure pairwise swap — applying it twice is the identity.
/// The rest population is self-opposite and untouched. Models a
/// stationary no-slip wall without an interior velocity field.
#[inline]
pub fn bounce_back(dd: &mut [Scalar; Q]) {
    for &(plus, minus) in &PAIRS {
        dd.swap(plus, minus);
    }
}
