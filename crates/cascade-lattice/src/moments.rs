//! Macroscopic moment extraction.
//!
//! Density is the zeroth moment of the 19 distributions; velocity is
//! the first moment normalized by density. These are the quantities the
//! rendering pipeline consumes (via the field snapshot), so they live
//! here as small reusable functions rather than being re-derived ad hoc.
//!
//! No validation happens here: division by a collapsing density is a
//! caller responsibility. The driver's sanity scan treats `rho ≤ 0` in
//! a collided cell as simulation divergence.

use cascade_types::Scalar;
use glam::Vec3;

use crate::directions::DIRECTIONS;

/// Density: `rho = Σ dd[i]` over all 19 populations.
#[inline]
pub fn density(dd: &[Scalar; 19]) -> Scalar {
    dd.iter().sum()
}

/// Momentum: `Σ dd[i]·e_i`, not yet normalized by density.
#[inline]
pub fn momentum(dd: &[Scalar; 19]) -> Vec3 {
    let mut m = Vec3::ZERO;
    for (i, e) in DIRECTIONS.iter().enumerate() {
        let f = dd[i];
        m.x += f * e[0] as Scalar;
        m.y += f * e[1] as Scalar;
        m.z += f * e[2] as Scalar;
    }
    m
}

/// Density and velocity in one pass: `(rho, momentum / rho)`.
///
/// Only meaningful for Fluid/Interface cells, where density is
/// physically bounded away from zero under normal operation.
#[inline]
pub fn moments(dd: &[Scalar; 19]) -> (Scalar, Vec3) {
    let rho = density(dd);
    (rho, momentum(dd) / rho)
}
