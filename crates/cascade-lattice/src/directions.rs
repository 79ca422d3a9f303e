//! D3Q19 direction table.
//!
//! Nineteen velocity directions on a 3D cubic lattice:
//! - 6 face-centered (±x, ±y, ±z)
//! - 12 edge-centered (±x±y, ±x±z, ±y±z)
//! - 1 rest
//!
//! Directions are ordered so that each opposite pair is adjacent —
//! indices (0,1), (2,3), ..., (16,17) — with the rest direction last at
//! index 18. Under this ordering the opposite of direction `i` is
//! simply `i ^ 1`, and pair-wise operations (bounce-back, TRT
//! relaxation, gravity redistribution) walk the `PAIRS` table instead
//! of hand-unrolling nine near-identical blocks.

use cascade_types::Scalar;
use glam::Vec3;

/// Number of discrete velocities.
pub const Q: usize = 19;

/// Index of the rest (zero-velocity) direction.
pub const REST: usize = 18;

/// D3Q19 discrete velocities: [ex, ey, ez].
pub const DIRECTIONS: [[i32; 3]; 19] = [
    [1, 0, 0], // 0, 1: ±x
    [-1, 0, 0],
    [0, 1, 0], // 2, 3: ±y
    [0, -1, 0],
    [1, 1, 0], // 4, 5: ±(x+y)
    [-1, -1, 0],
    [1, -1, 0], // 6, 7: ±(x−y)
    [-1, 1, 0],
    [1, 0, 1], // 8, 9: ±(x+z)
    [-1, 0, -1],
    [1, 0, -1], // 10, 11: ±(x−z)
    [-1, 0, 1],
    [0, 1, 1], // 12, 13: ±(y+z)
    [0, -1, -1],
    [0, 1, -1], // 14, 15: ±(y−z)
    [0, -1, 1],
    [0, 0, 1], // 16, 17: ±z
    [0, 0, -1],
    [0, 0, 0], // 18: rest
];

/// D3Q19 weights: 1/18 for face directions, 1/36 for edge directions,
/// 1/3 for rest.
pub const WEIGHTS: [Scalar; 19] = [
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 3.0,
];

/// Opposite direction indices for bounce-back. The rest direction is
/// self-opposite.
pub const OPPOSITE: [usize; 19] = [
    1, 0, 3, 2, 5, 4, 7, 6, 9, 8, 11, 10, 13, 12, 15, 14, 17, 16, 18,
];

/// The nine symmetric direction pairs covering all 18 non-rest
/// directions. Each entry is (plus, minus): `DIRECTIONS[plus]` is the
/// negation of `DIRECTIONS[minus]`.
pub const PAIRS: [(usize, usize); 9] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (8, 9),
    (10, 11),
    (12, 13),
    (14, 15),
    (16, 17),
];

/// Direction vector as a float vector.
#[inline]
pub fn direction_vec(i: usize) -> Vec3 {
    let e = DIRECTIONS[i];
    Vec3::new(e[0] as Scalar, e[1] as Scalar, e[2] as Scalar)
}

/// Projection of a velocity onto lattice direction `i` (e_i · u).
#[inline]
pub fn project(i: usize, velocity: Vec3) -> Scalar {
    let e = DIRECTIONS[i];
    e[0] as Scalar * velocity.x + e[1] as Scalar * velocity.y + e[2] as Scalar * velocity.z
}
