//! Scalar type alias for the simulation.
//!
//! Using `f32` for GPU compatibility (the distribution planes are laid
//! out to upload directly as compute-shader storage buffers). This alias
//! makes it easy to experiment with `f64` precision if needed.

/// The floating-point type used for every lattice quantity.
///
/// All 19 distribution values, densities, velocities, and forcing terms
/// use this one type. Set to `f32` for GPU compatibility. Change to
/// `f64` for double-precision CPU-only mode (useful for validation).
pub type Scalar = f32;
