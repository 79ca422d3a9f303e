//! Setup validation.
//!
//! Validates simulation inputs before the engine receives them,
//! catching data-level errors early with clear diagnostics. The
//! collision kernel performs no validation of its own, so everything
//! rejected here is rejected for good.

use cascade_types::{CascadeError, CascadeResult};

use crate::contract::SimulationSetup;

/// Validates a complete simulation setup.
///
/// Checks:
/// - Domain extents are positive
/// - Engine config is self-consistent
/// - Ambient density is positive and finite
/// - Every region lies inside the domain with a non-empty box,
///   a fill level in [0, 1], and finite velocity
pub fn validate_setup(setup: &SimulationSetup) -> CascadeResult<()> {
    let [nx, ny, nz] = setup.domain;
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(CascadeError::InvalidDomain(format!(
            "domain extents must be positive, got {nx}x{ny}x{nz}"
        )));
    }

    setup.config.validate()?;

    if !setup.ambient_density.is_finite() || setup.ambient_density <= 0.0 {
        return Err(CascadeError::InvalidConfig(format!(
            "ambient_density must be positive and finite, got {}",
            setup.ambient_density
        )));
    }

    for (idx, region) in setup.regions.iter().enumerate() {
        for axis in 0..3 {
            if region.min[axis] >= region.max[axis] {
                return Err(CascadeError::InvalidDomain(format!(
                    "region {idx}: empty box on axis {axis} ({} >= {})",
                    region.min[axis], region.max[axis]
                )));
            }
            if region.max[axis] > setup.domain[axis] {
                return Err(CascadeError::InvalidDomain(format!(
                    "region {idx}: exceeds domain on axis {axis} ({} > {})",
                    region.max[axis], setup.domain[axis]
                )));
            }
        }
        if !(0.0..=1.0).contains(&region.fill) {
            return Err(CascadeError::InvalidConfig(format!(
                "region {idx}: fill level {} outside [0, 1]",
                region.fill
            )));
        }
        if region.velocity.iter().any(|v| !v.is_finite()) {
            return Err(CascadeError::InvalidConfig(format!(
                "region {idx}: velocity components must be finite"
            )));
        }
    }

    Ok(())
}
