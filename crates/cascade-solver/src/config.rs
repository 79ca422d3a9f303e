//! Simulation configuration.
//!
//! Collision mode, equilibrium formulation, velocity limiting, and
//! gravitation are fields of one explicit config value passed into the
//! kernel — runtime switches, not compile-time features. Parameters are
//! constant for the duration of a run; the driver may swap in a new
//! config between full collision passes, never mid-pass.

use serde::{Deserialize, Serialize};

use cascade_lattice::{EquilibriumModel, Vec3};
use cascade_types::{constants, CascadeError, CascadeResult, Scalar};

/// LBM collision relaxation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxationMode {
    /// Single relaxation time (BGK): one rate for all 19 populations.
    #[default]
    Srt,
    /// Two relaxation times: separate rates for the even (conserved)
    /// and odd (momentum-carrying) parts of each direction pair.
    /// Improves stability and makes wall placement viscosity-independent.
    Trt,
}

/// Run-wide parameters for the collision-and-streaming engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LbmConfig {
    /// Inverse single relaxation time (1/τ). Governs viscosity.
    pub inv_tau: Scalar,

    /// Second relaxation rate, applied to the odd (antisymmetric) part
    /// of each direction pair. Only read in `Trt` mode.
    pub inv_trt_tau: Scalar,

    /// Collision relaxation mode.
    pub relaxation: RelaxationMode,

    /// Equilibrium distribution formulation.
    pub equilibrium: EquilibriumModel,

    /// Gravitational acceleration in lattice units per timestep².
    pub gravitation: [Scalar; 3],

    /// Whether the gravitational forcing term is applied at all.
    pub gravitation_enabled: bool,

    /// Optional cap on velocity magnitude. When set, the velocity used
    /// for the equilibrium computation is rescaled to this speed
    /// (direction preserved); the stored distributions are not touched
    /// directly. `None` disables limiting.
    pub velocity_limit: Option<Scalar>,

    /// Interval (timesteps) between driver sanity scans for divergence.
    /// 0 disables scanning.
    pub sanity_check_interval: u32,
}

impl Default for LbmConfig {
    fn default() -> Self {
        Self {
            inv_tau: constants::DEFAULT_INV_TAU,
            inv_trt_tau: constants::DEFAULT_INV_TAU,
            relaxation: RelaxationMode::default(),
            equilibrium: EquilibriumModel::default(),
            gravitation: [0.0, 0.0, 0.0],
            gravitation_enabled: false,
            velocity_limit: None,
            sanity_check_interval: constants::DEFAULT_SANITY_INTERVAL,
        }
    }
}

impl LbmConfig {
    /// Creates a config for free-surface runs: TRT relaxation, downward
    /// gravity, and a velocity cap that keeps violent splashes inside
    /// the stable low-Mach regime.
    pub fn free_surface() -> Self {
        Self {
            relaxation: RelaxationMode::Trt,
            inv_trt_tau: 1.1,
            gravitation: [0.0, 0.0, -1.0e-4],
            gravitation_enabled: true,
            velocity_limit: Some(0.1),
            ..Default::default()
        }
    }

    /// Gravitation as a vector.
    #[inline]
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravitation)
    }

    /// Rejects physically or numerically invalid parameters.
    ///
    /// Called at setup time, before any collision pass begins; the
    /// kernel itself assumes pre-validated parameters.
    pub fn validate(&self) -> CascadeResult<()> {
        if !self.inv_tau.is_finite() || self.inv_tau <= 0.0 {
            return Err(CascadeError::InvalidConfig(format!(
                "inv_tau must be positive and finite, got {}",
                self.inv_tau
            )));
        }
        if self.relaxation == RelaxationMode::Trt
            && (!self.inv_trt_tau.is_finite() || self.inv_trt_tau <= 0.0)
        {
            return Err(CascadeError::InvalidConfig(format!(
                "inv_trt_tau must be positive and finite in TRT mode, got {}",
                self.inv_trt_tau
            )));
        }
        if self.gravitation.iter().any(|g| !g.is_finite()) {
            return Err(CascadeError::InvalidConfig(
                "gravitation components must be finite".into(),
            ));
        }
        if let Some(limit) = self.velocity_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(CascadeError::InvalidConfig(format!(
                    "velocity_limit must be positive and finite, got {limit}"
                )));
            }
        }
        Ok(())
    }
}
