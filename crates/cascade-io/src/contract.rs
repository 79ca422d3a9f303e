//! Simulation input contract types.
//!
//! These types define the I/O boundary of the Cascade engine. They are
//! serializable for CLI configuration and API transport: a run is fully
//! described by a domain size, an `LbmConfig`, and a list of cell
//! regions painted onto an otherwise empty (Gas) domain.

use serde::{Deserialize, Serialize};

use cascade_lattice::Vec3;
use cascade_solver::{LatticeGrid, LbmConfig};
use cascade_types::{constants, CascadeResult, CellFlag, Scalar};

/// Complete input specification for a simulation run.
///
/// Scalar fields precede the config table and region list so the TOML
/// form serializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSetup {
    /// Domain extents [nx, ny, nz] in cells.
    pub domain: [usize; 3],

    /// Initial density for all painted cells.
    pub ambient_density: Scalar,

    /// Engine parameters.
    pub config: LbmConfig,

    /// Cell regions, applied in order onto an all-Gas domain.
    /// Later regions overwrite earlier ones where they overlap.
    pub regions: Vec<CellRegion>,
}

/// An axis-aligned box of cells sharing one initial state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellRegion {
    /// Inclusive lower corner [x, y, z].
    pub min: [usize; 3],
    /// Exclusive upper corner [x, y, z].
    pub max: [usize; 3],
    /// Cell type painted into the box.
    pub flag: CellFlag,
    /// Fill level in [0, 1]. Only meaningful for Interface cells;
    /// use 1.0 for Fluid.
    pub fill: Scalar,
    /// Initial velocity for the box.
    pub velocity: [Scalar; 3],
}

impl CellRegion {
    /// A fully-filled fluid box at rest.
    pub fn fluid(min: [usize; 3], max: [usize; 3]) -> Self {
        Self {
            min,
            max,
            flag: CellFlag::Fluid,
            fill: 1.0,
            velocity: [0.0; 3],
        }
    }

    /// A solid obstacle box.
    pub fn obstacle(min: [usize; 3], max: [usize; 3]) -> Self {
        Self {
            min,
            max,
            flag: CellFlag::Obstacle,
            fill: 0.0,
            velocity: [0.0; 3],
        }
    }
}

impl Default for SimulationSetup {
    fn default() -> Self {
        Self {
            domain: [32, 32, 32],
            ambient_density: constants::REFERENCE_DENSITY,
            config: LbmConfig::default(),
            regions: Vec::new(),
        }
    }
}

impl SimulationSetup {
    /// Builds the initial lattice grid this setup describes.
    ///
    /// Validates first — the engine assumes pre-validated inputs, so
    /// rejection happens here, before any collision pass exists.
    pub fn build_grid(&self) -> CascadeResult<LatticeGrid> {
        crate::validator::validate_setup(self)?;

        let [nx, ny, nz] = self.domain;
        let mut grid = LatticeGrid::new(nx, ny, nz)?;

        for region in &self.regions {
            let velocity = Vec3::from_array(region.velocity);
            for z in region.min[2]..region.max[2] {
                for y in region.min[1]..region.max[1] {
                    for x in region.min[0]..region.max[0] {
                        grid.set_cell(x, y, z, region.flag, region.fill);
                        if region.flag.is_collided() {
                            grid.set_equilibrium(
                                x,
                                y,
                                z,
                                self.config.equilibrium,
                                self.ambient_density,
                                velocity,
                            );
                        }
                    }
                }
            }
        }

        Ok(grid)
    }
}
