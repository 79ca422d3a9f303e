//! Lattice grid state — SoA buffers for all per-cell data.
//!
//! This is the primary mutable data structure during simulation.
//! The collision and streaming passes read and write these buffers
//! each timestep.
//!
//! # Layout
//!
//! Distributions are stored cell-major: the 19 populations of one cell
//! are contiguous, so the collision pass splits the buffer into
//! disjoint per-cell chunks and updates them in parallel:
//! ```text
//! f: [cell0_dd0 .. cell0_dd18, cell1_dd0 .. cell1_dd18, ...]
//! ```
//! Flags and fluid fractions are one plane each, indexed by
//! `x + nx·(y + ny·z)`.
//!
//! Cells are fixed in number and position for the grid's lifetime; only
//! their scalar contents mutate. Phase changes (fluid ↔ interface ↔
//! gas) are flag rewrites by an external free-surface subsystem between
//! collision passes.

use cascade_lattice::equilibrium::{self, EquilibriumModel};
use cascade_lattice::{moments, Vec3, Q};
use cascade_types::{CascadeError, CascadeResult, CellFlag, Scalar};

/// SoA lattice state buffers.
pub struct LatticeGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    /// Distributions, cell-major (`cell * Q + direction`).
    f: Vec<Scalar>,
    /// One flag per cell.
    flags: Vec<CellFlag>,
    /// Fill level in [0, 1]; read by the gravity forcing term.
    fluid_fraction: Vec<Scalar>,
}

impl LatticeGrid {
    /// Creates a grid of Gas cells with zeroed distributions.
    ///
    /// Rejects non-positive extents; everything downstream assumes a
    /// non-degenerate domain.
    pub fn new(nx: usize, ny: usize, nz: usize) -> CascadeResult<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(CascadeError::InvalidDomain(format!(
                "domain extents must be positive, got {nx}x{ny}x{nz}"
            )));
        }
        let ncells = nx * ny * nz;
        Ok(Self {
            nx,
            ny,
            nz,
            f: vec![0.0; ncells * Q],
            flags: vec![CellFlag::Gas; ncells],
            fluid_fraction: vec![0.0; ncells],
        })
    }

    /// Domain extents `[nx, ny, nz]`.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.flags.len()
    }

    /// Linear index of cell (x, y, z).
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny && z < self.nz);
        x + self.nx * (y + self.ny * z)
    }

    #[inline]
    pub fn flag(&self, x: usize, y: usize, z: usize) -> CellFlag {
        self.flags[self.index(x, y, z)]
    }

    #[inline]
    pub fn fluid_fraction(&self, x: usize, y: usize, z: usize) -> Scalar {
        self.fluid_fraction[self.index(x, y, z)]
    }

    /// Sets a cell's flag and fill level, leaving distributions as-is.
    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, flag: CellFlag, fill: Scalar) {
        let idx = self.index(x, y, z);
        self.flags[idx] = flag;
        self.fluid_fraction[idx] = fill;
    }

    /// The 19 populations of one cell, copied out.
    #[inline]
    pub fn distributions(&self, x: usize, y: usize, z: usize) -> [Scalar; Q] {
        let base = self.index(x, y, z) * Q;
        let mut dd = [0.0; Q];
        dd.copy_from_slice(&self.f[base..base + Q]);
        dd
    }

    /// Mutable view of one cell's 19 populations.
    #[inline]
    pub fn distributions_mut(&mut self, x: usize, y: usize, z: usize) -> &mut [Scalar; Q] {
        let base = self.index(x, y, z) * Q;
        (&mut self.f[base..base + Q])
            .try_into()
            .expect("cell stride is Q")
    }

    /// Sets one cell's populations to the equilibrium for `(rho, u)`.
    pub fn set_equilibrium(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        model: EquilibriumModel,
        rho: Scalar,
        velocity: Vec3,
    ) {
        let dd = self.distributions_mut(x, y, z);
        for (i, f) in dd.iter_mut().enumerate() {
            *f = equilibrium::equilibrium(model, i, rho, velocity);
        }
    }

    /// Initializes every cell to the same equilibrium state.
    pub fn init_equilibrium(&mut self, model: EquilibriumModel, rho: Scalar, velocity: Vec3) {
        let mut eq = [0.0; Q];
        for (i, f) in eq.iter_mut().enumerate() {
            *f = equilibrium::equilibrium(model, i, rho, velocity);
        }
        for cell in self.f.chunks_exact_mut(Q) {
            cell.copy_from_slice(&eq);
        }
    }

    /// Density at one cell (zeroth moment).
    pub fn density_at(&self, x: usize, y: usize, z: usize) -> Scalar {
        moments::density(&self.distributions(x, y, z))
    }

    /// Density and velocity at one cell. Only meaningful for
    /// Fluid/Interface cells.
    pub fn moments_at(&self, x: usize, y: usize, z: usize) -> (Scalar, Vec3) {
        moments::moments(&self.distributions(x, y, z))
    }

    /// Total mass over Fluid and Interface cells, weighted by fill
    /// level. Accumulated in `f64`: this is the conservation metric and
    /// must not drift from summation order alone.
    pub fn total_mass(&self) -> f64 {
        let mut mass = 0.0f64;
        for (cell, chunk) in self.f.chunks_exact(Q).enumerate() {
            match self.flags[cell] {
                CellFlag::Fluid => {
                    mass += chunk.iter().map(|&v| v as f64).sum::<f64>();
                }
                CellFlag::Interface => {
                    let rho: f64 = chunk.iter().map(|&v| v as f64).sum();
                    mass += rho * self.fluid_fraction[cell] as f64;
                }
                CellFlag::Obstacle | CellFlag::Gas => {}
            }
        }
        mass
    }

    /// Raw distribution buffer, cell-major. Exposed for the streaming
    /// pass and the field snapshot export.
    #[inline]
    pub fn raw_distributions(&self) -> &[Scalar] {
        &self.f
    }

    /// Mutable raw distribution buffer.
    #[inline]
    pub fn raw_distributions_mut(&mut self) -> &mut [Scalar] {
        &mut self.f
    }

    /// Raw flag plane.
    #[inline]
    pub fn raw_flags(&self) -> &[CellFlag] {
        &self.flags
    }

    /// Raw fluid-fraction plane.
    #[inline]
    pub fn raw_fluid_fractions(&self) -> &[Scalar] {
        &self.fluid_fraction
    }

    /// Swaps the distribution buffer with `other`. The buffers must
    /// have identical length; used by the streaming pass to ping-pong.
    pub(crate) fn swap_distributions(&mut self, other: &mut Vec<Scalar>) {
        debug_assert_eq!(self.f.len(), other.len());
        std::mem::swap(&mut self.f, other);
    }

    /// Simultaneous borrows for the collision pass: mutable
    /// distributions, shared flags and fill levels.
    pub(crate) fn split_for_collision(&mut self) -> (&mut [Scalar], &[CellFlag], &[Scalar]) {
        (&mut self.f, &self.flags, &self.fluid_fraction)
    }
}
