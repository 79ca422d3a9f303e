//! Timestep driver — the loop around the kernel.
//!
//! One step is: full-domain collision pass, then streaming pass, then
//! (periodically) a sanity scan. The collision pass runs in place and
//! in parallel: the kernel never reads another cell, so per-cell chunks
//! are independent (rayon). Streaming reads neighbor cells' pre-update
//! values, so it ping-pongs into a scratch buffer with periodic wrap at
//! the domain faces.
//!
//! Divergence detection lives here, not in the kernel: the scan treats
//! non-finite moments or collapsing density in any Fluid/Interface cell
//! as fatal. External free-surface or boundary passes may run between
//! the exposed passes; config changes take effect at the next full pass.

use std::time::Instant;

use rayon::prelude::*;

use cascade_lattice::{DIRECTIONS, Q};
use cascade_types::{CascadeError, CascadeResult, Scalar};

use crate::collision;
use crate::config::LbmConfig;
use crate::grid::LatticeGrid;

/// Result of one timestep.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Timestep index after this step (1-based).
    pub timestep: u32,
    /// Wall-clock time for the entire step (seconds).
    pub wall_time: f64,
    /// Maximum post-collision speed over collided cells — the CFL
    /// health indicator for the run.
    pub max_speed: Scalar,
}

/// Owns the grid and the streaming scratch buffer; advances the
/// simulation one timestep at a time.
pub struct TimeStepper {
    grid: LatticeGrid,
    scratch: Vec<Scalar>,
    timestep: u32,
}

impl TimeStepper {
    /// Wraps a prepared grid.
    pub fn new(grid: LatticeGrid) -> Self {
        let scratch = vec![0.0; grid.cell_count() * Q];
        Self {
            grid,
            scratch,
            timestep: 0,
        }
    }

    /// Read access to the simulation grid.
    #[inline]
    pub fn grid(&self) -> &LatticeGrid {
        &self.grid
    }

    /// Mutable access, for external passes (free-surface flag rewrites,
    /// inflow/outflow forcing) between steps.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut LatticeGrid {
        &mut self.grid
    }

    /// Number of completed timesteps.
    #[inline]
    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    /// Advances the simulation by one timestep.
    pub fn step(&mut self, config: &LbmConfig) -> CascadeResult<StepReport> {
        let start = Instant::now();

        let max_speed = self.collide_pass(config);
        self.stream_pass();
        self.timestep += 1;

        if config.sanity_check_interval > 0 && self.timestep % config.sanity_check_interval == 0 {
            self.sanity_scan()?;
        }

        Ok(StepReport {
            timestep: self.timestep,
            wall_time: start.elapsed().as_secs_f64(),
            max_speed,
        })
    }

    /// Full-domain collision pass, in place and in parallel.
    ///
    /// Returns the maximum post-collision speed over collided cells.
    pub fn collide_pass(&mut self, config: &LbmConfig) -> Scalar {
        let (f, flags, fill) = self.grid.split_for_collision();
        f.par_chunks_exact_mut(Q)
            .enumerate()
            .map(|(cell, chunk)| {
                let dd: &mut [Scalar; Q] = chunk.try_into().expect("cell stride is Q");
                match collision::collide_cell(dd, flags[cell], fill[cell], config) {
                    Some(update) => update.velocity.length(),
                    None => 0.0,
                }
            })
            .reduce(|| 0.0, Scalar::max)
    }

    /// Streaming pass: every population moves one cell along its
    /// direction. Pull scheme — each destination cell gathers
    /// `dd[i]` from the neighbor at `-e_i` — with periodic wrap.
    ///
    /// Gas cells are advected like any other; their contents only
    /// acquire meaning once an external free-surface pass converts
    /// them. Obstacle cells were pair-swapped during collision, so
    /// streaming out of them returns reflected populations to the
    /// fluid: halfway bounce-back.
    pub fn stream_pass(&mut self) {
        let [nx, ny, nz] = self.grid.dims();
        let src = self.grid.raw_distributions();

        self.scratch
            .par_chunks_exact_mut(Q)
            .enumerate()
            .for_each(|(cell, out)| {
                let x = cell % nx;
                let y = (cell / nx) % ny;
                let z = cell / (nx * ny);
                for (i, e) in DIRECTIONS.iter().enumerate() {
                    let sx = wrap(x as isize - e[0] as isize, nx);
                    let sy = wrap(y as isize - e[1] as isize, ny);
                    let sz = wrap(z as isize - e[2] as isize, nz);
                    out[i] = src[(sx + nx * (sy + ny * sz)) * Q + i];
                }
            });

        self.grid.swap_distributions(&mut self.scratch);
    }

    /// Scans for numerical divergence: NaN/Inf moments or `rho ≤ 0` in
    /// any Fluid/Interface cell. The kernel never validates; this is
    /// the driver-side detection the error model requires.
    pub fn sanity_scan(&self) -> CascadeResult<()> {
        let [nx, ny, nz] = self.grid.dims();
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    if !self.grid.flag(x, y, z).is_collided() {
                        continue;
                    }
                    let rho = self.grid.density_at(x, y, z);
                    if !rho.is_finite() {
                        return Err(CascadeError::Diverged {
                            timestep: self.timestep,
                            detail: format!("non-finite state at cell ({x}, {y}, {z})"),
                        });
                    }
                    if rho <= 0.0 {
                        return Err(CascadeError::Diverged {
                            timestep: self.timestep,
                            detail: format!(
                                "density collapsed to {rho} at cell ({x}, {y}, {z})"
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[inline]
fn wrap(v: isize, n: usize) -> usize {
    v.rem_euclid(n as isize) as usize
}
