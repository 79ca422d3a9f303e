//! Benchmark scenarios — procedural setup + config for each test case.

use serde::{Deserialize, Serialize};

use cascade_io::contract::{CellRegion, SimulationSetup};
use cascade_solver::LbmConfig;
use cascade_types::CellFlag;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Fluid at rest with no forcing — conservation regression.
    QuiescentTank,
    /// Gravity-driven fluid column with a free-surface skin.
    BreakingDam,
    /// Periodic channel flow around a solid box.
    ChannelObstacle,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::QuiescentTank,
            ScenarioKind::BreakingDam,
            ScenarioKind::ChannelObstacle,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::QuiescentTank => "quiescent_tank",
            ScenarioKind::BreakingDam => "breaking_dam",
            ScenarioKind::ChannelObstacle => "channel_obstacle",
        }
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Domain and initial conditions.
    pub setup: SimulationSetup,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
}

impl Scenario {
    /// Create the quiescent tank scenario.
    ///
    /// A 32³ box entirely full of fluid at rest, SRT, no gravity.
    /// Total mass must not drift and no motion may appear.
    pub fn quiescent_tank() -> Self {
        let n = 32;
        let setup = SimulationSetup {
            domain: [n, n, n],
            config: LbmConfig::default(),
            regions: vec![CellRegion::fluid([0, 0, 0], [n, n, n])],
            ..Default::default()
        };
        Self {
            kind: ScenarioKind::QuiescentTank,
            setup,
            timesteps: 200,
        }
    }

    /// Create the breaking dam scenario.
    ///
    /// The lower third of a 48×24×48 tank is fluid, capped by one layer
    /// of half-filled interface cells, with gas above. TRT relaxation,
    /// downward gravity, velocity limiting — the free-surface preset.
    pub fn breaking_dam() -> Self {
        let (nx, ny, nz) = (48, 24, 48);
        let fluid_top = 15;
        let mut interface = CellRegion::fluid([0, 0, fluid_top], [nx, ny, fluid_top + 1]);
        interface.flag = CellFlag::Interface;
        interface.fill = 0.5;

        let setup = SimulationSetup {
            domain: [nx, ny, nz],
            config: LbmConfig::free_surface(),
            regions: vec![
                CellRegion::fluid([0, 0, 1], [nx, ny, fluid_top]),
                interface,
                // Tank floor.
                CellRegion::obstacle([0, 0, 0], [nx, ny, 1]),
            ],
            ..Default::default()
        };
        Self {
            kind: ScenarioKind::BreakingDam,
            setup,
            timesteps: 300,
        }
    }

    /// Create the channel obstacle scenario.
    ///
    /// A periodic 64×32×32 channel moving in +x at low Mach, with a
    /// solid box spanning the mid-section. Exercises bounce-back under
    /// sustained flow.
    pub fn channel_obstacle() -> Self {
        let (nx, ny, nz) = (64, 32, 32);
        let mut flow = CellRegion::fluid([0, 0, 0], [nx, ny, nz]);
        flow.velocity = [0.05, 0.0, 0.0];

        let setup = SimulationSetup {
            domain: [nx, ny, nz],
            config: LbmConfig {
                inv_tau: 1.6,
                ..Default::default()
            },
            regions: vec![flow, CellRegion::obstacle([28, 12, 12], [36, 20, 20])],
            ..Default::default()
        };
        Self {
            kind: ScenarioKind::ChannelObstacle,
            setup,
            timesteps: 150,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::QuiescentTank => Self::quiescent_tank(),
            ScenarioKind::BreakingDam => Self::breaking_dam(),
            ScenarioKind::ChannelObstacle => Self::channel_obstacle(),
        }
    }

    /// Shrinks the scenario for fast CI runs: smaller step count,
    /// same physics.
    pub fn with_timesteps(mut self, timesteps: u32) -> Self {
        self.timesteps = timesteps;
        self
    }
}
