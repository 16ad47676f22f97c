//! # GuhaNav: Knowledge-Based Hazard-Grid Navigation
//!
//! A library for exploring an unknown N×N hazard grid, deducing which cells
//! are provably safe from indirect percepts, and routing through every
//! discovered treasure on shortest paths.
//!
//! ## Features
//!
//! - **Deductive Safety**: A propositional knowledge base over per-cell
//!   predicates, queried through an in-crate DPLL satisfiability oracle
//! - **Frontier Exploration**: Safe/unsafe queue traversal with stall
//!   detection and bounded forced probing, guaranteed to reveal the full grid
//! - **Shortest-Path Planning**: A* on the 4-connected grid over the hazard
//!   map distilled from exploration
//! - **Treasure Routing**: Greedy multi-goal sequencing into one contiguous
//!   route, executed step by step against the world
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guha_nav::{run_mission, GridWorld, WorldConfig};
//!
//! let mut world = GridWorld::from_layout(
//!     &["..P.", "....", "WG..", "...."],
//!     WorldConfig::default(),
//! )?;
//!
//! let summary = run_mission(&mut world)?;
//! println!(
//!     "explored {} cells, collected {} at cost {}",
//!     summary.exploration.known, summary.reward, summary.cost
//! );
//! # Ok::<(), guha_nav::GuhaError>(())
//! ```
//!
//! ## Coordinate Convention
//!
//! Cells are addressed `(i, j)` with `i` the row and `j` the column, both in
//! `[0, N)`. The agent starts at the origin `(0, 0)`, which is guaranteed
//! hazard-free.

// Errors and crate-wide Result
pub mod error;

// Configuration (world size, hazard rates, cost/reward tables)
pub mod config;

// World query interface and the bundled grid simulator
pub mod world;

// Propositional knowledge base and satisfiability oracle
pub mod logic;

// Frontier exploration
pub mod exploration;

// Shortest-path planning and treasure routing
pub mod planning;

// Re-export commonly used types
pub use config::{CostConfig, RewardConfig, WorldConfig};
pub use error::{GuhaError, Result};
pub use exploration::{explore, ExplorationReport, FrontierExplorer};
pub use logic::{DpllSolver, KnowledgeBase, Safety, SafetyOracle};
pub use planning::{collect, shortest_path, HazardMap, TreasureRouter};
pub use world::{CellContent, Coord, GridWorld, Knowledge, World};

/// Outcome of a full explore-then-collect mission.
#[derive(Clone, Copy, Debug)]
pub struct MissionSummary {
    /// Counters from the exploration phase
    pub exploration: ExplorationReport,
    /// Reward gained from collected treasure
    pub reward: u64,
    /// Final cumulative world cost
    pub cost: u64,
}

/// Run a complete mission against a world: explore every cell, distill the
/// hazard map, route through the discovered treasure, and collect it.
///
/// An empty route (no treasure, or some treasure unreachable) is not an
/// error; the mission simply ends after exploration.
pub fn run_mission<W: World>(world: &mut W) -> Result<MissionSummary> {
    let exploration = explore(world)?;

    let map = HazardMap::from_knowledge(world.knowledge());
    let route = TreasureRouter::new(&map).route(world.position());
    let reward = collect(world, &route)?;

    Ok(MissionSummary {
        exploration,
        reward,
        cost: world.cost(),
    })
}
