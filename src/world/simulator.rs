//! Grid-bound world simulator.
//!
//! Holds the ground-truth cell contents, tracks the agent's position and the
//! cumulative cost/reward counters, and reveals cells through percept
//! readings. The configuration is an explicit value; two worlds never share
//! state.

use rand::Rng;

use crate::config::WorldConfig;
use crate::error::{GuhaError, Result};

use super::grid::{CellContent, Coord, Knowledge};
use super::{MoveOutcome, ProbeOutcome, World};

/// World simulator over an N x N hazard grid.
pub struct GridWorld {
    config: WorldConfig,
    n: usize,
    cells: Vec<CellContent>,
    knowledge: Knowledge,
    position: Coord,
    dead: bool,
    cost: u64,
    reward: u64,
}

impl GridWorld {
    /// Build a world from a fixed layout, one character per cell:
    /// `W` Wumpus, `P` pit, `G` gold, `.` empty. Stench and breeze auras
    /// are derived, not written in the layout.
    pub fn from_layout(rows: &[&str], config: WorldConfig) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(GuhaError::Config("empty world layout".to_string()));
        }

        let mut cells = vec![CellContent::EMPTY; n * n];
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != n {
                return Err(GuhaError::Config(format!(
                    "layout row {} has {} cells, expected {}",
                    i,
                    row.chars().count(),
                    n
                )));
            }
            for (j, symbol) in row.chars().enumerate() {
                let cell = &mut cells[i * n + j];
                match symbol {
                    '.' => {}
                    'W' => cell.wumpus = true,
                    'P' => cell.pit = true,
                    'G' => cell.gold = true,
                    other => {
                        return Err(GuhaError::Config(format!(
                            "unknown layout symbol '{}' at ({}, {})",
                            other, i, j
                        )))
                    }
                }
            }
        }

        if cells[0].is_hazard() {
            return Err(GuhaError::Config(
                "origin cell must be hazard-free".to_string(),
            ));
        }

        compute_auras(&mut cells, n);
        Ok(Self::from_cells(cells, n, config))
    }

    /// Generate a random world: the Wumpus uniformly anywhere but the
    /// origin, one guaranteed gold off the Wumpus, then independent pit and
    /// extra-gold placement per cell at the configured rates.
    pub fn generate(config: WorldConfig, rng: &mut impl Rng) -> Self {
        let n = config.size;
        let mut cells = vec![CellContent::EMPTY; n * n];

        let mut wumpus = Coord::new(rng.gen_range(0..n), rng.gen_range(0..n));
        while wumpus == Coord::ORIGIN {
            wumpus = Coord::new(rng.gen_range(0..n), rng.gen_range(0..n));
        }
        cells[wumpus.i * n + wumpus.j].wumpus = true;

        let mut gold = Coord::new(rng.gen_range(0..n), rng.gen_range(0..n));
        while gold == wumpus {
            gold = Coord::new(rng.gen_range(0..n), rng.gen_range(0..n));
        }
        cells[gold.i * n + gold.j].gold = true;

        for i in 0..n {
            for j in 0..n {
                let c = Coord::new(i, j);
                if c == Coord::ORIGIN || c == wumpus {
                    continue;
                }
                let cell = &mut cells[i * n + j];
                if rng.gen::<f64>() < config.pit_rate && !cell.gold {
                    cell.pit = true;
                }
                if rng.gen::<f64>() < config.gold_rate && !cell.pit {
                    cell.gold = true;
                }
            }
        }

        compute_auras(&mut cells, n);
        Self::from_cells(cells, n, config)
    }

    fn from_cells(cells: Vec<CellContent>, n: usize, config: WorldConfig) -> Self {
        let initial_reward = config.rewards.initial;
        Self {
            config,
            n,
            knowledge: Knowledge::new(n),
            cells,
            position: Coord::ORIGIN,
            dead: false,
            cost: 0,
            reward: initial_reward,
        }
    }

    /// Whether the agent has died on a hazard.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    fn in_bounds(&self, c: Coord) -> bool {
        c.i < self.n && c.j < self.n
    }

    fn content(&self, c: Coord) -> CellContent {
        self.cells[c.i * self.n + c.j]
    }
}

/// Derive stench/breeze auras from Wumpus and pit placement. Every
/// 4-neighbor of the Wumpus gets stench, every 4-neighbor of a pit gets
/// breeze (biconditional by construction: auras appear nowhere else).
fn compute_auras(cells: &mut [CellContent], n: usize) {
    for i in 0..n {
        for j in 0..n {
            let cell = cells[i * n + j];
            for nbr in Coord::new(i, j).neighbors(n) {
                if cell.wumpus {
                    cells[nbr.i * n + nbr.j].stench = true;
                }
                if cell.pit {
                    cells[nbr.i * n + nbr.j].breeze = true;
                }
            }
        }
    }
}

impl World for GridWorld {
    fn size(&self) -> usize {
        self.n
    }

    fn position(&self) -> Coord {
        self.position
    }

    fn percepts(&mut self) -> CellContent {
        self.cost += self.config.costs.percept;
        let content = self.content(self.position);
        self.knowledge.reveal(self.position, content);
        content
    }

    fn probe(&mut self, c: Coord) -> Result<ProbeOutcome> {
        self.cost += self.config.costs.probe;

        if !self.in_bounds(c) {
            return Err(GuhaError::InvalidMove(c.i, c.j));
        }

        if self.content(c).is_hazard() {
            self.cost += self.config.costs.failed_probe;
            tracing::warn!("probe onto ({}, {}) rebuffed by hazard", c.i, c.j);
            return Ok(ProbeOutcome::Rebuffed);
        }

        self.position = c;
        Ok(ProbeOutcome::Revealed(self.percepts()))
    }

    fn cautious_probe(&mut self, c: Coord) -> Result<CellContent> {
        self.cost += self.config.costs.cautious_probe;

        if !self.in_bounds(c) {
            return Err(GuhaError::InvalidMove(c.i, c.j));
        }

        self.position = c;
        Ok(self.percepts())
    }

    fn go_to(&mut self, c: Coord) -> Result<MoveOutcome> {
        self.cost += self.config.costs.step;

        if !self.in_bounds(c) || !self.position.is_adjacent(&c) {
            return Err(GuhaError::InvalidMove(c.i, c.j));
        }

        self.position = c;
        let content = self.content(c);

        if content.is_hazard() {
            self.dead = true;
            self.cost += self.config.costs.death;
            tracing::warn!("agent died at ({}, {})", c.i, c.j);
            return Err(GuhaError::HazardContact(c.i, c.j));
        }

        if content.gold {
            // Reward is granted once: the cell's gold is removed on pickup.
            self.cells[c.i * self.n + c.j].gold = false;
            self.reward += self.config.rewards.gold;
            tracing::info!("treasure collected at ({}, {})", c.i, c.j);
            return Ok(MoveOutcome::Collected(self.config.rewards.gold));
        }

        Ok(MoveOutcome::Moved)
    }

    fn cost(&self) -> u64 {
        self.cost
    }

    fn reward(&self) -> u64 {
        self.reward
    }

    fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }
}
