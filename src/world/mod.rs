//! World query interface and the grid-bound simulator.
//!
//! The core (exploration, planning, routing) only sees the [`World`] trait;
//! [`GridWorld`] is the bundled simulator implementing it.

mod grid;
mod simulator;

pub use grid::{CellContent, Coord, Knowledge};
pub use simulator::GridWorld;

use crate::error::Result;

/// Outcome of an unconditional probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The destination was harmless; the agent moved and read its percept.
    Revealed(CellContent),
    /// The destination was hazardous; a large penalty was charged and
    /// nothing was revealed.
    Rebuffed,
}

/// Outcome of a single adjacent step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The step landed on a treasure; the granted reward is attached.
    /// Each treasure is granted exactly once.
    Collected(u64),
}

/// The world query interface consumed by the core.
///
/// All operations are synchronous and charge their cost before returning.
pub trait World {
    /// Grid dimension N.
    fn size(&self) -> usize;

    /// The agent's current cell.
    fn position(&self) -> Coord;

    /// Read the current cell's percept, marking it revealed.
    fn percepts(&mut self) -> CellContent;

    /// Unconditional move to `c`. Safe only on cells certified hazard-free:
    /// a hazardous destination is rebuffed with a large penalty.
    fn probe(&mut self, c: Coord) -> Result<ProbeOutcome>;

    /// Supervised move to `c` at a moderate cost. Always physically
    /// succeeds, even onto a hazard cell, and reveals the destination.
    fn cautious_probe(&mut self, c: Coord) -> Result<CellContent>;

    /// Single adjacent step. Landing on a hazard is terminal.
    fn go_to(&mut self, c: Coord) -> Result<MoveOutcome>;

    /// Cumulative cost counter.
    fn cost(&self) -> u64;

    /// Cumulative reward counter.
    fn reward(&self) -> u64;

    /// The agent-side map of revealed cells.
    fn knowledge(&self) -> &Knowledge;
}
