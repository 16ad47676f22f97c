//! Propositional constraint model over per-cell predicates.
//!
//! One boolean variable exists for each (predicate, cell) pair; the
//! [`KnowledgeBase`] grows a conjunction of rules over them and certifies
//! frontier cells by entailment queries against the [`DpllSolver`] oracle.

mod solver;
mod store;

pub use solver::{DpllSolver, Hypothesis, Satisfiability};
pub use store::KnowledgeBase;

use crate::error::Result;
use crate::world::{CellContent, Coord};

/// Per-cell predicates, one boolean atom each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Predicate {
    Gold = 0,
    Stench = 1,
    Breeze = 2,
    Wumpus = 3,
    Pit = 4,
}

/// Number of predicates (atoms) per cell.
pub const PREDICATE_COUNT: usize = 5;

/// A literal: variable `var` fixed to `value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lit {
    pub var: usize,
    pub value: bool,
}

impl Lit {
    pub fn positive(var: usize) -> Self {
        Self { var, value: true }
    }

    pub fn negative(var: usize) -> Self {
        Self { var, value: false }
    }

    pub fn negated(self) -> Self {
        Self {
            var: self.var,
            value: !self.value,
        }
    }
}

/// Disjunction of literals.
pub type Clause = Vec<Lit>;

/// Verdict of the three-step safety protocol for a frontier cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Safety {
    /// The cell provably does not hold the Wumpus (it may still hold a pit).
    WumpusFree,
    /// The cell provably does not hold a pit (it may still hold the Wumpus).
    PitFree,
    /// The cell provably holds neither hazard.
    Certified,
    /// Deduction stalls on this cell.
    Undecided,
}

impl Safety {
    /// True when the verdict permits a supervised move onto the cell.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Safety::Undecided)
    }
}

/// Deduction seam consumed by the frontier explorer.
///
/// Implemented by [`KnowledgeBase`]; tests substitute stubs to pin the
/// explorer into specific deduction regimes.
pub trait SafetyOracle {
    /// Commit unit rules fixing each observed predicate for `cell`.
    fn assert_percept(&mut self, cell: Coord, content: CellContent);

    /// Run the safety protocol for a candidate cell.
    fn certify(&mut self, cell: Coord) -> Result<Safety>;
}
