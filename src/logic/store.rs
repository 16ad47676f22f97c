//! Knowledge base: constraint store plus the safety decision protocol.

use crate::error::Result;
use crate::world::{CellContent, Coord};

use super::solver::{DpllSolver, Satisfiability};
use super::{Clause, Lit, Predicate, Safety, SafetyOracle, PREDICATE_COUNT};

/// Constraint store over the N² x 5 cell-predicate atoms.
///
/// Created once per run and seeded with the static world rules before any
/// percept arrives; afterwards it grows monotonically through percept
/// assertions, with hypothetical pushes always rolled back.
pub struct KnowledgeBase {
    solver: DpllSolver,
    n: usize,
    wumpus_located: bool,
}

impl KnowledgeBase {
    /// Seed the store for an `n` x `n` grid: hazard mutual exclusions per
    /// cell, the biconditional aura rules linking Pit to Breeze and Wumpus
    /// to Stench, and hazard-free origin.
    pub fn new(n: usize) -> Self {
        let solver = DpllSolver::new(n * n * PREDICATE_COUNT);
        let mut kb = Self {
            solver,
            n,
            wumpus_located: false,
        };
        kb.seed_rules();
        kb
    }

    fn seed_rules(&mut self) {
        let origin = Coord::ORIGIN;
        self.solver
            .push(vec![Lit::negative(self.var(Predicate::Pit, origin))]);
        self.solver
            .push(vec![Lit::negative(self.var(Predicate::Wumpus, origin))]);

        for i in 0..self.n {
            for j in 0..self.n {
                let c = Coord::new(i, j);
                let wumpus = self.var(Predicate::Wumpus, c);
                let pit = self.var(Predicate::Pit, c);
                let gold = self.var(Predicate::Gold, c);
                let stench = self.var(Predicate::Stench, c);
                let breeze = self.var(Predicate::Breeze, c);

                // At most one of Wumpus/Pit, both exclusive with Gold
                self.solver
                    .push(vec![Lit::negative(wumpus), Lit::negative(pit)]);
                self.solver
                    .push(vec![Lit::negative(wumpus), Lit::negative(gold)]);
                self.solver
                    .push(vec![Lit::negative(pit), Lit::negative(gold)]);

                // Biconditionals: an aura holds iff some neighbor holds the
                // matching hazard.
                let mut breeze_needs_pit: Clause = vec![Lit::negative(breeze)];
                let mut stench_needs_wumpus: Clause = vec![Lit::negative(stench)];
                for nbr in c.neighbors(self.n) {
                    let nbr_pit = self.var(Predicate::Pit, nbr);
                    let nbr_wumpus = self.var(Predicate::Wumpus, nbr);
                    breeze_needs_pit.push(Lit::positive(nbr_pit));
                    stench_needs_wumpus.push(Lit::positive(nbr_wumpus));
                    self.solver
                        .push(vec![Lit::negative(nbr_pit), Lit::positive(breeze)]);
                    self.solver
                        .push(vec![Lit::negative(nbr_wumpus), Lit::positive(stench)]);
                }
                self.solver.push(breeze_needs_pit);
                self.solver.push(stench_needs_wumpus);
            }
        }
    }

    fn var(&self, pred: Predicate, c: Coord) -> usize {
        (c.i * self.n + c.j) * PREDICATE_COUNT + pred as usize
    }

    /// Whether any asserted percept has pinned the Wumpus down.
    pub fn wumpus_located(&self) -> bool {
        self.wumpus_located
    }

    /// Whether the current rule set is satisfiable. Asserted percepts from a
    /// well-formed world always leave the store consistent.
    pub fn is_consistent(&self) -> Result<bool> {
        Ok(self.solver.solve()? == Satisfiability::Satisfiable)
    }

    /// Number of committed rules (diagnostics and rollback tests).
    pub fn rule_count(&self) -> usize {
        self.solver.len()
    }

    /// KB ∧ hypothesis unsatisfiable? The hypothesis is retracted
    /// unconditionally, even on an oracle failure mid-query.
    fn refutes(&mut self, hypothesis: Clause) -> Result<bool> {
        let scope = self.solver.assume(hypothesis);
        let verdict = scope.solve()?;
        Ok(verdict == Satisfiability::Unsatisfiable)
    }

    /// Entailment: `lit` is entailed iff KB ∧ ¬lit is unsatisfiable.
    pub fn entails(&mut self, lit: Lit) -> Result<bool> {
        self.refutes(vec![lit.negated()])
    }
}

impl SafetyOracle for KnowledgeBase {
    fn assert_percept(&mut self, cell: Coord, content: CellContent) {
        for (pred, observed) in [
            (Predicate::Breeze, content.breeze),
            (Predicate::Stench, content.stench),
            (Predicate::Pit, content.pit),
            (Predicate::Wumpus, content.wumpus),
        ] {
            let var = self.var(pred, cell);
            let lit = if observed {
                Lit::positive(var)
            } else {
                Lit::negative(var)
            };
            self.solver.push(vec![lit]);
        }

        if content.wumpus {
            tracing::info!("wumpus located at ({}, {})", cell.i, cell.j);
            self.wumpus_located = true;
        }
    }

    fn certify(&mut self, cell: Coord) -> Result<Safety> {
        let wumpus = self.var(Predicate::Wumpus, cell);
        let pit = self.var(Predicate::Pit, cell);

        // 1. While the Wumpus is at large, try to prove it is not here.
        if !self.wumpus_located && self.entails(Lit::negative(wumpus))? {
            tracing::debug!("({}, {}) proven wumpus-free", cell.i, cell.j);
            return Ok(Safety::WumpusFree);
        }

        // 2. Try to prove there is no pit here.
        if self.entails(Lit::negative(pit))? {
            tracing::debug!("({}, {}) proven pit-free", cell.i, cell.j);
            return Ok(Safety::PitFree);
        }

        // 3. Neither proven individually: try to refute both at once.
        if self.refutes(vec![Lit::positive(pit), Lit::positive(wumpus)])? {
            tracing::debug!("({}, {}) proven doubly safe", cell.i, cell.j);
            return Ok(Safety::Certified);
        }

        Ok(Safety::Undecided)
    }
}
