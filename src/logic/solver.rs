//! DPLL satisfiability oracle with a LIFO clause stack.
//!
//! The vocabulary is fixed at construction; clauses are pushed as the agent
//! learns, and hypothetical clauses are retracted in strict LIFO order.
//! Solving is plain DPLL: unit propagation to fixpoint, then branching on
//! the first unassigned variable with chronological backtracking. A decision
//! budget bounds worst-case latency; exhausting it is a fatal oracle error.

use crate::error::{GuhaError, Result};

use super::{Clause, Lit};

/// Answer from the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Satisfiability {
    Satisfiable,
    Unsatisfiable,
}

/// Propositional solver over a fixed vocabulary.
pub struct DpllSolver {
    num_vars: usize,
    clauses: Vec<Clause>,
    max_decisions: u64,
}

/// Default branching budget per `solve` call.
const DEFAULT_MAX_DECISIONS: u64 = 1 << 20;

enum Propagation {
    Stable,
    Unit(Lit),
    Conflict,
}

impl DpllSolver {
    /// Create a solver over `num_vars` boolean variables.
    pub fn new(num_vars: usize) -> Self {
        Self::with_budget(num_vars, DEFAULT_MAX_DECISIONS)
    }

    /// Create a solver with an explicit decision budget.
    pub fn with_budget(num_vars: usize, max_decisions: u64) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
            max_decisions,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of clauses currently on the stack.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Push a clause onto the stack.
    pub fn push(&mut self, clause: Clause) {
        debug_assert!(clause.iter().all(|lit| lit.var < self.num_vars));
        self.clauses.push(clause);
    }

    /// Retract the most recently pushed clause (strict LIFO).
    pub fn pop(&mut self) -> Option<Clause> {
        self.clauses.pop()
    }

    /// Push a hypothetical clause inside a scope that retracts it on drop,
    /// whether or not the query succeeds.
    pub fn assume(&mut self, clause: Clause) -> Hypothesis<'_> {
        self.push(clause);
        Hypothesis { solver: self }
    }

    /// Decide satisfiability of the current clause stack.
    pub fn solve(&self) -> Result<Satisfiability> {
        let mut assignment = vec![None; self.num_vars];
        let mut budget = self.max_decisions;
        if self.search(&mut assignment, &mut budget)? {
            Ok(Satisfiability::Satisfiable)
        } else {
            Ok(Satisfiability::Unsatisfiable)
        }
    }

    /// Scan all clauses under the current assignment for a unit clause or a
    /// conflict.
    fn scan(&self, assignment: &[Option<bool>]) -> Propagation {
        for clause in &self.clauses {
            let mut satisfied = false;
            let mut unassigned = None;
            let mut unassigned_count = 0;

            for &lit in clause {
                match assignment[lit.var] {
                    Some(value) => {
                        if value == lit.value {
                            satisfied = true;
                            break;
                        }
                    }
                    None => {
                        unassigned = Some(lit);
                        unassigned_count += 1;
                    }
                }
            }

            if satisfied {
                continue;
            }
            match (unassigned_count, unassigned) {
                (0, _) => return Propagation::Conflict,
                (1, Some(lit)) => return Propagation::Unit(lit),
                _ => {}
            }
        }
        Propagation::Stable
    }

    fn search(&self, assignment: &mut [Option<bool>], budget: &mut u64) -> Result<bool> {
        // Unit propagation to fixpoint; remember what we assigned so a
        // failed branch leaves the assignment untouched.
        let mut propagated = Vec::new();
        loop {
            match self.scan(assignment) {
                Propagation::Conflict => {
                    for &var in &propagated {
                        assignment[var] = None;
                    }
                    return Ok(false);
                }
                Propagation::Unit(lit) => {
                    assignment[lit.var] = Some(lit.value);
                    propagated.push(lit.var);
                }
                Propagation::Stable => break,
            }
        }

        let unassigned = (0..self.num_vars).find(|&var| assignment[var].is_none());
        let Some(var) = unassigned else {
            // Every variable assigned without conflict
            return Ok(true);
        };

        if *budget == 0 {
            return Err(GuhaError::Oracle(
                "decision budget exhausted".to_string(),
            ));
        }
        *budget -= 1;

        for value in [true, false] {
            assignment[var] = Some(value);
            if self.search(assignment, budget)? {
                return Ok(true);
            }
        }

        assignment[var] = None;
        for &v in &propagated {
            assignment[v] = None;
        }
        Ok(false)
    }
}

/// Scoped hypothetical assertion. Dropping the scope pops the hypothesis,
/// so an early return cannot leave the clause stack polluted.
pub struct Hypothesis<'a> {
    solver: &'a mut DpllSolver,
}

impl Hypothesis<'_> {
    pub fn solve(&self) -> Result<Satisfiability> {
        self.solver.solve()
    }
}

impl Drop for Hypothesis<'_> {
    fn drop(&mut self) {
        self.solver.pop();
    }
}
