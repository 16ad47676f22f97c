//! Frontier exploration state machine.
//!
//! Drives traversal of the unknown grid: cells whose percepts are quiet are
//! drained from the safe queue and their neighbors probed outright; ominous
//! cells park their neighbors behind the deduction protocol, and deadlocks
//! are broken by a single forced risk-accepting probe per stall.

use std::collections::{HashSet, VecDeque};

use crate::error::{GuhaError, Result};
use crate::logic::{Safety, SafetyOracle};
use crate::world::{Coord, ProbeOutcome, World};

/// Counters describing a completed exploration run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExplorationReport {
    /// Cells known at termination (always N² on success)
    pub known: usize,
    /// Moves issued (plain probes plus supervised/forced cautious probes)
    pub probes: usize,
    /// Risk-accepting probes issued to break stalls
    pub forced_probes: usize,
    /// Stall episodes detected
    pub stalls: usize,
    /// Plain probes rebuffed by a hazard (a soundness defect if nonzero)
    pub rebuffed: usize,
    /// Cumulative world cost at termination
    pub cost: u64,
}

/// Frontier explorer over safe/unsafe queues and the known set.
pub struct FrontierExplorer {
    safe: VecDeque<Coord>,
    pending: VecDeque<Coord>,
    known: HashSet<Coord>,
    stalled: bool,
}

impl FrontierExplorer {
    pub fn new() -> Self {
        Self {
            safe: VecDeque::new(),
            pending: VecDeque::new(),
            known: HashSet::new(),
            stalled: false,
        }
    }

    /// Explore until every cell of the grid is known.
    ///
    /// Percepts feed the oracle as unit rules; unprotected movement onto a
    /// cell happens only after the oracle certifies it, except for the one
    /// forced probe that resolves each stall episode.
    pub fn run<W, S>(&mut self, world: &mut W, oracle: &mut S) -> Result<ExplorationReport>
    where
        W: World,
        S: SafetyOracle,
    {
        let n = world.size();
        let total = n * n;
        let mut report = ExplorationReport::default();

        tracing::info!("exploration started on {}x{} grid", n, n);

        // Bootstrap: the origin is guaranteed hazard-free.
        let origin = Coord::ORIGIN;
        let content = match world.probe(origin)? {
            ProbeOutcome::Revealed(content) => content,
            ProbeOutcome::Rebuffed => return Err(GuhaError::HazardContact(origin.i, origin.j)),
        };
        report.probes += 1;
        oracle.assert_percept(origin, content);
        if content.is_ominous() {
            self.pending.push_back(origin);
        } else {
            self.safe.push_back(origin);
        }

        while self.known.len() < total {
            self.drain_safe(world, oracle, &mut report)?;
            self.drain_pending(world, oracle, &mut report)?;
        }

        report.known = self.known.len();
        report.cost = world.cost();
        tracing::info!(
            "exploration complete: {} cells, {} probes ({} forced), {} stalls",
            report.known,
            report.probes,
            report.forced_probes,
            report.stalls
        );
        Ok(report)
    }

    /// Drain the safe queue: every unknown neighbor of a quiet cell is
    /// provably hazard-free and probed outright.
    fn drain_safe<W, S>(
        &mut self,
        world: &mut W,
        oracle: &mut S,
        report: &mut ExplorationReport,
    ) -> Result<()>
    where
        W: World,
        S: SafetyOracle,
    {
        let n = world.size();
        while let Some(cell) = self.safe.pop_front() {
            self.known.insert(cell);
            for nbr in cell.neighbors(n) {
                if self.known.contains(&nbr) {
                    continue;
                }
                let outcome = world.probe(nbr)?;
                report.probes += 1;
                self.known.insert(nbr);
                let content = match outcome {
                    ProbeOutcome::Revealed(content) => content,
                    ProbeOutcome::Rebuffed => {
                        // Cannot happen on the neighbor of a quiet cell.
                        // Still queue it so the frontier beyond it is not
                        // orphaned.
                        tracing::warn!("probe rebuffed at ({}, {})", nbr.i, nbr.j);
                        report.rebuffed += 1;
                        self.pending.push_back(nbr);
                        continue;
                    }
                };
                oracle.assert_percept(nbr, content);
                if content.is_ominous() {
                    self.pending.push_back(nbr);
                } else {
                    self.safe.push_back(nbr);
                }
            }
        }
        Ok(())
    }

    /// One full pass over the pending (unsafe) queue: run the safety
    /// protocol on each unknown neighbor, moving onto certified cells and
    /// re-queueing the parent when deduction stalls on a neighbor. A pass
    /// that leaves the pending set unchanged raises the stall flag; while
    /// stalled, exactly one neighbor is force-probed.
    fn drain_pending<W, S>(
        &mut self,
        world: &mut W,
        oracle: &mut S,
        report: &mut ExplorationReport,
    ) -> Result<()>
    where
        W: World,
        S: SafetyOracle,
    {
        let n = world.size();

        let mut before: Vec<Coord> = self.pending.iter().copied().collect();
        before.sort();

        let mut next: Vec<Coord> = Vec::new();
        while let Some(cell) = self.pending.pop_front() {
            self.known.insert(cell);
            for nbr in cell.neighbors(n) {
                if self.known.contains(&nbr) {
                    continue;
                }

                if self.stalled {
                    // Forced risk-accepting probe: the hazard identity is
                    // deliberately not pre-checked.
                    self.stalled = false;
                    tracing::warn!("stall: forcing probe of ({}, {})", nbr.i, nbr.j);
                    let content = world.cautious_probe(nbr)?;
                    report.probes += 1;
                    report.forced_probes += 1;
                    self.known.insert(nbr);
                    oracle.assert_percept(nbr, content);
                    if content.is_ominous() {
                        next.push(nbr);
                    } else {
                        self.safe.push_back(nbr);
                    }
                    continue;
                }

                match oracle.certify(nbr)? {
                    Safety::Undecided => {
                        // Deduction stalls on this neighbor; keep the
                        // parent pending so it is retried next round.
                        if !next.contains(&cell) {
                            next.push(cell);
                        }
                    }
                    verdict => {
                        let content = match verdict {
                            Safety::Certified => match world.probe(nbr)? {
                                ProbeOutcome::Revealed(content) => content,
                                ProbeOutcome::Rebuffed => {
                                    tracing::warn!(
                                        "certified cell ({}, {}) rebuffed probe",
                                        nbr.i,
                                        nbr.j
                                    );
                                    report.rebuffed += 1;
                                    report.probes += 1;
                                    self.known.insert(nbr);
                                    next.push(nbr);
                                    continue;
                                }
                            },
                            // Only one hazard ruled out: supervised move
                            _ => world.cautious_probe(nbr)?,
                        };
                        report.probes += 1;
                        self.known.insert(nbr);
                        oracle.assert_percept(nbr, content);
                        if content.is_ominous() {
                            next.push(nbr);
                        } else {
                            self.safe.push_back(nbr);
                        }
                    }
                }
            }
        }

        // Stall detection: the pass made progress only if the pending set
        // changed, compared as an unordered multiset.
        let mut after = next.clone();
        after.sort();
        if !before.is_empty() && before == after {
            tracing::debug!("no progress over {} pending cells, stalling", before.len());
            self.stalled = true;
            report.stalls += 1;
        }

        self.pending = next.into();
        Ok(())
    }
}

impl Default for FrontierExplorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::logic::KnowledgeBase;
    use crate::world::{CellContent, GridWorld};

    /// Oracle stub that never certifies anything: every deduction query
    /// fails, so progress relies entirely on forced probes.
    struct NeverCertify;

    impl SafetyOracle for NeverCertify {
        fn assert_percept(&mut self, _cell: Coord, _content: CellContent) {}
        fn certify(&mut self, _cell: Coord) -> Result<Safety> {
            Ok(Safety::Undecided)
        }
    }

    /// Oracle stub that certifies everything as doubly safe.
    struct AlwaysCertify;

    impl SafetyOracle for AlwaysCertify {
        fn assert_percept(&mut self, _cell: Coord, _content: CellContent) {}
        fn certify(&mut self, _cell: Coord) -> Result<Safety> {
            Ok(Safety::Certified)
        }
    }

    fn create_test_world() -> GridWorld {
        GridWorld::from_layout(
            &["..P.", "....", "WGP.", "...P"],
            WorldConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_full_exploration_of_reference_world() {
        let mut world = create_test_world();
        let mut oracle = KnowledgeBase::new(world.size());
        let report = FrontierExplorer::new()
            .run(&mut world, &mut oracle)
            .unwrap();

        assert_eq!(report.known, 16);
        assert_eq!(world.knowledge().revealed_count(), 16);
        assert_eq!(report.rebuffed, 0);
        assert!(!world.is_dead());
    }

    #[test]
    fn test_exploration_is_deterministic() {
        let run = || {
            let mut world = create_test_world();
            let mut oracle = KnowledgeBase::new(world.size());
            let report = FrontierExplorer::new()
                .run(&mut world, &mut oracle)
                .unwrap();
            (report.probes, report.forced_probes, world.cost())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_quiet_world_needs_no_forced_probes() {
        // No hazards at all: every cell is quiet and drains through the
        // safe queue.
        let mut world =
            GridWorld::from_layout(&["...", ".G.", "..."], WorldConfig::default()).unwrap();
        let mut oracle = KnowledgeBase::new(world.size());
        let report = FrontierExplorer::new()
            .run(&mut world, &mut oracle)
            .unwrap();

        assert_eq!(report.known, 9);
        assert_eq!(report.forced_probes, 0);
        assert_eq!(report.stalls, 0);
    }

    #[test]
    fn test_liveness_when_deduction_always_fails() {
        // With a stub oracle that never certifies, termination must come
        // from forced probes alone, at most one per unknown cell.
        let mut world = create_test_world();
        let n = world.size();
        let report = FrontierExplorer::new()
            .run(&mut world, &mut NeverCertify)
            .unwrap();

        assert_eq!(report.known, n * n);
        assert!(report.forced_probes <= n * n);
        assert!(report.stalls >= 1);
    }

    #[test]
    fn test_certified_verdict_uses_plain_probe() {
        // A hazard-free world with auras is impossible, so use a world
        // where the always-certify stub stays truthful: no hazards.
        let mut world =
            GridWorld::from_layout(&["....", "G...", "....", "...G"], WorldConfig::default())
                .unwrap();
        let report = FrontierExplorer::new()
            .run(&mut world, &mut AlwaysCertify)
            .unwrap();

        assert_eq!(report.known, 16);
        assert_eq!(report.rebuffed, 0);
        assert_eq!(report.forced_probes, 0);
    }

    #[test]
    fn test_rebuffed_cells_do_not_orphan_the_frontier() {
        // A wall of pits splits the grid and an oracle that wrongly
        // certifies everything keeps probing into it. The rebuffed cells
        // must still carry the frontier across to the far column.
        let mut world = GridWorld::from_layout(
            &["..P.", "..P.", "..P.", "..P."],
            WorldConfig::default(),
        )
        .unwrap();
        let report = FrontierExplorer::new()
            .run(&mut world, &mut AlwaysCertify)
            .unwrap();

        assert_eq!(report.known, 16);
        assert_eq!(report.rebuffed, 4);
    }
}
