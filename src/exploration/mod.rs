//! Autonomous exploration of the hazard grid.

mod explorer;

pub use explorer::{ExplorationReport, FrontierExplorer};

use crate::error::Result;
use crate::logic::KnowledgeBase;
use crate::world::World;

/// Explore a world to completion with a fresh knowledge base.
pub fn explore<W: World>(world: &mut W) -> Result<ExplorationReport> {
    let mut oracle = KnowledgeBase::new(world.size());
    FrontierExplorer::new().run(world, &mut oracle)
}
