//! Path planning over the known hazard map.

mod astar;
mod router;

pub use astar::shortest_path;
pub use router::{collect, TreasureRouter};

use std::collections::HashSet;

use crate::world::{Coord, Knowledge};

/// Hazard/treasure map distilled from revealed knowledge once exploration
/// completes: hazard cells become impassable walls, gold cells become
/// routing goals.
#[derive(Clone, Debug)]
pub struct HazardMap {
    pub n: usize,
    pub walls: HashSet<Coord>,
    /// Treasure cells in row-major discovery order.
    pub treasures: Vec<Coord>,
}

impl HazardMap {
    pub fn from_knowledge(knowledge: &Knowledge) -> Self {
        let mut walls = HashSet::new();
        let mut treasures = Vec::new();
        for (c, content) in knowledge.revealed() {
            if content.is_hazard() {
                walls.insert(c);
            }
            if content.gold {
                treasures.push(c);
            }
        }
        Self {
            n: knowledge.size(),
            walls,
            treasures,
        }
    }
}
