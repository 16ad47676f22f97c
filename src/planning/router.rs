//! Multi-goal treasure routing and route execution.

use crate::error::Result;
use crate::world::{Coord, MoveOutcome, World};

use super::astar::shortest_path;
use super::HazardMap;

/// Sequences visits to every discovered treasure with repeated shortest-path
/// calls, greedily committing to the nearest unvisited treasure each round.
pub struct TreasureRouter<'a> {
    map: &'a HazardMap,
}

impl<'a> TreasureRouter<'a> {
    pub fn new(map: &'a HazardMap) -> Self {
        Self { map }
    }

    /// One contiguous duplicate-free route from `home` through every
    /// treasure. Returns an empty route when any treasure is unreachable;
    /// partial routes are never returned.
    pub fn route(&self, home: Coord) -> Vec<Coord> {
        let mut unvisited = self.map.treasures.clone();
        let mut route: Vec<Coord> = Vec::new();
        let mut current = home;

        while !unvisited.is_empty() {
            let mut best: Option<(usize, Vec<Coord>)> = None;
            for (k, &treasure) in unvisited.iter().enumerate() {
                let Some(path) = shortest_path(current, treasure, &self.map.walls, self.map.n)
                else {
                    tracing::warn!(
                        "treasure at ({}, {}) unreachable, aborting route",
                        treasure.i,
                        treasure.j
                    );
                    return Vec::new();
                };
                // Strict improvement keeps the earliest minimum on ties
                if best.as_ref().map_or(true, |(_, b)| path.len() < b.len()) {
                    best = Some((k, path));
                }
            }

            let Some((k, path)) = best else {
                return Vec::new();
            };
            let target = unvisited.remove(k);
            tracing::debug!(
                "committing leg to ({}, {}), {} cells",
                target.i,
                target.j,
                path.len()
            );

            if route.is_empty() {
                route.extend(path);
            } else {
                // Drop the leading cell: it duplicates the prior endpoint
                route.extend(path.into_iter().skip(1));
            }
            current = target;
        }

        route
    }
}

/// Walk a planned route through the world, collecting treasure along the
/// way. Returns the reward gained. The route's first cell is the starting
/// position; if the agent is elsewhere it relocates there with a supervised
/// probe before stepping.
pub fn collect<W: World>(world: &mut W, route: &[Coord]) -> Result<u64> {
    let Some((&first, rest)) = route.split_first() else {
        return Ok(0);
    };

    if world.position() != first {
        world.cautious_probe(first)?;
    }

    let mut gained = 0;
    for &cell in rest {
        if let MoveOutcome::Collected(reward) = world.go_to(cell)? {
            gained += reward;
        }
    }

    tracing::info!("route complete, {} reward collected", gained);
    Ok(gained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn create_test_map(n: usize, walls: &[Coord], treasures: &[Coord]) -> HazardMap {
        HazardMap {
            n,
            walls: walls.iter().copied().collect(),
            treasures: treasures.to_vec(),
        }
    }

    #[test]
    fn test_single_treasure_route() {
        let map = create_test_map(4, &[], &[Coord::new(2, 2)]);
        let route = TreasureRouter::new(&map).route(Coord::ORIGIN);

        assert_eq!(route.first(), Some(&Coord::ORIGIN));
        assert_eq!(route.last(), Some(&Coord::new(2, 2)));
        assert_eq!(route.len(), 5);
    }

    #[test]
    fn test_visits_every_treasure_once() {
        let treasures = [Coord::new(0, 3), Coord::new(3, 0), Coord::new(3, 3)];
        let map = create_test_map(4, &[], &treasures);
        let route = TreasureRouter::new(&map).route(Coord::ORIGIN);

        for t in &treasures {
            assert_eq!(route.iter().filter(|c| *c == t).count(), 1);
        }

        // Contiguous and duplicate-free at the joins
        for pair in route.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]), "gap at {:?}", pair);
        }
    }

    #[test]
    fn test_greedy_picks_nearest_first() {
        let map = create_test_map(5, &[], &[Coord::new(4, 4), Coord::new(0, 1)]);
        let route = TreasureRouter::new(&map).route(Coord::ORIGIN);

        // The adjacent treasure is committed before the far corner
        assert_eq!(route[1], Coord::new(0, 1));
        assert_eq!(route.last(), Some(&Coord::new(4, 4)));
    }

    #[test]
    fn test_unreachable_treasure_aborts_route() {
        // (0,3) is sealed off; (2,0) is reachable, but the route must
        // still come back empty rather than partial.
        let walls = [Coord::new(0, 2), Coord::new(1, 3)];
        let map = create_test_map(4, &walls, &[Coord::new(2, 0), Coord::new(0, 3)]);

        let route = TreasureRouter::new(&map).route(Coord::ORIGIN);
        assert!(route.is_empty());
    }

    #[test]
    fn test_no_treasures_empty_route() {
        let map = create_test_map(4, &[], &[]);
        assert!(TreasureRouter::new(&map).route(Coord::ORIGIN).is_empty());
    }

    #[test]
    fn test_route_avoids_walls() {
        let walls: HashSet<Coord> = [Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)]
            .into_iter()
            .collect();
        let map = HazardMap {
            n: 4,
            walls: walls.clone(),
            treasures: vec![Coord::new(3, 0)],
        };

        let route = TreasureRouter::new(&map).route(Coord::ORIGIN);
        assert!(!route.is_empty());
        assert!(route.iter().all(|c| !walls.contains(c)));
    }
}
