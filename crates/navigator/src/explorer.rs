//! Breadth-first search for the nearest frontier cell.
//!
//! A frontier cell is a recorded, reachable cell with at least one unresolved
//! cardinal neighbor. Neighbor expansion order is shuffled per step, so two
//! searches over the same map may pick different equally short paths.
use std::collections::{HashMap, VecDeque};

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::geometry::{Heading, Position};
use crate::map::PartialMap;

/// Outcome of a frontier search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exploration {
    /// Shortest move sequence to the nearest frontier cell. Empty when the
    /// start cell is itself a frontier.
    Path(Vec<Heading>),
    /// No frontier is reachable; a uniformly random step to keep moving.
    Fallback(Heading),
}

pub struct FrontierExplorer<'a> {
    map: &'a PartialMap,
}

impl<'a> FrontierExplorer<'a> {
    pub fn new(map: &'a PartialMap) -> Self {
        Self { map }
    }

    /// Searches outward from `start` through recorded, non-wall cells.
    pub fn search<R>(&self, start: Position, rng: &mut R) -> Exploration
    where
        R: Rng + ?Sized,
    {
        let Some(start_cell) = self.map.cell_at(start) else {
            tracing::warn!("Frontier search started from unrecorded cell {}", start);
            return Self::fallback(rng);
        };

        // parent links double as the seen set
        let mut parents: HashMap<Position, (Position, Heading)> = HashMap::new();
        let mut frontier = VecDeque::from([start_cell]);
        let mut headings = Heading::ALL;
        let mut expanded = 0usize;

        while let Some(cell) = frontier.pop_front() {
            let position = cell.position();
            if cell.is_frontier() {
                let path = Self::trace_back(&parents, start, position);
                tracing::debug!(
                    "Frontier at {} reached in {} moves ({} cells expanded)",
                    position,
                    path.len(),
                    expanded
                );
                return Exploration::Path(path);
            }
            expanded += 1;

            headings.shuffle(rng);
            for heading in headings {
                let next = position.offset(heading);
                if next == start || parents.contains_key(&next) {
                    continue;
                }
                let Some(neighbor) = self.map.cell_at(next) else {
                    continue;
                };
                if !neighbor.is_passable() {
                    continue;
                }
                parents.insert(next, (position, heading));
                frontier.push_back(neighbor);
            }
        }

        tracing::warn!(
            "No reachable frontier from {} after expanding {} cells",
            start,
            expanded
        );
        Self::fallback(rng)
    }

    fn trace_back(
        parents: &HashMap<Position, (Position, Heading)>,
        start: Position,
        goal: Position,
    ) -> Vec<Heading> {
        let mut path = Vec::new();
        let mut current = goal;
        while current != start {
            let Some(&(previous, heading)) = parents.get(&current) else {
                break;
            };
            path.push(heading);
            current = previous;
        }
        path.reverse();
        path
    }

    /// Uniformly random cardinal step.
    pub fn random_step<R>(rng: &mut R) -> Heading
    where
        R: Rng + ?Sized,
    {
        Heading::ALL.choose(rng).copied().unwrap_or(Heading::North)
    }

    fn fallback<R>(rng: &mut R) -> Exploration
    where
        R: Rng + ?Sized,
    {
        Exploration::Fallback(Self::random_step(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellRecord;
    use crate::terrain::Terrain;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Builds a map from rows of symbols with the top-left cell at (0, 0).
    /// `.` leaves the slot unrecorded.
    fn map_from(rows: &[&str]) -> PartialMap {
        let mut map = PartialMap::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let position = Position::new(x as i32, y as i32);
                map.record_cell(CellRecord::new(position, Terrain::from_symbol(symbol)));
            }
        }
        map
    }

    fn walk(start: Position, path: &[Heading]) -> Position {
        path.iter().fold(start, |p, h| p.offset(*h))
    }

    #[test]
    fn start_cell_on_frontier_yields_empty_path() {
        let map = map_from(&["g"]);
        let mut rng = StdRng::seed_from_u64(1);
        let result = FrontierExplorer::new(&map).search(Position::ORIGIN, &mut rng);
        assert_eq!(result, Exploration::Path(Vec::new()));
    }

    #[test]
    fn finds_single_frontier_at_exact_distance() {
        let map = map_from(&[
            "wwwwww.", //
            "wgggggg", //
            "wwwwww.", //
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        let result = FrontierExplorer::new(&map).search(Position::new(1, 1), &mut rng);
        let Exploration::Path(path) = result else {
            panic!("expected a path");
        };
        // (6, 1) still has unrecorded north, south and east neighbors
        assert_eq!(path, vec![Heading::East; 5]);
        assert_eq!(walk(Position::new(1, 1), &path), Position::new(6, 1));
    }

    #[test]
    fn path_length_matches_detour_around_walls() {
        let map = map_from(&[
            "wwwwwww", //
            "wgwgggw", //
            "wgwgwgw", //
            "wgggwgg", //
            "wwwwwww", //
        ]);
        // from (1,1): down to (1,3), east to (3,3), up to (3,1), east to (5,1),
        // down to (5,3), east to frontier (6,3)
        let expected = 2 + 2 + 2 + 2 + 2 + 1;
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = FrontierExplorer::new(&map).search(Position::new(1, 1), &mut rng);
            let Exploration::Path(path) = result else {
                panic!("expected a path");
            };
            assert_eq!(path.len(), expected);
            assert_eq!(walk(Position::new(1, 1), &path), Position::new(6, 3));
        }
    }

    #[test]
    fn walled_in_cell_falls_back_to_random_step() {
        let map = map_from(&[
            "www", //
            "wgw", //
            "www", //
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let result = FrontierExplorer::new(&map).search(Position::new(1, 1), &mut rng);
        assert!(matches!(result, Exploration::Fallback(_)));
    }

    #[test]
    fn unrecorded_start_falls_back() {
        let map = PartialMap::new();
        let mut rng = StdRng::seed_from_u64(0);
        let result = FrontierExplorer::new(&map).search(Position::new(4, 4), &mut rng);
        assert!(matches!(result, Exploration::Fallback(_)));
    }

    #[test]
    fn equidistant_frontiers_are_both_reachable() {
        let map = map_from(&[
            ".www.", //
            "ggggg", //
            ".www.", //
        ]);
        let mut ends = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = FrontierExplorer::new(&map).search(Position::new(2, 1), &mut rng);
            let Exploration::Path(path) = result else {
                panic!("expected a path");
            };
            assert_eq!(path.len(), 2);
            ends.insert(walk(Position::new(2, 1), &path));
        }
        assert_eq!(
            ends,
            [Position::new(0, 1), Position::new(4, 1)].into_iter().collect()
        );
    }
}
