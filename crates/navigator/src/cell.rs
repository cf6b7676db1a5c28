//! Per-cell memory: what the agent saw at a location and which of its
//! neighbors it has not seen yet.
use bitflags::bitflags;

use crate::geometry::{Heading, Position};
use crate::terrain::Terrain;

bitflags! {
    /// Set of cardinal directions, one bit per [`Heading`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DirectionSet: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST  = 1 << 2;
        const WEST  = 1 << 3;
    }
}

impl DirectionSet {
    pub const fn of(heading: Heading) -> Self {
        match heading {
            Heading::North => Self::NORTH,
            Heading::South => Self::SOUTH,
            Heading::East => Self::EAST,
            Heading::West => Self::WEST,
        }
    }

    pub fn has(self, heading: Heading) -> bool {
        self.contains(Self::of(heading))
    }
}

/// Observation of one grid location.
///
/// `terrain` never changes once recorded. `unresolved` only shrinks: a
/// direction is cleared as soon as the neighbor on that side is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRecord {
    position: Position,
    terrain: Terrain,
    unresolved: DirectionSet,
}

impl CellRecord {
    /// Fresh record with all four neighbors unresolved.
    pub fn new(position: Position, terrain: Terrain) -> Self {
        Self {
            position,
            terrain,
            unresolved: DirectionSet::all(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn unresolved(&self) -> DirectionSet {
        self.unresolved
    }

    /// True while at least one cardinal neighbor is still unobserved.
    pub fn is_frontier(&self) -> bool {
        !self.unresolved.is_empty()
    }

    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable()
    }

    pub(crate) fn resolve(&mut self, heading: Heading) {
        self.unresolved.remove(DirectionSet::of(heading));
    }
}

impl Default for CellRecord {
    fn default() -> Self {
        Self::new(Position::ORIGIN, Terrain::Floor)
    }
}
