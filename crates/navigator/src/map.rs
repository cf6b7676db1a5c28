//! Growable partial map of everything the agent has observed.
//!
//! Storage is a rectangular table of optional [`CellRecord`]s addressed by
//! `(x - origin.x, y - origin.y)`. Growth adds one row or column at a time at
//! whichever edge is short, shifting `origin` when growing north or west.
//! Existing records keep their logical coordinates; only their slot index
//! moves with the origin.
use std::collections::VecDeque;

use crate::cell::CellRecord;
use crate::geometry::{Heading, Position};

type Row = VecDeque<Option<CellRecord>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialMap {
    rows: VecDeque<Row>,
    origin: Position,
    width: usize,
    height: usize,
    recorded: usize,
}

impl PartialMap {
    /// A single unrecorded slot at the agent's origin.
    pub fn new() -> Self {
        Self {
            rows: VecDeque::from([Row::from([None])]),
            origin: Position::ORIGIN,
            width: 1,
            height: 1,
            recorded: 0,
        }
    }

    /// Agent-relative coordinate of table slot `(0, 0)`.
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Current table extent as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of recorded cells.
    pub fn len(&self) -> usize {
        self.recorded
    }

    pub fn is_empty(&self) -> bool {
        self.recorded == 0
    }

    /// Looks up a recorded cell. Out-of-range and unrecorded coordinates both
    /// yield `None`.
    pub fn cell_at(&self, position: Position) -> Option<&CellRecord> {
        let (row, col) = self.slot(position)?;
        self.rows[row][col].as_ref()
    }

    /// Stores `cell`, growing the table as needed, and resolves the shared
    /// edge with each already recorded cardinal neighbor on both sides.
    ///
    /// Returns `false` without changes when the location was already
    /// recorded; the first observation of a cell wins.
    pub fn record_cell(&mut self, mut cell: CellRecord) -> bool {
        let position = cell.position();
        self.grow_to_include(position);

        if self.cell_at(position).is_some() {
            return false;
        }

        for heading in Heading::ALL {
            if let Some(neighbor) = self.cell_at_mut(position.offset(heading)) {
                neighbor.resolve(heading.opposite());
                cell.resolve(heading);
            }
        }

        let Some((row, col)) = self.slot(position) else {
            // grow_to_include guarantees the slot exists
            return false;
        };
        self.rows[row][col] = Some(cell);
        self.recorded += 1;
        true
    }

    /// Iterates recorded cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &CellRecord> + '_ {
        self.rows.iter().flat_map(|row| row.iter().flatten())
    }

    /// Iterates table rows, northernmost first, each west to east.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter()
    }

    fn cell_at_mut(&mut self, position: Position) -> Option<&mut CellRecord> {
        let (row, col) = self.slot(position)?;
        self.rows[row][col].as_mut()
    }

    fn slot(&self, position: Position) -> Option<(usize, usize)> {
        let col = i64::from(position.x) - i64::from(self.origin.x);
        let row = i64::from(position.y) - i64::from(self.origin.y);
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((row, col))
    }

    fn grow_to_include(&mut self, position: Position) {
        let before = self.size();

        while position.x < self.origin.x {
            for row in &mut self.rows {
                row.push_front(None);
            }
            self.width += 1;
            self.origin.x -= 1;
        }
        while i64::from(position.x) >= i64::from(self.origin.x) + self.width as i64 {
            for row in &mut self.rows {
                row.push_back(None);
            }
            self.width += 1;
        }
        while position.y < self.origin.y {
            self.rows.push_front(Self::empty_row(self.width));
            self.height += 1;
            self.origin.y -= 1;
        }
        while i64::from(position.y) >= i64::from(self.origin.y) + self.height as i64 {
            self.rows.push_back(Self::empty_row(self.width));
            self.height += 1;
        }

        if self.size() != before {
            tracing::trace!(
                "Partial map grew {:?} -> {:?}, origin {}",
                before,
                self.size(),
                self.origin
            );
        }
    }

    fn empty_row(width: usize) -> Row {
        std::iter::repeat_n(None, width).collect()
    }
}

impl Default for PartialMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Terrain;

    fn floor(x: i32, y: i32) -> CellRecord {
        CellRecord::new(Position::new(x, y), Terrain::Floor)
    }

    #[test]
    fn starts_as_one_empty_slot() {
        let map = PartialMap::new();
        assert_eq!(map.size(), (1, 1));
        assert_eq!(map.origin(), Position::ORIGIN);
        assert!(map.is_empty());
        assert!(map.cell_at(Position::ORIGIN).is_none());
    }

    #[test]
    fn lookups_outside_bounds_return_none() {
        let mut map = PartialMap::new();
        map.record_cell(floor(0, 0));
        assert!(map.cell_at(Position::new(1, 0)).is_none());
        assert!(map.cell_at(Position::new(-1, 0)).is_none());
        assert!(map.cell_at(Position::new(i32::MAX, i32::MIN)).is_none());
    }

    #[test]
    fn growing_west_and_north_shifts_origin() {
        let mut map = PartialMap::new();
        map.record_cell(floor(0, 0));
        map.record_cell(floor(-3, -2));

        assert_eq!(map.origin(), Position::new(-3, -2));
        assert_eq!(map.size(), (4, 3));
        assert!(map.cell_at(Position::ORIGIN).is_some());
        assert!(map.cell_at(Position::new(-3, -2)).is_some());
        assert!(map.cell_at(Position::new(-1, -1)).is_none());
    }

    #[test]
    fn growing_east_and_south_keeps_origin() {
        let mut map = PartialMap::new();
        map.record_cell(floor(0, 0));
        map.record_cell(floor(4, 2));

        assert_eq!(map.origin(), Position::ORIGIN);
        assert_eq!(map.size(), (5, 3));
    }

    #[test]
    fn records_survive_growth_in_every_direction() {
        let mut map = PartialMap::new();
        let cells = [
            CellRecord::new(Position::new(0, 0), Terrain::Floor),
            CellRecord::new(Position::new(1, 0), Terrain::Wall),
            CellRecord::new(Position::new(-5, 3), Terrain::Finish),
            CellRecord::new(Position::new(7, -6), Terrain::Portal(2)),
            CellRecord::new(Position::new(-9, -9), Terrain::Stairs('o')),
            CellRecord::new(Position::new(12, 11), Terrain::Floor),
        ];

        for (i, cell) in cells.iter().enumerate() {
            assert!(map.record_cell(*cell));
            for earlier in &cells[..=i] {
                let stored = map
                    .cell_at(earlier.position())
                    .expect("recorded cell must stay addressable");
                assert_eq!(stored.terrain(), earlier.terrain());
                assert_eq!(stored.position(), earlier.position());
            }
        }
        assert_eq!(map.len(), cells.len());
        assert_eq!(map.cells().count(), cells.len());
    }

    #[test]
    fn neighbors_resolve_each_other_in_either_order() {
        let mut map = PartialMap::new();
        map.record_cell(floor(0, 0));
        map.record_cell(floor(1, 0));

        let a = map.cell_at(Position::new(0, 0)).unwrap();
        let b = map.cell_at(Position::new(1, 0)).unwrap();
        assert!(!a.unresolved().has(Heading::East));
        assert!(!b.unresolved().has(Heading::West));
        assert!(a.unresolved().has(Heading::West));

        let mut map = PartialMap::new();
        map.record_cell(floor(0, 1));
        map.record_cell(floor(0, 0));

        let south = map.cell_at(Position::new(0, 1)).unwrap();
        let north = map.cell_at(Position::new(0, 0)).unwrap();
        assert!(!south.unresolved().has(Heading::North));
        assert!(!north.unresolved().has(Heading::South));
    }

    #[test]
    fn diagonal_neighbors_do_not_resolve() {
        let mut map = PartialMap::new();
        map.record_cell(floor(0, 0));
        map.record_cell(floor(1, 1));
        assert!(map.cell_at(Position::ORIGIN).unwrap().is_frontier());
        assert_eq!(
            map.cell_at(Position::ORIGIN).unwrap().unresolved(),
            crate::cell::DirectionSet::all()
        );
    }

    #[test]
    fn surrounded_cell_is_fully_resolved() {
        let mut map = PartialMap::new();
        map.record_cell(floor(0, 0));
        for heading in Heading::ALL {
            let p = Position::ORIGIN.offset(heading);
            map.record_cell(CellRecord::new(p, Terrain::Wall));
        }
        assert!(!map.cell_at(Position::ORIGIN).unwrap().is_frontier());
    }

    #[test]
    fn rerecording_keeps_first_observation() {
        let mut map = PartialMap::new();
        assert!(map.record_cell(CellRecord::new(Position::new(2, 0), Terrain::Wall)));
        assert!(!map.record_cell(CellRecord::new(Position::new(2, 0), Terrain::Floor)));
        assert_eq!(
            map.cell_at(Position::new(2, 0)).unwrap().terrain(),
            Terrain::Wall
        );
        assert_eq!(map.len(), 1);
    }
}
