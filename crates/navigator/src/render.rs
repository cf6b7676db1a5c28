//! Text dump of the partial map for debugging.
use std::fmt;

use crate::geometry::Position;
use crate::map::PartialMap;
use crate::terrain::Terrain;

const CELL_WIDTH: usize = 4;

/// Borrowed view that renders a [`PartialMap`] as a grid with agent-relative
/// column and row headers.
///
/// ```text
///     |  -1   0   1
/// ----+------------
///  -1 |   #   #   ?
///   0 |   .   @   .
/// ```
pub struct MapView<'a> {
    map: &'a PartialMap,
    agent: Option<Position>,
}

impl<'a> MapView<'a> {
    pub fn new(map: &'a PartialMap) -> Self {
        Self { map, agent: None }
    }

    /// Marks the agent's location with `@`.
    #[must_use]
    pub fn with_agent(mut self, agent: Position) -> Self {
        self.agent = Some(agent);
        self
    }

    fn glyph(terrain: Terrain) -> char {
        match terrain {
            Terrain::Floor => '.',
            Terrain::Wall => '#',
            Terrain::Finish => '*',
            other => other.symbol(),
        }
    }
}

impl fmt::Display for MapView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = self.map.origin();
        let (width, _) = self.map.size();
        let rule = "-".repeat(CELL_WIDTH * width);

        write!(f, "    |")?;
        for col in 0..width {
            write!(f, "{:>w$}", origin.x + col as i32, w = CELL_WIDTH)?;
        }
        writeln!(f)?;
        writeln!(f, "----+{rule}")?;

        for (row_index, row) in self.map.rows().enumerate() {
            let y = origin.y + row_index as i32;
            write!(f, "{y:>3} |")?;
            for (col, slot) in row.iter().enumerate() {
                let position = Position::new(origin.x + col as i32, y);
                let glyph = if self.agent == Some(position) {
                    '@'
                } else {
                    slot.as_ref().map_or('?', |cell| Self::glyph(cell.terrain()))
                };
                write!(f, "{:>w$}", glyph, w = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellRecord;

    #[test]
    fn renders_headers_and_unknowns() {
        let mut map = PartialMap::new();
        map.record_cell(CellRecord::new(Position::new(0, 0), Terrain::Floor));
        map.record_cell(CellRecord::new(Position::new(1, 0), Terrain::Finish));
        map.record_cell(CellRecord::new(Position::new(-1, -1), Terrain::Wall));

        let text = MapView::new(&map).with_agent(Position::ORIGIN).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "    |  -1   0   1");
        assert_eq!(lines[1], "----+------------");
        assert_eq!(lines[2], " -1 |   #   ?   ?");
        assert_eq!(lines[3], "  0 |   ?   @   *");
        assert_eq!(lines.len(), 4);
    }
}
