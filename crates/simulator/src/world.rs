//! Ground-truth world grid.
//!
//! A world file is a rectangular block of terrain symbols, one row per line,
//! with exactly one `@` marking the agent's start (the start cell is floor)
//! and at least one finish marker. Blank lines are ignored.
use std::path::Path;

use navigator::{Action, Bearing, Percept, Position, Terrain};

use crate::error::WorldError;

/// Marker for the agent's starting cell in world files.
pub const START_SYMBOL: char = '@';

/// Result of applying one action to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Moved(Position),
    Blocked,
    /// `Use` on the finish marker; the run is over.
    ReachedGoal,
    /// `Use` anywhere else.
    Idle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    cells: Vec<Terrain>,
    width: usize,
    height: usize,
    start: Position,
}

impl World {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WorldError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        let mut start: Option<Position> = None;
        let mut has_finish = false;

        for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let row = height;
            let mut found = 0;
            for (column, symbol) in line.chars().enumerate() {
                let position = Position::new(column as i32, row as i32);
                let terrain = if symbol == START_SYMBOL {
                    if let Some(first) = start {
                        return Err(WorldError::MultipleStarts {
                            first,
                            second: position,
                        });
                    }
                    start = Some(position);
                    Terrain::Floor
                } else if Terrain::is_known_symbol(symbol) {
                    Terrain::from_symbol(symbol)
                } else {
                    return Err(WorldError::InvalidCell {
                        row,
                        column,
                        symbol,
                    });
                };
                has_finish |= terrain.is_finish();
                cells.push(terrain);
                found += 1;
            }

            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(WorldError::Ragged {
                        row,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or(WorldError::Empty)?;
        let start = start.ok_or(WorldError::MissingStart)?;
        if !has_finish {
            return Err(WorldError::MissingFinish);
        }

        Ok(Self {
            cells,
            width,
            height,
            start,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Terrain at `position`; anything off the grid reads as wall.
    pub fn terrain_at(&self, position: Position) -> Terrain {
        self.index(position)
            .map_or(Terrain::Wall, |index| self.cells[index])
    }

    /// Local view from `position`.
    ///
    /// Each ray holds up to `visibility` cells and ends early at the first
    /// wall, which is itself included.
    pub fn percept(&self, position: Position, visibility: usize) -> Percept {
        Bearing::ALL
            .into_iter()
            .fold(Percept::new(self.terrain_at(position)), |percept, bearing| {
                percept.with_ray(bearing, self.ray(position, bearing, visibility))
            })
    }

    fn ray(&self, from: Position, bearing: Bearing, visibility: usize) -> Vec<Terrain> {
        let mut cells = Vec::with_capacity(visibility);
        for depth in 1..=visibility {
            let terrain = self.terrain_at(from.along(bearing, depth as i32));
            cells.push(terrain);
            if !terrain.is_passable() {
                break;
            }
        }
        cells
    }

    /// Resolves `action` taken at `position`.
    pub fn apply(&self, position: Position, action: Action) -> Effect {
        match action {
            Action::Move(heading) => {
                let destination = position.offset(heading);
                if self.contains(destination) && self.terrain_at(destination).is_passable() {
                    Effect::Moved(destination)
                } else {
                    Effect::Blocked
                }
            }
            Action::Use if self.terrain_at(position).is_finish() => Effect::ReachedGoal,
            Action::Use => Effect::Idle,
        }
    }

    /// World grid as text with the agent drawn at `agent`.
    pub fn render(&self, agent: Position) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let position = Position::new(x as i32, y as i32);
                out.push(if position == agent {
                    START_SYMBOL
                } else {
                    self.terrain_at(position).symbol()
                });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}
