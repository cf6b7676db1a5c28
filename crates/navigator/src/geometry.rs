//! Agent-relative grid geometry.
//!
//! All coordinates are measured from the agent's turn-0 location. The y axis
//! grows southward, so moving north decrements `y`.
use std::fmt;

/// Discrete grid position expressed in agent-relative tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step away in the given cardinal direction.
    pub fn offset(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Position `distance` steps away along a percept ray.
    pub fn along(self, bearing: Bearing, distance: i32) -> Self {
        let (dx, dy) = bearing.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four movement directions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    #[strum(serialize = "N")]
    North,
    #[strum(serialize = "S")]
    South,
    #[strum(serialize = "E")]
    East,
    #[strum(serialize = "W")]
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [
        Heading::North,
        Heading::South,
        Heading::East,
        Heading::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::South => (0, 1),
            Heading::East => (1, 0),
            Heading::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }
}

/// Direction of a percept ray: the four cardinals plus the four diagonals.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bearing {
    #[strum(serialize = "N")]
    North,
    #[strum(serialize = "NE")]
    NorthEast,
    #[strum(serialize = "E")]
    East,
    #[strum(serialize = "SE")]
    SouthEast,
    #[strum(serialize = "S")]
    South,
    #[strum(serialize = "SW")]
    SouthWest,
    #[strum(serialize = "W")]
    West,
    #[strum(serialize = "NW")]
    NorthWest,
}

impl Bearing {
    /// Every ray in clockwise order starting from north.
    pub const ALL: [Bearing; 8] = [
        Bearing::North,
        Bearing::NorthEast,
        Bearing::East,
        Bearing::SouthEast,
        Bearing::South,
        Bearing::SouthWest,
        Bearing::West,
        Bearing::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Bearing::North => (0, -1),
            Bearing::NorthEast => (1, -1),
            Bearing::East => (1, 0),
            Bearing::SouthEast => (1, 1),
            Bearing::South => (0, 1),
            Bearing::SouthWest => (-1, 1),
            Bearing::West => (-1, 0),
            Bearing::NorthWest => (-1, -1),
        }
    }

    /// Index of this bearing within [`Bearing::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The matching heading for cardinal bearings, `None` for diagonals.
    pub const fn as_heading(self) -> Option<Heading> {
        match self {
            Bearing::North => Some(Heading::North),
            Bearing::East => Some(Heading::East),
            Bearing::South => Some(Heading::South),
            Bearing::West => Some(Heading::West),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_decrements_y() {
        assert_eq!(Position::ORIGIN.offset(Heading::North), Position::new(0, -1));
        assert_eq!(Position::ORIGIN.offset(Heading::East), Position::new(1, 0));
    }

    #[test]
    fn opposite_is_involutive() {
        for heading in Heading::ALL {
            assert_eq!(heading.opposite().opposite(), heading);
            assert_ne!(heading.opposite(), heading);
        }
    }

    #[test]
    fn bearing_index_matches_table() {
        for (i, bearing) in Bearing::ALL.iter().enumerate() {
            assert_eq!(bearing.index(), i);
        }
    }

    #[test]
    fn only_cardinal_bearings_have_headings() {
        assert_eq!(Bearing::West.as_heading(), Some(Heading::West));
        assert_eq!(Bearing::South.as_heading(), Some(Heading::South));
        assert_eq!(Bearing::SouthWest.as_heading(), None);
        assert_eq!(Bearing::NorthEast.as_heading(), None);
    }

    #[test]
    fn along_scales_by_distance() {
        let start = Position::new(2, 2);
        assert_eq!(start.along(Bearing::SouthEast, 3), Position::new(5, 5));
        assert_eq!(start.along(Bearing::North, 1), Position::new(2, 1));
    }

    #[test]
    fn symbols_round_trip_through_strum() {
        assert_eq!(Heading::West.to_string(), "W");
        assert_eq!("NW".parse::<Bearing>(), Ok(Bearing::NorthWest));
        assert!("X".parse::<Bearing>().is_err());
    }
}
