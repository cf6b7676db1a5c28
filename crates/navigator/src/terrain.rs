use std::fmt;

/// Terrain tag observed for a single grid cell.
///
/// The alphabet is closed per environment but extensible: tags the agent does
/// not know are kept as [`Terrain::Other`] and treated as open ground. Only
/// walls block movement and only the finish marker triggers `use`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Floor,
    Wall,
    Finish,
    /// Numbered goal portal (`0`-`9`).
    Portal(u8),
    /// Lettered stairs (`o`, `b`, `y`, `p`).
    Stairs(char),
    Other(char),
}

impl Terrain {
    pub const FLOOR: char = 'g';
    pub const WALL: char = 'w';
    pub const FINISH: char = 'r';
    pub const STAIRS: [char; 4] = ['o', 'b', 'y', 'p'];

    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            Self::FLOOR => Terrain::Floor,
            Self::WALL => Terrain::Wall,
            Self::FINISH => Terrain::Finish,
            '0'..='9' => Terrain::Portal(symbol as u8 - b'0'),
            c if Self::STAIRS.contains(&c) => Terrain::Stairs(c),
            c => Terrain::Other(c),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Terrain::Floor => Self::FLOOR,
            Terrain::Wall => Self::WALL,
            Terrain::Finish => Self::FINISH,
            Terrain::Portal(n) => char::from(b'0' + n),
            Terrain::Stairs(c) | Terrain::Other(c) => c,
        }
    }

    /// Whether `symbol` belongs to the built-in alphabet.
    pub fn is_known_symbol(symbol: char) -> bool {
        !matches!(Self::from_symbol(symbol), Terrain::Other(_))
    }

    pub fn is_passable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    pub fn is_finish(self) -> bool {
        matches!(self, Terrain::Finish)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
