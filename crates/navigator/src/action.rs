use std::fmt;
use std::str::FromStr;

use crate::geometry::Heading;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("empty action symbol")]
    Empty,

    #[error("unknown action symbol {0:?}, expected one of N, S, E, W, U")]
    Unknown(String),
}

/// Command emitted once per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Step one cell in a cardinal direction.
    Move(Heading),
    /// Activate the contents of the current cell.
    Use,
}

impl Action {
    pub const USE_SYMBOL: &'static str = "U";

    pub fn heading(self) -> Option<Heading> {
        match self {
            Action::Move(heading) => Some(heading),
            Action::Use => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Action::Move(heading) => heading.into(),
            Action::Use => Self::USE_SYMBOL,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ActionParseError::Empty);
        }
        if s.eq_ignore_ascii_case(Self::USE_SYMBOL) {
            return Ok(Action::Use);
        }
        s.to_ascii_uppercase()
            .parse::<Heading>()
            .map(Action::Move)
            .map_err(|_| ActionParseError::Unknown(s.to_string()))
    }
}
