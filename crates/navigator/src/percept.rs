//! Typed form of the nine-key sensory snapshot delivered each turn.
//!
//! The driver speaks in a mapping of `X`, `N`, `NE`, `E`, `SE`, `S`, `SW`,
//! `W`, `NW` to strings of terrain tags. `X` holds exactly one tag (the
//! occupied cell); each directional entry lists the cells along that ray,
//! nearest first.
use crate::geometry::Bearing;
use crate::terrain::Terrain;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PerceptError {
    #[error("unknown percept key {0:?}")]
    UnknownKey(String),

    #[error("percept key {0:?} given more than once")]
    DuplicateKey(String),

    #[error("percept key {0:?} is missing")]
    MissingKey(&'static str),

    #[error("percept key \"X\" must hold exactly one tag, got {0}")]
    InvalidSelf(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percept {
    here: Terrain,
    rays: [Vec<Terrain>; 8],
}

impl Percept {
    pub const SELF_KEY: &'static str = "X";

    /// Snapshot with the given current cell and no visible rays.
    pub fn new(here: Terrain) -> Self {
        Self {
            here,
            rays: std::array::from_fn(|_| Vec::new()),
        }
    }

    #[must_use]
    pub fn with_ray<I>(mut self, bearing: Bearing, cells: I) -> Self
    where
        I: IntoIterator<Item = Terrain>,
    {
        self.rays[bearing.index()] = cells.into_iter().collect();
        self
    }

    /// Parses the driver's key/tag-string mapping.
    ///
    /// All nine keys are required; rays may be empty.
    pub fn from_symbols<I, K, V>(entries: I) -> Result<Self, PerceptError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut here = None;
        let mut rays: [Option<Vec<Terrain>>; 8] = Default::default();

        for (key, value) in entries {
            let key = key.as_ref();
            let cells: Vec<Terrain> = value.as_ref().chars().map(Terrain::from_symbol).collect();

            if key == Self::SELF_KEY {
                if here.is_some() {
                    return Err(PerceptError::DuplicateKey(key.to_string()));
                }
                let [cell] = cells.as_slice() else {
                    return Err(PerceptError::InvalidSelf(cells.len()));
                };
                here = Some(*cell);
                continue;
            }

            let bearing: Bearing = key
                .parse()
                .map_err(|_| PerceptError::UnknownKey(key.to_string()))?;
            let slot = &mut rays[bearing.index()];
            if slot.is_some() {
                return Err(PerceptError::DuplicateKey(key.to_string()));
            }
            *slot = Some(cells);
        }

        let here = here.ok_or(PerceptError::MissingKey(Self::SELF_KEY))?;
        let mut percept = Self::new(here);
        for (bearing, ray) in Bearing::ALL.into_iter().zip(rays) {
            let ray = ray.ok_or(PerceptError::MissingKey(bearing.into()))?;
            percept.rays[bearing.index()] = ray;
        }
        Ok(percept)
    }

    /// Terrain of the occupied cell.
    pub fn here(&self) -> Terrain {
        self.here
    }

    pub fn ray(&self, bearing: Bearing) -> &[Terrain] {
        &self.rays[bearing.index()]
    }

    /// Every ray in [`Bearing::ALL`] order.
    pub fn rays(&self) -> impl Iterator<Item = (Bearing, &[Terrain])> + '_ {
        Bearing::ALL
            .into_iter()
            .map(move |bearing| (bearing, self.ray(bearing)))
    }

    /// Depth of the nearest finish marker along `bearing`, if visible.
    pub fn finish_depth(&self, bearing: Bearing) -> Option<usize> {
        self.ray(bearing).iter().position(|t| t.is_finish())
    }

    /// Renders back to the driver's key/tag-string form.
    pub fn to_symbols(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![(Self::SELF_KEY, self.here.symbol().to_string())];
        entries.extend(self.rays().map(|(bearing, ray)| {
            let tags: String = ray.iter().map(|t| t.symbol()).collect();
            (<&'static str>::from(bearing), tags)
        }));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_mapping() -> Vec<(&'static str, &'static str)> {
        vec![
            ("X", "g"),
            ("N", "w"),
            ("NE", "w"),
            ("E", "ggr"),
            ("SE", "w"),
            ("S", "g"),
            ("SW", ""),
            ("W", "w"),
            ("NW", "w"),
        ]
    }

    #[test]
    fn parses_complete_mapping() {
        let percept = Percept::from_symbols(full_mapping()).unwrap();
        assert_eq!(percept.here(), Terrain::Floor);
        assert_eq!(
            percept.ray(Bearing::East),
            &[Terrain::Floor, Terrain::Floor, Terrain::Finish]
        );
        assert!(percept.ray(Bearing::SouthWest).is_empty());
        assert_eq!(percept.finish_depth(Bearing::East), Some(2));
        assert_eq!(percept.finish_depth(Bearing::North), None);
    }

    #[test]
    fn rejects_missing_keys() {
        let mapping: Vec<_> = full_mapping().into_iter().filter(|(k, _)| *k != "SE").collect();
        assert_eq!(
            Percept::from_symbols(mapping),
            Err(PerceptError::MissingKey("SE"))
        );

        let mapping: Vec<_> = full_mapping().into_iter().filter(|(k, _)| *k != "X").collect();
        assert_eq!(
            Percept::from_symbols(mapping),
            Err(PerceptError::MissingKey("X"))
        );
    }

    #[test]
    fn rejects_bad_keys_and_self_entries() {
        let mut mapping = full_mapping();
        mapping.push(("UP", "g"));
        assert_eq!(
            Percept::from_symbols(mapping),
            Err(PerceptError::UnknownKey("UP".to_string()))
        );

        let mut mapping = full_mapping();
        mapping.push(("N", "g"));
        assert_eq!(
            Percept::from_symbols(mapping),
            Err(PerceptError::DuplicateKey("N".to_string()))
        );

        let mut mapping = full_mapping();
        mapping[0] = ("X", "gg");
        assert_eq!(
            Percept::from_symbols(mapping),
            Err(PerceptError::InvalidSelf(2))
        );
    }

    #[test]
    fn symbols_round_trip() {
        let percept = Percept::from_symbols(full_mapping()).unwrap();
        let reparsed = Percept::from_symbols(percept.to_symbols()).unwrap();
        assert_eq!(reparsed, percept);
    }
}
