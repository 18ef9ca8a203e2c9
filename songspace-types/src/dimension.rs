use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of dimensions the index rotates through.
pub const K: usize = 6;

/// Dimension compared at each depth, indexed by `depth % K`.
pub const DIMENSION_ORDER: [Dimension; K] = [
    Dimension::Energy,
    Dimension::Danceability,
    Dimension::Valence,
    Dimension::Year,
    Dimension::Acousticness,
    Dimension::Instrumentalness,
];

/// A split key of the index.
///
/// Five of these live in a song's [`Features`](crate::song::Features); `Year`
/// is an identity field that also takes part in the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Energy,
    Danceability,
    Valence,
    Year,
    Acousticness,
    Instrumentalness,
}

impl Dimension {
    /// Attribute name as it appears in the song dataset.
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Energy => "energy",
            Dimension::Danceability => "danceability",
            Dimension::Valence => "valence",
            Dimension::Year => "year",
            Dimension::Acousticness => "acousticness",
            Dimension::Instrumentalness => "instrumentalness",
        }
    }

    /// Look a dimension up by its attribute name.
    pub fn from_name(name: &str) -> Option<Self> {
        DIMENSION_ORDER.iter().copied().find(|dim| dim.name() == name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dimension compared by a node at `depth`.
///
/// ```
/// use songspace_types::dimension::{Dimension, dimension_at};
///
/// assert_eq!(dimension_at(0), Dimension::Energy);
/// assert_eq!(dimension_at(6), Dimension::Energy);
/// assert_eq!(dimension_at(11), Dimension::Instrumentalness);
/// ```
#[inline]
pub const fn dimension_at(depth: usize) -> Dimension {
    DIMENSION_ORDER[depth % K]
}
