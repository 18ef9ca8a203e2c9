use crate::dimension::Dimension;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Artist names of a song. Most tracks credit one or two artists.
pub type Artists = SmallVec<[String; 2]>;

/// The audio features a song is partitioned by.
///
/// Values are taken as given. Nothing here clamps them to `[0, 1]` or
/// rejects NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub energy: f32,
    pub danceability: f32,
    pub valence: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
}

impl Features {
    pub fn new(
        energy: f32,
        danceability: f32,
        valence: f32,
        acousticness: f32,
        instrumentalness: f32,
    ) -> Self {
        Self {
            energy,
            danceability,
            valence,
            acousticness,
            instrumentalness,
        }
    }

    /// Feature value for `dim`, or `None` for [`Dimension::Year`], which is
    /// not an audio feature.
    pub fn get(&self, dim: Dimension) -> Option<f32> {
        match dim {
            Dimension::Energy => Some(self.energy),
            Dimension::Danceability => Some(self.danceability),
            Dimension::Valence => Some(self.valence),
            Dimension::Acousticness => Some(self.acousticness),
            Dimension::Instrumentalness => Some(self.instrumentalness),
            Dimension::Year => None,
        }
    }
}

/// A song: identity fields plus the feature mapping used as split keys.
///
/// # Examples
///
/// ```
/// use songspace_types::dimension::Dimension;
/// use songspace_types::song::{Features, Song};
///
/// let song = Song::new("Despacito", "6habFhsOp2NvshLv26DqMb")
///     .with_artists(["Luis Fonsi", "Daddy Yankee"])
///     .with_year(2017)
///     .with_duration_ms(229_360)
///     .with_features(Features::new(0.8, 0.66, 0.84, 0.21, 0.0));
///
/// assert_eq!(song.artists.len(), 2);
/// assert_eq!(song.key(Dimension::Energy), 0.8f32 as f64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub id: String,
    pub artists: Artists,
    pub year: i32,
    /// Explicit/adult content flag.
    pub explicit: bool,
    pub duration_ms: i64,
    pub features: Features,
}

impl Song {
    /// Create a song with no artists, year 0, zero duration and zeroed features.
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            artists: Artists::new(),
            year: 0,
            explicit: false,
            duration_ms: 0,
            features: Features::default(),
        }
    }

    pub fn with_artists<I, S>(mut self, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_explicit(mut self, explicit: bool) -> Self {
        self.explicit = explicit;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Split key for `dim`. Year is widened to the same float key space as the
    /// audio features; both conversions are exact.
    ///
    /// The year dimension compares the actual release year. Trees built here
    /// therefore differ from ones where year splits saw a constant zero key and
    /// always sent the new record right.
    #[inline]
    pub fn key(&self, dim: Dimension) -> f64 {
        match self.features.get(dim) {
            Some(value) => f64::from(value),
            None => f64::from(self.year),
        }
    }

    /// All six keys in rotation order.
    pub fn keys(&self) -> [f64; crate::dimension::K] {
        crate::dimension::DIMENSION_ORDER.map(|dim| self.key(dim))
    }
}
