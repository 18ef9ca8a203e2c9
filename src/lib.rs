//! Embedded k-d tree indexing songs by their audio features.
//!
//! Songs are split on a fixed rotation of six dimensions (energy,
//! danceability, valence, year, acousticness, instrumentalness). The index
//! grows by insertion only and releases everything when dropped.
//!
//! ```rust
//! use songspace::{Features, Song, SpatialIndex};
//!
//! let mut index = SpatialIndex::new();
//! index.insert_song(
//!     "Despacito",
//!     "6habFhsOp2NvshLv26DqMb",
//!     vec!["Luis Fonsi".to_string()],
//!     0.84, 2017, 0.21, 0.66, 229_360, 0.8, false, 0.0,
//! )?;
//! index.insert(Song::new("Quiet", "q").with_features(Features::new(0.1, 0.2, 0.3, 0.9, 0.8)))?;
//!
//! assert_eq!(index.len(), 2);
//! assert!(index.root().unwrap().left().is_some());
//! # Ok::<(), songspace::SongSpaceError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod traversal;
pub mod validation;

pub use builder::IndexBuilder;
pub use config::Config;
pub use error::{Result, SongSpaceError};
pub use index::{NodeId, Record, Side, SpatialIndex};

pub use songspace_types::dimension::{DIMENSION_ORDER, Dimension, K, dimension_at};
pub use songspace_types::song::{Artists, Features, Song};
pub use songspace_types::stats::IndexStats;

pub use loader::{load_csv, load_index, load_json_array, load_json_lines, load_path};
pub use validation::validate_index;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, IndexBuilder, Result, SongSpaceError, SpatialIndex};

    pub use crate::{Dimension, Features, Song};

    pub use crate::{NodeId, Record};

    pub use crate::validate_index;
}
