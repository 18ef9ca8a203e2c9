//! # songspace-types
//!
//! Plain data types shared by the songspace index:
//!
//! - **Dimensions**: `Dimension`, the fixed `DIMENSION_ORDER` and `K`
//! - **Songs**: `Song` identity fields plus its `Features`
//! - **Statistics**: `IndexStats`
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use songspace_types::dimension::{Dimension, dimension_at};
//! use songspace_types::song::{Features, Song};
//!
//! let song = Song::new("Clair de Lune", "6kkwzB6hXLIONkEk9JciA6")
//!     .with_artists(["Claude Debussy"])
//!     .with_year(1905)
//!     .with_features(Features::new(0.03, 0.28, 0.04, 0.99, 0.91));
//!
//! assert_eq!(dimension_at(3), Dimension::Year);
//! assert_eq!(song.key(Dimension::Year), 1905.0);
//! ```

pub mod dimension;
pub mod song;
pub mod stats;
