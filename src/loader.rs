//! Bulk loading of song datasets into an index.
//!
//! Rows use the column names of the audio-features dataset (`valence`, `year`,
//! `acousticness`, `artists`, `danceability`, `duration_ms`, `energy`,
//! `explicit`, `id`, `instrumentalness`, `name`); any other columns such as
//! `tempo` or `popularity` are ignored. Rows are inserted in file order, which
//! fixes the shape of the resulting tree.

use crate::builder::IndexBuilder;
use crate::config::Config;
use crate::error::{Result, SongSpaceError};
use crate::index::SpatialIndex;
use serde::Deserialize;
use songspace_types::song::{Artists, Features, Song};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// One dataset row.
#[derive(Debug, Deserialize)]
struct SongRow {
    name: String,
    id: String,
    #[serde(default)]
    artists: ArtistsField,
    valence: f32,
    year: i32,
    acousticness: f32,
    danceability: f32,
    duration_ms: i64,
    energy: f32,
    #[serde(default)]
    explicit: ExplicitField,
    instrumentalness: f32,
}

/// `artists` is either a JSON list or a single string. Exports of the dataset
/// often carry the list as text, e.g. `"['Sia', 'Sean Paul']"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtistsField {
    List(Artists),
    Text(String),
}

impl Default for ArtistsField {
    fn default() -> Self {
        ArtistsField::List(Artists::new())
    }
}

impl ArtistsField {
    fn into_artists(self) -> Artists {
        match self {
            ArtistsField::List(list) => list,
            ArtistsField::Text(text) => split_artist_list(&text),
        }
    }
}

/// `explicit` is either a bool or the dataset's 0/1 integer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExplicitField {
    Flag(bool),
    Number(u64),
}

impl Default for ExplicitField {
    fn default() -> Self {
        ExplicitField::Flag(false)
    }
}

impl ExplicitField {
    fn is_explicit(&self) -> bool {
        match self {
            ExplicitField::Flag(flag) => *flag,
            ExplicitField::Number(n) => *n == 1,
        }
    }
}

impl SongRow {
    fn into_song(self) -> Song {
        Song {
            name: self.name,
            id: self.id,
            artists: self.artists.into_artists(),
            year: self.year,
            explicit: self.explicit.is_explicit(),
            duration_ms: self.duration_ms,
            features: Features {
                energy: self.energy,
                danceability: self.danceability,
                valence: self.valence,
                acousticness: self.acousticness,
                instrumentalness: self.instrumentalness,
            },
        }
    }
}

/// Split a bracketed, quoted artist list. Text without brackets is a single
/// artist.
fn split_artist_list(text: &str) -> Artists {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return if trimmed.is_empty() {
            Artists::new()
        } else {
            Artists::from_iter([trimmed.to_string()])
        };
    };

    inner
        .split(',')
        .map(|part| part.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
        .filter(|artist| !artist.is_empty())
        .map(str::to_string)
        .collect()
}

struct Progress {
    loaded: usize,
    interval: usize,
}

impl Progress {
    fn new(config: &Config) -> Result<Self> {
        config.validate().map_err(SongSpaceError::InvalidConfig)?;
        Ok(Self {
            loaded: 0,
            interval: config.load_progress_interval,
        })
    }

    fn tick(&mut self) {
        self.loaded += 1;
        if self.loaded.is_multiple_of(self.interval) {
            log::info!("Loaded {} songs", self.loaded);
        }
    }
}

/// Load newline-delimited JSON rows into `index`, returning how many were
/// inserted. Blank lines are skipped.
///
/// A row that fails to parse aborts the load with
/// [`SongSpaceError::Parse`]; rows before it stay in the index.
pub fn load_json_lines<R: BufRead>(
    reader: R,
    index: &mut SpatialIndex,
    config: &Config,
) -> Result<usize> {
    let mut progress = Progress::new(config)?;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row: SongRow = serde_json::from_str(&line).map_err(|source| SongSpaceError::Parse {
            line: line_no + 1,
            source,
        })?;
        index.insert(row.into_song())?;
        progress.tick();
    }

    log::debug!("Finished loading {} songs", progress.loaded);
    Ok(progress.loaded)
}

/// Load a JSON array of rows into `index`, returning how many were inserted.
///
/// The whole array is parsed before anything is inserted.
pub fn load_json_array<R: Read>(
    reader: R,
    index: &mut SpatialIndex,
    config: &Config,
) -> Result<usize> {
    let mut progress = Progress::new(config)?;
    let rows: Vec<SongRow> = serde_json::from_reader(reader)?;

    index.insert_many(rows.into_iter().map(|row| {
        progress.tick();
        row.into_song()
    }))?;

    log::debug!("Finished loading {} songs", progress.loaded);
    Ok(progress.loaded)
}

/// Load a CSV dataset with a header row into `index`.
///
/// Columns are matched by header name, so their order does not matter. Rows
/// are inserted as they are read; a malformed row stops the load and the
/// records before it stay in the index.
pub fn load_csv<R: Read>(reader: R, index: &mut SpatialIndex, config: &Config) -> Result<usize> {
    let mut progress = Progress::new(config)?;
    let mut rows = csv::Reader::from_reader(reader);

    for row in rows.deserialize::<SongRow>() {
        index.insert(row?.into_song())?;
        progress.tick();
    }

    log::debug!("Finished loading {} songs", progress.loaded);
    Ok(progress.loaded)
}

/// Load a dataset file into `index`.
///
/// `.csv` files are read as CSV with a header row, `.jsonl` and `.ndjson`
/// files line by line; anything else is expected to hold a JSON array.
pub fn load_path<P: AsRef<Path>>(
    path: P,
    index: &mut SpatialIndex,
    config: &Config,
) -> Result<usize> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => load_csv(reader, index, config),
        Some("jsonl" | "ndjson") => load_json_lines(reader, index, config),
        _ => load_json_array(reader, index, config),
    }
}

/// Build a new index from a dataset file.
pub fn load_index<P: AsRef<Path>>(path: P, config: &Config) -> Result<SpatialIndex> {
    let mut index = IndexBuilder::new().config(config.clone()).build()?;
    let loaded = load_path(&path, &mut index, config)?;
    log::info!(
        "Indexed {} songs from {} (height {})",
        loaded,
        path.as_ref().display(),
        index.height()
    );
    Ok(index)
}
