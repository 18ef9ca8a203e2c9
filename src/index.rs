//! The k-d tree over song features.
//!
//! Records live in an arena and link to their children by [`NodeId`]. A record
//! is appended when inserted and never moves afterwards, so a child always
//! occupies a higher arena slot than its parent.

use crate::config::Config;
use crate::error::{Result, SongSpaceError};
use crate::traversal::{PostOrder, PreOrder};
use songspace_types::dimension::{Dimension, dimension_at};
use songspace_types::song::{Artists, Features, Song};
use songspace_types::stats::IndexStats;

/// Position of a record in the index arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena slot, which is also the record's insertion sequence number.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which child slot of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A song stored in the index, together with its child links.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    song: Song,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Record {
    fn new(song: Song) -> Self {
        Self {
            song,
            left: None,
            right: None,
        }
    }

    fn vacant() -> Self {
        Self::new(Song::new(String::new(), String::new()))
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn into_song(self) -> Song {
        self.song
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Split key of this record for `dim`.
    #[inline]
    pub fn key(&self, dim: Dimension) -> f64 {
        self.song.key(dim)
    }

    fn set_child(&mut self, side: Side, id: NodeId) {
        match side {
            Side::Left => self.left = Some(id),
            Side::Right => self.right = Some(id),
        }
    }
}

/// The empty child slot a new record will occupy.
#[derive(Debug, Clone, Copy)]
struct Slot {
    parent: NodeId,
    side: Side,
    depth: usize,
}

/// A k-d tree of songs split on a fixed rotation of six feature dimensions.
///
/// The index only grows: every insertion appends one leaf, and nothing is
/// relocated, rebalanced or removed until the whole tree is torn down.
///
/// # Examples
///
/// ```rust
/// use songspace::{Features, Song, SpatialIndex};
///
/// let mut index = SpatialIndex::new();
/// let song = |name: &str, energy: f32| {
///     Song::new(name, name).with_features(Features::new(energy, 0.5, 0.5, 0.5, 0.5))
/// };
///
/// index.insert(song("A", 0.8))?;
/// index.insert(song("B", 0.5))?;
/// let root = index.insert(song("C", 0.9))?;
///
/// assert_eq!(root.song().name, "A");
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.height(), 2);
/// # Ok::<(), songspace::SongSpaceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    nodes: Vec<Record>,
    root: Option<NodeId>,
    height: usize,
    deep_path_warn_depth: usize,
}

impl SpatialIndex {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            height: 0,
            deep_path_warn_depth: Config::default().deep_path_warn_depth,
        }
    }

    /// Create an empty index, reserving `config.initial_capacity` record slots.
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate().map_err(SongSpaceError::InvalidConfig)?;
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(config.initial_capacity)?;
        Ok(Self {
            nodes,
            root: None,
            height: 0,
            deep_path_warn_depth: config.deep_path_warn_depth,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels in the tree.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<&Record> {
        self.root.map(|id| &self.nodes[id.0])
    }

    pub fn get(&self, id: NodeId) -> Option<&Record> {
        self.nodes.get(id.0)
    }

    /// Insert a song built from its individual fields.
    ///
    /// See [`insert`](Self::insert).
    #[allow(clippy::too_many_arguments)]
    pub fn insert_song(
        &mut self,
        name: impl Into<String>,
        id: impl Into<String>,
        artists: impl IntoIterator<Item = String>,
        valence: f32,
        year: i32,
        acousticness: f32,
        danceability: f32,
        duration_ms: i64,
        energy: f32,
        explicit: bool,
        instrumentalness: f32,
    ) -> Result<&Record> {
        let song = Song {
            name: name.into(),
            id: id.into(),
            artists: artists.into_iter().collect::<Artists>(),
            year,
            explicit,
            duration_ms,
            features: Features {
                energy,
                danceability,
                valence,
                acousticness,
                instrumentalness,
            },
        };
        self.insert(song)
    }

    /// Insert a song and return the root record.
    ///
    /// Walking down from the root, the dimension compared at depth `d` is
    /// `DIMENSION_ORDER[d % K]`. The new song goes left when the existing
    /// record's key is strictly greater than its own, and right otherwise, so
    /// ties (and NaN keys) go right. Values are never validated.
    ///
    /// The only failure is [`OutOfMemory`](crate::SongSpaceError::OutOfMemory),
    /// raised before anything is modified.
    pub fn insert(&mut self, song: Song) -> Result<&Record> {
        self.nodes.try_reserve(1)?;

        let id = NodeId(self.nodes.len());
        let slot = self.find_slot(&song);
        self.nodes.push(Record::new(song));

        let depth = match slot {
            Some(slot) => {
                self.nodes[slot.parent.0].set_child(slot.side, id);
                slot.depth
            }
            None => {
                self.root = Some(id);
                0
            }
        };

        if depth >= self.height {
            self.height = depth + 1;
            if self.height == self.deep_path_warn_depth {
                log::warn!(
                    "Index height reached {} after {} records. \
                     Insertion order is producing a degenerate tree.",
                    self.height,
                    self.nodes.len()
                );
            }
        }

        log::trace!(
            "Inserted record {} at depth {} (parent split on {})",
            id.0,
            depth,
            slot.map_or("none", |s| dimension_at(s.depth - 1).name())
        );

        let root = self.root.unwrap_or(id);
        Ok(&self.nodes[root.0])
    }

    /// Insert every song from `songs` in order, returning how many were added.
    ///
    /// Each insertion is atomic on its own. On allocation failure the songs
    /// inserted so far stay in the index.
    pub fn insert_many<I>(&mut self, songs: I) -> Result<usize>
    where
        I: IntoIterator<Item = Song>,
    {
        let songs = songs.into_iter();
        let (lower, _) = songs.size_hint();
        self.nodes.try_reserve(lower)?;

        let mut inserted = 0;
        for song in songs {
            self.insert(song)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    fn find_slot(&self, song: &Song) -> Option<Slot> {
        let mut cursor = self.root?;
        let mut depth = 0;
        loop {
            let node = &self.nodes[cursor.0];
            let dim = dimension_at(depth);
            let side = if node.key(dim) > song.key(dim) {
                Side::Left
            } else {
                Side::Right
            };
            depth += 1;
            match node.child(side) {
                Some(next) => cursor = next,
                None => {
                    return Some(Slot {
                        parent: cursor,
                        side,
                        depth,
                    });
                }
            }
        }
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Record)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(slot, record)| (NodeId(slot), record))
    }

    /// Depth-first walk from the root yielding each record with its depth.
    pub fn preorder(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    /// Record ids in teardown order: left subtree, right subtree, then parent.
    pub fn postorder(&self) -> PostOrder<'_> {
        PostOrder::new(self)
    }

    /// Release every record in post-order, handing each to `release`.
    ///
    /// Returns the number of records released. The index is empty afterwards
    /// and can be reused.
    ///
    /// The walk needs a stack of at most `2 * height + 1` entries, reserved up
    /// front. If that reservation fails, records are released from the back of
    /// the arena instead, which still hands over children before parents.
    pub fn teardown_with<F>(&mut self, mut release: F) -> usize
    where
        F: FnMut(NodeId, Record),
    {
        let Some(root) = self.root.take() else {
            return self.release_from_back(release);
        };

        let mut stack: Vec<(NodeId, bool)> = Vec::new();
        if stack.try_reserve_exact(2 * self.height + 1).is_err() {
            log::warn!(
                "No room for a teardown stack over height {}, releasing in reverse insertion order",
                self.height
            );
            return self.release_from_back(release);
        }

        let mut released = 0;
        stack.push((root, false));
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                // Placeholder strings are empty and do not allocate.
                let record = std::mem::replace(&mut self.nodes[id.0], Record::vacant());
                release(id, record);
                released += 1;
                continue;
            }
            let record = &self.nodes[id.0];
            let (left, right) = (record.left, record.right);
            stack.push((id, true));
            if let Some(right) = right {
                stack.push((right, false));
            }
            if let Some(left) = left {
                stack.push((left, false));
            }
        }
        debug_assert_eq!(released, self.nodes.len());

        self.nodes = Vec::new();
        self.height = 0;
        log::debug!("Released {} records", released);
        released
    }

    /// Pop records off the end of the arena. Children occupy higher slots than
    /// their parents, so each child is released before its parent.
    fn release_from_back<F>(&mut self, mut release: F) -> usize
    where
        F: FnMut(NodeId, Record),
    {
        let mut released = 0;
        while let Some(record) = self.nodes.pop() {
            release(NodeId(self.nodes.len()), record);
            released += 1;
        }
        self.root = None;
        self.height = 0;
        released
    }

    /// Release every record, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        self.teardown_with(|_, _| {})
    }

    /// Shape statistics of the current tree.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            records: self.nodes.len(),
            height: self.height,
            ..IndexStats::default()
        };
        for record in &self.nodes {
            if record.is_leaf() {
                stats.leaves += 1;
            }
            if record.left.is_some() {
                stats.left_links += 1;
            }
            if record.right.is_some() {
                stats.right_links += 1;
            }
            if record.song.explicit {
                stats.explicit_records += 1;
            }
        }
        stats
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SpatialIndex {
    fn drop(&mut self) {
        self.release_from_back(|_, _| {});
    }
}
