//! Structural checks for a [`SpatialIndex`].

use crate::error::{Result, SongSpaceError};
use crate::index::{NodeId, Side, SpatialIndex};
use songspace_types::dimension::dimension_at;

/// Validates that an index is a well-formed tree obeying the placement rule.
///
/// Checks that:
/// - every record is reachable from the root exactly once,
/// - each child sits at a higher arena slot than its parent,
/// - a left child's key is strictly below its parent's on the parent's split
///   dimension,
/// - a right child's key is not strictly below it (the condition that sent it
///   right when it was inserted).
///
/// The right-side rule is only checked between parent and child; a deeper
/// descendant was placed by its own ancestors and may fall on either side of
/// the parent's key.
///
/// # Examples
///
/// ```
/// use songspace::validation::validate_index;
/// use songspace::{Song, SpatialIndex};
///
/// let mut index = SpatialIndex::new();
/// index.insert(Song::new("a", "1"))?;
/// index.insert(Song::new("b", "2"))?;
/// assert!(validate_index(&index).is_ok());
/// # Ok::<(), songspace::SongSpaceError>(())
/// ```
pub fn validate_index(index: &SpatialIndex) -> Result<()> {
    let Some(root) = index.root_id() else {
        if index.is_empty() {
            return Ok(());
        }
        return Err(SongSpaceError::CorruptStructure(format!(
            "Index holds {} records but has no root",
            index.len()
        )));
    };

    if root.index() != 0 {
        return Err(SongSpaceError::CorruptStructure(format!(
            "Root must be the first inserted record, found slot {}",
            root.index()
        )));
    }

    let mut seen = vec![false; index.len()];
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    let mut reached = 0;

    while let Some((id, depth)) = stack.pop() {
        let record = index.get(id).ok_or_else(|| {
            SongSpaceError::CorruptStructure(format!("Link to missing slot {}", id.index()))
        })?;
        if std::mem::replace(&mut seen[id.index()], true) {
            return Err(SongSpaceError::CorruptStructure(format!(
                "Slot {} is reachable more than once",
                id.index()
            )));
        }
        reached += 1;

        let dim = dimension_at(depth);
        let parent_key = record.key(dim);

        for side in [Side::Left, Side::Right] {
            let Some(child_id) = record.child(side) else {
                continue;
            };
            if child_id.index() <= id.index() {
                return Err(SongSpaceError::CorruptStructure(format!(
                    "Child slot {} does not follow parent slot {}",
                    child_id.index(),
                    id.index()
                )));
            }
            let child = index.get(child_id).ok_or_else(|| {
                SongSpaceError::CorruptStructure(format!(
                    "Link to missing slot {}",
                    child_id.index()
                ))
            })?;

            let child_key = child.key(dim);
            let goes_left = parent_key > child_key;
            if goes_left != (side == Side::Left) {
                return Err(SongSpaceError::CorruptStructure(format!(
                    "Slot {} is the {:?} child of slot {} but compares {} against {} on {}",
                    child_id.index(),
                    side,
                    id.index(),
                    child_key,
                    parent_key,
                    dim
                )));
            }
            stack.push((child_id, depth + 1));
        }
    }

    if reached != index.len() {
        return Err(SongSpaceError::CorruptStructure(format!(
            "Reached {} of {} records from the root",
            reached,
            index.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use songspace_types::song::{Features, Song};

    fn song(i: usize, values: [f32; 5], year: i32) -> Song {
        let [energy, dance, valence, acoustic, instrumental] = values;
        Song::new(format!("s{i}"), i.to_string())
            .with_year(year)
            .with_features(Features::new(energy, dance, valence, acoustic, instrumental))
    }

    #[test]
    fn test_empty_index_is_valid() {
        assert!(validate_index(&SpatialIndex::new()).is_ok());
    }

    #[test]
    fn test_pseudo_random_index_is_valid() {
        let mut index = SpatialIndex::new();
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 1000) as f32 / 1000.0
        };
        for i in 0..2_000 {
            let values = [next(), next(), next(), next(), next()];
            let year = 1920 + (next() * 100.0) as i32;
            index.insert(song(i, values, year)).unwrap();
        }
        assert!(validate_index(&index).is_ok());
    }

    #[test]
    fn test_duplicates_and_nan_are_valid() {
        let mut index = SpatialIndex::new();
        for i in 0..20 {
            index.insert(song(i, [0.5; 5], 2000)).unwrap();
        }
        index.insert(song(20, [f32::NAN; 5], 2000)).unwrap();
        index.insert(song(21, [-1.0; 5], -5)).unwrap();
        assert!(validate_index(&index).is_ok());
        assert_eq!(index.len(), 22);
    }
}
