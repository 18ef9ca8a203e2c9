//! Depth-first walks over a [`SpatialIndex`].
//!
//! Both walks keep an explicit stack, so a degenerate tree of any height is
//! walked without recursion.

use crate::index::{NodeId, Record, SpatialIndex};

/// Pre-order walk: a record, then its left subtree, then its right subtree.
pub struct PreOrder<'a> {
    index: &'a SpatialIndex,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(index: &'a SpatialIndex) -> Self {
        Self {
            index,
            stack: index.root_id().map(|id| (id, 0)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    /// Record id, its depth (root is 0) and the record itself.
    type Item = (NodeId, usize, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let record = self.index.get(id)?;
        if let Some(right) = record.right() {
            self.stack.push((right, depth + 1));
        }
        if let Some(left) = record.left() {
            self.stack.push((left, depth + 1));
        }
        Some((id, depth, record))
    }
}

/// Post-order walk: left subtree, right subtree, then the record.
///
/// Every record comes after all of its descendants.
pub struct PostOrder<'a> {
    index: &'a SpatialIndex,
    // (id, children already scheduled)
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrder<'a> {
    pub(crate) fn new(index: &'a SpatialIndex) -> Self {
        Self {
            index,
            stack: index.root_id().map(|id| (id, false)).into_iter().collect(),
        }
    }
}

impl Iterator for PostOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some((id, expanded)) = self.stack.pop() {
            if expanded {
                return Some(id);
            }
            let record = self.index.get(id)?;
            self.stack.push((id, true));
            if let Some(right) = record.right() {
                self.stack.push((right, false));
            }
            if let Some(left) = record.left() {
                self.stack.push((left, false));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::SpatialIndex;
    use songspace_types::song::{Features, Song};

    fn energy_index(energies: &[f32]) -> SpatialIndex {
        let mut index = SpatialIndex::new();
        for (i, &energy) in energies.iter().enumerate() {
            let song = Song::new(format!("s{i}"), i.to_string())
                .with_features(Features::new(energy, 0.0, 0.0, 0.0, 0.0));
            index.insert(song).unwrap();
        }
        index
    }

    fn names<'a>(index: &'a SpatialIndex, ids: impl Iterator<Item = crate::NodeId>) -> Vec<&'a str> {
        ids.map(|id| index.get(id).unwrap().song().name.as_str())
            .collect()
    }

    #[test]
    fn test_empty_walks() {
        let index = SpatialIndex::new();
        assert_eq!(index.preorder().count(), 0);
        assert_eq!(index.postorder().count(), 0);
    }

    #[test]
    fn test_preorder_with_depths() {
        // s0 root, s1 left, s2 right, s3 under s1 (danceability tie -> right)
        let index = energy_index(&[0.5, 0.2, 0.9, 0.1]);
        let walk: Vec<_> = index
            .preorder()
            .map(|(_, depth, record)| (record.song().name.as_str(), depth))
            .collect();
        assert_eq!(walk, [("s0", 0), ("s1", 1), ("s3", 2), ("s2", 1)]);
    }

    #[test]
    fn test_postorder_children_first() {
        let index = energy_index(&[0.5, 0.2, 0.9, 0.1]);
        assert_eq!(names(&index, index.postorder()), ["s3", "s1", "s2", "s0"]);
    }

    #[test]
    fn test_walks_visit_every_record_once() {
        let energies: Vec<f32> = (0..200).map(|i| ((i * 37) % 101) as f32).collect();
        let index = energy_index(&energies);

        let mut seen = vec![0u32; index.len()];
        for id in index.postorder() {
            seen[id.index()] += 1;
        }
        assert!(seen.iter().all(|&n| n == 1));
        assert_eq!(index.preorder().count(), index.len());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let energies: Vec<f32> = (0..10_000).map(|i| i as f32).collect();
        let index = energy_index(&energies);
        assert_eq!(index.height(), 10_000);
        assert_eq!(index.postorder().count(), 10_000);
        let (_, depth, _) = index.preorder().last().unwrap();
        assert_eq!(depth, 9_999);
    }
}
