use serde::{Deserialize, Serialize};

/// Shape statistics of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of records in the tree
    pub records: usize,
    /// Number of levels (0 for an empty tree, 1 for a lone root)
    pub height: usize,
    /// Records with no children
    pub leaves: usize,
    /// Parent/child links through `left`
    pub left_links: usize,
    /// Parent/child links through `right`
    pub right_links: usize,
    /// Records flagged as explicit content
    pub explicit_records: usize,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total parent/child links. Equal to `records - 1` for any non-empty tree.
    pub fn links(&self) -> usize {
        self.left_links + self.right_links
    }

    /// Ratio of height to the minimum possible height for this many records.
    /// 1.0 is perfectly balanced; a linked list of n records scores n / log2(n+1).
    pub fn degeneracy(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        let optimal = ((self.records + 1) as f64).log2().ceil();
        self.height as f64 / optimal
    }
}
