//! Index builder for configuration up front
//!
//! This module provides a builder for creating an index with pre-reserved
//! capacity and tuned logging thresholds.

use crate::config::Config;
use crate::error::{Result, SongSpaceError};
use crate::index::SpatialIndex;

/// Builder for a [`SpatialIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: Config,
}

impl IndexBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Reserve room for `capacity` records when the index is built.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Height at which a degenerate-tree warning is logged.
    pub fn deep_path_warn_depth(mut self, depth: usize) -> Self {
        self.config.deep_path_warn_depth = depth;
        self
    }

    /// Build the index. Fails on an invalid configuration or when the initial
    /// capacity cannot be allocated.
    pub fn build(self) -> Result<SpatialIndex> {
        self.config
            .validate()
            .map_err(SongSpaceError::InvalidConfig)?;
        SpatialIndex::with_config(&self.config)
    }
}
