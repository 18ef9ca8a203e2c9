//! Index configuration.
//!
//! The dimension rotation is fixed process-wide (see
//! [`DIMENSION_ORDER`](crate::DIMENSION_ORDER)); this only tunes allocation
//! and logging around it.

use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Index configuration, loadable from JSON (and TOML with the `toml` feature).
///
/// # Example
///
/// ```rust
/// use songspace::Config;
///
/// let config = Config::default();
/// assert_eq!(config.load_progress_interval, 1000);
///
/// let json = r#"{
///     "initial_capacity": 170000,
///     "deep_path_warn_depth": 256
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.initial_capacity, 170_000);
/// assert_eq!(config.load_progress_interval, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Record slots reserved up front when the index is built
    #[serde(default)]
    pub initial_capacity: usize,

    /// Emit a loader progress line every this many rows
    #[serde(default = "Config::default_load_progress_interval")]
    pub load_progress_interval: usize,

    /// Insertion depth at which a degenerate-tree warning is logged
    #[serde(default = "Config::default_deep_path_warn_depth")]
    pub deep_path_warn_depth: usize,
}

impl Config {
    const fn default_load_progress_interval() -> usize {
        1000
    }

    const fn default_deep_path_warn_depth() -> usize {
        1024
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_progress_interval(mut self, interval: usize) -> Self {
        assert!(interval > 0, "Load progress interval must be greater than zero");
        self.load_progress_interval = interval;
        self
    }

    pub fn with_deep_path_warn_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "Deep path warn depth must be greater than zero");
        self.deep_path_warn_depth = depth;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.load_progress_interval == 0 {
            return Err("Load progress interval must be greater than zero".to_string());
        }

        if self.deep_path_warn_depth == 0 {
            return Err("Deep path warn depth must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            load_progress_interval: Self::default_load_progress_interval(),
            deep_path_warn_depth: Self::default_deep_path_warn_depth(),
        }
    }
}
