//! Resolver configuration
//!
//! Controls how a [`Schema`](crate::Schema) resolves field descriptors.
//! Configuration can be built in code or read from TOML:
//!
//! ```toml
//! # Cache resolved descriptors per field (default: true)
//! cache_descriptors = true
//!
//! # Allow writes to read-only fields through their backing slot (default: true)
//! allow_backing_slots = true
//! ```

use crate::error::{RecastError, RecastResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for field descriptor resolution
///
/// # Example
/// ```
/// use recast_core::ResolverConfig;
///
/// let config = ResolverConfig::new()
///     .with_cache_descriptors(false)
///     .with_allow_backing_slots(false);
/// assert!(!config.allow_backing_slots);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Keep resolved descriptors in the schema's concurrent cache
    pub cache_descriptors: bool,
    /// Resolve read-only fields to their backing slot instead of failing
    pub allow_backing_slots: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_descriptors: true,
            allow_backing_slots: true,
        }
    }
}

impl ResolverConfig {
    /// Create a ResolverConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that refuses the backing-slot escape hatch
    pub fn strict() -> Self {
        Self {
            allow_backing_slots: false,
            ..Default::default()
        }
    }

    /// Enable or disable descriptor caching
    pub fn with_cache_descriptors(mut self, cache_descriptors: bool) -> Self {
        self.cache_descriptors = cache_descriptors;
        self
    }

    /// Enable or disable backing-slot resolution
    pub fn with_allow_backing_slots(mut self, allow_backing_slots: bool) -> Self {
        self.allow_backing_slots = allow_backing_slots;
        self
    }

    /// Default configuration as commented TOML
    pub fn default_toml() -> &'static str {
        r#"# Field resolution configuration
#
# Cache resolved descriptors per field (default: true)
cache_descriptors = true

# Allow writes to read-only fields through their backing slot (default: true)
# Set to false to make every read-only field fail with FieldNotWritable.
allow_backing_slots = true
"#
    }

    /// Parse configuration from a TOML document
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document cannot be parsed.
    pub fn from_toml_str(content: &str) -> RecastResult<Self> {
        toml::from_str(content)
            .map_err(|e| RecastError::invalid_config(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse configuration from a file path
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> RecastResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RecastError::invalid_config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            RecastError::invalid_config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Serialize this config to TOML
    pub fn to_toml_string(&self) -> RecastResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RecastError::invalid_config(format!("Failed to serialize config: {}", e)))
    }
}
