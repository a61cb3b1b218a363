//! # Configuration
//!
//! Loaded by [`confique`] from, in priority order:
//! 1. **Environment variables**: `LDAPFILTER_ATTRIBUTE_NAMES`.
//! 2. **Config file**: `ldapfilter.toml` in the directory passed to
//!    [`FilterConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `attribute_names` | `"strict"` | Name policy: `"strict"` or `"rfc4512"` |
//!
//! Configuration only changes which attribute names are accepted. Escaping and
//! templates are fixed.

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeName, NamePolicy};
use crate::error::Result;

pub const CONFIG_FILENAME: &str = "ldapfilter.toml";

/// Configuration for ldapfilter, stored in `ldapfilter.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Which attribute names are accepted: "strict" (letters, digits, hyphen)
    /// or "rfc4512" (also numeric OIDs and ;options).
    #[config(default = "strict", env = "LDAPFILTER_ATTRIBUTE_NAMES")]
    pub attribute_names: NamePolicy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            attribute_names: NamePolicy::default(),
        }
    }
}

impl FilterConfig {
    /// Load from `dir/ldapfilter.toml` and the environment. A missing file
    /// falls back to defaults.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::from_file(dir.as_ref().join(CONFIG_FILENAME))
    }

    /// Load from an explicit file path and the environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::builder().env().file(path).load()?;
        tracing::debug!(
            path = %path.display(),
            policy = ?config.attribute_names,
            "loaded filter config"
        );
        Ok(config)
    }

    /// Validate an attribute name under the configured policy.
    ///
    /// The result can be handed to any [`Filter`](crate::Filter) constructor.
    pub fn attribute(&self, name: impl Into<String>) -> Result<AttributeName> {
        AttributeName::with_policy(name, self.attribute_names)
    }
}
