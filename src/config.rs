//! Construction-time geometry for a [`crate::SkipList`].

use crate::error::{Error, Result};

/// Geometry parameters for a new index.
///
/// `SkipList::new` silently promotes `skip <= 1` to `2`. `Config::build`
/// is the stricter alternative for callers who would rather get an error
/// than a silent clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of fast lanes. The authors use 9.
    pub max_level: u8,
    /// Down-sampling ratio between adjacent lanes. The authors use 5.
    pub skip: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_level: 9,
            skip: 5,
        }
    }
}

impl Config {
    /// Validate this configuration, returning an error instead of the
    /// silent `skip <= 1 -> 2` clamp `SkipList::new` applies.
    pub fn build(self) -> Result<Self> {
        if self.max_level == 0 {
            return Err(Error::InvalidConfig("max_level must be >= 1".into()));
        }
        if self.skip < 2 {
            return Err(Error::InvalidConfig("skip must be >= 2".into()));
        }
        Ok(self)
    }
}
