use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds a named group of cells sharing the same tag
///
/// A cell belongs to a region if `cell.region_tag == region.tag`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Name of the region, e.g., "Solid" or "Left"
    pub name: String,

    /// Dimension of the cells in the region
    pub dim: usize,

    /// Tag identifying the cells of the region
    pub tag: usize,
}

impl Region {
    /// Allocates a new instance
    pub fn new(name: &str, dim: usize, tag: usize) -> Self {
        Region {
            name: name.to_string(),
            dim,
            tag,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (dim = {}, tag = {})", self.name, self.dim, self.tag)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
