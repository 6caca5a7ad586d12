//! Strongly-typed identifiers for scene entities.
//!
//! Newtype wrappers prevent accidental mixing of scene node handles
//! with indices into the caller's mesh list.

use serde::{Deserialize, Serialize};

/// Handle of a node inside a render scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Position of a mesh in the ordered mesh list handed to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(pub u32);

impl NodeId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MeshId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for MeshId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
