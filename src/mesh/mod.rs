//! Implements the mesh data structures: cells, regions, connectivity, meshes, and fields

mod cell;
mod connectivity;
mod field;
mod mesh;
mod region;
pub use crate::mesh::cell::*;
pub use crate::mesh::connectivity::*;
pub use crate::mesh::field::*;
pub use crate::mesh::mesh::*;
pub use crate::mesh::region::*;
