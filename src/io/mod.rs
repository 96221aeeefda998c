//! Implements the input and output of meshes and fields

mod field_files;
mod gmsh;
mod mesh_files;
mod tokens;
mod vtk;
pub use crate::io::field_files::*;
pub use crate::io::gmsh::*;
pub use crate::io::mesh_files::*;
pub(crate) use crate::io::tokens::*;
pub use crate::io::vtk::*;
