//! Implements the base utilities: logging, timing, JSON files, and sample meshes

mod constants;
mod json_file;
mod logging;
mod sample_meshes;
mod timer;
pub use crate::base::constants::*;
pub use crate::base::json_file::*;
pub use crate::base::logging::*;
pub use crate::base::sample_meshes::*;
pub use crate::base::timer::*;
