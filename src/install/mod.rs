//! Implements the build-and-install driver for the native library (CMake and make)

mod options;
mod plan;
mod runner;
pub use crate::install::options::*;
pub use crate::install::plan::*;
pub use crate::install::runner::*;
