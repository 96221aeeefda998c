//! Implements complete simulations: plane and 3D elasticity, potential flow, and transient heat conduction
//!
//! Each driver reads a native mesh directory, writes the field files to `{out_dir}/fields/`
//! and a run summary to `{out_dir}/summary.json`.

mod elasticity;
mod params;
mod potential;
mod run;
mod summary;
mod transient;
pub use crate::drivers::elasticity::*;
pub use crate::drivers::params::*;
pub use crate::drivers::potential::*;
pub use crate::drivers::run::*;
pub use crate::drivers::summary::*;
pub use crate::drivers::transient::*;
