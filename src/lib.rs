//! Serial finite element library with mesh conversion tools and simulation drivers
//!
//! The crate is organized as follows:
//!
//! * [base] -- logging, timing, JSON helpers, and sample meshes
//! * [mesh] -- cells, regions, connectivity, meshes, and fields
//! * [la] -- sparse matrices, fixed DOFs, and linear solvers
//! * [fe] -- bases, constitutive models, elements, functions, and assembly
//! * [io] -- native mesh files, Gmsh files, field values, and VTK output
//! * [drivers] -- complete simulations (elasticity, potential flow, transient heat)
//! * [install] -- the build-and-install driver for the native toolchain

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod drivers;
pub mod fe;
pub mod install;
pub mod io;
pub mod la;
pub mod mesh;
pub mod prelude;

pub use crate::base::init_logger;
