//! Implements sparse linear algebra: sparsity patterns, matrices, fixed DOFs, and solvers

mod fixed_dof;
mod linear_solver;
mod sparse_matrix;
mod sparsity;
pub use crate::la::fixed_dof::*;
pub use crate::la::linear_solver::*;
pub use crate::la::sparse_matrix::*;
pub use crate::la::sparsity::*;
