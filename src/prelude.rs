//! Makes available common structures needed to run a simulation
//!
//! You may write `use sfem::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{init_logger, read_json, write_json, SampleMeshes, Timer, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::drivers::{elasticity_2d, elasticity_3d, laplace, run_driver, transient, DriverKind, RunSummary};
pub use crate::drivers::{Elasticity2DParams, Elasticity3DParams, LaplaceParams, RegionValue, TransientParams};
pub use crate::fe::{assemble_function, assemble_matrix, assemble_vector, project_function};
pub use crate::fe::{FEMatrixType, FEVectorType, FiniteElement, Function};
pub use crate::fe::{FieldGradient, Stress2D, Stress3D, StructuralMass2D, StructuralMass3D, VonMises2D, VonMises3D};
pub use crate::fe::{HeatConduction2D, HeatConduction3D, HeatConvection2D, HeatConvection3D, HeatFlux2D, HeatFlux3D};
pub use crate::fe::HeatSource;
pub use crate::fe::{LinearElasticity2D, LinearElasticity3D, PressureLoad2D, PressureLoad3D};
pub use crate::fe::{PlaneType, ThermoElasticPlane, ThermoElasticSolid, ThermoMechanicalProperties};
pub use crate::io::{read_field_values, read_gmsh, read_mesh, write_field_values, write_mesh, write_vtk};
pub use crate::la::{apply_fixed_dof, create_mat, create_vec, LinearSolver, SolverConfig, SolverKind, SparseMatrix};
pub use crate::mesh::{Cell, CellType, Field, Mesh, Region};
