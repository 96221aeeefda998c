use super::{integrate_fe_matrix, integrate_fe_vector, integrate_function, integrate_projection};
use super::{FEMatrixType, FEVectorType, FiniteElement, Function};
use crate::base::Timer;
use crate::la::{add_vector_values, create_mat, LinearSolver, SolverConfig, SolverKind, SparseMatrix};
use crate::mesh::Field;
use crate::StrError;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

// Returns the DOFs, coordinates, and nodal values of the element's cell
fn element_state(elem: &dyn FiniteElement, field: &Field) -> Result<(Vec<usize>, Vec<f64>, Vec<f64>), StrError> {
    if elem.n_vars() != field.n_vars() {
        return Err("the number of variables of the element and the field must be equal");
    }
    let cell = elem.cell();
    let dofs = field.get_cell_dof(cell)?;
    let xpts = field.mesh().get_cell_xpts(cell)?;
    let u = field.get_cell_values(cell)?;
    Ok((dofs, xpts, u))
}

/// Assembles a global matrix
///
/// The element matrices are computed in parallel and added (serially) to `mat`, which
/// is not zeroed beforehand.
pub fn assemble_matrix(
    elems: &[Box<dyn FiniteElement + '_>],
    field: &Field,
    kind: FEMatrixType,
    mat: &mut SparseMatrix,
    time: f64,
) -> Result<(), StrError> {
    let _timer = Timer::new("Matrix assembly");
    if mat.dim() != field.n_dof() {
        return Err("the matrix dimension must equal the number of DOFs of the field");
    }
    let locals: Vec<_> = elems
        .par_iter()
        .map(|elem| -> Result<_, StrError> {
            let (dofs, xpts, u) = element_state(elem.as_ref(), field)?;
            let local = integrate_fe_matrix(elem.as_ref(), &xpts, &u, kind, time)?;
            Ok((dofs, local))
        })
        .collect::<Result<_, StrError>>()?;
    for (dofs, local) in &locals {
        mat.add_values(dofs, local)?;
    }
    Ok(())
}

/// Assembles a global vector
///
/// The element vectors are added to `vec`, which is not zeroed beforehand.
pub fn assemble_vector(
    elems: &[Box<dyn FiniteElement + '_>],
    field: &Field,
    kind: FEVectorType,
    vec: &mut DVector<f64>,
    time: f64,
) -> Result<(), StrError> {
    let _timer = Timer::new("Vector assembly");
    if vec.len() != field.n_dof() {
        return Err("the vector dimension must equal the number of DOFs of the field");
    }
    let locals: Vec<_> = elems
        .par_iter()
        .map(|elem| -> Result<_, StrError> {
            let (dofs, xpts, u) = element_state(elem.as_ref(), field)?;
            let local = integrate_fe_vector(elem.as_ref(), &xpts, &u, kind, time)?;
            Ok((dofs, local))
        })
        .collect::<Result<_, StrError>>()?;
    for (dofs, local) in &locals {
        add_vector_values(vec, dofs, local)?;
    }
    Ok(())
}

/// Integrates a function over all elements and returns the sum
pub fn assemble_function(
    elems: &[Box<dyn FiniteElement + '_>],
    field: &Field,
    func: &dyn Function,
    time: f64,
) -> Result<DVector<f64>, StrError> {
    let _timer = Timer::new("Function assembly");
    let locals: Vec<_> = elems
        .par_iter()
        .map(|elem| -> Result<_, StrError> {
            let (_, xpts, u) = element_state(elem.as_ref(), field)?;
            integrate_function(elem.as_ref(), &xpts, &u, func, time)
        })
        .collect::<Result<_, StrError>>()?;
    Ok(locals.into_iter().fold(DVector::zeros(func.size()), |acc, v| acc + v))
}

/// Computes the L2 projection of a function onto the nodes
///
/// Solves `M p_c = F_c` for each component `c`, with `M = ∫ N_i N_j` and
/// `F_c = ∫ N_i f_c` assembled over the given elements. Nodes not covered by
/// the elements get zero values.
///
/// Returns a field named "Projection" with `func.size()` variables.
pub fn project_function<'a>(
    elems: &[Box<dyn FiniteElement + '_>],
    field: &Field<'a>,
    func: &dyn Function,
) -> Result<Field<'a>, StrError> {
    let _timer = Timer::new("Projection");
    let mesh = field.mesh();
    let size = func.size();
    let n_nodes = mesh.n_nodes();
    let locals: Vec<_> = elems
        .par_iter()
        .map(|elem| -> Result<_, StrError> {
            let (_, xpts, u) = element_state(elem.as_ref(), field)?;
            let nodes = mesh.get_cell_nodes(elem.cell())?.to_vec();
            let (me, fe) = integrate_projection(elem.as_ref(), &xpts, &u, func, 0.0)?;
            Ok((nodes, me, fe))
        })
        .collect::<Result<_, StrError>>()?;

    let mut mat = create_mat(mesh, 1)?;
    let mut rhs = DMatrix::zeros(n_nodes, size);
    let mut touched = vec![false; n_nodes];
    for (nodes, me, fe) in &locals {
        mat.add_values(nodes, me)?;
        for (i, &node) in nodes.iter().enumerate() {
            touched[node] = true;
            for c in 0..size {
                rhs[(node, c)] += fe[(i, c)];
            }
        }
    }
    let one = DMatrix::from_element(1, 1, 1.0);
    for node in (0..n_nodes).filter(|&n| !touched[n]) {
        mat.add_values(&[node], &one)?;
    }

    let solver = LinearSolver::new(SolverConfig {
        kind: SolverKind::Cholesky,
        ..Default::default()
    });
    let sol = solver.solve_many(&mat, &rhs)?;
    let mut values = vec![0.0; n_nodes * size];
    for node in 0..n_nodes {
        for c in 0..size {
            values[node * size + c] = sol[(node, c)];
        }
    }
    let mut projection = Field::new("Projection", size, mesh, &[])?;
    projection.set_values(&values)?;
    Ok(projection)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
