use super::SparseMatrix;
use crate::StrError;
use nalgebra::DVector;

/// Applies fixed (prescribed) values to the linear system `A x = b`
///
/// The fixed DOFs are eliminated symmetrically:
///
/// 1. `x[d] = value` for each fixed DOF `d`
/// 2. `b[i] -= Σ_d A[i,d] x[d]` for each free row `i`
/// 3. rows and columns of the fixed DOFs are zeroed with a unit diagonal
/// 4. `b[d] = x[d]` for each fixed DOF `d`
///
/// Thus, the solution of the modified system satisfies the prescribed values and the
/// matrix keeps its symmetry.
pub fn apply_fixed_dof(
    dofs: &[usize],
    values: &[f64],
    a: &mut SparseMatrix,
    b: &mut DVector<f64>,
    x: &mut DVector<f64>,
) -> Result<(), StrError> {
    if dofs.len() != values.len() {
        return Err("the number of fixed DOFs must equal the number of fixed values");
    }
    let n = a.dim();
    if b.len() != n || x.len() != n {
        return Err("vector dimensions are incompatible with the matrix");
    }
    let mut fixed = vec![false; n];
    for (&d, &v) in dofs.iter().zip(values) {
        if d >= n {
            return Err("DOF number is out of range");
        }
        fixed[d] = true;
        x[d] = v;
    }
    for (i, mut row) in a.as_csr_mut().row_iter_mut().enumerate() {
        let (cols, vals) = row.cols_and_values_mut();
        for (&j, v) in cols.iter().zip(vals.iter_mut()) {
            if fixed[i] {
                *v = if i == j { 1.0 } else { 0.0 };
            } else if fixed[j] {
                b[i] -= *v * x[j];
                *v = 0.0;
            }
        }
    }
    for &d in dofs {
        b[d] = x[d];
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
