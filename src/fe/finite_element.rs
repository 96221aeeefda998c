use super::{transform_basis, Basis, FEData, Function, ThermoElasticPlane, ThermoElasticSolid};
use crate::mesh::Cell;
use crate::StrError;
use nalgebra::{DMatrix, DVector};

/// Defines the matrices an element may compute
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FEMatrixType {
    Mass,
    Damping,
    Stiffness,
}

/// Defines the vectors an element may compute
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FEVectorType {
    Load,
}

/// Defines the trait for finite elements
///
/// The `evaluate_*` functions return the integrands at one quadrature point (before the
/// multiplication by the weight and the Jacobian determinant). Elements that do not
/// contribute to a matrix or vector keep the default implementations, which return zeros.
///
/// The local DOFs are numbered node-major: `node * n_vars + var`.
pub trait FiniteElement: Send + Sync {
    /// Returns the name of the element
    fn name(&self) -> &str;

    /// Returns the number of variables per node
    fn n_vars(&self) -> usize;

    /// Returns the dimension of the space the element lives in
    fn physical_dim(&self) -> usize;

    /// Returns the underlying mesh cell
    fn cell(&self) -> &Cell;

    /// Returns the basis
    fn basis(&self) -> &dyn Basis;

    /// Returns the number of local DOFs
    fn n_dof(&self) -> usize {
        self.basis().n_nodes() * self.n_vars()
    }

    /// Evaluates the mass matrix integrand
    fn evaluate_mass_matrix(&self, _data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        Ok(DMatrix::zeros(self.n_dof(), self.n_dof()))
    }

    /// Evaluates the damping matrix integrand
    fn evaluate_damping_matrix(&self, _data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        Ok(DMatrix::zeros(self.n_dof(), self.n_dof()))
    }

    /// Evaluates the stiffness matrix integrand
    fn evaluate_stiffness_matrix(&self, _data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        Ok(DMatrix::zeros(self.n_dof(), self.n_dof()))
    }

    /// Evaluates the load vector integrand
    fn evaluate_load_vector(&self, _data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        Ok(DVector::zeros(self.n_dof()))
    }

    /// Returns the plane elastic model if this is a plane linear elastic element
    fn elastic_plane(&self) -> Option<&ThermoElasticPlane> {
        None
    }

    /// Returns the solid elastic model if this is a 3D linear elastic element
    fn elastic_solid(&self) -> Option<&ThermoElasticSolid> {
        None
    }
}

/// Integrates an element matrix over the cell
///
/// # Input
///
/// * `xpts` -- nodal coordinates of the cell, 3 per node
/// * `u` -- nodal values of the unknown field (node-major)
pub fn integrate_fe_matrix(
    elem: &dyn FiniteElement,
    xpts: &[f64],
    u: &[f64],
    kind: FEMatrixType,
    time: f64,
) -> Result<DMatrix<f64>, StrError> {
    let mut mat = DMatrix::zeros(elem.n_dof(), elem.n_dof());
    for p in 0..elem.basis().n_qpts() {
        let data = transform_basis(elem.basis(), elem.physical_dim(), p, xpts)?;
        let integrand = match kind {
            FEMatrixType::Mass => elem.evaluate_mass_matrix(&data, xpts, u, time)?,
            FEMatrixType::Damping => elem.evaluate_damping_matrix(&data, xpts, u, time)?,
            FEMatrixType::Stiffness => elem.evaluate_stiffness_matrix(&data, xpts, u, time)?,
        };
        mat += integrand * (data.qwt * data.det_jac);
    }
    Ok(mat)
}

/// Integrates an element vector over the cell
pub fn integrate_fe_vector(
    elem: &dyn FiniteElement,
    xpts: &[f64],
    u: &[f64],
    kind: FEVectorType,
    time: f64,
) -> Result<DVector<f64>, StrError> {
    let mut vec = DVector::zeros(elem.n_dof());
    for p in 0..elem.basis().n_qpts() {
        let data = transform_basis(elem.basis(), elem.physical_dim(), p, xpts)?;
        let integrand = match kind {
            FEVectorType::Load => elem.evaluate_load_vector(&data, xpts, u, time)?,
        };
        vec += integrand * (data.qwt * data.det_jac);
    }
    Ok(vec)
}

/// Integrates a function over the cell
pub fn integrate_function(
    elem: &dyn FiniteElement,
    xpts: &[f64],
    u: &[f64],
    func: &dyn Function,
    time: f64,
) -> Result<DVector<f64>, StrError> {
    let mut vec = DVector::zeros(func.size());
    for p in 0..elem.basis().n_qpts() {
        let data = transform_basis(elem.basis(), elem.physical_dim(), p, xpts)?;
        vec += func.evaluate(elem, &data, xpts, u, time)? * (data.qwt * data.det_jac);
    }
    Ok(vec)
}

/// Integrates the element contributions to the L2 projection of a function
///
/// Returns `(M, F)` with `M[i][j] = ∫ N_i N_j` (n_nodes × n_nodes) and
/// `F[i][c] = ∫ N_i f_c` (n_nodes × size).
pub fn integrate_projection(
    elem: &dyn FiniteElement,
    xpts: &[f64],
    u: &[f64],
    func: &dyn Function,
    time: f64,
) -> Result<(DMatrix<f64>, DMatrix<f64>), StrError> {
    let nn = elem.basis().n_nodes();
    let mut mat = DMatrix::zeros(nn, nn);
    let mut rhs = DMatrix::zeros(nn, func.size());
    for p in 0..elem.basis().n_qpts() {
        let data = transform_basis(elem.basis(), elem.physical_dim(), p, xpts)?;
        let values = func.evaluate(elem, &data, xpts, u, time)?;
        let c = data.qwt * data.det_jac;
        mat += &data.n * data.n.transpose() * c;
        rhs += &data.n * values.transpose() * c;
    }
    Ok((mat, rhs))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{integrate_fe_matrix, integrate_fe_vector, integrate_projection, FEMatrixType, FEVectorType, FiniteElement};
    use crate::fe::{create_basis, Basis, FEData, FieldGradient};
    use crate::mesh::{Cell, CellType};
    use crate::StrError;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    // Element with unit mass integrand only
    struct Unit {
        cell: Cell,
        basis: Box<dyn Basis>,
    }

    impl FiniteElement for Unit {
        fn name(&self) -> &str {
            "Unit"
        }
        fn n_vars(&self) -> usize {
            1
        }
        fn physical_dim(&self) -> usize {
            2
        }
        fn cell(&self) -> &Cell {
            &self.cell
        }
        fn basis(&self) -> &dyn Basis {
            self.basis.as_ref()
        }
        fn evaluate_mass_matrix(&self, data: &FEData, _: &[f64], _: &[f64], _: f64) -> Result<DMatrix<f64>, StrError> {
            Ok(&data.n * data.n.transpose())
        }
    }

    fn unit_square() -> (Unit, Vec<f64>) {
        let cell = Cell::new(0, CellType::Quadrilateral, 1, 1).unwrap();
        let basis = create_basis(&cell).unwrap();
        let xpts = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        (Unit { cell, basis }, xpts)
    }

    #[test]
    fn integrate_fe_matrix_works() {
        let (elem, xpts) = unit_square();
        let u = [0.0; 4];
        let m = integrate_fe_matrix(&elem, &xpts, &u, FEMatrixType::Mass, 0.0).unwrap();
        // consistent mass of the bilinear square: (1/36) [4 2 1 2; ...]
        assert_relative_eq!(m[(0, 0)], 4.0 / 36.0, epsilon = 1e-14);
        assert_relative_eq!(m[(0, 1)], 2.0 / 36.0, epsilon = 1e-14);
        assert_relative_eq!(m[(0, 2)], 1.0 / 36.0, epsilon = 1e-14);
        assert_relative_eq!(m.sum(), 1.0, epsilon = 1e-14);
        let k = integrate_fe_matrix(&elem, &xpts, &u, FEMatrixType::Stiffness, 0.0).unwrap();
        assert_eq!(k, DMatrix::zeros(4, 4));
        let f = integrate_fe_vector(&elem, &xpts, &u, FEVectorType::Load, 0.0).unwrap();
        assert_eq!(f.len(), 4);
        assert_eq!(f.norm(), 0.0);
    }

    #[test]
    fn integrate_projection_works() {
        let (elem, xpts) = unit_square();
        // u = 2x + 3y
        let u = [0.0, 2.0, 5.0, 3.0];
        let func = FieldGradient::new(1);
        let (m, f) = integrate_projection(&elem, &xpts, &u, &func, 0.0).unwrap();
        assert_relative_eq!(m.sum(), 1.0, epsilon = 1e-14);
        assert_eq!(f.ncols(), 3);
        // Σ_i ∫ N_i g = ∫ g = (2, 3, 0)
        assert_relative_eq!(f.column(0).sum(), 2.0, epsilon = 1e-14);
        assert_relative_eq!(f.column(1).sum(), 3.0, epsilon = 1e-14);
        assert_relative_eq!(f.column(2).sum(), 0.0, epsilon = 1e-14);
    }
}
