use super::SparseMatrix;
use crate::StrError;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::factorization::CscCholesky;
use nalgebra_sparse::CscMatrix;
use serde::{Deserialize, Serialize};

/// Defines the linear solver kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum SolverKind {
    /// Sparse Cholesky factorization (direct)
    Cholesky,

    /// Conjugate gradient with a Jacobi preconditioner (iterative)
    ConjugateGradient,
}

/// Holds the linear solver configuration
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Solver kind
    pub kind: SolverKind,

    /// Relative residual tolerance (iterative solvers only)
    pub tolerance: f64,

    /// Maximum number of iterations (iterative solvers only)
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            kind: SolverKind::Cholesky,
            tolerance: 1e-10,
            max_iterations: 10_000,
        }
    }
}

/// Solves symmetric positive-definite sparse linear systems
#[derive(Clone, Debug)]
pub struct LinearSolver {
    config: SolverConfig,
}

impl LinearSolver {
    /// Allocates a new instance
    pub fn new(config: SolverConfig) -> Self {
        LinearSolver { config }
    }

    /// Returns the configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `A x = b`
    ///
    /// With the iterative solver, `x` holds the initial guess on entry. If the
    /// iterations do not converge, a warning is logged and `x` keeps the last iterate.
    pub fn solve(&self, a: &SparseMatrix, b: &DVector<f64>, x: &mut DVector<f64>) -> Result<(), StrError> {
        let n = a.dim();
        if b.len() != n || x.len() != n {
            return Err("vector dimensions are incompatible with the matrix");
        }
        match self.config.kind {
            SolverKind::Cholesky => {
                let rhs = DMatrix::from_column_slice(n, 1, b.as_slice());
                let sol = factorize(a)?.solve(&rhs);
                x.copy_from(&sol.column(0));
                Ok(())
            }
            SolverKind::ConjugateGradient => {
                let iterations = self.conjugate_gradient(a, b, x)?;
                tracing::debug!(iterations, "conjugate gradient finished");
                Ok(())
            }
        }
    }

    /// Solves `A X = B` for all columns of B
    ///
    /// The Cholesky factorization is computed once and reused; the iterative solver
    /// handles one column at a time starting from zero.
    pub fn solve_many(&self, a: &SparseMatrix, b: &DMatrix<f64>) -> Result<DMatrix<f64>, StrError> {
        if b.nrows() != a.dim() {
            return Err("matrix dimensions are incompatible with the right-hand side");
        }
        match self.config.kind {
            SolverKind::Cholesky => Ok(factorize(a)?.solve(b)),
            SolverKind::ConjugateGradient => {
                let mut sol = DMatrix::zeros(b.nrows(), b.ncols());
                for j in 0..b.ncols() {
                    let rhs = b.column(j).into_owned();
                    let mut x = DVector::zeros(b.nrows());
                    self.conjugate_gradient(a, &rhs, &mut x)?;
                    sol.set_column(j, &x);
                }
                Ok(sol)
            }
        }
    }

    /// Runs the Jacobi-preconditioned conjugate gradient method
    ///
    /// Returns the number of iterations.
    fn conjugate_gradient(&self, a: &SparseMatrix, b: &DVector<f64>, x: &mut DVector<f64>) -> Result<usize, StrError> {
        let norm_b = b.norm();
        if norm_b == 0.0 {
            x.fill(0.0);
            return Ok(0);
        }
        let inv_diag = a.diagonal().map(|d| if d != 0.0 { 1.0 / d } else { 1.0 });
        let mut r = b - a.mult(x)?;
        let mut z = r.component_mul(&inv_diag);
        let mut p = z.clone();
        let mut rz = r.dot(&z);
        let tol = self.config.tolerance * norm_b;
        for it in 0..self.config.max_iterations {
            if r.norm() <= tol {
                return Ok(it);
            }
            let ap = a.mult(&p)?;
            let pap = p.dot(&ap);
            if pap <= 0.0 {
                return Err("the matrix is not positive definite");
            }
            let alpha = rz / pap;
            x.axpy(alpha, &p, 1.0);
            r.axpy(-alpha, &ap, 1.0);
            z = r.component_mul(&inv_diag);
            let rz_new = r.dot(&z);
            let beta = rz_new / rz;
            rz = rz_new;
            p = &z + beta * &p;
        }
        let residual = r.norm() / norm_b;
        if residual > self.config.tolerance {
            tracing::warn!(
                residual,
                max_iterations = self.config.max_iterations,
                "conjugate gradient did not converge"
            );
        }
        Ok(self.config.max_iterations)
    }
}

/// Computes the sparse Cholesky factorization
fn factorize(a: &SparseMatrix) -> Result<CscCholesky<f64>, StrError> {
    let csc = CscMatrix::from(a.as_csr());
    CscCholesky::factor(&csc).map_err(|_| "Cholesky factorization failed")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{LinearSolver, SolverConfig, SolverKind};
    use crate::base::SampleMeshes;
    use crate::la::{create_mat, SparseMatrix};
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};

    // Builds a symmetric positive-definite matrix over a single quad
    fn spd_matrix() -> SparseMatrix {
        let mesh = SampleMeshes::rectangle_quad(1, 1, 1.0, 1.0, 1).unwrap();
        let mut a = create_mat(&mesh, 1).unwrap();
        #[rustfmt::skip]
        let local = DMatrix::from_row_slice(4, 4, &[
             4.0, -1.0,  0.0, -1.0,
            -1.0,  4.0, -1.0,  0.0,
             0.0, -1.0,  4.0, -1.0,
            -1.0,  0.0, -1.0,  4.0,
        ]);
        a.add_values(&[0, 1, 2, 3], &local).unwrap();
        a
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{"kind": "ConjugateGradient"}"#).unwrap();
        assert_eq!(config.kind, SolverKind::ConjugateGradient);
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(SolverConfig::default().kind, SolverKind::Cholesky);
    }

    #[test]
    fn solve_captures_errors() {
        let a = spd_matrix();
        let solver = LinearSolver::new(SolverConfig::default());
        let b = DVector::zeros(3);
        let mut x = DVector::zeros(4);
        assert_eq!(
            solver.solve(&a, &b, &mut x).err(),
            Some("vector dimensions are incompatible with the matrix")
        );
        let mut singular = a.clone();
        singular.zero();
        let b = DVector::from_element(4, 1.0);
        assert_eq!(
            solver.solve(&singular, &b, &mut x).err(),
            Some("Cholesky factorization failed")
        );
    }

    #[test]
    fn cholesky_and_cg_agree() {
        let a = spd_matrix();
        let x_correct = DVector::from_vec(vec![1.0, -2.0, 3.0, 0.5]);
        let b = a.mult(&x_correct).unwrap();
        for kind in [SolverKind::Cholesky, SolverKind::ConjugateGradient] {
            let solver = LinearSolver::new(SolverConfig {
                kind,
                ..Default::default()
            });
            let mut x = DVector::zeros(4);
            solver.solve(&a, &b, &mut x).unwrap();
            assert_relative_eq!(x, x_correct, epsilon = 1e-9);
        }
    }

    #[test]
    fn solve_many_works() {
        let a = spd_matrix();
        let x_correct = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 2.0, 1.0, 3.0, 0.0, 4.0, -1.0]);
        let dense = a.to_dense();
        let b = &dense * &x_correct;
        for kind in [SolverKind::Cholesky, SolverKind::ConjugateGradient] {
            let solver = LinearSolver::new(SolverConfig {
                kind,
                ..Default::default()
            });
            let x = solver.solve_many(&a, &b).unwrap();
            assert_relative_eq!(x, x_correct, epsilon = 1e-9);
        }
    }

    #[test]
    fn cg_keeps_last_iterate_without_convergence() {
        let a = spd_matrix();
        let solver = LinearSolver::new(SolverConfig {
            kind: SolverKind::ConjugateGradient,
            tolerance: 1e-15,
            max_iterations: 1,
        });
        let b = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0]);
        let mut x = DVector::zeros(4);
        solver.solve(&a, &b, &mut x).unwrap();
        assert!(x.norm() > 0.0);
    }
}
