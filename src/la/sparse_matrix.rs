use super::compute_sparsity;
use crate::mesh::Mesh;
use crate::StrError;
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::pattern::SparsityPattern;
use nalgebra_sparse::{CsrMatrix, SparseEntryMut};

/// Holds a square sparse matrix (CSR) with a fixed sparsity pattern
///
/// The pattern is defined when the matrix is allocated (see [create_mat]); adding a
/// value outside the pattern is an error.
#[derive(Clone, Debug)]
pub struct SparseMatrix {
    /// Compressed sparse row storage
    csr: CsrMatrix<f64>,
}

/// Allocates a zero sparse matrix for a system with `n_vars` variables per node
pub fn create_mat(mesh: &Mesh, n_vars: usize) -> Result<SparseMatrix, StrError> {
    let pattern = compute_sparsity(mesh, n_vars)?;
    SparseMatrix::new(pattern)
}

/// Allocates a zero vector for a system with `n_vars` variables per node
pub fn create_vec(mesh: &Mesh, n_vars: usize) -> DVector<f64> {
    DVector::zeros(mesh.n_nodes() * n_vars)
}

/// Adds local values into a global vector
///
/// Performs `vec[dofs[i]] += local[i]`.
pub fn add_vector_values(vec: &mut DVector<f64>, dofs: &[usize], local: &DVector<f64>) -> Result<(), StrError> {
    if dofs.len() != local.len() {
        return Err("the number of DOFs must equal the dimension of the local vector");
    }
    for (i, &d) in dofs.iter().enumerate() {
        if d >= vec.len() {
            return Err("DOF number is out of range");
        }
        vec[d] += local[i];
    }
    Ok(())
}

impl SparseMatrix {
    /// Allocates a new zero matrix with the given (square) pattern
    pub fn new(pattern: SparsityPattern) -> Result<Self, StrError> {
        if pattern.major_dim() != pattern.minor_dim() {
            return Err("the sparsity pattern must be square");
        }
        let values = vec![0.0; pattern.nnz()];
        let csr = CsrMatrix::try_from_pattern_and_values(pattern, values).map_err(|_| "cannot allocate CSR matrix")?;
        Ok(SparseMatrix { csr })
    }

    /// Returns the number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.csr.nrows()
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    /// Returns access to the CSR storage
    pub fn as_csr(&self) -> &CsrMatrix<f64> {
        &self.csr
    }

    /// Returns mutable access to the CSR storage
    pub fn as_csr_mut(&mut self) -> &mut CsrMatrix<f64> {
        &mut self.csr
    }

    /// Returns the value at (i,j) (zero if outside the pattern)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let row = self.csr.row(i);
        match row.col_indices().binary_search(&j) {
            Ok(p) => row.values()[p],
            Err(_) => 0.0,
        }
    }

    /// Adds a local (element) matrix into this matrix
    ///
    /// Performs `A[dofs[i], dofs[j]] += local[i][j]`.
    pub fn add_values(&mut self, dofs: &[usize], local: &DMatrix<f64>) -> Result<(), StrError> {
        if local.nrows() != dofs.len() || local.ncols() != dofs.len() {
            return Err("the number of DOFs must equal the dimension of the local matrix");
        }
        let n = self.dim();
        for (i, &di) in dofs.iter().enumerate() {
            if di >= n {
                return Err("DOF number is out of range");
            }
            for (j, &dj) in dofs.iter().enumerate() {
                match self.csr.get_entry_mut(di, dj) {
                    Some(SparseEntryMut::NonZero(v)) => *v += local[(i, j)],
                    _ => return Err("cannot add value outside the sparsity pattern"),
                }
            }
        }
        Ok(())
    }

    /// Sets all stored values to zero (keeping the pattern)
    pub fn zero(&mut self) {
        self.csr.values_mut().iter_mut().for_each(|v| *v = 0.0);
    }

    /// Scales all values: `A := alpha A`
    pub fn scale(&mut self, alpha: f64) {
        self.csr.values_mut().iter_mut().for_each(|v| *v *= alpha);
    }

    /// Adds another matrix with the same pattern: `A := A + alpha B`
    pub fn axpy(&mut self, alpha: f64, other: &SparseMatrix) -> Result<(), StrError> {
        if self.csr.pattern() != other.csr.pattern() {
            return Err("matrices must have the same sparsity pattern");
        }
        for (a, b) in self.csr.values_mut().iter_mut().zip(other.csr.values()) {
            *a += alpha * b;
        }
        Ok(())
    }

    /// Computes `y := y + A x`
    pub fn mult_add(&self, x: &DVector<f64>, y: &mut DVector<f64>) -> Result<(), StrError> {
        if x.len() != self.dim() || y.len() != self.dim() {
            return Err("vector dimensions are incompatible with the matrix");
        }
        for (i, row) in self.csr.row_iter().enumerate() {
            let mut sum = 0.0;
            for (j, v) in row.col_indices().iter().zip(row.values()) {
                sum += v * x[*j];
            }
            y[i] += sum;
        }
        Ok(())
    }

    /// Computes `A x`
    pub fn mult(&self, x: &DVector<f64>) -> Result<DVector<f64>, StrError> {
        let mut y = DVector::zeros(self.dim());
        self.mult_add(x, &mut y)?;
        Ok(y)
    }

    /// Puts a unit diagonal on rows without any non-zero value and zeroes their right-hand side
    ///
    /// Such rows belong to nodes that are not attached to any assembled cell. Returns the
    /// number of modified rows.
    pub fn fix_empty_rows(&mut self, b: &mut DVector<f64>) -> Result<usize, StrError> {
        if b.len() != self.dim() {
            return Err("vector dimensions are incompatible with the matrix");
        }
        let mut count = 0;
        for i in 0..self.dim() {
            let mut row = self.csr.row_mut(i);
            if row.values().iter().any(|v| *v != 0.0) {
                continue;
            }
            let (cols, values) = row.cols_and_values_mut();
            match cols.binary_search(&i) {
                Ok(p) => values[p] = 1.0,
                Err(_) => return Err("cannot add value outside the sparsity pattern"),
            }
            b[i] = 0.0;
            count += 1;
        }
        Ok(count)
    }

    /// Returns the diagonal
    pub fn diagonal(&self) -> DVector<f64> {
        DVector::from_iterator(self.dim(), (0..self.dim()).map(|i| self.get(i, i)))
    }

    /// Returns a dense copy of this matrix
    pub fn to_dense(&self) -> DMatrix<f64> {
        DMatrix::from(&self.csr)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{add_vector_values, create_mat, create_vec};
    use crate::base::SampleMeshes;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn create_mat_and_vec_work() {
        let mesh = SampleMeshes::rectangle_quad(2, 1, 2.0, 1.0, 1).unwrap();
        let mat = create_mat(&mesh, 2).unwrap();
        assert_eq!(mat.dim(), 12);
        assert_eq!(mat.nnz(), 8 * 8 * 2 - 4 * 4);
        let vec = create_vec(&mesh, 2);
        assert_eq!(vec.len(), 12);
    }

    #[test]
    fn add_values_works() {
        // 3-----4-----5
        // |     |     |
        // 0-----1-----2
        let mesh = SampleMeshes::rectangle_quad(2, 1, 2.0, 1.0, 1).unwrap();
        let mut mat = create_mat(&mesh, 1).unwrap();
        let local = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        mat.add_values(&[0, 4], &local).unwrap();
        mat.add_values(&[0, 4], &local).unwrap();
        assert_eq!(mat.get(0, 0), 2.0);
        assert_eq!(mat.get(0, 4), 4.0);
        assert_eq!(mat.get(4, 0), 6.0);
        assert_eq!(mat.get(4, 4), 8.0);
        assert_eq!(
            mat.add_values(&[0, 2], &local).err(),
            Some("cannot add value outside the sparsity pattern")
        );
        assert_eq!(
            mat.add_values(&[0], &local).err(),
            Some("the number of DOFs must equal the dimension of the local matrix")
        );
        assert_eq!(mat.add_values(&[0, 99], &local).err(), Some("DOF number is out of range"));
    }

    #[test]
    fn matrix_operations_work() {
        let mesh = SampleMeshes::rectangle_quad(1, 1, 1.0, 1.0, 1).unwrap();
        let mut a = create_mat(&mesh, 1).unwrap();
        let mut b = create_mat(&mesh, 1).unwrap();
        let local = DMatrix::from_row_slice(2, 2, &[2.0, -1.0, -1.0, 2.0]);
        a.add_values(&[0, 1], &local).unwrap();
        b.add_values(&[1, 3], &local).unwrap();
        a.scale(2.0);
        a.axpy(0.5, &b).unwrap();
        assert_eq!(a.get(0, 0), 4.0);
        assert_eq!(a.get(1, 1), 5.0);
        assert_eq!(a.get(1, 3), -0.5);
        assert_eq!(a.diagonal().as_slice(), &[4.0, 5.0, 0.0, 1.0]);

        let x = DVector::from_vec(vec![1.0, 1.0, 1.0, 1.0]);
        let y = a.mult(&x).unwrap();
        assert_eq!(y.as_slice(), &[2.0, 2.5, 0.0, 0.5]);
        let mut z = DVector::from_vec(vec![1.0, 1.0, 1.0, 1.0]);
        a.mult_add(&x, &mut z).unwrap();
        assert_eq!(z.as_slice(), &[3.0, 3.5, 1.0, 1.5]);

        let dense = a.to_dense();
        assert_eq!(dense[(0, 1)], -2.0);
        a.zero();
        assert_eq!(a.get(0, 0), 0.0);

        let other_mesh = SampleMeshes::rectangle_quad(2, 1, 1.0, 1.0, 1).unwrap();
        let c = create_mat(&other_mesh, 1).unwrap();
        assert_eq!(a.axpy(1.0, &c).err(), Some("matrices must have the same sparsity pattern"));
    }

    #[test]
    fn fix_empty_rows_works() {
        // 2-----3
        // |     |   node 1 is left out of the assembly
        // 0-----1
        let mesh = SampleMeshes::rectangle_quad(1, 1, 1.0, 1.0, 1).unwrap();
        let mut a = create_mat(&mesh, 1).unwrap();
        let local = DMatrix::from_row_slice(3, 3, &[2.0, -1.0, -1.0, -1.0, 2.0, -1.0, -1.0, -1.0, 2.0]);
        a.add_values(&[0, 2, 3], &local).unwrap();
        let mut b = DVector::from_vec(vec![1.0, 7.0, 1.0, 1.0]);
        assert_eq!(a.fix_empty_rows(&mut b).unwrap(), 1);
        assert_eq!(a.get(1, 1), 1.0);
        assert_eq!(a.get(0, 0), 2.0);
        assert_eq!(b.as_slice(), &[1.0, 0.0, 1.0, 1.0]);
        assert_eq!(a.fix_empty_rows(&mut b).unwrap(), 0);
        let mut short = DVector::zeros(2);
        assert_eq!(
            a.fix_empty_rows(&mut short).err(),
            Some("vector dimensions are incompatible with the matrix")
        );
    }

    #[test]
    fn add_vector_values_works() {
        let mut vec = DVector::zeros(4);
        let local = DVector::from_vec(vec![1.0, 2.0]);
        add_vector_values(&mut vec, &[3, 0], &local).unwrap();
        add_vector_values(&mut vec, &[3, 0], &local).unwrap();
        assert_eq!(vec.as_slice(), &[4.0, 0.0, 0.0, 2.0]);
        assert_eq!(
            add_vector_values(&mut vec, &[3], &local).err(),
            Some("the number of DOFs must equal the dimension of the local vector")
        );
        assert_eq!(
            add_vector_values(&mut vec, &[3, 4], &local).err(),
            Some("DOF number is out of range")
        );
    }
}
