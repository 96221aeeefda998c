use super::Basis;
use crate::StrError;
use nalgebra::{DMatrix, DVector, Matrix3};

/// Holds the basis data transformed to physical coordinates at one quadrature point
///
/// Gradients have 3 columns regardless of the dimension (unused columns are zero).
#[derive(Clone, Debug)]
pub struct FEData {
    /// Quadrature weight
    pub qwt: f64,

    /// Quadrature point (reference coordinates)
    pub qpt: [f64; 3],

    /// Shape functions (n_nodes)
    pub n: DVector<f64>,

    /// Shape function gradients w.r.t. reference coordinates (n_nodes × 3)
    pub dn_dxi: DMatrix<f64>,

    /// Determinant of the reference-to-physical Jacobian
    ///
    /// For boundary cells (reference dimension smaller than the physical one), this is
    /// `sqrt(det(JᵀJ))`, i.e., the length or area ratio.
    pub det_jac: f64,

    /// Reference-to-physical Jacobian `dX/dξ` (padded to 3×3)
    pub dx_dxi: Matrix3<f64>,

    /// Inverse (or pseudo-inverse) Jacobian `dξ/dX` (padded to 3×3)
    pub dxi_dx: Matrix3<f64>,

    /// Shape function gradients w.r.t. physical coordinates (n_nodes × 3)
    pub dn_dx: DMatrix<f64>,
}

/// Transforms the basis to physical coordinates at a quadrature point
///
/// # Input
///
/// * `basis` -- the reference basis
/// * `physical_dim` -- the dimension of the space the element lives in (1, 2, or 3)
/// * `index` -- index of the quadrature point
/// * `xpts` -- nodal coordinates, 3 per node
///
/// The Jacobian is `J[i][j] = Σ_k dN_k/dξ_j x_k[i]` with `physical_dim` rows and
/// `basis.dim()` columns. If the two dimensions are equal, `dξ/dX = J⁻¹` and
/// `detJ = det(J)`; otherwise `dξ/dX = (JᵀJ)⁻¹Jᵀ` and `detJ = sqrt(det(JᵀJ))`.
pub fn transform_basis(basis: &dyn Basis, physical_dim: usize, index: usize, xpts: &[f64]) -> Result<FEData, StrError> {
    let nn = basis.n_nodes();
    if xpts.len() != 3 * nn {
        return Err("the number of coordinates is incompatible with the basis");
    }
    if index >= basis.n_qpts() {
        return Err("quadrature point index is out of range");
    }
    let quadrature = basis.quadrature();
    let qpt = quadrature.points[index];
    let mut n = vec![0.0; nn];
    let mut dn = vec![0.0; 3 * nn];
    basis.eval_shape(&qpt, &mut n);
    basis.eval_shape_grad(&qpt, &mut dn);
    let n = DVector::from_vec(n);
    let dn_dxi = DMatrix::from_row_slice(nn, 3, &dn);

    // point cells have no geometry
    let bdim = basis.dim();
    if bdim == 0 {
        return Ok(FEData {
            qwt: quadrature.weights[index],
            qpt,
            n,
            dn_dxi,
            det_jac: 1.0,
            dx_dxi: Matrix3::zeros(),
            dxi_dx: Matrix3::zeros(),
            dn_dx: DMatrix::zeros(nn, 3),
        });
    }
    if physical_dim < bdim || physical_dim > 3 {
        return Err("the physical dimension is incompatible with the basis");
    }

    // Jacobian (physical_dim × bdim)
    let mut jac = DMatrix::<f64>::zeros(physical_dim, bdim);
    for i in 0..physical_dim {
        for j in 0..bdim {
            for k in 0..nn {
                jac[(i, j)] += dn_dxi[(k, j)] * xpts[k * 3 + i];
            }
        }
    }

    // inverse or pseudo-inverse (bdim × physical_dim)
    let (det_jac, inv) = if physical_dim == bdim {
        let det = jac.determinant();
        (det, jac.clone().try_inverse())
    } else {
        let jtj = jac.transpose() * &jac;
        let det = jtj.determinant();
        let det = if det > 0.0 { f64::sqrt(det) } else { 0.0 };
        (det, jtj.try_inverse().map(|m| m * jac.transpose()))
    };
    if det_jac <= 0.0 {
        return Err("negative or zero Jacobian determinant");
    }
    let inv = inv.ok_or("cannot invert the Jacobian matrix")?;

    let mut dx_dxi = Matrix3::zeros();
    let mut dxi_dx = Matrix3::zeros();
    for i in 0..physical_dim {
        for j in 0..bdim {
            dx_dxi[(i, j)] = jac[(i, j)];
            dxi_dx[(j, i)] = inv[(j, i)];
        }
    }
    let mut dn_dx = DMatrix::zeros(nn, 3);
    for k in 0..nn {
        for i in 0..physical_dim {
            for j in 0..bdim {
                dn_dx[(k, i)] += dn_dxi[(k, j)] * inv[(j, i)];
            }
        }
    }
    Ok(FEData {
        qwt: quadrature.weights[index],
        qpt,
        n,
        dn_dxi,
        det_jac,
        dx_dxi,
        dxi_dx,
        dn_dx,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
