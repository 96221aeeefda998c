use super::{FEData, FiniteElement, ThermoElastic};
use crate::StrError;
use nalgebra::DVector;

/// Defines a quantity evaluated at the quadrature points of an element
///
/// Functions are integrated with [super::integrate_function] or projected onto the
/// nodes with [super::project_function].
pub trait Function: Send + Sync {
    /// Returns the number of components
    fn size(&self) -> usize;

    /// Evaluates the function at one quadrature point
    ///
    /// `u` holds the nodal values of the element (node-major). Elements the function
    /// does not apply to yield zeros.
    fn evaluate(
        &self,
        elem: &dyn FiniteElement,
        data: &FEData,
        xpts: &[f64],
        u: &[f64],
        time: f64,
    ) -> Result<DVector<f64>, StrError>;
}

/// Evaluates the plane stress components (xx, yy, xy) of linear elastic elements
pub struct Stress2D;

/// Evaluates the plane von Mises stress of linear elastic elements
pub struct VonMises2D;

/// Evaluates the stress components (xx, yy, zz, xy, yz, xz) of 3D linear elastic elements
pub struct Stress3D;

/// Evaluates the von Mises stress of 3D linear elastic elements
pub struct VonMises3D;

/// Evaluates the gradient of every variable of the unknown field
///
/// The result is `g[i * 3 + j] = ∂u_i/∂x_j`.
pub struct FieldGradient {
    n_vars: usize,
}

/// Evaluates the mass per unit area (`ρ t`) of plane linear elastic elements
pub struct StructuralMass2D;

/// Evaluates the mass per unit volume (`ρ`) of 3D linear elastic elements
pub struct StructuralMass3D;

impl FieldGradient {
    /// Allocates a new instance for a field with `n_vars` variables per node
    pub fn new(n_vars: usize) -> Self {
        FieldGradient { n_vars }
    }
}

impl Function for Stress2D {
    fn size(&self) -> usize {
        3
    }
    fn evaluate(&self, elem: &dyn FiniteElement, data: &FEData, _: &[f64], u: &[f64], _: f64) -> Result<DVector<f64>, StrError> {
        match elem.elastic_plane() {
            Some(model) => Ok(model.eval_stress(&data.dn_dx, u)),
            None => Ok(DVector::zeros(3)),
        }
    }
}

impl Function for VonMises2D {
    fn size(&self) -> usize {
        1
    }
    fn evaluate(&self, elem: &dyn FiniteElement, data: &FEData, _: &[f64], u: &[f64], _: f64) -> Result<DVector<f64>, StrError> {
        let vm = elem.elastic_plane().map_or(0.0, |model| model.eval_vm_stress(&data.dn_dx, u));
        Ok(DVector::from_element(1, vm))
    }
}

impl Function for Stress3D {
    fn size(&self) -> usize {
        6
    }
    fn evaluate(&self, elem: &dyn FiniteElement, data: &FEData, _: &[f64], u: &[f64], _: f64) -> Result<DVector<f64>, StrError> {
        match elem.elastic_solid() {
            Some(model) => Ok(model.eval_stress(&data.dn_dx, u)),
            None => Ok(DVector::zeros(6)),
        }
    }
}

impl Function for VonMises3D {
    fn size(&self) -> usize {
        1
    }
    fn evaluate(&self, elem: &dyn FiniteElement, data: &FEData, _: &[f64], u: &[f64], _: f64) -> Result<DVector<f64>, StrError> {
        let vm = elem.elastic_solid().map_or(0.0, |model| model.eval_vm_stress(&data.dn_dx, u));
        Ok(DVector::from_element(1, vm))
    }
}

impl Function for FieldGradient {
    fn size(&self) -> usize {
        self.n_vars * 3
    }
    fn evaluate(&self, elem: &dyn FiniteElement, data: &FEData, _: &[f64], u: &[f64], _: f64) -> Result<DVector<f64>, StrError> {
        let mut g = DVector::zeros(self.size());
        if elem.n_vars() != self.n_vars {
            return Ok(g);
        }
        let nn = data.dn_dx.nrows();
        if u.len() != nn * self.n_vars {
            return Err("the number of nodal values is incompatible with the element");
        }
        for i in 0..self.n_vars {
            for j in 0..3 {
                g[i * 3 + j] = (0..nn).map(|k| data.dn_dx[(k, j)] * u[k * self.n_vars + i]).sum();
            }
        }
        Ok(g)
    }
}

impl Function for StructuralMass2D {
    fn size(&self) -> usize {
        1
    }
    fn evaluate(&self, elem: &dyn FiniteElement, _: &FEData, _: &[f64], _: &[f64], _: f64) -> Result<DVector<f64>, StrError> {
        let mass = elem.elastic_plane().map_or(0.0, |model| model.prop.rho * model.thick);
        Ok(DVector::from_element(1, mass))
    }
}

impl Function for StructuralMass3D {
    fn size(&self) -> usize {
        1
    }
    fn evaluate(&self, elem: &dyn FiniteElement, _: &FEData, _: &[f64], _: &[f64], _: f64) -> Result<DVector<f64>, StrError> {
        let mass = elem.elastic_solid().map_or(0.0, |model| model.prop.rho);
        Ok(DVector::from_element(1, mass))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
