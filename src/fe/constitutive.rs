use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Holds thermo-mechanical material properties
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThermoMechanicalProperties {
    /// Young's modulus E
    #[serde(alias = "E")]
    pub young: f64,

    /// Poisson's coefficient ν
    pub nu: f64,

    /// Thermal conductivity κ
    pub kappa: f64,

    /// Density ρ
    pub rho: f64,

    /// Specific heat capacity
    pub cp: f64,

    /// Thermal expansion coefficient α
    pub alpha: f64,
}

impl Default for ThermoMechanicalProperties {
    fn default() -> Self {
        ThermoMechanicalProperties {
            young: 1.0,
            nu: 0.0,
            kappa: 1.0,
            rho: 1.0,
            cp: 1.0,
            alpha: 0.0,
        }
    }
}

/// Defines the two-dimensional idealization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum PlaneType {
    PlaneStress,
    PlaneStrain,
}

/// Defines the operations shared by the linear thermo-elastic models
///
/// Strains and stresses use Voigt notation with engineering shear strains.
pub trait ThermoElastic {
    /// Returns the material properties
    fn prop(&self) -> &ThermoMechanicalProperties;

    /// Returns the number of spatial dimensions (2 or 3)
    fn ndim(&self) -> usize;

    /// Returns the stress-strain (constitutive) matrix D
    fn stress_strain_matrix(&self) -> DMatrix<f64>;

    /// Returns the strain-displacement matrix B given the shape function gradients (n_nodes × 3)
    fn strain_displacement_matrix(&self, dn_dx: &DMatrix<f64>) -> DMatrix<f64>;

    /// Returns the thermal strain given the shape functions and the nodal temperature change
    fn eval_thermal_strain(&self, n: &DVector<f64>, dt: &[f64]) -> DVector<f64>;

    /// Returns the von Mises stress given the shape function gradients and nodal displacements
    fn eval_vm_stress(&self, dn_dx: &DMatrix<f64>, u: &[f64]) -> f64;

    /// Returns the strain `B u`
    fn eval_strain(&self, dn_dx: &DMatrix<f64>, u: &[f64]) -> DVector<f64> {
        self.strain_displacement_matrix(dn_dx) * DVector::from_column_slice(u)
    }

    /// Returns the stress `D B u`
    fn eval_stress(&self, dn_dx: &DMatrix<f64>, u: &[f64]) -> DVector<f64> {
        self.stress_strain_matrix() * self.eval_strain(dn_dx, u)
    }

    /// Returns the thermal load integrand `Bᵀ D ε_th`
    fn eval_thermal_stress(&self, n: &DVector<f64>, dn_dx: &DMatrix<f64>, dt: &[f64]) -> DVector<f64> {
        let b = self.strain_displacement_matrix(dn_dx);
        b.transpose() * (self.stress_strain_matrix() * self.eval_thermal_strain(n, dt))
    }
}

/// Implements the linear thermo-elastic model for plane stress or plane strain
///
/// The thickness scales the element integrals, not the stress-strain matrix; thus,
/// computed stresses are true stresses.
#[derive(Clone, Copy, Debug)]
pub struct ThermoElasticPlane {
    /// Material properties
    pub prop: ThermoMechanicalProperties,

    /// Out-of-plane thickness
    pub thick: f64,

    /// Idealization
    pub kind: PlaneType,
}

impl ThermoElasticPlane {
    /// Allocates a new instance
    pub fn new(prop: ThermoMechanicalProperties, thick: f64, kind: PlaneType) -> Self {
        ThermoElasticPlane { prop, thick, kind }
    }
}

impl ThermoElastic for ThermoElasticPlane {
    fn prop(&self) -> &ThermoMechanicalProperties {
        &self.prop
    }

    fn ndim(&self) -> usize {
        2
    }

    fn stress_strain_matrix(&self) -> DMatrix<f64> {
        let (e, nu) = (self.prop.young, self.prop.nu);
        match self.kind {
            PlaneType::PlaneStress => {
                let c = e / (1.0 - nu * nu);
                DMatrix::from_row_slice(3, 3, &[c, c * nu, 0.0, c * nu, c, 0.0, 0.0, 0.0, c * (1.0 - nu) / 2.0])
            }
            PlaneType::PlaneStrain => {
                let c = e / ((1.0 + nu) * (1.0 - 2.0 * nu));
                #[rustfmt::skip]
                let d = DMatrix::from_row_slice(3, 3, &[
                    c * (1.0 - nu), c * nu,         0.0,
                    c * nu,         c * (1.0 - nu), 0.0,
                    0.0,            0.0,            c * (1.0 - 2.0 * nu) / 2.0,
                ]);
                d
            }
        }
    }

    fn strain_displacement_matrix(&self, dn_dx: &DMatrix<f64>) -> DMatrix<f64> {
        let nn = dn_dx.nrows();
        let mut b = DMatrix::zeros(3, 2 * nn);
        for i in 0..nn {
            b[(0, 2 * i)] = dn_dx[(i, 0)];
            b[(1, 2 * i + 1)] = dn_dx[(i, 1)];
            b[(2, 2 * i)] = dn_dx[(i, 1)];
            b[(2, 2 * i + 1)] = dn_dx[(i, 0)];
        }
        b
    }

    fn eval_thermal_strain(&self, n: &DVector<f64>, dt: &[f64]) -> DVector<f64> {
        let coef = match self.kind {
            PlaneType::PlaneStress => 1.0,
            PlaneType::PlaneStrain => 1.0 + self.prop.nu,
        };
        let t: f64 = n.iter().zip(dt).map(|(ni, di)| ni * di).sum();
        let eps = coef * self.prop.alpha * t;
        DVector::from_vec(vec![eps, eps, 0.0])
    }

    fn eval_vm_stress(&self, dn_dx: &DMatrix<f64>, u: &[f64]) -> f64 {
        let s = self.eval_stress(dn_dx, u);
        let (sxx, syy, sxy) = (s[0], s[1], s[2]);
        let szz = match self.kind {
            PlaneType::PlaneStress => 0.0,
            PlaneType::PlaneStrain => self.prop.nu * (sxx + syy),
        };
        von_mises(sxx, syy, szz, sxy, 0.0, 0.0)
    }
}

/// Implements the isotropic linear thermo-elastic model in three dimensions
#[derive(Clone, Copy, Debug)]
pub struct ThermoElasticSolid {
    /// Material properties
    pub prop: ThermoMechanicalProperties,
}

impl ThermoElasticSolid {
    /// Allocates a new instance
    pub fn new(prop: ThermoMechanicalProperties) -> Self {
        ThermoElasticSolid { prop }
    }
}

impl ThermoElastic for ThermoElasticSolid {
    fn prop(&self) -> &ThermoMechanicalProperties {
        &self.prop
    }

    fn ndim(&self) -> usize {
        3
    }

    fn stress_strain_matrix(&self) -> DMatrix<f64> {
        let (e, nu) = (self.prop.young, self.prop.nu);
        let c = e / ((1.0 + nu) * (1.0 - 2.0 * nu));
        let mut d = DMatrix::zeros(6, 6);
        for i in 0..3 {
            for j in 0..3 {
                d[(i, j)] = if i == j { c * (1.0 - nu) } else { c * nu };
            }
            d[(i + 3, i + 3)] = c * (1.0 - 2.0 * nu) / 2.0;
        }
        d
    }

    fn strain_displacement_matrix(&self, dn_dx: &DMatrix<f64>) -> DMatrix<f64> {
        let nn = dn_dx.nrows();
        let mut b = DMatrix::zeros(6, 3 * nn);
        for i in 0..nn {
            let (dx, dy, dz) = (dn_dx[(i, 0)], dn_dx[(i, 1)], dn_dx[(i, 2)]);
            // xx, yy, zz
            b[(0, 3 * i)] = dx;
            b[(1, 3 * i + 1)] = dy;
            b[(2, 3 * i + 2)] = dz;
            // xy
            b[(3, 3 * i)] = dy;
            b[(3, 3 * i + 1)] = dx;
            // yz
            b[(4, 3 * i + 1)] = dz;
            b[(4, 3 * i + 2)] = dy;
            // xz
            b[(5, 3 * i)] = dz;
            b[(5, 3 * i + 2)] = dx;
        }
        b
    }

    fn eval_thermal_strain(&self, n: &DVector<f64>, dt: &[f64]) -> DVector<f64> {
        let t: f64 = n.iter().zip(dt).map(|(ni, di)| ni * di).sum();
        let eps = self.prop.alpha * t;
        DVector::from_vec(vec![eps, eps, eps, 0.0, 0.0, 0.0])
    }

    fn eval_vm_stress(&self, dn_dx: &DMatrix<f64>, u: &[f64]) -> f64 {
        let s = self.eval_stress(dn_dx, u);
        von_mises(s[0], s[1], s[2], s[3], s[4], s[5])
    }
}

/// Computes the von Mises equivalent stress
fn von_mises(sxx: f64, syy: f64, szz: f64, sxy: f64, syz: f64, sxz: f64) -> f64 {
    let a = (sxx - syy).powi(2) + (syy - szz).powi(2) + (szz - sxx).powi(2);
    let b = 6.0 * (sxy * sxy + syz * syz + sxz * sxz);
    f64::sqrt(0.5 * (a + b))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{PlaneType, ThermoElastic, ThermoElasticPlane, ThermoElasticSolid, ThermoMechanicalProperties};
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};

    fn prop() -> ThermoMechanicalProperties {
        ThermoMechanicalProperties {
            young: 1000.0,
            nu: 0.25,
            alpha: 1e-5,
            ..Default::default()
        }
    }

    // Gradients of a unit right triangle: N0 = 1 - x - y, N1 = x, N2 = y
    fn tri_gradients() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[-1.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    #[test]
    fn properties_deserialize() {
        let p: ThermoMechanicalProperties = serde_json::from_str(r#"{"E": 5e9, "nu": 0.35}"#).unwrap();
        assert_eq!(p.young, 5e9);
        assert_eq!(p.nu, 0.35);
        assert_eq!(p.rho, 1.0);
        let k: PlaneType = serde_json::from_str(r#""PlaneStrain""#).unwrap();
        assert_eq!(k, PlaneType::PlaneStrain);
    }

    #[test]
    fn plane_stress_matrices_work() {
        let model = ThermoElasticPlane::new(prop(), 0.5, PlaneType::PlaneStress);
        let d = model.stress_strain_matrix();
        let c = 1000.0 / (1.0 - 0.0625);
        assert_relative_eq!(d[(0, 0)], c, epsilon = 1e-12);
        assert_relative_eq!(d[(0, 1)], c * 0.25, epsilon = 1e-12);
        assert_relative_eq!(d[(2, 2)], c * 0.375, epsilon = 1e-12);
        let b = model.strain_displacement_matrix(&tri_gradients());
        #[rustfmt::skip]
        let correct = DMatrix::from_row_slice(3, 6, &[
            -1.0,  0.0, 1.0, 0.0, 0.0, 0.0,
             0.0, -1.0, 0.0, 0.0, 0.0, 1.0,
            -1.0, -1.0, 0.0, 1.0, 1.0, 0.0,
        ]);
        assert_eq!(b, correct);
    }

    #[test]
    fn plane_stress_uniaxial_works() {
        // u = x/1000 with free lateral contraction: v = -nu y / 1000
        let model = ThermoElasticPlane::new(prop(), 1.0, PlaneType::PlaneStress);
        let u = [0.0, 0.0, 1e-3, 0.0, 0.0, -0.25e-3];
        let s = model.eval_stress(&tri_gradients(), &u);
        assert_relative_eq!(s[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(s[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(s[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(model.eval_vm_stress(&tri_gradients(), &u), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn plane_strain_works() {
        let model = ThermoElasticPlane::new(prop(), 1.0, PlaneType::PlaneStrain);
        let d = model.stress_strain_matrix();
        let c = 1000.0 / (1.25 * 0.5);
        assert_relative_eq!(d[(0, 0)], c * 0.75, epsilon = 1e-12);
        assert_relative_eq!(d[(2, 2)], c * 0.25, epsilon = 1e-12);
        // equibiaxial strain: sxx = syy = c, szz = nu (sxx + syy) = c/2 => vm = c/2
        let u = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        assert_relative_eq!(model.eval_vm_stress(&tri_gradients(), &u), c / 2.0, epsilon = 1e-10);
        let n = DVector::from_vec(vec![0.5, 0.5, 0.0]);
        let eps = model.eval_thermal_strain(&n, &[10.0, 30.0, 0.0]);
        assert_relative_eq!(eps[0], 1.25 * 1e-5 * 20.0, epsilon = 1e-15);
        assert_eq!(eps[2], 0.0);
    }

    #[test]
    fn solid_works() {
        let model = ThermoElasticSolid::new(prop());
        let d = model.stress_strain_matrix();
        assert_eq!(d.nrows(), 6);
        let c = 1000.0 / (1.25 * 0.5);
        assert_relative_eq!(d[(1, 1)], c * 0.75, epsilon = 1e-12);
        assert_relative_eq!(d[(1, 2)], c * 0.25, epsilon = 1e-12);
        assert_relative_eq!(d[(5, 5)], c * 0.25, epsilon = 1e-12);
        assert_eq!(d[(0, 3)], 0.0);

        // unit tetrahedron; pure shear u = γ y
        let dn_dx = DMatrix::from_row_slice(
            4,
            3,
            &[-1.0, -1.0, -1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        );
        let gamma = 1e-3;
        let u = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, gamma, 0.0, 0.0, 0.0, 0.0, 0.0];
        let eps = model.eval_strain(&dn_dx, &u);
        assert_relative_eq!(eps[3], gamma, epsilon = 1e-15);
        let tau = c * 0.25 * gamma;
        assert_relative_eq!(model.eval_vm_stress(&dn_dx, &u), f64::sqrt(3.0) * tau, epsilon = 1e-12);

        // free thermal expansion produces a self-equilibrated load
        let n = DVector::from_vec(vec![0.25; 4]);
        let f = model.eval_thermal_stress(&n, &dn_dx, &[1.0; 4]);
        assert_eq!(f.len(), 12);
        for k in 0..3 {
            let sum: f64 = (0..4).map(|i| f[3 * i + k]).sum();
            assert_relative_eq!(sum, 0.0, epsilon = 1e-12);
        }
    }
}
