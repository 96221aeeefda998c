use super::{create_basis, Basis, FEData, FiniteElement, ThermoElasticPlane, ThermoElasticSolid};
use crate::mesh::Cell;
use crate::StrError;
use nalgebra::{DMatrix, DVector};

/// Implements the plane heat conduction element (unknown: temperature)
///
/// The mass (capacity) integrand is `ρ cp t N_i N_j` and the stiffness integrand is
/// `t κ ∇N_i · ∇N_j`, with the thickness `t` given by the plane model.
pub struct HeatConduction2D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticPlane,
    loads: Vec<Box<dyn FiniteElement + 'a>>,
}

/// Implements the 3D heat conduction element (unknown: temperature)
pub struct HeatConduction3D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticSolid,
    loads: Vec<Box<dyn FiniteElement + 'a>>,
}

/// Implements a prescribed heat flux `q` on a boundary line
pub struct HeatFlux2D {
    cell: Cell,
    basis: Box<dyn Basis>,
    flux: f64,
    thick: f64,
}

/// Implements a prescribed heat flux `q` on a boundary surface
pub struct HeatFlux3D {
    cell: Cell,
    basis: Box<dyn Basis>,
    flux: f64,
}

/// Implements the convection condition `h (T_bulk - T)` on a boundary line
pub struct HeatConvection2D {
    cell: Cell,
    basis: Box<dyn Basis>,
    htc: f64,
    t_bulk: f64,
    thick: f64,
}

/// Implements the convection condition `h (T_bulk - T)` on a boundary surface
pub struct HeatConvection3D {
    cell: Cell,
    basis: Box<dyn Basis>,
    htc: f64,
    t_bulk: f64,
}

/// Implements a volumetric heat source `s` (per unit volume)
///
/// The thickness is 1 for 3D elements.
pub struct HeatSource {
    cell: Cell,
    basis: Box<dyn Basis>,
    physical_dim: usize,
    source: f64,
    thick: f64,
}

fn cell_basis(cell: &Cell, dim: usize) -> Result<Box<dyn Basis>, StrError> {
    if cell.dim() != dim {
        return Err("cell dimension is incompatible with the element");
    }
    create_basis(cell)
}

// Returns `coef N_i N_j`
fn scalar_mass(n: &DVector<f64>, coef: f64) -> DMatrix<f64> {
    n * n.transpose() * coef
}

// Returns `coef ∇N_i · ∇N_j`
fn scalar_laplacian(dn_dx: &DMatrix<f64>, coef: f64) -> DMatrix<f64> {
    dn_dx * dn_dx.transpose() * coef
}

impl<'a> HeatConduction2D<'a> {
    /// Allocates a new instance
    pub fn new(cell: Cell, constitutive: &'a ThermoElasticPlane) -> Result<Self, StrError> {
        Ok(HeatConduction2D {
            cell,
            basis: cell_basis(&cell, 2)?,
            constitutive,
            loads: Vec::new(),
        })
    }

    /// Returns the constitutive model
    pub fn constitutive(&self) -> &ThermoElasticPlane {
        self.constitutive
    }

    /// Attaches a volumetric heat source
    pub fn add_heat_source(&mut self, source: f64) -> Result<(), StrError> {
        let load = HeatSource::new(self.cell, 2, source, self.constitutive.thick)?;
        self.loads.push(Box::new(load));
        Ok(())
    }

    /// Attaches any element contributing to the load vector of this cell
    pub fn add_heat_load(&mut self, load: Box<dyn FiniteElement + 'a>) -> Result<(), StrError> {
        if load.cell() != &self.cell || load.n_vars() != 1 {
            return Err("the heat load must have one variable on the same cell");
        }
        self.loads.push(load);
        Ok(())
    }
}

impl<'a> FiniteElement for HeatConduction2D<'a> {
    fn name(&self) -> &str {
        "HeatConduction2D"
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

    fn evaluate_mass_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        let c = self.constitutive;
        Ok(scalar_mass(&data.n, c.prop.rho * c.prop.cp * c.thick))
    }

    fn evaluate_stiffness_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        let c = self.constitutive;
        Ok(scalar_laplacian(&data.dn_dx, c.thick * c.prop.kappa))
    }

    fn evaluate_load_vector(&self, data: &FEData, xpts: &[f64], u: &[f64], time: f64) -> Result<DVector<f64>, StrError> {
        let mut f = DVector::zeros(self.n_dof());
        for load in &self.loads {
            f += load.evaluate_load_vector(data, xpts, u, time)?;
        }
        Ok(f)
    }
}

impl<'a> HeatConduction3D<'a> {
    /// Allocates a new instance
    pub fn new(cell: Cell, constitutive: &'a ThermoElasticSolid) -> Result<Self, StrError> {
        Ok(HeatConduction3D {
            cell,
            basis: cell_basis(&cell, 3)?,
            constitutive,
            loads: Vec::new(),
        })
    }

    /// Returns the constitutive model
    pub fn constitutive(&self) -> &ThermoElasticSolid {
        self.constitutive
    }

    /// Attaches a volumetric heat source
    pub fn add_heat_source(&mut self, source: f64) -> Result<(), StrError> {
        let load = HeatSource::new(self.cell, 3, source, 1.0)?;
        self.loads.push(Box::new(load));
        Ok(())
    }

    /// Attaches any element contributing to the load vector of this cell
    pub fn add_heat_load(&mut self, load: Box<dyn FiniteElement + 'a>) -> Result<(), StrError> {
        if load.cell() != &self.cell || load.n_vars() != 1 {
            return Err("the heat load must have one variable on the same cell");
        }
        self.loads.push(load);
        Ok(())
    }
}

impl<'a> FiniteElement for HeatConduction3D<'a> {
    fn name(&self) -> &str {
        "HeatConduction3D"
    }
    fn n_vars(&self) -> usize {
        1
    }
    fn physical_dim(&self) -> usize {
        3
    }
    fn cell(&self) -> &Cell {
        &self.cell
    }
    fn basis(&self) -> &dyn Basis {
        self.basis.as_ref()
    }

    fn evaluate_mass_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        let p = &self.constitutive.prop;
        Ok(scalar_mass(&data.n, p.rho * p.cp))
    }

    fn evaluate_stiffness_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        Ok(scalar_laplacian(&data.dn_dx, self.constitutive.prop.kappa))
    }

    fn evaluate_load_vector(&self, data: &FEData, xpts: &[f64], u: &[f64], time: f64) -> Result<DVector<f64>, StrError> {
        let mut f = DVector::zeros(self.n_dof());
        for load in &self.loads {
            f += load.evaluate_load_vector(data, xpts, u, time)?;
        }
        Ok(f)
    }
}

impl HeatFlux2D {
    /// Allocates a new instance
    ///
    /// A positive flux `q` adds heat through the boundary.
    pub fn new(cell: Cell, flux: f64, thick: f64) -> Result<Self, StrError> {
        Ok(HeatFlux2D {
            cell,
            basis: cell_basis(&cell, 1)?,
            flux,
            thick,
        })
    }
}

impl FiniteElement for HeatFlux2D {
    fn name(&self) -> &str {
        "HeatFlux2D"
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
    fn evaluate_load_vector(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        Ok(&data.n * (self.thick * self.flux))
    }
}

impl HeatFlux3D {
    /// Allocates a new instance
    pub fn new(cell: Cell, flux: f64) -> Result<Self, StrError> {
        Ok(HeatFlux3D {
            cell,
            basis: cell_basis(&cell, 2)?,
            flux,
        })
    }
}

impl FiniteElement for HeatFlux3D {
    fn name(&self) -> &str {
        "HeatFlux3D"
    }
    fn n_vars(&self) -> usize {
        1
    }
    fn physical_dim(&self) -> usize {
        3
    }
    fn cell(&self) -> &Cell {
        &self.cell
    }
    fn basis(&self) -> &dyn Basis {
        self.basis.as_ref()
    }
    fn evaluate_load_vector(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        Ok(&data.n * self.flux)
    }
}

impl HeatConvection2D {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `htc` -- heat transfer coefficient h
    /// * `t_bulk` -- temperature of the surrounding medium
    /// * `thick` -- out-of-plane thickness
    pub fn new(cell: Cell, htc: f64, t_bulk: f64, thick: f64) -> Result<Self, StrError> {
        Ok(HeatConvection2D {
            cell,
            basis: cell_basis(&cell, 1)?,
            htc,
            t_bulk,
            thick,
        })
    }
}

impl FiniteElement for HeatConvection2D {
    fn name(&self) -> &str {
        "HeatConvection2D"
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
    fn evaluate_stiffness_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        Ok(scalar_mass(&data.n, self.thick * self.htc))
    }
    fn evaluate_load_vector(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        Ok(&data.n * (self.thick * self.htc * self.t_bulk))
    }
}

impl HeatConvection3D {
    /// Allocates a new instance
    pub fn new(cell: Cell, htc: f64, t_bulk: f64) -> Result<Self, StrError> {
        Ok(HeatConvection3D {
            cell,
            basis: cell_basis(&cell, 2)?,
            htc,
            t_bulk,
        })
    }
}

impl FiniteElement for HeatConvection3D {
    fn name(&self) -> &str {
        "HeatConvection3D"
    }
    fn n_vars(&self) -> usize {
        1
    }
    fn physical_dim(&self) -> usize {
        3
    }
    fn cell(&self) -> &Cell {
        &self.cell
    }
    fn basis(&self) -> &dyn Basis {
        self.basis.as_ref()
    }
    fn evaluate_stiffness_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        Ok(scalar_mass(&data.n, self.htc))
    }
    fn evaluate_load_vector(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        Ok(&data.n * (self.htc * self.t_bulk))
    }
}

impl HeatSource {
    /// Allocates a new instance
    pub fn new(cell: Cell, physical_dim: usize, source: f64, thick: f64) -> Result<Self, StrError> {
        Ok(HeatSource {
            cell,
            basis: cell_basis(&cell, physical_dim)?,
            physical_dim,
            source,
            thick,
        })
    }
}

impl FiniteElement for HeatSource {
    fn name(&self) -> &str {
        "HeatSource"
    }
    fn n_vars(&self) -> usize {
        1
    }
    fn physical_dim(&self) -> usize {
        self.physical_dim
    }
    fn cell(&self) -> &Cell {
        &self.cell
    }
    fn basis(&self) -> &dyn Basis {
        self.basis.as_ref()
    }
    fn evaluate_load_vector(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        Ok(&data.n * (self.thick * self.source))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{HeatConduction2D, HeatConduction3D, HeatConvection2D, HeatConvection3D, HeatFlux2D, HeatFlux3D};
    use crate::base::SampleMeshes;
    use crate::fe::{integrate_fe_matrix, integrate_fe_vector, FEMatrixType, FEVectorType, FiniteElement};
    use crate::fe::{PlaneType, ThermoElasticPlane, ThermoElasticSolid, ThermoMechanicalProperties};
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn prop() -> ThermoMechanicalProperties {
        ThermoMechanicalProperties {
            kappa: 3.0,
            rho: 2.0,
            cp: 5.0,
            ..Default::default()
        }
    }

    #[test]
    fn heat_conduction_2d_works() {
        let mesh = SampleMeshes::rectangle_quad(1, 1, 2.0, 1.0, 2).unwrap();
        let plane = ThermoElasticPlane::new(prop(), 0.5, PlaneType::PlaneStress);
        let cell = mesh.get_region_cells("Solid").unwrap()[0];
        let xpts = mesh.get_cell_xpts(&cell).unwrap();
        let mut elem = HeatConduction2D::new(cell, &plane).unwrap();
        assert_eq!(elem.n_dof(), 9);
        assert!(elem.elastic_plane().is_none());
        let u = [0.0; 9];

        // capacity: total = ρ cp t area
        let m = integrate_fe_matrix(&elem, &xpts, &u, FEMatrixType::Mass, 0.0).unwrap();
        assert_relative_eq!(m.sum(), 2.0 * 5.0 * 0.5 * 2.0, epsilon = 1e-12);

        // conduction: T = x gives the flux -κ on the left and +κ on the right (times t ly)
        let k = integrate_fe_matrix(&elem, &xpts, &u, FEMatrixType::Stiffness, 0.0).unwrap();
        let t = DVector::from_fn(9, |i, _| xpts[3 * i]);
        let q = &k * t;
        assert_relative_eq!(q.sum(), 0.0, epsilon = 1e-12);
        let right: f64 = (0..9).filter(|&i| xpts[3 * i] == 2.0).map(|i| q[i]).sum();
        assert_relative_eq!(right, 3.0 * 0.5 * 1.0, epsilon = 1e-12);

        // source: total = s t area
        elem.add_heat_source(4.0).unwrap();
        let f = integrate_fe_vector(&elem, &xpts, &u, FEVectorType::Load, 0.0).unwrap();
        assert_relative_eq!(f.sum(), 4.0 * 0.5 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn boundary_elements_2d_work() {
        let mesh = SampleMeshes::rectangle_quad(1, 1, 2.0, 3.0, 1).unwrap();
        let cell = mesh.get_region_cells("Left").unwrap()[0];
        let xpts = mesh.get_cell_xpts(&cell).unwrap();
        assert_eq!(
            HeatFlux2D::new(mesh.get_region_cells("Solid").unwrap()[0], 1.0, 1.0).err(),
            Some("cell dimension is incompatible with the element")
        );
        let flux = HeatFlux2D::new(cell, -1.0, 0.5).unwrap();
        let f = integrate_fe_vector(&flux, &xpts, &[0.0; 2], FEVectorType::Load, 0.0).unwrap();
        assert_relative_eq!(f[0], -0.75, epsilon = 1e-14);
        assert_relative_eq!(f[1], -0.75, epsilon = 1e-14);

        let conv = HeatConvection2D::new(cell, 2.0, 10.0, 0.5).unwrap();
        let k = integrate_fe_matrix(&conv, &xpts, &[0.0; 2], FEMatrixType::Stiffness, 0.0).unwrap();
        assert_relative_eq!(k.sum(), 2.0 * 0.5 * 3.0, epsilon = 1e-12);
        assert_relative_eq!(k[(0, 0)], 2.0 * k[(0, 1)], epsilon = 1e-12);
        let f = integrate_fe_vector(&conv, &xpts, &[0.0; 2], FEVectorType::Load, 0.0).unwrap();
        assert_relative_eq!(f.sum(), 2.0 * 10.0 * 0.5 * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn elements_3d_work() {
        let mesh = SampleMeshes::block_tet4(1, 1, 1, 1.0, 1.0, 2.0).unwrap();
        let solid = ThermoElasticSolid::new(prop());
        let mut capacity = 0.0;
        for cell in mesh.get_region_cells("Solid").unwrap() {
            let xpts = mesh.get_cell_xpts(&cell).unwrap();
            let elem = HeatConduction3D::new(cell, &solid).unwrap();
            let m = integrate_fe_matrix(&elem, &xpts, &[0.0; 4], FEMatrixType::Mass, 0.0).unwrap();
            capacity += m.sum();
            let k = integrate_fe_matrix(&elem, &xpts, &[0.0; 4], FEMatrixType::Stiffness, 0.0).unwrap();
            assert_relative_eq!((k * DVector::from_element(4, 1.0)).norm(), 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(capacity, 2.0 * 5.0 * 2.0, epsilon = 1e-12);

        let (mut q, mut h) = (0.0, 0.0);
        for cell in mesh.get_region_cells("Zmax").unwrap() {
            let xpts = mesh.get_cell_xpts(&cell).unwrap();
            let flux = HeatFlux3D::new(cell, 2.0).unwrap();
            q += integrate_fe_vector(&flux, &xpts, &[0.0; 3], FEVectorType::Load, 0.0).unwrap().sum();
            let conv = HeatConvection3D::new(cell, 4.0, 1.0).unwrap();
            h += integrate_fe_matrix(&conv, &xpts, &[0.0; 3], FEMatrixType::Stiffness, 0.0).unwrap().sum();
        }
        assert_relative_eq!(q, 2.0, epsilon = 1e-12);
        assert_relative_eq!(h, 4.0, epsilon = 1e-12);
    }
}
