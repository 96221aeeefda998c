use super::{create_basis, Basis, FEData, FiniteElement, ThermoElastic, ThermoElasticPlane, ThermoElasticSolid};
use crate::mesh::{Cell, Field};
use crate::StrError;
use nalgebra::{DMatrix, DVector};

/// Implements the plane linear elasticity element (unknowns: u, v)
pub struct LinearElasticity2D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticPlane,
    loads: Vec<Box<dyn FiniteElement + 'a>>,
}

/// Implements the 3D linear elasticity element (unknowns: u, v, w)
pub struct LinearElasticity3D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticSolid,
    loads: Vec<Box<dyn FiniteElement + 'a>>,
}

/// Implements a body force `ρ g` (per unit volume) attached to a plane elastic element
pub struct InertialLoad2D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticPlane,
    g: [f64; 2],
}

/// Implements a body force `ρ g` (per unit volume) attached to a 3D elastic element
pub struct InertialLoad3D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticSolid,
    g: [f64; 3],
}

/// Implements the load due to a temperature change `T - T0` on a plane elastic element
pub struct ThermalLoad2D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticPlane,
    temperature: &'a Field<'a>,
    t0: f64,
}

/// Implements the load due to a temperature change `T - T0` on a 3D elastic element
pub struct ThermalLoad3D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    constitutive: &'a ThermoElasticSolid,
    temperature: &'a Field<'a>,
    t0: f64,
}

/// Implements a pressure acting on a boundary line of a plane solid
///
/// The pressure is interpolated from the nodal values of the field `P` and acts against
/// the cell normal; see [Cell::cell_normal].
pub struct PressureLoad2D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    pressure: &'a Field<'a>,
    thick: f64,
}

/// Implements a pressure acting on a boundary surface of a 3D solid
pub struct PressureLoad3D<'a> {
    cell: Cell,
    basis: Box<dyn Basis>,
    pressure: &'a Field<'a>,
}

// Checks the cell dimension and allocates the basis
fn cell_basis(cell: &Cell, dim: usize) -> Result<Box<dyn Basis>, StrError> {
    if cell.dim() != dim {
        return Err("cell dimension is incompatible with the element");
    }
    create_basis(cell)
}

// Checks that a field holds a single variable over the mesh of the cell
fn check_scalar_field(field: &Field, cell: &Cell) -> Result<(), StrError> {
    if field.n_vars() != 1 {
        return Err("the field must have a single variable");
    }
    field.mesh().get_cell_nodes(cell)?;
    Ok(())
}

// Returns the mass integrand `coef N_i N_j` repeated on the diagonal of each ndim×ndim block
fn block_mass(n: &DVector<f64>, ndim: usize, coef: f64) -> DMatrix<f64> {
    let nn = n.len();
    let mut mat = DMatrix::zeros(nn * ndim, nn * ndim);
    for i in 0..nn {
        for j in 0..nn {
            for k in 0..ndim {
                mat[(i * ndim + k, j * ndim + k)] = coef * n[i] * n[j];
            }
        }
    }
    mat
}

// Returns the load integrand `coef b_k N_i`
fn block_force(n: &DVector<f64>, b: &[f64]) -> DVector<f64> {
    let ndim = b.len();
    let mut vec = DVector::zeros(n.len() * ndim);
    for i in 0..n.len() {
        for k in 0..ndim {
            vec[i * ndim + k] = b[k] * n[i];
        }
    }
    vec
}

// Returns the pressure load integrand `-(Σ N_j p_j) n_k N_i`
fn pressure_force(cell: &Cell, pressure: &Field, data: &FEData, xpts: &[f64], ndim: usize) -> Result<DVector<f64>, StrError> {
    let p = pressure.get_cell_values(cell)?;
    let normal = cell.cell_normal(xpts)?;
    let pq: f64 = data.n.iter().zip(&p).map(|(nj, pj)| nj * pj).sum();
    let b: Vec<f64> = (0..ndim).map(|k| -pq * normal[k]).collect();
    Ok(block_force(&data.n, &b))
}

// Returns the nodal temperature change of a cell
fn temperature_change(cell: &Cell, temperature: &Field, t0: f64) -> Result<Vec<f64>, StrError> {
    Ok(temperature.get_cell_values(cell)?.iter().map(|t| t - t0).collect())
}

impl<'a> LinearElasticity2D<'a> {
    /// Allocates a new instance
    pub fn new(cell: Cell, constitutive: &'a ThermoElasticPlane) -> Result<Self, StrError> {
        Ok(LinearElasticity2D {
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

    /// Attaches a body force due to the acceleration `g`
    pub fn add_inertial_load(&mut self, g: [f64; 2]) -> Result<(), StrError> {
        let load = InertialLoad2D::new(self.cell, self.constitutive, g)?;
        self.loads.push(Box::new(load));
        Ok(())
    }

    /// Attaches the load due to the temperature change `T - T0`
    pub fn add_thermal_load(&mut self, temperature: &'a Field<'a>, t0: f64) -> Result<(), StrError> {
        let load = ThermalLoad2D::new(self.cell, self.constitutive, temperature, t0)?;
        self.loads.push(Box::new(load));
        Ok(())
    }
}

impl<'a> FiniteElement for LinearElasticity2D<'a> {
    fn name(&self) -> &str {
        "LinearElasticity2D"
    }
    fn n_vars(&self) -> usize {
        2
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
        Ok(block_mass(&data.n, 2, c.thick * c.prop.rho))
    }

    fn evaluate_stiffness_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        let b = self.constitutive.strain_displacement_matrix(&data.dn_dx);
        let d = self.constitutive.stress_strain_matrix();
        Ok(b.transpose() * d * b * self.constitutive.thick)
    }

    fn evaluate_load_vector(&self, data: &FEData, xpts: &[f64], u: &[f64], time: f64) -> Result<DVector<f64>, StrError> {
        let mut f = DVector::zeros(self.n_dof());
        for load in &self.loads {
            f += load.evaluate_load_vector(data, xpts, u, time)?;
        }
        Ok(f)
    }

    fn elastic_plane(&self) -> Option<&ThermoElasticPlane> {
        Some(self.constitutive)
    }
}

impl<'a> LinearElasticity3D<'a> {
    /// Allocates a new instance
    pub fn new(cell: Cell, constitutive: &'a ThermoElasticSolid) -> Result<Self, StrError> {
        Ok(LinearElasticity3D {
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

    /// Attaches a body force due to the acceleration `g`
    pub fn add_inertial_load(&mut self, g: [f64; 3]) -> Result<(), StrError> {
        let load = InertialLoad3D::new(self.cell, self.constitutive, g)?;
        self.loads.push(Box::new(load));
        Ok(())
    }

    /// Attaches the load due to the temperature change `T - T0`
    pub fn add_thermal_load(&mut self, temperature: &'a Field<'a>, t0: f64) -> Result<(), StrError> {
        let load = ThermalLoad3D::new(self.cell, self.constitutive, temperature, t0)?;
        self.loads.push(Box::new(load));
        Ok(())
    }
}

impl<'a> FiniteElement for LinearElasticity3D<'a> {
    fn name(&self) -> &str {
        "LinearElasticity3D"
    }
    fn n_vars(&self) -> usize {
        3
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
        Ok(block_mass(&data.n, 3, self.constitutive.prop.rho))
    }

    fn evaluate_stiffness_matrix(&self, data: &FEData, _xpts: &[f64], _u: &[f64], _time: f64) -> Result<DMatrix<f64>, StrError> {
        let b = self.constitutive.strain_displacement_matrix(&data.dn_dx);
        let d = self.constitutive.stress_strain_matrix();
        Ok(b.transpose() * d * b)
    }

    fn evaluate_load_vector(&self, data: &FEData, xpts: &[f64], u: &[f64], time: f64) -> Result<DVector<f64>, StrError> {
        let mut f = DVector::zeros(self.n_dof());
        for load in &self.loads {
            f += load.evaluate_load_vector(data, xpts, u, time)?;
        }
        Ok(f)
    }

    fn elastic_solid(&self) -> Option<&ThermoElasticSolid> {
        Some(self.constitutive)
    }
}

impl<'a> InertialLoad2D<'a> {
    /// Allocates a new instance
    pub fn new(cell: Cell, constitutive: &'a ThermoElasticPlane, g: [f64; 2]) -> Result<Self, StrError> {
        Ok(InertialLoad2D {
            cell,
            basis: cell_basis(&cell, 2)?,
            constitutive,
            g,
        })
    }
}

impl<'a> FiniteElement for InertialLoad2D<'a> {
    fn name(&self) -> &str {
        "InertialLoad2D"
    }
    fn n_vars(&self) -> usize {
        2
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
        let c = self.constitutive.thick * self.constitutive.prop.rho;
        Ok(block_force(&data.n, &[c * self.g[0], c * self.g[1]]))
    }
}

impl<'a> InertialLoad3D<'a> {
    /// Allocates a new instance
    pub fn new(cell: Cell, constitutive: &'a ThermoElasticSolid, g: [f64; 3]) -> Result<Self, StrError> {
        Ok(InertialLoad3D {
            cell,
            basis: cell_basis(&cell, 3)?,
            constitutive,
            g,
        })
    }
}

impl<'a> FiniteElement for InertialLoad3D<'a> {
    fn name(&self) -> &str {
        "InertialLoad3D"
    }
    fn n_vars(&self) -> usize {
        3
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
        let rho = self.constitutive.prop.rho;
        Ok(block_force(&data.n, &[rho * self.g[0], rho * self.g[1], rho * self.g[2]]))
    }
}

impl<'a> ThermalLoad2D<'a> {
    /// Allocates a new instance
    pub fn new(
        cell: Cell,
        constitutive: &'a ThermoElasticPlane,
        temperature: &'a Field<'a>,
        t0: f64,
    ) -> Result<Self, StrError> {
        check_scalar_field(temperature, &cell)?;
        Ok(ThermalLoad2D {
            cell,
            basis: cell_basis(&cell, 2)?,
            constitutive,
            temperature,
            t0,
        })
    }
}

impl<'a> FiniteElement for ThermalLoad2D<'a> {
    fn name(&self) -> &str {
        "ThermalLoad2D"
    }
    fn n_vars(&self) -> usize {
        2
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
        let dt = temperature_change(&self.cell, self.temperature, self.t0)?;
        let f = self.constitutive.eval_thermal_stress(&data.n, &data.dn_dx, &dt);
        Ok(f * self.constitutive.thick)
    }
}

impl<'a> ThermalLoad3D<'a> {
    /// Allocates a new instance
    pub fn new(
        cell: Cell,
        constitutive: &'a ThermoElasticSolid,
        temperature: &'a Field<'a>,
        t0: f64,
    ) -> Result<Self, StrError> {
        check_scalar_field(temperature, &cell)?;
        Ok(ThermalLoad3D {
            cell,
            basis: cell_basis(&cell, 3)?,
            constitutive,
            temperature,
            t0,
        })
    }
}

impl<'a> FiniteElement for ThermalLoad3D<'a> {
    fn name(&self) -> &str {
        "ThermalLoad3D"
    }
    fn n_vars(&self) -> usize {
        3
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
        let dt = temperature_change(&self.cell, self.temperature, self.t0)?;
        Ok(self.constitutive.eval_thermal_stress(&data.n, &data.dn_dx, &dt))
    }
}

impl<'a> PressureLoad2D<'a> {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `cell` -- a boundary line
    /// * `pressure` -- the nodal pressure field (one variable)
    /// * `thick` -- the out-of-plane thickness
    pub fn new(cell: Cell, pressure: &'a Field<'a>, thick: f64) -> Result<Self, StrError> {
        check_scalar_field(pressure, &cell)?;
        Ok(PressureLoad2D {
            cell,
            basis: cell_basis(&cell, 1)?,
            pressure,
            thick,
        })
    }
}

impl<'a> FiniteElement for PressureLoad2D<'a> {
    fn name(&self) -> &str {
        "PressureLoad2D"
    }
    fn n_vars(&self) -> usize {
        2
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
    fn evaluate_load_vector(&self, data: &FEData, xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        Ok(pressure_force(&self.cell, self.pressure, data, xpts, 2)? * self.thick)
    }
}

impl<'a> PressureLoad3D<'a> {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `cell` -- a boundary surface
    /// * `pressure` -- the nodal pressure field (one variable)
    pub fn new(cell: Cell, pressure: &'a Field<'a>) -> Result<Self, StrError> {
        check_scalar_field(pressure, &cell)?;
        Ok(PressureLoad3D {
            cell,
            basis: cell_basis(&cell, 2)?,
            pressure,
        })
    }
}

impl<'a> FiniteElement for PressureLoad3D<'a> {
    fn name(&self) -> &str {
        "PressureLoad3D"
    }
    fn n_vars(&self) -> usize {
        3
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
    fn evaluate_load_vector(&self, data: &FEData, xpts: &[f64], _u: &[f64], _time: f64) -> Result<DVector<f64>, StrError> {
        pressure_force(&self.cell, self.pressure, data, xpts, 3)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
