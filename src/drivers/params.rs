use crate::fe::{PlaneType, ThermoMechanicalProperties};
use crate::la::SolverConfig;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Defines the available simulation drivers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum DriverKind {
    Elasticity2D,
    Elasticity3D,
    Laplace,
    Transient,
}

impl DriverKind {
    /// Returns the mesh directory used when none is given
    pub fn default_mesh_dir(&self) -> &'static str {
        match self {
            DriverKind::Elasticity2D => "mesh/mesh_quad2",
            DriverKind::Elasticity3D => "mesh/mesh_tet2",
            DriverKind::Laplace | DriverKind::Transient => "mesh",
        }
    }
}

impl FromStr for DriverKind {
    type Err = StrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elasticity2d" => Ok(DriverKind::Elasticity2D),
            "elasticity3d" => Ok(DriverKind::Elasticity3D),
            "laplace" => Ok(DriverKind::Laplace),
            "transient" => Ok(DriverKind::Transient),
            _ => Err("driver must be elasticity2d, elasticity3d, laplace, or transient"),
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverKind::Elasticity2D => "elasticity2d",
            DriverKind::Elasticity3D => "elasticity3d",
            DriverKind::Laplace => "laplace",
            DriverKind::Transient => "transient",
        };
        write!(f, "{}", name)
    }
}

/// Holds the parameters of the plane linear elasticity driver
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Elasticity2DParams {
    /// Material properties
    pub prop: ThermoMechanicalProperties,

    /// Out-of-plane thickness
    pub thickness: f64,

    /// Plane stress or plane strain
    pub plane_type: PlaneType,

    /// Pressure applied to the loaded boundary
    pub pressure: f64,

    /// Region with the elastic cells
    pub solid_region: String,

    /// Region where both displacements are zero
    pub fixed_region: String,

    /// Boundary region where the pressure acts
    pub pressure_region: String,

    /// Linear solver
    pub solver: SolverConfig,
}

impl Default for Elasticity2DParams {
    fn default() -> Self {
        Elasticity2DParams {
            prop: ThermoMechanicalProperties {
                young: 5e9,
                nu: 0.35,
                rho: 1e3,
                alpha: 1e-5,
                ..Default::default()
            },
            thickness: 1e-3,
            plane_type: PlaneType::PlaneStress,
            pressure: 1000.0,
            solid_region: "Solid".to_string(),
            fixed_region: "Fixed".to_string(),
            pressure_region: "Left".to_string(),
            solver: SolverConfig::default(),
        }
    }
}

/// Holds the parameters of the 3D linear elasticity driver
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Elasticity3DParams {
    /// Material properties
    pub prop: ThermoMechanicalProperties,

    /// Gravity acceleration vector
    pub gravity: [f64; 3],

    /// Region with the elastic cells
    pub solid_region: String,

    /// Region where all displacements are zero
    pub fixed_region: String,

    /// Linear solver
    pub solver: SolverConfig,
}

impl Default for Elasticity3DParams {
    fn default() -> Self {
        Elasticity3DParams {
            prop: ThermoMechanicalProperties {
                young: 1e5,
                nu: 0.2,
                rho: 1e-3,
                ..Default::default()
            },
            gravity: [0.0, -9.81, 0.0],
            solid_region: "Solid".to_string(),
            fixed_region: "Fixed".to_string(),
            solver: SolverConfig::default(),
        }
    }
}

/// Holds the parameters of the potential flow (Laplace) driver
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LaplaceParams {
    /// Conductivity (permeability) coefficient
    pub kappa: f64,

    /// Out-of-plane thickness
    pub thickness: f64,

    /// Flux prescribed on the inflow boundary (negative means inflow)
    pub flux: f64,

    /// Region with the fluid cells
    pub fluid_region: String,

    /// Region where the potential is zero
    pub fixed_region: String,

    /// Boundary region with the prescribed flux
    pub flux_region: String,

    /// Linear solver
    pub solver: SolverConfig,
}

impl Default for LaplaceParams {
    fn default() -> Self {
        LaplaceParams {
            kappa: 1.0,
            thickness: 1.0,
            flux: -1.0,
            fluid_region: "Fluid".to_string(),
            fixed_region: "Right".to_string(),
            flux_region: "Left".to_string(),
            solver: SolverConfig::default(),
        }
    }
}

/// Holds a value prescribed on all nodes of a region
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RegionValue {
    /// Region name
    pub region: String,

    /// Prescribed value
    pub value: f64,
}

/// Holds the parameters of the transient heat conduction driver
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TransientParams {
    /// Material properties
    pub prop: ThermoMechanicalProperties,

    /// Out-of-plane thickness
    pub thickness: f64,

    /// Initial temperature
    pub initial_temperature: f64,

    /// Prescribed temperatures
    pub fixed: Vec<RegionValue>,

    /// Region with the conducting cells
    pub solid_region: String,

    /// Time step
    pub dt: f64,

    /// Number of time steps
    pub n_steps: usize,

    /// Linear solver
    pub solver: SolverConfig,
}

impl Default for TransientParams {
    fn default() -> Self {
        TransientParams {
            prop: ThermoMechanicalProperties {
                kappa: 27.0,
                cp: 420.0,
                rho: 8040.0,
                ..Default::default()
            },
            thickness: 1.0,
            initial_temperature: 0.0,
            fixed: vec![
                RegionValue {
                    region: "Fixed".to_string(),
                    value: 0.0,
                },
                RegionValue {
                    region: "Upper".to_string(),
                    value: 100.0,
                },
            ],
            solid_region: "Solid".to_string(),
            dt: 0.01,
            n_steps: 100,
            solver: SolverConfig::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
