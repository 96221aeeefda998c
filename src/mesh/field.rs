use super::{Cell, Mesh};
use crate::StrError;
use std::collections::BTreeMap;
use std::fmt;

/// Holds nodal values of one or more variables over a mesh
///
/// Values are stored node-major: `values[node * n_vars + var]`. The DOF number of a
/// (node, var) pair is also `node * n_vars + var`.
#[derive(Clone, Debug)]
pub struct Field<'a> {
    /// Name of the field, e.g., "U"
    name: String,

    /// Number of variables per node
    n_vars: usize,

    /// The mesh
    mesh: &'a Mesh,

    /// Names of the components (len = n_vars)
    comp_names: Vec<String>,

    /// Nodal values (len = n_vars * n_nodes)
    values: Vec<f64>,

    /// Fixed (prescribed) values keyed by DOF number
    fixed_dof: BTreeMap<usize, f64>,
}

impl<'a> Field<'a> {
    /// Allocates a new instance with all values equal to zero
    ///
    /// # Input
    ///
    /// * `name` -- name of the field
    /// * `n_vars` -- number of variables per node (must be > 0)
    /// * `mesh` -- the mesh
    /// * `component_names` -- names of the variables; if empty, the names
    ///   are generated as `{name}_{i}`
    pub fn new(name: &str, n_vars: usize, mesh: &'a Mesh, component_names: &[&str]) -> Result<Self, StrError> {
        if n_vars == 0 {
            return Err("the number of variables must be greater than zero");
        }
        let comp_names = if component_names.is_empty() {
            (0..n_vars).map(|i| format!("{}_{}", name, i)).collect()
        } else if component_names.len() == n_vars {
            component_names.iter().map(|s| s.to_string()).collect()
        } else {
            return Err("the number of component names must equal the number of variables");
        };
        Ok(Field {
            name: name.to_string(),
            n_vars,
            mesh,
            comp_names,
            values: vec![0.0; n_vars * mesh.n_nodes()],
            fixed_dof: BTreeMap::new(),
        })
    }

    /// Returns the name of the field
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of variables per node
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the mesh
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    /// Returns the names of the components
    pub fn comp_names(&self) -> &[String] {
        &self.comp_names
    }

    /// Returns the total number of DOFs
    pub fn n_dof(&self) -> usize {
        self.values.len()
    }

    /// Maps nodes to DOF numbers (`node * n_vars + j`)
    pub fn map_node_dof(&self, nodes: &[usize]) -> Vec<usize> {
        let mut dof = Vec::with_capacity(nodes.len() * self.n_vars);
        for &node in nodes {
            for j in 0..self.n_vars {
                dof.push(node * self.n_vars + j);
            }
        }
        dof
    }

    /// Returns the DOF numbers of a cell
    pub fn get_cell_dof(&self, cell: &Cell) -> Result<Vec<usize>, StrError> {
        let nodes = self.mesh.get_cell_nodes(cell)?;
        Ok(self.map_node_dof(nodes))
    }

    /// Returns the values at the nodes of a cell (node-major)
    pub fn get_cell_values(&self, cell: &Cell) -> Result<Vec<f64>, StrError> {
        let nodes = self.mesh.get_cell_nodes(cell)?;
        let mut u = Vec::with_capacity(nodes.len() * self.n_vars);
        for &node in nodes {
            u.extend_from_slice(&self.values[node * self.n_vars..(node + 1) * self.n_vars]);
        }
        Ok(u)
    }

    /// Prescribes a value to a variable at all nodes of a region
    ///
    /// A later call overwrites the value of a previously fixed DOF.
    pub fn add_fixed_dof(&mut self, region_name: &str, var: usize, value: f64) -> Result<(), StrError> {
        if var >= self.n_vars {
            return Err("variable index is out of range");
        }
        for node in self.mesh.get_region_nodes(region_name)? {
            self.fixed_dof.insert(node * self.n_vars + var, value);
        }
        Ok(())
    }

    /// Returns the fixed DOF numbers in ascending order
    pub fn get_fixed_dof(&self) -> Vec<usize> {
        self.fixed_dof.keys().copied().collect()
    }

    /// Returns the fixed values in ascending order of DOF number
    pub fn get_fixed_dof_values(&self) -> Vec<f64> {
        self.fixed_dof.values().copied().collect()
    }

    /// Removes all fixed DOFs
    pub fn clear_fixed_dof(&mut self) {
        self.fixed_dof.clear();
    }

    /// Sets the same values (one per variable) at all nodes
    pub fn set_all(&mut self, value: &[f64]) -> Result<(), StrError> {
        if value.len() != self.n_vars {
            return Err("the number of values must equal the number of variables");
        }
        for chunk in self.values.chunks_exact_mut(self.n_vars) {
            chunk.copy_from_slice(value);
        }
        Ok(())
    }

    /// Sets all nodal values
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), StrError> {
        if values.len() != self.values.len() {
            return Err("the number of values must equal the number of DOFs");
        }
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Returns the nodal values
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl<'a> fmt::Display for Field<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field {}\n", self.name)?;
        write!(f, "n_vars = {}\n", self.n_vars)?;
        write!(f, "components = {}\n", self.comp_names.join(", "))?;
        write!(f, "n_dof = {}\n", self.n_dof())?;
        write!(f, "n_fixed_dof = {}\n", self.fixed_dof.len())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
