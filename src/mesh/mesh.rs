use super::{Cell, Connectivity, Region};
use crate::StrError;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Holds the cells, nodal coordinates, and regions of a finite element mesh
///
/// Nodal coordinates are always stored with 3 components per node, regardless of the
/// mesh dimension (unused components are zero).
#[derive(Clone, Debug)]
pub struct Mesh {
    /// All cells (of any dimension)
    cells: Vec<Cell>,

    /// Cell-to-node connectivity (rows are in the same order as `cells`)
    cell_node_conn: Connectivity,

    /// Nodal coordinates (3 per node)
    xpts: Vec<f64>,

    /// Named regions
    regions: Vec<Region>,

    /// Maps cell.idx to the position in `cells`
    cell_position: HashMap<usize, usize>,

    /// Node-to-node connectivity computed on demand
    node_node_conn: OnceLock<Connectivity>,
}

impl Mesh {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `cells` -- the cells; `cells[i]` corresponds to row `i` of `cell_node_conn`
    /// * `cell_node_conn` -- the cell-to-node connectivity
    /// * `xpts` -- the nodal coordinates (3 per node)
    /// * `regions` -- the named regions
    pub fn new(
        cells: Vec<Cell>,
        cell_node_conn: Connectivity,
        xpts: Vec<f64>,
        regions: Vec<Region>,
    ) -> Result<Self, StrError> {
        if cells.len() != cell_node_conn.n1 {
            return Err("the number of cells must equal the number of connectivity rows");
        }
        if xpts.len() % 3 != 0 {
            return Err("the number of coordinates must be a multiple of 3");
        }
        if xpts.len() / 3 != cell_node_conn.n2 {
            return Err("the number of nodes in the connectivity is incompatible with the coordinates");
        }
        if cell_node_conn.indices.iter().any(|&n| n >= cell_node_conn.n2) {
            return Err("connectivity entry is out of range");
        }
        let mut cell_position = HashMap::with_capacity(cells.len());
        for (i, cell) in cells.iter().enumerate() {
            if cell.n_nodes() != cell_node_conn.count(i) {
                return Err("the number of cell nodes is incompatible with the cell type and order");
            }
            if cell_position.insert(cell.idx, i).is_some() {
                return Err("cell indices must be unique");
            }
        }
        Ok(Mesh {
            cells,
            cell_node_conn,
            xpts,
            regions,
            cell_position,
            node_node_conn: OnceLock::new(),
        })
    }

    /// Allocates a new instance from nested cell nodes
    pub fn from_cell_nodes(
        cells: Vec<Cell>,
        cell_nodes: &[Vec<usize>],
        xpts: Vec<f64>,
        regions: Vec<Region>,
    ) -> Result<Self, StrError> {
        let conn = Connectivity::from_rows(xpts.len() / 3, cell_nodes)?;
        Mesh::new(cells, conn, xpts, regions)
    }

    /// Returns the mesh dimension (the maximum region dimension)
    pub fn dim(&self) -> usize {
        self.regions.iter().map(|r| r.dim).max().unwrap_or(0)
    }

    /// Returns the number of cells
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of nodes
    pub fn n_nodes(&self) -> usize {
        self.xpts.len() / 3
    }

    /// Returns all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell-to-node connectivity
    pub fn cell_node_conn(&self) -> &Connectivity {
        &self.cell_node_conn
    }

    /// Returns the node-to-node connectivity (computed once)
    pub fn node_node_conn(&self) -> &Connectivity {
        self.node_node_conn.get_or_init(|| self.cell_node_conn.node_to_node())
    }

    /// Returns the nodal coordinates (3 per node)
    pub fn xpts(&self) -> &[f64] {
        &self.xpts
    }

    /// Replaces the nodal coordinates
    pub fn set_xpts(&mut self, xpts: Vec<f64>) -> Result<(), StrError> {
        if xpts.len() != self.xpts.len() {
            return Err("the number of coordinates must not change");
        }
        self.xpts = xpts;
        Ok(())
    }

    /// Returns the regions
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Finds a region by name
    pub fn get_region_by_name(&self, region_name: &str) -> Result<&Region, StrError> {
        self.regions
            .iter()
            .find(|r| r.name == region_name)
            .ok_or("cannot find region with the given name")
    }

    /// Returns the cells of a region (in mesh order)
    pub fn get_region_cells(&self, region_name: &str) -> Result<Vec<Cell>, StrError> {
        let tag = self.get_region_by_name(region_name)?.tag;
        Ok(self.cells.iter().filter(|c| c.region_tag == tag).copied().collect())
    }

    /// Returns the unique nodes of a region (in the order they are first found)
    pub fn get_region_nodes(&self, region_name: &str) -> Result<Vec<usize>, StrError> {
        let tag = self.get_region_by_name(region_name)?.tag;
        let mut seen = vec![false; self.n_nodes()];
        let mut nodes = Vec::new();
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.region_tag != tag {
                continue;
            }
            for &n in self.cell_node_conn.row(i) {
                if !seen[n] {
                    seen[n] = true;
                    nodes.push(n);
                }
            }
        }
        Ok(nodes)
    }

    /// Returns the nodes of a cell
    pub fn get_cell_nodes(&self, cell: &Cell) -> Result<&[usize], StrError> {
        let pos = self.cell_position.get(&cell.idx).ok_or("cannot find cell in mesh")?;
        Ok(self.cell_node_conn.row(*pos))
    }

    /// Returns the nodal coordinates of a cell (3 per node)
    pub fn get_cell_xpts(&self, cell: &Cell) -> Result<Vec<f64>, StrError> {
        let nodes = self.get_cell_nodes(cell)?;
        let mut x = Vec::with_capacity(3 * nodes.len());
        for &n in nodes {
            x.extend_from_slice(&self.xpts[3 * n..3 * n + 3]);
        }
        Ok(x)
    }

    /// Logs a summary of the mesh
    pub fn info(&self) {
        tracing::info!(
            n_nodes = self.n_nodes(),
            n_cells = self.n_cells(),
            n_regions = self.regions.len(),
            "mesh loaded"
        );
        for region in &self.regions {
            tracing::debug!("region {}", region);
        }
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mesh data\n")?;
        write!(f, "=========\n")?;
        write!(f, "dim = {}\n", self.dim())?;
        write!(f, "n_nodes = {}\n", self.n_nodes())?;
        write!(f, "n_cells = {}\n", self.n_cells())?;
        for region in &self.regions {
            write!(f, "region: {}\n", region)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
