use crate::mesh::{Cell, CellType, Field, Mesh};
use crate::StrError;
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Returns the VTK cell type
fn vtk_cell_type(cell: &Cell) -> Result<usize, StrError> {
    let vtk = match (cell.kind, cell.order) {
        (CellType::Point, 1) => 1,
        (CellType::Line, 1) => 3,
        (CellType::Line, 2) => 21,
        (CellType::Line, 3) => 68,
        (CellType::Triangle, 1) => 5,
        (CellType::Triangle, 2) => 22,
        (CellType::Triangle, 3) => 69,
        (CellType::Quadrilateral, 1) => 9,
        (CellType::Quadrilateral, 2) => 23,
        (CellType::Quadrilateral, 3) => 70,
        (CellType::Tetrahedron, 1) => 10,
        (CellType::Tetrahedron, 2) => 24,
        (CellType::Tetrahedron, 3) => 71,
        (CellType::Hexahedron, 1) => 12,
        (CellType::Hexahedron, 2) => 25,
        (CellType::Prism, 1) => 13,
        _ => return Err("VTK cell type is not available"),
    };
    Ok(vtk)
}

/// Returns the cell nodes in VTK ordering
fn vtk_cell_nodes(cell: &Cell, nodes: &[usize]) -> Vec<usize> {
    let mut vtk = nodes.to_vec();
    if cell.kind == CellType::Tetrahedron && cell.order == 2 {
        vtk.swap(8, 9);
    }
    vtk
}

/// Writes a mesh and nodal fields in the legacy VTK ASCII format
///
/// Each component of each field becomes a `SCALARS` block named after the component.
pub fn write_vtk<P>(path: &P, mesh: &Mesh, fields: &[&Field]) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    for field in fields {
        if field.n_dof() != field.n_vars() * mesh.n_nodes() {
            return Err("the field is incompatible with the mesh");
        }
    }
    let mut buffer = String::new();
    let mut nodes = Vec::with_capacity(mesh.n_cells());
    let mut types = Vec::with_capacity(mesh.n_cells());
    for (i, cell) in mesh.cells().iter().enumerate() {
        nodes.push(vtk_cell_nodes(cell, mesh.cell_node_conn().row(i)));
        types.push(vtk_cell_type(cell)?);
    }
    format_vtk(&mut buffer, mesh, &nodes, &types, fields).map_err(|_| "cannot format VTK file")?;
    let path = Path::new(path);
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    fs::write(path, buffer).map_err(|_| "cannot write VTK file")
}

fn format_vtk(
    buffer: &mut String,
    mesh: &Mesh,
    nodes: &[Vec<usize>],
    types: &[usize],
    fields: &[&Field],
) -> std::fmt::Result {
    // header
    write!(
        buffer,
        "# vtk DataFile Version 2.0\n\
         SFEM\n\
         ASCII\n\
         DATASET UNSTRUCTURED_GRID\n"
    )?;

    // points
    writeln!(buffer, "POINTS {} float", mesh.n_nodes())?;
    for x in mesh.xpts().chunks_exact(3) {
        writeln!(buffer, "{:?} {:?} {:?}", x[0], x[1], x[2])?;
    }

    // cells
    let size: usize = nodes.iter().map(|n| n.len() + 1).sum();
    writeln!(buffer, "CELLS {} {}", nodes.len(), size)?;
    for cell_nodes in nodes {
        write!(buffer, "{}", cell_nodes.len())?;
        for n in cell_nodes {
            write!(buffer, " {}", n)?;
        }
        writeln!(buffer)?;
    }
    writeln!(buffer, "CELL_TYPES {}", types.len())?;
    for t in types {
        writeln!(buffer, "{}", t)?;
    }

    // data
    if fields.is_empty() {
        return Ok(());
    }
    writeln!(buffer, "POINT_DATA {}", mesh.n_nodes())?;
    for field in fields {
        let n_vars = field.n_vars();
        for (j, name) in field.comp_names().iter().enumerate() {
            writeln!(buffer, "SCALARS {} float", name)?;
            writeln!(buffer, "LOOKUP_TABLE default")?;
            for v in field.values().iter().skip(j).step_by(n_vars) {
                writeln!(buffer, "{:?}", v)?;
            }
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
