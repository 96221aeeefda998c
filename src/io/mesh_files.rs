use super::Tokens;
use crate::mesh::{Cell, CellType, Mesh, Region};
use crate::StrError;
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Reads a mesh from a directory with the files `cells`, `xpts`, and `regions`
///
/// The file formats are:
///
/// ```text
/// cells:   n_cells n_nodes conn_size
///          idx type order region_tag node_0 node_1 ...   (one line per cell)
/// xpts:    n_nodes
///          x y z                                         (one line per node)
/// regions: n_regions
///          name dim tag                                  (one line per region)
/// ```
pub fn read_mesh<P>(dir: &P) -> Result<Mesh, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let dir = Path::new(dir);

    // cells
    let text = fs::read_to_string(dir.join("cells")).map_err(|_| "cannot open cells file")?;
    let mut tokens = Tokens::new(&text);
    let n_cells: usize = tokens.next()?;
    let n_nodes: usize = tokens.next()?;
    let conn_size: usize = tokens.next()?;
    let mut cells = Vec::new();
    let mut cell_nodes = Vec::new();
    for _ in 0..n_cells {
        let idx = tokens.next()?;
        let kind = CellType::from_code(tokens.next()?)?;
        let order = tokens.next()?;
        let region_tag = tokens.next()?;
        let cell = Cell::new(idx, kind, order, region_tag)?;
        let mut nodes: Vec<usize> = Vec::with_capacity(cell.n_nodes());
        for _ in 0..cell.n_nodes() {
            nodes.push(tokens.next()?);
        }
        cells.push(cell);
        cell_nodes.push(nodes);
    }
    if cell_nodes.iter().map(|n| n.len()).sum::<usize>() != conn_size {
        return Err("the connectivity size in the cells file is incorrect");
    }

    // coordinates
    let text = fs::read_to_string(dir.join("xpts")).map_err(|_| "cannot open xpts file")?;
    let mut tokens = Tokens::new(&text);
    let n: usize = tokens.next()?;
    if n != n_nodes {
        return Err("the number of nodes in the xpts file is incompatible with the cells file");
    }
    let n_coords = n.checked_mul(3).ok_or("the number of nodes in the xpts file is too large")?;
    let mut xpts: Vec<f64> = Vec::new();
    for _ in 0..n_coords {
        xpts.push(tokens.next()?);
    }

    // regions
    let text = fs::read_to_string(dir.join("regions")).map_err(|_| "cannot open regions file")?;
    let mut tokens = Tokens::new(&text);
    let n_regions: usize = tokens.next()?;
    let mut regions = Vec::new();
    for _ in 0..n_regions {
        let name = tokens.next_str()?;
        let dim = tokens.next()?;
        let tag = tokens.next()?;
        regions.push(Region::new(name, dim, tag));
    }

    Mesh::from_cell_nodes(cells, &cell_nodes, xpts, regions)
}

/// Writes a mesh to a directory (created if needed); see [read_mesh] for the format
pub fn write_mesh<P>(dir: &P, mesh: &Mesh) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let dir = Path::new(dir);
    fs::create_dir_all(dir).map_err(|_| "cannot create directory")?;
    let mut cells = String::new();
    let mut xpts = String::new();
    let mut regions = String::new();
    format_mesh(mesh, &mut cells, &mut xpts, &mut regions).map_err(|_| "cannot format mesh")?;
    fs::write(dir.join("cells"), cells).map_err(|_| "cannot write cells file")?;
    fs::write(dir.join("xpts"), xpts).map_err(|_| "cannot write xpts file")?;
    fs::write(dir.join("regions"), regions).map_err(|_| "cannot write regions file")?;
    Ok(())
}

fn format_mesh(mesh: &Mesh, cells: &mut String, xpts: &mut String, regions: &mut String) -> std::fmt::Result {
    let conn = mesh.cell_node_conn();
    writeln!(cells, "{} {} {}", conn.n1, conn.n2, conn.indices.len())?;
    for (i, cell) in mesh.cells().iter().enumerate() {
        write!(cells, "{} {} {} {}", cell.idx, cell.kind.code(), cell.order, cell.region_tag)?;
        for node in conn.row(i) {
            write!(cells, " {}", node)?;
        }
        writeln!(cells)?;
    }
    writeln!(xpts, "{}", mesh.n_nodes())?;
    for x in mesh.xpts().chunks_exact(3) {
        writeln!(xpts, "{:?} {:?} {:?}", x[0], x[1], x[2])?;
    }
    writeln!(regions, "{}", mesh.regions().len())?;
    for region in mesh.regions() {
        writeln!(regions, "{} {} {}", region.name, region.dim, region.tag)?;
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{read_mesh, write_mesh};
    use crate::base::{SampleMeshes, DEFAULT_TEST_DIR};
    use std::fs;

    #[test]
    fn read_captures_errors() {
        assert_eq!(
            read_mesh("/tmp/sfem/not-a-mesh-dir").err(),
            Some("cannot open cells file")
        );
        let dir = format!("{}/mesh_files_bad", DEFAULT_TEST_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(format!("{}/cells", dir), "1 3 3\n0 2 1 1 0 1 x\n").unwrap();
        assert_eq!(read_mesh(&dir).err(), Some("cannot parse token"));
        fs::write(format!("{}/cells", dir), "1 3 4\n0 2 1 1 0 1 2\n").unwrap();
        assert_eq!(
            read_mesh(&dir).err(),
            Some("the connectivity size in the cells file is incorrect")
        );
        fs::write(format!("{}/cells", dir), "1 3 3\n0 2 1 1 0 1 2\n").unwrap();
        fs::write(format!("{}/xpts", dir), "2\n0 0 0\n1 0 0\n").unwrap();
        assert_eq!(
            read_mesh(&dir).err(),
            Some("the number of nodes in the xpts file is incompatible with the cells file")
        );
        fs::write(format!("{}/xpts", dir), "3\n0 0 0\n1 0 0\n0 1 0\n").unwrap();
        let _ = fs::remove_file(format!("{}/regions", dir));
        assert_eq!(read_mesh(&dir).err(), Some("cannot open regions file"));
        fs::write(format!("{}/regions", dir), "1\nSolid 2 1\n").unwrap();
        let mesh = read_mesh(&dir).unwrap();
        assert_eq!(mesh.n_cells(), 1);
    }

    #[test]
    fn read_captures_oversized_headers() {
        let dir = format!("{}/mesh_files_oversized", DEFAULT_TEST_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(format!("{}/cells", dir), "18446744073709551615 1 1\n").unwrap();
        assert_eq!(read_mesh(&dir).err(), Some("unexpected end of file"));
        fs::write(format!("{}/cells", dir), "0 6148914691236517206 0\n").unwrap();
        fs::write(format!("{}/xpts", dir), "6148914691236517206\n0 0 0\n").unwrap();
        assert_eq!(
            read_mesh(&dir).err(),
            Some("the number of nodes in the xpts file is too large")
        );
        fs::write(format!("{}/cells", dir), "0 1 0\n").unwrap();
        fs::write(format!("{}/xpts", dir), "1\n0 0 0\n").unwrap();
        fs::write(format!("{}/regions", dir), "18446744073709551615\nSolid 2 1\n").unwrap();
        assert_eq!(read_mesh(&dir).err(), Some("unexpected end of file"));
    }

    #[test]
    fn write_and_read_work() {
        let dir = format!("{}/mesh_files_quad9", DEFAULT_TEST_DIR);
        let mesh = SampleMeshes::rectangle_quad(2, 1, 2.0, 0.5, 2).unwrap();
        write_mesh(&dir, &mesh).unwrap();
        let cells = fs::read_to_string(format!("{}/cells", dir)).unwrap();
        let first: Vec<_> = cells.lines().take(2).collect();
        assert_eq!(first, &["8 15 36", "0 3 2 1 0 2 12 10 1 7 11 5 6"]);
        let regions = fs::read_to_string(format!("{}/regions", dir)).unwrap();
        assert!(regions.starts_with("5\nSolid 2 1\nLeft 1 2\n"));

        let read = read_mesh(&dir).unwrap();
        assert_eq!(read.n_cells(), mesh.n_cells());
        assert_eq!(read.xpts(), mesh.xpts());
        assert_eq!(read.cells(), mesh.cells());
        assert_eq!(read.cell_node_conn(), mesh.cell_node_conn());
        assert_eq!(read.regions(), mesh.regions());
    }
}
