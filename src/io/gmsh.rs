use super::Tokens;
use crate::mesh::{Cell, CellType, Mesh, Region};
use crate::StrError;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Returns the cell type and order corresponding to a Gmsh element type
fn gmsh_to_native(gmsh_type: usize) -> Result<(CellType, usize), StrError> {
    let native = match gmsh_type {
        15 => (CellType::Point, 1),
        1 => (CellType::Line, 1),
        8 => (CellType::Line, 2),
        26 => (CellType::Line, 3),
        2 => (CellType::Triangle, 1),
        9 => (CellType::Triangle, 2),
        21 => (CellType::Triangle, 3),
        3 => (CellType::Quadrilateral, 1),
        10 => (CellType::Quadrilateral, 2),
        36 => (CellType::Quadrilateral, 3),
        4 => (CellType::Tetrahedron, 1),
        11 => (CellType::Tetrahedron, 2),
        29 => (CellType::Tetrahedron, 3),
        5 => (CellType::Hexahedron, 1),
        17 => (CellType::Hexahedron, 2),
        6 => (CellType::Prism, 1),
        _ => return Err("Gmsh element type is not supported"),
    };
    Ok(native)
}

/// Reads a mesh in the Gmsh ASCII format (version 2.2)
///
/// The region of each element is given by its first (physical) tag and the regions
/// are named after the `$PhysicalNames` section. Names with spaces are joined with
/// underscores. Cell indices are the element ids minus one.
pub fn read_gmsh<P>(path: &P) -> Result<Mesh, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let text = fs::read_to_string(Path::new(path)).map_err(|_| "cannot open Gmsh file")?;

    // regions
    let mut regions = Vec::new();
    if text.contains("$PhysicalNames") {
        let mut tokens = Tokens::new(&text);
        tokens.skip_past("$PhysicalNames")?;
        let n_regions: usize = tokens.next()?;
        for _ in 0..n_regions {
            let dim = tokens.next()?;
            let tag = tokens.next()?;
            let mut name = tokens.next_str()?.to_string();
            while name.starts_with('"') && (name.len() == 1 || !name.ends_with('"')) {
                name.push('_');
                name.push_str(tokens.next_str()?);
            }
            regions.push(Region::new(name.trim_matches('"'), dim, tag));
        }
    }

    // nodes
    let mut tokens = Tokens::new(&text);
    tokens.skip_past("$Nodes")?;
    let n_nodes: usize = tokens.next()?;
    let mut node_index = HashMap::new();
    let mut xpts = Vec::new();
    for i in 0..n_nodes {
        let id: usize = tokens.next()?;
        node_index.insert(id, i);
        for _ in 0..3 {
            xpts.push(tokens.next()?);
        }
    }

    // elements
    tokens.skip_past("$Elements")?;
    let n_elements: usize = tokens.next()?;
    let mut cells = Vec::new();
    let mut cell_nodes = Vec::new();
    for _ in 0..n_elements {
        let id: usize = tokens.next()?;
        let (kind, order) = gmsh_to_native(tokens.next()?)?;
        let n_tags: usize = tokens.next()?;
        if n_tags == 0 {
            return Err("Gmsh element must have at least one tag");
        }
        let region_tag = tokens.next()?;
        for _ in 1..n_tags {
            tokens.next_str()?;
        }
        let cell = Cell::new(id.checked_sub(1).ok_or("Gmsh element id must be positive")?, kind, order, region_tag)?;
        let mut nodes = Vec::with_capacity(cell.n_nodes());
        for _ in 0..cell.n_nodes() {
            let node_id: usize = tokens.next()?;
            nodes.push(*node_index.get(&node_id).ok_or("Gmsh element refers to an unknown node")?);
        }
        cells.push(cell);
        cell_nodes.push(nodes);
    }

    Mesh::from_cell_nodes(cells, &cell_nodes, xpts, regions)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::read_gmsh;
    use crate::base::DEFAULT_TEST_DIR;
    use std::fs;

    const SQUARE: &str = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
2
1 2 "Left side"
2 1 "Solid"
$EndPhysicalNames
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
3
1 1 2 2 5 4 1
2 2 2 1 7 1 2 4
3 2 2 1 7 2 3 4
$EndElements
"#;

    #[test]
    fn read_gmsh_works() {
        let path = format!("{}/square.msh", DEFAULT_TEST_DIR);
        fs::create_dir_all(DEFAULT_TEST_DIR).unwrap();
        fs::write(&path, SQUARE).unwrap();
        let mesh = read_gmsh(&path).unwrap();
        assert_eq!(mesh.n_nodes(), 4);
        assert_eq!(mesh.n_cells(), 3);
        assert_eq!(mesh.dim(), 2);
        assert_eq!(mesh.regions()[0].name, "Left_side");
        assert_eq!(mesh.regions()[1].name, "Solid");
        let left = mesh.get_region_cells("Left_side").unwrap();
        assert_eq!(left[0].idx, 0);
        assert_eq!(mesh.get_cell_nodes(&left[0]).unwrap(), &[3, 0]);
        let solid = mesh.get_region_cells("Solid").unwrap();
        assert_eq!(solid.len(), 2);
        assert_eq!(solid[1].idx, 2);
        assert_eq!(mesh.get_cell_nodes(&solid[1]).unwrap(), &[1, 2, 3]);
        assert_eq!(mesh.get_cell_xpts(&solid[1]).unwrap()[3..6], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn read_gmsh_captures_errors() {
        assert_eq!(read_gmsh("/tmp/sfem/none.msh").err(), Some("cannot open Gmsh file"));
        let path = format!("{}/bad_type.msh", DEFAULT_TEST_DIR);
        fs::create_dir_all(DEFAULT_TEST_DIR).unwrap();
        fs::write(&path, SQUARE.replace("3 2 2 1 7 2 3 4", "3 99 2 1 7 2 3 4")).unwrap();
        assert_eq!(read_gmsh(&path).err(), Some("Gmsh element type is not supported"));
        let path = format!("{}/bad_node.msh", DEFAULT_TEST_DIR);
        fs::write(&path, SQUARE.replace("3 2 2 1 7 2 3 4", "3 2 2 1 7 2 3 9")).unwrap();
        assert_eq!(read_gmsh(&path).err(), Some("Gmsh element refers to an unknown node"));
        let path = format!("{}/huge_counts.msh", DEFAULT_TEST_DIR);
        fs::write(&path, SQUARE.replace("$Nodes\n4\n", "$Nodes\n18446744073709551615\n")).unwrap();
        assert_eq!(read_gmsh(&path).err(), Some("cannot parse token"));
        fs::write(&path, SQUARE.replace("$Elements\n3\n", "$Elements\n18446744073709551615\n")).unwrap();
        assert_eq!(read_gmsh(&path).err(), Some("cannot parse token"));
    }
}
