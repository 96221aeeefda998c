use crate::mesh::{Cell, CellType, Mesh, Region};
use crate::StrError;

/// Generates structured meshes for tests and examples
///
/// The two-dimensional meshes have the regions `Solid` (tag 1), `Left` (2), `Right` (3),
/// `Bottom` (4), and `Top` (5). The boundary lines are oriented counterclockwise; thus
/// their [Cell::cell_normal] points outwards.
///
/// The three-dimensional meshes have the regions `Solid` (tag 1), `Xmin` (2), `Xmax` (3),
/// `Ymin` (4), `Ymax` (5), `Zmin` (6), and `Zmax` (7). The boundary faces are oriented
/// such that their normal points outwards.
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns a mesh with a single linear triangle
    ///
    /// ```text
    /// 1.0  2
    ///      |`.
    ///      |  `.
    ///      | [0]`.
    ///      |      `.
    /// 0.0  0--------1
    ///     0.0      1.0
    /// ```
    pub fn one_tri3() -> Result<Mesh, StrError> {
        let cells = vec![Cell::new(0, CellType::Triangle, 1, 1)?];
        let xpts = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        Mesh::from_cell_nodes(cells, &[vec![0, 1, 2]], xpts, vec![Region::new("Solid", 2, 1)])
    }

    /// Returns a rectangle `[0,lx]×[0,ly]` discretized with quadrilaterals
    ///
    /// # Input
    ///
    /// * `nx`, `ny` -- number of cells along x and y
    /// * `lx`, `ly` -- dimensions
    /// * `order` -- 1 (4-node quadrilaterals) or 2 (9-node quadrilaterals)
    ///
    /// Nodes are numbered row by row; e.g., for `nx = ny = 1` and `order = 1`:
    ///
    /// ```text
    /// 2-----3
    /// |     |
    /// 0-----1
    /// ```
    pub fn rectangle_quad(nx: usize, ny: usize, lx: f64, ly: f64, order: usize) -> Result<Mesh, StrError> {
        if order != 1 && order != 2 {
            return Err("order must be 1 or 2");
        }
        if nx == 0 || ny == 0 {
            return Err("the number of divisions must be greater than zero");
        }
        let o = order;
        let (npx, npy) = (o * nx + 1, o * ny + 1);
        let n = |i: usize, j: usize| j * npx + i;
        let xpts = grid_xpts(npx, npy, 1, lx, ly, 0.0);

        let mut cells = Vec::new();
        let mut cell_nodes = Vec::new();
        for ey in 0..ny {
            for ex in 0..nx {
                let (i, j) = (o * ex, o * ey);
                let mut nodes = vec![n(i, j), n(i + o, j), n(i + o, j + o), n(i, j + o)];
                if o == 2 {
                    nodes.extend_from_slice(&[n(i + 1, j), n(i + 2, j + 1), n(i + 1, j + 2), n(i, j + 1), n(i + 1, j + 1)]);
                }
                cells.push(Cell::new(cells.len(), CellType::Quadrilateral, o, 1)?);
                cell_nodes.push(nodes);
            }
        }

        // boundary lines (counterclockwise)
        let (last, top) = (npx - 1, npy - 1);
        let mut add_line = |a: usize, b: usize, mid: usize, tag: usize| -> Result<(), StrError> {
            let mut nodes = vec![a, b];
            if o == 2 {
                nodes.push(mid);
            }
            cells.push(Cell::new(cells.len(), CellType::Line, o, tag)?);
            cell_nodes.push(nodes);
            Ok(())
        };
        for ey in (0..ny).rev() {
            let j = o * ey;
            add_line(n(0, j + o), n(0, j), n(0, j + 1), 2)?;
        }
        for ey in 0..ny {
            let j = o * ey;
            add_line(n(last, j), n(last, j + o), n(last, j + 1), 3)?;
        }
        for ex in 0..nx {
            let i = o * ex;
            add_line(n(i, 0), n(i + o, 0), n(i + 1, 0), 4)?;
        }
        for ex in (0..nx).rev() {
            let i = o * ex;
            add_line(n(i + o, top), n(i, top), n(i + 1, top), 5)?;
        }
        Mesh::from_cell_nodes(cells, &cell_nodes, xpts, regions_2d())
    }

    /// Returns a rectangle `[0,lx]×[0,ly]` discretized with linear triangles
    ///
    /// Each grid square is split along the diagonal from its lower-left to its upper-right node.
    pub fn rectangle_tri3(nx: usize, ny: usize, lx: f64, ly: f64) -> Result<Mesh, StrError> {
        if nx == 0 || ny == 0 {
            return Err("the number of divisions must be greater than zero");
        }
        let (npx, npy) = (nx + 1, ny + 1);
        let n = |i: usize, j: usize| j * npx + i;
        let xpts = grid_xpts(npx, npy, 1, lx, ly, 0.0);
        let mut cells = Vec::new();
        let mut cell_nodes = Vec::new();
        for j in 0..ny {
            for i in 0..nx {
                cells.push(Cell::new(cells.len(), CellType::Triangle, 1, 1)?);
                cell_nodes.push(vec![n(i, j), n(i + 1, j), n(i + 1, j + 1)]);
                cells.push(Cell::new(cells.len(), CellType::Triangle, 1, 1)?);
                cell_nodes.push(vec![n(i, j), n(i + 1, j + 1), n(i, j + 1)]);
            }
        }
        let mut lines = Vec::new();
        for j in 0..ny {
            lines.push((n(0, j + 1), n(0, j), 2));
            lines.push((n(nx, j), n(nx, j + 1), 3));
        }
        for i in 0..nx {
            lines.push((n(i, 0), n(i + 1, 0), 4));
            lines.push((n(i + 1, ny), n(i, ny), 5));
        }
        lines.sort_by_key(|l| l.2);
        for (a, b, tag) in lines {
            cells.push(Cell::new(cells.len(), CellType::Line, 1, tag)?);
            cell_nodes.push(vec![a, b]);
        }
        Mesh::from_cell_nodes(cells, &cell_nodes, xpts, regions_2d())
    }

    /// Returns a box `[0,lx]×[0,ly]×[0,lz]` discretized with 8-node hexahedra
    pub fn block_hex8(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> Result<Mesh, StrError> {
        let (xpts, hexes) = block_grid(nx, ny, nz, lx, ly, lz)?;
        let mut cells = Vec::new();
        let mut cell_nodes = Vec::new();
        for nodes in hexes {
            cells.push(Cell::new(cells.len(), CellType::Hexahedron, 1, 1)?);
            cell_nodes.push(nodes);
        }
        add_boundary_faces(CellType::Hexahedron, CellType::Quadrilateral, &mut cells, &mut cell_nodes, &xpts, [lx, ly, lz])?;
        Mesh::from_cell_nodes(cells, &cell_nodes, xpts, regions_3d())
    }

    /// Returns a box `[0,lx]×[0,ly]×[0,lz]` discretized with linear tetrahedra
    ///
    /// Each grid cube is split into six tetrahedra sharing the diagonal from its
    /// minimum corner to its maximum corner.
    pub fn block_tet4(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> Result<Mesh, StrError> {
        let (xpts, hexes) = block_grid(nx, ny, nz, lx, ly, lz)?;
        // local hexahedron node for the corner with bits (x, y, z)
        let corner = |bx: usize, by: usize, bz: usize| -> usize {
            match (bx, by) {
                (0, 0) => 4 * bz,
                (1, 0) => 1 + 4 * bz,
                (1, 1) => 2 + 4 * bz,
                _ => 3 + 4 * bz,
            }
        };
        let permutations = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        let mut cells = Vec::new();
        let mut cell_nodes = Vec::new();
        for hex in hexes {
            for perm in &permutations {
                let mut bits = [0, 0, 0];
                let mut tet = vec![hex[corner(0, 0, 0)]];
                for &axis in perm {
                    bits[axis] = 1;
                    tet.push(hex[corner(bits[0], bits[1], bits[2])]);
                }
                if signed_volume(&xpts, &tet) < 0.0 {
                    tet.swap(1, 2);
                }
                cells.push(Cell::new(cells.len(), CellType::Tetrahedron, 1, 1)?);
                cell_nodes.push(tet);
            }
        }
        add_boundary_faces(CellType::Tetrahedron, CellType::Triangle, &mut cells, &mut cell_nodes, &xpts, [lx, ly, lz])?;
        Mesh::from_cell_nodes(cells, &cell_nodes, xpts, regions_3d())
    }
}

fn regions_2d() -> Vec<Region> {
    vec![
        Region::new("Solid", 2, 1),
        Region::new("Left", 1, 2),
        Region::new("Right", 1, 3),
        Region::new("Bottom", 1, 4),
        Region::new("Top", 1, 5),
    ]
}

fn regions_3d() -> Vec<Region> {
    vec![
        Region::new("Solid", 3, 1),
        Region::new("Xmin", 2, 2),
        Region::new("Xmax", 2, 3),
        Region::new("Ymin", 2, 4),
        Region::new("Ymax", 2, 5),
        Region::new("Zmin", 2, 6),
        Region::new("Zmax", 2, 7),
    ]
}

/// Returns the coordinates of a structured grid of points (x runs fastest)
fn grid_xpts(npx: usize, npy: usize, npz: usize, lx: f64, ly: f64, lz: f64) -> Vec<f64> {
    let step = |l: f64, np: usize| if np > 1 { l / ((np - 1) as f64) } else { 0.0 };
    let (dx, dy, dz) = (step(lx, npx), step(ly, npy), step(lz, npz));
    let mut xpts = Vec::with_capacity(3 * npx * npy * npz);
    for k in 0..npz {
        for j in 0..npy {
            for i in 0..npx {
                xpts.extend_from_slice(&[i as f64 * dx, j as f64 * dy, k as f64 * dz]);
            }
        }
    }
    xpts
}

/// Returns the grid coordinates and the nodes of each hexahedron
fn block_grid(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> Result<(Vec<f64>, Vec<Vec<usize>>), StrError> {
    if nx == 0 || ny == 0 || nz == 0 {
        return Err("the number of divisions must be greater than zero");
    }
    let (npx, npy) = (nx + 1, ny + 1);
    let n = |i: usize, j: usize, k: usize| k * npx * npy + j * npx + i;
    let xpts = grid_xpts(npx, npy, nz + 1, lx, ly, lz);
    let mut hexes = Vec::with_capacity(nx * ny * nz);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                hexes.push(vec![
                    n(i, j, k),
                    n(i + 1, j, k),
                    n(i + 1, j + 1, k),
                    n(i, j + 1, k),
                    n(i, j, k + 1),
                    n(i + 1, j, k + 1),
                    n(i + 1, j + 1, k + 1),
                    n(i, j + 1, k + 1),
                ]);
            }
        }
    }
    Ok((xpts, hexes))
}

/// Returns six times the signed volume of a tetrahedron
fn signed_volume(xpts: &[f64], tet: &[usize]) -> f64 {
    let p = |m: usize, i: usize| xpts[3 * tet[m] + i];
    let a = [p(1, 0) - p(0, 0), p(1, 1) - p(0, 1), p(1, 2) - p(0, 2)];
    let b = [p(2, 0) - p(0, 0), p(2, 1) - p(0, 1), p(2, 2) - p(0, 2)];
    let c = [p(3, 0) - p(0, 0), p(3, 1) - p(0, 1), p(3, 2) - p(0, 2)];
    a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0]) + a[2] * (b[0] * c[1] - b[1] * c[0])
}

/// Appends the faces of solid cells lying on the box boundary as new cells
///
/// The faces keep the (outward) orientation of the solid cells.
fn add_boundary_faces(
    solid: CellType,
    face: CellType,
    cells: &mut Vec<Cell>,
    cell_nodes: &mut Vec<Vec<usize>>,
    xpts: &[f64],
    lengths: [f64; 3],
) -> Result<(), StrError> {
    let n_solid = cells.len();
    let mut faces: Vec<(usize, Vec<usize>)> = Vec::new();
    for c in 0..n_solid {
        for f in 0..solid.n_faces() {
            let nodes: Vec<usize> = solid.face_nodes(f)?.iter().map(|&m| cell_nodes[c][m]).collect();
            for dim in 0..3 {
                for (side, value) in [0.0, lengths[dim]].iter().enumerate() {
                    let on_plane = nodes.iter().all(|&n| f64::abs(xpts[3 * n + dim] - value) < 1e-12);
                    if on_plane {
                        faces.push((2 + 2 * dim + side, nodes.clone()));
                    }
                }
            }
        }
    }
    faces.sort_by_key(|f| f.0);
    for (tag, nodes) in faces {
        cells.push(Cell::new(cells.len(), face, 1, tag)?);
        cell_nodes.push(nodes);
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
