use crate::StrError;
use nalgebra::Vector3;
use std::fmt;

/// Defines the geometric kind of a cell
///
/// The numeric code is the one used by the native mesh files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellType {
    Point,
    Line,
    Triangle,
    Quadrilateral,
    Tetrahedron,
    Hexahedron,
    Prism,
}

impl CellType {
    /// Returns the cell type corresponding to a numeric code
    pub fn from_code(code: i64) -> Result<Self, StrError> {
        match code {
            0 => Ok(CellType::Point),
            1 => Ok(CellType::Line),
            2 => Ok(CellType::Triangle),
            3 => Ok(CellType::Quadrilateral),
            4 => Ok(CellType::Tetrahedron),
            5 => Ok(CellType::Hexahedron),
            6 => Ok(CellType::Prism),
            _ => Err("invalid cell type code"),
        }
    }

    /// Returns the numeric code of this cell type
    pub fn code(&self) -> usize {
        match self {
            CellType::Point => 0,
            CellType::Line => 1,
            CellType::Triangle => 2,
            CellType::Quadrilateral => 3,
            CellType::Tetrahedron => 4,
            CellType::Hexahedron => 5,
            CellType::Prism => 6,
        }
    }

    /// Returns the reference (space) dimension
    pub fn dim(&self) -> usize {
        match self {
            CellType::Point => 0,
            CellType::Line => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Prism => 3,
        }
    }

    /// Returns the number of faces (points for lines, edges for surfaces)
    pub fn n_faces(&self) -> usize {
        match self {
            CellType::Point => 1,
            CellType::Line => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral => 4,
            CellType::Tetrahedron => 4,
            CellType::Hexahedron => 6,
            CellType::Prism => 5,
        }
    }

    /// Returns the number of nodes for a given interpolation order
    pub fn n_nodes(&self, order: usize) -> Result<usize, StrError> {
        let n = match (self, order) {
            (CellType::Point, 1) => 1,
            (CellType::Line, 1) => 2,
            (CellType::Line, 2) => 3,
            (CellType::Line, 3) => 4,
            (CellType::Triangle, 1) => 3,
            (CellType::Triangle, 2) => 6,
            (CellType::Triangle, 3) => 10,
            (CellType::Quadrilateral, 1) => 4,
            (CellType::Quadrilateral, 2) => 9,
            (CellType::Quadrilateral, 3) => 16,
            (CellType::Tetrahedron, 1) => 4,
            (CellType::Tetrahedron, 2) => 10,
            (CellType::Tetrahedron, 3) => 20,
            (CellType::Hexahedron, 1) => 8,
            (CellType::Hexahedron, 2) => 20,
            (CellType::Prism, 1) => 6,
            _ => return Err("invalid combination of cell type and order"),
        };
        Ok(n)
    }

    /// Returns the local (corner) node indices of a face
    pub fn face_nodes(&self, face: usize) -> Result<&'static [usize], StrError> {
        let nodes: &'static [usize] = match (self, face) {
            (CellType::Point, 0) => &[0],
            (CellType::Line, 0) => &[0],
            (CellType::Line, 1) => &[1],
            (CellType::Triangle, 0) => &[0, 1],
            (CellType::Triangle, 1) => &[1, 2],
            (CellType::Triangle, 2) => &[2, 0],
            (CellType::Quadrilateral, 0) => &[0, 1],
            (CellType::Quadrilateral, 1) => &[1, 2],
            (CellType::Quadrilateral, 2) => &[2, 3],
            (CellType::Quadrilateral, 3) => &[3, 0],
            (CellType::Tetrahedron, 0) => &[0, 2, 1],
            (CellType::Tetrahedron, 1) => &[0, 1, 3],
            (CellType::Tetrahedron, 2) => &[0, 3, 2],
            (CellType::Tetrahedron, 3) => &[1, 2, 3],
            (CellType::Hexahedron, 0) => &[0, 4, 7, 3],
            (CellType::Hexahedron, 1) => &[1, 2, 6, 5],
            (CellType::Hexahedron, 2) => &[0, 1, 5, 4],
            (CellType::Hexahedron, 3) => &[2, 3, 7, 6],
            (CellType::Hexahedron, 4) => &[0, 3, 2, 1],
            (CellType::Hexahedron, 5) => &[4, 5, 6, 7],
            (CellType::Prism, 0) => &[0, 2, 1],
            (CellType::Prism, 1) => &[3, 4, 5],
            (CellType::Prism, 2) => &[0, 1, 4, 3],
            (CellType::Prism, 3) => &[1, 2, 5, 4],
            (CellType::Prism, 4) => &[2, 0, 3, 5],
            _ => return Err("invalid face index"),
        };
        Ok(nodes)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Point => "point",
            CellType::Line => "line",
            CellType::Triangle => "triangle",
            CellType::Quadrilateral => "quadrilateral",
            CellType::Tetrahedron => "tetrahedron",
            CellType::Hexahedron => "hexahedron",
            CellType::Prism => "prism",
        };
        write!(f, "{}", name)
    }
}

/// Holds the attributes of a mesh cell
///
/// The nodes of a cell are stored by the [crate::mesh::Mesh] connectivity; see
/// [crate::mesh::Mesh::get_cell_nodes].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Index of the cell in the mesh
    pub idx: usize,

    /// Geometric kind
    pub kind: CellType,

    /// Interpolation order (1 is linear)
    pub order: usize,

    /// Tag of the region the cell belongs to
    pub region_tag: usize,
}

impl Cell {
    /// Allocates a new instance
    pub fn new(idx: usize, kind: CellType, order: usize, region_tag: usize) -> Result<Self, StrError> {
        kind.n_nodes(order)?;
        Ok(Cell {
            idx,
            kind,
            order,
            region_tag,
        })
    }

    /// Returns the reference dimension
    pub fn dim(&self) -> usize {
        self.kind.dim()
    }

    /// Returns the number of nodes
    pub fn n_nodes(&self) -> usize {
        // (type, order) is validated by the constructor
        self.kind.n_nodes(self.order).unwrap_or(0)
    }

    /// Returns the number of faces
    pub fn n_faces(&self) -> usize {
        self.kind.n_faces()
    }

    /// Returns the unit normal vector of the cell itself (lines and surfaces only)
    ///
    /// # Input
    ///
    /// * `xpts` -- nodal coordinates of the cell, 3 per node
    ///
    /// For a line `0→1` with tangent `t`, the normal is `(t_y, -t_x, t_z)/|t|`; thus, for
    /// boundary edges traversed counterclockwise, the normal points outwards. For a
    /// surface, the normal is `(x1 - x0) × (x2 - x0)` normalized.
    pub fn cell_normal(&self, xpts: &[f64]) -> Result<Vector3<f64>, StrError> {
        check_xpts(self, xpts)?;
        match self.dim() {
            1 => unit_in_plane_normal(point(xpts, 0), point(xpts, 1)),
            2 => unit_cross(point(xpts, 0), point(xpts, 1), point(xpts, 2)),
            _ => Err("cell normal is only available for lines and surfaces"),
        }
    }

    /// Returns the outward unit normal vector of a face
    ///
    /// # Input
    ///
    /// * `face` -- index of the face; see [CellType::face_nodes]
    /// * `xpts` -- nodal coordinates of the cell, 3 per node
    pub fn face_normal(&self, face: usize, xpts: &[f64]) -> Result<Vector3<f64>, StrError> {
        check_xpts(self, xpts)?;
        let nodes = self.kind.face_nodes(face)?;
        match self.dim() {
            1 => {
                let other = if face == 0 { 1 } else { 0 };
                let t = point(xpts, nodes[0]) - point(xpts, other);
                let m = t.norm();
                if m <= 0.0 {
                    return Err("cannot compute the normal of a degenerate face");
                }
                Ok(t / m)
            }
            2 => unit_in_plane_normal(point(xpts, nodes[0]), point(xpts, nodes[1])),
            3 => unit_cross(point(xpts, nodes[0]), point(xpts, nodes[1]), point(xpts, nodes[2])),
            _ => Err("face normal is not available for points"),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell {}: {} (order {}) in region {}",
            self.idx, self.kind, self.order, self.region_tag
        )
    }
}

fn check_xpts(cell: &Cell, xpts: &[f64]) -> Result<(), StrError> {
    if xpts.len() != 3 * cell.n_nodes() {
        return Err("the number of coordinates is incompatible with the cell");
    }
    Ok(())
}

fn point(xpts: &[f64], m: usize) -> Vector3<f64> {
    Vector3::new(xpts[3 * m], xpts[3 * m + 1], xpts[3 * m + 2])
}

fn unit_in_plane_normal(a: Vector3<f64>, b: Vector3<f64>) -> Result<Vector3<f64>, StrError> {
    let t = b - a;
    let m = t.norm();
    if m <= 0.0 {
        return Err("cannot compute the normal of a degenerate face");
    }
    Ok(Vector3::new(t.y / m, -t.x / m, t.z / m))
}

fn unit_cross(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Result<Vector3<f64>, StrError> {
    let n = (b - a).cross(&(c - a));
    let m = n.norm();
    if m <= 0.0 {
        return Err("cannot compute the normal of a degenerate face");
    }
    Ok(n / m)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Cell, CellType};
    use approx::assert_abs_diff_eq;

    #[test]
    fn cell_type_codes_work() {
        for code in 0..7 {
            let kind = CellType::from_code(code).unwrap();
            assert_eq!(kind.code() as i64, code);
        }
        assert_eq!(CellType::from_code(7).err(), Some("invalid cell type code"));
        assert_eq!(CellType::from_code(-1).err(), Some("invalid cell type code"));
        assert_eq!(format!("{}", CellType::Quadrilateral), "quadrilateral");
    }

    #[test]
    fn n_nodes_and_dims_work() {
        assert_eq!(CellType::Point.n_nodes(1), Ok(1));
        assert_eq!(CellType::Line.n_nodes(3), Ok(4));
        assert_eq!(CellType::Triangle.n_nodes(2), Ok(6));
        assert_eq!(CellType::Quadrilateral.n_nodes(3), Ok(16));
        assert_eq!(CellType::Tetrahedron.n_nodes(2), Ok(10));
        assert_eq!(CellType::Hexahedron.n_nodes(2), Ok(20));
        assert_eq!(CellType::Prism.n_nodes(1), Ok(6));
        assert_eq!(
            CellType::Prism.n_nodes(2).err(),
            Some("invalid combination of cell type and order")
        );
        assert_eq!(CellType::Point.dim(), 0);
        assert_eq!(CellType::Line.dim(), 1);
        assert_eq!(CellType::Quadrilateral.dim(), 2);
        assert_eq!(CellType::Prism.dim(), 3);
        assert_eq!(CellType::Hexahedron.n_faces(), 6);
        assert_eq!(CellType::Prism.n_faces(), 5);
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            Cell::new(0, CellType::Hexahedron, 3, 1).err(),
            Some("invalid combination of cell type and order")
        );
        let cell = Cell::new(3, CellType::Triangle, 2, 7).unwrap();
        assert_eq!(cell.n_nodes(), 6);
        assert_eq!(cell.dim(), 2);
        assert_eq!(cell.n_faces(), 3);
        assert_eq!(format!("{}", cell), "cell 3: triangle (order 2) in region 7");
    }

    #[test]
    fn cell_normal_works() {
        //  1
        //  |  the normal of 0→1 points to +x
        //  0
        let line = Cell::new(0, CellType::Line, 1, 1).unwrap();
        let n = line.cell_normal(&[0.0, 0.0, 0.0, 0.0, 2.0, 0.0]).unwrap();
        assert_abs_diff_eq!(n.x, 1.0);
        assert_abs_diff_eq!(n.y, 0.0);

        let tri = Cell::new(0, CellType::Triangle, 1, 1).unwrap();
        let xpts = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let n = tri.cell_normal(&xpts).unwrap();
        assert_abs_diff_eq!(n.z, 1.0);

        let tet = Cell::new(0, CellType::Tetrahedron, 1, 1).unwrap();
        assert_eq!(
            tet.cell_normal(&[0.0; 12]).err(),
            Some("cell normal is only available for lines and surfaces")
        );
        assert_eq!(
            tri.cell_normal(&[0.0; 6]).err(),
            Some("the number of coordinates is incompatible with the cell")
        );
        assert_eq!(
            tri.cell_normal(&[0.0; 9]).err(),
            Some("cannot compute the normal of a degenerate face")
        );
    }

    #[test]
    fn face_normal_works() {
        // 3-------2
        // |       |
        // |       |
        // 0-------1
        let quad = Cell::new(0, CellType::Quadrilateral, 1, 1).unwrap();
        let xpts = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
        let correct = [(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)];
        for face in 0..4 {
            let n = quad.face_normal(face, &xpts).unwrap();
            assert_abs_diff_eq!(n.x, correct[face].0, epsilon = 1e-15);
            assert_abs_diff_eq!(n.y, correct[face].1, epsilon = 1e-15);
        }
        assert_eq!(quad.face_normal(4, &xpts).err(), Some("invalid face index"));

        let line = Cell::new(0, CellType::Line, 1, 1).unwrap();
        let xpts = [1.0, 0.0, 0.0, 3.0, 0.0, 0.0];
        assert_abs_diff_eq!(line.face_normal(0, &xpts).unwrap().x, -1.0);
        assert_abs_diff_eq!(line.face_normal(1, &xpts).unwrap().x, 1.0);

        let hex = Cell::new(0, CellType::Hexahedron, 1, 1).unwrap();
        #[rustfmt::skip]
        let xpts = [
            0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  1.0, 1.0, 0.0,  0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,  1.0, 0.0, 1.0,  1.0, 1.0, 1.0,  0.0, 1.0, 1.0,
        ];
        let correct = [
            [-1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -1.0],
            [0.0, 0.0, 1.0],
        ];
        for face in 0..6 {
            let n = hex.face_normal(face, &xpts).unwrap();
            for i in 0..3 {
                assert_abs_diff_eq!(n[i], correct[face][i], epsilon = 1e-15);
            }
        }

        let tet = Cell::new(0, CellType::Tetrahedron, 1, 1).unwrap();
        let xpts = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let n = tet.face_normal(3, &xpts).unwrap();
        let c = 1.0 / f64::sqrt(3.0);
        assert_abs_diff_eq!(n.x, c, epsilon = 1e-15);
        assert_abs_diff_eq!(n.y, c, epsilon = 1e-15);
        assert_abs_diff_eq!(n.z, c, epsilon = 1e-15);
    }
}
