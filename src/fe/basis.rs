use super::Quadrature;
use crate::mesh::{Cell, CellType};
use crate::StrError;

/// Defines the shape functions and quadrature of a reference element
///
/// Shape function gradients are stored node-major with 3 columns:
/// `dn_dxi[k * 3 + j] = dN_k/dξ_j` (unused columns are zero).
pub trait Basis: Send + Sync {
    /// Returns the reference dimension
    fn dim(&self) -> usize;

    /// Returns the number of nodes
    fn n_nodes(&self) -> usize;

    /// Returns the quadrature rule
    fn quadrature(&self) -> &Quadrature;

    /// Evaluates the shape functions at a reference point
    fn eval_shape(&self, xi: &[f64; 3], n: &mut [f64]);

    /// Evaluates the shape function gradients at a reference point
    fn eval_shape_grad(&self, xi: &[f64; 3], dn_dxi: &mut [f64]);

    /// Returns the number of quadrature points
    fn n_qpts(&self) -> usize {
        self.quadrature().len()
    }
}

/// Allocates the basis of a cell
pub fn create_basis(cell: &Cell) -> Result<Box<dyn Basis>, StrError> {
    let basis: Box<dyn Basis> = match (cell.kind, cell.order) {
        (CellType::Point, 1) => Box::new(PointBasis::new()),
        (CellType::Line, 1) => Box::new(TensorBasis::line(&[-1.0, 1.0], 2)),
        (CellType::Line, 2) => Box::new(TensorBasis::line(&[-1.0, 1.0, 0.0], 3)),
        (CellType::Line, 3) => Box::new(TensorBasis::line(&[-1.0, 1.0, -1.0 / 3.0, 1.0 / 3.0], 4)),
        (CellType::Quadrilateral, 1) => Box::new(TensorBasis::quadrilateral(&[-1.0, 1.0], QUAD4, 2)),
        (CellType::Quadrilateral, 2) => Box::new(TensorBasis::quadrilateral(&[-1.0, 1.0, 0.0], QUAD9, 3)),
        (CellType::Hexahedron, 1) => Box::new(TensorBasis::hexahedron(&[-1.0, 1.0], HEX8, 2)),
        (CellType::Triangle, 1) => Box::new(SimplexBasis::new(2, &[], Quadrature::triangle_3())),
        (CellType::Triangle, 2) => Box::new(SimplexBasis::new(2, TRI6_EDGES, Quadrature::triangle_6())),
        (CellType::Tetrahedron, 1) => Box::new(SimplexBasis::new(3, &[], Quadrature::tetrahedron_4())),
        (CellType::Tetrahedron, 2) => Box::new(SimplexBasis::new(
            3,
            TET10_EDGES,
            Quadrature::tetrahedron_collapsed(3),
        )),
        _ => return Err("basis is not available for the cell type and order"),
    };
    Ok(basis)
}

// Positions of the quadrilateral nodes in the 1D node lists (corners, mid-edges, center)
const QUAD4: &[[usize; 3]] = &[[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]];
const QUAD9: &[[usize; 3]] = &[
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [2, 0, 0],
    [1, 2, 0],
    [2, 1, 0],
    [0, 2, 0],
    [2, 2, 0],
];
const HEX8: &[[usize; 3]] = &[
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

// Vertices of the mid-edge nodes (in node order, after the corners)
const TRI6_EDGES: &[[usize; 2]] = &[[0, 1], [1, 2], [2, 0]];
const TET10_EDGES: &[[usize; 2]] = &[[0, 1], [1, 2], [2, 0], [3, 0], [2, 3], [3, 1]];

/// Implements the basis of a point (vertex) cell
struct PointBasis {
    quadrature: Quadrature,
}

impl PointBasis {
    fn new() -> Self {
        PointBasis {
            quadrature: Quadrature::point(),
        }
    }
}

impl Basis for PointBasis {
    fn dim(&self) -> usize {
        0
    }
    fn n_nodes(&self) -> usize {
        1
    }
    fn quadrature(&self) -> &Quadrature {
        &self.quadrature
    }
    fn eval_shape(&self, _xi: &[f64; 3], n: &mut [f64]) {
        n[0] = 1.0;
    }
    fn eval_shape_grad(&self, _xi: &[f64; 3], dn_dxi: &mut [f64]) {
        dn_dxi[..3].fill(0.0);
    }
}

/// Implements tensor-product Lagrange bases on [-1,1]^dim (lines, quadrilaterals, hexahedra)
struct TensorBasis {
    dim: usize,
    nodes_1d: Vec<f64>,
    positions: Vec<[usize; 3]>,
    quadrature: Quadrature,
}

impl TensorBasis {
    fn line(nodes_1d: &[f64], n_gauss: usize) -> Self {
        TensorBasis {
            dim: 1,
            nodes_1d: nodes_1d.to_vec(),
            positions: (0..nodes_1d.len()).map(|i| [i, 0, 0]).collect(),
            quadrature: Quadrature::line(n_gauss),
        }
    }

    fn quadrilateral(nodes_1d: &[f64], positions: &[[usize; 3]], n_gauss: usize) -> Self {
        TensorBasis {
            dim: 2,
            nodes_1d: nodes_1d.to_vec(),
            positions: positions.to_vec(),
            quadrature: Quadrature::quadrilateral(n_gauss),
        }
    }

    fn hexahedron(nodes_1d: &[f64], positions: &[[usize; 3]], n_gauss: usize) -> Self {
        TensorBasis {
            dim: 3,
            nodes_1d: nodes_1d.to_vec(),
            positions: positions.to_vec(),
            quadrature: Quadrature::hexahedron(n_gauss),
        }
    }

    // Returns the 1D values and derivatives along each reference direction
    fn eval_1d(&self, xi: &[f64; 3]) -> [(Vec<f64>, Vec<f64>); 3] {
        let eval = |d: usize| {
            if d < self.dim {
                lagrange_1d(&self.nodes_1d, xi[d])
            } else {
                (vec![1.0; self.nodes_1d.len()], vec![0.0; self.nodes_1d.len()])
            }
        };
        [eval(0), eval(1), eval(2)]
    }
}

impl Basis for TensorBasis {
    fn dim(&self) -> usize {
        self.dim
    }
    fn n_nodes(&self) -> usize {
        self.positions.len()
    }
    fn quadrature(&self) -> &Quadrature {
        &self.quadrature
    }
    fn eval_shape(&self, xi: &[f64; 3], n: &mut [f64]) {
        let [(l0, _), (l1, _), (l2, _)] = self.eval_1d(xi);
        for (k, p) in self.positions.iter().enumerate() {
            n[k] = l0[p[0]] * l1[p[1]] * l2[p[2]];
        }
    }
    fn eval_shape_grad(&self, xi: &[f64; 3], dn_dxi: &mut [f64]) {
        let [(l0, d0), (l1, d1), (l2, d2)] = self.eval_1d(xi);
        for (k, p) in self.positions.iter().enumerate() {
            dn_dxi[k * 3 + 0] = d0[p[0]] * l1[p[1]] * l2[p[2]];
            dn_dxi[k * 3 + 1] = l0[p[0]] * d1[p[1]] * l2[p[2]];
            dn_dxi[k * 3 + 2] = l0[p[0]] * l1[p[1]] * d2[p[2]];
        }
    }
}

/// Implements linear and quadratic Lagrange bases on simplices (triangles, tetrahedra)
///
/// With barycentric coordinates `L_0 = 1 - Σξ` and `L_i = ξ_i`, the linear functions are
/// `N_i = L_i`. The quadratic functions are `N_i = L_i(2L_i - 1)` at the corners and
/// `N = 4 L_a L_b` at the mid-edge nodes.
struct SimplexBasis {
    dim: usize,
    edges: &'static [[usize; 2]],
    quadrature: Quadrature,
}

impl SimplexBasis {
    fn new(dim: usize, edges: &'static [[usize; 2]], quadrature: Quadrature) -> Self {
        SimplexBasis { dim, edges, quadrature }
    }

    fn barycentric(&self, xi: &[f64; 3]) -> Vec<f64> {
        let mut l = Vec::with_capacity(self.dim + 1);
        l.push(1.0 - xi[..self.dim].iter().sum::<f64>());
        l.extend_from_slice(&xi[..self.dim]);
        l
    }

    fn barycentric_grad(&self, i: usize) -> [f64; 3] {
        let mut g = [0.0; 3];
        if i == 0 {
            g[..self.dim].fill(-1.0);
        } else {
            g[i - 1] = 1.0;
        }
        g
    }

    fn quadratic(&self) -> bool {
        !self.edges.is_empty()
    }
}

impl Basis for SimplexBasis {
    fn dim(&self) -> usize {
        self.dim
    }
    fn n_nodes(&self) -> usize {
        self.dim + 1 + self.edges.len()
    }
    fn quadrature(&self) -> &Quadrature {
        &self.quadrature
    }
    fn eval_shape(&self, xi: &[f64; 3], n: &mut [f64]) {
        let l = self.barycentric(xi);
        let nc = self.dim + 1;
        for i in 0..nc {
            n[i] = if self.quadratic() { l[i] * (2.0 * l[i] - 1.0) } else { l[i] };
        }
        for (e, [a, b]) in self.edges.iter().enumerate() {
            n[nc + e] = 4.0 * l[*a] * l[*b];
        }
    }
    fn eval_shape_grad(&self, xi: &[f64; 3], dn_dxi: &mut [f64]) {
        let l = self.barycentric(xi);
        let nc = self.dim + 1;
        for i in 0..nc {
            let g = self.barycentric_grad(i);
            let c = if self.quadratic() { 4.0 * l[i] - 1.0 } else { 1.0 };
            for j in 0..3 {
                dn_dxi[i * 3 + j] = c * g[j];
            }
        }
        for (e, [a, b]) in self.edges.iter().enumerate() {
            let (ga, gb) = (self.barycentric_grad(*a), self.barycentric_grad(*b));
            for j in 0..3 {
                dn_dxi[(nc + e) * 3 + j] = 4.0 * (l[*b] * ga[j] + l[*a] * gb[j]);
            }
        }
    }
}

/// Evaluates the 1D Lagrange polynomials (and derivatives) defined by the given nodes
fn lagrange_1d(nodes: &[f64], x: f64) -> (Vec<f64>, Vec<f64>) {
    let n = nodes.len();
    let mut values = vec![1.0; n];
    let mut derivs = vec![0.0; n];
    for i in 0..n {
        for j in 0..n {
            if j == i {
                continue;
            }
            values[i] *= (x - nodes[j]) / (nodes[i] - nodes[j]);
            let mut term = 1.0 / (nodes[i] - nodes[j]);
            for m in 0..n {
                if m != i && m != j {
                    term *= (x - nodes[m]) / (nodes[i] - nodes[m]);
                }
            }
            derivs[i] += term;
        }
    }
    (values, derivs)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
