/// Holds the points and weights of a quadrature rule in reference coordinates
///
/// Points always have 3 components; unused components are zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Quadrature {
    /// Quadrature points
    pub points: Vec<[f64; 3]>,

    /// Quadrature weights
    pub weights: Vec<f64>,
}

impl Quadrature {
    /// Returns the number of points
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns whether the rule has no points
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the one-point rule of a point (vertex) cell
    pub fn point() -> Self {
        Quadrature {
            points: vec![[0.0; 3]],
            weights: vec![1.0],
        }
    }

    /// Returns the Gauss-Legendre rule on [-1,1] with n = 1, 2, 3, or 4 points
    ///
    /// Any other n falls back to 4 points.
    pub fn line(n: usize) -> Self {
        let (x, w) = gauss_legendre(n);
        Quadrature {
            points: x.iter().map(|&xi| [xi, 0.0, 0.0]).collect(),
            weights: w,
        }
    }

    /// Returns the tensor-product Gauss rule on [-1,1]² with n×n points
    pub fn quadrilateral(n: usize) -> Self {
        let (x, w) = gauss_legendre(n);
        let mut points = Vec::with_capacity(x.len() * x.len());
        let mut weights = Vec::with_capacity(x.len() * x.len());
        for j in 0..x.len() {
            for i in 0..x.len() {
                points.push([x[i], x[j], 0.0]);
                weights.push(w[i] * w[j]);
            }
        }
        Quadrature { points, weights }
    }

    /// Returns the tensor-product Gauss rule on [-1,1]³ with n×n×n points
    pub fn hexahedron(n: usize) -> Self {
        let (x, w) = gauss_legendre(n);
        let mut points = Vec::with_capacity(x.len() * x.len() * x.len());
        let mut weights = Vec::with_capacity(x.len() * x.len() * x.len());
        for k in 0..x.len() {
            for j in 0..x.len() {
                for i in 0..x.len() {
                    points.push([x[i], x[j], x[k]]);
                    weights.push(w[i] * w[j] * w[k]);
                }
            }
        }
        Quadrature { points, weights }
    }

    /// Returns the 3-point rule on the reference triangle (exact for degree 2)
    pub fn triangle_3() -> Self {
        let (a, b) = (1.0 / 6.0, 2.0 / 3.0);
        Quadrature {
            points: vec![[a, a, 0.0], [b, a, 0.0], [a, b, 0.0]],
            weights: vec![1.0 / 6.0; 3],
        }
    }

    /// Returns the 6-point Strang-Fix rule on the reference triangle (exact for degree 4)
    pub fn triangle_6() -> Self {
        let a = 0.445948490915965;
        let b = 0.091576213509771;
        let wa = 0.223381589678011 / 2.0;
        let wb = 0.109951743655322 / 2.0;
        Quadrature {
            points: vec![
                [a, a, 0.0],
                [1.0 - 2.0 * a, a, 0.0],
                [a, 1.0 - 2.0 * a, 0.0],
                [b, b, 0.0],
                [1.0 - 2.0 * b, b, 0.0],
                [b, 1.0 - 2.0 * b, 0.0],
            ],
            weights: vec![wa, wa, wa, wb, wb, wb],
        }
    }

    /// Returns the 4-point rule on the reference tetrahedron (exact for degree 2)
    pub fn tetrahedron_4() -> Self {
        let a = 0.5854101966249685;
        let b = 0.1381966011250105;
        Quadrature {
            points: vec![[b, b, b], [a, b, b], [b, a, b], [b, b, a]],
            weights: vec![1.0 / 24.0; 4],
        }
    }

    /// Returns the collapsed (Duffy) n×n×n Gauss rule on the reference tetrahedron
    ///
    /// The unit cube `(u,v,w)` is mapped by `x = u`, `y = v(1-u)`, `z = w(1-u)(1-v)`,
    /// whose Jacobian is `(1-u)²(1-v)`.
    pub fn tetrahedron_collapsed(n: usize) -> Self {
        let (g, gw) = gauss_legendre(n);
        let x: Vec<f64> = g.iter().map(|&s| 0.5 * (1.0 + s)).collect();
        let w: Vec<f64> = gw.iter().map(|&s| 0.5 * s).collect();
        let mut points = Vec::with_capacity(x.len() * x.len() * x.len());
        let mut weights = Vec::with_capacity(x.len() * x.len() * x.len());
        for i in 0..x.len() {
            for j in 0..x.len() {
                for k in 0..x.len() {
                    let (u, v, s) = (x[i], x[j], x[k]);
                    points.push([u, v * (1.0 - u), s * (1.0 - u) * (1.0 - v)]);
                    weights.push(w[i] * w[j] * w[k] * (1.0 - u) * (1.0 - u) * (1.0 - v));
                }
            }
        }
        Quadrature { points, weights }
    }
}

/// Returns the Gauss-Legendre points and weights on [-1,1]
fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    match n {
        1 => (vec![0.0], vec![2.0]),
        2 => {
            let a = 1.0 / f64::sqrt(3.0);
            (vec![-a, a], vec![1.0, 1.0])
        }
        3 => {
            let a = f64::sqrt(3.0 / 5.0);
            (vec![-a, 0.0, a], vec![5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0])
        }
        _ => {
            let (a, b) = (0.3399810435848563, 0.8611363115940526);
            let (wa, wb) = (0.6521451548625461, 0.3478548451374538);
            (vec![-b, -a, a, b], vec![wb, wa, wa, wb])
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
