use crate::StrError;

/// Holds a compressed adjacency list between two sets of entities
///
/// Row `i` (an entity of the first set, e.g., a cell) lists the entities of the
/// second set (e.g., nodes) connected to it:
///
/// ```text
/// indices[offsets[i]..offsets[i+1]]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Connectivity {
    /// Number of entities in the first set (rows)
    pub n1: usize,

    /// Number of entities in the second set
    pub n2: usize,

    /// Row offsets (len = n1 + 1)
    pub offsets: Vec<usize>,

    /// Flattened row entries
    pub indices: Vec<usize>,
}

impl Connectivity {
    /// Allocates a new instance from nested rows
    ///
    /// Returns an error if any entry is out of range `0..n2`.
    pub fn from_rows(n2: usize, rows: &[Vec<usize>]) -> Result<Self, StrError> {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::with_capacity(rows.iter().map(|r| r.len()).sum());
        offsets.push(0);
        for row in rows {
            for &j in row {
                if j >= n2 {
                    return Err("connectivity entry is out of range");
                }
                indices.push(j);
            }
            offsets.push(indices.len());
        }
        Ok(Connectivity {
            n1: rows.len(),
            n2,
            offsets,
            indices,
        })
    }

    /// Returns the number of entries in row i
    #[inline]
    pub fn count(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    /// Returns the entries of row i
    #[inline]
    pub fn row(&self, i: usize) -> &[usize] {
        &self.indices[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Computes the inverse (transposed) connectivity
    ///
    /// For instance, given the cell-to-node connectivity, returns the node-to-cell
    /// connectivity. The entries of each inverted row are in ascending order.
    pub fn invert(&self) -> Connectivity {
        let mut counts = vec![0; self.n2];
        for &j in &self.indices {
            counts[j] += 1;
        }
        let mut offsets = vec![0; self.n2 + 1];
        for j in 0..self.n2 {
            offsets[j + 1] = offsets[j] + counts[j];
        }
        let mut fill = offsets.clone();
        let mut indices = vec![0; self.indices.len()];
        for i in 0..self.n1 {
            for &j in self.row(i) {
                indices[fill[j]] = i;
                fill[j] += 1;
            }
        }
        Connectivity {
            n1: self.n2,
            n2: self.n1,
            offsets,
            indices,
        }
    }

    /// Computes the node-to-node connectivity from this cell-to-node connectivity
    ///
    /// Each node lists the unique nodes sharing at least one cell with it, including
    /// itself, in the order they are first visited (cells around the node, then nodes
    /// of each cell).
    pub fn node_to_node(&self) -> Connectivity {
        let node_cell = self.invert();
        let n_nodes = node_cell.n1;
        let mut offsets = Vec::with_capacity(n_nodes + 1);
        let mut indices = Vec::new();
        let mut included = vec![usize::MAX; n_nodes];
        offsets.push(0);
        for i in 0..n_nodes {
            for &c in node_cell.row(i) {
                for &node in self.row(c) {
                    if included[node] != i {
                        included[node] = i;
                        indices.push(node);
                    }
                }
            }
            offsets.push(indices.len());
        }
        Connectivity {
            n1: n_nodes,
            n2: n_nodes,
            offsets,
            indices,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Connectivity;

    #[test]
    fn from_rows_works() {
        let conn = Connectivity::from_rows(4, &[vec![0, 1, 3], vec![2, 3, 1]]).unwrap();
        assert_eq!(conn.n1, 2);
        assert_eq!(conn.n2, 4);
        assert_eq!(conn.offsets, &[0, 3, 6]);
        assert_eq!(conn.count(1), 3);
        assert_eq!(conn.row(1), &[2, 3, 1]);
        assert_eq!(
            Connectivity::from_rows(2, &[vec![0, 2]]).err(),
            Some("connectivity entry is out of range")
        );
    }

    #[test]
    fn invert_works() {
        // 3------2
        // |`.  1 |
        // |  `.  |
        // | 0  `.|
        // 0------1
        let cell_node = Connectivity::from_rows(4, &[vec![0, 1, 3], vec![2, 3, 1]]).unwrap();
        let node_cell = cell_node.invert();
        assert_eq!(node_cell.n1, 4);
        assert_eq!(node_cell.n2, 2);
        assert_eq!(node_cell.row(0), &[0]);
        assert_eq!(node_cell.row(1), &[0, 1]);
        assert_eq!(node_cell.row(2), &[1]);
        assert_eq!(node_cell.row(3), &[0, 1]);
        assert_eq!(node_cell.invert(), cell_node);
    }

    #[test]
    fn node_to_node_works() {
        let cell_node = Connectivity::from_rows(4, &[vec![0, 1, 3], vec![2, 3, 1]]).unwrap();
        let node_node = cell_node.node_to_node();
        assert_eq!(node_node.n1, 4);
        assert_eq!(node_node.row(0), &[0, 1, 3]);
        assert_eq!(node_node.row(1), &[0, 1, 3, 2]);
        assert_eq!(node_node.row(2), &[2, 3, 1]);
        assert_eq!(node_node.row(3), &[0, 1, 3, 2]);
    }

    #[test]
    fn node_to_node_handles_isolated_nodes() {
        let cell_node = Connectivity::from_rows(3, &[vec![0, 1]]).unwrap();
        let node_node = cell_node.node_to_node();
        assert_eq!(node_node.row(2), &[] as &[usize]);
        assert_eq!(node_node.count(2), 0);
    }
}
