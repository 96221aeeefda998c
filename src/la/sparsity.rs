use crate::mesh::Mesh;
use crate::StrError;
use nalgebra_sparse::pattern::SparsityPattern;

/// Computes the CSR sparsity pattern of a system with `n_vars` variables per node
///
/// Two DOFs are coupled if their nodes share at least one cell (node-to-node
/// connectivity). The column indices of each row are sorted and the diagonal is always
/// included (even for nodes not attached to any cell).
pub fn compute_sparsity(mesh: &Mesh, n_vars: usize) -> Result<SparsityPattern, StrError> {
    if n_vars == 0 {
        return Err("the number of variables must be greater than zero");
    }
    let conn = mesh.node_node_conn();
    let n_nodes = mesh.n_nodes();
    let n_dof = n_nodes * n_vars;
    let mut offsets = Vec::with_capacity(n_dof + 1);
    let mut indices = Vec::with_capacity(conn.indices.len() * n_vars * n_vars + n_dof);
    offsets.push(0);
    let mut neighbors = Vec::new();
    for node in 0..n_nodes {
        neighbors.clear();
        neighbors.extend_from_slice(conn.row(node));
        if !neighbors.contains(&node) {
            neighbors.push(node);
        }
        neighbors.sort_unstable();
        for _ in 0..n_vars {
            for &other in &neighbors {
                for j in 0..n_vars {
                    indices.push(other * n_vars + j);
                }
            }
            offsets.push(indices.len());
        }
    }
    SparsityPattern::try_from_offsets_and_indices(n_dof, n_dof, offsets, indices)
        .map_err(|_| "cannot create sparsity pattern")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::compute_sparsity;
    use crate::base::SampleMeshes;
    use crate::mesh::{Cell, CellType, Mesh, Region};

    #[test]
    fn compute_sparsity_works() {
        // 2-----3
        // |     |
        // 0-----1
        let mesh = SampleMeshes::rectangle_quad(1, 1, 1.0, 1.0, 1).unwrap();
        let pattern = compute_sparsity(&mesh, 1).unwrap();
        assert_eq!(pattern.major_dim(), 4);
        assert_eq!(pattern.nnz(), 16);
        let pattern = compute_sparsity(&mesh, 2).unwrap();
        assert_eq!(pattern.major_dim(), 8);
        assert_eq!(pattern.nnz(), 64);
        assert_eq!(pattern.lane(3), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            compute_sparsity(&mesh, 0).err(),
            Some("the number of variables must be greater than zero")
        );
    }

    #[test]
    fn compute_sparsity_includes_isolated_nodes() {
        // 0-----1     2
        let cells = vec![Cell::new(0, CellType::Line, 1, 1).unwrap()];
        let xpts = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let mesh = Mesh::from_cell_nodes(cells, &[vec![0, 1]], xpts, vec![Region::new("Bar", 1, 1)]).unwrap();
        let pattern = compute_sparsity(&mesh, 1).unwrap();
        assert_eq!(pattern.lane(0), &[0, 1]);
        assert_eq!(pattern.lane(1), &[0, 1]);
        assert_eq!(pattern.lane(2), &[2]);
    }
}
