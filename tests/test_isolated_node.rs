use approx::assert_relative_eq;
use sfem::prelude::*;
use sfem::StrError;

// Returns a rectangle with an extra node at (5,5,0) that belongs to no cell
fn rectangle_with_isolated_node(lx: f64) -> Result<Mesh, StrError> {
    let mesh = SampleMeshes::rectangle_quad(2, 2, lx, 1.0, 1)?;
    let conn = mesh.cell_node_conn();
    let cell_nodes: Vec<Vec<usize>> = (0..conn.n1).map(|i| conn.row(i).to_vec()).collect();
    let mut xpts = mesh.xpts().to_vec();
    xpts.extend_from_slice(&[5.0, 5.0, 0.0]);
    Mesh::from_cell_nodes(mesh.cells().to_vec(), &cell_nodes, xpts, mesh.regions().to_vec())
}

#[test]
fn test_isolated_node_laplace() -> Result<(), StrError> {
    let mesh_dir = "/tmp/sfem/test_isolated_node_laplace/mesh";
    let out_dir = "/tmp/sfem/test_isolated_node_laplace/results";
    let lx = 1.0;
    let mesh = rectangle_with_isolated_node(lx)?;
    let isolated = mesh.n_nodes() - 1;
    write_mesh(mesh_dir, &mesh)?;

    let params = LaplaceParams {
        fluid_region: "Solid".to_string(),
        ..Default::default()
    };
    laplace(mesh_dir, out_dir, &params)?;

    let mesh = read_mesh(mesh_dir)?;
    let mut phi = Field::new("Potential", 1, &mesh, &[])?;
    read_field_values(&format!("{}/fields/phi_0", out_dir), &mut phi)?;
    for node in 0..isolated {
        let x = mesh.xpts()[3 * node];
        assert_relative_eq!(phi.values()[node], x - lx, epsilon = 1e-12);
    }
    assert_eq!(phi.values()[isolated], 0.0);
    Ok(())
}

#[test]
fn test_isolated_node_elasticity_and_transient() -> Result<(), StrError> {
    let mesh_dir = "/tmp/sfem/test_isolated_node_others/mesh";
    let mesh = rectangle_with_isolated_node(2.0)?;
    let isolated = mesh.n_nodes() - 1;
    write_mesh(mesh_dir, &mesh)?;

    let params = Elasticity2DParams {
        fixed_region: "Right".to_string(),
        ..Default::default()
    };
    let out_dir = "/tmp/sfem/test_isolated_node_others/elasticity";
    let summary = elasticity_2d(mesh_dir, out_dir, &params)?;
    assert!(summary.quantities["max_displacement"] > 0.0);
    let mesh = read_mesh(mesh_dir)?;
    let mut disp = Field::new("U", 2, &mesh, &[])?;
    read_field_values(&format!("{}/fields/U_0", out_dir), &mut disp)?;
    assert_eq!(&disp.values()[2 * isolated..], &[0.0, 0.0]);

    let params = TransientParams {
        fixed: vec![RegionValue {
            region: "Right".to_string(),
            value: 100.0,
        }],
        n_steps: 2,
        ..Default::default()
    };
    let out_dir = "/tmp/sfem/test_isolated_node_others/transient";
    let summary = transient(mesh_dir, out_dir, &params)?;
    assert_eq!(summary.n_steps, 2);
    let mut temp = Field::new("Temperature", 1, &mesh, &[])?;
    read_field_values(&format!("{}/fields/T_1", out_dir), &mut temp)?;
    assert_eq!(temp.values()[isolated], 0.0);
    assert_eq!(temp.values()[2], 100.0);
    Ok(())
}
