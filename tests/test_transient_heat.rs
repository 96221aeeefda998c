use approx::assert_relative_eq;
use sfem::prelude::*;
use sfem::StrError;

fn params(dt: f64, n_steps: usize) -> TransientParams {
    TransientParams {
        prop: ThermoMechanicalProperties::default(),
        initial_temperature: 0.0,
        fixed: vec![
            RegionValue {
                region: "Left".to_string(),
                value: 0.0,
            },
            RegionValue {
                region: "Right".to_string(),
                value: 100.0,
            },
        ],
        dt,
        n_steps,
        ..Default::default()
    }
}

#[test]
fn test_transient_heat_reaches_steady_state() -> Result<(), StrError> {
    let mesh_dir = "/tmp/sfem/test_transient_heat/mesh";
    let out_dir = "/tmp/sfem/test_transient_heat/results";
    let lx = 2.0;
    let mesh = SampleMeshes::rectangle_quad(4, 1, lx, 1.0, 1)?;
    write_mesh(mesh_dir, &mesh)?;

    // with a very large time step, implicit Euler jumps to the steady state
    let summary = transient(mesh_dir, out_dir, &params(1e10, 3))?;
    assert_eq!(summary.n_steps, 3);
    assert_eq!(summary.field_names, &["T"]);
    assert_relative_eq!(summary.quantities["final_time"], 3e10);
    assert_relative_eq!(summary.quantities["max_temperature"], 100.0, epsilon = 1e-8);

    let mesh = read_mesh(mesh_dir)?;
    let mut temp = Field::new("Temperature", 1, &mesh, &[])?;
    for i in 0..3 {
        read_field_values(&format!("{}/fields/T_{}", out_dir, i), &mut temp)?;
        for node in 0..mesh.n_nodes() {
            let x = mesh.xpts()[3 * node];
            assert_relative_eq!(temp.values()[node], 100.0 * x / lx, epsilon = 1e-6);
        }
    }
    Ok(())
}

#[test]
fn test_transient_heat_evolves_monotonically() -> Result<(), StrError> {
    let mesh_dir = "/tmp/sfem/test_transient_heat_monotonic/mesh";
    let out_dir = "/tmp/sfem/test_transient_heat_monotonic/results";
    let mesh = SampleMeshes::rectangle_quad(4, 1, 1.0, 0.25, 1)?;
    write_mesh(mesh_dir, &mesh)?;

    let n_steps = 5;
    transient(mesh_dir, out_dir, &params(0.05, n_steps))?;

    // the node next to the hot boundary heats up step by step
    let mesh = read_mesh(mesh_dir)?;
    let node = 3; // x = 0.75 on the bottom row
    let mut temp = Field::new("Temperature", 1, &mesh, &[])?;
    let mut previous = 0.0;
    for i in 0..n_steps {
        read_field_values(&format!("{}/fields/T_{}", out_dir, i), &mut temp)?;
        assert!(temp.values()[node] > previous);
        assert!(temp.values()[node] < 100.0);
        assert_eq!(temp.values()[4], 100.0);
        previous = temp.values()[node];
    }
    Ok(())
}

#[test]
fn test_transient_heat_captures_errors() {
    assert_eq!(
        transient("/tmp/sfem/none", "/tmp/sfem/none", &params(0.0, 1)).err(),
        Some("the time step must be positive")
    );
}
