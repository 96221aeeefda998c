use approx::assert_relative_eq;
use sfem::prelude::*;
use sfem::StrError;
use std::fs;

#[test]
fn test_run_driver_with_json_parameters() -> Result<(), StrError> {
    let dir = "/tmp/sfem/test_run_driver";
    let mesh_dir = format!("{}/mesh", dir);
    let out_dir = format!("{}/results", dir);
    let mesh = SampleMeshes::rectangle_tri3(4, 2, 2.0, 1.0)?;
    write_mesh(&mesh_dir, &mesh)?;

    // missing keys take their default values; "E" is accepted for Young's modulus
    let params_path = format!("{}/params.json", dir);
    let json = r#"{
        "prop": { "E": 200.0, "nu": 0.0 },
        "thickness": 1.0,
        "pressure": 4.0,
        "fixed_region": "Right"
    }"#;
    fs::write(&params_path, json).map_err(|_| "cannot write file")?;

    let kind: DriverKind = "elasticity2d".parse()?;
    let summary = run_driver(kind, Some(mesh_dir.as_str()), &out_dir, Some(params_path.as_str()))?;
    assert_eq!(summary.driver, "elasticity2d");
    assert_eq!(summary.mesh_dir, mesh_dir);
    assert_relative_eq!(summary.quantities["max_displacement"], 4.0 * 2.0 / 200.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_run_driver_captures_errors() -> Result<(), StrError> {
    let dir = "/tmp/sfem/test_run_driver_errors";
    let mesh_dir = format!("{}/mesh", dir);
    write_mesh(&mesh_dir, &SampleMeshes::rectangle_quad(1, 1, 1.0, 1.0, 1)?)?;

    // the default regions of the 2D elasticity driver are not in the sample mesh
    assert_eq!(
        run_driver(DriverKind::Elasticity2D, Some(mesh_dir.as_str()), dir, None).err(),
        Some("cannot find region with the given name")
    );

    let params_path = format!("{}/bad.json", dir);
    fs::write(&params_path, "{ \"dt\": \"fast\" }").map_err(|_| "cannot write file")?;
    assert_eq!(
        run_driver(DriverKind::Transient, Some(mesh_dir.as_str()), dir, Some(params_path.as_str())).err(),
        Some("cannot parse JSON file")
    );
    assert_eq!("heat".parse::<DriverKind>().err(), Some("driver must be elasticity2d, elasticity3d, laplace, or transient"));
    Ok(())
}
