use super::{field_path, max_abs, warn_empty_rows, Elasticity2DParams, Elasticity3DParams, RunSummary};
use crate::fe::{assemble_function, assemble_matrix, assemble_vector, project_function};
use crate::fe::{FEMatrixType, FEVectorType, FiniteElement, Stress2D, StructuralMass2D, StructuralMass3D, VonMises3D};
use crate::fe::{LinearElasticity2D, LinearElasticity3D, PressureLoad2D, ThermoElasticPlane, ThermoElasticSolid};
use crate::io::{read_mesh, write_field_values};
use crate::la::{apply_fixed_dof, create_mat, create_vec, LinearSolver};
use crate::mesh::Field;
use crate::StrError;

/// Solves a plane linear elasticity problem with a pressure load
///
/// Writes the displacements to `fields/U_0` and the projected stresses (xx, yy, xy) to
/// `fields/stress_0`.
pub fn elasticity_2d(mesh_dir: &str, out_dir: &str, params: &Elasticity2DParams) -> Result<RunSummary, StrError> {
    let mesh = read_mesh(mesh_dir)?;
    mesh.info();

    // fields
    let mut disp = Field::new("U", 2, &mesh, &["u", "v"])?;
    disp.add_fixed_dof(&params.fixed_region, 0, 0.0)?;
    disp.add_fixed_dof(&params.fixed_region, 1, 0.0)?;
    let mut pressure = Field::new("P", 1, &mesh, &[])?;
    pressure.set_all(&[params.pressure])?;

    // elements
    let model = ThermoElasticPlane::new(params.prop, params.thickness, params.plane_type);
    let mut solid_elems: Vec<Box<dyn FiniteElement + '_>> = Vec::new();
    for cell in mesh.get_region_cells(&params.solid_region)? {
        solid_elems.push(Box::new(LinearElasticity2D::new(cell, &model)?));
    }
    let mut boundary_elems: Vec<Box<dyn FiniteElement + '_>> = Vec::new();
    for cell in mesh.get_region_cells(&params.pressure_region)? {
        boundary_elems.push(Box::new(PressureLoad2D::new(cell, &pressure, params.thickness)?));
    }

    let mut summary = RunSummary::new("elasticity2d", mesh_dir);
    let mass = assemble_function(&solid_elems, &disp, &StructuralMass2D, 0.0)?;
    tracing::info!("structural mass: {}", mass[0]);
    summary.quantities.insert("structural_mass".to_string(), mass[0]);

    // linear system
    let mut kk = create_mat(&mesh, 2)?;
    let mut ff = create_vec(&mesh, 2);
    let mut uu = create_vec(&mesh, 2);
    assemble_matrix(&solid_elems, &disp, FEMatrixType::Stiffness, &mut kk, 0.0)?;
    assemble_vector(&solid_elems, &disp, FEVectorType::Load, &mut ff, 0.0)?;
    assemble_vector(&boundary_elems, &disp, FEVectorType::Load, &mut ff, 0.0)?;
    apply_fixed_dof(&disp.get_fixed_dof(), &disp.get_fixed_dof_values(), &mut kk, &mut ff, &mut uu)?;
    warn_empty_rows(kk.fix_empty_rows(&mut ff)?);
    LinearSolver::new(params.solver).solve(&kk, &ff, &mut uu)?;

    // results
    disp.set_values(uu.as_slice())?;
    write_field_values(&field_path(out_dir, "U", 0), &disp)?;
    let stress = project_function(&solid_elems, &disp, &Stress2D)?;
    write_field_values(&field_path(out_dir, "stress", 0), &stress)?;

    summary.field_names = vec!["U".to_string(), "stress".to_string()];
    summary.quantities.insert("max_displacement".to_string(), max_abs(disp.values()));
    summary.write(out_dir)?;
    Ok(summary)
}

/// Solves a 3D linear elasticity problem under self-weight
///
/// Writes the displacements to `fields/U_0` and the projected von Mises stress to
/// `fields/stress_0`.
pub fn elasticity_3d(mesh_dir: &str, out_dir: &str, params: &Elasticity3DParams) -> Result<RunSummary, StrError> {
    let mesh = read_mesh(mesh_dir)?;
    mesh.info();

    let mut disp = Field::new("U", 3, &mesh, &["u", "v", "w"])?;
    for var in 0..3 {
        disp.add_fixed_dof(&params.fixed_region, var, 0.0)?;
    }

    let model = ThermoElasticSolid::new(params.prop);
    let mut elems: Vec<Box<dyn FiniteElement + '_>> = Vec::new();
    for cell in mesh.get_region_cells(&params.solid_region)? {
        let mut elem = LinearElasticity3D::new(cell, &model)?;
        elem.add_inertial_load(params.gravity)?;
        elems.push(Box::new(elem));
    }

    let mut summary = RunSummary::new("elasticity3d", mesh_dir);
    let mass = assemble_function(&elems, &disp, &StructuralMass3D, 0.0)?;
    tracing::info!("structural mass: {}", mass[0]);
    summary.quantities.insert("structural_mass".to_string(), mass[0]);

    let mut kk = create_mat(&mesh, 3)?;
    let mut ff = create_vec(&mesh, 3);
    let mut uu = create_vec(&mesh, 3);
    assemble_matrix(&elems, &disp, FEMatrixType::Stiffness, &mut kk, 0.0)?;
    assemble_vector(&elems, &disp, FEVectorType::Load, &mut ff, 0.0)?;
    apply_fixed_dof(&disp.get_fixed_dof(), &disp.get_fixed_dof_values(), &mut kk, &mut ff, &mut uu)?;
    warn_empty_rows(kk.fix_empty_rows(&mut ff)?);
    LinearSolver::new(params.solver).solve(&kk, &ff, &mut uu)?;

    disp.set_values(uu.as_slice())?;
    write_field_values(&field_path(out_dir, "U", 0), &disp)?;
    let von_mises = project_function(&elems, &disp, &VonMises3D)?;
    write_field_values(&field_path(out_dir, "stress", 0), &von_mises)?;

    summary.field_names = vec!["U".to_string(), "stress".to_string()];
    summary.quantities.insert("max_displacement".to_string(), max_abs(disp.values()));
    summary.write(out_dir)?;
    Ok(summary)
}
