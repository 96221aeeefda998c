use super::{field_path, max_abs, warn_empty_rows, LaplaceParams, RunSummary};
use crate::fe::{assemble_matrix, assemble_vector, project_function, FEMatrixType, FEVectorType, FiniteElement};
use crate::fe::{FieldGradient, HeatConduction2D, HeatFlux2D, PlaneType, ThermoElasticPlane, ThermoMechanicalProperties};
use crate::io::{read_mesh, write_field_values};
use crate::la::{apply_fixed_dof, create_mat, create_vec, LinearSolver};
use crate::mesh::Field;
use crate::StrError;

/// Solves Laplace's equation for the velocity potential of an ideal flow
///
/// Writes the potential to `fields/phi_0` and the velocity (the projected gradient of
/// the potential) to `fields/U_0`.
pub fn laplace(mesh_dir: &str, out_dir: &str, params: &LaplaceParams) -> Result<RunSummary, StrError> {
    let mesh = read_mesh(mesh_dir)?;
    mesh.info();

    let mut phi = Field::new("Potential", 1, &mesh, &["phi"])?;
    phi.add_fixed_dof(&params.fixed_region, 0, 0.0)?;

    let prop = ThermoMechanicalProperties {
        kappa: params.kappa,
        ..Default::default()
    };
    let model = ThermoElasticPlane::new(prop, params.thickness, PlaneType::PlaneStress);
    let mut fluid_elems: Vec<Box<dyn FiniteElement + '_>> = Vec::new();
    for cell in mesh.get_region_cells(&params.fluid_region)? {
        fluid_elems.push(Box::new(HeatConduction2D::new(cell, &model)?));
    }
    let mut flux_elems: Vec<Box<dyn FiniteElement + '_>> = Vec::new();
    for cell in mesh.get_region_cells(&params.flux_region)? {
        flux_elems.push(Box::new(HeatFlux2D::new(cell, params.flux, params.thickness)?));
    }

    let mut kk = create_mat(&mesh, 1)?;
    let mut ff = create_vec(&mesh, 1);
    let mut uu = create_vec(&mesh, 1);
    assemble_matrix(&fluid_elems, &phi, FEMatrixType::Stiffness, &mut kk, 0.0)?;
    assemble_vector(&fluid_elems, &phi, FEVectorType::Load, &mut ff, 0.0)?;
    assemble_vector(&flux_elems, &phi, FEVectorType::Load, &mut ff, 0.0)?;
    apply_fixed_dof(&phi.get_fixed_dof(), &phi.get_fixed_dof_values(), &mut kk, &mut ff, &mut uu)?;
    warn_empty_rows(kk.fix_empty_rows(&mut ff)?);
    LinearSolver::new(params.solver).solve(&kk, &ff, &mut uu)?;

    phi.set_values(uu.as_slice())?;
    write_field_values(&field_path(out_dir, "phi", 0), &phi)?;
    let velocity = project_function(&fluid_elems, &phi, &FieldGradient::new(1))?;
    write_field_values(&field_path(out_dir, "U", 0), &velocity)?;

    let mut summary = RunSummary::new("laplace", mesh_dir);
    summary.field_names = vec!["phi".to_string(), "U".to_string()];
    summary.quantities.insert("max_phi".to_string(), max_abs(phi.values()));
    summary.quantities.insert("max_velocity".to_string(), max_abs(velocity.values()));
    summary.write(out_dir)?;
    Ok(summary)
}
