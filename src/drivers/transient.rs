use super::{field_path, max_abs, warn_empty_rows, RunSummary, TransientParams};
use crate::fe::{assemble_matrix, assemble_vector, FEMatrixType, FEVectorType, FiniteElement, HeatConduction2D};
use crate::fe::{PlaneType, ThermoElasticPlane};
use crate::io::{read_mesh, write_field_values};
use crate::la::{apply_fixed_dof, create_mat, create_vec, LinearSolver};
use crate::mesh::Field;
use crate::StrError;
use nalgebra::DVector;

/// Solves a transient heat conduction problem with the implicit Euler method
///
/// Each step solves `(M/Δt + K) T = (M/Δt) T_old + F` with the prescribed temperatures
/// and writes `fields/T_{i}`.
pub fn transient(mesh_dir: &str, out_dir: &str, params: &TransientParams) -> Result<RunSummary, StrError> {
    if params.dt <= 0.0 {
        return Err("the time step must be positive");
    }
    let mesh = read_mesh(mesh_dir)?;
    mesh.info();

    let mut temp = Field::new("Temperature", 1, &mesh, &["T"])?;
    temp.set_all(&[params.initial_temperature])?;
    for fixed in &params.fixed {
        temp.add_fixed_dof(&fixed.region, 0, fixed.value)?;
    }

    let model = ThermoElasticPlane::new(params.prop, params.thickness, PlaneType::PlaneStress);
    let mut elems: Vec<Box<dyn FiniteElement + '_>> = Vec::new();
    for cell in mesh.get_region_cells(&params.solid_region)? {
        elems.push(Box::new(HeatConduction2D::new(cell, &model)?));
    }

    // the operators do not change in time
    let mut mm = create_mat(&mesh, 1)?;
    let mut kk = create_mat(&mesh, 1)?;
    let mut ff = create_vec(&mesh, 1);
    assemble_matrix(&elems, &temp, FEMatrixType::Mass, &mut mm, 0.0)?;
    assemble_matrix(&elems, &temp, FEMatrixType::Stiffness, &mut kk, 0.0)?;
    assemble_vector(&elems, &temp, FEVectorType::Load, &mut ff, 0.0)?;
    mm.scale(1.0 / params.dt);
    kk.axpy(1.0, &mm)?;

    let solver = LinearSolver::new(params.solver);
    let fixed_dof = temp.get_fixed_dof();
    let fixed_values = temp.get_fixed_dof_values();
    for i in 0..params.n_steps {
        tracing::info!("time: {} [s]", i as f64 * params.dt);
        let mut aa = kk.clone();
        let mut uu = DVector::from_column_slice(temp.values());
        let mut bb = ff.clone();
        mm.mult_add(&uu, &mut bb)?;
        apply_fixed_dof(&fixed_dof, &fixed_values, &mut aa, &mut bb, &mut uu)?;
        let n_empty = aa.fix_empty_rows(&mut bb)?;
        if i == 0 {
            warn_empty_rows(n_empty);
        }
        solver.solve(&aa, &bb, &mut uu)?;
        temp.set_values(uu.as_slice())?;
        write_field_values(&field_path(out_dir, "T", i), &temp)?;
    }

    let mut summary = RunSummary::new("transient", mesh_dir);
    summary.field_names = vec!["T".to_string()];
    summary.n_steps = params.n_steps;
    summary.quantities.insert("final_time".to_string(), params.n_steps as f64 * params.dt);
    summary.quantities.insert("max_temperature".to_string(), max_abs(temp.values()));
    summary.write(out_dir)?;
    Ok(summary)
}
