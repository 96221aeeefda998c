use super::{elasticity_2d, elasticity_3d, laplace, transient, DriverKind, RunSummary};
use crate::base::read_json;
use crate::StrError;
use serde::de::DeserializeOwned;

// Reads the parameters from a JSON file or returns the defaults
fn load_params<T>(params_file: Option<&str>) -> Result<T, StrError>
where
    T: DeserializeOwned + Default,
{
    match params_file {
        Some(path) => read_json(path),
        None => Ok(T::default()),
    }
}

/// Runs a driver
///
/// # Input
///
/// * `kind` -- which driver to run
/// * `mesh_dir` -- the mesh directory; if None, [DriverKind::default_mesh_dir] is used
/// * `out_dir` -- the output directory (field files and `summary.json`)
/// * `params_file` -- a JSON file with parameters; missing keys take their default values
pub fn run_driver(
    kind: DriverKind,
    mesh_dir: Option<&str>,
    out_dir: &str,
    params_file: Option<&str>,
) -> Result<RunSummary, StrError> {
    let mesh_dir = mesh_dir.unwrap_or_else(|| kind.default_mesh_dir());
    tracing::info!(driver = %kind, mesh_dir, out_dir, "running driver");
    match kind {
        DriverKind::Elasticity2D => elasticity_2d(mesh_dir, out_dir, &load_params(params_file)?),
        DriverKind::Elasticity3D => elasticity_3d(mesh_dir, out_dir, &load_params(params_file)?),
        DriverKind::Laplace => laplace(mesh_dir, out_dir, &load_params(params_file)?),
        DriverKind::Transient => transient(mesh_dir, out_dir, &load_params(params_file)?),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
