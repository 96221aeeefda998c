use crate::base::write_json;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Holds the outcome of a driver run
///
/// It is written to `summary.json` in the output directory.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RunSummary {
    /// Name of the driver
    pub driver: String,

    /// Mesh directory
    pub mesh_dir: String,

    /// Stems of the written field files (e.g., "U" for `fields/U_0`)
    pub field_names: Vec<String>,

    /// Number of time steps (1 for static analyses)
    pub n_steps: usize,

    /// Scalar results such as the structural mass or the maximum displacement
    pub quantities: BTreeMap<String, f64>,
}

impl RunSummary {
    /// Allocates a new instance
    pub fn new(driver: &str, mesh_dir: &str) -> Self {
        RunSummary {
            driver: driver.to_string(),
            mesh_dir: mesh_dir.to_string(),
            n_steps: 1,
            ..Default::default()
        }
    }

    /// Writes the summary to `{out_dir}/summary.json`
    pub fn write(&self, out_dir: &str) -> Result<(), StrError> {
        let path = Path::new(out_dir).join("summary.json");
        write_json(self, &path)
    }
}

/// Returns the path of the field file `{out_dir}/fields/{stem}_{index}`
pub fn field_path(out_dir: &str, stem: &str, index: usize) -> String {
    format!("{}/fields/{}_{}", out_dir, stem, index)
}

// Reports the rows given a unit diagonal because their nodes are not attached to any cell
pub(crate) fn warn_empty_rows(n_empty: usize) {
    if n_empty > 0 {
        tracing::warn!("{} equations have no contributions; their values are set to zero", n_empty);
    }
}

/// Returns the maximum absolute value
pub(crate) fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
