use sfem::io::{read_field_n_vars, read_field_values, read_mesh, write_vtk};
use sfem::mesh::Field;
use sfem::StrError;
use std::path::Path;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(name = "sfem_to_vtk", about = "Writes legacy VTK files from a native mesh and field files")]
struct Options {
    /// Mesh directory
    mesh_dir: String,

    /// Number of time steps; the files `{name}_{t}` with t in 0..n_steps are read
    n_steps: usize,

    /// Field names (stems of the field files)
    field_names: Vec<String>,

    /// Directory with the field files
    #[structopt(long, default_value = ".")]
    fields_dir: String,

    /// Directory of the VTK files
    #[structopt(long, default_value = ".")]
    out_dir: String,

    /// Show debug messages
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    let options = Options::from_args();
    sfem::init_logger(options.verbose);

    let mesh = read_mesh(&options.mesh_dir)?;
    mesh.info();
    let fields_dir = Path::new(&options.fields_dir);
    for t in 0..options.n_steps {
        let mut fields = Vec::with_capacity(options.field_names.len());
        for name in &options.field_names {
            let path = fields_dir.join(format!("{}_{}", name, t));
            let n_vars = read_field_n_vars(&path)?;
            let comp_names: Vec<String> = (0..n_vars).map(|i| format!("{}_{}", name, i)).collect();
            let comp_refs: Vec<&str> = comp_names.iter().map(|s| s.as_str()).collect();
            let mut field = Field::new(name, n_vars, &mesh, &comp_refs)?;
            read_field_values(&path, &mut field)?;
            fields.push(field);
        }
        let refs: Vec<&Field> = fields.iter().collect();
        let vtk_path = Path::new(&options.out_dir).join(format!("sfem_{}.vtk", t));
        write_vtk(&vtk_path, &mesh, &refs)?;
        tracing::info!("written {}", vtk_path.display());
    }
    Ok(())
}
