use sfem::io::{read_gmsh, write_mesh};
use sfem::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(name = "gmsh_to_sfem", about = "Converts a Gmsh (ASCII 2.2) mesh to the native mesh directory format")]
struct Options {
    /// Path of the Gmsh file
    gmsh_path: String,

    /// Output mesh directory
    mesh_dir: String,

    /// Show debug messages
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    let options = Options::from_args();
    sfem::init_logger(options.verbose);

    let mesh = read_gmsh(&options.gmsh_path)?;
    mesh.info();
    write_mesh(&options.mesh_dir, &mesh)?;
    tracing::info!("mesh written to {}", options.mesh_dir);
    Ok(())
}
