use sfem::base::DEFAULT_OUT_DIR;
use sfem::drivers::{run_driver, DriverKind};
use sfem::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(name = "sfem_run", about = "Runs a simulation driver")]
struct Options {
    /// Driver: elasticity2d, elasticity3d, laplace, or transient
    driver: DriverKind,

    /// Mesh directory (defaults to the driver's conventional location)
    #[structopt(long)]
    mesh_dir: Option<String>,

    /// Output directory
    #[structopt(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: String,

    /// JSON file with parameters overriding the defaults
    #[structopt(long)]
    params: Option<String>,

    /// Show debug messages
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    let options = Options::from_args();
    sfem::init_logger(options.verbose);

    let summary = run_driver(
        options.driver,
        options.mesh_dir.as_deref(),
        &options.out_dir,
        options.params.as_deref(),
    )?;

    let thin_line = format!("{:─^1$}", "", 60);
    println!("\n{}", thin_line);
    println!("{} finished; fields written to {}/fields", summary.driver, options.out_dir);
    for (key, value) in &summary.quantities {
        println!("{} = {:?}", key, value);
    }
    println!("{}\n", thin_line);
    Ok(())
}
