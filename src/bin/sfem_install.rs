use sfem::install::{execute, plan, InstallOptions, ShellRunner};
use sfem::StrError;
use structopt::StructOpt;

fn main() -> Result<(), StrError> {
    let options = InstallOptions::from_args();
    sfem::init_logger(options.verbose);

    let steps = plan(&options);
    if options.dry_run {
        for step in &steps {
            println!("{}", step);
        }
        return Ok(());
    }

    let n_failed = execute(&steps, &mut ShellRunner, options.strict)?;
    if n_failed > 0 {
        tracing::warn!("{} of {} steps failed", n_failed, steps.len());
    } else {
        tracing::info!("installation completed");
    }
    Ok(())
}
