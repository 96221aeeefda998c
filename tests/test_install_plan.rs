use sfem::install::{execute, plan, CommandRunner, InstallOptions, Step};
use sfem::StrError;
use structopt::StructOpt;

// Records the steps and fails every `make` command
struct FailingMake {
    performed: Vec<String>,
}

impl CommandRunner for FailingMake {
    fn perform(&mut self, step: &Step) -> Result<(), StrError> {
        self.performed.push(step.to_string());
        match step {
            Step::Run { program, .. } if program == "make" => Err("command returned a non-zero exit status"),
            _ => Ok(()),
        }
    }
}

fn options(extra: &[&str]) -> Result<InstallOptions, StrError> {
    let mut args = vec!["sfem_install", "--mpi-dir", "/usr/lib/mpi", "--mpi-cxx-compiler", "mpicxx"];
    args.extend_from_slice(extra);
    InstallOptions::from_iter_safe(args).map_err(|_| "cannot parse the command line")
}

#[test]
fn test_install_plan_continues_after_failures() -> Result<(), StrError> {
    let options = options(&["--build-type", "DEBUG", "--petsc-dir", "/opt/petsc", "--jobs", "3"])?;
    let steps = plan(&options);
    let mut runner = FailingMake { performed: Vec::new() };
    let n_failed = execute(&steps, &mut runner, options.strict)?;
    assert_eq!(n_failed, 2);
    assert_eq!(runner.performed.len(), steps.len());
    assert!(runner.performed[2].contains("-DCMAKE_BUILD_TYPE=DEBUG"));
    assert!(runner.performed[2].contains("-DPETSC_DIR=/opt/petsc"));
    assert_eq!(runner.performed[3], "cd build; make -j 3");
    Ok(())
}

#[test]
fn test_install_plan_strict_stops_at_first_failure() -> Result<(), StrError> {
    let options = options(&["--strict", "--remove-previous-build", "--jobs", "1"])?;
    let steps = plan(&options);
    let mut runner = FailingMake { performed: Vec::new() };
    assert_eq!(
        execute(&steps, &mut runner, options.strict).err(),
        Some("command returned a non-zero exit status")
    );
    assert_eq!(runner.performed.last().map(|s| s.as_str()), Some("cd build; make -j 1"));
    assert_eq!(runner.performed.len(), 6);
    Ok(())
}

#[test]
fn test_install_options_require_mpi() {
    assert!(InstallOptions::from_iter_safe(&["sfem_install"]).is_err());
    assert!(InstallOptions::from_iter_safe(&["sfem_install", "--mpi-dir", "/mpi"]).is_err());
}
