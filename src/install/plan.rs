use super::{cmake_definitions, InstallOptions};
use std::fmt;
use std::path::{Path, PathBuf};

/// Holds the contents of the CMake package configuration template
pub const CMAKE_CONFIG_TEMPLATE: &str = "@PACKAGE_INIT@\n\
                                         include(${CMAKE_CURRENT_LIST_DIR}/sfemTargets.cmake)\n\
                                         check_required_components(sfem)";

/// Defines one side effect of the installation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Removes a directory recursively (a missing directory is not an error)
    RemoveDir(PathBuf),

    /// Writes a file, creating the parent directories if needed
    WriteFile { path: PathBuf, contents: String },

    /// Runs a program, optionally in another working directory
    Run {
        program: String,
        args: Vec<String>,
        cwd: Option<PathBuf>,
    },

    /// Renames a file
    Rename { from: PathBuf, to: PathBuf },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::RemoveDir(path) => write!(f, "rm -rf {}", path.display()),
            Step::WriteFile { path, .. } => write!(f, "write {}", path.display()),
            Step::Run { program, args, cwd } => {
                if let Some(dir) = cwd {
                    write!(f, "cd {}; ", dir.display())?;
                }
                write!(f, "{}", program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
            Step::Rename { from, to } => write!(f, "mv {} {}", from.display(), to.display()),
        }
    }
}

/// Returns the number of parallel jobs given to make
fn n_jobs(options: &InstallOptions) -> usize {
    options
        .jobs
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
}

fn run(program: &str, args: &[&str], cwd: Option<&Path>) -> Step {
    Step::Run {
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        cwd: cwd.map(Path::to_path_buf),
    }
}

/// Returns the ordered list of installation steps
pub fn plan(options: &InstallOptions) -> Vec<Step> {
    let build_dir = PathBuf::from(&options.build_dir);
    let install_dir = PathBuf::from(&options.install_dir);
    let mut steps = Vec::new();

    // clean up
    if options.remove_previous_build {
        steps.push(Step::RemoveDir(build_dir.clone()));
        steps.push(Step::RemoveDir(PathBuf::from("cmake")));
    }
    steps.push(Step::RemoveDir(install_dir.clone()));

    // configure
    steps.push(Step::WriteFile {
        path: Path::new("cmake").join("Config.cmake.in"),
        contents: CMAKE_CONFIG_TEMPLATE.to_string(),
    });
    let mut args = vec!["-S".to_string(), ".".to_string(), "-B".to_string(), options.build_dir.clone()];
    for (key, value) in cmake_definitions(options) {
        args.push(format!("-D{}={}", key, value));
    }
    steps.push(Step::Run {
        program: "cmake".to_string(),
        args,
        cwd: None,
    });

    // build and install
    let jobs = n_jobs(options).to_string();
    steps.push(run("make", &["-j", &jobs], Some(&build_dir)));
    steps.push(run("make", &["install"], Some(&build_dir)));

    // python package
    if options.with_pysfem {
        let pysfem_dir = install_dir.join("lib").join("pysfem");
        steps.push(Step::WriteFile {
            path: pysfem_dir.join("__init__.py"),
            contents: "from .pysfem import *".to_string(),
        });
        if options.with_stubs {
            steps.push(run(
                "python3",
                &["-m", "nanobind.stubgen", "-m", "pysfem", "--recursive"],
                Some(&pysfem_dir),
            ));
            steps.push(Step::Rename {
                from: pysfem_dir.join("pysfem.pyi"),
                to: pysfem_dir.join("__init__.pyi"),
            });
        }
    }
    steps
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
