use crate::StrError;
use std::fmt;
use std::str::FromStr;
use structopt::StructOpt;

/// Defines the CMake build type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildType {
    Release,
    Debug,
}

impl FromStr for BuildType {
    type Err = StrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RELEASE" => Ok(BuildType::Release),
            "DEBUG" => Ok(BuildType::Debug),
            _ => Err("build type must be RELEASE or DEBUG"),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Release => write!(f, "RELEASE"),
            BuildType::Debug => write!(f, "DEBUG"),
        }
    }
}

/// Command line options of the installer
#[derive(StructOpt, Clone, Debug)]
#[structopt(name = "sfem_install", about = "Builds and installs the SFEM native library with CMake")]
pub struct InstallOptions {
    /// Installation directory
    #[structopt(long, alias = "install_dir", default_value = "install")]
    pub install_dir: String,

    /// Build directory
    #[structopt(long, alias = "build_dir", default_value = "build")]
    pub build_dir: String,

    /// Root directory of MPI
    #[structopt(long, alias = "mpi_dir")]
    pub mpi_dir: String,

    /// MPI C++ compiler
    #[structopt(long, alias = "mpi_cxx_compiler")]
    pub mpi_cxx_compiler: String,

    /// Root directory of PETSc
    #[structopt(long, alias = "petsc_dir")]
    pub petsc_dir: Option<String>,

    /// PETSc architecture directory
    #[structopt(long, alias = "petsc_arch")]
    pub petsc_arch: Option<String>,

    /// Root directory of SLEPc
    #[structopt(long, alias = "slepc_dir")]
    pub slepc_dir: Option<String>,

    /// Root directory of METIS
    #[structopt(long, alias = "metis_dir")]
    pub metis_dir: Option<String>,

    /// Build type: RELEASE or DEBUG
    #[structopt(long, alias = "build_type", default_value = "RELEASE")]
    pub build_type: BuildType,

    /// Build the applications
    #[structopt(long, alias = "with_apps")]
    pub with_apps: bool,

    /// Build the Python bindings
    #[structopt(long, alias = "with_pysfem")]
    pub with_pysfem: bool,

    /// Generate stubs (.pyi) for the Python bindings
    #[structopt(long, alias = "with_stubs")]
    pub with_stubs: bool,

    /// Remove the previous build and configuration directories
    #[structopt(long, alias = "remove_previous_build")]
    pub remove_previous_build: bool,

    /// Number of parallel make jobs (defaults to the number of CPUs)
    #[structopt(long)]
    pub jobs: Option<usize>,

    /// Print the steps without executing them
    #[structopt(long, alias = "dry_run")]
    pub dry_run: bool,

    /// Stop at the first failed step
    #[structopt(long)]
    pub strict: bool,

    /// Show debug messages
    #[structopt(short, long)]
    pub verbose: bool,
}

impl InstallOptions {
    /// Returns the options with the required values and defaults for everything else
    pub fn new(mpi_dir: &str, mpi_cxx_compiler: &str) -> Self {
        InstallOptions {
            install_dir: "install".to_string(),
            build_dir: "build".to_string(),
            mpi_dir: mpi_dir.to_string(),
            mpi_cxx_compiler: mpi_cxx_compiler.to_string(),
            petsc_dir: None,
            petsc_arch: None,
            slepc_dir: None,
            metis_dir: None,
            build_type: BuildType::Release,
            with_apps: false,
            with_pysfem: false,
            with_stubs: false,
            remove_previous_build: false,
            jobs: None,
            dry_run: false,
            strict: false,
            verbose: false,
        }
    }
}

/// Returns the CMake definitions (key, value) in the order they are passed to CMake
///
/// Options that are not given are skipped; switches map to `On` or `Off`.
pub fn cmake_definitions(options: &InstallOptions) -> Vec<(String, String)> {
    let on_off = |flag: bool| String::from(if flag { "On" } else { "Off" });
    let all = [
        ("CMAKE_INSTALL_PREFIX", Some(options.install_dir.clone())),
        ("CMAKE_BUILD_TYPE", Some(options.build_type.to_string())),
        ("CMAKE_CXX_COMPILER", Some(options.mpi_cxx_compiler.clone())),
        ("MPI_DIR", Some(options.mpi_dir.clone())),
        ("PETSC_DIR", options.petsc_dir.clone()),
        ("PETSC_ARCH", options.petsc_arch.clone()),
        ("SLEPC_DIR", options.slepc_dir.clone()),
        ("METIS_DIR", options.metis_dir.clone()),
        ("WITH_APPS", Some(on_off(options.with_apps))),
        ("WITH_PYSFEM", Some(on_off(options.with_pysfem))),
    ];
    all.into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
