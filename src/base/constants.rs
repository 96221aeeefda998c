/// Defines the directory where the simulation result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/sfem/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/sfem/test";

/// Defines the default filter directive used when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "sfem=info";

/// Defines the filter directive used in verbose mode when RUST_LOG is not set
pub const VERBOSE_LOG_FILTER: &str = "sfem=debug,info";
