use super::Step;
use crate::StrError;
use std::fs;
use std::process::Command;

/// Performs the side effects of installation steps
///
/// The installer only talks to the system through this trait; thus, the sequence of
/// steps can be recorded in tests.
pub trait CommandRunner {
    /// Performs one step
    fn perform(&mut self, step: &Step) -> Result<(), StrError>;
}

/// Performs the steps with the file system and child processes
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn perform(&mut self, step: &Step) -> Result<(), StrError> {
        match step {
            Step::RemoveDir(path) => {
                if path.exists() {
                    fs::remove_dir_all(path).map_err(|_| "cannot remove directory")?;
                }
                Ok(())
            }
            Step::WriteFile { path, contents } => {
                if let Some(p) = path.parent() {
                    fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
                }
                fs::write(path, contents).map_err(|_| "cannot write file")
            }
            Step::Run { program, args, cwd } => {
                let mut command = Command::new(program);
                command.args(args);
                if let Some(dir) = cwd {
                    command.current_dir(dir);
                }
                let status = command.status().map_err(|_| "cannot start command")?;
                if status.success() {
                    Ok(())
                } else {
                    Err("command returned a non-zero exit status")
                }
            }
            Step::Rename { from, to } => fs::rename(from, to).map_err(|_| "cannot rename file"),
        }
    }
}

/// Executes the steps in order and returns the number of failed steps
///
/// A failed step is logged as a warning and the execution continues, unless `strict`
/// is true; in that case, the error of the first failed step is returned.
pub fn execute(steps: &[Step], runner: &mut dyn CommandRunner, strict: bool) -> Result<usize, StrError> {
    let mut n_failed = 0;
    for (i, step) in steps.iter().enumerate() {
        tracing::info!("[{}/{}] {}", i + 1, steps.len(), step);
        if let Err(e) = runner.perform(step) {
            if strict {
                tracing::error!("step failed: {}", e);
                return Err(e);
            }
            tracing::warn!("step failed: {}", e);
            n_failed += 1;
        }
    }
    Ok(n_failed)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
