use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use std::rc::Rc;

use crate::backend::BackendError;

/// Runs an external program to completion.
pub trait ProcessRunner {
    fn run_tool(&self, program: &str, args: &[String], cwd: &Path) -> Result<()>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for Rc<R> {
    fn run_tool(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        (**self).run_tool(program, args, cwd)
    }
}

/// Spawns the program with inherited stdio and waits for it.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for CommandRunner {
    fn run_tool(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        tracing::info!("Running {} {} in {}", program, args.join(" "), cwd.display());

        let status = match Command::new(program).args(args).current_dir(cwd).status() {
            Ok(status) => status,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BackendError::ToolNotFound(program.to_string()).into());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to spawn '{}'", program));
            }
        };

        if !status.success() {
            return Err(BackendError::ToolFailed {
                program: program.to_string(),
                code: status.code(),
            }
            .into());
        }

        Ok(())
    }
}
