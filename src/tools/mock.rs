// Recording runner for tests and dry runs
use anyhow::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::tools::ProcessRunner;

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push_str(&format!("\"{}\"", arg));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Records every invocation instead of spawning a process.
#[derive(Debug, Default)]
pub struct MockRunner {
    invocations: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

impl ProcessRunner for MockRunner {
    fn run_tool(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });
        Ok(())
    }
}
