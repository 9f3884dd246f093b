pub mod analyze;
pub mod basics;
pub mod vcs;

use anyhow::Result;
use std::path::PathBuf;

use crate::constants;
use crate::ir::Edam;

pub use analyze::AnalyzeScript;
pub use basics::{BackendError, BackendStage};
pub use vcs::{Plusargs, Vcs};

/// A simulator or synthesis tool driven through configure, build and run.
pub trait Backend {
    fn name(&self) -> &str;

    /// Write the tool's scripts and build files to the work root.
    fn configure(&self) -> Result<()>;

    fn build(&self) -> Result<()>;

    fn run(&self) -> Result<()>;

    /// Override parameter values from `KEY=VALUE` strings before `stage`.
    fn apply_overrides(&mut self, stage: BackendStage, overrides: &[String]) -> Result<()>;

    fn run_stage(&self, stage: BackendStage) -> Result<()> {
        match stage {
            BackendStage::Configure => self.configure(),
            BackendStage::Build => self.build(),
            BackendStage::Run => self.run(),
        }
    }
}

pub fn create_backend(
    tool_name: &str,
    edam: Edam,
    work_root: PathBuf,
) -> Result<Box<dyn Backend>> {
    match tool_name {
        constants::TOOL_VCS => Ok(Box::new(Vcs::new(edam, work_root)?)),
        _ => Err(BackendError::UnsupportedTool(tool_name.to_string()).into()),
    }
}
