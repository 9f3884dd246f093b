//! VCS backend command-line front end
//!
//! Reads an EDAM project description and drives the Synopsys VCS flow:
//! `configure` writes the analysis script, parameter file and Makefile into
//! the work root, `build` and `run` invoke `make` there.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::rc::Rc;

use vcs_backend::tools::MockRunner;
use vcs_backend::{Backend, BackendStage, EdamParser, Vcs};

#[derive(Parser)]
#[command(name = "vcs-backend")]
#[command(about = "Generate and run Synopsys VCS simulation flows from EDAM project descriptions")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct Project {
    /// EDAM project description (JSON)
    #[arg(long)]
    edam: PathBuf,

    /// Directory for generated files
    #[arg(long, default_value = "build")]
    work_root: PathBuf,

    /// Print the make invocation instead of running it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write analyze.bash, parameters.snps and the Makefile, optionally
    /// overriding parameters (KEY=VALUE)
    Configure {
        #[command(flatten)]
        project: Project,

        overrides: Vec<String>,
    },
    /// Compile the simulation executable with make
    Build {
        #[command(flatten)]
        project: Project,
    },
    /// Run the simulation, optionally overriding plusargs (KEY=VALUE)
    Run {
        #[command(flatten)]
        project: Project,

        overrides: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let (stage, project, overrides) = match args.command {
        Command::Configure { project, overrides } => {
            (BackendStage::Configure, project, overrides)
        }
        Command::Build { project } => (BackendStage::Build, project, Vec::new()),
        Command::Run { project, overrides } => (BackendStage::Run, project, overrides),
    };

    let edam = EdamParser::from_file(&project.edam)?.parse()?;
    let recorder = Rc::new(MockRunner::new());
    let mut backend = Vcs::new(edam, project.work_root)?;
    if project.dry_run {
        backend = backend.with_runner(recorder.clone());
    }

    backend.apply_overrides(stage, &overrides)?;
    backend.run_stage(stage)?;

    for invocation in recorder.invocations() {
        println!("{}", invocation.command_line());
    }

    Ok(())
}
