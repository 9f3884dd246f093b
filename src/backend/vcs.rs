use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::Span;

use crate::backend::{AnalyzeScript, Backend, BackendError, BackendStage};
use crate::config::{VcsOptions, VCS_ARGTYPES, VCS_RUN_ARGTYPES};
use crate::constants::{
    ANALYZE_SCRIPT, BEFORE_PLUSARG, EXTRA_OPTIONS_VAR, MAKEFILE, MAKEFILE_TEMPLATE, PARAMETER_FILE,
    TCL_SCRIPT, TOOL_MAKE, TOOL_VCS,
};
use crate::ir::{DataType, Edam, FileType, Fileset, ParamMaps, ParamType, ParamValue};
use crate::tools::{CommandRunner, ProcessRunner, TemplateEngine, TemplateRenderer, TemplateVars};

/// Plusargs as handed to the Makefile: the `before` entry is split off as a
/// command preamble.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plusargs {
    pub args: Vec<String>,
    pub beforearg: String,
}

impl Plusargs {
    pub fn from_map(plusarg: &IndexMap<String, ParamValue>) -> Self {
        let mut plusargs = Plusargs::default();
        for (key, value) in plusarg {
            if key == BEFORE_PLUSARG {
                plusargs.beforearg = value.param_str();
                continue;
            }
            if value.is_true() {
                plusargs.args.push(format!("+{}", key));
            } else {
                plusargs.args.push(format!("+{}={}", key, value.param_str()));
            }
        }
        plusargs
    }
}

/// Synopsys VCS backend.
pub struct Vcs {
    edam: Edam,
    toplevel: String,
    work_root: PathBuf,
    options: VcsOptions,
    params: ParamMaps,
    renderer: Box<dyn TemplateRenderer>,
    runner: Box<dyn ProcessRunner>,
    span: Span,
}

impl Vcs {
    pub fn new(edam: Edam, work_root: impl Into<PathBuf>) -> Result<Self> {
        let toplevel = match edam.toplevel.as_deref() {
            Some(top) if !top.is_empty() => top.to_string(),
            _ => {
                return Err(BackendError::InvalidEdam(format!(
                    "'{}' has no toplevel, which {} requires",
                    edam.name, TOOL_VCS
                ))
                .into())
            }
        };
        let options: VcsOptions = edam.tool_options_for(TOOL_VCS)?;
        let params = ParamMaps::from_edam(&edam);
        let span = tracing::info_span!("vcs", project = %edam.name);

        Ok(Self {
            edam,
            toplevel,
            work_root: work_root.into(),
            options,
            params,
            renderer: Box::new(TemplateEngine::new()),
            runner: Box::new(CommandRunner::new()),
            span,
        })
    }

    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Log under `span` instead of the default per-project span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    pub fn options(&self) -> &VcsOptions {
        &self.options
    }

    pub fn params(&self) -> &ParamMaps {
        &self.params
    }

    pub fn fileset(&self) -> Fileset {
        Fileset::resolve(&self.edam.files, true)
    }

    pub fn analyze_script(&self) -> AnalyzeScript {
        let _guard = self.span.enter();
        AnalyzeScript::build(&self.fileset(), &self.options, &self.params.vlogdefine)
    }

    /// `assign VALUE TOP/KEY` lines for `parameters.snps`.
    pub fn parameter_lines(&self) -> Vec<String> {
        self.params
            .vlogparam
            .iter()
            .map(|(key, value)| {
                format!(
                    "assign {} {}/{}",
                    value.param_str().replace('"', ""),
                    self.toplevel,
                    key
                )
            })
            .collect()
    }

    pub fn generic_assignments(&self) -> Vec<String> {
        self.params
            .generic
            .iter()
            .map(|(key, value)| {
                format!("{}.{}={}", self.toplevel, key, value.to_param_str("", true))
            })
            .collect()
    }

    pub fn plusargs(&self) -> Plusargs {
        Plusargs::from_map(&self.params.plusarg)
    }

    /// `vcs_options` plus the language flags the fileset calls for.
    pub fn compile_options(&self, fileset: &Fileset) -> Vec<String> {
        let mut options = self.options.vcs_options.clone();
        if fileset.has_file_type(FileType::is_system_verilog) {
            options.push("-sverilog".to_string());
        }
        if fileset.has_tag("verilog2001") {
            options.push("+v2k".to_string());
        }
        options
    }

    pub fn template_vars(&self, fileset: &Fileset, has_tcl: bool) -> TemplateVars {
        let plusargs = self.plusargs();
        let tcl_options = if has_tcl {
            vec!["-ucli".to_string(), "-do".to_string(), TCL_SCRIPT.to_string()]
        } else {
            Vec::new()
        };

        let mut vars = TemplateVars::new();
        vars.insert("name".to_string(), self.edam.name.as_str().into());
        vars.insert("vcs_options".to_string(), self.compile_options(fileset).into());
        vars.insert("run_options".to_string(), self.options.run_options.clone().into());
        vars.insert("toplevel".to_string(), self.toplevel.as_str().into());
        vars.insert("plusargs".to_string(), plusargs.args.into());
        vars.insert("beforearg".to_string(), plusargs.beforearg.into());
        vars.insert("tcl_options".to_string(), tcl_options.into());
        vars
    }

    /// Arguments for `make run`, with plusargs folded into `EXTRA_OPTIONS`.
    pub fn run_args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string()];

        let plusargs: Vec<String> = self
            .params
            .plusarg
            .iter()
            .map(|(key, value)| format!("+{}={}", key, value.param_str()))
            .collect();

        if !plusargs.is_empty() {
            args.push(format!("{}={}", EXTRA_OPTIONS_VAR, plusargs.join(" ")));
        }

        args
    }

    fn write_lines(
        &self,
        file_name: &str,
        write: impl FnOnce(&mut BufWriter<File>) -> Result<()>,
    ) -> Result<()> {
        let path = self.work_root.join(file_name);
        let file = File::create(&path).context(format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer).context(format!("Failed to write {}", path.display()))?;
        writer.flush().context(format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

impl Backend for Vcs {
    fn name(&self) -> &str {
        TOOL_VCS
    }

    fn configure(&self) -> Result<()> {
        let _guard = self.span.enter();
        tracing::info!("Configuring {} in {}", self.edam.name, self.work_root.display());

        fs::create_dir_all(&self.work_root)
            .context(format!("Failed to create work root: {}", self.work_root.display()))?;

        let fileset = self.fileset();
        let script = AnalyzeScript::build(&fileset, &self.options, &self.params.vlogdefine);
        self.write_lines(ANALYZE_SCRIPT, |w| script.write_to(w))?;

        let has_tcl = !script.tcl_commands.is_empty();
        if has_tcl {
            self.write_lines(TCL_SCRIPT, |w| script.write_tcl_to(w))?;
        }

        let parameter_lines = self.parameter_lines();
        self.write_lines(PARAMETER_FILE, |w| {
            for line in &parameter_lines {
                writeln!(w, "{}", line)?;
            }
            Ok(())
        })?;

        for assignment in self.generic_assignments() {
            tracing::debug!("Generic {} is not passed to {}", assignment, TOOL_VCS);
        }

        let vars = self.template_vars(&fileset, has_tcl);
        self.renderer
            .render_template(MAKEFILE_TEMPLATE, &self.work_root.join(MAKEFILE), &vars)
            .context("Failed to render Makefile")?;

        Ok(())
    }

    /// Apply `KEY=VALUE` overrides to declared parameters. A bare `KEY`
    /// sets a boolean parameter to true. Configure takes every accepted
    /// argtype; run only takes plusargs, since the build files are already
    /// written by then.
    fn apply_overrides(&mut self, stage: BackendStage, overrides: &[String]) -> Result<()> {
        let _guard = self.span.enter();

        let accepted: &[ParamType] = match stage {
            BackendStage::Configure => &VCS_ARGTYPES,
            BackendStage::Run => &VCS_RUN_ARGTYPES,
            BackendStage::Build => &[],
        };

        for raw in overrides {
            let (key, value) = match raw.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (raw.as_str(), None),
            };

            let param = self.edam.parameters.get(key).ok_or_else(|| {
                BackendError::InvalidArgument(format!("unknown parameter '{}'", key))
            })?;

            if !accepted.contains(&param.paramtype) {
                return Err(BackendError::InvalidArgument(format!(
                    "parameter '{}' of type {:?} is not accepted by {} at {:?}",
                    key, param.paramtype, TOOL_VCS, stage
                ))
                .into());
            }

            let value = match (value, param.datatype) {
                (Some(value), datatype) => datatype
                    .parse_value(value)
                    .map_err(|e| BackendError::InvalidArgument(format!("{}: {}", key, e)))?,
                (None, DataType::Bool) => ParamValue::Bool(true),
                (None, _) => {
                    return Err(BackendError::InvalidArgument(format!(
                        "parameter '{}' needs a value",
                        key
                    ))
                    .into())
                }
            };

            tracing::debug!("Override {} = {:?}", key, value);
            self.params.set(param.paramtype, key, value);
        }

        Ok(())
    }

    fn build(&self) -> Result<()> {
        let _guard = self.span.enter();
        tracing::info!("Building {}", self.edam.name);
        self.runner.run_tool(TOOL_MAKE, &[], &self.work_root)
    }

    fn run(&self) -> Result<()> {
        let _guard = self.span.enter();
        tracing::info!("Running {}", self.edam.name);
        self.runner.run_tool(TOOL_MAKE, &self.run_args(), &self.work_root)
    }
}
