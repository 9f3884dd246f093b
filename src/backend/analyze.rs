use anyhow::Result;
use indexmap::IndexMap;
use std::io::Write;

use crate::config::VcsOptions;
use crate::constants::{ANALYZER_VERILOG, ANALYZER_VHDL};
use crate::ir::{FileType, Fileset, ParamValue};
use crate::utils::force_slash;

/// Analyzer invocations for a fileset, plus the Tcl lines for `tclSource` files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeScript {
    pub commands: Vec<String>,
    pub tcl_commands: Vec<String>,
    /// Logical names in order of first use
    pub libraries: Vec<String>,
}

impl AnalyzeScript {
    pub fn build(
        fileset: &Fileset,
        options: &VcsOptions,
        defines: &IndexMap<String, ParamValue>,
    ) -> Self {
        let incdir_args: Vec<String> = fileset
            .incdirs
            .iter()
            .map(|dir| format!("+incdir+{}", force_slash(dir)))
            .collect();

        let mut script = AnalyzeScript::default();

        for f in &fileset.files {
            if !script.libraries.contains(&f.logical_name) {
                script.libraries.push(f.logical_name.clone());
            }

            let (program, mut args) = match &f.file_type {
                FileType::VerilogSource(_) | FileType::SystemVerilogSource(_) => {
                    let mut args = options.vlogan_options.clone();
                    for (key, value) in defines {
                        args.push(format!("+define+{}={}", key, value.param_str()));
                    }
                    if f.file_type.is_system_verilog() {
                        args.push("-sverilog".to_string());
                    }
                    args.extend(incdir_args.iter().cloned());
                    (ANALYZER_VERILOG, args)
                }
                FileType::VhdlSource(_) => {
                    let mut args = Vec::new();
                    if let Some(dialect) = f.file_type.vhdl_dialect() {
                        args.push(dialect.to_flag().to_string());
                    }
                    args.extend(options.vhdlan_options.iter().cloned());
                    (ANALYZER_VHDL, args)
                }
                FileType::TclSource => {
                    script.tcl_commands.push(format!("do {}", f.name));
                    continue;
                }
                FileType::User => continue,
                FileType::Unknown(tag) => {
                    tracing::warn!("{} has unknown file type '{}'", f.name, tag);
                    continue;
                }
            };

            args.push("-q".to_string());
            args.push("-full64".to_string());
            args.push(force_slash(&f.name));
            script.commands.push(format!("{} {}", program, args.join(" ")));
        }

        tracing::debug!(
            "{} analyzer commands, libraries: {}",
            script.commands.len(),
            script.libraries.join(", ")
        );

        script
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        for line in &self.commands {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    pub fn write_tcl_to<W: Write>(&self, out: &mut W) -> Result<()> {
        for line in &self.tcl_commands {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
