use anyhow::{Context, Result};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::backend::BackendError;
use crate::constants::MAKEFILE_TEMPLATE;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder regex is valid");
}

const VCS_MAKEFILE: &str = include_str!("../../templates/vcs/Makefile.j2");

/// A value substituted into a template. Lists render space-separated.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    Str(String),
    List(Vec<String>),
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Str(s) => f.write_str(s),
            TemplateValue::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::Str(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::Str(s)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(items: Vec<String>) -> Self {
        TemplateValue::List(items)
    }
}

pub type TemplateVars = IndexMap<String, TemplateValue>;

/// Renders a named template with a set of variables into an output file.
pub trait TemplateRenderer {
    fn render_template(&self, template_name: &str, output: &Path, vars: &TemplateVars) -> Result<()>;
}

/// Built-in renderer for `{{ variable }}` templates.
pub struct TemplateEngine {
    templates: HashMap<String, String>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut engine = Self::empty();
        engine.register(MAKEFILE_TEMPLATE, VCS_MAKEFILE);
        engine
    }

    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, source: &str) {
        self.templates.insert(name.to_string(), source.to_string());
    }

    pub fn render_str(&self, template_name: &str, vars: &TemplateVars) -> Result<String> {
        let source = self.templates.get(template_name).ok_or_else(|| BackendError::Template {
            template: template_name.to_string(),
            reason: "no such template".to_string(),
        })?;

        let mut output = String::with_capacity(source.len());
        let mut last = 0;
        for cap in PLACEHOLDER_RE.captures_iter(source) {
            let (Some(whole), Some(var)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            let value = vars.get(var.as_str()).ok_or_else(|| BackendError::Template {
                template: template_name.to_string(),
                reason: format!("undefined variable '{}'", var.as_str()),
            })?;

            output.push_str(&source[last..whole.start()]);
            output.push_str(&value.to_string());
            last = whole.end();
        }
        output.push_str(&source[last..]);

        Ok(output)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for TemplateEngine {
    fn render_template(&self, template_name: &str, output: &Path, vars: &TemplateVars) -> Result<()> {
        let rendered = self.render_str(template_name, vars)?;
        std::fs::write(output, rendered)
            .context(format!("Failed to write rendered template: {}", output.display()))?;
        tracing::debug!("Rendered {} to {}", template_name, output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, TemplateValue)]) -> TemplateVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_substitutes_strings_and_lists() {
        let mut engine = TemplateEngine::empty();
        engine.register("t", "top={{ toplevel }} opts={{opts}}\n");

        let rendered = engine
            .render_str(
                "t",
                &vars(&[
                    ("toplevel", "tb".into()),
                    ("opts", vec!["-a".to_string(), "-b".to_string()].into()),
                ]),
            )
            .unwrap();
        assert_eq!(rendered, "top=tb opts=-a -b\n");
    }

    #[test]
    fn test_undefined_variable_fails() {
        let mut engine = TemplateEngine::empty();
        engine.register("t", "{{ missing }}");

        let err = engine.render_str("t", &TemplateVars::new()).unwrap_err();
        assert!(err.to_string().contains("undefined variable 'missing'"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let engine = TemplateEngine::empty();
        let err = engine.render_str("nope.j2", &TemplateVars::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackendError>(),
            Some(BackendError::Template { .. })
        ));
    }

    #[test]
    fn test_builtin_makefile_keeps_make_variables() {
        let engine = TemplateEngine::new();
        let rendered = engine
            .render_str(
                MAKEFILE_TEMPLATE,
                &vars(&[
                    ("name", "blinky".into()),
                    ("toplevel", "tb".into()),
                    ("vcs_options", TemplateValue::List(vec![])),
                    ("run_options", TemplateValue::List(vec![])),
                    ("plusargs", TemplateValue::List(vec![])),
                    ("beforearg", "".into()),
                    ("tcl_options", TemplateValue::List(vec![])),
                ]),
            )
            .unwrap();
        assert!(rendered.contains("$(EXTRA_OPTIONS)"));
        assert!(rendered.contains("-top tb"));
        assert!(rendered.contains("\n\t"));
    }
}
