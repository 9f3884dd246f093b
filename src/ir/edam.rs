use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ir::{ParamType, ParamValue, Parameter};

/// One entry of the EDAM file list, as written by the framework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdamFile {
    pub name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub logical_name: Option<String>,
    #[serde(default)]
    pub is_include_file: bool,
    #[serde(default)]
    pub include_path: Option<String>,
}

impl EdamFile {
    pub fn new(name: &str, file_type: &str) -> Self {
        Self {
            name: name.to_string(),
            file_type: file_type.to_string(),
            ..Default::default()
        }
    }

    pub fn with_logical_name(mut self, logical_name: &str) -> Self {
        self.logical_name = Some(logical_name.to_string());
        self
    }

    pub fn include(mut self) -> Self {
        self.is_include_file = true;
        self
    }
}

/// Tool-agnostic project description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Edam {
    pub name: String,
    #[serde(default)]
    pub toplevel: Option<String>,
    #[serde(default)]
    pub files: Vec<EdamFile>,
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(default)]
    pub tool_options: IndexMap<String, serde_json::Value>,
}

impl Edam {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Deserialize `tool_options.<tool>`, falling back to the default when absent.
    pub fn tool_options_for<T: DeserializeOwned + Default>(&self, tool: &str) -> Result<T> {
        match self.tool_options.get(tool) {
            Some(value) => serde_json::from_value(value.clone())
                .context(format!("Invalid tool_options for '{}'", tool)),
            None => Ok(T::default()),
        }
    }
}

/// Current parameter values, grouped by how the tool consumes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMaps {
    pub plusarg: IndexMap<String, ParamValue>,
    pub vlogparam: IndexMap<String, ParamValue>,
    pub vlogdefine: IndexMap<String, ParamValue>,
    pub generic: IndexMap<String, ParamValue>,
}

impl ParamMaps {
    /// Seed the maps from parameter defaults. Parameters without a default
    /// stay declared but valueless.
    pub fn from_edam(edam: &Edam) -> Self {
        let mut maps = Self::default();
        for (key, param) in &edam.parameters {
            if let Some(value) = &param.default {
                maps.set(param.paramtype, key, value.clone());
            }
        }
        maps
    }

    pub fn set(&mut self, paramtype: ParamType, key: &str, value: ParamValue) {
        let map = match paramtype {
            ParamType::Plusarg => &mut self.plusarg,
            ParamType::Vlogparam => &mut self.vlogparam,
            ParamType::Vlogdefine => &mut self.vlogdefine,
            ParamType::Generic => &mut self.generic,
            ParamType::Cmdlinearg => return,
        };
        map.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::DataType;

    fn param(paramtype: ParamType, default: Option<ParamValue>) -> Parameter {
        Parameter {
            datatype: DataType::Str,
            paramtype,
            default,
            description: None,
        }
    }

    #[test]
    fn test_param_maps_from_defaults() {
        let mut edam = Edam::new("proj");
        let params = [
            ("WIDTH", param(ParamType::Vlogparam, Some(ParamValue::Int(8)))),
            ("seed", param(ParamType::Plusarg, None)),
            ("SIM", param(ParamType::Vlogdefine, Some(ParamValue::Bool(true)))),
            ("mode", param(ParamType::Cmdlinearg, Some("x".into()))),
        ];
        for (key, parameter) in params {
            edam.parameters.insert(key.to_string(), parameter);
        }

        let maps = ParamMaps::from_edam(&edam);
        assert_eq!(maps.vlogparam.get("WIDTH"), Some(&ParamValue::Int(8)));
        assert_eq!(maps.vlogdefine.get("SIM"), Some(&ParamValue::Bool(true)));
        assert!(maps.plusarg.is_empty());
        assert!(maps.generic.is_empty());
    }

    #[test]
    fn test_tool_options_default_when_absent() {
        let edam = Edam::new("proj");
        let opts: IndexMap<String, Vec<String>> = edam.tool_options_for("vcs").unwrap();
        assert!(opts.is_empty());
    }
}
