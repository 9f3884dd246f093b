use serde::{Deserialize, Serialize};

use crate::ir::ParamType;

/// Options read from `tool_options.vcs` of the project description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsOptions {
    /// Extra arguments to every `vlogan` invocation
    pub vlogan_options: Vec<String>,
    /// Extra arguments to every `vhdlan` invocation
    pub vhdlan_options: Vec<String>,
    /// Compile-time options passed to `vcs`
    pub vcs_options: Vec<String>,
    /// Run-time options passed to the simulation executable
    pub run_options: Vec<String>,
}

/// Parameter types the VCS backend accepts.
pub const VCS_ARGTYPES: [ParamType; 3] = [
    ParamType::Plusarg,
    ParamType::Vlogdefine,
    ParamType::Vlogparam,
];

/// Parameter types that still take effect once the build files are written.
pub const VCS_RUN_ARGTYPES: [ParamType; 1] = [ParamType::Plusarg];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options() {
        let opts: VcsOptions =
            serde_json::from_str(r#"{"vcs_options": ["-debug_access+all"]}"#).unwrap();
        assert_eq!(opts.vcs_options, vec!["-debug_access+all"]);
        assert!(opts.run_options.is_empty());
        assert!(opts.vlogan_options.is_empty());
    }
}
