// Tool names
pub const TOOL_VCS: &str = "vcs";
pub const TOOL_MAKE: &str = "make";
pub const ANALYZER_VERILOG: &str = "vlogan";
pub const ANALYZER_VHDL: &str = "vhdlan";

// Generated files
pub const ANALYZE_SCRIPT: &str = "analyze.bash";
pub const PARAMETER_FILE: &str = "parameters.snps";
pub const TCL_SCRIPT: &str = "vcs_main.tcl";
pub const MAKEFILE: &str = "Makefile";
pub const MAKEFILE_TEMPLATE: &str = "Makefile.j2";

// Defaults
pub const DEFAULT_LOGICAL_NAME: &str = "work";
pub const BEFORE_PLUSARG: &str = "before";
pub const EXTRA_OPTIONS_VAR: &str = "EXTRA_OPTIONS";
