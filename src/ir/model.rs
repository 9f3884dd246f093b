use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_LOGICAL_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VhdlDialect {
    Vhdl87,
    Vhdl93,
    Vhdl2008,
}

impl VhdlDialect {
    /// Map a `vhdlSource` tag suffix to its dialect. Each suffix selects its
    /// own dialect; anything unrecognised selects none.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        if suffix.ends_with("-87") {
            Some(VhdlDialect::Vhdl87)
        } else if suffix.ends_with("-93") {
            Some(VhdlDialect::Vhdl93)
        } else if suffix.ends_with("-2008") {
            Some(VhdlDialect::Vhdl2008)
        } else {
            None
        }
    }

    pub fn to_flag(&self) -> &str {
        match self {
            VhdlDialect::Vhdl87 => "-87",
            VhdlDialect::Vhdl93 => "-93",
            VhdlDialect::Vhdl2008 => "-2008",
        }
    }
}

/// File type tag of a source file. The prefixed variants keep the tag
/// suffix (e.g. `-2008`) so the original tag can be reproduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    VerilogSource(String),
    SystemVerilogSource(String),
    VhdlSource(String),
    TclSource,
    User,
    Unknown(String),
}

impl FileType {
    pub fn parse(tag: &str) -> Self {
        if let Some(suffix) = tag.strip_prefix("verilogSource") {
            FileType::VerilogSource(suffix.to_string())
        } else if let Some(suffix) = tag.strip_prefix("systemVerilogSource") {
            FileType::SystemVerilogSource(suffix.to_string())
        } else if let Some(suffix) = tag.strip_prefix("vhdlSource") {
            FileType::VhdlSource(suffix.to_string())
        } else {
            match tag {
                "tclSource" => FileType::TclSource,
                "user" => FileType::User,
                other => FileType::Unknown(other.to_string()),
            }
        }
    }

    pub fn tag(&self) -> String {
        match self {
            FileType::VerilogSource(suffix) => format!("verilogSource{}", suffix),
            FileType::SystemVerilogSource(suffix) => format!("systemVerilogSource{}", suffix),
            FileType::VhdlSource(suffix) => format!("vhdlSource{}", suffix),
            FileType::TclSource => "tclSource".to_string(),
            FileType::User => "user".to_string(),
            FileType::Unknown(tag) => tag.clone(),
        }
    }

    pub fn is_system_verilog(&self) -> bool {
        matches!(self, FileType::SystemVerilogSource(_))
    }

    pub fn vhdl_dialect(&self) -> Option<VhdlDialect> {
        match self {
            FileType::VhdlSource(suffix) => VhdlDialect::from_suffix(suffix),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl From<String> for FileType {
    fn from(tag: String) -> Self {
        FileType::parse(&tag)
    }
}

impl From<FileType> for String {
    fn from(file_type: FileType) -> Self {
        file_type.tag()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub file_type: FileType,
    pub logical_name: String,
}

impl SourceFile {
    /// An unset or empty logical name becomes `work`.
    pub fn new(name: String, file_type: FileType, logical_name: Option<&str>) -> Self {
        let logical_name = match logical_name {
            Some(lib) if !lib.is_empty() => lib.to_string(),
            _ => DEFAULT_LOGICAL_NAME.to_string(),
        };

        Self {
            name,
            file_type,
            logical_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
}

impl ParamValue {
    /// Render a value for a tool command line. Booleans become `1`/`0`
    /// unless `bool_is_str` asks for `true`/`false`; strings are wrapped in
    /// `quote`.
    pub fn to_param_str(&self, quote: &str, bool_is_str: bool) -> String {
        match self {
            ParamValue::Bool(b) if bool_is_str => b.to_string(),
            ParamValue::Bool(true) => "1".to_string(),
            ParamValue::Bool(false) => "0".to_string(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Real(r) => real_str(*r),
            ParamValue::Str(s) => format!("{}{}{}", quote, s, quote),
        }
    }

    pub fn param_str(&self) -> String {
        self.to_param_str("", false)
    }

    pub fn is_true(&self) -> bool {
        matches!(self, ParamValue::Bool(true))
    }
}

/// Shortest round-trip form of `r`, with exponents written as `e+20` or
/// `e-05` and non-finite values as `inf`, `-inf` and `nan`.
fn real_str(r: f64) -> String {
    if r.is_nan() {
        return "nan".to_string();
    }
    if r.is_infinite() {
        return if r > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{:?}", r);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Plusarg,
    Vlogparam,
    Vlogdefine,
    Generic,
    Cmdlinearg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Bool,
    Int,
    Real,
    Str,
    File,
}

impl DataType {
    /// Parse a command-line value according to the declared datatype.
    pub fn parse_value(&self, raw: &str) -> Result<ParamValue> {
        match self {
            DataType::Bool => match raw.to_lowercase().as_str() {
                "true" | "1" => Ok(ParamValue::Bool(true)),
                "false" | "0" => Ok(ParamValue::Bool(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value: {}", raw)),
            },
            DataType::Int => raw
                .parse::<i64>()
                .map(ParamValue::Int)
                .context(format!("Invalid integer value: {}", raw)),
            DataType::Real => raw
                .parse::<f64>()
                .map(ParamValue::Real)
                .context(format!("Invalid real value: {}", raw)),
            DataType::Str | DataType::File => Ok(ParamValue::Str(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub datatype: DataType,
    pub paramtype: ParamType,
    #[serde(default)]
    pub default: Option<ParamValue>,
    #[serde(default)]
    pub description: Option<String>,
}
