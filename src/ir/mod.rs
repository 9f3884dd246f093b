pub mod edam;
pub mod fileset;
pub mod model;

pub use edam::{Edam, EdamFile, ParamMaps};
pub use fileset::Fileset;
pub use model::{DataType, FileType, ParamType, ParamValue, Parameter, SourceFile, VhdlDialect};
