pub mod backend;
pub mod config;
pub mod constants;
pub mod ir;
pub mod parser;
pub mod tools;
pub mod utils;

// Re-export commonly used types
pub use backend::{create_backend, Backend, BackendError, BackendStage, Vcs};
pub use ir::{Edam, EdamFile, FileType, ParamValue, SourceFile};
pub use parser::EdamParser;
