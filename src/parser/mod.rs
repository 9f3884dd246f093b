pub mod edam;

pub use edam::EdamParser;
