use anyhow::{Context, Result};

use crate::backend::BackendError;
use crate::ir::Edam;

/// Reads an EDAM project description from JSON.
pub struct EdamParser {
    pub content: String,
}

impl EdamParser {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read EDAM file: {:?}", path))?;
        Ok(Self::new(content))
    }

    pub fn parse(&self) -> Result<Edam> {
        let edam: Edam = serde_json::from_str(&self.content)
            .map_err(|e| BackendError::InvalidEdam(e.to_string()))?;

        if edam.name.trim().is_empty() {
            return Err(BackendError::InvalidEdam("project name is empty".to_string()).into());
        }

        tracing::debug!(
            "Parsed EDAM for '{}': {} files, {} parameters",
            edam.name,
            edam.files.len(),
            edam.parameters.len()
        );

        Ok(edam)
    }
}
