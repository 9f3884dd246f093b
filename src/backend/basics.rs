/// The stages a backend is driven through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStage {
    Configure,
    Build,
    Run,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Invalid EDAM description: {0}")]
    InvalidEdam(String),

    #[error("Template '{template}' failed to render: {reason}")]
    Template { template: String, reason: String },

    #[error("Command '{0}' not found. Make sure it is in $PATH")]
    ToolNotFound(String),

    #[error("'{program}' exited with an error: {}", exit_status(.code))]
    ToolFailed { program: String, code: Option<i32> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported tool: {0}")]
    UnsupportedTool(String),
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}
