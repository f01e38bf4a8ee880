//! Error types for unix-file-picker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DialogError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No suitable file dialog tool found. Please install one of: {}", .candidates.join(", "))]
    ToolNotFound { candidates: Vec<String> },

    #[error("Failed to open file dialog with {tool}: {message}")]
    Execution { tool: String, message: String },
}

impl DialogError {
    pub(crate) fn execution(tool: &str, message: impl ToString) -> Self {
        Self::Execution {
            tool: tool.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DialogError>;
