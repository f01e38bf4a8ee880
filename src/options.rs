//! Dialog options and results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for one dialog invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogOptions {
    /// Allow selecting more than one file
    pub multiple: bool,
    /// Window title or prompt
    pub title: Option<String>,
    /// Glob patterns such as `*.txt`, in order
    pub file_types: Vec<String>,
}

impl DialogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn file_type(mut self, pattern: impl Into<String>) -> Self {
        self.file_types.push(pattern.into());
        self
    }

    /// Title to show, falling back to a default that matches the selection mode
    pub fn title_or_default(&self) -> &str {
        match &self.title {
            Some(title) => title,
            None if self.multiple => "Select files",
            None => "Select a file",
        }
    }
}

/// Outcome of a dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "paths", rename_all = "snake_case")]
pub enum DialogResult {
    /// The user dismissed the dialog
    Canceled,
    /// Absolute paths in the order the picker reported them
    Selected(Vec<PathBuf>),
}

impl DialogResult {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Canceled => &[],
            Self::Selected(paths) => paths,
        }
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        match self {
            Self::Canceled => Vec::new(),
            Self::Selected(paths) => paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_titles() {
        assert_eq!(DialogOptions::new().title_or_default(), "Select a file");
        assert_eq!(
            DialogOptions::new().multiple(true).title_or_default(),
            "Select files"
        );
        assert_eq!(
            DialogOptions::new().title("Open log").title_or_default(),
            "Open log"
        );
    }

    #[test]
    fn test_builder_keeps_filter_order() {
        let options = DialogOptions::new().file_type("*.md").file_type("*.txt");
        assert_eq!(options.file_types, vec!["*.md", "*.txt"]);
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: DialogOptions = serde_json::from_str(r#"{"multiple": true}"#).unwrap();
        assert!(options.multiple);
        assert!(options.title.is_none());
        assert!(options.file_types.is_empty());
    }

    #[test]
    fn test_result_json_shape() {
        let result = DialogResult::Selected(vec![PathBuf::from("/tmp/a.txt")]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "selected");
        assert_eq!(json["paths"][0], "/tmp/a.txt");

        let json = serde_json::to_value(DialogResult::Canceled).unwrap();
        assert_eq!(json["status"], "canceled");
    }

    #[test]
    fn test_canceled_has_no_paths() {
        assert!(DialogResult::Canceled.is_canceled());
        assert!(DialogResult::Canceled.paths().is_empty());
        assert!(DialogResult::Canceled.into_paths().is_empty());
    }
}
