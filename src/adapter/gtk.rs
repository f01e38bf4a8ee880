//! zenity and its forks (yad, qarma, matedialog)

use std::path::Path;

use super::{command_exists, dir_text, DialogAdapter};
use crate::options::DialogOptions;
use crate::shell::Invocation;

/// A picker speaking zenity's `--file-selection` dialect
#[derive(Debug, Clone)]
pub struct GtkPicker {
    program: &'static str,
    filters: bool,
}

impl GtkPicker {
    pub const MULTIPLE_FLAG: &'static str = "--multiple";

    pub fn zenity() -> Self {
        Self { program: "zenity", filters: true }
    }

    pub fn yad() -> Self {
        Self { program: "yad", filters: true }
    }

    pub fn qarma() -> Self {
        Self { program: "qarma", filters: true }
    }

    /// matedialog has no file filters
    pub fn matedialog() -> Self {
        Self { program: "matedialog", filters: false }
    }
}

impl DialogAdapter for GtkPicker {
    fn name(&self) -> &str {
        self.program
    }

    fn probe(&self) -> bool {
        command_exists(self.program)
    }

    fn build(&self, directory: &Path, options: &DialogOptions) -> Invocation {
        let mut args = vec!["--file-selection".to_string()];

        if options.multiple {
            args.push(Self::MULTIPLE_FLAG.to_string());
            args.push("--separator=\n".to_string());
        }

        args.push("--title".to_string());
        args.push(options.title_or_default().to_string());

        if self.filters {
            for pattern in &options.file_types {
                args.push("--file-filter".to_string());
                args.push(pattern.clone());
            }
        }

        // trailing slash opens the directory instead of preselecting it
        let mut start = dir_text(directory);
        if !start.ends_with('/') {
            start.push('/');
        }
        args.push(format!("--filename={}", start));

        Invocation::direct(self.program, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(invocation: &Invocation) -> Vec<String> {
        invocation.argv()[1..].to_vec()
    }

    #[test]
    fn test_zenity_single() {
        let inv = GtkPicker::zenity().build(Path::new("/home/u"), &DialogOptions::new());
        assert_eq!(inv.program(), "zenity");
        assert_eq!(
            args(&inv),
            vec!["--file-selection", "--title", "Select a file", "--filename=/home/u/"]
        );
    }

    #[test]
    fn test_zenity_multiple_with_filters() {
        let options = DialogOptions::new()
            .multiple(true)
            .title("Pick docs")
            .file_type("*.md")
            .file_type("*.txt");
        let inv = GtkPicker::zenity().build(Path::new("/srv"), &options);
        assert_eq!(
            args(&inv),
            vec![
                "--file-selection",
                "--multiple",
                "--separator=\n",
                "--title",
                "Pick docs",
                "--file-filter",
                "*.md",
                "--file-filter",
                "*.txt",
                "--filename=/srv/",
            ]
        );
    }

    #[test]
    fn test_root_directory_keeps_single_slash() {
        let inv = GtkPicker::yad().build(Path::new("/"), &DialogOptions::new());
        assert!(args(&inv).contains(&"--filename=/".to_string()));
    }

    #[test]
    fn test_matedialog_ignores_filters() {
        let options = DialogOptions::new().file_type("*.rs");
        let inv = GtkPicker::matedialog().build(Path::new("/tmp"), &options);
        assert!(!args(&inv).iter().any(|a| a == "--file-filter" || a == "*.rs"));
    }

    #[test]
    fn test_output_is_plain_lines() {
        let parsed = GtkPicker::qarma().parse("/a/b.txt\n/a/c.txt\n", Path::new("/a"));
        assert_eq!(parsed, vec!["/a/b.txt", "/a/c.txt"]);
    }
}
