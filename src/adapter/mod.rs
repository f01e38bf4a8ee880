//! Dialog adapters
//!
//! Each adapter knows how to detect one external picker, how to turn
//! [`DialogOptions`] into an [`Invocation`] for it, and how to read the
//! paths back out of whatever it prints.

mod gtk;
mod kdialog;
mod launcher;
mod osascript;

pub use gtk::GtkPicker;
pub use kdialog::Kdialog;
pub use launcher::{Launcher, LauncherKind};
pub use osascript::Osascript;

use std::path::Path;
use tracing::debug;

use crate::options::DialogOptions;
use crate::shell::Invocation;

/// One external file picker
pub trait DialogAdapter: Send + Sync {
    /// Stable identifier, usually the executable name
    fn name(&self) -> &str;

    /// Whether the picker can be invoked on this host
    fn probe(&self) -> bool;

    /// Build the command that opens the picker in `directory`
    fn build(&self, directory: &Path, options: &DialogOptions) -> Invocation;

    /// Turn raw stdout into path strings
    fn parse(&self, raw: &str, directory: &Path) -> Vec<String> {
        let _ = directory;
        split_lines(raw)
    }

    /// Exit codes meaning the user dismissed the picker
    fn is_cancel_code(&self, code: i32) -> bool {
        code == 1
    }
}

/// Check whether `program` resolves on `PATH`
pub fn command_exists(program: &str) -> bool {
    let found = which::which(program).is_ok();
    debug!("Probe {}: {}", program, if found { "found" } else { "missing" });
    found
}

/// Split on newlines, dropping empty lines and stray carriage returns
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve a listing entry such as `./notes/a.txt` against `directory`
pub fn resolve_entry(entry: &str, directory: &Path) -> String {
    if Path::new(entry).is_absolute() {
        return entry.to_string();
    }
    let relative = entry.strip_prefix("./").unwrap_or(entry);
    directory.join(relative).to_string_lossy().into_owned()
}

/// Directory as text; the orchestrator only hands over UTF-8 paths
fn dir_text(directory: &Path) -> String {
    directory.to_string_lossy().into_owned()
}
