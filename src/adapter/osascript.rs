//! macOS `choose file` through osascript

use std::path::Path;

use super::{command_exists, dir_text, split_lines, DialogAdapter};
use crate::options::DialogOptions;
use crate::shell::Invocation;

#[derive(Debug, Clone, Default)]
pub struct Osascript;

impl Osascript {
    pub const MULTIPLE_CLAUSE: &'static str = "with multiple selections allowed";
}

/// Escape text for an AppleScript string literal
fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', r"\\").replace('"', "\\\""))
}

impl DialogAdapter for Osascript {
    fn name(&self) -> &str {
        "osascript"
    }

    fn probe(&self) -> bool {
        cfg!(target_os = "macos") && command_exists("osascript")
    }

    fn build(&self, directory: &Path, options: &DialogOptions) -> Invocation {
        let prompt = applescript_string(options.title_or_default());
        let location = applescript_string(&dir_text(directory));

        let mut script = String::from("tell application \"System Events\" to activate\n");
        if options.multiple {
            script.push_str(&format!(
                "set theFiles to choose file with prompt {} default location POSIX file {} {}\n",
                prompt,
                location,
                Self::MULTIPLE_CLAUSE
            ));
            script.push_str("set output to \"\"\n");
            script.push_str("repeat with aFile in theFiles\n");
            script.push_str("set output to output & POSIX path of aFile & linefeed\n");
            script.push_str("end repeat\n");
            script.push_str("return output");
        } else {
            script.push_str(&format!(
                "set theFile to choose file with prompt {} default location POSIX file {}\n",
                prompt, location
            ));
            script.push_str("return POSIX path of theFile");
        }

        Invocation::direct("osascript", ["-e".to_string(), script])
    }

    fn parse(&self, raw: &str, _directory: &Path) -> Vec<String> {
        // osascript appends a newline to whatever the script returns
        split_lines(raw.trim_end_matches(['\n', '\r']))
    }
}
