//! KDE's kdialog

use std::path::Path;

use super::{command_exists, dir_text, DialogAdapter};
use crate::options::DialogOptions;
use crate::shell::Invocation;

#[derive(Debug, Clone, Default)]
pub struct Kdialog;

impl Kdialog {
    pub const SINGLE_COMMAND: &'static str = "--getopenfilename";
    pub const MULTIPLE_COMMAND: &'static str = "--getopenfilenames";
}

impl DialogAdapter for Kdialog {
    fn name(&self) -> &str {
        "kdialog"
    }

    fn probe(&self) -> bool {
        command_exists("kdialog")
    }

    fn build(&self, directory: &Path, options: &DialogOptions) -> Invocation {
        let mut args = Vec::new();

        if options.multiple {
            args.push(Self::MULTIPLE_COMMAND.to_string());
            // one path per line instead of space separated
            args.push("--separate-output".to_string());
        } else {
            args.push(Self::SINGLE_COMMAND.to_string());
        }

        args.push(dir_text(directory));

        if !options.file_types.is_empty() {
            args.push(options.file_types.join(" "));
        }

        args.push("--title".to_string());
        args.push(options.title_or_default().to_string());

        Invocation::direct("kdialog", args)
    }
}
