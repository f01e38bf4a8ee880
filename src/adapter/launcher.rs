//! Launchers fed a file listing through a shell pipeline
//!
//! rofi, fzf and dmenu know nothing about files: they pick lines from stdin.
//! The script lists regular files under the start directory with `find` and
//! pipes them in, so every answer comes back relative to that directory.
//! fzf draws on the terminal, so its pipeline is supervised instead of
//! being moved to a process group of its own.

use std::path::Path;

use super::{command_exists, dir_text, resolve_entry, split_lines, DialogAdapter};
use crate::options::DialogOptions;
use crate::shell::{quote, supervised, Invocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherKind {
    Rofi,
    Fzf,
    Dmenu,
}

#[derive(Debug, Clone)]
pub struct Launcher {
    kind: LauncherKind,
}

impl Launcher {
    pub fn rofi() -> Self {
        Self { kind: LauncherKind::Rofi }
    }

    pub fn fzf() -> Self {
        Self { kind: LauncherKind::Fzf }
    }

    /// Single selection only
    pub fn dmenu() -> Self {
        Self { kind: LauncherKind::Dmenu }
    }

    pub fn kind(&self) -> LauncherKind {
        self.kind
    }

    /// Flag enabling multi-select, if the launcher has one
    pub fn multiple_flag(&self) -> Option<&'static str> {
        match self.kind {
            LauncherKind::Rofi => Some("-multi-select"),
            LauncherKind::Fzf => Some("-m"),
            LauncherKind::Dmenu => None,
        }
    }

    fn picker_command(&self, options: &DialogOptions) -> String {
        let title = options.title_or_default();
        let mut command = match self.kind {
            LauncherKind::Rofi => format!("rofi -dmenu -p {}", quote(title)),
            LauncherKind::Fzf => format!("fzf --prompt {}", quote(&format!("{}> ", title))),
            LauncherKind::Dmenu => format!("dmenu -p {}", quote(title)),
        };
        if options.multiple {
            if let Some(flag) = self.multiple_flag() {
                command.push(' ');
                command.push_str(flag);
            }
        }
        command
    }
}

impl DialogAdapter for Launcher {
    fn name(&self) -> &str {
        match self.kind {
            LauncherKind::Rofi => "rofi",
            LauncherKind::Fzf => "fzf",
            LauncherKind::Dmenu => "dmenu",
        }
    }

    fn probe(&self) -> bool {
        command_exists(self.name())
    }

    fn build(&self, directory: &Path, options: &DialogOptions) -> Invocation {
        let cd = format!("cd {}", quote(&dir_text(directory)));
        let pipeline = format!("find . -type f | {}", self.picker_command(options));
        match self.kind {
            LauncherKind::Fzf => {
                Invocation::terminal_shell(format!("{} && {}", cd, supervised(&pipeline)))
            }
            _ => Invocation::shell(format!("{} && {}", cd, pipeline)),
        }
    }

    fn parse(&self, raw: &str, directory: &Path) -> Vec<String> {
        if self.kind == LauncherKind::Dmenu {
            let selected = raw.trim();
            if selected.is_empty() {
                return Vec::new();
            }
            return vec![resolve_entry(selected, directory)];
        }

        split_lines(raw.trim())
            .iter()
            .map(|entry| resolve_entry(entry, directory))
            .collect()
    }

    fn is_cancel_code(&self, code: i32) -> bool {
        // fzf exits 130 when interrupted with Esc or Ctrl-C
        code == 1 || (self.kind == LauncherKind::Fzf && code == 130)
    }
}
