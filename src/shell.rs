//! Shell quoting and the invocation handed to the process runner
//!
//! Pickers that need no pipeline run directly from an argument vector, so
//! nothing they receive is ever parsed by a shell. Pipeline pickers (a file
//! listing piped into a launcher) run through `sh -c` and every value
//! interpolated into their script goes through [`quote`].
//!
//! Pipelines run in their own process group so the whole pipeline can be
//! killed at once. Terminal pickers cannot: a process outside the terminal's
//! foreground group is stopped as soon as it reads keys. Those run in our
//! group behind [`supervised`], which lets the shell stop the picker itself.

use tokio::process::Command;

/// Wrap `value` in single quotes, writing embedded quotes as `'\''`.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Quote `value` only when it contains something a shell would interpret.
pub fn quote_if_needed(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        value.to_string()
    } else {
        quote(value)
    }
}

/// Run `pipeline` in the background and wait for it, so that SIGTERM or
/// SIGHUP to the shell interrupts the wait and kills the last command.
pub fn supervised(pipeline: &str) -> String {
    format!(
        "{{ {} & trap 'kill $! 2>/dev/null' TERM HUP; wait $!; }}",
        pipeline
    )
}

/// A ready-to-run picker command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Program executed directly with an argument vector
    Direct { program: String, args: Vec<String> },
    /// Script executed with `sh -c`
    Shell {
        script: String,
        /// Picker draws on the controlling terminal
        terminal: bool,
    },
}

impl Invocation {
    pub fn direct<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Direct {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn shell(script: impl Into<String>) -> Self {
        Self::Shell {
            script: script.into(),
            terminal: false,
        }
    }

    /// Script whose picker needs the terminal's foreground process group
    pub fn terminal_shell(script: impl Into<String>) -> Self {
        Self::Shell {
            script: script.into(),
            terminal: true,
        }
    }

    /// Name of the executable that will be spawned
    pub fn program(&self) -> &str {
        match self {
            Self::Direct { program, .. } => program,
            Self::Shell { .. } => "sh",
        }
    }

    /// The full argument vector, program included
    pub fn argv(&self) -> Vec<String> {
        match self {
            Self::Direct { program, args } => {
                let mut argv = Vec::with_capacity(args.len() + 1);
                argv.push(program.clone());
                argv.extend(args.iter().cloned());
                argv
            }
            Self::Shell { script, .. } => vec!["sh".into(), "-c".into(), script.clone()],
        }
    }

    /// Render as a single shell-safe command line
    pub fn command_line(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| quote_if_needed(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn to_command(&self) -> Command {
        match self {
            Self::Direct { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            Self::Shell { script, terminal } => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(script);
                if !terminal {
                    cmd.process_group(0);
                }
                cmd
            }
        }
    }
}
