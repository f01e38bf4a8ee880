//! Dialog orchestration
//!
//! Picks the first available adapter, runs it and turns whatever it printed
//! into a [`DialogResult`]. Cancellation is never an error: some pickers
//! signal it with exit code 1, others by printing nothing, and both become
//! [`DialogResult::Canceled`].

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::adapter::DialogAdapter;
use crate::config::DialogConfig;
use crate::error::{DialogError, Result};
use crate::options::{DialogOptions, DialogResult};
use crate::registry::Registry;
use crate::runner::{self, RunLimits, RunOutput};

/// GTK prints these for harmless theme and portal issues
const BENIGN_STDERR: &str = "Gtk-WARNING";

/// Entry point for opening file dialogs
#[derive(Debug, Clone)]
pub struct FileDialog {
    registry: Registry,
    config: DialogConfig,
}

impl Default for FileDialog {
    fn default() -> Self {
        Self {
            registry: Registry::builtin(),
            config: DialogConfig::default(),
        }
    }
}

impl FileDialog {
    /// Create a dialog over `registry`, honoring `config.preferred_tool`
    pub fn new(mut registry: Registry, config: DialogConfig) -> Result<Self> {
        if let Some(tool) = &config.preferred_tool {
            if !registry.prioritize(tool) {
                return Err(DialogError::Validation(format!(
                    "Unknown dialog tool '{}' (known: {})",
                    tool,
                    registry.names().join(", ")
                )));
            }
            debug!("Preferring dialog tool: {}", tool);
        }
        Ok(Self { registry, config })
    }

    /// Built-in registry with configuration from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(Registry::builtin(), DialogConfig::from_env()?)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Open a file dialog starting in `directory` (current directory if `None`)
    pub async fn open(
        &self,
        directory: Option<&Path>,
        options: &DialogOptions,
    ) -> Result<DialogResult> {
        let directory = resolve_directory(directory)?;

        let adapter = self
            .registry
            .first_available()
            .await
            .ok_or_else(|| DialogError::ToolNotFound {
                candidates: self.registry.names(),
            })?;

        info!("Opening file dialog with {} in {}", adapter.name(), directory.display());

        let invocation = adapter.build(&directory, options);
        debug!("Command: {}", invocation.command_line());

        let limits = RunLimits {
            max_output_bytes: self.config.max_output_bytes,
            timeout: self.config.timeout(),
        };
        let output = runner::run(&invocation, limits)
            .await
            .map_err(|e| DialogError::execution(adapter.name(), e))?;

        let result = interpret(adapter.as_ref(), &directory, output)?;
        match &result {
            DialogResult::Canceled => info!("File dialog canceled"),
            DialogResult::Selected(paths) => info!("Selected {} file(s)", paths.len()),
        }
        Ok(result)
    }

    /// Names of every tool usable on this host, in priority order
    pub async fn list_available_tools(&self) -> Vec<String> {
        self.registry.available().await
    }
}

/// Open a file dialog with the built-in tools and environment configuration
pub async fn open_file_dialog(
    directory: Option<&Path>,
    options: &DialogOptions,
) -> Result<DialogResult> {
    FileDialog::from_env()?.open(directory, options).await
}

/// Names of the built-in tools usable on this host
pub async fn list_available_tools() -> Vec<String> {
    Registry::builtin().available().await
}

/// Validate the start directory and make it absolute
fn resolve_directory(directory: Option<&Path>) -> Result<PathBuf> {
    let directory = directory.filter(|d| !d.as_os_str().is_empty());

    let text = match directory {
        Some(dir) => dir.to_str().ok_or_else(|| {
            DialogError::Validation(format!(
                "Directory must be valid UTF-8: {}",
                dir.display()
            ))
        })?,
        None => "",
    };
    if text.contains('\0') {
        return Err(DialogError::Validation(
            "Directory must not contain NUL bytes".to_string(),
        ));
    }

    let absolute = match directory {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        _ => {
            let cwd = std::env::current_dir().map_err(|e| {
                DialogError::Validation(format!("Cannot determine current directory: {}", e))
            })?;
            match directory {
                Some(dir) => cwd.join(dir),
                None => cwd,
            }
        }
    };

    let normalized = normalize(&absolute);
    if normalized.to_str().is_none() {
        return Err(DialogError::Validation(format!(
            "Directory must be valid UTF-8: {}",
            normalized.display()
        )));
    }
    Ok(normalized)
}

/// Lexically remove `.` and `..` components from an absolute path
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Turn a finished picker run into a result
fn interpret(
    adapter: &dyn DialogAdapter,
    directory: &Path,
    output: RunOutput,
) -> Result<DialogResult> {
    if output.code != 0 {
        if adapter.is_cancel_code(output.code) {
            debug!("{} exited with cancel code {}", adapter.name(), output.code);
            return Ok(DialogResult::Canceled);
        }
        let stderr = output.stderr.trim();
        let message = if stderr.is_empty() {
            format!("exited with status {}", output.code)
        } else {
            format!("exited with status {}: {}", output.code, stderr)
        };
        return Err(DialogError::execution(adapter.name(), message));
    }

    let stderr = output.stderr.trim();
    if !stderr.is_empty() && !stderr.contains(BENIGN_STDERR) {
        warn!("File dialog warning from {}: {}", adapter.name(), stderr);
    }

    let stdout = output.stdout.trim();
    if stdout.is_empty() {
        return Ok(DialogResult::Canceled);
    }

    let entries = adapter.parse(stdout, directory);
    let total = entries.len();
    let paths: Vec<PathBuf> = entries
        .into_iter()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .collect();

    if paths.len() != total {
        warn!(
            "{} of {} paths from {} were not absolute and were dropped",
            total - paths.len(),
            total,
            adapter.name()
        );
    }

    Ok(DialogResult::Selected(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{GtkPicker, Launcher};
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Collects formatted log lines for inspection
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn warnings(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .filter(|line| line.contains("WARN"))
                .map(str::to_string)
                .collect()
        }
    }

    /// Interpret `output` and return the warnings logged meanwhile
    fn warnings_from(adapter: &dyn DialogAdapter, output: RunOutput) -> Vec<String> {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            interpret(adapter, Path::new("/"), output).unwrap();
        });
        logs.warnings()
    }

    fn output(code: i32, stdout: &str, stderr: &str) -> RunOutput {
        RunOutput {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_resolve_absolute_directory() {
        let dir = resolve_directory(Some(Path::new("/home/u/docs/../notes"))).unwrap();
        assert_eq!(dir, PathBuf::from("/home/u/notes"));
    }

    #[test]
    fn test_resolve_defaults_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_directory(None).unwrap(), normalize(&cwd));
        assert_eq!(resolve_directory(Some(Path::new(""))).unwrap(), normalize(&cwd));
    }

    #[test]
    fn test_resolve_relative_directory() {
        let cwd = std::env::current_dir().unwrap();
        let dir = resolve_directory(Some(Path::new("sub/dir"))).unwrap();
        assert_eq!(dir, normalize(&cwd.join("sub/dir")));
        assert!(dir.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new(OsStr::from_bytes(b"/tmp/\xff"));
        let err = resolve_directory(Some(dir)).unwrap_err();
        assert!(matches!(err, DialogError::Validation(_)));
    }

    #[test]
    fn test_exit_one_is_cancel() {
        let result = interpret(&GtkPicker::zenity(), Path::new("/"), output(1, "", "")).unwrap();
        assert_eq!(result, DialogResult::Canceled);
    }

    #[test]
    fn test_empty_output_is_cancel() {
        let result = interpret(&GtkPicker::zenity(), Path::new("/"), output(0, " \n\n", "")).unwrap();
        assert_eq!(result, DialogResult::Canceled);
    }

    #[test]
    fn test_other_exit_is_execution_error() {
        let err = interpret(&GtkPicker::yad(), Path::new("/"), output(255, "", "cannot open display\n"))
            .unwrap_err();
        match err {
            DialogError::Execution { tool, message } => {
                assert_eq!(tool, "yad");
                assert_eq!(message, "exited with status 255: cannot open display");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_relative_entries_dropped() {
        let result = interpret(
            &GtkPicker::zenity(),
            Path::new("/"),
            output(0, "/a.txt\nrelative.txt\n/b.txt\n", "Gtk-WARNING **: theme"),
        )
        .unwrap();
        assert_eq!(
            result,
            DialogResult::Selected(vec![PathBuf::from("/a.txt"), PathBuf::from("/b.txt")])
        );
    }

    #[test]
    fn test_gtk_noise_not_logged() {
        let warnings = warnings_from(
            &GtkPicker::zenity(),
            output(0, "/a.txt\n", "Gtk-WARNING **: Theme parsing error\n"),
        );
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_other_stderr_logged_once() {
        let warnings = warnings_from(
            &GtkPicker::zenity(),
            output(0, "/a.txt\n", "portal unavailable, falling back\n"),
        );
        assert_eq!(warnings.len(), 1, "{:?}", warnings);
        assert!(warnings[0].contains("zenity"));
        assert!(warnings[0].contains("portal unavailable"));
    }

    #[test]
    fn test_dropped_paths_logged() {
        let warnings = warnings_from(&GtkPicker::zenity(), output(0, "/a.txt\nrelative.txt\n", ""));
        assert_eq!(warnings.len(), 1, "{:?}", warnings);
        assert!(warnings[0].contains("1 of 2 paths from zenity were not absolute"));
    }

    #[test]
    fn test_clean_run_logs_nothing() {
        let warnings = warnings_from(&GtkPicker::zenity(), output(0, "/a.txt\n/b.txt\n", ""));
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_launcher_output_resolved() {
        let result = interpret(
            &Launcher::fzf(),
            Path::new("/home/u/docs"),
            output(0, "./a.txt\n./b.txt\n", ""),
        )
        .unwrap();
        assert_eq!(
            result.paths(),
            &[PathBuf::from("/home/u/docs/a.txt"), PathBuf::from("/home/u/docs/b.txt")]
        );
    }

    #[test]
    fn test_fzf_interrupt_is_cancel() {
        let result = interpret(&Launcher::fzf(), Path::new("/"), output(130, "", "")).unwrap();
        assert!(result.is_canceled());
    }

    #[test]
    fn test_unknown_preferred_tool() {
        let config = DialogConfig {
            preferred_tool: Some("nautilus".to_string()),
            ..DialogConfig::default()
        };
        let err = FileDialog::new(Registry::builtin(), config).unwrap_err();
        assert!(matches!(err, DialogError::Validation(_)));
    }

    #[test]
    fn test_preferred_tool_moves_first() {
        let config = DialogConfig {
            preferred_tool: Some("dmenu".to_string()),
            ..DialogConfig::default()
        };
        let dialog = FileDialog::new(Registry::builtin(), config).unwrap();
        assert_eq!(dialog.registry().names()[0], "dmenu");
    }
}
