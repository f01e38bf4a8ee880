//! unix-file-picker
//!
//! Opens a native file selection dialog on Unix desktops using whichever
//! picker is installed (zenity, kdialog, yad, qarma, matedialog, osascript,
//! rofi, fzf or dmenu) and returns the chosen files as absolute paths.
//!
//! ```no_run
//! use unix_file_picker::{open_file_dialog, DialogOptions};
//!
//! # async fn demo() -> unix_file_picker::Result<()> {
//! let options = DialogOptions::new().multiple(true).file_type("*.md");
//! let result = open_file_dialog(None, &options).await?;
//! for path in result.paths() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod dialog;
pub mod error;
pub mod options;
pub mod registry;
pub mod runner;
pub mod shell;

pub use adapter::DialogAdapter;
pub use config::DialogConfig;
pub use dialog::{list_available_tools, open_file_dialog, FileDialog};
pub use error::{DialogError, Result};
pub use options::{DialogOptions, DialogResult};
pub use registry::Registry;
pub use shell::Invocation;
