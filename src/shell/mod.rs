//! Desktop shell bridge
//!
//! The narrow surface the UI needs from the host: the app version, native
//! file dialogs, text file I/O, user notifications and a generic named-command
//! invoke. [`NativeShell`] implements it for a terminal session.

mod commands;
mod native;

pub use commands::CommandRegistry;
pub use native::NativeShell;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file dialog failed: {0}")]
    Dialog(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("command '{command}' failed: {message}")]
    Command { command: String, message: String },
    #[error("invalid command payload: {0}")]
    Serde(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Request types
// ─────────────────────────────────────────────────────────────────────────────

/// A named extension filter, e.g. `("JSON", ["json"])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDialogOptions {
    pub title: Option<String>,
    pub default_file_name: Option<String>,
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub filters: Vec<FileFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDialogOptions {
    pub title: Option<String>,
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub filters: Vec<FileFilter>,
    /// Allow picking more than one file
    #[serde(default)]
    pub multiple: bool,
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Host capabilities available to the UI
///
/// Errors propagate unchanged; callers decide whether a failure becomes a
/// toast or a log line.
pub trait DesktopShell: Send + Sync {
    fn get_app_version(&self) -> impl Future<Output = Result<String, ShellError>> + Send;

    /// `None` when the user cancels
    fn save_file_dialog(
        &self,
        options: SaveDialogOptions,
    ) -> impl Future<Output = Result<Option<PathBuf>, ShellError>> + Send;

    /// Empty when the user cancels
    fn open_file_dialog(
        &self,
        options: OpenDialogOptions,
    ) -> impl Future<Output = Result<Vec<PathBuf>, ShellError>> + Send;

    fn read_text_file(&self, path: &Path)
        -> impl Future<Output = Result<String, ShellError>> + Send;

    fn write_text_file(
        &self,
        path: &Path,
        contents: &str,
    ) -> impl Future<Output = Result<(), ShellError>> + Send;

    fn send_notification(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), ShellError>> + Send;

    fn invoke(
        &self,
        command: &str,
        payload: Value,
    ) -> impl Future<Output = Result<Value, ShellError>> + Send;
}
