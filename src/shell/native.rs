// Native shell for a terminal session
//
// Dialogs go through `rfd` (XDG portal on Linux), file I/O through
// `tokio::fs`. There is no OS notification center here: notifications are
// forwarded over a channel and the gallery shows them as toasts.

use super::{
    CommandRegistry, DesktopShell, Notification, OpenDialogOptions, SaveDialogOptions, ShellError,
};
use crate::config::VERSION;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct NativeShell {
    version: String,
    notifications: mpsc::Sender<Notification>,
    commands: CommandRegistry,
    /// Set while a save dialog is open
    save_dialog_open: Arc<AtomicBool>,
}

impl NativeShell {
    /// Shell reporting this crate's version, with the built-in commands
    pub fn new(notifications: mpsc::Sender<Notification>) -> Self {
        Self::with_version(VERSION, notifications)
    }

    pub fn with_version(version: impl Into<String>, notifications: mpsc::Sender<Notification>) -> Self {
        let version = version.into();
        let save_dialog_open = Arc::new(AtomicBool::new(false));

        let mut commands = CommandRegistry::new();
        let v = version.clone();
        commands.register("get_version", move |_: ()| Ok(v.clone()));
        let flag = save_dialog_open.clone();
        commands.register("open_save_dialog", move |_: ()| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        let flag = save_dialog_open.clone();
        commands.register("close_save_dialog", move |_: ()| {
            flag.store(false, Ordering::SeqCst);
            Ok(())
        });
        let flag = save_dialog_open.clone();
        commands.register("is_save_dialog_open", move |_: ()| {
            Ok(flag.load(Ordering::SeqCst))
        });

        Self {
            version,
            notifications,
            commands,
            save_dialog_open,
        }
    }

    /// Extra commands for `invoke`
    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    pub fn is_save_dialog_open(&self) -> bool {
        self.save_dialog_open.load(Ordering::SeqCst)
    }
}

// `rfd::FileDialog` blocks until the user answers, so it runs on the
// blocking pool like the clipboard write.
fn apply_filters(mut dialog: rfd::FileDialog, filters: &[super::FileFilter]) -> rfd::FileDialog {
    for filter in filters {
        dialog = dialog.add_filter(&filter.name, filter.extensions.as_slice());
    }
    dialog
}

/// Clears the "save dialog open" flag even if the dialog task fails
struct DialogOpenGuard(Arc<AtomicBool>);

impl Drop for DialogOpenGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl DesktopShell for NativeShell {
    async fn get_app_version(&self) -> Result<String, ShellError> {
        Ok(self.version.clone())
    }

    async fn save_file_dialog(
        &self,
        options: SaveDialogOptions,
    ) -> Result<Option<PathBuf>, ShellError> {
        self.save_dialog_open.store(true, Ordering::SeqCst);
        let _guard = DialogOpenGuard(self.save_dialog_open.clone());

        let picked = tokio::task::spawn_blocking(move || {
            let mut dialog = apply_filters(rfd::FileDialog::new(), &options.filters);
            if let Some(title) = &options.title {
                dialog = dialog.set_title(title);
            }
            if let Some(name) = &options.default_file_name {
                dialog = dialog.set_file_name(name);
            }
            if let Some(dir) = &options.directory {
                dialog = dialog.set_directory(dir);
            }
            dialog.save_file()
        })
        .await
        .map_err(|e| ShellError::Dialog(e.to_string()))?;

        tracing::debug!("Save dialog returned {:?}", picked);
        Ok(picked)
    }

    async fn open_file_dialog(&self, options: OpenDialogOptions) -> Result<Vec<PathBuf>, ShellError> {
        let picked = tokio::task::spawn_blocking(move || {
            let mut dialog = apply_filters(rfd::FileDialog::new(), &options.filters);
            if let Some(title) = &options.title {
                dialog = dialog.set_title(title);
            }
            if let Some(dir) = &options.directory {
                dialog = dialog.set_directory(dir);
            }
            if options.multiple {
                dialog.pick_files().unwrap_or_default()
            } else {
                dialog.pick_file().into_iter().collect()
            }
        })
        .await
        .map_err(|e| ShellError::Dialog(e.to_string()))?;

        tracing::debug!("Open dialog returned {} file(s)", picked.len());
        Ok(picked)
    }

    async fn read_text_file(&self, path: &Path) -> Result<String, ShellError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ShellError::Io {
                op: "read",
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write_text_file(&self, path: &Path, contents: &str) -> Result<(), ShellError> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|source| ShellError::Io {
                op: "write",
                path: path.to_path_buf(),
                source,
            })
    }

    async fn send_notification(&self, notification: Notification) -> Result<(), ShellError> {
        tracing::info!("Notification: {} - {}", notification.title, notification.body);
        self.notifications
            .send(notification)
            .await
            .map_err(|_| ShellError::Command {
                command: "send_notification".to_string(),
                message: "notification receiver closed".to_string(),
            })
    }

    async fn invoke(&self, command: &str, payload: Value) -> Result<Value, ShellError> {
        tracing::debug!("Invoking shell command '{}'", command);
        self.commands.invoke(command, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shell() -> (NativeShell, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(8);
        (NativeShell::with_version("1.2.3", tx), rx)
    }

    #[tokio::test]
    async fn test_version_and_builtin_command() {
        let (shell, _rx) = shell();
        assert_eq!(shell.get_app_version().await.unwrap(), "1.2.3");
        assert_eq!(
            shell.invoke("get_version", Value::Null).await.unwrap(),
            json!("1.2.3")
        );
    }

    #[tokio::test]
    async fn test_default_version_is_crate_version() {
        let (tx, _rx) = mpsc::channel(1);
        let shell = NativeShell::new(tx);
        assert_eq!(shell.get_app_version().await.unwrap(), VERSION);
    }

    #[tokio::test]
    async fn test_text_file_roundtrip() {
        let (shell, _rx) = shell();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs.json");

        shell.write_text_file(&path, "[]").await.unwrap();
        assert_eq!(shell.read_text_file(&path).await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let (shell, _rx) = shell();
        let dir = tempfile::tempdir().unwrap();
        let err = shell
            .read_text_file(&dir.path().join("nope.json"))
            .await
            .unwrap_err();
        match err {
            ShellError::Io { op, source, .. } => {
                assert_eq!(op, "read");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_notification_reaches_channel() {
        let (shell, mut rx) = shell();
        let mut notification = Notification::new("Export", "Saved 3 configs");
        notification.icon = Some("✓".to_string());
        shell.send_notification(notification.clone()).await.unwrap();
        assert_eq!(rx.recv().await, Some(notification));
    }

    #[tokio::test]
    async fn test_notification_with_closed_receiver_fails() {
        let (shell, rx) = shell();
        drop(rx);
        let err = shell
            .send_notification(Notification::new("t", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShellError::Command { .. }));
    }

    #[tokio::test]
    async fn test_save_dialog_state_commands() {
        let (shell, _rx) = shell();
        shell.invoke("open_save_dialog", Value::Null).await.unwrap();
        assert!(shell.is_save_dialog_open());
        assert_eq!(
            shell.invoke("is_save_dialog_open", Value::Null).await.unwrap(),
            json!(true)
        );
        shell.invoke("close_save_dialog", Value::Null).await.unwrap();
        assert!(!shell.is_save_dialog_open());
    }

    #[tokio::test]
    async fn test_custom_command_and_unknown() {
        let (mut shell, _rx) = shell();
        shell
            .commands_mut()
            .register("double", |n: u32| Ok(n * 2));
        assert_eq!(shell.invoke("double", json!(21)).await.unwrap(), json!(42));
        assert!(matches!(
            shell.invoke("explode", Value::Null).await,
            Err(ShellError::UnknownCommand(_))
        ));
    }
}
