//! Configuration for the component gallery
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/kftray-ui/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod components;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use components::{ClipboardConfig, ComponentDefaults, FileClipboard, FileComponents};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name, used for the config directory and log file prefix
pub const APP_NAME: &str = "kftray-ui";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Palette name: "auto" or "mocha"
    pub theme: String,

    /// Clipboard feedback settings
    pub clipboard: ClipboardConfig,

    /// Defaults handed to component constructors
    pub components: ComponentDefaults,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "auto".to_string(),
            clipboard: ClipboardConfig::default(),
            components: ComponentDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,

    /// Optional [clipboard] section
    pub clipboard: Option<FileClipboard>,

    /// Optional [components] section
    pub components: Option<FileComponents>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Why the config file could not be used
#[derive(Debug)]
pub(crate) enum FileConfigError {
    Read(std::io::Error),
    Parse(toml::de::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/kftray-ui/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_NAME).join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }
        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse a config file; a missing file yields defaults
    pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig, FileConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(FileConfigError::Parse),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(FileConfigError::Read(e)),
        }
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed. A
    /// broken config fails fast instead of silently falling back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match Self::read_file_config(&path) {
            Ok(config) => config,
            Err(FileConfigError::Parse(e)) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                eprintln!("  Tip: Check for:\n");
                eprintln!("    - Missing quotes around string values");
                eprintln!("    - Unknown variant names (e.g. size = \"sm\", variant = \"outline\")");
                eprintln!("    - Typos in section names\n");
                eprintln!("  To reset, run `{APP_NAME} config --reset`.\n");
                std::process::exit(1);
            }
            Err(FileConfigError::Read(e)) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Theme: env > file > default
        let theme = env("KFTRAY_UI_THEME")
            .or(file.theme)
            .unwrap_or_else(|| "auto".to_string());

        // Reset window: env > file > default; unparseable env values are ignored
        let mut clipboard = ClipboardConfig::from_file(file.clipboard);
        if let Some(ms) = env("KFTRAY_UI_COPY_RESET_MS").and_then(|v| v.trim().parse().ok()) {
            clipboard.reset_ms = ms;
        }

        let components = ComponentDefaults::from_file(file.components);

        // Log directory: env > file > default
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(dir) = env("KFTRAY_UI_LOG_DIR") {
            logging.file_dir = PathBuf::from(dir);
        }

        Self {
            theme,
            clipboard,
            components,
            logging,
        }
    }

    /// How long "Copied" stays visible
    pub fn copy_reset_after(&self) -> Duration {
        self.clipboard.reset_after()
    }
}
