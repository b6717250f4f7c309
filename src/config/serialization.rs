//! Config serialization to TOML
//!
//! Single source of truth for the config file format. The template written
//! on first run and `config --reset` both come from here.

use super::Config;

impl Config {
    /// Serialize config to a commented TOML document
    pub fn to_toml(&self) -> String {
        let c = &self.components;
        format!(
            r#"# kftray-ui configuration

# Palette: auto (terminal ANSI colors), mocha (Catppuccin Mocha, true color)
theme = "{theme}"

# Copy-to-clipboard feedback
[clipboard]
# How long the "Copied" state stays visible, in milliseconds
reset_ms = {reset_ms}
# visible, icon_only, screen_reader_only
label_visibility = "{label_visibility}"

# Defaults passed to component constructors
[components]
trigger_size = "{trigger_size}"        # xs, sm, md, lg
trigger_variant = "{trigger_variant}"  # solid, outline, ghost, subtle
accordion_multiple = {accordion_multiple}
pin_length = {pin_length}
pin_groups = {pin_groups:?}
pin_mask = {pin_mask}
numeric_step = {numeric_step:?}
numeric_precision = {numeric_precision}
skeleton_rows = {skeleton_rows}
progress_striped = {progress_striped}
hover_card_width = {hover_card_width}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (JSON lines, in addition to the TUI log strip)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            theme = self.theme,
            reset_ms = self.clipboard.reset_ms,
            label_visibility = self.clipboard.label_visibility.as_str(),
            trigger_size = c.trigger_size.as_str(),
            trigger_variant = c.trigger_variant.as_str(),
            accordion_multiple = c.accordion_multiple,
            pin_length = c.pin_length,
            pin_groups = c.pin_groups,
            pin_mask = c.pin_mask,
            numeric_step = c.numeric_step,
            numeric_precision = c.numeric_precision,
            skeleton_rows = c.skeleton_rows,
            progress_striped = c.progress_striped,
            hover_card_width = c.hover_card_width,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
