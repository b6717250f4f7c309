//! Clipboard and component defaults
//!
//! Everything a component would otherwise hardcode lives here, so the gallery
//! builds every `*Props` from configuration.

use serde::Deserialize;
use std::time::Duration;

use crate::clipboard::{
    IndicatorProps, LabelVisibility, TriggerProps, TriggerShape, TriggerSize, TriggerVariant,
};
use crate::tui::components::{
    AccordionProps, NumericInputProps, PinInputProps, ProgressBarProps, SkeletonProps,
};

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// Default "Copied" window in milliseconds
pub const DEFAULT_RESET_MS: u64 = 1500;

/// Clipboard feedback settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardConfig {
    /// How long the copied state lasts after a successful copy
    pub reset_ms: u64,
    /// Default label visibility for copy indicators
    pub label_visibility: LabelVisibility,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            reset_ms: DEFAULT_RESET_MS,
            label_visibility: LabelVisibility::Visible,
        }
    }
}

/// Clipboard settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileClipboard {
    pub reset_ms: Option<u64>,
    pub label_visibility: Option<LabelVisibility>,
}

impl ClipboardConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileClipboard>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            reset_ms: file.reset_ms.unwrap_or(defaults.reset_ms),
            label_visibility: file.label_visibility.unwrap_or(defaults.label_visibility),
        }
    }

    pub fn reset_after(&self) -> Duration {
        Duration::from_millis(self.reset_ms)
    }

    /// Indicator props with the configured visibility
    pub fn indicator_props(&self) -> IndicatorProps {
        IndicatorProps {
            visibility: self.label_visibility,
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Components
// ─────────────────────────────────────────────────────────────────────────────

/// Defaults handed to component constructors
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefaults {
    /// Copy trigger padding
    pub trigger_size: TriggerSize,
    /// Copy trigger fill style
    pub trigger_variant: TriggerVariant,
    /// Allow several accordion sections open at once
    pub accordion_multiple: bool,
    /// Pin input cell count
    pub pin_length: usize,
    /// Pin input visual grouping
    pub pin_groups: Vec<usize>,
    /// Hide typed pin characters
    pub pin_mask: bool,
    /// Numeric input step
    pub numeric_step: f64,
    /// Numeric input decimal places
    pub numeric_precision: usize,
    /// Placeholder rows per skeleton
    pub skeleton_rows: u16,
    /// Striped progress bars
    pub progress_striped: bool,
    /// Hover card width in columns
    pub hover_card_width: u16,
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self {
            trigger_size: TriggerSize::Sm,
            trigger_variant: TriggerVariant::Outline,
            accordion_multiple: false,
            pin_length: 6,
            pin_groups: vec![3, 3],
            pin_mask: false,
            numeric_step: 1.0,
            numeric_precision: 0,
            skeleton_rows: 3,
            progress_striped: true,
            hover_card_width: 32,
        }
    }
}

/// Component defaults as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileComponents {
    pub trigger_size: Option<TriggerSize>,
    pub trigger_variant: Option<TriggerVariant>,
    pub accordion_multiple: Option<bool>,
    pub pin_length: Option<usize>,
    pub pin_groups: Option<Vec<usize>>,
    pub pin_mask: Option<bool>,
    pub numeric_step: Option<f64>,
    pub numeric_precision: Option<usize>,
    pub skeleton_rows: Option<u16>,
    pub progress_striped: Option<bool>,
    pub hover_card_width: Option<u16>,
}

impl ComponentDefaults {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileComponents>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            trigger_size: file.trigger_size.unwrap_or(defaults.trigger_size),
            trigger_variant: file.trigger_variant.unwrap_or(defaults.trigger_variant),
            accordion_multiple: file
                .accordion_multiple
                .unwrap_or(defaults.accordion_multiple),
            // Zero-length pins are meaningless
            pin_length: file
                .pin_length
                .filter(|&n| n > 0)
                .unwrap_or(defaults.pin_length),
            pin_groups: file.pin_groups.unwrap_or(defaults.pin_groups),
            pin_mask: file.pin_mask.unwrap_or(defaults.pin_mask),
            numeric_step: file
                .numeric_step
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(defaults.numeric_step),
            numeric_precision: file
                .numeric_precision
                .unwrap_or(defaults.numeric_precision),
            skeleton_rows: file.skeleton_rows.unwrap_or(defaults.skeleton_rows),
            progress_striped: file.progress_striped.unwrap_or(defaults.progress_striped),
            hover_card_width: file.hover_card_width.unwrap_or(defaults.hover_card_width),
        }
    }

    pub fn trigger_props(&self, shape: TriggerShape) -> TriggerProps {
        TriggerProps {
            shape,
            size: self.trigger_size,
            variant: self.trigger_variant,
            ..Default::default()
        }
    }

    pub fn accordion_props(&self) -> AccordionProps {
        AccordionProps {
            multiple: self.accordion_multiple,
            ..Default::default()
        }
    }

    pub fn pin_props(&self) -> PinInputProps {
        PinInputProps {
            length: self.pin_length,
            groups: self.pin_groups.clone(),
            mask: self.pin_mask,
            ..Default::default()
        }
    }

    pub fn numeric_props(&self) -> NumericInputProps {
        NumericInputProps {
            step: self.numeric_step,
            precision: self.numeric_precision,
            ..Default::default()
        }
    }

    pub fn skeleton_props(&self) -> SkeletonProps {
        SkeletonProps {
            rows: self.skeleton_rows,
            ..Default::default()
        }
    }

    pub fn progress_props(&self) -> ProgressBarProps {
        ProgressBarProps {
            striped: self.progress_striped,
            ..Default::default()
        }
    }
}
