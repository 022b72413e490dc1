use serde::{Deserialize, Serialize};

use crate::interaction::InteractionConfig;
use crate::store::OverlayOptions;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub toast: ToastConfig,
    #[serde(default)]
    pub modal: ModalConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
}

/// Defaults for short-lived notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    /// Auto-dismiss delay in milliseconds; 0 keeps toasts until closed (default: 3000).
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
    /// Close toasts on any qualifying interaction (default: true).
    #[serde(default = "default_true")]
    pub dismiss_on_interaction: bool,
}

/// Defaults for modal dialogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalConfig {
    /// Close modals on interaction (default: false).
    #[serde(default)]
    pub dismiss_on_interaction: bool,
}

/// Size of centered overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Width as a percentage of the screen (default: 60).
    #[serde(default = "default_width_percent")]
    pub width_percent: u16,
    /// Height in rows (default: 7).
    #[serde(default = "default_height")]
    pub height: u16,
}

fn default_toast_duration_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_width_percent() -> u16 {
    60
}

fn default_height() -> u16 {
    7
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
            dismiss_on_interaction: true,
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width_percent: default_width_percent(),
            height: default_height(),
        }
    }
}

impl ToastConfig {
    pub fn options(&self) -> OverlayOptions {
        OverlayOptions::new()
            .with_duration_ms(self.duration_ms)
            .dismiss_on_interaction(self.dismiss_on_interaction)
    }
}

impl ModalConfig {
    pub fn options(&self) -> OverlayOptions {
        OverlayOptions::new().dismiss_on_interaction(self.dismiss_on_interaction)
    }
}
