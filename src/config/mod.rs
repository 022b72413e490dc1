//! Configuration for overlay defaults, interaction dismissal and layout.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, ModalConfig, SurfaceConfig, ToastConfig};
