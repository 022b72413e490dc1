use std::time::Duration;

/// Caller-supplied configuration for a single overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayOptions {
    /// Auto-dismiss delay. `None` or a zero duration disables the timer.
    pub duration: Option<Duration>,
    /// Close on a qualifying user interaction while this overlay is topmost.
    pub dismiss_on_interaction: bool,
}

impl OverlayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_duration_ms(self, millis: u64) -> Self {
        self.with_duration(Duration::from_millis(millis))
    }

    pub fn dismiss_on_interaction(mut self, enabled: bool) -> Self {
        self.dismiss_on_interaction = enabled;
        self
    }

    /// Delay after which the overlay times out, if auto-dismiss is enabled.
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        self.duration.filter(|duration| !duration.is_zero())
    }
}
