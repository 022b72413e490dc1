//! Dismissal of the topmost overlay on user interaction.
//!
//! The coordinator only ever looks at `current()` and calls `remove_with`,
//! so lower overlays are never touched. Overlays opt in through
//! [`OverlayOptions::dismiss_on_interaction`](crate::store::OverlayOptions).

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::store::{OverlayStore, Resolution};

/// Kinds of input that can dismiss an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    PointerDown,
    TouchStart,
    KeyDown,
    Wheel,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 4] = [
        InteractionKind::PointerDown,
        InteractionKind::TouchStart,
        InteractionKind::KeyDown,
        InteractionKind::Wheel,
    ];
}

/// A single global input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerDown,
    TouchStart,
    /// Key press, by key name (`"Escape"`, `"Enter"`, `"a"`).
    KeyDown(String),
    Wheel,
}

impl InteractionEvent {
    pub fn key(name: impl Into<String>) -> Self {
        InteractionEvent::KeyDown(name.into())
    }

    pub fn kind(&self) -> InteractionKind {
        match self {
            InteractionEvent::PointerDown => InteractionKind::PointerDown,
            InteractionEvent::TouchStart => InteractionKind::TouchStart,
            InteractionEvent::KeyDown(_) => InteractionKind::KeyDown,
            InteractionEvent::Wheel => InteractionKind::Wheel,
        }
    }

    /// Map a terminal event. Key releases and repeats are ignored.
    pub fn from_crossterm(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(InteractionEvent::KeyDown(key_name(key.code)))
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => Some(InteractionEvent::PointerDown),
                MouseEventKind::ScrollDown
                | MouseEventKind::ScrollUp
                | MouseEventKind::ScrollLeft
                | MouseEventKind::ScrollRight => Some(InteractionEvent::Wheel),
                _ => None,
            },
            _ => None,
        }
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{:?}", other),
    }
}

/// Which interactions count as a dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "default_events")]
    pub events: Vec<InteractionKind>,
    /// Key names that dismiss; other key presses are ignored.
    #[serde(default = "default_dismiss_keys")]
    pub dismiss_keys: Vec<String>,
}

fn default_events() -> Vec<InteractionKind> {
    InteractionKind::ALL.to_vec()
}

fn default_dismiss_keys() -> Vec<String> {
    vec!["Escape".to_string()]
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            events: default_events(),
            dismiss_keys: default_dismiss_keys(),
        }
    }
}

impl InteractionConfig {
    pub fn accepts(&self, event: &InteractionEvent) -> bool {
        if !self.events.contains(&event.kind()) {
            return false;
        }
        match event {
            InteractionEvent::KeyDown(name) => self
                .dismiss_keys
                .iter()
                .any(|key| key.eq_ignore_ascii_case(name)),
            _ => true,
        }
    }
}

/// Removes the topmost overlay when a qualifying interaction arrives.
pub struct InteractionDismiss<C, V> {
    store: OverlayStore<C, V>,
    config: InteractionConfig,
}

impl<C, V> InteractionDismiss<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    pub fn new(store: OverlayStore<C, V>, config: InteractionConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Returns `true` if the event dismissed an overlay.
    pub fn handle(&self, event: &InteractionEvent) -> bool {
        if !self.config.accepts(event) {
            return false;
        }
        let Some(current) = self.store.current() else {
            return false;
        };
        if !current.options().dismiss_on_interaction {
            return false;
        }

        tracing::debug!(key = current.key(), event = ?event.kind(), "Dismissing overlay on interaction");
        self.store
            .remove_with(current.key(), Resolution::Dismissed)
    }

    /// Drain `events` on a tokio task until every sender is gone.
    pub fn spawn(self, mut events: mpsc::Receiver<InteractionEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                self.handle(&event);
            }
            tracing::debug!("Interaction source closed");
        })
    }
}
