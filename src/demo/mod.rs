//! Interactive terminal demo of the overlay stack.

mod events;
mod terminal_guard;
mod views;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use overlaystack::config::Config;
use overlaystack::{
    InteractionDismiss, InteractionEvent, OverlayOptions, OverlayStore, OverlaySurface, Overlays,
    Pending, Resolution,
};
use std::time::Duration;

use events::{AppEvent, EventHandler};
use terminal_guard::setup_terminal;
use views::{draw_background, DemoOverlay};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct Demo {
    overlays: Overlays<DemoOverlay, bool>,
    config: Config,
    toasts: u32,
    should_quit: bool,
}

impl Demo {
    fn on_event(&mut self, dismiss: &InteractionDismiss<DemoOverlay, bool>, event: &Event) {
        if let Some(interaction) = InteractionEvent::from_crossterm(event) {
            if dismiss.handle(&interaction) {
                return;
            }
        }

        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press || self.answer_confirm(key.code) {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('m') => self.open_modal(),
            KeyCode::Char('c') => self.open_confirm(),
            KeyCode::Char('t') => {
                self.toasts += 1;
                self.open_toast(format!("Toast #{}", self.toasts));
            }
            KeyCode::Char('p') => {
                self.overlays.close();
            }
            KeyCode::Char('x') => {
                self.overlays.clear();
            }
            _ => {}
        }
    }

    /// y/n answer the topmost overlay if it is a confirmation.
    fn answer_confirm(&self, code: KeyCode) -> bool {
        let Some(top) = self.overlays.store().current() else {
            return false;
        };
        if !top.component().is_confirm() {
            return false;
        }
        match code {
            KeyCode::Char('y') => top.resolve(true),
            KeyCode::Char('n') => top.resolve(false),
            _ => false,
        }
    }

    fn open_modal(&self) {
        let modal = DemoOverlay::modal(
            "Overlay stack",
            "Overlays stack in the order they were opened.\nOnly the topmost one reacts to input.",
            &self.config.surface,
        );
        let pending = self.overlays.open(modal, self.config.modal.options());
        self.report("Modal", pending);
    }

    fn open_confirm(&self) {
        let confirm = DemoOverlay::confirm("Apply the pending changes?", &self.config.surface);
        let pending = self.overlays.open(confirm, OverlayOptions::new());
        self.report("Confirm", pending);
    }

    fn open_toast(&self, message: String) {
        let _ = self
            .overlays
            .open(DemoOverlay::toast(message), self.config.toast.options());
    }

    /// Show how an overlay ended as a toast once it settles.
    fn report(&self, label: &'static str, pending: Pending<bool>) {
        let overlays = self.overlays.clone();
        let options = self.config.toast.options();
        tokio::spawn(async move {
            let message = match pending.await {
                Ok(Resolution::Value(true)) => format!("{}: confirmed", label),
                Ok(Resolution::Value(false)) => format!("{}: declined", label),
                Ok(Resolution::Cleared) => return,
                Ok(other) => format!("{}: {}", label, other),
                Err(err) => err.to_string(),
            };
            let _ = overlays.open(DemoOverlay::toast(message), options);
        });
    }
}

pub async fn run(config: Config) -> Result<()> {
    let (mut terminal, _guard) = setup_terminal().context("failed to set up terminal")?;

    let store: OverlayStore<DemoOverlay, bool> = OverlayStore::new();
    let surface = OverlaySurface::new(store.clone());
    let dismiss = InteractionDismiss::new(store.clone(), config.interaction.clone());

    let mut events = EventHandler::new(POLL_INTERVAL);
    let redraw = events.sender();
    let _redraw_subscription = store.subscribe(move || {
        // A full queue already holds a pending redraw.
        let _ = redraw.try_send(AppEvent::Redraw);
    });

    let mut demo = Demo {
        overlays: Overlays::new(store.clone()),
        config,
        toasts: 0,
        should_quit: false,
    };

    let mut force_redraw = true;
    loop {
        if surface.take_dirty() || force_redraw {
            let stack = store.all();
            terminal
                .draw(|frame| {
                    draw_background(frame, &stack);
                    surface.draw(frame);
                })
                .context("failed to draw frame")?;
            force_redraw = false;
        }

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            AppEvent::Redraw => {}
            AppEvent::Terminal(Event::Resize(..)) => force_redraw = true,
            AppEvent::Terminal(event) => demo.on_event(&dismiss, &event),
        }

        if demo.should_quit {
            break;
        }
    }

    // Settles anything still open so report tasks finish quietly.
    store.reset();
    tracing::info!("Demo exited");
    Ok(())
}
