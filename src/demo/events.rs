use crossterm::event::{self, Event};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

pub enum AppEvent {
    Terminal(Event),
    /// The overlay stack changed; repaint.
    Redraw,
}

/// Reads terminal input on a dedicated thread and forwards it to the runtime.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(poll_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let event_tx = tx.clone();

        thread::spawn(move || loop {
            // Receiver gone: the app has exited.
            if event_tx.is_closed() {
                break;
            }

            match event::poll(poll_interval) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if event_tx.blocking_send(AppEvent::Terminal(event)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "Failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(error = %err, "Failed to poll terminal");
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}
