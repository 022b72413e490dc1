//! Terminal rendering surface for the overlay stack.
//!
//! The surface never decides what is on the stack; it re-reads `all()`
//! whenever the store reports a change and paints entries bottom first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Clear;
use ratatui::Frame;

use crate::store::{OverlayOptions, OverlayStore, Resolver, Subscription};

/// Properties handed to a component when it is painted.
pub struct OverlayProps<'a, C, V> {
    pub key: &'a str,
    pub resolver: &'a Resolver<C, V>,
    pub options: &'a OverlayOptions,
    /// Only the topmost overlay receives input.
    pub topmost: bool,
}

/// A component that knows how to paint itself as an overlay.
pub trait OverlayView<V>: Sized {
    /// Where on `screen` the overlay goes. Centered by default.
    fn area(&self, screen: Rect) -> Rect {
        centered_rect(60, 7, screen)
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, props: &OverlayProps<'_, Self, V>);
}

/// Paints a store's overlays and tracks whether a redraw is due.
pub struct OverlaySurface<C, V> {
    store: OverlayStore<C, V>,
    dirty: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl<C, V> OverlaySurface<C, V>
where
    C: OverlayView<V> + Send + Sync + 'static,
    V: Send + 'static,
{
    pub fn new(store: OverlayStore<C, V>) -> Self {
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        let subscription = store.subscribe(move || flag.store(true, Ordering::Release));
        Self {
            store,
            dirty,
            _subscription: subscription,
        }
    }

    /// Returns whether the stack changed since the last call, and resets it.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let screen = frame.area();
        let stack = self.store.all();
        let depth = stack.len();

        for (index, entry) in stack.iter().enumerate() {
            let component = entry.component();
            let area = component.area(screen).intersection(screen);
            if area.is_empty() {
                continue;
            }

            frame.render_widget(Clear, area);
            let props = OverlayProps {
                key: entry.key(),
                resolver: entry.resolver(),
                options: entry.options(),
                topmost: index + 1 == depth,
            };
            component.render(frame, area, &props);
        }
    }
}

/// A rect `width_percent` wide and `height` rows tall, centered in `area`.
pub fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width_percent = width_percent.min(100);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::widgets::Paragraph;
    use ratatui::Terminal;

    struct Label(&'static str);

    impl OverlayView<()> for Label {
        fn area(&self, screen: Rect) -> Rect {
            centered_rect(50, 1, screen)
        }

        fn render(&self, frame: &mut Frame<'_>, area: Rect, props: &OverlayProps<'_, Self, ()>) {
            let text = if props.topmost {
                format!("{}*", self.0)
            } else {
                self.0.to_string()
            };
            frame.render_widget(Paragraph::new(text), area);
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 20);
        let rect = centered_rect(60, 6, area);
        assert_eq!(rect.height, 6);
        assert_eq!(rect.y, 7);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.x, 20);
    }

    #[test]
    fn centered_rect_clamps_height() {
        let area = Rect::new(0, 0, 40, 4);
        let rect = centered_rect(50, 10, area);
        assert!(rect.height <= 4);
    }

    #[test]
    fn surface_tracks_changes_and_paints_topmost() {
        let store: OverlayStore<Label, ()> = OverlayStore::new();
        let surface = OverlaySurface::new(store.clone());
        assert!(surface.take_dirty());
        assert!(!surface.take_dirty());

        let _first = store.push("hello", Label("hello"), OverlayOptions::default());
        assert!(surface.take_dirty());

        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal.draw(|frame| surface.draw(frame)).unwrap();
        assert!(screen_text(&terminal).contains("hello*"));

        store.clear();
        assert!(surface.take_dirty());
        terminal.draw(|frame| surface.draw(frame)).unwrap();
        assert!(!screen_text(&terminal).contains("hello"));
    }
}
