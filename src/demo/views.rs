use overlaystack::config::SurfaceConfig;
use overlaystack::surface::centered_rect;
use overlaystack::{Keyed, OverlayProps, OverlayStack, OverlayView};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const POPUP_BORDER: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
const INACTIVE_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
const HEADER_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
const HINT_TEXT: Color = Color::Rgb(0x6b, 0x72, 0x80);
const TOAST_BORDER: Color = Color::Rgb(0x22, 0xc5, 0x5e);

const CONFIRM_HEIGHT: u16 = 5;

/// The overlays the demo knows how to show.
pub enum DemoOverlay {
    Modal {
        title: String,
        body: String,
        width_percent: u16,
        height: u16,
    },
    Confirm {
        question: String,
        width_percent: u16,
    },
    Toast {
        message: String,
    },
}

impl DemoOverlay {
    pub fn modal(title: impl Into<String>, body: impl Into<String>, surface: &SurfaceConfig) -> Self {
        DemoOverlay::Modal {
            title: title.into(),
            body: body.into(),
            width_percent: surface.width_percent,
            height: surface.height,
        }
    }

    pub fn confirm(question: impl Into<String>, surface: &SurfaceConfig) -> Self {
        DemoOverlay::Confirm {
            question: question.into(),
            width_percent: surface.width_percent,
        }
    }

    pub fn toast(message: impl Into<String>) -> Self {
        DemoOverlay::Toast {
            message: message.into(),
        }
    }

    pub fn is_confirm(&self) -> bool {
        matches!(self, DemoOverlay::Confirm { .. })
    }
}

impl Keyed for DemoOverlay {
    fn overlay_key(&self) -> Option<&str> {
        match self {
            DemoOverlay::Modal { .. } => Some("modal"),
            DemoOverlay::Confirm { .. } => Some("confirm"),
            DemoOverlay::Toast { .. } => None,
        }
    }
}

impl OverlayView<bool> for DemoOverlay {
    fn area(&self, screen: Rect) -> Rect {
        match self {
            DemoOverlay::Modal {
                width_percent,
                height,
                ..
            } => centered_rect(*width_percent, *height, screen),
            DemoOverlay::Confirm { width_percent, .. } => {
                centered_rect(*width_percent, CONFIRM_HEIGHT, screen)
            }
            DemoOverlay::Toast { message } => toast_rect(message, screen),
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, props: &OverlayProps<'_, Self, bool>) {
        let (title, border, mut lines) = match self {
            DemoOverlay::Modal { title, body, .. } => (
                title.as_str(),
                POPUP_BORDER,
                body.lines().map(Line::from).collect::<Vec<_>>(),
            ),
            DemoOverlay::Confirm { question, .. } => {
                ("Confirm", POPUP_BORDER, vec![Line::from(question.as_str())])
            }
            DemoOverlay::Toast { message } => {
                ("", TOAST_BORDER, vec![Line::from(message.as_str())])
            }
        };

        if let Some(hint) = hint(self, props) {
            lines.push(Line::styled(hint, Style::default().fg(HINT_TEXT)));
        }

        let border = if props.topmost { border } else { INACTIVE_BORDER };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        if !title.is_empty() {
            block = block
                .title(format!(" {} ", title))
                .title_alignment(Alignment::Center);
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(HEADER_TEXT))
                .wrap(Wrap { trim: true }),
            inner,
        );
    }
}

fn hint(overlay: &DemoOverlay, props: &OverlayProps<'_, DemoOverlay, bool>) -> Option<&'static str> {
    if !props.topmost {
        return None;
    }
    match overlay {
        DemoOverlay::Confirm { .. } => Some("[y] yes   [n] no"),
        DemoOverlay::Modal { .. } if props.options.dismiss_on_interaction => {
            Some("Esc or click to dismiss, p to close")
        }
        DemoOverlay::Modal { .. } => Some("p to close"),
        DemoOverlay::Toast { .. } => None,
    }
}

/// Bottom-right corner, sized to the message.
fn toast_rect(message: &str, screen: Rect) -> Rect {
    let width = (message.chars().count() as u16)
        .saturating_add(4)
        .min(screen.width);
    let height = 3.min(screen.height);
    Rect {
        x: screen.right().saturating_sub(width + 1).max(screen.x),
        y: screen.bottom().saturating_sub(height + 1).max(screen.y),
        width,
        height,
    }
}

pub fn draw_background(frame: &mut Frame<'_>, stack: &OverlayStack<DemoOverlay, bool>) {
    let keys = stack.keys().collect::<Vec<_>>();
    let lines = vec![
        Line::from("m modal   c confirm   t toast   p pop   x clear   q quit"),
        Line::from(""),
        Line::from(format!("Stack ({}): {}", stack.len(), keys.join(" > "))),
    ];

    let block = Block::default()
        .title(" overlaystack ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(INACTIVE_BORDER));
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(HINT_TEXT))
            .block(block),
        frame.area(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_rect_hugs_bottom_right() {
        let screen = Rect::new(0, 0, 80, 24);
        let rect = toast_rect("Saved", screen);
        assert_eq!(rect.width, 9);
        assert_eq!(rect.height, 3);
        assert_eq!(rect.right(), 79);
        assert_eq!(rect.bottom(), 23);
    }

    #[test]
    fn toast_rect_fits_tiny_screens() {
        let screen = Rect::new(0, 0, 6, 2);
        let rect = toast_rect("a long message", screen);
        assert!(rect.width <= 6);
        assert!(rect.height <= 2);
    }

    #[test]
    fn keyed_overlays_use_fixed_keys() {
        let surface = SurfaceConfig::default();
        assert_eq!(DemoOverlay::modal("t", "b", &surface).overlay_key(), Some("modal"));
        assert_eq!(DemoOverlay::confirm("q", &surface).overlay_key(), Some("confirm"));
        assert_eq!(DemoOverlay::toast("hi").overlay_key(), None);
        assert!(DemoOverlay::confirm("q", &surface).is_confirm());
    }
}
