//! # TitleBar Component
//!
//! Single-line header: device address, probe result, and the last status
//! message. Purely presentational.
//!
//! ```text
//! RRB3 Control  http://robot:8080 (rrb, v1) | Sent Move
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::DeviceStatus;
use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub base_url: &'a str,
    pub device: &'a DeviceStatus,
    pub status_message: &'a str,
}

impl TitleBar<'_> {
    fn device_span(&self) -> Span<'static> {
        match self.device {
            DeviceStatus::Probing => {
                Span::styled(" (probing…)", Style::default().fg(Color::DarkGray))
            }
            DeviceStatus::Online { server, v1: true } => {
                Span::styled(format!(" ({server}, v1)"), Style::default().fg(Color::Green))
            }
            DeviceStatus::Online { server, v1: false } => Span::styled(
                format!(" ({server}, no v1 API)"),
                Style::default().fg(Color::Yellow),
            ),
            DeviceStatus::Unreachable(_) => {
                Span::styled(" (unreachable)", Style::default().fg(Color::Red))
            }
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("RRB3 Control  ", Style::default().fg(Color::Cyan)),
            Span::raw(self.base_url.to_string()),
            self.device_span(),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
