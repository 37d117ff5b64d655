//! # ActionForm Component
//!
//! One bordered box per device action: its input fields with value hints,
//! its output field for queries, and a send button.
//!
//! Stateless: everything comes in as props and is drawn as-is.
//!
//! ```text
//! ┌ Switch ──────────────────────────────┐
//! │ Number           [2         ]  1 | 2 │
//! │ State            closed              │
//! │ [ Send ]                             │
//! └──────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::dispatch::registry::{ActionSpec, Inputs};
use crate::tui::component::Component;
use crate::tui::components::focus::Slot;

const LABEL_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 10;

pub struct ActionForm<'a> {
    pub spec: &'static ActionSpec,
    pub inputs: &'a Inputs,
    /// Current text of this form's output field, if it has one.
    pub output: Option<&'a str>,
    pub focus: Slot,
}

impl<'a> ActionForm<'a> {
    /// Rows needed including borders.
    pub fn height(spec: &ActionSpec) -> u16 {
        let rows = spec.inputs().len() + usize::from(spec.is_query()) + 1;
        rows as u16 + 2
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let kind = self.spec.kind;
        let mut lines = Vec::new();

        for field in self.spec.inputs() {
            let focused = self.focus == Slot::Input(kind, field);
            let value_style = if focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{:<LABEL_WIDTH$}", field.label())),
                Span::styled(
                    format!("[{:<VALUE_WIDTH$}]", self.inputs.get(field)),
                    value_style,
                ),
                Span::styled(
                    format!("  {}", field.hint()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        if let (Some(field), Some(value)) = (self.spec.output, self.output) {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<LABEL_WIDTH$}", field.label())),
                Span::styled(
                    value.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        let button_style = if self.focus == Slot::Button(kind) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::from(Span::styled("[ Send ]", button_style)));

        lines
    }
}

impl Component for ActionForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus.form() == self.spec.kind {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(format!(" {} ", self.spec.kind.label()))
            .border_style(border_style);

        frame.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::registry::{ActionKind, InputField};

    #[test]
    fn test_height_counts_rows_and_borders() {
        assert_eq!(ActionForm::height(ActionKind::SetLed.spec()), 5);
        assert_eq!(ActionForm::height(ActionKind::QuerySwitch.spec()), 5);
        assert_eq!(ActionForm::height(ActionKind::SetMotors.spec()), 7);
        assert_eq!(ActionForm::height(ActionKind::Stop.spec()), 3);
        assert_eq!(ActionForm::height(ActionKind::QueryDistance.spec()), 4);
    }

    #[test]
    fn test_lines_show_values_and_output() {
        let inputs = Inputs::new().with(InputField::SwitchNo, "2");
        let form = ActionForm {
            spec: ActionKind::QuerySwitch.spec(),
            inputs: &inputs,
            output: Some("closed"),
            focus: Slot::Button(ActionKind::QuerySwitch),
        };
        let text: Vec<String> = form
            .lines()
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(text.len(), 3);
        assert!(text[0].starts_with("Number"));
        assert!(text[0].contains("[2 "));
        assert!(text[1].contains("closed"));
        assert_eq!(text[2], "[ Send ]");
    }
}
