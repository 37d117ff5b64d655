use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::Panel;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::focus::COLUMNS;
use crate::tui::components::{ActionForm, NoticeModal, TitleBar};

const HELP: &str = " Tab/↑↓ move  Enter send  Esc quit ";

pub fn draw_ui(frame: &mut Frame, panel: &Panel, tui: &TuiState) {
    use Constraint::{Length, Min};
    let area = frame.area();
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);

    TitleBar {
        base_url: &panel.base_url,
        device: &panel.device,
        status_message: &panel.status_message,
    }
    .render(frame, title_area);

    let columns: [Rect; 2] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(main_area);

    for (kinds, column_area) in COLUMNS.iter().zip(columns) {
        let constraints: Vec<Constraint> = kinds
            .iter()
            .map(|kind| Length(ActionForm::height(kind.spec())))
            .chain(std::iter::once(Min(0)))
            .collect();
        let rows = Layout::vertical(constraints).split(column_area);

        for (kind, row) in kinds.iter().zip(rows.iter()) {
            let spec = kind.spec();
            ActionForm {
                spec,
                inputs: &panel.inputs,
                output: spec.output.map(|field| panel.output(field)),
                focus: tui.focus.current(),
            }
            .render(frame, *row);
        }
    }

    frame.render_widget(
        Span::styled(HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(message) = panel.active_notice() {
        NoticeModal {
            message,
            queued: panel.notices.len().saturating_sub(1),
        }
        .render(frame, area);
    }
}
