//! # Actions
//!
//! Everything that can happen on the panel becomes an `Action`.
//! User types into a field? That's `Action::InputChar(field, c)`.
//! A query comes back? That's `Action::OutputChanged(field, value)`.
//!
//! The `update()` function applies an action to the panel and returns an
//! `Effect` telling the caller what I/O to perform. No I/O happens here.
//!
//! ```text
//! Panel + Action  →  update()  →  Panel' + Effect
//! ```
//!
//! Results from in-flight requests arrive as actions over the same channel,
//! so a query's pending marker is always applied before its value.

use log::debug;

use crate::core::state::{DeviceStatus, Panel};
use crate::dispatch::registry::{ActionKind, InputField, OutputField};
use crate::device::PingReply;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    InputChar(InputField, char),
    Paste(InputField, String),
    Backspace(InputField),
    /// User submitted the form of this action.
    Submit(ActionKind),
    /// Written by the dispatcher: pending marker or query result.
    OutputChanged(OutputField, String),
    /// Blocking notification raised by the dispatcher.
    Notify(String),
    DismissNotice,
    DeviceProbed(Result<PingReply, String>),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hand this action to the dispatcher along with the current inputs.
    Dispatch(ActionKind),
    Quit,
}

pub fn update(panel: &mut Panel, action: Action) -> Effect {
    match action {
        Action::InputChar(field, c) => {
            panel.inputs.push_char(field, c);
            Effect::None
        }
        Action::Paste(field, text) => {
            // Input boxes are single line.
            for c in text.chars().filter(|c| !c.is_control()) {
                panel.inputs.push_char(field, c);
            }
            Effect::None
        }
        Action::Backspace(field) => {
            panel.inputs.pop_char(field);
            Effect::None
        }
        Action::Submit(kind) => {
            if panel.active_notice().is_some() {
                debug!("Submit of {} ignored while a notice is open", kind);
                return Effect::None;
            }
            panel.status_message = format!("Sent {}", kind.label());
            Effect::Dispatch(kind)
        }
        Action::OutputChanged(field, value) => {
            panel.outputs.insert(field, value);
            Effect::None
        }
        Action::Notify(message) => {
            panel.notices.push_back(message);
            Effect::None
        }
        Action::DismissNotice => {
            panel.notices.pop_front();
            Effect::None
        }
        Action::DeviceProbed(result) => {
            panel.device = match result {
                Ok(reply) => DeviceStatus::Online {
                    v1: reply.supports_v1(),
                    server: reply.server,
                },
                Err(e) => DeviceStatus::Unreachable(e),
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_panel;

    #[test]
    fn test_typing_edits_only_that_field() {
        let mut panel = test_panel();
        update(&mut panel, Action::InputChar(InputField::LedNo, '1'));
        update(&mut panel, Action::InputChar(InputField::LedNo, '2'));
        update(&mut panel, Action::Backspace(InputField::LedNo));
        update(&mut panel, Action::Paste(InputField::LedState, "on\n".to_string()));

        assert_eq!(panel.inputs.get(InputField::LedNo), "1");
        assert_eq!(panel.inputs.get(InputField::LedState), "on");
        assert_eq!(panel.inputs.get(InputField::SwitchNo), "");
    }

    #[test]
    fn test_submit_requests_dispatch() {
        let mut panel = test_panel();
        let effect = update(&mut panel, Action::Submit(ActionKind::Stop));
        assert_eq!(effect, Effect::Dispatch(ActionKind::Stop));
        assert_eq!(panel.status_message, "Sent Stop");
    }

    #[test]
    fn test_submit_ignored_while_notice_open() {
        let mut panel = test_panel();
        update(&mut panel, Action::Notify("Error: HTTP 404 Not Found".to_string()));

        let effect = update(&mut panel, Action::Submit(ActionKind::Move));
        assert_eq!(effect, Effect::None);

        update(&mut panel, Action::DismissNotice);
        let effect = update(&mut panel, Action::Submit(ActionKind::Move));
        assert_eq!(effect, Effect::Dispatch(ActionKind::Move));
    }

    #[test]
    fn test_notices_queue_in_order() {
        let mut panel = test_panel();
        update(&mut panel, Action::Notify("Error: first".to_string()));
        update(&mut panel, Action::Notify("Error: second".to_string()));

        assert_eq!(panel.active_notice(), Some("Error: first"));
        update(&mut panel, Action::DismissNotice);
        assert_eq!(panel.active_notice(), Some("Error: second"));
        update(&mut panel, Action::DismissNotice);
        assert_eq!(panel.active_notice(), None);
        // Dismissing with nothing open is harmless.
        update(&mut panel, Action::DismissNotice);
    }

    #[test]
    fn test_output_changes_are_per_field() {
        let mut panel = test_panel();
        update(&mut panel, Action::OutputChanged(OutputField::SwitchState, "?".to_string()));
        update(&mut panel, Action::OutputChanged(OutputField::DistanceValue, "?".to_string()));
        update(
            &mut panel,
            Action::OutputChanged(OutputField::DistanceValue, "12.5".to_string()),
        );

        assert_eq!(panel.output(OutputField::SwitchState), "?");
        assert_eq!(panel.output(OutputField::DistanceValue), "12.5");
    }

    #[test]
    fn test_device_probe_result() {
        let mut panel = test_panel();
        update(
            &mut panel,
            Action::DeviceProbed(Ok(PingReply {
                server: "rrb".to_string(),
                v1: Some("supported".to_string()),
            })),
        );
        assert_eq!(
            panel.device,
            DeviceStatus::Online {
                server: "rrb".to_string(),
                v1: true
            }
        );

        update(&mut panel, Action::DeviceProbed(Err("connection refused".to_string())));
        assert_eq!(
            panel.device,
            DeviceStatus::Unreachable("connection refused".to_string())
        );
    }

    #[test]
    fn test_quit() {
        let mut panel = test_panel();
        assert_eq!(update(&mut panel, Action::Quit), Effect::Quit);
    }
}
