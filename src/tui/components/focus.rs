//! # Focus Ring
//!
//! Tracks which input or button on the panel has keyboard focus and turns
//! key presses into core actions for it.
//!
//! Slots follow the on-screen order: left column top to bottom, then the
//! right column. Each form contributes its inputs followed by its button.

use crate::core::action::Action;
use crate::dispatch::registry::{ActionKind, InputField};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Forms per column, top to bottom.
pub const COLUMNS: [&[ActionKind]; 2] = [
    &[
        ActionKind::SetLed,
        ActionKind::QuerySwitch,
        ActionKind::QueryDistance,
    ],
    &[ActionKind::Move, ActionKind::SetMotors, ActionKind::Stop],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Input(ActionKind, InputField),
    Button(ActionKind),
}

impl Slot {
    pub fn form(self) -> ActionKind {
        match self {
            Slot::Input(kind, _) | Slot::Button(kind) => kind,
        }
    }
}

pub struct FocusRing {
    slots: Vec<Slot>,
    index: usize,
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRing {
    pub fn new() -> Self {
        let slots = COLUMNS
            .iter()
            .flat_map(|column| column.iter().copied())
            .flat_map(|kind| {
                kind.spec()
                    .inputs()
                    .into_iter()
                    .map(move |field| Slot::Input(kind, field))
                    .chain(std::iter::once(Slot::Button(kind)))
            })
            .collect();
        Self { slots, index: 0 }
    }

    pub fn current(&self) -> Slot {
        self.slots[self.index]
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.slots.len();
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.slots.len() - 1) % self.slots.len();
    }
}

impl EventHandler for FocusRing {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        let slot = self.current();
        match event {
            TuiEvent::FocusNext => {
                self.next();
                None
            }
            TuiEvent::FocusPrev => {
                self.prev();
                None
            }
            // Enter anywhere in a form submits that form.
            TuiEvent::Submit => Some(Action::Submit(slot.form())),
            TuiEvent::InputChar(c) => match slot {
                Slot::Input(_, field) => Some(Action::InputChar(field, *c)),
                Slot::Button(kind) if *c == ' ' => Some(Action::Submit(kind)),
                Slot::Button(_) => None,
            },
            TuiEvent::Paste(text) => match slot {
                Slot::Input(_, field) => Some(Action::Paste(field, text.clone())),
                Slot::Button(_) => None,
            },
            TuiEvent::Backspace => match slot {
                Slot::Input(_, field) => Some(Action::Backspace(field)),
                Slot::Button(_) => None,
            },
            TuiEvent::ForceQuit | TuiEvent::Escape | TuiEvent::Resize => None,
        }
    }
}
