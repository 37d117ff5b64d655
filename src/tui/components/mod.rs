//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: device address, probe result, status message
//! - `ActionForm`: one device action's inputs, output and send button
//! - `NoticeModal`: blocking error overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `FocusRing`: which slot has focus; turns keys into core actions
//!
//! Components receive external data as props rather than reaching into
//! `Panel` themselves.

pub mod action_form;
pub mod focus;
pub mod notice;
mod title_bar;

pub use action_form::ActionForm;
pub use focus::FocusRing;
pub use notice::NoticeModal;
pub use title_bar::TitleBar;
