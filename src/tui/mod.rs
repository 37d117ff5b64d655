//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the panel,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data Flow
//!
//! ```text
//!  keys ──► FocusRing ──► Action ──► update() ──► Effect::Dispatch ──► Dispatcher::fire
//!                                      ▲                                     │
//!                                      └──────── mpsc::Receiver ◄── ChannelSurface
//! ```
//!
//! The dispatcher's sinks post `Action`s back over one channel. Its FIFO
//! order guarantees a query's pending marker is applied before its result.
//! The loop only redraws after input or a background action.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Panel;
use crate::device::HttpTransport;
use crate::dispatch::registry::OutputField;
use crate::dispatch::{Dispatcher, FailureSink, OutputSink};
use crate::tui::component::EventHandler;
use crate::tui::components::FocusRing;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core state)
pub struct TuiState {
    pub focus: FocusRing,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: FocusRing::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatcher sinks that hand results to the event loop.
struct ChannelSurface {
    tx: mpsc::Sender<Action>,
}

impl OutputSink for ChannelSurface {
    fn set_output(&self, field: OutputField, value: String) {
        if self.tx.send(Action::OutputChanged(field, value)).is_err() {
            warn!("Dropped {} update: event loop gone", field.id());
        }
    }
}

impl FailureSink for ChannelSurface {
    fn notify(&self, message: String) {
        if self.tx.send(Action::Notify(message)).is_err() {
            warn!("Dropped notification: event loop gone");
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Applies an action and performs its effect. Returns true to quit.
fn apply(panel: &mut Panel, dispatcher: &Dispatcher, action: Action) -> bool {
    match update(panel, action) {
        Effect::Dispatch(kind) => {
            // Detached: the result comes back through the channel.
            let _ = dispatcher.fire(kind, &panel.inputs);
            false
        }
        Effect::Quit => true,
        Effect::None => false,
    }
}

fn spawn_probe(transport: Arc<HttpTransport>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let result = transport.ping().await;
        match &result {
            Ok(reply) => info!("Device probe: {:?}", reply),
            Err(e) => warn!("Device probe failed: {}", e),
        }
        if tx
            .send(Action::DeviceProbed(result.map_err(|e| e.to_string())))
            .is_err()
        {
            warn!("Failed to deliver probe result: receiver dropped");
        }
    });
}

/// Runs the control panel until the user quits. Must be called from within
/// a tokio runtime.
pub fn run(config: &ResolvedConfig) -> std::io::Result<()> {
    let transport = Arc::new(HttpTransport::new(config.base_url.clone()));
    let mut panel = Panel::new(transport.base_url().to_string());
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let surface = Arc::new(ChannelSurface { tx: tx.clone() });
    let dispatcher = Dispatcher::new(transport.clone(), surface.clone(), surface);

    spawn_probe(transport, tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    info!("Control panel started for {}", panel.base_url);

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &panel, &tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(100));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::ForceQuit => break 'main,
                TuiEvent::Resize => continue,
                // A notice blocks the panel until acknowledged
                TuiEvent::Submit | TuiEvent::Escape if panel.active_notice().is_some() => {
                    apply(&mut panel, &dispatcher, Action::DismissNotice);
                }
                _ if panel.active_notice().is_some() => {}
                TuiEvent::Escape => {
                    if apply(&mut panel, &dispatcher, Action::Quit) {
                        break 'main;
                    }
                }
                _ => {
                    if let Some(action) = tui.focus.handle_event(&event)
                        && apply(&mut panel, &dispatcher, action)
                    {
                        break 'main;
                    }
                }
            }
        }

        // Handle background task actions (outputs, notices, probe)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            log::debug!("Event loop received: {:?}", action);
            if apply(&mut panel, &dispatcher, action) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    info!("Control panel closed");
    Ok(())
}
