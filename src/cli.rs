//! # One-shot Commands
//!
//! Each subcommand fires a single action through the same dispatcher the
//! panel uses, waits for it, and reports on the console:
//! output values on stdout, notifications on stderr.

use std::collections::HashSet;
use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Subcommand;
use log::{info, warn};

use crate::device::{HttpTransport, Transport};
use crate::dispatch::registry::{ActionKind, InputField, Inputs, OutputField};
use crate::dispatch::{Dispatcher, FailureSink, OutputSink};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive control panel (default)
    Panel,
    /// Set an LED: `led 1 on`
    Led { led_no: String, state: String },
    /// Read a switch: `switch 2`
    Switch { switch_no: String },
    /// Drive for a while: `move forward 50 1.5`
    Move {
        direction: String,
        #[arg(allow_hyphen_values = true)]
        speed: String,
        #[arg(allow_hyphen_values = true)]
        duration: String,
    },
    /// Set both motors: `motors forward 40 reverse 40`
    Motors {
        left_direction: String,
        #[arg(allow_hyphen_values = true)]
        left_speed: String,
        right_direction: String,
        #[arg(allow_hyphen_values = true)]
        right_speed: String,
    },
    /// Stop both motors
    Stop,
    /// Read the ultrasonic distance sensor
    Distance,
    /// Check that the server is up and speaks the v1 API
    Ping,
}

impl Command {
    /// The dispatcher action and inputs this command stands for.
    /// `None` for commands that are not device actions.
    pub fn as_action(&self) -> Option<(ActionKind, Inputs)> {
        let action = match self {
            Command::Panel | Command::Ping => return None,
            Command::Led { led_no, state } => (
                ActionKind::SetLed,
                Inputs::new()
                    .with(InputField::LedNo, led_no)
                    .with(InputField::LedState, state),
            ),
            Command::Switch { switch_no } => (
                ActionKind::QuerySwitch,
                Inputs::new().with(InputField::SwitchNo, switch_no),
            ),
            Command::Move {
                direction,
                speed,
                duration,
            } => (
                ActionKind::Move,
                Inputs::new()
                    .with(InputField::MoveDirection, direction)
                    .with(InputField::MoveSpeed, speed)
                    .with(InputField::MoveDuration, duration),
            ),
            Command::Motors {
                left_direction,
                left_speed,
                right_direction,
                right_speed,
            } => (
                ActionKind::SetMotors,
                Inputs::new()
                    .with(InputField::MotorsLeftDirection, left_direction)
                    .with(InputField::MotorsLeftSpeed, left_speed)
                    .with(InputField::MotorsRightDirection, right_direction)
                    .with(InputField::MotorsRightSpeed, right_speed),
            ),
            Command::Stop => (ActionKind::Stop, Inputs::new()),
            Command::Distance => (ActionKind::QueryDistance, Inputs::new()),
        };
        Some(action)
    }
}

/// Console rendition of the panel's output fields and notifications.
#[derive(Default)]
pub struct ConsoleSurface {
    failed: AtomicBool,
    /// Fields whose pending marker has already been written.
    pending_seen: Mutex<HashSet<OutputField>>,
}

impl ConsoleSurface {
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    /// The line to print for an output write, if any.
    ///
    /// The dispatcher's first write to a query field is always the pending
    /// marker, which only means something on a live panel. Later writes are
    /// device values and print as-is, even when they read `?`.
    fn line_for(&self, field: OutputField, value: &str) -> Option<String> {
        let mut seen = self
            .pending_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if seen.insert(field) {
            return None;
        }
        Some(format!("{}: {}", field.id(), value))
    }
}

impl OutputSink for ConsoleSurface {
    fn set_output(&self, field: OutputField, value: String) {
        if let Some(line) = self.line_for(field, &value) {
            println!("{line}");
        }
    }
}

impl FailureSink for ConsoleSurface {
    fn notify(&self, message: String) {
        self.failed.store(true, Ordering::SeqCst);
        eprintln!("{message}");
    }
}

/// Fires one action and waits for its outcome.
pub async fn run_action(
    transport: Arc<dyn Transport>,
    kind: ActionKind,
    inputs: &Inputs,
) -> ExitCode {
    let surface = Arc::new(ConsoleSurface::default());
    let dispatcher = Dispatcher::new(transport, surface.clone(), surface.clone());

    if let Err(e) = dispatcher.fire(kind, inputs).await {
        warn!("{} task did not complete: {}", kind, e);
        return ExitCode::FAILURE;
    }

    if surface.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Probes `/ping`, then confirms the v1 routes answer when advertised.
pub async fn run_ping(transport: &HttpTransport) -> ExitCode {
    let reply = match transport.ping().await {
        Ok(reply) => reply,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("Ping {}: {:?}", transport.base_url(), reply);

    if !reply.supports_v1() {
        println!("{} at {} (v1 not supported)", reply.server, transport.base_url());
        return ExitCode::FAILURE;
    }

    match transport.ping_v1().await {
        Ok(server) => {
            println!("{} at {} (v1 supported)", server, transport.base_url());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: v1 advertised but /v1/ping failed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RequestFailed;
    use crate::test_support::ScriptedTransport;

    #[test]
    fn test_commands_map_to_actions() {
        let (kind, inputs) = Command::Led {
            led_no: "1".to_string(),
            state: "on".to_string(),
        }
        .as_action()
        .unwrap();
        assert_eq!(kind, ActionKind::SetLed);
        assert_eq!(inputs.get(InputField::LedNo), "1");
        assert_eq!(inputs.get(InputField::LedState), "on");

        let (kind, inputs) = Command::Motors {
            left_direction: "forward".to_string(),
            left_speed: "10".to_string(),
            right_direction: "reverse".to_string(),
            right_speed: "20".to_string(),
        }
        .as_action()
        .unwrap();
        assert_eq!(kind, ActionKind::SetMotors);
        assert_eq!(inputs.get(InputField::MotorsRightSpeed), "20");

        assert_eq!(Command::Stop.as_action().unwrap().0, ActionKind::Stop);
        assert_eq!(
            Command::Distance.as_action().unwrap().0,
            ActionKind::QueryDistance
        );
        assert!(Command::Panel.as_action().is_none());
        assert!(Command::Ping.as_action().is_none());
    }

    #[test]
    fn test_console_surface_skips_only_the_pending_write() {
        let surface = ConsoleSurface::default();
        assert_eq!(surface.line_for(OutputField::SwitchState, "?"), None);
        // A device that reports "?" still gets printed.
        assert_eq!(
            surface.line_for(OutputField::SwitchState, "?"),
            Some("switchState: ?".to_string())
        );
        assert_eq!(surface.line_for(OutputField::DistanceValue, "?"), None);
        assert_eq!(
            surface.line_for(OutputField::DistanceValue, "12.5"),
            Some("distanceValue: 12.5".to_string())
        );
    }

    #[test]
    fn test_console_surface_tracks_failure() {
        let surface = ConsoleSurface::default();
        surface.set_output(OutputField::SwitchState, "?".to_string());
        assert!(!surface.failed());
        surface.notify("Error: HTTP 400 Bad Request".to_string());
        assert!(surface.failed());
    }

    #[tokio::test]
    async fn test_run_action_exit_codes() {
        let ok = Arc::new(ScriptedTransport::new());
        assert_eq!(
            run_action(ok, ActionKind::Stop, &Inputs::new()).await,
            ExitCode::SUCCESS
        );

        let failing = Arc::new(ScriptedTransport::new().respond(
            ActionKind::Stop,
            Err(RequestFailed::Network("connection refused".to_string())),
        ));
        assert_eq!(
            run_action(failing, ActionKind::Stop, &Inputs::new()).await,
            ExitCode::FAILURE
        );
    }
}
