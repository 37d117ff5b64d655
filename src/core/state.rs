//! # Panel State
//!
//! Everything the control panel shows, independent of how it is drawn.
//!
//! ```text
//! Panel
//! ├── inputs: Inputs                        // text typed into each input field
//! ├── outputs: HashMap<OutputField, String> // last value written per output field
//! ├── notices: VecDeque<String>             // blocking notifications, oldest first
//! ├── status_message: String                // title bar text
//! └── device: DeviceStatus                  // result of the startup probe
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::{HashMap, VecDeque};

use crate::dispatch::registry::{Inputs, OutputField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceStatus {
    Probing,
    Online { server: String, v1: bool },
    Unreachable(String),
}

pub struct Panel {
    pub inputs: Inputs,
    pub outputs: HashMap<OutputField, String>,
    pub notices: VecDeque<String>,
    pub status_message: String,
    pub device: DeviceStatus,
    pub base_url: String,
}

impl Panel {
    pub fn new(base_url: String) -> Self {
        Self {
            inputs: Inputs::new(),
            outputs: HashMap::new(),
            notices: VecDeque::new(),
            status_message: String::from("Ready"),
            device: DeviceStatus::Probing,
            base_url,
        }
    }

    /// Current text of an output field; empty until something was written.
    pub fn output(&self, field: OutputField) -> &str {
        self.outputs.get(&field).map(String::as_str).unwrap_or("")
    }

    /// The notification currently blocking the panel, if any.
    pub fn active_notice(&self) -> Option<&str> {
        self.notices.front().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_new_defaults() {
        let panel = Panel::new("http://localhost:8080".to_string());
        assert_eq!(panel.output(OutputField::SwitchState), "");
        assert_eq!(panel.output(OutputField::DistanceValue), "");
        assert!(panel.active_notice().is_none());
        assert_eq!(panel.device, DeviceStatus::Probing);
        assert_eq!(panel.status_message, "Ready");
    }
}
