//! # Action Registry
//!
//! The fixed catalog of device actions. Each entry says which trigger fires
//! it, how the request is shaped, and which output field (if any) the
//! response lands in.
//!
//! ```text
//! trigger id ──► ActionKind ──► ActionSpec ──► DeviceRequest
//!                                  │
//!                                  └──► Option<OutputField>  (query actions only)
//! ```
//!
//! The table is static: entries are never added, changed, or removed at runtime.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::device::{DeviceRequest, Method};

// ============================================================================
// Actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SetLed,
    QuerySwitch,
    Move,
    SetMotors,
    Stop,
    QueryDistance,
}

impl ActionKind {
    /// All actions, in the order the panel lays them out.
    pub const ALL: [ActionKind; 6] = [
        ActionKind::SetLed,
        ActionKind::QuerySwitch,
        ActionKind::Move,
        ActionKind::SetMotors,
        ActionKind::Stop,
        ActionKind::QueryDistance,
    ];

    /// UI event identifier that fires this action.
    pub fn trigger(self) -> &'static str {
        match self {
            ActionKind::SetLed => "ledSubmit",
            ActionKind::QuerySwitch => "switchSubmit",
            ActionKind::Move => "moveSubmit",
            ActionKind::SetMotors => "motorsSubmit",
            ActionKind::Stop => "stopSubmit",
            ActionKind::QueryDistance => "distanceSubmit",
        }
    }

    pub fn from_trigger(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.trigger() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::SetLed => "LED",
            ActionKind::QuerySwitch => "Switch",
            ActionKind::Move => "Move",
            ActionKind::SetMotors => "Motors",
            ActionKind::Stop => "Stop",
            ActionKind::QueryDistance => "Distance",
        }
    }

    pub fn spec(self) -> &'static ActionSpec {
        spec(self)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// UI Fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    LedNo,
    LedState,
    SwitchNo,
    MoveDirection,
    MoveSpeed,
    MoveDuration,
    MotorsLeftDirection,
    MotorsLeftSpeed,
    MotorsRightDirection,
    MotorsRightSpeed,
}

impl InputField {
    pub fn id(self) -> &'static str {
        match self {
            InputField::LedNo => "ledNo",
            InputField::LedState => "ledState",
            InputField::SwitchNo => "switchNo",
            InputField::MoveDirection => "moveDirection",
            InputField::MoveSpeed => "moveSpeed",
            InputField::MoveDuration => "moveDuration",
            InputField::MotorsLeftDirection => "motorsLeftDirection",
            InputField::MotorsLeftSpeed => "motorsLeftSpeed",
            InputField::MotorsRightDirection => "motorsRightDirection",
            InputField::MotorsRightSpeed => "motorsRightSpeed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::LedNo | InputField::SwitchNo => "Number",
            InputField::LedState => "State",
            InputField::MoveDirection => "Direction",
            InputField::MoveSpeed => "Speed",
            InputField::MoveDuration => "Duration",
            InputField::MotorsLeftDirection => "Left direction",
            InputField::MotorsLeftSpeed => "Left speed",
            InputField::MotorsRightDirection => "Right direction",
            InputField::MotorsRightSpeed => "Right speed",
        }
    }

    /// Values the device accepts. Shown next to the field, never enforced here.
    pub fn hint(self) -> &'static str {
        match self {
            InputField::LedNo | InputField::SwitchNo => "1 | 2",
            InputField::LedState => "on | off",
            InputField::MoveDirection => "forward | reverse | left | right",
            InputField::MotorsLeftDirection | InputField::MotorsRightDirection => {
                "forward | reverse"
            }
            InputField::MoveSpeed | InputField::MotorsLeftSpeed | InputField::MotorsRightSpeed => {
                "0..100 %"
            }
            InputField::MoveDuration => "seconds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputField {
    SwitchState,
    DistanceValue,
}

impl OutputField {
    pub fn id(self) -> &'static str {
        match self {
            OutputField::SwitchState => "switchState",
            OutputField::DistanceValue => "distanceValue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputField::SwitchState => "State",
            OutputField::DistanceValue => "Distance",
        }
    }
}

/// Snapshot of the panel's input values.
///
/// A field that was never set reads as the empty string, the same as an
/// untouched text box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    values: HashMap<InputField, String>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: InputField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn with(mut self, field: InputField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn push_char(&mut self, field: InputField, c: char) {
        self.values.entry(field).or_default().push(c);
    }

    pub fn pop_char(&mut self, field: InputField) {
        if let Some(value) = self.values.get_mut(&field) {
            value.pop();
        }
    }
}

// ============================================================================
// Specs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTemplate {
    Fixed(&'static str),
    /// `prefix` followed by the percent-encoded value of `param`.
    Param {
        prefix: &'static str,
        param: InputField,
    },
}

/// One key of a JSON request body and the input it is copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyField {
    pub key: &'static str,
    pub source: InputField,
}

#[derive(Debug)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub method: Method,
    pub path: PathTemplate,
    /// Empty means the request carries no body at all.
    pub body: &'static [BodyField],
    /// Present only for query actions.
    pub output: Option<OutputField>,
}

impl ActionSpec {
    pub fn is_query(&self) -> bool {
        self.output.is_some()
    }

    /// Every input this action reads, path parameter first.
    pub fn inputs(&self) -> Vec<InputField> {
        let mut fields = Vec::with_capacity(self.body.len() + 1);
        if let PathTemplate::Param { param, .. } = self.path {
            fields.push(param);
        }
        fields.extend(self.body.iter().map(|field| field.source));
        fields
    }

    /// Builds the request for this action from a snapshot of the inputs.
    ///
    /// Values are copied verbatim. Numeric-looking fields stay strings,
    /// range checks belong to the device.
    pub fn build_request(&self, inputs: &Inputs) -> DeviceRequest {
        let path = match self.path {
            PathTemplate::Fixed(path) => path.to_string(),
            // Escapes everything but `A-Za-z0-9-_.~`, so `!'()*` are encoded too.
            // The server unquotes the path, so both spellings reach it the same.
            PathTemplate::Param { prefix, param } => {
                format!("{}{}", prefix, urlencoding::encode(inputs.get(param)))
            }
        };

        let body = if self.body.is_empty() {
            None
        } else {
            let map: Map<String, Value> = self
                .body
                .iter()
                .map(|field| {
                    (
                        field.key.to_string(),
                        Value::String(inputs.get(field.source).to_string()),
                    )
                })
                .collect();
            Some(Value::Object(map))
        };

        DeviceRequest {
            kind: self.kind,
            method: self.method,
            path,
            body,
        }
    }
}

pub static REGISTRY: [ActionSpec; 6] = [
    ActionSpec {
        kind: ActionKind::SetLed,
        method: Method::Post,
        path: PathTemplate::Param {
            prefix: "/v1/led/",
            param: InputField::LedNo,
        },
        body: &[BodyField {
            key: "state",
            source: InputField::LedState,
        }],
        output: None,
    },
    ActionSpec {
        kind: ActionKind::QuerySwitch,
        method: Method::Get,
        path: PathTemplate::Param {
            prefix: "/v1/switch/",
            param: InputField::SwitchNo,
        },
        body: &[],
        output: Some(OutputField::SwitchState),
    },
    ActionSpec {
        kind: ActionKind::Move,
        method: Method::Post,
        path: PathTemplate::Fixed("/v1/move"),
        body: &[
            BodyField {
                key: "direction",
                source: InputField::MoveDirection,
            },
            BodyField {
                key: "speed",
                source: InputField::MoveSpeed,
            },
            BodyField {
                key: "duration",
                source: InputField::MoveDuration,
            },
        ],
        output: None,
    },
    ActionSpec {
        kind: ActionKind::SetMotors,
        method: Method::Post,
        path: PathTemplate::Fixed("/v1/motors"),
        body: &[
            BodyField {
                key: "left_direction",
                source: InputField::MotorsLeftDirection,
            },
            BodyField {
                key: "left_speed",
                source: InputField::MotorsLeftSpeed,
            },
            BodyField {
                key: "right_direction",
                source: InputField::MotorsRightDirection,
            },
            BodyField {
                key: "right_speed",
                source: InputField::MotorsRightSpeed,
            },
        ],
        output: None,
    },
    ActionSpec {
        kind: ActionKind::Stop,
        method: Method::Post,
        path: PathTemplate::Fixed("/v1/stop"),
        body: &[],
        output: None,
    },
    ActionSpec {
        kind: ActionKind::QueryDistance,
        method: Method::Get,
        path: PathTemplate::Fixed("/v1/distance"),
        body: &[],
        output: Some(OutputField::DistanceValue),
    },
];

pub fn spec(kind: ActionKind) -> &'static ActionSpec {
    match kind {
        ActionKind::SetLed => &REGISTRY[0],
        ActionKind::QuerySwitch => &REGISTRY[1],
        ActionKind::Move => &REGISTRY[2],
        ActionKind::SetMotors => &REGISTRY[3],
        ActionKind::Stop => &REGISTRY[4],
        ActionKind::QueryDistance => &REGISTRY[5],
    }
}
