//! Typed response contracts for the two query actions.
//!
//! A body that does not decode into its contract is a `RequestFailed::Parse`,
//! so a missing or mistyped field never reaches an output field.

use serde::Deserialize;

use crate::device::RequestFailed;
use crate::dispatch::registry::OutputField;

/// `GET /v1/switch/{n}` → `{"state": "open" | "closed"}`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwitchReading {
    pub state: String,
}

/// `GET /v1/distance` → `{"distance": <number>}`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DistanceReading {
    pub distance: f64,
}

/// Decodes `body` with the contract belonging to `field` and returns the
/// text to show in that field.
pub fn read_output(field: OutputField, body: &str) -> Result<String, RequestFailed> {
    match field {
        OutputField::SwitchState => serde_json::from_str::<SwitchReading>(body)
            .map(|reading| reading.state)
            .map_err(|e| RequestFailed::Parse(e.to_string())),
        OutputField::DistanceValue => serde_json::from_str::<DistanceReading>(body)
            .map(|reading| reading.distance.to_string())
            .map_err(|e| RequestFailed::Parse(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_state_extracted() {
        let value = read_output(OutputField::SwitchState, r#"{"state": "closed"}"#).unwrap();
        assert_eq!(value, "closed");
    }

    #[test]
    fn test_distance_formats_like_a_number() {
        assert_eq!(
            read_output(OutputField::DistanceValue, r#"{"distance": 23.5}"#).unwrap(),
            "23.5"
        );
        assert_eq!(
            read_output(OutputField::DistanceValue, r#"{"distance": 40}"#).unwrap(),
            "40"
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let value = read_output(
            OutputField::SwitchState,
            r#"{"state": "open", "switch": 1}"#,
        )
        .unwrap();
        assert_eq!(value, "open");
    }

    #[test]
    fn test_missing_field_is_parse_failure() {
        let err = read_output(OutputField::SwitchState, "{}").unwrap_err();
        assert!(matches!(err, RequestFailed::Parse(_)));
    }

    #[test]
    fn test_wrong_type_is_parse_failure() {
        let err = read_output(OutputField::DistanceValue, r#"{"distance": "far"}"#).unwrap_err();
        assert!(matches!(err, RequestFailed::Parse(_)));

        let err = read_output(OutputField::SwitchState, r#"{"state": 1}"#).unwrap_err();
        assert!(matches!(err, RequestFailed::Parse(_)));
    }

    #[test]
    fn test_non_json_body_is_parse_failure() {
        let err = read_output(OutputField::DistanceValue, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, RequestFailed::Parse(_)));
    }
}
