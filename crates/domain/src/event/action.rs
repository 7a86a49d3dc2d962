//! Action — a command executed when an event fires.
//!
//! Actions are plain data, not callables: the engine interprets them against
//! its ports, executing a fired event's actions in order with per-action
//! failure isolation.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceKind, DeviceStatus};
use crate::room::RoomKind;

/// A command executed when an event fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventAction {
    /// Push an alert to the visualization collaborator.
    ///
    /// With `room: None` the alert targets the room of the reading that
    /// fired the trigger (the usual shape for built-in emergencies).
    RaiseAlert {
        room: Option<RoomKind>,
        message: String,
    },
    /// Clear alerts for one room, or everywhere when `room` is `None`.
    ClearAlerts { room: Option<RoomKind> },
    /// Change the run status of every device of a kind.
    SetDeviceStatus {
        device_kind: DeviceKind,
        status: DeviceStatus,
    },
    /// Emit a log line only.
    Log { message: String },
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RaiseAlert {
                room: Some(room),
                message,
            } => write!(f, "raise_alert({room}: {message})"),
            Self::RaiseAlert {
                room: None,
                message,
            } => write!(f, "raise_alert({message})"),
            Self::ClearAlerts { room: Some(room) } => write!(f, "clear_alerts({room})"),
            Self::ClearAlerts { room: None } => f.write_str("clear_alerts(all)"),
            Self::SetDeviceStatus {
                device_kind,
                status,
            } => write!(f, "set_device_status({device_kind} -> {status})"),
            Self::Log { message } => write!(f, "log({message})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_actions_through_serde_json() {
        let actions = vec![
            EventAction::RaiseAlert {
                room: Some(RoomKind::Kitchen),
                message: "Smoke detected".to_string(),
            },
            EventAction::RaiseAlert {
                room: None,
                message: "CO above threshold".to_string(),
            },
            EventAction::ClearAlerts { room: None },
            EventAction::SetDeviceStatus {
                device_kind: DeviceKind::LightControl,
                status: DeviceStatus::Running,
            },
            EventAction::Log {
                message: "tick".to_string(),
            },
        ];
        for action in &actions {
            let json = serde_json::to_string(action).unwrap();
            let parsed: EventAction = serde_json::from_str(&json).unwrap();
            assert_eq!(&parsed, action);
        }
    }

    #[test]
    fn should_display_action_variants() {
        let action = EventAction::RaiseAlert {
            room: Some(RoomKind::Kitchen),
            message: "Smoke detected".to_string(),
        };
        assert_eq!(action.to_string(), "raise_alert(Kitchen: Smoke detected)");
        assert_eq!(
            EventAction::ClearAlerts { room: None }.to_string(),
            "clear_alerts(all)"
        );
    }
}
