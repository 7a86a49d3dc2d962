//! Room kinds — the fixed set of simulated rooms.

use serde::{Deserialize, Serialize};

/// The rooms a simulated home is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    LivingRoom,
    Kitchen,
    Bedroom,
    Bathroom,
    Office,
    Garage,
}

impl RoomKind {
    /// All room kinds, in floor-plan order.
    pub const ALL: [Self; 6] = [
        Self::LivingRoom,
        Self::Kitchen,
        Self::Bedroom,
        Self::Bathroom,
        Self::Office,
        Self::Garage,
    ];

    /// Human-readable label for UI collaborators.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::LivingRoom => "Living Room",
            Self::Kitchen => "Kitchen",
            Self::Bedroom => "Bedroom",
            Self::Bathroom => "Bathroom",
            Self::Office => "Office",
            Self::Garage => "Garage",
        }
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
