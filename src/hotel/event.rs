use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equipment::CorridorType;

/// A motion sensor reading, already parsed into floor and corridor numbers.
///
/// `floor` is 1-based; `corridor` is the 1-based position within the
/// `corridor_type` group on that floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub motion: bool,
    pub floor: usize,
    pub corridor: usize,
    pub corridor_type: CorridorType,
}

impl MotionEvent {
    /// Motion detected in the given corridor.
    pub fn detected(floor: usize, corridor_type: CorridorType, corridor: usize) -> Self {
        Self {
            motion: true,
            floor,
            corridor,
            corridor_type,
        }
    }

    /// No motion observed in the given corridor.
    pub fn cleared(floor: usize, corridor_type: CorridorType, corridor: usize) -> Self {
        Self {
            motion: false,
            floor,
            corridor,
            corridor_type,
        }
    }
}

impl fmt::Display for MotionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = if self.motion { "motion" } else { "no motion" };
        write!(
            f,
            "{what} at floor {}, {} corridor {}",
            self.floor, self.corridor_type, self.corridor
        )
    }
}
