//! Shared fixtures for integration tests.

#![allow(dead_code)]

use hotel_automation::config::{HotelConfig, PowerTable};
use hotel_automation::equipment::{CorridorType, EquipmentKind, SwitchState};
use hotel_automation::hotel::{EquipmentStatus, Hotel, OptimizationType};

/// Hotel with the default power table and control policy.
pub fn hotel(floors: i64, main: i64, sub: i64) -> Hotel {
    hotel_with(floors, main, sub, OptimizationType::None)
}

/// Hotel with the default power table and the given optimization.
pub fn hotel_with(floors: i64, main: i64, sub: i64, optimization: OptimizationType) -> Hotel {
    let layout = HotelConfig::new(floors, main, sub).with_optimization(optimization);
    Hotel::new(&layout, PowerTable::default()).expect("fixture layout should be valid")
}

/// The two-floor, one-main, two-sub reference hotel.
pub fn reference_hotel() -> Hotel {
    hotel(2, 1, 2)
}

/// `(light, ac)` states of one corridor in a snapshot.
pub fn corridor_states(
    status: &EquipmentStatus,
    floor: usize,
    corridor_type: CorridorType,
    position: usize,
) -> (Option<SwitchState>, Option<SwitchState>) {
    (
        status.get(floor, corridor_type, position, EquipmentKind::Light),
        status.get(floor, corridor_type, position, EquipmentKind::Ac),
    )
}

pub const ON_ON: (Option<SwitchState>, Option<SwitchState>) =
    (Some(SwitchState::On), Some(SwitchState::On));
pub const OFF_ON: (Option<SwitchState>, Option<SwitchState>) =
    (Some(SwitchState::Off), Some(SwitchState::On));
pub const OFF_OFF: (Option<SwitchState>, Option<SwitchState>) =
    (Some(SwitchState::Off), Some(SwitchState::Off));
