//! Controllable loads and the corridors that own them.

/// A corridor holding exactly one light and one air-conditioner.
pub mod corridor;
pub mod types;

pub use corridor::Corridor;
pub use types::{CorridorType, Equipment, EquipmentKind, Load, SwitchState};
