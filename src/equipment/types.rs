//! Common types and traits for equipment and corridor modelling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PowerTable;

/// Kind of electrical load installed in a corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    Light,
    Ac,
}

impl EquipmentKind {
    /// All kinds, in the order a corridor stores them.
    pub const ALL: [EquipmentKind; 2] = [EquipmentKind::Light, EquipmentKind::Ac];

    /// Key used in status reports (`"light"` / `"ac"`).
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentKind::Light => "light",
            EquipmentKind::Ac => "ac",
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Corridor classification.
///
/// Equipment in a `Sub` corridor is motion-controlled; equipment in a `Main`
/// corridor is never touched by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorridorType {
    Main,
    Sub,
}

impl CorridorType {
    /// Lowercase name used in status keys and event scripts.
    pub fn name(&self) -> &'static str {
        match self {
            CorridorType::Main => "main",
            CorridorType::Sub => "sub",
        }
    }

    /// Whether equipment built into this corridor type is motion-controlled.
    pub fn is_controlled(&self) -> bool {
        matches!(self, CorridorType::Sub)
    }
}

impl fmt::Display for CorridorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reported on/off state of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchState {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { SwitchState::On } else { SwitchState::Off }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchState::On => f.pad("ON"),
            SwitchState::Off => f.pad("OFF"),
        }
    }
}

/// Anything that draws power measured in consumption units.
///
/// Implemented at every level of the topology so accounting can sum a single
/// piece of equipment, a corridor, or a whole floor the same way.
pub trait Load {
    /// Units currently drawn. Equipment that is off draws nothing.
    fn units_drawn(&self) -> u32;
}

/// A single controllable load unit.
///
/// `kind`, `controlled` and `units_consumed` are fixed when the owning
/// corridor is built; only the on/off state changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    kind: EquipmentKind,
    controlled: bool,
    on: bool,
    units_consumed: u32,
}

impl Equipment {
    /// Builds equipment of `kind` for a corridor of `corridor_type`.
    ///
    /// The initial state is the table's default for `(kind, corridor_type)`,
    /// and the unit is controlled only when it lives in a sub corridor.
    pub fn new(kind: EquipmentKind, corridor_type: CorridorType, table: &PowerTable) -> Self {
        Self {
            kind,
            controlled: corridor_type.is_controlled(),
            on: table.default_on(kind, corridor_type),
            units_consumed: table.units(kind),
        }
    }

    pub fn kind(&self) -> EquipmentKind {
        self.kind
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Units drawn while switched on.
    pub fn units_consumed(&self) -> u32 {
        self.units_consumed
    }

    pub fn state(&self) -> SwitchState {
        SwitchState::from(self.on)
    }

    /// Sets the on/off state, returning `true` if it changed.
    pub(crate) fn set_on(&mut self, on: bool) -> bool {
        let changed = self.on != on;
        self.on = on;
        changed
    }
}

impl Load for Equipment {
    fn units_drawn(&self) -> u32 {
        if self.on { self.units_consumed } else { 0 }
    }
}
