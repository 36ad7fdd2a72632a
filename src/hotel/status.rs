use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::equipment::{Corridor, CorridorType, EquipmentKind, SwitchState};

use super::topology::Hotel;

/// Equipment states of one corridor, keyed by kind name.
pub type CorridorStatus = IndexMap<String, SwitchState>;

/// Corridor states of one floor, keyed `<type>Corridor_<n>`.
pub type FloorStatus = IndexMap<String, CorridorStatus>;

/// Snapshot of every equipment state, keyed `floor_<n>`.
///
/// Iteration order is floor ascending, then the main group before the sub
/// group, then position ascending. Serializes as the nested mapping
/// `floor_<n>` -> `<type>Corridor_<k>` -> `light`/`ac` -> `"ON"`/`"OFF"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EquipmentStatus(IndexMap<String, FloorStatus>);

impl EquipmentStatus {
    pub fn floor_key(floor: usize) -> String {
        format!("floor_{floor}")
    }

    pub fn corridor_key(corridor_type: CorridorType, position: usize) -> String {
        format!("{corridor_type}Corridor_{position}")
    }

    /// State of one piece of equipment, addressed by 1-based numbers.
    pub fn get(
        &self,
        floor: usize,
        corridor_type: CorridorType,
        position: usize,
        kind: EquipmentKind,
    ) -> Option<SwitchState> {
        self.0
            .get(&Self::floor_key(floor))?
            .get(&Self::corridor_key(corridor_type, position))?
            .get(kind.name())
            .copied()
    }

    pub fn floor(&self, floor: usize) -> Option<&FloorStatus> {
        self.0.get(&Self::floor_key(floor))
    }

    pub fn floors(&self) -> impl Iterator<Item = (&String, &FloorStatus)> {
        self.0.iter()
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (floor_key, corridors) in &self.0 {
            writeln!(f, "{floor_key}")?;
            for (corridor_key, equipment) in corridors {
                write!(f, "  {corridor_key:<16}")?;
                for (kind, state) in equipment {
                    write!(f, " {kind}: {state:<3}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Hotel {
    /// Read-only snapshot of every equipment's on/off state.
    pub fn equipment_status(&self) -> EquipmentStatus {
        let mut floors = IndexMap::with_capacity(self.floor_count());
        for (i, floor) in self.floors().iter().enumerate() {
            let mut corridors = FloorStatus::with_capacity(floor.corridors().len());
            for corridor_type in [CorridorType::Main, CorridorType::Sub] {
                add_corridor_group(&mut corridors, corridor_type, floor.corridors_of(corridor_type));
            }
            floors.insert(EquipmentStatus::floor_key(i + 1), corridors);
        }
        EquipmentStatus(floors)
    }
}

fn add_corridor_group(out: &mut FloorStatus, corridor_type: CorridorType, group: &[Corridor]) {
    for (i, corridor) in group.iter().enumerate() {
        let equipment = corridor
            .equipment()
            .iter()
            .map(|e| (e.kind().name().to_string(), e.state()))
            .collect();
        out.insert(EquipmentStatus::corridor_key(corridor_type, i + 1), equipment);
    }
}
