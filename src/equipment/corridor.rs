use crate::config::PowerTable;

use super::types::{CorridorType, Equipment, EquipmentKind, Load};

/// A corridor owning exactly one light and one air-conditioner.
///
/// The composition and the corridor type never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    corridor_type: CorridorType,
    light: Equipment,
    ac: Equipment,
}

impl Corridor {
    /// Builds a corridor with its equipment at the table's defaults.
    pub fn new(corridor_type: CorridorType, table: &PowerTable) -> Self {
        Self {
            corridor_type,
            light: Equipment::new(EquipmentKind::Light, corridor_type, table),
            ac: Equipment::new(EquipmentKind::Ac, corridor_type, table),
        }
    }

    pub fn corridor_type(&self) -> CorridorType {
        self.corridor_type
    }

    pub fn light(&self) -> &Equipment {
        &self.light
    }

    pub fn ac(&self) -> &Equipment {
        &self.ac
    }

    /// Equipment in storage order: light, then ac.
    pub fn equipment(&self) -> [&Equipment; 2] {
        [&self.light, &self.ac]
    }

    pub(crate) fn equipment_mut(&mut self) -> [&mut Equipment; 2] {
        [&mut self.light, &mut self.ac]
    }
}

impl Load for Corridor {
    fn units_drawn(&self) -> u32 {
        self.equipment().iter().map(|e| e.units_drawn()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_corridor_draws_light_and_ac() {
        let corridor = Corridor::new(CorridorType::Main, &PowerTable::default());
        assert_eq!(corridor.units_drawn(), 15);
        assert!(corridor.equipment().iter().all(|e| !e.is_controlled()));
    }

    #[test]
    fn sub_corridor_starts_with_ac_only() {
        let corridor = Corridor::new(CorridorType::Sub, &PowerTable::default());
        assert_eq!(corridor.units_drawn(), 10);
        assert!(!corridor.light().is_on());
        assert!(corridor.ac().is_on());
    }

    #[test]
    fn equipment_order_is_light_then_ac() {
        let corridor = Corridor::new(CorridorType::Sub, &PowerTable::default());
        let kinds: Vec<_> = corridor.equipment().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, EquipmentKind::ALL.to_vec());
    }
}
