use serde::{Deserialize, Serialize};

use crate::config::PowerTable;
use crate::equipment::{Corridor, CorridorType};
use crate::error::HotelError;

use super::event::MotionEvent;
use super::topology::{Floor, Hotel};

/// How motion-clear resets and demand shedding pick their corridors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPolicy {
    /// Motion-clear resets every controlled unit on the floor using the
    /// event's corridor type as the default-state key. Shedding spares the
    /// corridor whose combined 0-based position equals the event's raw
    /// corridor number, across both groups.
    #[default]
    Literal,
    /// Motion-clear resets each corridor to its own type's defaults.
    /// Shedding spares exactly the corridor the event named.
    Corrected,
}

/// What a single motion event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MotionOutcome {
    /// Controlled units switched on by detected motion.
    pub switched_on: usize,
    /// Controlled units whose state changed while resetting to defaults.
    pub reset: usize,
    /// Whether consumption exceeded the cap after the transition.
    pub cap_exceeded: bool,
    /// Controlled units switched off by demand shedding.
    pub shed: usize,
    /// Consumption of the event's floor after the event.
    pub floor_units: u32,
    /// Consumption of the whole building after the event.
    pub building_units: u32,
}

impl Hotel {
    /// Applies a motion event, then enforces the power cap on its floor.
    ///
    /// Detected motion switches on the controlled equipment of the named
    /// corridor. Cleared motion resets every controlled unit on the floor to
    /// its default state. Either way, if the cap is then exceeded, controlled
    /// equipment in the other corridors of the floor is switched off.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::IndexOutOfRange` if the floor or corridor does
    /// not exist. Nothing is mutated in that case.
    pub fn handle_motion(&mut self, event: &MotionEvent) -> Result<MotionOutcome, HotelError> {
        let position = self
            .floor(event.floor)?
            .position_of(event.corridor_type, event.corridor)?;
        let table = *self.table();
        let policy = self.policy();

        let mut outcome = MotionOutcome::default();
        let floor = self.floor_mut(event.floor)?;
        if event.motion {
            outcome.switched_on = switch_on_controlled(&mut floor.corridors_mut()[position]);
        } else {
            outcome.reset = reset_to_defaults(floor, &table, policy, event.corridor_type);
        }

        outcome.cap_exceeded = self.cap_exceeded(event.floor)?;
        if outcome.cap_exceeded {
            let spared = match policy {
                ControlPolicy::Literal => event.corridor,
                ControlPolicy::Corrected => position,
            };
            outcome.shed = shed_load(self.floor_mut(event.floor)?, spared);
            tracing::warn!(
                floor = event.floor,
                spared,
                shed = outcome.shed,
                limit = self.maximum_allowed(),
                "power cap exceeded, shedding controlled load"
            );
        }

        outcome.floor_units = self.total_consumption(Some(event.floor))?;
        outcome.building_units = self.total_consumption(None)?;
        tracing::info!(
            %event,
            switched_on = outcome.switched_on,
            reset = outcome.reset,
            shed = outcome.shed,
            floor_units = outcome.floor_units,
            building_units = outcome.building_units,
            "handled motion event"
        );
        Ok(outcome)
    }
}

fn switch_on_controlled(corridor: &mut Corridor) -> usize {
    let mut changed = 0;
    for equipment in corridor.equipment_mut() {
        if equipment.is_controlled() && equipment.set_on(true) {
            tracing::debug!(kind = %equipment.kind(), "switched on");
            changed += 1;
        }
    }
    changed
}

fn reset_to_defaults(
    floor: &mut Floor,
    table: &PowerTable,
    policy: ControlPolicy,
    event_type: CorridorType,
) -> usize {
    let mut changed = 0;
    for corridor in floor.corridors_mut() {
        let key = match policy {
            ControlPolicy::Literal => event_type,
            ControlPolicy::Corrected => corridor.corridor_type(),
        };
        for equipment in corridor.equipment_mut() {
            if !equipment.is_controlled() {
                continue;
            }
            let on = table.default_on(equipment.kind(), key);
            if equipment.set_on(on) {
                tracing::debug!(kind = %equipment.kind(), on, "reset to default");
                changed += 1;
            }
        }
    }
    changed
}

fn shed_load(floor: &mut Floor, spared: usize) -> usize {
    let mut shed = 0;
    for (position, corridor) in floor.corridors_mut().iter_mut().enumerate() {
        if position == spared {
            continue;
        }
        for equipment in corridor.equipment_mut() {
            if equipment.is_controlled() && equipment.set_on(false) {
                tracing::debug!(kind = %equipment.kind(), position, "shed");
                shed += 1;
            }
        }
    }
    shed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HotelConfig;
    use crate::equipment::{EquipmentKind, Load};
    use crate::error::IndexTarget;
    use crate::hotel::OptimizationType;

    fn hotel(policy: ControlPolicy) -> Hotel {
        let layout = HotelConfig::new(2, 1, 2).with_policy(policy);
        Hotel::new(&layout, PowerTable::default()).expect("layout should be valid")
    }

    fn is_on(hotel: &Hotel, floor: usize, t: CorridorType, n: usize, kind: EquipmentKind) -> bool {
        let corridor = hotel.corridor(floor, t, n).expect("corridor exists");
        match kind {
            EquipmentKind::Light => corridor.light().is_on(),
            EquipmentKind::Ac => corridor.ac().is_on(),
        }
    }

    #[test]
    fn motion_switches_on_light_and_sheds_sibling_ac() {
        let mut hotel = hotel(ControlPolicy::Literal);
        let outcome = hotel
            .handle_motion(&MotionEvent::detected(1, CorridorType::Sub, 2))
            .expect("event is in range");

        assert_eq!(outcome.switched_on, 1);
        assert!(outcome.cap_exceeded);
        assert_eq!(outcome.shed, 1);
        assert_eq!(outcome.building_units, 65);
        assert!(is_on(&hotel, 1, CorridorType::Sub, 2, EquipmentKind::Light));
        assert!(!is_on(&hotel, 1, CorridorType::Sub, 1, EquipmentKind::Ac));
    }

    #[test]
    fn motion_never_touches_main_corridors() {
        let mut hotel = hotel(ControlPolicy::Literal);
        hotel
            .handle_motion(&MotionEvent::detected(1, CorridorType::Main, 1))
            .expect("event is in range");
        let main = hotel.corridor(1, CorridorType::Main, 1).expect("corridor exists");
        assert!(main.light().is_on());
        assert!(main.ac().is_on());
        assert_eq!(main.units_drawn(), 15);
    }

    #[test]
    fn clear_restores_sub_defaults() {
        let mut hotel = hotel(ControlPolicy::Literal);
        hotel
            .handle_motion(&MotionEvent::detected(1, CorridorType::Sub, 2))
            .expect("event is in range");
        let outcome = hotel
            .handle_motion(&MotionEvent::cleared(1, CorridorType::Sub, 2))
            .expect("event is in range");

        assert_eq!(outcome.reset, 2);
        assert!(!outcome.cap_exceeded);
        for n in 1..=2 {
            assert!(!is_on(&hotel, 1, CorridorType::Sub, n, EquipmentKind::Light));
            assert!(is_on(&hotel, 1, CorridorType::Sub, n, EquipmentKind::Ac));
        }
    }

    #[test]
    fn literal_clear_keys_defaults_by_event_type() {
        let mut hotel = hotel(ControlPolicy::Literal);
        hotel
            .handle_motion(&MotionEvent::cleared(1, CorridorType::Main, 1))
            .expect("event is in range");
        // Main defaults switch sub lights on; the building cap then sheds
        // every sub corridor except combined position 1.
        assert!(is_on(&hotel, 1, CorridorType::Sub, 1, EquipmentKind::Light));
        assert!(!is_on(&hotel, 1, CorridorType::Sub, 2, EquipmentKind::Light));
        assert!(!is_on(&hotel, 1, CorridorType::Sub, 2, EquipmentKind::Ac));
    }

    #[test]
    fn corrected_clear_keys_defaults_by_corridor_type() {
        let mut hotel = hotel(ControlPolicy::Corrected);
        let outcome = hotel
            .handle_motion(&MotionEvent::cleared(1, CorridorType::Main, 1))
            .expect("event is in range");
        assert_eq!(outcome.reset, 0);
        assert_eq!(outcome.building_units, 70);
    }

    #[test]
    fn corrected_shedding_spares_named_corridor() {
        let mut hotel = hotel(ControlPolicy::Corrected);
        hotel
            .handle_motion(&MotionEvent::detected(1, CorridorType::Sub, 1))
            .expect("event is in range");
        assert!(is_on(&hotel, 1, CorridorType::Sub, 1, EquipmentKind::Light));
        assert!(is_on(&hotel, 1, CorridorType::Sub, 1, EquipmentKind::Ac));
        assert!(!is_on(&hotel, 1, CorridorType::Sub, 2, EquipmentKind::Ac));
    }

    #[test]
    fn literal_shedding_compares_raw_corridor_number() {
        let mut hotel = hotel(ControlPolicy::Literal);
        hotel
            .handle_motion(&MotionEvent::detected(1, CorridorType::Sub, 1))
            .expect("event is in range");
        // Raw corridor 1 spares combined position 1, which is sub corridor 1.
        assert!(is_on(&hotel, 1, CorridorType::Sub, 1, EquipmentKind::Light));
        assert!(!is_on(&hotel, 1, CorridorType::Sub, 2, EquipmentKind::Ac));
    }

    #[test]
    fn per_floor_cap_leaves_other_floors_alone() {
        let layout = HotelConfig::new(2, 1, 2).with_optimization(OptimizationType::PerFloor);
        let mut hotel = Hotel::new(&layout, PowerTable::default()).expect("valid layout");
        let outcome = hotel
            .handle_motion(&MotionEvent::detected(1, CorridorType::Sub, 1))
            .expect("event is in range");
        assert!(!outcome.cap_exceeded);
        assert_eq!(outcome.floor_units, 40);
        assert_eq!(hotel.total_consumption(Some(2)), Ok(35));
    }

    #[test]
    fn out_of_range_event_mutates_nothing() {
        let mut hotel = hotel(ControlPolicy::Literal);
        let before = hotel.equipment_status();

        let err = hotel.handle_motion(&MotionEvent::detected(1, CorridorType::Sub, 3));
        assert_eq!(
            err,
            Err(HotelError::out_of_range(IndexTarget::SubCorridor, 3, 2))
        );
        let err = hotel.handle_motion(&MotionEvent::cleared(3, CorridorType::Sub, 1));
        assert_eq!(err, Err(HotelError::out_of_range(IndexTarget::Floor, 3, 2)));

        assert_eq!(hotel.equipment_status(), before);
    }
}
