use serde::{Deserialize, Serialize};

use crate::config::PowerTable;
use crate::equipment::{CorridorType, EquipmentKind};
use crate::error::HotelError;

use super::topology::Hotel;

/// Policy selecting how the power cap is computed and evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationType {
    /// No explicit policy; behaves like [`OptimizationType::WholeBuilding`].
    #[default]
    #[serde(rename = "none")]
    None,
    /// Fixed cap applied to the triggering floor only.
    #[serde(rename = "floor", alias = "per-floor")]
    PerFloor,
    /// Topology-derived cap applied to the whole building.
    #[serde(rename = "whole-building")]
    WholeBuilding,
}

/// Topology-derived building cap:
/// `(main * main_allowance + sub * sub_allowance) * floors`.
///
/// Also bounds the draw with every unit switched on, so consumption sums over
/// a hotel built from these counts never leave `u32`.
///
/// # Arguments
///
/// * `floors` - Number of floors
/// * `main` - Main corridors per floor
/// * `sub` - Sub corridors per floor
/// * `table` - Unit draws and corridor allowances
///
/// # Errors
///
/// Returns `HotelError::Configuration` naming the overflowing field.
pub(crate) fn topology_cap(
    floors: usize,
    main: usize,
    sub: usize,
    table: &PowerTable,
) -> Result<u32, HotelError> {
    let overflow = |field: &'static str| HotelError::Configuration {
        field,
        reason: format!("pushes consumption past {} units", u32::MAX),
    };
    let floors = u32::try_from(floors).map_err(|_| overflow("floors"))?;
    let main = u32::try_from(main).map_err(|_| overflow("main_corridors"))?;
    let sub = u32::try_from(sub).map_err(|_| overflow("sub_corridors"))?;

    EquipmentKind::ALL
        .into_iter()
        .try_fold(0u32, |acc, kind| acc.checked_add(table.units(kind)))
        .and_then(|corridor| main.checked_add(sub)?.checked_mul(corridor))
        .and_then(|floor| floor.checked_mul(floors))
        .ok_or_else(|| overflow("units"))?;

    main.checked_mul(table.corridor_allowance(CorridorType::Main))
        .zip(sub.checked_mul(table.corridor_allowance(CorridorType::Sub)))
        .and_then(|(m, s)| m.checked_add(s))
        .and_then(|floor| floor.checked_mul(floors))
        .ok_or_else(|| overflow("corridor_allowance"))
}

impl Hotel {
    /// Maximum consumption allowed under the active optimization type.
    ///
    /// Per-floor optimization returns the table's fixed per-floor cap. Every
    /// other policy returns the building cap derived from the corridor counts
    /// at construction, which is 0 for a hotel without floors.
    pub fn maximum_allowed(&self) -> u32 {
        match self.optimization() {
            OptimizationType::PerFloor => self.table().per_floor_cap,
            OptimizationType::None | OptimizationType::WholeBuilding => self.building_cap(),
        }
    }

    /// Whether consumption exceeds [`Hotel::maximum_allowed`].
    ///
    /// Per-floor optimization compares the consumption of `floor`; every other
    /// policy compares the whole building regardless of which floor asked.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::IndexOutOfRange` if `floor` is outside
    /// `1..=floor_count()`.
    pub fn cap_exceeded(&self, floor: usize) -> Result<bool, HotelError> {
        let floor_units = self.total_consumption(Some(floor))?;
        let consumption = match self.optimization() {
            OptimizationType::PerFloor => floor_units,
            OptimizationType::None | OptimizationType::WholeBuilding => {
                self.total_consumption(None)?
            }
        };
        Ok(consumption > self.maximum_allowed())
    }
}
