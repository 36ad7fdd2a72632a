use crate::config::{HotelConfig, PowerTable};
use crate::equipment::{Corridor, CorridorType, EquipmentKind, Load};
use crate::error::{HotelError, IndexTarget};

use super::cap::{OptimizationType, topology_cap};
use super::controller::ControlPolicy;

/// One floor: all main corridors followed by all sub corridors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    corridors: Vec<Corridor>,
    main_count: usize,
}

impl Floor {
    fn build(main_corridors: usize, sub_corridors: usize, table: &PowerTable) -> Self {
        let mut corridors = Vec::with_capacity(main_corridors + sub_corridors);
        corridors.extend((0..main_corridors).map(|_| Corridor::new(CorridorType::Main, table)));
        corridors.extend((0..sub_corridors).map(|_| Corridor::new(CorridorType::Sub, table)));
        Self {
            corridors,
            main_count: main_corridors,
        }
    }

    /// Every corridor in combined order (main group, then sub group).
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// The corridors of one type, in position order.
    pub fn corridors_of(&self, corridor_type: CorridorType) -> &[Corridor] {
        match corridor_type {
            CorridorType::Main => &self.corridors[..self.main_count],
            CorridorType::Sub => &self.corridors[self.main_count..],
        }
    }

    pub(crate) fn corridors_mut(&mut self) -> &mut [Corridor] {
        &mut self.corridors
    }

    /// Resolves the 1-based `corridor` number within its type group to a
    /// 0-based position in the combined sequence.
    pub(crate) fn position_of(
        &self,
        corridor_type: CorridorType,
        corridor: usize,
    ) -> Result<usize, HotelError> {
        let group_len = self.corridors_of(corridor_type).len();
        if corridor == 0 || corridor > group_len {
            let target = match corridor_type {
                CorridorType::Main => IndexTarget::MainCorridor,
                CorridorType::Sub => IndexTarget::SubCorridor,
            };
            return Err(HotelError::out_of_range(target, corridor, group_len));
        }
        let offset = match corridor_type {
            CorridorType::Main => 0,
            CorridorType::Sub => self.main_count,
        };
        Ok(offset + corridor - 1)
    }
}

impl Load for Floor {
    fn units_drawn(&self) -> u32 {
        self.corridors.iter().map(Load::units_drawn).sum()
    }
}

/// Root aggregate owning every floor, corridor and piece of equipment.
///
/// The topology, optimization type, control policy and power table are fixed
/// at construction; only equipment on/off state changes afterwards.
///
/// # Examples
///
/// ```
/// use hotel_automation::config::{HotelConfig, PowerTable};
/// use hotel_automation::hotel::Hotel;
///
/// let hotel = Hotel::new(&HotelConfig::new(2, 1, 2), PowerTable::default())?;
/// assert_eq!(hotel.total_consumption(None)?, 70);
/// assert_eq!(hotel.maximum_allowed(), 70);
/// # Ok::<(), hotel_automation::error::HotelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Hotel {
    floors: Vec<Floor>,
    main_per_floor: usize,
    sub_per_floor: usize,
    optimization: OptimizationType,
    policy: ControlPolicy,
    table: PowerTable,
    building_cap: u32,
}

impl Hotel {
    /// Builds `layout.floors` identical floors with every piece of equipment
    /// at the table's default state.
    ///
    /// Zero counts are valid and produce an empty topology.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::Configuration` if any count is negative, an
    /// equipment kind is configured to draw zero units, or the building cap
    /// or full load does not fit in `u32`.
    pub fn new(layout: &HotelConfig, table: PowerTable) -> Result<Self, HotelError> {
        let floors = count("floors", layout.floors)?;
        let main_per_floor = count("main_corridors", layout.main_corridors)?;
        let sub_per_floor = count("sub_corridors", layout.sub_corridors)?;

        for kind in EquipmentKind::ALL {
            if table.units(kind) == 0 {
                return Err(HotelError::Configuration {
                    field: "units",
                    reason: format!("{kind} must consume more than 0 units"),
                });
            }
        }

        let building_cap = topology_cap(floors, main_per_floor, sub_per_floor, &table)?;

        let floors = (0..floors)
            .map(|_| Floor::build(main_per_floor, sub_per_floor, &table))
            .collect();

        tracing::debug!(
            floors = layout.floors,
            main_per_floor,
            sub_per_floor,
            optimization = ?layout.optimization,
            policy = ?layout.policy,
            "built hotel topology"
        );

        Ok(Self {
            floors,
            main_per_floor,
            sub_per_floor,
            optimization: layout.optimization,
            policy: layout.policy,
            table,
            building_cap,
        })
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn main_corridors_per_floor(&self) -> usize {
        self.main_per_floor
    }

    pub fn sub_corridors_per_floor(&self) -> usize {
        self.sub_per_floor
    }

    pub fn optimization(&self) -> OptimizationType {
        self.optimization
    }

    pub fn policy(&self) -> ControlPolicy {
        self.policy
    }

    pub fn table(&self) -> &PowerTable {
        &self.table
    }

    pub(crate) fn building_cap(&self) -> u32 {
        self.building_cap
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Returns the floor with 1-based number `floor`.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::IndexOutOfRange` outside `1..=floor_count()`.
    pub fn floor(&self, floor: usize) -> Result<&Floor, HotelError> {
        let len = self.floors.len();
        floor
            .checked_sub(1)
            .and_then(|i| self.floors.get(i))
            .ok_or_else(|| HotelError::out_of_range(IndexTarget::Floor, floor, len))
    }

    pub(crate) fn floor_mut(&mut self, floor: usize) -> Result<&mut Floor, HotelError> {
        let len = self.floors.len();
        floor
            .checked_sub(1)
            .and_then(|i| self.floors.get_mut(i))
            .ok_or_else(|| HotelError::out_of_range(IndexTarget::Floor, floor, len))
    }

    /// Returns the `corridor`-th corridor of `corridor_type` on `floor`, both
    /// numbers 1-based.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::IndexOutOfRange` if either number is outside the
    /// built topology.
    pub fn corridor(
        &self,
        floor: usize,
        corridor_type: CorridorType,
        corridor: usize,
    ) -> Result<&Corridor, HotelError> {
        let floor = self.floor(floor)?;
        let position = floor.position_of(corridor_type, corridor)?;
        Ok(&floor.corridors()[position])
    }
}

fn count(field: &'static str, value: i64) -> Result<usize, HotelError> {
    usize::try_from(value).map_err(|_| HotelError::Configuration {
        field,
        reason: format!("must be >= 0, got {value}"),
    })
}
