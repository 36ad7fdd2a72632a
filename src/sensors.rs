//! Seeded random occupancy generator producing motion sensor events.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::equipment::CorridorType;
use crate::error::HotelError;
use crate::hotel::{Hotel, MotionEvent};

/// Random motion sensor readings for a fixed topology.
///
/// Each event picks a floor uniformly, then a corridor type among the types
/// present on every floor, then a position within that group. Motion is
/// reported with probability `motion_probability`, otherwise the event is a
/// motion-clear. Identical seeds yield identical event streams.
///
/// # Examples
///
/// ```
/// use hotel_automation::config::{HotelConfig, PowerTable};
/// use hotel_automation::hotel::Hotel;
/// use hotel_automation::sensors::OccupancyGenerator;
///
/// let hotel = Hotel::new(&HotelConfig::new(2, 1, 2), PowerTable::default())?;
/// let events: Vec<_> = OccupancyGenerator::for_hotel(&hotel, 0.5, 7)?.take(10).collect();
/// assert_eq!(events.len(), 10);
/// # Ok::<(), hotel_automation::error::HotelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OccupancyGenerator {
    floors: usize,
    main_corridors: usize,
    sub_corridors: usize,
    motion_probability: f64,
    rng: StdRng,
}

impl OccupancyGenerator {
    /// Creates a generator for the given topology.
    ///
    /// # Arguments
    ///
    /// * `floors` - Number of floors events may name
    /// * `main_corridors` - Main corridors per floor
    /// * `sub_corridors` - Sub corridors per floor
    /// * `motion_probability` - Chance that an event reports motion
    /// * `seed` - RNG seed; equal seeds yield equal event streams
    ///
    /// # Errors
    ///
    /// Returns `HotelError::Configuration` when the topology has no corridor
    /// to report on, or `motion_probability` is outside `[0.0, 1.0]`.
    pub fn new(
        floors: usize,
        main_corridors: usize,
        sub_corridors: usize,
        motion_probability: f64,
        seed: u64,
    ) -> Result<Self, HotelError> {
        if floors == 0 || main_corridors + sub_corridors == 0 {
            return Err(HotelError::Configuration {
                field: "sensors",
                reason: "occupancy needs at least one floor with one corridor".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&motion_probability) {
            return Err(HotelError::Configuration {
                field: "motion_probability",
                reason: format!("must be in [0.0, 1.0], got {motion_probability}"),
            });
        }
        Ok(Self {
            floors,
            main_corridors,
            sub_corridors,
            motion_probability,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Creates a generator matching `hotel`'s topology.
    ///
    /// # Errors
    ///
    /// See [`OccupancyGenerator::new`].
    pub fn for_hotel(hotel: &Hotel, motion_probability: f64, seed: u64) -> Result<Self, HotelError> {
        Self::new(
            hotel.floor_count(),
            hotel.main_corridors_per_floor(),
            hotel.sub_corridors_per_floor(),
            motion_probability,
            seed,
        )
    }

    /// Samples the next sensor reading.
    pub fn next_event(&mut self) -> MotionEvent {
        let floor = self.rng.random_range(1..=self.floors);
        let corridor_type = match (self.main_corridors, self.sub_corridors) {
            (0, _) => CorridorType::Sub,
            (_, 0) => CorridorType::Main,
            _ if self.rng.random_bool(0.5) => CorridorType::Main,
            _ => CorridorType::Sub,
        };
        let group_len = match corridor_type {
            CorridorType::Main => self.main_corridors,
            CorridorType::Sub => self.sub_corridors,
        };
        let corridor = self.rng.random_range(1..=group_len);
        let motion = self.rng.random_bool(self.motion_probability);

        MotionEvent {
            motion,
            floor,
            corridor,
            corridor_type,
        }
    }
}

impl Iterator for OccupancyGenerator {
    type Item = MotionEvent;

    fn next(&mut self) -> Option<MotionEvent> {
        Some(self.next_event())
    }
}
