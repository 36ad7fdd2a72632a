//! TOML-based scenario configuration, the power table, and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::equipment::{CorridorType, EquipmentKind};
use crate::error::HotelError;
use crate::hotel::cap::topology_cap;
use crate::hotel::{ControlPolicy, Hotel, OptimizationType};

/// Top-level scenario configuration parsed from TOML.
///
/// All tables have defaults matching the `default` preset. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::from_preset`] for a built-in scenario.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Building topology and control policy.
    #[serde(default)]
    pub hotel: HotelConfig,
    /// Consumption units, default states and cap constants.
    #[serde(default)]
    pub power: PowerTable,
    /// Generated occupancy parameters.
    #[serde(default)]
    pub sensors: SensorConfig,
}

/// Building topology and control policy.
///
/// Counts are signed so that a negative value in a scenario file surfaces as
/// a configuration error rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HotelConfig {
    /// Number of floors.
    pub floors: i64,
    /// Main corridors on every floor.
    pub main_corridors: i64,
    /// Sub corridors on every floor.
    pub sub_corridors: i64,
    /// Power-cap evaluation policy.
    pub optimization: OptimizationType,
    /// Motion-clear and shedding behaviour.
    pub policy: ControlPolicy,
}

impl HotelConfig {
    /// Creates a layout with the default optimization and control policy.
    pub fn new(floors: i64, main_corridors: i64, sub_corridors: i64) -> Self {
        Self {
            floors,
            main_corridors,
            sub_corridors,
            optimization: OptimizationType::default(),
            policy: ControlPolicy::default(),
        }
    }

    pub fn with_optimization(mut self, optimization: OptimizationType) -> Self {
        self.optimization = optimization;
        self
    }

    pub fn with_policy(mut self, policy: ControlPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self::new(2, 1, 2)
    }
}

/// Per-kind consumption and default on/off states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EquipmentRating {
    /// Units drawn while switched on (must be > 0).
    pub units: u32,
    /// Initial and reset state in main corridors.
    pub main_default_on: bool,
    /// Initial and reset state in sub corridors.
    pub sub_default_on: bool,
}

/// The fixed configuration table injected into a [`Hotel`].
///
/// Read-only once the hotel is built. Lookups are keyed by enum, never by
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerTable {
    /// Cap applied to a single floor under per-floor optimization.
    pub per_floor_cap: u32,
    /// Named building cap. No cap policy reads it; the building-wide cap
    /// is derived from the topology instead.
    pub whole_building_cap: u32,
    /// Units each main corridor contributes to the building-wide cap.
    pub main_corridor_allowance: u32,
    /// Units each sub corridor contributes to the building-wide cap.
    pub sub_corridor_allowance: u32,
    pub light: EquipmentRating,
    pub ac: EquipmentRating,
}

impl Default for PowerTable {
    fn default() -> Self {
        Self {
            per_floor_cap: 40,
            whole_building_cap: 65,
            main_corridor_allowance: 15,
            sub_corridor_allowance: 10,
            light: EquipmentRating {
                units: 5,
                main_default_on: true,
                sub_default_on: false,
            },
            ac: EquipmentRating {
                units: 10,
                main_default_on: true,
                sub_default_on: true,
            },
        }
    }
}

impl PowerTable {
    pub fn rating(&self, kind: EquipmentKind) -> &EquipmentRating {
        match kind {
            EquipmentKind::Light => &self.light,
            EquipmentKind::Ac => &self.ac,
        }
    }

    pub fn units(&self, kind: EquipmentKind) -> u32 {
        self.rating(kind).units
    }

    /// Default on/off state for `kind` when keyed by `corridor_type`.
    pub fn default_on(&self, kind: EquipmentKind, corridor_type: CorridorType) -> bool {
        let rating = self.rating(kind);
        match corridor_type {
            CorridorType::Main => rating.main_default_on,
            CorridorType::Sub => rating.sub_default_on,
        }
    }

    /// Building-wide cap contribution of one corridor of `corridor_type`.
    pub fn corridor_allowance(&self, corridor_type: CorridorType) -> u32 {
        match corridor_type {
            CorridorType::Main => self.main_corridor_allowance,
            CorridorType::Sub => self.sub_corridor_allowance,
        }
    }
}

/// Generated occupancy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    /// Random seed for the occupancy generator.
    pub seed: u64,
    /// Number of motion events to generate.
    pub steps: usize,
    /// Probability that a generated event reports motion (0.0-1.0).
    pub motion_probability: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            steps: 24,
            motion_probability: 0.6,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"hotel.floors"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "per_floor", "tower"];

    /// Two floors, one main and two sub corridors each, building-wide cap.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Same topology as [`ScenarioConfig::reference`] with a per-floor cap.
    pub fn per_floor() -> Self {
        Self {
            hotel: HotelConfig::default().with_optimization(OptimizationType::PerFloor),
            ..Self::default()
        }
    }

    /// Three floors, two main and four sub corridors each.
    pub fn tower() -> Self {
        Self {
            hotel: HotelConfig::new(3, 2, 4),
            sensors: SensorConfig {
                steps: 48,
                ..SensorConfig::default()
            },
            ..Self::default()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::reference()),
            "per_floor" => Ok(Self::per_floor()),
            "tower" => Ok(Self::tower()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Besides per-field checks, rejects unit draws and corridor allowances
    /// whose building totals would not fit in `u32`. Returns an empty vector
    /// if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let h = &self.hotel;
        for (field, value) in [
            ("hotel.floors", h.floors),
            ("hotel.main_corridors", h.main_corridors),
            ("hotel.sub_corridors", h.sub_corridors),
        ] {
            if value < 0 {
                errors.push(ConfigError::new(field, format!("must be >= 0, got {value}")));
            }
        }

        let p = &self.power;
        if p.light.units == 0 {
            errors.push(ConfigError::new("power.light.units", "must be > 0"));
        }
        if p.ac.units == 0 {
            errors.push(ConfigError::new("power.ac.units", "must be > 0"));
        }
        if let (Ok(floors), Ok(main), Ok(sub)) = (
            usize::try_from(h.floors),
            usize::try_from(h.main_corridors),
            usize::try_from(h.sub_corridors),
        ) {
            if let Err(HotelError::Configuration { field, reason }) =
                topology_cap(floors, main, sub, p)
            {
                errors.push(ConfigError::new(format!("power.{field}"), reason));
            }
        }

        let s = &self.sensors;
        if s.steps == 0 {
            errors.push(ConfigError::new("sensors.steps", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&s.motion_probability) {
            errors.push(ConfigError::new(
                "sensors.motion_probability",
                "must be in [0.0, 1.0]",
            ));
        }

        errors
    }

    /// Builds the hotel described by this scenario.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::Configuration` for negative counts or an unusable
    /// power table.
    pub fn build_hotel(&self) -> Result<Hotel, HotelError> {
        Hotel::new(&self.hotel, self.power)
    }
}
