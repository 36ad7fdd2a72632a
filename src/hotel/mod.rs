//! The equipment-control engine: topology, accounting, cap enforcement,
//! motion handling and status reporting.
//!
//! All operations hang off the [`Hotel`] aggregate and navigate top-down by
//! 1-based floor and corridor numbers.

/// Power-cap policy and evaluation.
pub mod cap;
/// Motion-driven state transitions and demand shedding.
pub mod controller;
/// Motion sensor events.
pub mod event;
pub mod power;
/// Read-only equipment status snapshots.
pub mod status;
/// Floors and the hotel aggregate.
pub mod topology;

pub use cap::OptimizationType;
pub use controller::{ControlPolicy, MotionOutcome};
pub use event::MotionEvent;
pub use status::EquipmentStatus;
pub use topology::{Floor, Hotel};
