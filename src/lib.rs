//! Occupancy-driven equipment control for a hotel.
//!
//! Lights and air-conditioners are switched by motion events, and
//! non-essential load is shed whenever consumption exceeds the configured
//! power cap.

pub mod config;
/// Lights, air-conditioners and corridors.
pub mod equipment;
pub mod error;
/// Topology, accounting, cap enforcement, motion control and status.
pub mod hotel;
pub mod io;
pub mod logging;
pub mod runner;
pub mod sensors;
