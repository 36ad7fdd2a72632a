//! Replays a stream of motion events through a hotel and summarizes the run.

use std::fmt;

use serde::Serialize;

use crate::config::ScenarioConfig;
use crate::error::HotelError;
use crate::hotel::{EquipmentStatus, Hotel, MotionEvent, MotionOutcome};
use crate::sensors::OccupancyGenerator;

/// Record of one handled motion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// 0-based position in the event stream.
    pub step: usize,
    pub event: MotionEvent,
    pub outcome: MotionOutcome,
    /// Cap in force when the event was handled.
    pub maximum_allowed: u32,
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.outcome;
        write!(
            f,
            "#{:>4} {:<36} | on={} reset={} shed={} | floor={:>4} building={:>5} cap={:>5}{}",
            self.step,
            self.event.to_string(),
            o.switched_on,
            o.reset,
            o.shed,
            o.floor_units,
            o.building_units,
            self.maximum_allowed,
            if o.cap_exceeded { " EXCEEDED" } else { "" },
        )
    }
}

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("event #{step} ({event}) rejected: {source}")]
    Rejected {
        step: usize,
        event: MotionEvent,
        #[source]
        source: HotelError,
    },
    #[error(transparent)]
    Hotel(#[from] HotelError),
}

/// Feeds events to a single owned [`Hotel`], one at a time.
#[derive(Debug, Clone)]
pub struct Runner {
    hotel: Hotel,
    records: Vec<EventRecord>,
}

impl Runner {
    pub fn new(hotel: Hotel) -> Self {
        Self {
            hotel,
            records: Vec::new(),
        }
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    /// Records of every event handled so far.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Handles one event and appends its record.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Rejected` if the event addresses a floor or
    /// corridor outside the topology. The hotel is left unchanged.
    pub fn step(&mut self, event: MotionEvent) -> Result<&EventRecord, RunError> {
        let step = self.records.len();
        let outcome = self
            .hotel
            .handle_motion(&event)
            .map_err(|source| RunError::Rejected { step, event, source })?;
        self.records.push(EventRecord {
            step,
            event,
            outcome,
            maximum_allowed: self.hotel.maximum_allowed(),
        });
        Ok(&self.records[step])
    }

    /// Handles every event in order, stopping at the first rejected one.
    ///
    /// # Errors
    ///
    /// See [`Runner::step`]. Records of events handled before the failure
    /// remain available through [`Runner::records`].
    pub fn run<I>(&mut self, events: I) -> Result<&[EventRecord], RunError>
    where
        I: IntoIterator<Item = MotionEvent>,
    {
        for event in events {
            self.step(event)?;
        }
        Ok(&self.records)
    }
}

/// Aggregate figures for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub events: usize,
    pub motion_events: usize,
    pub cap_breaches: usize,
    pub equipment_shed: usize,
    pub peak_building_units: u32,
    pub final_building_units: u32,
}

impl RunSummary {
    pub fn from_records(records: &[EventRecord]) -> Self {
        let mut summary = Self {
            events: records.len(),
            ..Self::default()
        };
        for r in records {
            if r.event.motion {
                summary.motion_events += 1;
            }
            if r.outcome.cap_exceeded {
                summary.cap_breaches += 1;
            }
            summary.equipment_shed += r.outcome.shed;
            summary.peak_building_units = summary.peak_building_units.max(r.outcome.building_units);
        }
        summary.final_building_units = records.last().map_or(0, |r| r.outcome.building_units);
        summary
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(
            f,
            "Events handled: {} ({} with motion)",
            self.events, self.motion_events
        )?;
        writeln!(f, "Cap breaches: {}", self.cap_breaches)?;
        writeln!(f, "Equipment shed: {}", self.equipment_shed)?;
        writeln!(f, "Peak consumption: {} units", self.peak_building_units)?;
        write!(f, "Final consumption: {} units", self.final_building_units)
    }
}

/// Everything produced by [`run_scenario`].
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub records: Vec<EventRecord>,
    pub summary: RunSummary,
    pub status: EquipmentStatus,
    pub maximum_allowed: u32,
}

/// Builds the scenario's hotel and replays `script`, or generated occupancy
/// from the scenario's sensor settings when no script is given.
///
/// # Arguments
///
/// * `config` - Topology, power table and sensor settings
/// * `script` - Recorded motion events; `None` generates occupancy instead
///
/// # Errors
///
/// Returns `RunError` if the hotel cannot be built, the generator cannot be
/// configured, or an event is rejected.
pub fn run_scenario(
    config: &ScenarioConfig,
    script: Option<Vec<MotionEvent>>,
) -> Result<ScenarioRun, RunError> {
    let hotel = config.build_hotel()?;
    let mut runner = Runner::new(hotel);

    match script {
        Some(events) => runner.run(events)?,
        None => {
            let s = &config.sensors;
            let generator = OccupancyGenerator::for_hotel(runner.hotel(), s.motion_probability, s.seed)?;
            runner.run(generator.take(s.steps))?
        }
    };

    let records = runner.records().to_vec();
    Ok(ScenarioRun {
        summary: RunSummary::from_records(&records),
        status: runner.hotel().equipment_status(),
        maximum_allowed: runner.hotel().maximum_allowed(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::CorridorType;

    fn runner() -> Runner {
        Runner::new(ScenarioConfig::reference().build_hotel().expect("valid preset"))
    }

    #[test]
    fn records_each_step_in_order() {
        let mut runner = runner();
        let records = runner
            .run([
                MotionEvent::detected(1, CorridorType::Sub, 2),
                MotionEvent::cleared(1, CorridorType::Sub, 2),
            ])
            .expect("events in range");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].step, 0);
        assert_eq!(records[1].step, 1);
        assert_eq!(records[0].outcome.building_units, 65);
        assert_eq!(records[1].outcome.building_units, 70);
    }

    #[test]
    fn stops_at_first_rejected_event() {
        let mut runner = runner();
        let err = runner.run([
            MotionEvent::detected(1, CorridorType::Sub, 1),
            MotionEvent::detected(9, CorridorType::Sub, 1),
            MotionEvent::detected(2, CorridorType::Sub, 1),
        ]);
        assert!(matches!(err, Err(RunError::Rejected { step: 1, .. })));
        assert_eq!(runner.records().len(), 1);
    }

    #[test]
    fn summary_counts_breaches_and_shed() {
        let mut runner = runner();
        runner
            .run([
                MotionEvent::detected(1, CorridorType::Sub, 2),
                MotionEvent::cleared(1, CorridorType::Sub, 2),
            ])
            .expect("events in range");
        let summary = RunSummary::from_records(runner.records());
        assert_eq!(summary.events, 2);
        assert_eq!(summary.motion_events, 1);
        assert_eq!(summary.cap_breaches, 1);
        assert_eq!(summary.equipment_shed, 1);
        assert_eq!(summary.peak_building_units, 70);
        assert_eq!(summary.final_building_units, 70);
    }

    #[test]
    fn empty_summary_is_zeroed() {
        assert_eq!(RunSummary::from_records(&[]), RunSummary::default());
    }

    #[test]
    fn generated_scenario_is_deterministic() {
        let config = ScenarioConfig::tower();
        let a = run_scenario(&config, None).expect("generated events are in range");
        let b = run_scenario(&config, None).expect("generated events are in range");
        assert_eq!(a.records.len(), config.sensors.steps);
        assert_eq!(a.records, b.records);
        assert_eq!(a.status, b.status);
    }

    #[test]
    fn record_display_flags_breaches() {
        let mut runner = runner();
        let record = runner
            .step(MotionEvent::detected(1, CorridorType::Sub, 2))
            .expect("event in range");
        assert!(record.to_string().contains("EXCEEDED"));
    }
}
