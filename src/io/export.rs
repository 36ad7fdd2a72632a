use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::hotel::EquipmentStatus;
use crate::runner::EventRecord;

use super::IoError;

/// Column header for per-event CSV records.
const HEADER: &str = "step,motion,floor,corridor,corridor_type,switched_on,reset,shed,\
                      cap_exceeded,floor_units,building_units,maximum_allowed";

fn create(path: &Path) -> Result<io::BufWriter<File>, IoError> {
    let file = File::create(path).map_err(|source| IoError::File {
        path: path.display().to_string(),
        source,
    })?;
    Ok(io::BufWriter::new(file))
}

/// Exports run records to a CSV file at the given path.
///
/// # Arguments
///
/// * `records` - Per-event records from a completed run
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `IoError` if file creation or writing fails.
pub fn export_records_csv(records: &[EventRecord], path: &Path) -> Result<(), IoError> {
    write_records_csv(records, create(path)?)
}

/// Writes run records as CSV, one row per handled event.
///
/// # Arguments
///
/// * `records` - Per-event records from a completed run
/// * `writer` - Destination for the CSV bytes
///
/// # Errors
///
/// Returns an `IoError` if writing fails.
pub fn write_records_csv(records: &[EventRecord], writer: impl Write) -> Result<(), IoError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        let o = &r.outcome;
        wtr.write_record(&[
            r.step.to_string(),
            r.event.motion.to_string(),
            r.event.floor.to_string(),
            r.event.corridor.to_string(),
            r.event.corridor_type.to_string(),
            o.switched_on.to_string(),
            o.reset.to_string(),
            o.shed.to_string(),
            o.cap_exceeded.to_string(),
            o.floor_units.to_string(),
            o.building_units.to_string(),
            r.maximum_allowed.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a status snapshot as pretty-printed JSON to the given path.
///
/// # Arguments
///
/// * `status` - Snapshot from [`Hotel::equipment_status`](crate::hotel::Hotel::equipment_status)
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `IoError` if file creation or serialization fails.
pub fn export_status_json(status: &EquipmentStatus, path: &Path) -> Result<(), IoError> {
    write_status_json(status, create(path)?)
}

/// Writes a status snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns an `IoError` if serialization or writing fails.
pub fn write_status_json(status: &EquipmentStatus, mut writer: impl Write) -> Result<(), IoError> {
    serde_json::to_writer_pretty(&mut writer, status)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::equipment::CorridorType;
    use crate::hotel::MotionEvent;
    use crate::runner::Runner;

    fn records() -> Vec<EventRecord> {
        let hotel = ScenarioConfig::reference().build_hotel().expect("valid preset");
        let mut runner = Runner::new(hotel);
        runner
            .run([
                MotionEvent::detected(1, CorridorType::Sub, 2),
                MotionEvent::cleared(1, CorridorType::Sub, 2),
                MotionEvent::detected(2, CorridorType::Sub, 1),
            ])
            .expect("events in range")
            .to_vec()
    }

    #[test]
    fn header_and_row_count() {
        let mut buf = Vec::new();
        write_records_csv(&records(), &mut buf).expect("write to memory");
        let output = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER.replace(' ', ""));
        assert!(lines[1].starts_with("0,true,1,2,sub,1,0,1,true,"));
    }

    #[test]
    fn csv_rows_are_parseable() {
        let mut buf = Vec::new();
        write_records_csv(&records(), &mut buf).expect("write to memory");

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(12));
        for record in rdr.records() {
            let rec = record.expect("row parses");
            let units: Result<u32, _> = rec[10].parse();
            assert!(units.is_ok(), "building_units should be an integer");
        }
    }

    #[test]
    fn status_json_is_nested_mapping() {
        let hotel = ScenarioConfig::reference().build_hotel().expect("valid preset");
        let mut buf = Vec::new();
        write_status_json(&hotel.equipment_status(), &mut buf).expect("write to memory");

        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["floor_1"]["subCorridor_2"]["ac"], "ON");
        let text = String::from_utf8(buf).unwrap_or_default();
        let first = text.find("floor_1").unwrap_or(usize::MAX);
        let second = text.find("floor_2").unwrap_or(0);
        assert!(first < second, "floors keep their order");
    }
}
