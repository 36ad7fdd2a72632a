use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::hotel::MotionEvent;

use super::IoError;

/// Header expected at the top of an event script.
pub const EVENT_SCRIPT_HEADER: &str = "motion,floor,corridor,corridor_type";

/// Loads a CSV event script from `path`.
///
/// # Errors
///
/// Returns an `IoError` if the file cannot be opened or a row does not parse.
pub fn load_events(path: &Path) -> Result<Vec<MotionEvent>, IoError> {
    let file = File::open(path).map_err(|source| IoError::File {
        path: path.display().to_string(),
        source,
    })?;
    read_events(file)
}

/// Parses motion events from CSV with header `motion,floor,corridor,corridor_type`.
///
/// Values are `true`/`false`, 1-based integers, and `main`/`sub`.
///
/// # Errors
///
/// Returns `IoError::Csv` for the first row that does not parse.
pub fn read_events(reader: impl Read) -> Result<Vec<MotionEvent>, IoError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut events = Vec::new();
    for row in rdr.deserialize() {
        events.push(row?);
    }
    Ok(events)
}
