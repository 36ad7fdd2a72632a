//! Power accounting over currently-on equipment.

use crate::equipment::Load;
use crate::error::HotelError;

use super::topology::Hotel;

impl Hotel {
    /// Sums the units drawn by switched-on equipment.
    ///
    /// With `Some(floor)` (1-based) only that floor is counted; with `None`
    /// the whole building is.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::IndexOutOfRange` if `floor` is outside
    /// `1..=floor_count()`.
    pub fn total_consumption(&self, floor: Option<usize>) -> Result<u32, HotelError> {
        match floor {
            Some(floor) => Ok(self.floor(floor)?.units_drawn()),
            None => Ok(self.floors().iter().map(Load::units_drawn).sum()),
        }
    }
}
