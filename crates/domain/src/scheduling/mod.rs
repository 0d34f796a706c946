mod offset;
mod quiet_hours;

pub use offset::apply_offset;
pub use quiet_hours::{InvalidQuietHoursError, QuietHoursPolicy};
