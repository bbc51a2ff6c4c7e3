//! Schedule model: the data the target resolver reads.
//!
//! ```text
//!   LocalTime ──▶ WeeklySchedule ──▶ DailySchedule[0..4] ──▶ SetPoint[0..4]
//!                 (weekday → day)    (half hour → index)     (index → °C)
//! ```
//!
//! Everything here is pure data plus the bit-packing codecs.  Nothing
//! touches a clock or the hardware.

pub mod daily;
pub mod name;
pub mod set_point;
pub mod temp_override;
pub mod time;
pub mod weekly;

pub use daily::{DailySchedule, DailySchedulePatch};
pub use name::Name;
pub use set_point::{SetPoint, SetPointPatch};
pub use temp_override::Override;
pub use time::{LocalTime, Moment};
pub use weekly::WeeklySchedule;
