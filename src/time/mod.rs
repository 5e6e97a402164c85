mod clock;
pub use clock::*;
mod date;
pub use date::*;
mod date_range;
pub use date_range::*;
mod iso_week;
pub use iso_week::*;
mod month;
pub use month::*;
mod week_day;
pub use week_day::*;
mod year;
pub use year::*;
