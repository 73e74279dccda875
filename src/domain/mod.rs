//! Domain layer: the time-series metrics aggregation core.
//!
//! Everything here is pure and request-scoped: each call builds fresh
//! tallies from the records it is given and returns plain data. The
//! only inputs are fetched rows and an explicit reference date, so the
//! wall clock never leaks into the computation.

pub mod daily_series;
pub mod date_window;
pub mod event;
pub mod review_rules;
pub mod rolling;
pub mod section_average;

pub use daily_series::{DailyCount, DailyTally, DashboardDay, SchoolDay, ScoreTally};
pub use date_window::DateWindow;
pub use event::EventRecord;
pub use review_rules::SectionEntry;
pub use section_average::{SectionAverage, SectionRating};
