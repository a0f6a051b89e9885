//! Line-oriented iCalendar file holding one event per unit rate.

pub mod event;
pub mod file;
pub mod merge;
pub mod uid;

pub use self::{
    event::CalendarEvent,
    file::CalendarFile,
    merge::{MergeSummary, Merger},
};
