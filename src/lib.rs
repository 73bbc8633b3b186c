//! Turns activity tracking records into a journal with a page per day.
//! Hourly records of the same activity are merged into runs, moved into the viewer's timezone and
//! written down as `[[category]] [[class]] for 1 hour 15 minutes`.
//!

pub mod cli;
pub mod export;
pub mod journal;
pub mod source;
pub mod utils;
