//! # Chime Alarm Tools Extension
//!
//! Exposes a [`Scheduler`](chime_scheduler::Scheduler) to agents as a set
//! of tools. Times are read and shown in local time.
//!
//! ## Tools
//!
//! - `set_alarm`: Schedule a one-shot alarm
//! - `list_alarms`: List pending alarms
//! - `get_alarm`: Show one alarm
//! - `delete_alarm`: Cancel an alarm
//! - `snooze_alarm`: Push an alarm back by some minutes
//! - `alarm_status`: Scheduler status document

pub mod extension;
pub mod format;
pub mod time_parse;
pub mod tools;

pub use extension::AlarmToolsExtension;
