//! # Chime Scheduler
//!
//! Deferred notification scheduler: a registry of one-shot, cancellable
//! entries, each watched by its own waiter task that fires exactly once at
//! (or after) the entry's deadline, hands a [`FiredEvent`] to the attached
//! [`NotificationSink`] and retires the entry.
//!
//! ## Components
//!
//! - [`Scheduler`] - Entry registry and waiter lifecycle
//! - [`Clock`] - Wall-clock source shared by `create` and the waiters
//! - [`NotificationSink`] - Consumer of fired events ([`LogSink`], [`ChannelSink`],
//!   [`WebhookSink`], [`FanoutSink`])

pub mod clock;
pub mod entry;
pub mod error;
pub mod scheduler;
pub mod sink;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::ManualClock;
pub use entry::{ALARM_TRIGGERED_METHOD, EntrySnapshot, FiredEvent, SchedulerStatus};
pub use error::{SchedulerError, SinkError};
pub use scheduler::{SNOOZE_PAYLOAD_PREFIX, SNOOZE_SUFFIX, Scheduler};
pub use sink::{ChannelSink, FanoutSink, LogSink, NotificationSink, WebhookSink};
