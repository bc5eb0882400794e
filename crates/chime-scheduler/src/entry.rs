//! Scheduled entries and the events they produce.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// Notification method used when a fired event is forwarded to a client.
pub const ALARM_TRIGGERED_METHOD: &str = "notifications/alarm_triggered";

/// A pending one-shot entry.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub id: String,
    pub deadline: DateTime<Utc>,
    pub payload: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl Entry {
    pub fn snapshot(&self, now: DateTime<Utc>) -> EntrySnapshot {
        EntrySnapshot {
            id: self.id.clone(),
            deadline: self.deadline,
            payload: self.payload.clone(),
            created_at: self.created_at,
            active: self.active,
            remaining: remaining_until(self.deadline, now),
        }
    }
}

/// Time left until `deadline`, clamped at zero.
pub fn remaining_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (deadline - now).to_std().unwrap_or(Duration::ZERO)
}

/// Read-only view of a pending entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub id: String,
    pub deadline: DateTime<Utc>,
    pub payload: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
    /// Time left until the deadline at snapshot time; never negative.
    #[serde(rename = "remaining_seconds", serialize_with = "serialize_secs")]
    pub remaining: Duration,
}

fn serialize_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

/// Produced exactly once when an entry's deadline is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiredEvent {
    pub id: String,
    pub payload: String,
    pub fired_at: DateTime<Utc>,
    pub scheduled_deadline: DateTime<Utc>,
}

impl FiredEvent {
    /// Parameters of the `notifications/alarm_triggered` message.
    pub fn to_notification(&self) -> Value {
        json!({
            "type": "alarm_triggered",
            "alarm_id": self.id,
            "message": self.payload,
            "triggered_at": self.fired_at.to_rfc3339(),
            "original_time": self.scheduled_deadline.to_rfc3339(),
        })
    }

    /// Full notification envelope: method plus params.
    pub fn to_envelope(&self) -> Value {
        json!({
            "method": ALARM_TRIGGERED_METHOD,
            "params": self.to_notification(),
        })
    }
}

/// Aggregate view of the scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStatus {
    pub total_alarms: usize,
    pub active_alarms: usize,
    pub alarms: Vec<EntrySnapshot>,
    pub server_time: DateTime<Utc>,
}
