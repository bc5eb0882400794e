//! Entry registry and waiter lifecycle.
//!
//! Every pending entry owns a slot holding its data, a cancellation token
//! for its waiter and a generation number. A waiter that wakes up claims the
//! entry by removing the slot only if the generation still matches, so an
//! entry that was deleted or replaced in the meantime is never delivered and
//! a claimed entry is delivered exactly once.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info};

use crate::clock::{Clock, SystemClock};
use crate::entry::{Entry, EntrySnapshot, FiredEvent, SchedulerStatus, remaining_until};
use crate::error::SchedulerError;
use crate::sink::NotificationSink;

/// Suffix appended to an entry id when it is snoozed.
pub const SNOOZE_SUFFIX: &str = "_snooze";

/// Prefix prepended to the payload of a snoozed entry.
pub const SNOOZE_PAYLOAD_PREFIX: &str = "Snoozed: ";

struct Slot {
    entry: Entry,
    generation: u64,
    token: CancellationToken,
}

struct SchedulerInner {
    entries: DashMap<String, Slot>,
    sink: RwLock<Option<Arc<dyn NotificationSink>>>,
    clock: Arc<dyn Clock>,
    next_generation: AtomicU64,
}

/// Deferred notification scheduler.
///
/// Cheap to clone; clones share the same registry. Must be used from within
/// a tokio runtime since each entry spawns its own waiter task.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<SchedulerInner>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create a scheduler driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                entries: DashMap::new(),
                sink: RwLock::new(None),
                clock,
                next_generation: AtomicU64::new(1),
            }),
        }
    }

    /// Current time according to the scheduler's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    /// Set the sink that receives fired events, replacing any previous one.
    pub fn attach_sink(&self, sink: Arc<dyn NotificationSink>) {
        info!(sink = sink.id(), "Notification sink attached");
        *self.inner.sink.write() = Some(sink);
    }

    /// Remove the sink. Entries firing afterwards are retired without delivery.
    pub fn detach_sink(&self) -> Option<Arc<dyn NotificationSink>> {
        self.inner.sink.write().take()
    }

    pub fn has_sink(&self) -> bool {
        self.inner.sink.read().is_some()
    }

    /// Register a one-shot entry that fires at `deadline`.
    ///
    /// An existing entry with the same id is cancelled and replaced.
    pub fn create(
        &self,
        id: impl Into<String>,
        deadline: DateTime<Utc>,
        payload: impl Into<String>,
    ) -> Result<EntrySnapshot, SchedulerError> {
        self.create_at(id.into(), deadline, payload.into(), self.now())
    }

    /// Validate `deadline` against `now` and insert. Nothing can fail once
    /// the deadline check passes.
    fn create_at(
        &self,
        id: String,
        deadline: DateTime<Utc>,
        payload: String,
        now: DateTime<Utc>,
    ) -> Result<EntrySnapshot, SchedulerError> {
        if deadline <= now {
            return Err(SchedulerError::InvalidDeadline { id, deadline, now });
        }

        let entry = Entry {
            id: id.clone(),
            deadline,
            payload,
            created_at: now,
            active: true,
        };
        let snapshot = entry.snapshot(now);
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        let previous = self.inner.entries.insert(
            id.clone(),
            Slot {
                entry,
                generation,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
            debug!(alarm_id = %id, "Replaced pending alarm");
        }

        self.spawn_waiter(id.clone(), generation, deadline, token);
        info!(alarm_id = %id, deadline = %deadline, "Alarm scheduled");
        Ok(snapshot)
    }

    fn spawn_waiter(&self, id: String, generation: u64, deadline: DateTime<Utc>, token: CancellationToken) {
        let inner = self.inner.clone();
        let span = tracing::debug_span!("alarm_waiter", alarm_id = %id, generation);

        tokio::spawn(
            async move {
                let wait = remaining_until(deadline, inner.clock.now());
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("Waiter cancelled");
                        return;
                    }
                    _ = tokio::time::sleep(wait) => {}
                }
                inner.fire(&id, generation).await;
            }
            .instrument(span),
        );
    }

    /// Cancel and remove a pending entry.
    pub fn delete(&self, id: &str) -> Result<(), SchedulerError> {
        match self.inner.entries.remove(id) {
            Some((_, slot)) => {
                slot.token.cancel();
                info!(alarm_id = %id, "Alarm deleted");
                Ok(())
            }
            None => Err(SchedulerError::NotFound(id.to_string())),
        }
    }

    pub fn get(&self, id: &str) -> Option<EntrySnapshot> {
        let now = self.now();
        self.inner.entries.get(id).map(|slot| slot.entry.snapshot(now))
    }

    /// All pending entries, oldest first.
    pub fn list(&self) -> Vec<EntrySnapshot> {
        let now = self.now();
        let mut slots: Vec<(u64, EntrySnapshot)> = self
            .inner
            .entries
            .iter()
            .map(|slot| (slot.generation, slot.entry.snapshot(now)))
            .collect();
        slots.sort_by_key(|(generation, _)| *generation);
        slots.into_iter().map(|(_, snapshot)| snapshot).collect()
    }

    /// Replace `id` with a derived entry firing `extra` from now.
    ///
    /// The derived entry is keyed `<id>_snooze` and its payload is prefixed
    /// with `Snoozed: `. The original is removed whether or not it would
    /// otherwise have fired. A zero `extra` is rejected before anything changes,
    /// and once the original is removed the derived entry is always inserted.
    pub fn snooze(&self, id: &str, extra: Duration) -> Result<EntrySnapshot, SchedulerError> {
        let now = self.now();
        let deadline = TimeDelta::from_std(extra)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(now);
        let derived_id = format!("{}{}", id, SNOOZE_SUFFIX);
        if deadline <= now {
            return Err(SchedulerError::InvalidDeadline {
                id: derived_id,
                deadline,
                now,
            });
        }

        let (_, original) = self
            .inner
            .entries
            .remove(id)
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))?;
        original.token.cancel();

        let payload = format!("{}{}", SNOOZE_PAYLOAD_PREFIX, original.entry.payload);
        info!(alarm_id = %id, snoozed_as = %derived_id, "Alarm snoozed");
        self.create_at(derived_id, deadline, payload, now)
    }

    /// Toggle delivery for a pending entry.
    ///
    /// An inactive entry still retires at its deadline, but no event is
    /// handed to the sink.
    pub fn set_active(&self, id: &str, active: bool) -> Result<EntrySnapshot, SchedulerError> {
        let now = self.now();
        let mut slot = self
            .inner
            .entries
            .get_mut(id)
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))?;
        slot.entry.active = active;
        Ok(slot.entry.snapshot(now))
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn status(&self) -> SchedulerStatus {
        let alarms = self.list();
        SchedulerStatus {
            total_alarms: alarms.len(),
            active_alarms: alarms.iter().filter(|a| a.active).count(),
            alarms,
            server_time: self.now(),
        }
    }

    /// Cancel every pending entry. Returns how many were cancelled.
    pub fn shutdown(&self) -> usize {
        let ids: Vec<String> = self
            .inner
            .entries
            .iter()
            .map(|slot| slot.key().clone())
            .collect();

        let mut cancelled = 0;
        for id in ids {
            if let Some((_, slot)) = self.inner.entries.remove(&id) {
                slot.token.cancel();
                cancelled += 1;
            }
        }
        info!(cancelled, "Scheduler shut down");
        cancelled
    }
}

impl SchedulerInner {
    async fn fire(&self, id: &str, generation: u64) {
        let Some((_, slot)) = self
            .entries
            .remove_if(id, |_, slot| slot.generation == generation)
        else {
            debug!("Entry gone before firing");
            return;
        };

        let entry = slot.entry;
        if !entry.active {
            info!(alarm_id = %entry.id, "Inactive alarm retired without delivery");
            return;
        }

        let event = FiredEvent {
            id: entry.id,
            payload: entry.payload,
            fired_at: self.clock.now(),
            scheduled_deadline: entry.deadline,
        };
        info!(alarm_id = %event.id, "Alarm fired");

        let sink = self.sink.read().clone();
        let Some(sink) = sink else {
            debug!(alarm_id = %event.id, "No sink attached, event dropped");
            return;
        };

        if let Err(source) = sink.notify(&event).await {
            let err = SchedulerError::SinkDeliveryFailed {
                id: event.id.clone(),
                source,
            };
            error!(sink = sink.id(), "{}", err);
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
