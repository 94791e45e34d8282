//! Reminder job scheduler
//!
//! Turns planned reminders into one-shot jobs. The registry maps reminder
//! keys to live job handles: scheduling an existing key removes the old
//! job first (replace-existing), cancelling a missing key is a no-op, and
//! a fired job removes its own entry. The spreadsheet itself is the only
//! persisted reminder state, so [`CronReminderScheduler::reconstruct`]
//! rebuilds every still-relevant job from a full snapshot at startup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bookslot_core::{
    plan_reminders, Clock, MessageSink, PlannedReminder, ReminderPolicy,
    ReminderScheduler as ReminderSchedulerPort, ScheduleStore,
};
use bookslot_domain::{
    date_label, Occupant, ReminderConfig, ReminderKey, ReminderKind, Result, ScheduleSnapshot,
    SlotIndex,
};
use chrono_tz::Tz;
use parking_lot::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::error::{SchedulerError, SchedulerResult};

/// Configuration for the reminder scheduler.
#[derive(Debug, Clone)]
pub struct ReminderSchedulerConfig {
    /// Timezone fire times are computed in.
    pub timezone: Tz,
    /// Fire-time policy (hours and grace window).
    pub policy: ReminderPolicy,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
}

impl ReminderSchedulerConfig {
    pub fn new(timezone: Tz, reminders: &ReminderConfig) -> Self {
        Self {
            timezone,
            policy: ReminderPolicy::from(reminders),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

type Registry = Arc<Mutex<HashMap<ReminderKey, Uuid>>>;

/// Reminder scheduler with an explicit lifecycle and an owned job registry.
pub struct CronReminderScheduler {
    scheduler: JobScheduler,
    registry: Registry,
    store: Arc<dyn ScheduleStore>,
    sink: Arc<dyn MessageSink>,
    clock: Arc<dyn Clock>,
    config: ReminderSchedulerConfig,
    cancellation: CancellationToken,
}

impl CronReminderScheduler {
    /// Create the scheduler; call [`start`](Self::start) before scheduling.
    pub async fn new(
        config: ReminderSchedulerConfig,
        store: Arc<dyn ScheduleStore>,
        sink: Arc<dyn MessageSink>,
        clock: Arc<dyn Clock>,
    ) -> SchedulerResult<Self> {
        let scheduler =
            JobScheduler::new().await.map_err(|e| SchedulerError::CreationFailed(e.to_string()))?;
        Ok(Self {
            scheduler,
            registry: Arc::new(Mutex::new(HashMap::new())),
            store,
            sink,
            clock,
            config,
            cancellation: CancellationToken::new(),
        })
    }

    /// Start the underlying job runner.
    pub async fn start(&self) -> SchedulerResult<()> {
        let timeout = self.config.start_timeout;
        tokio::time::timeout(timeout, self.scheduler.start())
            .await
            .map_err(|_| SchedulerError::Timeout { seconds: timeout.as_secs() })?
            .map_err(|e| SchedulerError::StartFailed(e.to_string()))?;
        info!(scheduler = "reminders", event = "start", "reminder scheduler started");
        Ok(())
    }

    /// Stop the job runner; pending jobs are dropped.
    pub async fn shutdown(&self) -> SchedulerResult<()> {
        self.cancellation.cancel();
        let timeout = self.config.stop_timeout;
        let mut scheduler = self.scheduler.clone();
        tokio::time::timeout(timeout, async move { scheduler.shutdown().await })
            .await
            .map_err(|_| SchedulerError::Timeout { seconds: timeout.as_secs() })?
            .map_err(|e| SchedulerError::StopFailed(e.to_string()))?;
        info!(scheduler = "reminders", event = "stop", "reminder scheduler stopped");
        Ok(())
    }

    /// Keys with a live job, in no particular order.
    pub fn pending_keys(&self) -> Vec<ReminderKey> {
        self.registry.lock().keys().cloned().collect()
    }

    /// Rebuild reminder jobs from the store snapshot.
    ///
    /// Every claimed slot whose occupant carries an owner-id marker gets
    /// its reminders re-planned against the current clock; per-claim
    /// failures are logged and skipped. Returns the number of claims
    /// scheduled.
    pub async fn reconstruct(&self) -> Result<usize> {
        info!("restoring reminders from the schedule store");
        let raw = self.store.read_all_rows().await?;
        let snapshot = ScheduleSnapshot::from_raw_rows(&raw);

        let mut scheduled = 0;
        for row in &snapshot.rows {
            if date_label::split(&row.date_label).is_none() {
                continue;
            }
            for slot in SlotIndex::ALL {
                let Some(occupant) = row.slot(slot).occupant() else {
                    continue;
                };
                match self.schedule(&occupant, &row.date_label).await {
                    Ok(()) => scheduled += 1,
                    Err(err) => {
                        warn!(
                            error = %err,
                            owner_id = occupant.owner_id,
                            date = %row.date_label,
                            "skipping reminder restoration for one booking"
                        );
                    }
                }
            }
        }
        info!(scheduled, "finished restoring reminders");
        Ok(scheduled)
    }

    async fn register(&self, owner_id: i64, planned: PlannedReminder) -> SchedulerResult<()> {
        // Replace-existing: drop the previous job under this key, if any.
        let previous = self.registry.lock().get(&planned.key).copied();
        if let Some(old_id) = previous {
            if let Err(err) = self.scheduler.remove(&old_id).await {
                debug!(key = %planned.key, error = %err, "previous job already gone");
            }
        }

        let now = self.clock.now_utc().with_timezone(&self.config.timezone);
        let delay = (planned.fire_at - now).to_std().unwrap_or(Duration::ZERO);

        let registry = self.registry.clone();
        let sink = self.sink.clone();
        let clock = self.clock.clone();
        let cancellation = self.cancellation.clone();
        let key = planned.key.clone();
        let fire_at = planned.fire_at;
        let message = planned.message.clone();
        let grace = self.config.policy.grace;

        let job = Job::new_one_shot_async(delay, move |job_id, _lock| {
            let registry = registry.clone();
            let sink = sink.clone();
            let clock = clock.clone();
            let cancellation = cancellation.clone();
            let key = key.clone();
            let message = message.clone();

            Box::pin(async move {
                // A replaced entry points at a newer job; only a job that
                // still owns its key may fire and clean up.
                let owns_key = registry.lock().get(&key).copied() == Some(job_id);
                if !owns_key || cancellation.is_cancelled() {
                    return;
                }

                let lateness = clock.now_utc().with_timezone(&fire_at.timezone()) - fire_at;
                if lateness > grace {
                    warn!(key = %key, lateness_secs = lateness.num_seconds(), "reminder missed its grace window, dropping");
                } else if let Err(err) = sink.deliver(key.owner_id, &message).await {
                    // At-most-once: delivery failures are logged, never retried.
                    error!(key = %key, error = %err, "reminder delivery failed");
                } else {
                    info!(key = %key, "reminder delivered");
                }

                let mut registry = registry.lock();
                if registry.get(&key) == Some(&job_id) {
                    registry.remove(&key);
                }
            })
        })
        .map_err(|e| SchedulerError::JobRegistrationFailed(e.to_string()))?;

        let job_id = job.guid();
        self.scheduler
            .add(job)
            .await
            .map_err(|e| SchedulerError::JobRegistrationFailed(e.to_string()))?;
        self.registry.lock().insert(planned.key.clone(), job_id);

        debug!(
            key = %planned.key,
            owner_id,
            fire_at = %planned.fire_at,
            job_id = %job_id,
            "registered reminder job"
        );
        Ok(())
    }
}

#[async_trait]
impl ReminderSchedulerPort for CronReminderScheduler {
    async fn schedule(&self, owner: &Occupant, date_label: &str) -> Result<()> {
        let now = self.clock.now_utc().with_timezone(&self.config.timezone);
        let planned = plan_reminders(owner.owner_id, date_label, now, &self.config.policy)?;
        for reminder in planned {
            self.register(owner.owner_id, reminder).await?;
        }
        Ok(())
    }

    async fn cancel(&self, owner_id: i64, date_label: &str) -> Result<()> {
        for kind in ReminderKind::BOTH {
            let key = ReminderKey::new(kind, owner_id, date_label);
            let removed = self.registry.lock().remove(&key);
            if let Some(job_id) = removed {
                if let Err(err) = self.scheduler.remove(&job_id).await {
                    debug!(key = %key, error = %err, "job already gone on cancel");
                }
                debug!(key = %key, "cancelled reminder job");
            }
        }
        Ok(())
    }
}
