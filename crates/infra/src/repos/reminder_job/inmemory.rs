use super::IReminderJobRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{ReminderJobStatus, ReminderQueueJob, ID};
use std::sync::Mutex;

pub struct InMemoryReminderJobRepo {
    jobs: Mutex<Vec<ReminderQueueJob>>,
}

impl InMemoryReminderJobRepo {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderJobRepo for InMemoryReminderJobRepo {
    async fn insert_if_absent(&self, job: &ReminderQueueJob) -> anyhow::Result<bool> {
        let mut jobs = lock(&self.jobs)?;
        if jobs.iter().any(|existing| existing.conflicts_with(job)) {
            return Ok(false);
        }
        jobs.push(job.clone());
        Ok(true)
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderQueueJob>> {
        find_by(&self.jobs, |j| j.reminder_id == *reminder_id)
    }

    async fn find_pending_before(
        &self,
        before: DateTime<Utc>,
    ) -> anyhow::Result<Vec<ReminderQueueJob>> {
        let mut jobs = find_by(&self.jobs, |j| {
            j.status == ReminderJobStatus::Pending && j.fire_at <= before
        })?;
        jobs.sort_by_key(|j| j.fire_at);
        Ok(jobs)
    }

    async fn set_status(&self, job_id: &ID, status: ReminderJobStatus) -> anyhow::Result<bool> {
        let updated = update_many(
            &self.jobs,
            |j| j.id == *job_id && !j.status.is_terminal(),
            |j| j.status = status,
        )?;
        Ok(updated > 0)
    }
}
