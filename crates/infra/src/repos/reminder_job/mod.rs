mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderJobRepo;
pub use postgres::PostgresReminderJobRepo;
use reminder_scheduler_domain::{ReminderJobStatus, ReminderQueueJob, ID};

#[async_trait::async_trait]
pub trait IReminderJobRepo: Send + Sync {
    /// Inserts the job unless a pending job for the same reminder already
    /// exists in the same minute bucket. Returns whether the job was inserted.
    /// The check and the insert are a single atomic operation.
    async fn insert_if_absent(&self, job: &ReminderQueueJob) -> anyhow::Result<bool>;
    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderQueueJob>>;
    /// Pending jobs due at or before `before`, oldest first. This is what the
    /// delivery consumer dequeues.
    async fn find_pending_before(
        &self,
        before: DateTime<Utc>,
    ) -> anyhow::Result<Vec<ReminderQueueJob>>;
    /// Moves a pending job to a terminal status. Returns false when the job
    /// does not exist or already is terminal.
    async fn set_status(&self, job_id: &ID, status: ReminderJobStatus) -> anyhow::Result<bool>;
}
