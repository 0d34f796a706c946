use super::IReminderJobRepo;
use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{ReminderJobStatus, ReminderQueueJob, ID};
use sqlx::{FromRow, PgPool};
use std::convert::TryFrom;
use uuid::Uuid;

pub struct PostgresReminderJobRepo {
    pool: PgPool,
}

impl PostgresReminderJobRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderJobRaw {
    job_uid: Uuid,
    reminder_uid: Uuid,
    user_uid: Uuid,
    fire_at: DateTime<Utc>,
    entity_type: String,
    entity_id: String,
    channel: String,
    status: String,
    created: DateTime<Utc>,
}

impl TryFrom<ReminderJobRaw> for ReminderQueueJob {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderJobRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.job_uid.into(),
            reminder_id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            fire_at: raw.fire_at,
            kind: raw.entity_type.parse()?,
            entity_id: raw.entity_id,
            channel: raw.channel.parse()?,
            status: raw.status.parse()?,
            created: raw.created,
        })
    }
}

fn into_jobs(rows: Vec<ReminderJobRaw>) -> anyhow::Result<Vec<ReminderQueueJob>> {
    rows.into_iter().map(ReminderQueueJob::try_from).collect()
}

#[async_trait::async_trait]
impl IReminderJobRepo for PostgresReminderJobRepo {
    async fn insert_if_absent(&self, job: &ReminderQueueJob) -> anyhow::Result<bool> {
        // Arbitrates against the partial unique index on pending jobs
        let res = sqlx::query(
            r#"
            INSERT INTO reminder_queue_jobs
                (job_uid, reminder_uid, user_uid, fire_at, fire_minute, entity_type,
                 entity_id, channel, status, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (reminder_uid, fire_minute) WHERE status = 'pending'
            DO NOTHING
            "#,
        )
        .bind(job.id.inner_ref())
        .bind(job.reminder_id.inner_ref())
        .bind(job.user_id.inner_ref())
        .bind(job.fire_at)
        .bind(job.minute_bucket())
        .bind(job.kind.as_str())
        .bind(&job.entity_id)
        .bind(job.channel.as_str())
        .bind(job.status.as_str())
        .bind(job.created)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderQueueJob>> {
        let rows: Vec<ReminderJobRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_queue_jobs AS j
            WHERE j.reminder_uid = $1
            ORDER BY j.fire_at
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        into_jobs(rows)
    }

    async fn find_pending_before(
        &self,
        before: DateTime<Utc>,
    ) -> anyhow::Result<Vec<ReminderQueueJob>> {
        let rows: Vec<ReminderJobRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_queue_jobs AS j
            WHERE j.status = $1 AND j.fire_at <= $2
            ORDER BY j.fire_at
            "#,
        )
        .bind(ReminderJobStatus::Pending.as_str())
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        into_jobs(rows)
    }

    async fn set_status(&self, job_id: &ID, status: ReminderJobStatus) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_queue_jobs
            SET status = $2
            WHERE job_uid = $1 AND status = $3
            "#,
        )
        .bind(job_id.inner_ref())
        .bind(status.as_str())
        .bind(ReminderJobStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }
}
