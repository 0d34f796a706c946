use super::ISweepLogRepo;
use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{SweepLog, SweepLogStatus};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresSweepLogRepo {
    pool: PgPool,
}

impl PostgresSweepLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SweepLogRaw {
    log_uid: Uuid,
    status: String,
    message: String,
    enqueued: i64,
    skipped: i64,
    created: DateTime<Utc>,
}

impl From<SweepLogRaw> for SweepLog {
    fn from(raw: SweepLogRaw) -> Self {
        let status = match raw.status.as_str() {
            "ok" => SweepLogStatus::Ok,
            _ => SweepLogStatus::Error,
        };
        Self {
            id: raw.log_uid.into(),
            status,
            message: raw.message,
            enqueued: raw.enqueued,
            skipped: raw.skipped,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl ISweepLogRepo for PostgresSweepLogRepo {
    async fn insert(&self, log: &SweepLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_sweep_logs
                (log_uid, status, message, enqueued, skipped, created)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(log.id.inner_ref())
        .bind(log.status.as_str())
        .bind(&log.message)
        .bind(log.enqueued)
        .bind(log.skipped)
        .bind(log.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_latest(&self, limit: usize) -> anyhow::Result<Vec<SweepLog>> {
        let rows: Vec<SweepLogRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_sweep_logs
            ORDER BY created DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|log| log.into()).collect())
    }
}
