use super::IReminderRepo;
use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{Reminder, ReminderOffset, ReminderStatus, ID};
use sqlx::{FromRow, PgPool};
use std::convert::TryFrom;
use uuid::Uuid;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    entity_type: String,
    entity_id: String,
    offset_days: i32,
    offset_hours: i32,
    channel: String,
    status: String,
    next_fire_at: DateTime<Utc>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            entity_type: raw.entity_type.parse()?,
            entity_id: raw.entity_id,
            offset: ReminderOffset::new(raw.offset_days, raw.offset_hours),
            channel: raw.channel.parse()?,
            status: raw.status.parse()?,
            next_fire_at: raw.next_fire_at,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn into_reminders(rows: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    rows.into_iter().map(Reminder::try_from).collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        let row: ReminderRaw = sqlx::query_as(
            r#"
            INSERT INTO reminders
                (reminder_uid, user_uid, entity_type, entity_id, offset_days, offset_hours,
                 channel, status, next_fire_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_uid, entity_type, entity_id, offset_days, offset_hours)
            DO UPDATE SET
                channel = EXCLUDED.channel,
                status = EXCLUDED.status,
                next_fire_at = EXCLUDED.next_fire_at,
                updated = EXCLUDED.updated
            RETURNING *
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.entity_type.as_str())
        .bind(&reminder.entity_id)
        .bind(reminder.offset.days)
        .bind(reminder.offset.hours)
        .bind(reminder.channel.as_str())
        .bind(reminder.status.as_str())
        .bind(reminder.next_fire_at)
        .bind(reminder.created)
        .bind(reminder.updated)
        .fetch_one(&self.pool)
        .await?;

        Reminder::try_from(row)
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let row: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Reminder::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1
            ORDER BY r.next_fire_at
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        into_reminders(rows)
    }

    async fn find_due(&self, horizon: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.status = $1 AND r.next_fire_at <= $2
            ORDER BY r.next_fire_at
            "#,
        )
        .bind(ReminderStatus::Active.as_str())
        .bind(horizon)
        .fetch_all(&self.pool)
        .await?;

        into_reminders(rows)
    }

    async fn set_status(
        &self,
        reminder_id: &ID,
        current: ReminderStatus,
        next: ReminderStatus,
        updated: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET status = $2, updated = $3
            WHERE reminder_uid = $1 AND status = $4
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(next.as_str())
        .bind(updated)
        .bind(current.as_str())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }
}
