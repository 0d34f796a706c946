use super::INotificationPreferenceRepo;
use reminder_scheduler_domain::{NotificationChannel, NotificationPreference, ID};
use sqlx::{FromRow, PgPool};

pub struct PostgresNotificationPreferenceRepo {
    pool: PgPool,
}

impl PostgresNotificationPreferenceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PreferenceRaw {
    enabled: bool,
}

#[async_trait::async_trait]
impl INotificationPreferenceRepo for PostgresNotificationPreferenceRepo {
    async fn is_enabled(
        &self,
        user_id: &ID,
        channel: NotificationChannel,
    ) -> anyhow::Result<bool> {
        let row: Option<PreferenceRaw> = sqlx::query_as(
            r#"
            SELECT enabled FROM notification_preferences AS p
            WHERE p.user_uid = $1 AND p.channel = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(channel.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|p| p.enabled).unwrap_or(true))
    }

    async fn save(&self, preference: &NotificationPreference) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_preferences (user_uid, channel, enabled)
            VALUES($1, $2, $3)
            ON CONFLICT (user_uid, channel) DO UPDATE SET enabled = EXCLUDED.enabled
            "#,
        )
        .bind(preference.user_id.inner_ref())
        .bind(preference.channel.as_str())
        .bind(preference.enabled)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
