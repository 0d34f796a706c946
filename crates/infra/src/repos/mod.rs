mod content;
mod notification_preference;
mod reminder;
mod reminder_job;
mod shared;
mod sweep_log;

pub use content::{IContentRepo, InMemoryContentRepo, PostgresContentRepo};
pub use notification_preference::{
    INotificationPreferenceRepo, InMemoryNotificationPreferenceRepo,
    PostgresNotificationPreferenceRepo,
};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
pub use reminder_job::{IReminderJobRepo, InMemoryReminderJobRepo, PostgresReminderJobRepo};
pub use sweep_log::{ISweepLogRepo, InMemorySweepLogRepo, PostgresSweepLogRepo};

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub reminder_jobs: Arc<dyn IReminderJobRepo>,
    pub content: Arc<dyn IContentRepo>,
    pub notification_preferences: Arc<dyn INotificationPreferenceRepo>,
    pub sweep_logs: Arc<dyn ISweepLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            reminder_jobs: Arc::new(PostgresReminderJobRepo::new(pool.clone())),
            content: Arc::new(PostgresContentRepo::new(pool.clone())),
            notification_preferences: Arc::new(PostgresNotificationPreferenceRepo::new(
                pool.clone(),
            )),
            sweep_logs: Arc::new(PostgresSweepLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            reminder_jobs: Arc::new(InMemoryReminderJobRepo::new()),
            content: Arc::new(InMemoryContentRepo::new()),
            notification_preferences: Arc::new(InMemoryNotificationPreferenceRepo::new()),
            sweep_logs: Arc::new(InMemorySweepLogRepo::new()),
        }
    }
}
